// grouping.rs - Group replicate files by name prefix or by folder

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Group for names that do not contain the separator
pub const SEPARATOR_LESS_GROUP: &str = "SeparatorLessFiles";
/// Group for names that start with the separator
pub const NAME_LESS_GROUP: &str = "GroupNameLessFiles";
/// Group for paths without a parent folder
pub const UNKNOWN_FOLDER_GROUP: &str = "UNKNOWN";

pub type FileGroups = BTreeMap<String, Vec<PathBuf>>;

/// How files are gathered into replicate groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingStrategy {
    Folder,
    Name(String),
}

impl GroupingStrategy {
    /// An empty separator means grouping by folder
    pub fn from_separator(separator: Option<&str>) -> Self {
        match separator {
            Some(sep) if !sep.is_empty() => GroupingStrategy::Name(sep.to_string()),
            _ => GroupingStrategy::Folder,
        }
    }

    pub fn description(&self) -> String {
        match self {
            GroupingStrategy::Folder => "folder names".to_string(),
            GroupingStrategy::Name(sep) => format!("separator '{}'", sep),
        }
    }

    pub fn group(&self, paths: &[PathBuf]) -> FileGroups {
        match self {
            GroupingStrategy::Folder => group_files_by_folder(paths),
            GroupingStrategy::Name(sep) => group_files_by_name(paths, sep),
        }
    }
}

fn name_group(path: &Path, separator: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if separator.is_empty() {
        return SEPARATOR_LESS_GROUP.to_string();
    }
    match stem.split_once(separator) {
        Some(("", _)) => NAME_LESS_GROUP.to_string(),
        Some((prefix, _)) => prefix.to_string(),
        None => SEPARATOR_LESS_GROUP.to_string(),
    }
}

/// Group by the part of the extension-less file name before `separator`
///
/// `P15-1.vcf`, `P15-Alpha.vcf` and `P30-1.vcf` with `-` give
/// `{P15: [P15-1, P15-Alpha], P30: [P30-1]}`.
pub fn group_files_by_name(paths: &[PathBuf], separator: &str) -> FileGroups {
    let mut groups = FileGroups::new();
    for path in paths {
        groups
            .entry(name_group(path, separator))
            .or_default()
            .push(path.clone());
    }
    groups
}

/// Group files sharing the same parent folder
pub fn group_files_by_folder(paths: &[PathBuf]) -> FileGroups {
    let mut groups = FileGroups::new();
    for path in paths {
        let folder = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
            _ => UNKNOWN_FOLDER_GROUP.to_string(),
        };
        groups.entry(folder).or_default().push(path.clone());
    }
    groups
}
