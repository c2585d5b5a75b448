// discovery.rs - Recursive search for single-sample VCF files

use crate::error::VcfRepError;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Column legend every variant call format file must carry
pub const VCF_LEGEND: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";

/// 8 mandatory columns + FORMAT + one sample
const MAX_SINGLE_SAMPLE_COLUMNS: usize = 10;

/// How much work is spent deciding whether a `.vcf` file is usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffOptions {
    /// Open the file and look for the column legend (tells VCF from vCard)
    pub open_file: bool,
    /// Reject files whose legend declares more than one sample; needs `open_file`
    pub one_sample_only: bool,
}

impl Default for SniffOptions {
    fn default() -> Self {
        Self {
            open_file: true,
            one_sample_only: true,
        }
    }
}

/// Why a file was not kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotVcfExtension,
    Unreadable(String),
    MissingLegend,
    MultipleSamples,
    Filtered,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotVcfExtension => write!(f, "no .vcf extension"),
            Rejection::Unreadable(e) => write!(f, "can not be opened ({})", e),
            Rejection::MissingLegend => {
                write!(f, "has .vcf extension but does not match the VCF signature")
            }
            Rejection::MultipleSamples => write!(f, "contains multiple samples"),
            Rejection::Filtered => write!(f, "excluded by file name filters"),
        }
    }
}

/// Check one path against the VCF signature
pub fn sniff(path: &Path, options: &SniffOptions) -> Result<(), Rejection> {
    let has_extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("vcf"))
        .unwrap_or(false);
    if !has_extension {
        return Err(Rejection::NotVcfExtension);
    }
    if !options.open_file {
        return Ok(());
    }

    let file = File::open(path).map_err(|e| Rejection::Unreadable(e.to_string()))?;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Rejection::Unreadable(e.to_string()))?;
        if line.starts_with(VCF_LEGEND) {
            let columns = line.trim_end().split('\t').count();
            if options.one_sample_only && columns > MAX_SINGLE_SAMPLE_COLUMNS {
                return Err(Rejection::MultipleSamples);
            }
            return Ok(());
        }
    }
    Err(Rejection::MissingLegend)
}

pub fn is_variant_call_format(path: &Path, options: &SniffOptions) -> bool {
    sniff(path, options).is_ok()
}

/// Include/exclude regexes applied to file names
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    pub include: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl FileFilter {
    pub fn accepts(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(regex) = &self.include {
            if !regex.is_match(&name) {
                return false;
            }
        }
        if let Some(regex) = &self.exclude {
            if regex.is_match(&name) {
                return false;
            }
        }
        true
    }
}

/// Result of a recursive search
#[derive(Debug, Default)]
pub struct Discovery {
    /// Accepted files, sorted
    pub files: Vec<PathBuf>,
    /// `.vcf` files or folders that were set aside, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// List every usable VCF file below `root`, sub-folders included
pub fn find_variant_call_format_files(
    root: &Path,
    options: &SniffOptions,
    filter: &FileFilter,
) -> Result<Discovery, VcfRepError> {
    let entries = fs::read_dir(root).map_err(|e| VcfRepError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut discovery = Discovery::default();
    walk(entries, options, filter, &mut discovery);
    discovery.files.sort();
    Ok(discovery)
}

fn walk(entries: fs::ReadDir, options: &SniffOptions, filter: &FileFilter, discovery: &mut Discovery) {
    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            match fs::read_dir(&path) {
                Ok(children) => walk(children, options, filter, discovery),
                Err(e) => discovery
                    .skipped
                    .push((path, format!("folder can not be read ({})", e))),
            }
            continue;
        }

        match sniff(&path, options) {
            Ok(()) if filter.accepts(&path) => discovery.files.push(path),
            Ok(()) => discovery.skipped.push((path, Rejection::Filtered.to_string())),
            Err(Rejection::NotVcfExtension) => {}
            Err(rejection) => discovery.skipped.push((path, rejection.to_string())),
        }
    }
}
