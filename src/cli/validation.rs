// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::CompareConfig;
use crate::output::{OutputType, ReportFormat, ReportOptions};
use crate::scan::{FileFilter, GroupingStrategy, SniffOptions};
use regex::Regex;
use std::path::PathBuf;
use std::str::FromStr;

/// Typed settings for one run
#[derive(Debug)]
pub struct ValidationResult {
    pub root: PathBuf,
    pub output_file: Option<PathBuf>,
    pub report_options: ReportOptions,
    pub compare_config: CompareConfig,
    pub sniff_options: SniffOptions,
    pub file_filter: FileFilter,
    pub grouping: GroupingStrategy,
}

fn compile(pattern: Option<&str>, name: &str) -> Result<Option<Regex>, String> {
    pattern
        .map(|p| Regex::new(p).map_err(|e| format!("Invalid {} regex: {}", name, e)))
        .transpose()
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let root = PathBuf::from(args.path.as_ref().ok_or("--path is required")?);
    if !root.is_dir() {
        return Err(format!("'{}' is not a folder", root.display()));
    }

    let output_type = OutputType::from_str(&args.output_type)?;
    let format = ReportFormat::from_str(&args.format)?;

    let compare_config = CompareConfig {
        offset: args.offset,
        sequence_threshold: args.threshold,
        quiet: args.quiet,
    };
    compare_config.validate().map_err(|e| e.to_string())?;

    if args.threads == Some(0) {
        return Err("Thread count must be at least 1".to_string());
    }

    let file_filter = FileFilter {
        include: compile(args.include_files.as_deref(), "include_files")?,
        exclude: compile(args.exclude_files.as_deref(), "exclude_files")?,
    };

    // Sample count is read from the legend, so it needs the file opened
    let sniff_options = SniffOptions {
        open_file: !args.no_open_files,
        one_sample_only: !args.no_open_files,
    };

    Ok(ValidationResult {
        root,
        output_file: args.output.as_ref().map(PathBuf::from),
        report_options: ReportOptions {
            output_type,
            format,
            complete_names: args.complete_names,
            settings: args.settings_summary(),
        },
        compare_config,
        sniff_options,
        file_filter,
        grouping: GroupingStrategy::from_separator(args.separator.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;
    use tempfile::TempDir;

    fn args_for(dir: &TempDir, extra: &[&str]) -> Args {
        let root = dir.path().to_string_lossy().into_owned();
        let mut all = vec!["--path", root.as_str()];
        all.extend_from_slice(extra);
        Args::from_args(&["vcfrep"], &all).unwrap()
    }

    #[test]
    fn test_valid_arguments() {
        let dir = TempDir::new().unwrap();
        let args = args_for(
            &dir,
            &["--separator", "-", "--threshold", "80", "--format", "json", "--include-files", "^P"],
        );
        let result = validate_args(&args).unwrap();

        assert_eq!(result.root, dir.path());
        assert_eq!(result.report_options.format, ReportFormat::Json);
        assert_eq!(result.report_options.output_type, OutputType::File);
        assert_eq!(result.compare_config.sequence_threshold, Some(80.0));
        assert_eq!(result.grouping, GroupingStrategy::Name("-".to_string()));
        assert!(result.file_filter.include.is_some());
        assert!(result.output_file.is_none());
    }

    #[test]
    fn test_missing_path() {
        let args = Args::from_args(&["vcfrep"], &[]).unwrap();
        assert_eq!(validate_args(&args).unwrap_err(), "--path is required");
    }

    #[test]
    fn test_invalid_values() {
        let dir = TempDir::new().unwrap();
        assert!(validate_args(&args_for(&dir, &["--threshold", "101"])).is_err());
        assert!(validate_args(&args_for(&dir, &["--output-type", "matrix"])).is_err());
        assert!(validate_args(&args_for(&dir, &["--format", "xml"])).is_err());
        assert!(validate_args(&args_for(&dir, &["--exclude-files", "("])).is_err());
        assert!(validate_args(&args_for(&dir, &["--threads", "0"])).is_err());
    }

    #[test]
    fn test_no_open_files_disables_sample_check() {
        let dir = TempDir::new().unwrap();
        let result = validate_args(&args_for(&dir, &["--no-open-files"])).unwrap();
        assert_eq!(
            result.sniff_options,
            SniffOptions {
                open_file: false,
                one_sample_only: false
            }
        );
    }
}
