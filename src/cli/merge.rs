// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.path.is_none() {
            self.path = config.path;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Only override defaults, not explicit CLI values
        if self.output_type == "file" {
            if let Some(output_type) = config.output_type {
                self.output_type = output_type;
            }
        }
        if self.format == "text" {
            if let Some(format) = config.format {
                self.format = format;
            }
        }
        // 0 is the default, so an explicit --offset 0 does not beat the config file
        if self.offset == 0 {
            if let Some(offset) = config.offset {
                self.offset = offset;
            }
        }
        if self.threshold.is_none() {
            self.threshold = config.threshold;
        }

        // Discovery and grouping
        if self.separator.is_none() {
            self.separator = config.separator;
        }
        if self.include_files.is_none() {
            self.include_files = config.include_files;
        }
        if self.exclude_files.is_none() {
            self.exclude_files = config.exclude_files;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (config only sets what the command line left off)
        self.no_open_files |= config.no_open_files.unwrap_or(false);
        self.complete_names |= config.complete_names.unwrap_or(false);
        self.quiet |= config.quiet.unwrap_or(false);

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    #[test]
    fn test_command_line_wins() {
        let args = Args::from_args(&["vcfrep"], &["--path", "cli", "--offset", "2"]).unwrap();
        let config = Config {
            path: Some("config".to_string()),
            offset: Some(7),
            threshold: Some(90.0),
            separator: Some("_".to_string()),
            quiet: Some(true),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.path.as_deref(), Some("cli"));
        assert_eq!(merged.offset, 2);
        assert_eq!(merged.threshold, Some(90.0));
        assert_eq!(merged.separator.as_deref(), Some("_"));
        assert!(merged.quiet);
    }

    #[test]
    fn test_config_offset_replaces_zero() {
        let args = Args::from_args(&["vcfrep"], &["--offset", "0"]).unwrap();
        let config = Config {
            offset: Some(5),
            ..Config::new()
        };
        assert_eq!(args.merge_with_config(config).offset, 5);
    }

    #[test]
    fn test_config_fills_defaults() {
        let args = Args::from_args(&["vcfrep"], &[]).unwrap();
        let config = Config {
            path: Some("runs".to_string()),
            output_type: Some("both".to_string()),
            format: Some("json".to_string()),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.path.as_deref(), Some("runs"));
        assert_eq!(merged.output_type, "both");
        assert_eq!(merged.format, "json");
        assert!(!merged.quiet);
    }
}
