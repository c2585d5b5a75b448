// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// vcfrep - Replicate concordance scoring for single-sample VCF files
pub struct Args {
    /// folder searched recursively for .vcf files
    #[argh(option)]
    pub path: Option<String>,

    /// group files by the file-name part before this separator (default: group by folder)
    #[argh(option)]
    pub separator: Option<String>,

    /// positions within this many coordinates are compared (default: 0; a config file offset replaces 0)
    #[argh(option, default = "0")]
    pub offset: i64,

    /// minimum sequence similarity percentage (0-100) for non-identical alterations to match
    #[argh(option)]
    pub threshold: Option<f64>,

    /// trust the .vcf extension without opening files
    #[argh(switch)]
    pub no_open_files: bool,

    /// only print reports, no status, progress or warnings
    #[argh(switch)]
    pub quiet: bool,

    /// append reports to this file instead of printing them
    #[argh(option)]
    pub output: Option<String>,

    /// show full paths instead of file names in reports
    #[argh(switch)]
    pub complete_names: bool,

    /// report content: file, position, both (default: file)
    #[argh(option, default = "String::from(\"file\")")]
    pub output_type: String,

    /// report format: text, json (default: text)
    #[argh(option, default = "String::from(\"text\")")]
    pub format: String,

    /// keep only files whose name matches this regex
    #[argh(option)]
    pub include_files: Option<String>,

    /// drop files whose name matches this regex
    #[argh(option)]
    pub exclude_files: Option<String>,

    /// number of threads used to load files (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    /// Settings echoed in every group header
    pub fn settings_summary(&self) -> String {
        let grouping = match self.separator.as_deref() {
            Some(sep) if !sep.is_empty() => format!("separator '{}'", sep),
            _ => "folder".to_string(),
        };
        let threshold = self
            .threshold
            .map(|t| t.to_string())
            .unwrap_or_else(|| "identical".to_string());

        format!(
            "offset={} threshold={} grouping={} open_files={}",
            self.offset.max(0),
            threshold,
            grouping,
            !self.no_open_files
        )
    }
}
