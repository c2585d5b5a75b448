// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub path: Option<String>,
    pub output: Option<String>,
    pub output_type: Option<String>,
    pub format: Option<String>,
    pub complete_names: Option<bool>,

    // Discovery and grouping
    pub separator: Option<String>,
    pub no_open_files: Option<bool>,
    pub include_files: Option<String>,
    pub exclude_files: Option<String>,

    // Comparison
    pub offset: Option<i64>,
    pub threshold: Option<f64>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub quiet: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# vcfrep.toml - Configuration file for vcfrep
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Folder searched recursively for .vcf files
path = "/path/to/replicates"

# Append reports to this file (omit to print them)
# output = "concordance.txt"

# Report content: file, position, both
output_type = "file"

# Report format: text, json
format = "text"

# Show full paths instead of file names
complete_names = false

# =============================================================================
# DISCOVERY AND GROUPING
# =============================================================================

# Group files by the file-name part before this separator
# (omit or leave empty to group files by folder)
separator = "-"

# Trust the .vcf extension without opening files
no_open_files = false

# Keep only files whose name matches this regex
# include_files = "^P15"

# Drop files whose name matches this regex
# exclude_files = "control"

# =============================================================================
# COMPARISON
# =============================================================================

# Positions within this many coordinates are compared
offset = 0

# Minimum sequence similarity percentage (0-100) for non-identical alterations
# (omit to require identical alterations)
# threshold = 80.0

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads used to load files (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# Only print reports
quiet = false
"#
        .to_string()
    }
}
