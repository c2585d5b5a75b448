// error.rs - Error types shared by the loaders and the comparison engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by parsing, loading, alignment and comparison
#[derive(Debug, Error)]
pub enum VcfRepError {
    // Structural
    #[error("Can not extract 8 fields from '{line}'. All fields have to be separated by tabulations")]
    MissingFields { line: String },

    #[error("Can not turn position '{value}' into an integer")]
    InvalidPosition { value: String },

    #[error("{source} (line {line}, source {source_name})")]
    Load {
        line: usize,
        source_name: String,
        #[source]
        source: Box<VcfRepError>,
    },

    // Configuration
    #[error("Field '{0}' is always loaded and can not be configured")]
    ReservedField(&'static str),

    #[error("Can not compare replicates with '{0}' as name")]
    ReservedReplicateName(String),

    #[error("Replicate name '{0}' is used more than once")]
    DuplicateReplicateName(String),

    #[error("Not enough replicates provided: got {0}, at least two are expected")]
    NotEnoughReplicates(usize),

    #[error("Sequence threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid alignment configuration: {0}")]
    InvalidAlignmentConfig(String),

    // Lookup
    #[error("Item not found inside the substitution matrix: '{symbol}'")]
    UnknownSymbol { symbol: char },

    // I/O
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VcfRepError {
    /// Attach the 1-based line number and source identity to a per-line error
    pub fn at_line(self, line: usize, source_name: &str) -> Self {
        VcfRepError::Load {
            line,
            source_name: source_name.to_string(),
            source: Box::new(self),
        }
    }

    /// True for errors raised before any work begins
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            VcfRepError::ReservedField(_)
                | VcfRepError::ReservedReplicateName(_)
                | VcfRepError::DuplicateReplicateName(_)
                | VcfRepError::NotEnoughReplicates(_)
                | VcfRepError::InvalidThreshold(_)
                | VcfRepError::InvalidAlignmentConfig(_)
        )
    }
}
