// lib.rs - vcfrep library root

//! # vcfrep - Replicate concordance scoring for variant call format files
//!
//! This library compares replicates of the same sample, each one a single-sample VCF
//! file, and measures how well their called variants agree. Positions may be compared
//! within a coordinate tolerance, and alterations may match by identity, by symbolic
//! event tag, or by sequence similarity above a threshold.
//!
//! ## Features
//!
//! - **Selective parsing**: per-field inclusion of VCF columns, raw or parsed INFO
//! - **Tolerant matching**: offset windows, symbolic events, alignment-based similarity
//! - **Directional scores**: global and inclusion percentages for every replicate pair
//! - **Position agreement**: which replicates agree on each locus, weighted per alteration
//! - **Batch scanning**: recursive discovery and grouping of replicate files
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use vcfrep::prelude::*;
//!
//! let options = LoadOptions::alterations_only();
//! let replicates = vec![
//!     ("P15-1".to_string(), ReplicateData::from_file("P15-1.vcf".as_ref(), &options)?),
//!     ("P15-2".to_string(), ReplicateData::from_file("P15-2.vcf".as_ref(), &options)?),
//! ];
//!
//! let config = CompareConfig {
//!     offset: 2,
//!     sequence_threshold: Some(80.0),
//!     quiet: true,
//! };
//! let report = compare_replicates(&replicates, &config, &mut ())?;
//! println!("global agreement: {:.2}%", report.scores.grand_mean);
//! # Ok::<(), VcfRepError>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;
pub mod scan;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{compare_replicates, seq_percent_alignment};
    pub use crate::core::{AlignmentConfig, CompareConfig, ComparisonReport, ProgressObserver};
    pub use crate::data::{parse_vcf_line, FieldSelection, LoadOptions, ReplicateData};
    pub use crate::error::VcfRepError;
    pub use crate::output::{render_group, ReportOptions};
    pub use crate::scan::{find_variant_call_format_files, GroupingStrategy};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{compare_replicates, CompareConfig, ComparisonReport};
pub use data::{PositionKey, ReplicateData, VariantRecord};
pub use error::VcfRepError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!("vcfrep v{} - Replicate concordance for VCF files", VERSION)
}
