// mod.rs - Core logic module

pub mod alignment;
pub mod comparator;
pub mod matcher;

// Re-export main types for convenience
pub use alignment::{seq_percent_alignment, AlignmentConfig, SubstitutionMatrix};
pub use comparator::{
    compare_replicates, CompareConfig, ComparisonError, ComparisonReport, PairwiseScore,
    PositionAgreement, PositionSummary, ProgressEvent, ProgressObserver, ReplicateMeans,
    ScoreSummary, MEANS_KEY,
};
pub use matcher::{compare_position_alterations, AlterationMatch, AlterationMatcher};
