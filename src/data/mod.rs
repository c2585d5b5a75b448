// mod.rs - Data structures module

pub mod loaders;
pub mod record;
pub mod replicate;

// Re-export main types for convenience
pub use record::{
    parse_info_field, parse_vcf_line, FieldSelection, Inclusion, InfoField, InfoMap, VariantRecord,
    VcfField,
};
pub use replicate::{LoadOptions, PositionKey, ReplicateData};
