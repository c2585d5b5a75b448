// mod.rs - File discovery and grouping

pub mod discovery;
pub mod grouping;

// Re-export main types for convenience
pub use discovery::{
    find_variant_call_format_files, is_variant_call_format, Discovery, FileFilter, SniffOptions,
};
pub use grouping::{group_files_by_folder, group_files_by_name, FileGroups, GroupingStrategy};
