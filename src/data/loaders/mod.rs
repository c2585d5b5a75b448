// mod.rs - File loaders for replicate data

pub mod vcf;
