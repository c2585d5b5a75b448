// replicate.rs - Position-indexed replicate data

use crate::data::record::{FieldSelection, Inclusion, VariantRecord, VcfField};
use crate::error::VcfRepError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Locus identity: a position is never compared without its chromosome
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionKey {
    pub chrom: String,
    pub pos: i64,
}

impl PositionKey {
    pub fn new(chrom: impl Into<String>, pos: i64) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
        }
    }

    /// Same chromosome, shifted coordinate; `None` when the coordinate overflows
    pub fn shifted(&self, delta: i64) -> Option<Self> {
        Some(Self {
            chrom: self.chrom.clone(),
            pos: self.pos.checked_add(delta)?,
        })
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chrom, self.pos)
    }
}

/// Options for loading one replicate
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Extra columns to keep; chromosome and position are always loaded
    pub selection: FieldSelection,
    /// Capture `##` header lines verbatim
    pub keep_header: bool,
    /// Remember the originating path
    pub keep_path: bool,
}

impl LoadOptions {
    /// Only what the comparator needs
    pub fn alterations_only() -> Self {
        Self {
            selection: FieldSelection::none().include(VcfField::Alt),
            keep_header: false,
            keep_path: false,
        }
    }

    /// Reject selections that try to configure the always-loaded columns
    pub fn validate(&self) -> Result<(), VcfRepError> {
        for field in [VcfField::Chrom, VcfField::Pos] {
            if self.selection.inclusion(field) != Inclusion::Default {
                return Err(VcfRepError::ReservedField(field.name()));
            }
        }
        Ok(())
    }

    /// Selection actually used for each body line
    pub fn effective_selection(&self) -> FieldSelection {
        self.selection
            .clone()
            .include(VcfField::Chrom)
            .include(VcfField::Pos)
    }
}

/// All variant records of one replicate, grouped by position
#[derive(Debug, Clone, Default)]
pub struct ReplicateData {
    pub positions: HashMap<PositionKey, Vec<VariantRecord>>,
    pub header: Option<Vec<String>>,
    pub path: Option<PathBuf>,
}

impl ReplicateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (chromosome, position, alteration) triples
    pub fn from_alterations<'a, I>(alterations: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i64, &'a str)>,
    {
        let mut data = Self::new();
        for (chrom, pos, alt) in alterations {
            let record = VariantRecord {
                chrom: Some(chrom.to_string()),
                pos: Some(pos.to_string()),
                alt: Some(alt.to_string()),
                ..Default::default()
            };
            data.insert(PositionKey::new(chrom, pos), record);
        }
        data
    }

    pub fn insert(&mut self, key: PositionKey, record: VariantRecord) {
        self.positions.entry(key).or_default().push(record);
    }

    pub fn get(&self, key: &PositionKey) -> Option<&[VariantRecord]> {
        self.positions.get(key).map(|records| records.as_slice())
    }

    /// Number of distinct position keys
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total number of records, multi-allelic sites counted once per line
    pub fn record_count(&self) -> usize {
        self.positions.values().map(|records| records.len()).sum()
    }

    /// Position keys in chromosome then coordinate order
    pub fn sorted_keys(&self) -> Vec<&PositionKey> {
        let mut keys: Vec<_> = self.positions.keys().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_coordinate_different_chromosome() {
        let data = ReplicateData::from_alterations([("chr1", 10, "A"), ("chr2", 10, "A")]);
        assert_eq!(data.len(), 2);
        assert!(data.get(&PositionKey::new("chr1", 10)).is_some());
        assert!(data.get(&PositionKey::new("chr3", 10)).is_none());
    }

    #[test]
    fn test_multi_allelic_sites_share_a_key() {
        let data = ReplicateData::from_alterations([("chr1", 10, "A"), ("chr1", 10, "T")]);
        assert_eq!(data.len(), 1);
        assert_eq!(data.record_count(), 2);
        let records = data.get(&PositionKey::new("chr1", 10)).unwrap();
        assert_eq!(records[1].alt.as_deref(), Some("T"));
    }

    #[test]
    fn test_reserved_fields_rejected() {
        let mut options = LoadOptions::default();
        options.selection = FieldSelection::all().include(VcfField::Pos);
        assert!(matches!(options.validate(), Err(VcfRepError::ReservedField("pos"))));

        options.selection = FieldSelection::all().exclude(VcfField::Chrom);
        assert!(matches!(options.validate(), Err(VcfRepError::ReservedField("chrom"))));

        assert!(LoadOptions::alterations_only().validate().is_ok());
    }

    #[test]
    fn test_shifted_key_keeps_chromosome() {
        let key = PositionKey::new("chrX", 100);
        assert_eq!(key.shifted(-2), Some(PositionKey::new("chrX", 98)));
        assert_eq!(key.to_string(), "chrX:100");
    }

    #[test]
    fn test_shift_past_coordinate_range() {
        let last = PositionKey::new("chr1", i64::MAX);
        assert_eq!(last.shifted(1), None);
        assert_eq!(last.shifted(-1), Some(PositionKey::new("chr1", i64::MAX - 1)));
        assert_eq!(PositionKey::new("chr1", i64::MIN).shifted(-1), None);
    }
}
