// matcher.rs - Alteration matching between two candidate positions

use crate::core::alignment::{seq_percent_alignment, AlignmentConfig};
use crate::data::VariantRecord;
use crate::error::VcfRepError;
use serde::Serialize;

/// Symbolic alterations: they only ever match the exact same symbol
pub const SYMBOLIC_ALTERATIONS: [&str; 4] = ["<DEL>", "<INS>", "<DUP>", "H"];

pub fn is_symbolic(alteration: &str) -> bool {
    SYMBOLIC_ALTERATIONS.contains(&alteration)
}

/// One matching pair of alterations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AlterationMatch {
    /// Identical values (symbolic, or exact sequence equality)
    Shared(String),
    /// Sequences similar enough under the threshold; (first side, second side)
    Similar(String, String),
}

impl AlterationMatch {
    /// Value credited to the first and to the second position
    pub fn sides(&self) -> (&str, &str) {
        match self {
            AlterationMatch::Shared(alt) => (alt, alt),
            AlterationMatch::Similar(first, second) => (first, second),
        }
    }
}

/// How two alteration values are judged
#[derive(Debug, Clone)]
pub struct AlterationMatcher {
    /// Minimum similarity in [0, 100]; `None` requires identical sequences
    pub sequence_threshold: Option<f64>,
    pub alignment: AlignmentConfig,
}

impl AlterationMatcher {
    pub fn new(sequence_threshold: Option<f64>) -> Self {
        Self {
            sequence_threshold,
            alignment: AlignmentConfig::default(),
        }
    }

    /// Judge a single pair of alteration values
    pub fn match_pair(&self, first: &str, second: &str) -> Result<Option<AlterationMatch>, VcfRepError> {
        if is_symbolic(first) || is_symbolic(second) {
            return Ok((first == second).then(|| AlterationMatch::Shared(first.to_string())));
        }

        match self.sequence_threshold {
            None => Ok((first == second).then(|| AlterationMatch::Shared(first.to_string()))),
            Some(threshold) => {
                let percentage = seq_percent_alignment(first, second, &self.alignment)?;
                Ok((percentage >= threshold)
                    .then(|| AlterationMatch::Similar(first.to_string(), second.to_string())))
            }
        }
    }

    /// Every matching pair across both record lists (full cross product)
    pub fn compare_positions(
        &self,
        first: &[VariantRecord],
        second: &[VariantRecord],
    ) -> Result<Vec<AlterationMatch>, VcfRepError> {
        let mut matches = Vec::new();
        for main_record in first {
            for second_record in second {
                if let Some(found) =
                    self.match_pair(main_record.alt_or_empty(), second_record.alt_or_empty())?
                {
                    matches.push(found);
                }
            }
        }
        Ok(matches)
    }
}

/// Matching alterations between two positions with the default alignment table
pub fn compare_position_alterations(
    first: &[VariantRecord],
    second: &[VariantRecord],
    sequence_threshold: Option<f64>,
) -> Result<Vec<AlterationMatch>, VcfRepError> {
    AlterationMatcher::new(sequence_threshold).compare_positions(first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(alts: &[&str]) -> Vec<VariantRecord> {
        alts.iter()
            .map(|alt| VariantRecord {
                alt: Some(alt.to_string()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_symbolic_never_matches_sequence() {
        for threshold in [None, Some(0.0), Some(50.0), Some(100.0)] {
            let result =
                compare_position_alterations(&records(&["<DEL>"]), &records(&["ACGT"]), threshold)
                    .unwrap();
            assert!(result.is_empty(), "threshold {:?}", threshold);
        }
    }

    #[test]
    fn test_symbolic_matches_same_symbol() {
        let result =
            compare_position_alterations(&records(&["<DUP>"]), &records(&["<DUP>"]), Some(90.0))
                .unwrap();
        assert_eq!(result, vec![AlterationMatch::Shared("<DUP>".to_string())]);

        let result =
            compare_position_alterations(&records(&["<DUP>"]), &records(&["<INS>"]), None).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_heterozygous_marker_is_symbolic() {
        let result = compare_position_alterations(&records(&["H"]), &records(&["H"]), None).unwrap();
        assert_eq!(result.len(), 1);
        let result =
            compare_position_alterations(&records(&["H"]), &records(&["A"]), Some(0.0)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_exact_match_without_threshold() {
        let result =
            compare_position_alterations(&records(&["ACGT"]), &records(&["ACGA"]), None).unwrap();
        assert!(result.is_empty());

        let result =
            compare_position_alterations(&records(&["ACGT"]), &records(&["ACGT"]), None).unwrap();
        assert_eq!(result, vec![AlterationMatch::Shared("ACGT".to_string())]);
    }

    #[test]
    fn test_similarity_keeps_both_values() {
        let result =
            compare_position_alterations(&records(&["ACGT"]), &records(&["ACGA"]), Some(70.0))
                .unwrap();
        assert_eq!(
            result,
            vec![AlterationMatch::Similar("ACGT".to_string(), "ACGA".to_string())]
        );
        assert_eq!(result[0].sides(), ("ACGT", "ACGA"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // Identical sequences score exactly 100
        let result =
            compare_position_alterations(&records(&["ACGT"]), &records(&["ACGT"]), Some(100.0))
                .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_full_cross_product() {
        let result = compare_position_alterations(
            &records(&["A", "T"]),
            &records(&["A", "A", "T"]),
            None,
        )
        .unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_lookup_error_propagates() {
        let result =
            compare_position_alterations(&records(&["ACGN"]), &records(&["ACGT"]), Some(50.0));
        assert!(matches!(result, Err(VcfRepError::UnknownSymbol { symbol: 'N' })));
    }
}
