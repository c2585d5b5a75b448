// alignment.rs - Sequence similarity scoring

use crate::error::VcfRepError;
use std::collections::BTreeMap;

/// Symbol-pair scores used by `seq_percent_alignment`
///
/// Entries must be positive or null, otherwise the returned percentage is
/// no longer bounded by 0 and 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    scores: BTreeMap<char, BTreeMap<char, i64>>,
}

impl Default for SubstitutionMatrix {
    fn default() -> Self {
        Self::nucleotide()
    }
}

impl SubstitutionMatrix {
    /// Empty table, to be filled with `set`
    pub fn new() -> Self {
        Self {
            scores: BTreeMap::new(),
        }
    }

    /// Default DNA table: match 9, transition (A/G, C/T) 4, transversion 0
    ///
    /// ```text
    ///    A  C  G  T
    /// A  9  0  4  0
    /// C  0  9  0  4
    /// G  4  0  9  0
    /// T  0  4  0  9
    /// ```
    pub fn nucleotide() -> Self {
        let rows: [(char, [i64; 4]); 4] = [
            ('A', [9, 0, 4, 0]),
            ('C', [0, 9, 0, 4]),
            ('G', [4, 0, 9, 0]),
            ('T', [0, 4, 0, 9]),
        ];

        let mut matrix = Self::new();
        for (first, row) in rows {
            for (second, score) in ['A', 'C', 'G', 'T'].into_iter().zip(row) {
                matrix.set(first, second, score);
            }
        }
        matrix
    }

    pub fn set(&mut self, first: char, second: char, score: i64) {
        self.scores.entry(first).or_default().insert(second, score);
    }

    /// Score of a symbol pair; unknown symbols are a lookup error
    pub fn score(&self, first: char, second: char) -> Result<i64, VcfRepError> {
        let row = self
            .scores
            .get(&first)
            .ok_or(VcfRepError::UnknownSymbol { symbol: first })?;
        row.get(&second)
            .copied()
            .ok_or(VcfRepError::UnknownSymbol { symbol: second })
    }

    /// Per-symbol best score: `A` against itself, or the largest self score
    /// when the table has no `A`
    pub fn self_match_score(&self) -> i64 {
        if let Ok(score) = self.score('A', 'A') {
            return score;
        }
        self.scores
            .iter()
            .filter_map(|(symbol, row)| row.get(symbol).copied())
            .max()
            .unwrap_or(0)
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.scores.keys().copied()
    }

    fn has_negative_entries(&self) -> bool {
        self.scores
            .values()
            .flat_map(|row| row.values())
            .any(|score| *score < 0)
    }
}

/// Configuration for `seq_percent_alignment`
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentConfig {
    /// Score added for every gap; positive or null
    pub gap: i64,
    pub substitution: SubstitutionMatrix,
    /// Denominator of the percentage; defaults to self-match score × longest length
    pub max_score: Option<f64>,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            gap: 3,
            substitution: SubstitutionMatrix::nucleotide(),
            max_score: None,
        }
    }
}

impl AlignmentConfig {
    /// Create custom configuration, rejected when a score is negative
    pub fn custom(
        gap: i64,
        substitution: SubstitutionMatrix,
        max_score: Option<f64>,
    ) -> Result<Self, VcfRepError> {
        let config = Self {
            gap,
            substitution,
            max_score,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VcfRepError> {
        if self.gap < 0 {
            return Err(VcfRepError::InvalidAlignmentConfig(format!(
                "gap score must be positive or null, got {}",
                self.gap
            )));
        }
        if self.substitution.has_negative_entries() {
            return Err(VcfRepError::InvalidAlignmentConfig(
                "substitution scores must be positive or null".to_string(),
            ));
        }
        if let Some(max) = self.max_score {
            if !max.is_finite() || max < 0.0 {
                return Err(VcfRepError::InvalidAlignmentConfig(format!(
                    "max score must be a positive number, got {}",
                    max
                )));
            }
        }
        Ok(())
    }

    fn effective_max_score(&self, len_a: usize, len_b: usize) -> f64 {
        match self.max_score {
            Some(max) if max != 0.0 => max,
            _ => (self.substitution.self_match_score() * len_a.max(len_b) as i64) as f64,
        }
    }
}

/// Percentage of similarity between two sequences, in [0, 100]
///
/// Fills a (|a|+1) × (|b|+1) grid whose borders are `index × gap` and whose
/// cells take the best of diagonal + substitution, left + gap and up + gap.
/// The bottom-right cell is divided by the maximum score. There is no zero
/// floor: this is a global recurrence, not a local Smith-Waterman alignment.
///
/// When the maximum score is 0 (both sequences empty) the result is 100.
pub fn seq_percent_alignment(
    seq_a: &str,
    seq_b: &str,
    config: &AlignmentConfig,
) -> Result<f64, VcfRepError> {
    config.validate()?;

    let a: Vec<char> = seq_a.chars().collect();
    let b: Vec<char> = seq_b.chars().collect();
    let gap = config.gap;

    // Two rolling rows of the grid
    let mut previous: Vec<i64> = (0..=b.len() as i64).map(|j| j * gap).collect();
    let mut current = vec![0i64; b.len() + 1];

    for (i, &symbol_a) in a.iter().enumerate() {
        current[0] = (i as i64 + 1) * gap;
        for (j, &symbol_b) in b.iter().enumerate() {
            let substitution = previous[j] + config.substitution.score(symbol_a, symbol_b)?;
            let insertion = current[j] + gap;
            let deletion = previous[j + 1] + gap;
            current[j + 1] = substitution.max(insertion).max(deletion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let final_score = previous[b.len()] as f64;
    let max_score = config.effective_max_score(a.len(), b.len());
    if max_score == 0.0 {
        return Ok(100.0);
    }
    Ok(final_score / max_score * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percent(a: &str, b: &str) -> f64 {
        seq_percent_alignment(a, b, &AlignmentConfig::default()).unwrap()
    }

    #[test]
    fn test_identical_sequences() {
        for seq in ["A", "ACGT", "GGGGCCCCAAAATTTT", "TACGATCAGT"] {
            assert!((percent(seq, seq) - 100.0).abs() < 1e-9, "{}", seq);
        }
    }

    #[test]
    fn test_empty_sequences() {
        assert_eq!(percent("", ""), 100.0);
    }

    #[test]
    fn test_one_empty_sequence() {
        // 4 gaps of 3 against a maximum of 4 × 9
        let value = percent("ACGT", "");
        assert!((value - 12.0 / 36.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_transition_mismatch() {
        // ACG aligned (27), then T and A both gapped (3 + 3) beats the 0 substitution
        let value = percent("ACGT", "ACGA");
        assert!((value - 33.0 / 36.0 * 100.0).abs() < 1e-9);
        assert!(value >= 70.0);
    }

    #[test]
    fn test_no_zero_floor() {
        // Gaps contribute positively, so unrelated bases are not scored 0
        let value = percent("A", "C");
        assert!((value - 6.0 / 9.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_symbol() {
        let result = seq_percent_alignment("ACNT", "ACGT", &AlignmentConfig::default());
        assert!(matches!(result, Err(VcfRepError::UnknownSymbol { symbol: 'N' })));

        let result = seq_percent_alignment("ACGT", "A,C", &AlignmentConfig::default());
        assert!(matches!(result, Err(VcfRepError::UnknownSymbol { symbol: ',' })));
    }

    #[test]
    fn test_custom_max_score() {
        let config = AlignmentConfig::custom(0, SubstitutionMatrix::nucleotide(), Some(18.0)).unwrap();
        let value = seq_percent_alignment("A", "A", &config).unwrap();
        assert!((value - 50.0).abs() < 1e-9);

        // A max score of 0 falls back to the computed default
        let config = AlignmentConfig::custom(3, SubstitutionMatrix::nucleotide(), Some(0.0)).unwrap();
        assert!((seq_percent_alignment("AC", "AC", &config).unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_matrix_without_adenine() {
        let mut matrix = SubstitutionMatrix::new();
        matrix.set('X', 'X', 5);
        matrix.set('X', 'Y', 1);
        matrix.set('Y', 'X', 1);
        matrix.set('Y', 'Y', 5);
        assert_eq!(matrix.self_match_score(), 5);

        let config = AlignmentConfig::custom(0, matrix, None).unwrap();
        let value = seq_percent_alignment("XY", "XY", &config).unwrap();
        assert!((value - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_validation() {
        assert!(AlignmentConfig::default().validate().is_ok());

        assert!(matches!(
            AlignmentConfig::custom(-1, SubstitutionMatrix::nucleotide(), None),
            Err(VcfRepError::InvalidAlignmentConfig(_))
        ));

        let mut matrix = SubstitutionMatrix::nucleotide();
        matrix.set('A', 'C', -2);
        assert!(AlignmentConfig::custom(3, matrix, None).is_err());
    }

    #[test]
    fn test_invalid_config_is_not_scored() {
        // Fields are public, so a config may bypass `custom`
        let config = AlignmentConfig {
            gap: -1,
            ..AlignmentConfig::default()
        };
        let result = seq_percent_alignment("A", "", &config);
        assert!(matches!(result, Err(VcfRepError::InvalidAlignmentConfig(_))));
    }
}
