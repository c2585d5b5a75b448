// comparator.rs - All-pairs replicate comparison engine

use crate::core::matcher::AlterationMatcher;
use crate::data::{PositionKey, ReplicateData};
use crate::error::VcfRepError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Reserved name of the aggregate entry; no replicate may use it
pub const MEANS_KEY: &str = "__MEANS__";

/// Settings for `compare_replicates`
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    /// Positions within `offset` coordinates of each other are compared; negatives clamp to 0
    pub offset: i64,
    /// Minimum sequence similarity in [0, 100]; `None` requires identical sequences
    pub sequence_threshold: Option<f64>,
    /// When false, position pairs that could not be compared are collected in the report
    pub quiet: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            sequence_threshold: None,
            quiet: true,
        }
    }
}

impl CompareConfig {
    pub fn validate(&self) -> Result<(), VcfRepError> {
        if let Some(threshold) = self.sequence_threshold {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(VcfRepError::InvalidThreshold(threshold));
            }
        }
        Ok(())
    }

    pub fn effective_offset(&self) -> i64 {
        self.offset.max(0)
    }
}

/// Score of one replicate against another, from the first replicate's point of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairwiseScore {
    pub global_percent: f64,
    pub global_matches: usize,
    pub global_max: usize,
    /// Share of this replicate's positions found in the other one
    pub inclusion_percent: f64,
    pub inclusion_matches: usize,
    pub inclusion_max: usize,
}

/// Running means of one replicate over all of its pairings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReplicateMeans {
    pub global: f64,
    pub inclusion: f64,
}

/// Pairwise scores plus the `__MEANS__` aggregate
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreSummary {
    /// replicate -> other replicate -> score
    pub pairwise: BTreeMap<String, BTreeMap<String, PairwiseScore>>,
    pub means: BTreeMap<String, ReplicateMeans>,
    /// Mean of every pairwise global percentage
    pub grand_mean: f64,
}

impl ScoreSummary {
    pub fn get(&self, replicate: &str, other: &str) -> Option<&PairwiseScore> {
        self.pairwise.get(replicate).and_then(|row| row.get(other))
    }

    /// Pairings of one replicate, best global score first
    pub fn sorted_row(&self, replicate: &str) -> Vec<(&str, &PairwiseScore)> {
        let mut row: Vec<_> = self
            .pairwise
            .get(replicate)
            .map(|row| row.iter().map(|(name, score)| (name.as_str(), score)).collect())
            .unwrap_or_default();
        row.sort_by(|a, b| b.1.global_percent.total_cmp(&a.1.global_percent));
        row
    }
}

/// How one position agreed with the other replicates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionAgreement {
    /// Replicates holding a matching position
    pub agreeing: BTreeSet<String>,
    pub replicate_count: usize,
    /// Alteration value -> accumulated weight, 0.5 per side and per match
    pub alterations: BTreeMap<String, f64>,
}

impl PositionAgreement {
    fn new(replicate_count: usize) -> Self {
        Self {
            agreeing: BTreeSet::new(),
            replicate_count,
            alterations: BTreeMap::new(),
        }
    }

    /// Agreeing replicates over total replicates, as a percentage
    pub fn agreement_ratio(&self) -> f64 {
        if self.replicate_count == 0 {
            return 0.0;
        }
        self.agreeing.len() as f64 / self.replicate_count as f64 * 100.0
    }

    fn credit(&mut self, other_replicate: &str, alteration: &str) {
        self.agreeing.insert(other_replicate.to_string());
        *self.alterations.entry(alteration.to_string()).or_insert(0.0) += 0.5;
    }
}

pub type PositionSummary = BTreeMap<PositionKey, PositionAgreement>;

/// A position pair that could not be compared; the run continues without it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonError {
    pub main_replicate: String,
    pub main_position: PositionKey,
    pub second_replicate: String,
    pub second_position: PositionKey,
    pub message: String,
}

impl fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Can not compare position {} (from {}) with position {} (from {}): {}",
            self.main_position,
            self.main_replicate,
            self.second_position,
            self.second_replicate,
            self.message
        )
    }
}

/// Emitted once per compared replicate pair
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent<'a> {
    pub completed: usize,
    pub total: usize,
    pub first: &'a str,
    pub second: &'a str,
}

/// Receives progress of `compare_replicates`
pub trait ProgressObserver {
    fn on_pair_compared(&mut self, event: &ProgressEvent<'_>);
}

/// No progress reporting
impl ProgressObserver for () {
    fn on_pair_compared(&mut self, _event: &ProgressEvent<'_>) {}
}

/// Everything produced by one comparison run
#[derive(Debug, Clone, Default)]
pub struct ComparisonReport {
    pub scores: ScoreSummary,
    pub positions: PositionSummary,
    /// Only filled when `CompareConfig::quiet` is false
    pub errors: Vec<ComparisonError>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent_or_full(matches: usize, max: usize) -> f64 {
    if max == 0 {
        100.0
    } else {
        round2(matches as f64 / max as f64 * 100.0)
    }
}

fn validate_replicates(replicates: &[(String, ReplicateData)]) -> Result<(), VcfRepError> {
    if replicates.len() < 2 {
        return Err(VcfRepError::NotEnoughReplicates(replicates.len()));
    }
    let mut seen = HashSet::new();
    for (name, _) in replicates {
        if name == MEANS_KEY {
            return Err(VcfRepError::ReservedReplicateName(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(VcfRepError::DuplicateReplicateName(name.clone()));
        }
    }
    Ok(())
}

/// Compare every replicate with every other one
///
/// For each unordered pair, every position of the first replicate is probed
/// against the positions of the second replicate lying within
/// `[-offset, +offset]`. A probe with at least one matching alteration marks
/// both positions as matched (once, however many probes hit them) and credits
/// the position summary. Pairs are visited in input order.
pub fn compare_replicates(
    replicates: &[(String, ReplicateData)],
    config: &CompareConfig,
    observer: &mut dyn ProgressObserver,
) -> Result<ComparisonReport, VcfRepError> {
    validate_replicates(replicates)?;
    config.validate()?;

    let offset = config.effective_offset();
    let number_of_replicates = replicates.len();
    let comparisons_per_replicate = (number_of_replicates - 1) as f64;
    let total_pairs = number_of_replicates * (number_of_replicates - 1) / 2;
    let matcher = AlterationMatcher::new(config.sequence_threshold);

    let mut report = ComparisonReport::default();
    let mut completed = 0;

    for (i, (main_name, main_data)) in replicates.iter().enumerate() {
        for (second_name, second_data) in &replicates[i + 1..] {
            // Sets, so a position hit through several offsets counts once
            let mut main_match: HashSet<&PositionKey> = HashSet::new();
            let mut second_match: HashSet<&PositionKey> = HashSet::new();

            for initial_pos in main_data.sorted_keys() {
                let main_records = &main_data.positions[initial_pos];

                for delta in -offset..=offset {
                    // Coordinates past the i64 range can not hold a position
                    let Some((current_pos, second_records)) = initial_pos
                        .shifted(delta)
                        .and_then(|probe| second_data.positions.get_key_value(&probe))
                    else {
                        continue;
                    };

                    let results = match matcher.compare_positions(main_records, second_records) {
                        Ok(results) => results,
                        Err(e) => {
                            if !config.quiet {
                                report.errors.push(ComparisonError {
                                    main_replicate: main_name.clone(),
                                    main_position: initial_pos.clone(),
                                    second_replicate: second_name.clone(),
                                    second_position: current_pos.clone(),
                                    message: e.to_string(),
                                });
                            }
                            continue;
                        }
                    };

                    if results.is_empty() {
                        continue;
                    }

                    main_match.insert(initial_pos);
                    second_match.insert(current_pos);

                    let initial_entry = report
                        .positions
                        .entry(initial_pos.clone())
                        .or_insert_with(|| PositionAgreement::new(number_of_replicates));
                    for found in &results {
                        initial_entry.credit(second_name, found.sides().0);
                    }

                    let current_entry = report
                        .positions
                        .entry(current_pos.clone())
                        .or_insert_with(|| PositionAgreement::new(number_of_replicates));
                    for found in &results {
                        current_entry.credit(main_name, found.sides().1);
                    }
                }
            }

            let global_matches = main_match.len() + second_match.len();
            let global_max = main_data.len() + second_data.len();
            let global_percent = percent_or_full(global_matches, global_max);

            let main_score = PairwiseScore {
                global_percent,
                global_matches,
                global_max,
                inclusion_percent: percent_or_full(main_match.len(), main_data.len()),
                inclusion_matches: main_match.len(),
                inclusion_max: main_data.len(),
            };
            let second_score = PairwiseScore {
                inclusion_percent: percent_or_full(second_match.len(), second_data.len()),
                inclusion_matches: second_match.len(),
                inclusion_max: second_data.len(),
                ..main_score
            };

            let scores = &mut report.scores;
            scores
                .pairwise
                .entry(main_name.clone())
                .or_default()
                .insert(second_name.clone(), main_score);
            scores
                .pairwise
                .entry(second_name.clone())
                .or_default()
                .insert(main_name.clone(), second_score);

            // A replicate's mean inclusion averages how much of each partner it covers
            for (name, partner) in [(main_name, &second_score), (second_name, &main_score)] {
                let means = scores.means.entry(name.clone()).or_default();
                means.global += global_percent / comparisons_per_replicate;
                means.inclusion += partner.inclusion_percent / comparisons_per_replicate;
            }
            scores.grand_mean += global_percent / total_pairs as f64;

            completed += 1;
            observer.on_pair_compared(&ProgressEvent {
                completed,
                total: total_pairs,
                first: main_name,
                second: second_name,
            });
        }
    }

    Ok(report)
}
