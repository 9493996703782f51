//! Scoring and ranking of property records.
//!
//! Scores are computed once per record by a pluggable [`ScoreFn`]. The sort
//! is stable: records with equal scores keep their input order. Missing
//! scores (and NaN) always sort after numeric ones.

use std::cmp::Ordering;

use chemnorm_model::{PropertyRecord, RankedRecord};

/// Maps a property record to a rank key. `None` means "no score".
pub trait ScoreFn {
    fn score(&self, record: &PropertyRecord) -> Option<f64>;
}

impl<F> ScoreFn for F
where
    F: Fn(&PropertyRecord) -> Option<f64>,
{
    fn score(&self, record: &PropertyRecord) -> Option<f64> {
        self(record)
    }
}

/// Default score: the molecular weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct MolecularWeight;

impl ScoreFn for MolecularWeight {
    fn score(&self, record: &PropertyRecord) -> Option<f64> {
        record.molecular_weight
    }
}

/// Score by logP.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hydrophobicity;

impl ScoreFn for Hydrophobicity {
    fn score(&self, record: &PropertyRecord) -> Option<f64> {
        record.hydrophobicity
    }
}

/// Linear combination of the numeric properties.
///
/// A property with a zero weight is ignored; a missing property with a
/// non-zero weight makes the whole score missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSum {
    pub molecular_weight: f64,
    pub hydrophobicity: f64,
}

impl Default for WeightedSum {
    fn default() -> Self {
        Self {
            molecular_weight: 1.0,
            hydrophobicity: 0.0,
        }
    }
}

impl ScoreFn for WeightedSum {
    fn score(&self, record: &PropertyRecord) -> Option<f64> {
        let term = |weight: f64, value: Option<f64>| {
            if weight == 0.0 {
                Some(0.0)
            } else {
                value.map(|v| weight * v)
            }
        };
        Some(
            term(self.molecular_weight, record.molecular_weight)?
                + term(self.hydrophobicity, record.hydrophobicity)?,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Ranks records ascending by score.
pub fn rank<F: ScoreFn + ?Sized>(records: Vec<PropertyRecord>, score_fn: &F) -> Vec<RankedRecord> {
    rank_with(records, score_fn, SortOrder::Ascending)
}

/// Ranks records by score in the given order.
pub fn rank_with<F: ScoreFn + ?Sized>(
    records: Vec<PropertyRecord>,
    score_fn: &F,
    order: SortOrder,
) -> Vec<RankedRecord> {
    let mut scored: Vec<(Option<f64>, PropertyRecord)> = records
        .into_iter()
        .map(|record| (score_fn.score(&record).filter(|s| !s.is_nan()), record))
        .collect();

    scored.sort_by(|(a, _), (b, _)| compare_scores(*a, *b, order));

    scored
        .into_iter()
        .enumerate()
        .map(|(rank, (score, record))| RankedRecord {
            record,
            score,
            rank,
        })
        .collect()
}

fn compare_scores(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
