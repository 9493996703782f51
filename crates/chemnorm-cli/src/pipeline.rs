//! Batch execution shared by the subcommands.
//!
//! A batch runs in three steps. It resolves the names with a
//! [`NameResolver`], ranks the deduplicated records, and then writes the
//! CSV outputs when an output directory is requested.

use std::path::{Path, PathBuf};

use chemnorm_ingest::{
    IngestError, write_mapping_csv_to_path, write_properties_csv_to_path,
    write_ranked_csv_to_path, write_scores_csv_to_path,
};
use chemnorm_map::{
    AggregateError, AggregateOptions, Aggregator, BatchOutcome, Hydrophobicity, MolecularWeight,
    NameResolver, ScoreFn, SortOrder, WeightedSum, rank_with,
};
use chemnorm_model::{PropertyRecord, RankedRecord};
use tracing::{info, warn};

/// Names used when a batch is started without input.
pub const SAMPLE_BATCH: &[&str] = &[
    "Adenosine",
    "Adenocard",
    "BG8967",
    "Bivalirudin",
    "BAYT006267",
    "diflucan",
    "ibrutinib",
    "PC-32765",
];

pub const MAPPING_FILE: &str = "mapping.csv";
pub const PROPERTIES_FILE: &str = "properties.csv";
pub const RANKED_FILE: &str = "ranked.csv";
pub const SCORES_FILE: &str = "scores.csv";

pub fn sample_batch() -> Vec<String> {
    SAMPLE_BATCH.iter().map(|name| (*name).to_string()).collect()
}

/// Drops names that are empty or whitespace only.
///
/// Such names have no canonical form that a property table can carry.
/// Other names are kept verbatim.
pub fn drop_blank_names(names: Vec<String>) -> Vec<String> {
    let before = names.len();
    let kept: Vec<String> = names
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .collect();
    if kept.len() < before {
        warn!(dropped = before - kept.len(), "ignoring blank input names");
    }
    kept
}

/// Score function selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ScoreKind {
    #[default]
    MolecularWeight,
    Hydrophobicity,
    Weighted(WeightedSum),
}

impl ScoreFn for ScoreKind {
    fn score(&self, record: &PropertyRecord) -> Option<f64> {
        match self {
            Self::MolecularWeight => MolecularWeight.score(record),
            Self::Hydrophobicity => Hydrophobicity.score(record),
            Self::Weighted(weights) => weights.score(record),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankOptions {
    pub score: ScoreKind,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcome: BatchOutcome,
    pub ranked: Vec<RankedRecord>,
}

/// Files written for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPaths {
    pub mapping: Option<PathBuf>,
    pub properties: Option<PathBuf>,
    pub ranked: Option<PathBuf>,
    pub scores: Option<PathBuf>,
}

impl OutputPaths {
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.mapping, &self.properties, &self.ranked, &self.scores]
            .into_iter()
            .flatten()
    }
}

/// Resolves `names` and ranks the resulting records.
pub fn run_batch<R: NameResolver>(
    resolver: R,
    names: &[String],
    options: AggregateOptions,
    ranking: RankOptions,
) -> Result<BatchReport, AggregateError> {
    let aggregator = Aggregator::new(resolver).with_options(options);
    let outcome = aggregator.process(names)?;
    let ranked = rank_records(outcome.records.clone(), ranking);
    Ok(BatchReport { outcome, ranked })
}

pub fn rank_records(records: Vec<PropertyRecord>, ranking: RankOptions) -> Vec<RankedRecord> {
    let ranked = rank_with(records, &ranking.score, ranking.order);
    let scored = ranked.iter().filter(|entry| entry.score.is_some()).count();
    info!(
        records = ranked.len(),
        scored,
        order = ?ranking.order,
        "records ranked"
    );
    ranked
}

/// Writes all four tables of a batch into `dir`.
pub fn write_batch_outputs(dir: &Path, report: &BatchReport) -> Result<OutputPaths, IngestError> {
    let mapping = dir.join(MAPPING_FILE);
    write_mapping_csv_to_path(&mapping, &report.outcome.mapping)?;
    let properties = dir.join(PROPERTIES_FILE);
    write_properties_csv_to_path(&properties, &report.outcome.records)?;
    let ranked = write_ranked_outputs(dir, &report.ranked)?;
    Ok(OutputPaths {
        mapping: Some(mapping),
        properties: Some(properties),
        ..ranked
    })
}

/// Writes the ranked and score tables into `dir`.
pub fn write_ranked_outputs(
    dir: &Path,
    ranked: &[RankedRecord],
) -> Result<OutputPaths, IngestError> {
    let ranked_path = dir.join(RANKED_FILE);
    write_ranked_csv_to_path(&ranked_path, ranked)?;
    let scores_path = dir.join(SCORES_FILE);
    write_scores_csv_to_path(&scores_path, ranked)?;
    Ok(OutputPaths {
        ranked: Some(ranked_path),
        scores: Some(scores_path),
        ..OutputPaths::default()
    })
}
