//! Integration tests for batch execution and output files.

use std::fs;

use chemnorm_cli::pipeline::{
    OutputPaths, RankOptions, SAMPLE_BATCH, ScoreKind, drop_blank_names, rank_records, run_batch,
    sample_batch, write_batch_outputs, write_ranked_outputs,
};
use chemnorm_ingest::parse_variant_table;
use chemnorm_map::{AggregateOptions, PropertyCatalog, SortOrder, VariantResolver, WeightedSum};
use chemnorm_model::{CanonicalForm, PropertyRecord};
use tempfile::TempDir;

const VARIANTS: &str = r#"{
    "ADENOSINE": ["Adenosine", "Adenocard", "BG8967"],
    "BIVALIRUDIN": ["Bivalirudin", "BAYT006267"],
    "FLUCONAZOLE": ["diflucan"],
    "IBRUTINIB": ["ibrutinib", "PC-32765"]
}"#;

fn form(value: &str) -> CanonicalForm {
    CanonicalForm::new(value).unwrap()
}

fn resolver() -> VariantResolver {
    let catalog: PropertyCatalog = [
        PropertyRecord::missing(form("ADENOSINE"))
            .with_molecular_weight(267.24)
            .with_hydrophobicity(-1.1),
        PropertyRecord::missing(form("BIVALIRUDIN")).with_molecular_weight(2180.3),
        PropertyRecord::missing(form("IBRUTINIB"))
            .with_molecular_weight(440.5)
            .with_hydrophobicity(3.6),
    ]
    .into_iter()
    .collect();
    VariantResolver::new(parse_variant_table(VARIANTS).unwrap()).with_catalog(catalog)
}

fn ranked_forms(report: &[chemnorm_model::RankedRecord]) -> Vec<&str> {
    report
        .iter()
        .map(|entry| entry.canonical_form().as_str())
        .collect()
}

#[test]
fn sample_batch_collapses_to_four_compounds() {
    let names = sample_batch();
    assert_eq!(names.len(), SAMPLE_BATCH.len());

    let report = run_batch(
        resolver(),
        &names,
        AggregateOptions::default(),
        RankOptions::default(),
    )
    .unwrap();

    assert_eq!(report.outcome.mapping.len(), 8);
    assert!(!report.outcome.has_diagnostics());
    let forms: Vec<&str> = report
        .outcome
        .records
        .iter()
        .map(|record| record.canonical_form.as_str())
        .collect();
    assert_eq!(forms, vec!["ADENOSINE", "BIVALIRUDIN", "FLUCONAZOLE", "IBRUTINIB"]);
    // FLUCONAZOLE has no catalog entry, so its score is missing and it ranks last.
    assert_eq!(
        ranked_forms(&report.ranked),
        vec!["ADENOSINE", "IBRUTINIB", "BIVALIRUDIN", "FLUCONAZOLE"]
    );
    assert_eq!(report.ranked[3].score, None);
}

#[test]
fn unknown_names_pass_through() {
    let names = vec!["unknownX".to_string(), "Adenocard".to_string()];
    let report = run_batch(
        resolver(),
        &names,
        AggregateOptions::default(),
        RankOptions::default(),
    )
    .unwrap();
    assert_eq!(
        report.outcome.mapping.pairs(),
        vec![("unknownX", "unknownX"), ("Adenocard", "ADENOSINE")]
    );
}

#[test]
fn descending_hydrophobicity_keeps_missing_last() {
    let records = vec![
        PropertyRecord::missing(form("A")).with_hydrophobicity(-1.1),
        PropertyRecord::missing(form("B")),
        PropertyRecord::missing(form("C")).with_hydrophobicity(3.6),
    ];
    let ranked = rank_records(
        records,
        RankOptions {
            score: ScoreKind::Hydrophobicity,
            order: SortOrder::Descending,
        },
    );
    assert_eq!(ranked_forms(&ranked), vec!["C", "A", "B"]);
    let ranks: Vec<usize> = ranked.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![0, 1, 2]);
}

#[test]
fn weighted_score_combines_properties() {
    let records = vec![
        PropertyRecord::missing(form("A"))
            .with_molecular_weight(100.0)
            .with_hydrophobicity(2.0),
        PropertyRecord::missing(form("B"))
            .with_molecular_weight(50.0)
            .with_hydrophobicity(1.0),
    ];
    let score = ScoreKind::Weighted(WeightedSum {
        molecular_weight: 0.0,
        hydrophobicity: -1.0,
    });
    let ranked = rank_records(
        records,
        RankOptions {
            score,
            order: SortOrder::Ascending,
        },
    );
    assert_eq!(ranked_forms(&ranked), vec!["A", "B"]);
    assert_eq!(ranked[0].score, Some(-2.0));
}

#[test]
fn writes_all_batch_tables() {
    let dir = TempDir::new().unwrap();
    let names = vec!["BG8967".to_string(), "diflucan".to_string()];
    let report = run_batch(
        resolver(),
        &names,
        AggregateOptions::default(),
        RankOptions::default(),
    )
    .unwrap();

    let out = dir.path().join("out");
    let paths = write_batch_outputs(&out, &report).unwrap();
    assert_eq!(paths.iter().count(), 4);

    let mapping = fs::read_to_string(out.join("mapping.csv")).unwrap();
    insta::assert_snapshot!(mapping, @r"
    org_form,normed_form
    BG8967,ADENOSINE
    diflucan,FLUCONAZOLE
    ");

    let ranked = fs::read_to_string(out.join("ranked.csv")).unwrap();
    insta::assert_snapshot!(ranked, @r"
    rank,normed_form,molecular_weight,isomeric_smiles,xlogp,score
    0,ADENOSINE,267.24,,-1.1,267.24
    1,FLUCONAZOLE,,,,
    ");
}

#[test]
fn ranking_outputs_skip_mapping_tables() {
    let dir = TempDir::new().unwrap();
    let ranked = rank_records(
        vec![PropertyRecord::missing(form("A")).with_molecular_weight(1.5)],
        RankOptions::default(),
    );
    let paths = write_ranked_outputs(dir.path(), &ranked).unwrap();
    assert_eq!(
        paths,
        OutputPaths {
            ranked: Some(dir.path().join("ranked.csv")),
            scores: Some(dir.path().join("scores.csv")),
            ..OutputPaths::default()
        }
    );
    let scores = fs::read_to_string(dir.path().join("scores.csv")).unwrap();
    assert_eq!(scores, "normed_form,score\nA,1.5\n");
}

#[test]
fn blank_names_are_dropped_and_others_kept_verbatim() {
    let names = vec![
        " diflucan".to_string(),
        String::new(),
        "   ".to_string(),
        "Adenocard".to_string(),
    ];
    assert_eq!(drop_blank_names(names), vec![" diflucan", "Adenocard"]);
}
