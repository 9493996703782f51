use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chemnorm_cli::pipeline::{
    BatchReport, OutputPaths, RankOptions, ScoreKind, drop_blank_names, rank_records, run_batch,
    sample_batch, write_batch_outputs, write_ranked_outputs,
};
use chemnorm_ingest::{load_variant_table, read_input_names, read_property_table};
use chemnorm_map::{AggregateOptions, RemoteResolver, SortOrder, VariantResolver, WeightedSum};
use chemnorm_pubchem::{PubChemClient, PubChemConfig};
use tracing::{info, info_span, warn};

use crate::cli::{InputArgs, NormalizeArgs, RankArgs, RankingArgs, ResolveArgs, ScoreArg};
use crate::types::CommandResult;

pub fn run_normalize(args: &NormalizeArgs) -> Result<CommandResult> {
    let span = info_span!("normalize", variants = %args.variants.display());
    let _guard = span.enter();

    let table = load_variant_table(&args.variants).context("load variant table")?;
    let mut resolver = VariantResolver::new(table);
    if let Some(path) = &args.properties {
        let records = read_property_table(path).context("load property table")?;
        resolver = resolver.with_catalog(records.into_iter().collect());
    }

    let names = input_names(&args.input)?;
    let report = run_batch(
        resolver,
        &names,
        AggregateOptions::default(),
        ranking_options(&args.ranking),
    )
    .context("normalize batch")?;
    let outputs = write_outputs(args.output_dir.as_deref(), &report)?;

    Ok(CommandResult {
        title: format!("Variant table: {}", args.variants.display()),
        report,
        show_mapping: true,
        outputs,
        strict: false,
    })
}

pub fn run_resolve(args: &ResolveArgs) -> Result<CommandResult> {
    let span = info_span!("resolve", strict = args.strict);
    let _guard = span.enter();

    let mut config = PubChemConfig::from_env();
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let title = format!("PubChem: {}", config.base_url);
    let client = PubChemClient::new(config).context("create PubChem client")?;

    let names = input_names(&args.input)?;
    let options = if args.strict {
        AggregateOptions::strict()
    } else {
        AggregateOptions::default()
    };
    let report = run_batch(
        RemoteResolver::new(client),
        &names,
        options,
        ranking_options(&args.ranking),
    )
    .context("resolve batch")?;
    let outputs = write_outputs(args.output_dir.as_deref(), &report)?;

    Ok(CommandResult {
        title,
        report,
        show_mapping: true,
        outputs,
        strict: args.strict,
    })
}

pub fn run_rank(args: &RankArgs) -> Result<CommandResult> {
    let span = info_span!("rank", properties = %args.properties.display());
    let _guard = span.enter();

    let records = read_property_table(&args.properties).context("load property table")?;
    let ranked = rank_records(records, ranking_options(&args.ranking));
    let outputs = match args.output_dir.as_deref() {
        Some(dir) => write_ranked_outputs(dir, &ranked).context("write ranking tables")?,
        None => OutputPaths::default(),
    };

    Ok(CommandResult {
        title: format!("Property table: {}", args.properties.display()),
        report: BatchReport {
            ranked,
            ..BatchReport::default()
        },
        show_mapping: false,
        outputs,
        strict: false,
    })
}

fn input_names(args: &InputArgs) -> Result<Vec<String>> {
    if let Some(path) = &args.input {
        let names = read_input_names(path).context("read input names")?;
        if names.is_empty() {
            bail!("no names found in {}", path.display());
        }
        return Ok(names);
    }
    if args.names.is_empty() {
        let names = sample_batch();
        info!(count = names.len(), "no names given, using the sample batch");
        return Ok(names);
    }
    let names = drop_blank_names(args.names.clone());
    if names.is_empty() {
        bail!("all input names are blank");
    }
    Ok(names)
}

fn ranking_options(args: &RankingArgs) -> RankOptions {
    let score = match args.score {
        ScoreArg::MolecularWeight => ScoreKind::MolecularWeight,
        ScoreArg::Hydrophobicity => ScoreKind::Hydrophobicity,
        ScoreArg::Weighted => ScoreKind::Weighted(WeightedSum {
            molecular_weight: args.mw_weight,
            hydrophobicity: args.logp_weight,
        }),
    };
    let custom_weights = args.mw_weight != 1.0 || args.logp_weight != 0.0;
    if custom_weights && !matches!(args.score, ScoreArg::Weighted) {
        warn!("score weights only apply to --score weighted");
    }
    let order = if args.descending {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    RankOptions { score, order }
}

fn write_outputs(dir: Option<&Path>, report: &BatchReport) -> Result<OutputPaths> {
    match dir {
        Some(dir) => write_batch_outputs(dir, report).context("write batch tables"),
        None => Ok(OutputPaths::default()),
    }
}
