//! CLI argument definitions for chemnorm.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "chemnorm",
    version,
    about = "Normalize compound names and rank their properties",
    long_about = "Map raw compound names to canonical forms, either through a local variant \
                  table or through PubChem, then rank the deduplicated compounds by a \
                  configurable score."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map names through a local variant table.
    Normalize(NormalizeArgs),

    /// Map names through PubChem and collect their properties.
    Resolve(ResolveArgs),

    /// Rank an existing property table.
    Rank(RankArgs),
}

/// Names to process. Without either, the built-in sample batch is used.
#[derive(Args)]
pub struct InputArgs {
    /// Compound names, in batch order.
    #[arg(value_name = "NAMES", conflicts_with = "input")]
    pub names: Vec<String>,

    /// Read names from a text file (one per line) or a CSV with an org_form column.
    #[arg(long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Args)]
pub struct RankingArgs {
    /// Score used to order the records.
    #[arg(long = "score", value_enum, default_value = "molecular-weight")]
    pub score: ScoreArg,

    /// Molecular weight coefficient for the weighted score.
    #[arg(long = "mw-weight", value_name = "W", default_value_t = 1.0)]
    pub mw_weight: f64,

    /// XLogP coefficient for the weighted score.
    #[arg(long = "logp-weight", value_name = "W", default_value_t = 0.0)]
    pub logp_weight: f64,

    /// Rank the highest score first. Missing scores stay last.
    #[arg(long = "descending")]
    pub descending: bool,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// JSON object mapping each canonical form to its known variants.
    #[arg(long = "variants", value_name = "FILE")]
    pub variants: PathBuf,

    /// Property table keyed by normed_form used to fill records.
    #[arg(long = "properties", value_name = "FILE")]
    pub properties: Option<PathBuf>,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// Write mapping, property, ranking and score tables to this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// PubChem PUG REST base URL (default: $CHEMNORM_PUBCHEM_URL or the public service).
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Abort on malformed records and exit non-zero when any input is skipped.
    #[arg(long = "strict")]
    pub strict: bool,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// Write mapping, property, ranking and score tables to this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RankArgs {
    /// Property table with a normed_form column.
    #[arg(long = "properties", value_name = "FILE")]
    pub properties: PathBuf,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// Write ranking and score tables to this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScoreArg {
    MolecularWeight,
    Hydrophobicity,
    Weighted,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
