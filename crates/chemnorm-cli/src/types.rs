use chemnorm_cli::pipeline::{BatchReport, OutputPaths};

/// What a subcommand produced, ready for printing.
#[derive(Debug)]
pub struct CommandResult {
    pub title: String,
    pub report: BatchReport,
    /// Whether the input-to-canonical mapping is part of the result.
    pub show_mapping: bool,
    pub outputs: OutputPaths,
    pub strict: bool,
}

impl CommandResult {
    /// In strict mode any skipped input fails the run.
    pub fn has_errors(&self) -> bool {
        self.strict && self.report.outcome.has_diagnostics()
    }
}
