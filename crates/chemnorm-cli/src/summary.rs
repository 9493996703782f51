use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use chemnorm_map::{Diagnostic, DiagnosticKind};
use chemnorm_model::{Column, InputMapping, MAPPING_COLUMNS, RANKED_COLUMNS, RankedRecord};

use crate::types::CommandResult;

pub fn print_summary(result: &CommandResult) {
    println!("{}", result.title);
    let outcome = &result.report.outcome;
    if result.show_mapping {
        println!("{}", mapping_table(&outcome.mapping));
    }
    println!("{}", ranked_table(&result.report.ranked));
    if outcome.has_diagnostics() {
        println!("{}", diagnostics_table(&outcome.diagnostics));
    }
    if result.show_mapping {
        println!(
            "{} resolved, {} compounds, {} skipped",
            outcome.mapping.len(),
            outcome.records.len(),
            outcome.diagnostics.len()
        );
    }
    for path in result.outputs.iter() {
        println!("Output: {}", path.display());
    }
}

fn mapping_table(mapping: &InputMapping) -> Table {
    let mut table = Table::new();
    table.set_header(
        MAPPING_COLUMNS
            .iter()
            .map(|column| header_cell(column.label()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for entry in mapping {
        let canonical = if entry.original == entry.canonical.as_str() {
            dim_cell(entry.canonical.as_str())
        } else {
            Cell::new(entry.canonical.as_str()).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![Cell::new(&entry.original), canonical]);
    }
    table
}

fn ranked_table(ranked: &[RankedRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(
        RANKED_COLUMNS
            .iter()
            .map(|column| header_cell(column.label()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for (index, column) in RANKED_COLUMNS.iter().enumerate() {
        if matches!(
            column,
            Column::Rank | Column::MolecularWeight | Column::Hydrophobicity | Column::Score
        ) {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for entry in ranked {
        let row: Vec<Cell> = RANKED_COLUMNS
            .iter()
            .map(|column| ranked_cell(entry, *column))
            .collect();
        table.add_row(row);
    }
    table
}

fn ranked_cell(entry: &RankedRecord, column: Column) -> Cell {
    let record = &entry.record;
    match column {
        Column::Rank => Cell::new(entry.rank),
        Column::CanonicalForm => Cell::new(record.canonical_form.as_str()),
        Column::MolecularWeight => number_cell(record.molecular_weight),
        Column::StructuralDescriptor => match &record.structural_descriptor {
            Some(smiles) => Cell::new(smiles),
            None => dim_cell("-"),
        },
        Column::Hydrophobicity => number_cell(record.hydrophobicity),
        Column::Score => match entry.score {
            Some(score) => Cell::new(format_number(score)).fg(Color::Green),
            None => dim_cell("-"),
        },
        Column::OriginalName => dim_cell("-"),
    }
}

fn diagnostics_table(diagnostics: &[Diagnostic]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Input"),
        header_cell("Reason"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for diagnostic in diagnostics {
        let color = match diagnostic.kind {
            DiagnosticKind::NotFound => Color::Yellow,
            DiagnosticKind::MalformedRecord => Color::Red,
        };
        table.add_row(vec![
            dim_cell(diagnostic.index),
            Cell::new(&diagnostic.input),
            Cell::new(diagnostic.kind.label()).fg(color),
            Cell::new(&diagnostic.message),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn number_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_number(value)),
        None => dim_cell("-"),
    }
}

fn format_number(value: f64) -> String {
    format!("{value:.2}")
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
