//! CSV writers for the mapping, property, ranking and score tables.
//!
//! Headers come from the shared column schema. Missing values are written
//! as empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chemnorm_model::{
    Column, InputMapping, MAPPING_COLUMNS, PROPERTY_COLUMNS, PropertyRecord, RANKED_COLUMNS,
    RankedRecord, SCORE_COLUMNS,
};
use csv::Writer;
use tracing::info;

use crate::error::{IngestError, Result};

type CsvResult<T> = std::result::Result<T, csv::Error>;

pub fn write_mapping_csv<W: Write>(writer: W, mapping: &InputMapping) -> CsvResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(Column::headers(MAPPING_COLUMNS))?;
    for entry in mapping {
        csv.write_record([entry.original.as_str(), entry.canonical.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_properties_csv<W: Write>(writer: W, records: &[PropertyRecord]) -> CsvResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(Column::headers(PROPERTY_COLUMNS))?;
    for record in records {
        let row: Vec<String> = PROPERTY_COLUMNS
            .iter()
            .map(|column| property_cell(record, *column))
            .collect();
        csv.write_record(&row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_ranked_csv<W: Write>(writer: W, ranked: &[RankedRecord]) -> CsvResult<()> {
    write_ranked_columns(writer, ranked, RANKED_COLUMNS)
}

/// Writes only `normed_form` and `score`, in rank order.
pub fn write_scores_csv<W: Write>(writer: W, ranked: &[RankedRecord]) -> CsvResult<()> {
    write_ranked_columns(writer, ranked, SCORE_COLUMNS)
}

fn write_ranked_columns<W: Write>(
    writer: W,
    ranked: &[RankedRecord],
    columns: &[Column],
) -> CsvResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(Column::headers(columns))?;
    for entry in ranked {
        let row: Vec<String> = columns
            .iter()
            .map(|column| match column {
                Column::Rank => entry.rank.to_string(),
                Column::Score => number_cell(entry.score),
                other => property_cell(&entry.record, *other),
            })
            .collect();
        csv.write_record(&row)?;
    }
    csv.flush()?;
    Ok(())
}

fn property_cell(record: &PropertyRecord, column: Column) -> String {
    match column {
        Column::CanonicalForm => record.canonical_form.to_string(),
        Column::MolecularWeight => number_cell(record.molecular_weight),
        Column::StructuralDescriptor => record.structural_descriptor.clone().unwrap_or_default(),
        Column::Hydrophobicity => number_cell(record.hydrophobicity),
        Column::OriginalName | Column::Score | Column::Rank => String::new(),
    }
}

fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn write_mapping_csv_to_path(path: &Path, mapping: &InputMapping) -> Result<()> {
    write_to_path(path, |file| write_mapping_csv(file, mapping))
}

pub fn write_properties_csv_to_path(path: &Path, records: &[PropertyRecord]) -> Result<()> {
    write_to_path(path, |file| write_properties_csv(file, records))
}

pub fn write_ranked_csv_to_path(path: &Path, ranked: &[RankedRecord]) -> Result<()> {
    write_to_path(path, |file| write_ranked_csv(file, ranked))
}

pub fn write_scores_csv_to_path(path: &Path, ranked: &[RankedRecord]) -> Result<()> {
    write_to_path(path, |file| write_scores_csv(file, ranked))
}

fn write_to_path<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(File) -> CsvResult<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| IngestError::io(path, e))?;
    write(file).map_err(|e| IngestError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), "table written");
    Ok(())
}
