//! Property table loading.
//!
//! The table must have a `normed_form` column. `molecular_weight`,
//! `isomeric_smiles` and `xlogp` are optional; empty cells become missing
//! values. `normed_form` cells are taken verbatim, surrounding whitespace
//! included, so tables written by this crate read back unchanged.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chemnorm_model::{CanonicalForm, Column, PropertyRecord};
use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::error::{IngestError, Result};

pub fn read_property_table(path: &Path) -> Result<Vec<PropertyRecord>> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::io(path, e))?;
    let records = read_property_records(file, path)?;
    info!(path = %path.display(), records = records.len(), "property table loaded");
    Ok(records)
}

/// Reads property records from CSV data; `path` is used in error messages.
pub fn read_property_records<R: Read>(reader: R, path: &Path) -> Result<Vec<PropertyRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(path, &e))?
        .clone();

    let mut columns: BTreeMap<usize, Column> = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        match Column::from_header(header) {
            Some(column) => {
                columns.insert(idx, column);
            }
            None => warn!(path = %path.display(), header, "ignoring unknown column"),
        }
    }
    if !columns.values().any(|c| *c == Column::CanonicalForm) {
        return Err(IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: Column::CanonicalForm.header(),
        });
    }

    let mut records = Vec::new();
    for (offset, row) in reader.records().enumerate() {
        let row = row.map_err(|e| IngestError::csv(path, &e))?;
        // Header is line 1.
        let line = offset + 2;
        let mut canonical = None;
        let mut molecular_weight = None;
        let mut structural_descriptor = None;
        let mut hydrophobicity = None;
        for (idx, value) in row.iter().enumerate() {
            let Some(column) = columns.get(&idx).copied() else {
                continue;
            };
            match column {
                // Canonical forms are written verbatim, so they are read verbatim.
                Column::CanonicalForm => {
                    canonical = Some(CanonicalForm::new(value).map_err(|_| {
                        IngestError::BlankCanonicalForm {
                            path: path.to_path_buf(),
                            row: line,
                        }
                    })?);
                }
                Column::MolecularWeight => {
                    molecular_weight = parse_number(value.trim(), column, path, line)?;
                }
                Column::Hydrophobicity => {
                    hydrophobicity = parse_number(value.trim(), column, path, line)?;
                }
                Column::StructuralDescriptor => {
                    let value = value.trim();
                    structural_descriptor = (!value.is_empty()).then(|| value.to_string());
                }
                Column::OriginalName | Column::Score | Column::Rank => {}
            }
        }
        let Some(canonical_form) = canonical else {
            return Err(IngestError::BlankCanonicalForm {
                path: path.to_path_buf(),
                row: line,
            });
        };
        records.push(PropertyRecord {
            canonical_form,
            molecular_weight,
            structural_descriptor,
            hydrophobicity,
        });
    }
    Ok(records)
}

fn parse_number(value: &str, column: Column, path: &Path, row: usize) -> Result<Option<f64>> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| IngestError::InvalidNumber {
            path: path.to_path_buf(),
            row,
            column: column.header(),
            value: value.to_string(),
        })
}
