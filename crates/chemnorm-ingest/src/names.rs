//! Input name lists.
//!
//! Plain text files hold one name per line; blank lines and lines starting
//! with `#` are skipped. Files with a `.csv` extension are read as tables:
//! the `org_form` column is used when present, otherwise the first column.
//! Names are kept verbatim apart from the line terminator.

use std::fs;
use std::path::Path;

use chemnorm_model::Column;
use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

pub fn read_input_names(path: &Path) -> Result<Vec<String>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        return read_name_column(path);
    }
    let contents = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    Ok(parse_name_lines(&contents))
}

pub fn parse_name_lines(contents: &str) -> Vec<String> {
    contents
        .trim_start_matches('\u{feff}')
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

fn read_name_column(path: &Path) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, &e))?;
    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(path, &e))?
        .clone();
    let index = headers
        .iter()
        .position(|header| Column::from_header(header) == Some(Column::OriginalName))
        .unwrap_or(0);

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, &e))?;
        if let Some(value) = record.get(index)
            && !value.trim().is_empty()
        {
            names.push(value.to_string());
        }
    }
    Ok(names)
}
