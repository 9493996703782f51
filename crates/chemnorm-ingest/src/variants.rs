//! Variant table loading.

use std::fs;
use std::path::Path;

use chemnorm_model::VariantTable;
use tracing::info;

use crate::error::{IngestError, Result};

/// Loads a `{ "CANONICAL": ["variant", ...], ... }` JSON file.
///
/// Entry order follows the file.
pub fn load_variant_table(path: &Path) -> Result<VariantTable> {
    let contents = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let table = parse_variant_table(&contents).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        canonical_forms = table.len(),
        variants = table.variant_count(),
        "variant table loaded"
    );
    Ok(table)
}

pub fn parse_variant_table(contents: &str) -> serde_json::Result<VariantTable> {
    serde_json::from_str(contents.trim_start_matches('\u{feff}'))
}
