//! Column schema shared by every tabular reader and writer.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Named columns of the mapping, property and ranking tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Input name as supplied by the caller.
    OriginalName,
    CanonicalForm,
    MolecularWeight,
    StructuralDescriptor,
    Hydrophobicity,
    Score,
    Rank,
}

/// Columns of the input-to-canonical mapping table.
pub const MAPPING_COLUMNS: &[Column] = &[Column::OriginalName, Column::CanonicalForm];

/// Columns of the deduplicated property table.
pub const PROPERTY_COLUMNS: &[Column] = &[
    Column::CanonicalForm,
    Column::MolecularWeight,
    Column::StructuralDescriptor,
    Column::Hydrophobicity,
];

/// Columns of the ranked property table.
pub const RANKED_COLUMNS: &[Column] = &[
    Column::Rank,
    Column::CanonicalForm,
    Column::MolecularWeight,
    Column::StructuralDescriptor,
    Column::Hydrophobicity,
    Column::Score,
];

/// Columns of the score-only export.
pub const SCORE_COLUMNS: &[Column] = &[Column::CanonicalForm, Column::Score];

impl Column {
    pub const ALL: [Column; 7] = [
        Column::OriginalName,
        Column::CanonicalForm,
        Column::MolecularWeight,
        Column::StructuralDescriptor,
        Column::Hydrophobicity,
        Column::Score,
        Column::Rank,
    ];

    /// Header written to and expected in tabular files.
    pub const fn header(self) -> &'static str {
        match self {
            Column::OriginalName => "org_form",
            Column::CanonicalForm => "normed_form",
            Column::MolecularWeight => "molecular_weight",
            Column::StructuralDescriptor => "isomeric_smiles",
            Column::Hydrophobicity => "xlogp",
            Column::Score => "score",
            Column::Rank => "rank",
        }
    }

    /// Human-readable label for terminal output.
    pub const fn label(self) -> &'static str {
        match self {
            Column::OriginalName => "Input",
            Column::CanonicalForm => "Canonical form",
            Column::MolecularWeight => "Mol. weight",
            Column::StructuralDescriptor => "SMILES",
            Column::Hydrophobicity => "XLogP",
            Column::Score => "Score",
            Column::Rank => "Rank",
        }
    }

    /// Parses a header, ignoring case and surrounding whitespace/BOM.
    pub fn from_header(raw: &str) -> Option<Column> {
        let key = raw.trim().trim_matches('\u{feff}');
        Column::ALL
            .into_iter()
            .find(|column| column.header().eq_ignore_ascii_case(key))
    }

    pub fn headers(columns: &[Column]) -> Vec<&'static str> {
        columns.iter().map(|column| column.header()).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::from_header(s).ok_or_else(|| ModelError::UnknownColumn(s.to_string()))
    }
}
