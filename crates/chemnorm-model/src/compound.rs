use serde::{Deserialize, Serialize};

/// The subset of an external compound record the pipeline reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    /// Ordered synonyms; the first one names the canonical form.
    pub synonyms: Vec<String>,
    pub molecular_weight: Option<f64>,
    pub structural_descriptor: Option<String>,
    pub hydrophobicity: Option<f64>,
}

impl CompoundRecord {
    pub fn first_synonym(&self) -> Option<&str> {
        self.synonyms.first().map(String::as_str)
    }
}
