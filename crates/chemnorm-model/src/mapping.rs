use serde::{Deserialize, Serialize};

use crate::record::CanonicalForm;

/// One input name and the canonical form it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub original: String,
    pub canonical: CanonicalForm,
}

/// Input-ordered mapping table. Original names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputMapping {
    entries: Vec<MappingEntry>,
}

impl InputMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, original: impl Into<String>, canonical: CanonicalForm) {
        self.entries.push(MappingEntry {
            original: original.into(),
            canonical,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    /// `(original, canonical)` pairs as borrowed strings.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.original.as_str(), entry.canonical.as_str()))
            .collect()
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a InputMapping {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
