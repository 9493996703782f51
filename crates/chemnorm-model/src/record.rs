//! Canonical identities and the property records attached to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Normalized identity shared by every variant spelling of one compound.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalForm(String);

impl CanonicalForm {
    /// Creates a canonical form, rejecting blank strings.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::BlankCanonicalForm);
        }
        Ok(Self(value))
    }

    /// Wraps an input name that passed through matching unchanged.
    ///
    /// Unlike [`CanonicalForm::new`] this accepts any string, blank ones
    /// included, because the identity policy applies to every input.
    pub fn passthrough(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for CanonicalForm {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CanonicalForm> for String {
    fn from(form: CanonicalForm) -> Self {
        form.0
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalForm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Chemical attributes for one canonical form.
///
/// Absent values stay `None`; they are never replaced by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub canonical_form: CanonicalForm,
    pub molecular_weight: Option<f64>,
    /// Isomeric SMILES string.
    pub structural_descriptor: Option<String>,
    /// Computed logP.
    pub hydrophobicity: Option<f64>,
}

impl PropertyRecord {
    /// Record with every property missing.
    pub fn missing(canonical_form: CanonicalForm) -> Self {
        Self {
            canonical_form,
            molecular_weight: None,
            structural_descriptor: None,
            hydrophobicity: None,
        }
    }

    #[must_use]
    pub fn with_molecular_weight(mut self, value: f64) -> Self {
        self.molecular_weight = Some(value);
        self
    }

    #[must_use]
    pub fn with_structural_descriptor(mut self, value: impl Into<String>) -> Self {
        self.structural_descriptor = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_hydrophobicity(mut self, value: f64) -> Self {
        self.hydrophobicity = Some(value);
        self
    }

    /// True when no property value is present.
    pub fn is_empty(&self) -> bool {
        self.molecular_weight.is_none()
            && self.structural_descriptor.is_none()
            && self.hydrophobicity.is_none()
    }
}

/// A property record with its score and 0-based position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    pub record: PropertyRecord,
    pub score: Option<f64>,
    pub rank: usize,
}

impl RankedRecord {
    pub fn canonical_form(&self) -> &CanonicalForm {
        &self.record.canonical_form
    }
}
