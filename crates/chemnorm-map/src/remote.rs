//! Resolution against an external compound database.

use chemnorm_model::{CanonicalForm, CompoundRecord, PropertyRecord};
use tracing::debug;

use crate::error::{ResolveError, SourceError};
use crate::resolver::{NameResolver, Resolution};

/// A service returning candidate compound records for a free-text name.
pub trait CompoundSource {
    /// Ordered candidates; an empty list means the name is unknown.
    fn search(&self, name: &str) -> Result<Vec<CompoundRecord>, SourceError>;
}

impl<S: CompoundSource + ?Sized> CompoundSource for &S {
    fn search(&self, name: &str) -> Result<Vec<CompoundRecord>, SourceError> {
        (**self).search(name)
    }
}

/// Derives the canonical form from a record's first synonym, uppercased.
pub fn canonical_from_record(
    name: &str,
    record: &CompoundRecord,
) -> Result<CanonicalForm, ResolveError> {
    let synonym = record
        .first_synonym()
        .ok_or_else(|| ResolveError::MalformedRecord {
            name: name.to_string(),
            reason: "record has no synonyms".to_string(),
        })?;
    CanonicalForm::new(synonym.to_uppercase()).map_err(|error| ResolveError::MalformedRecord {
        name: name.to_string(),
        reason: format!("first synonym is unusable: {error}"),
    })
}

/// Resolver querying a [`CompoundSource`] once per input name.
#[derive(Debug, Clone)]
pub struct RemoteResolver<S> {
    source: S,
}

impl<S: CompoundSource> RemoteResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves `name` and builds its property record from the first match.
    pub fn resolve_and_enrich(
        &self,
        name: &str,
    ) -> Result<Option<(CanonicalForm, PropertyRecord)>, ResolveError> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let records = self
            .source
            .search(name)
            .map_err(|error| ResolveError::SourceUnavailable {
                name: name.to_string(),
                message: error.message,
            })?;
        let Some(record) = records.into_iter().next() else {
            debug!(name, "no compound records returned");
            return Ok(None);
        };
        let canonical = canonical_from_record(name, &record)?;
        let properties = PropertyRecord {
            canonical_form: canonical.clone(),
            molecular_weight: record.molecular_weight,
            structural_descriptor: record.structural_descriptor,
            hydrophobicity: record.hydrophobicity,
        };
        debug!(name, canonical = %canonical, "resolved compound");
        Ok(Some((canonical, properties)))
    }
}

impl<S: CompoundSource> NameResolver for RemoteResolver<S> {
    fn resolve(&self, name: &str) -> Result<Option<Resolution>, ResolveError> {
        Ok(self
            .resolve_and_enrich(name)?
            .map(|(canonical, properties)| Resolution::with_properties(canonical, properties)))
    }
}
