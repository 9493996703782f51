//! The seam between batch aggregation and the matching strategies.

use std::collections::BTreeMap;

use chemnorm_model::{CanonicalForm, PropertyRecord, VariantTable};

use crate::error::ResolveError;
use crate::matcher::VariantMatcher;

/// Result of resolving one input name.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub canonical: CanonicalForm,
    /// Properties obtained together with the canonical form, if the
    /// strategy produces them in the same step.
    pub properties: Option<PropertyRecord>,
}

impl Resolution {
    pub fn canonical(canonical: CanonicalForm) -> Self {
        Self {
            canonical,
            properties: None,
        }
    }

    pub fn with_properties(canonical: CanonicalForm, properties: PropertyRecord) -> Self {
        Self {
            canonical,
            properties: Some(properties),
        }
    }
}

/// A strategy mapping free-text names to canonical forms.
pub trait NameResolver {
    /// Resolves `name`. `Ok(None)` means the name was not found.
    fn resolve(&self, name: &str) -> Result<Option<Resolution>, ResolveError>;

    /// Properties for a canonical form whose resolution carried none.
    ///
    /// Called at most once per canonical form in a batch.
    fn properties(&self, canonical: &CanonicalForm) -> PropertyRecord {
        PropertyRecord::missing(canonical.clone())
    }
}

impl<R: NameResolver + ?Sized> NameResolver for &R {
    fn resolve(&self, name: &str) -> Result<Option<Resolution>, ResolveError> {
        (**self).resolve(name)
    }

    fn properties(&self, canonical: &CanonicalForm) -> PropertyRecord {
        (**self).properties(canonical)
    }
}

/// Externally supplied property records keyed by canonical form.
#[derive(Debug, Clone, Default)]
pub struct PropertyCatalog {
    records: BTreeMap<CanonicalForm, PropertyRecord>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any earlier one for the same form.
    pub fn insert(&mut self, record: PropertyRecord) -> Option<PropertyRecord> {
        self.records.insert(record.canonical_form.clone(), record)
    }

    pub fn get(&self, canonical: &CanonicalForm) -> Option<&PropertyRecord> {
        self.records.get(canonical)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<PropertyRecord> for PropertyCatalog {
    fn from_iter<T: IntoIterator<Item = PropertyRecord>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

/// Static-table strategy: every input resolves, unmatched ones to themselves.
#[derive(Debug, Clone)]
pub struct VariantResolver {
    matcher: VariantMatcher,
    catalog: PropertyCatalog,
}

impl VariantResolver {
    pub fn new(table: VariantTable) -> Self {
        Self {
            matcher: VariantMatcher::new(table),
            catalog: PropertyCatalog::new(),
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: PropertyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn matcher(&self) -> &VariantMatcher {
        &self.matcher
    }
}

impl NameResolver for VariantResolver {
    fn resolve(&self, name: &str) -> Result<Option<Resolution>, ResolveError> {
        Ok(Some(Resolution::canonical(self.matcher.resolve(name))))
    }

    fn properties(&self, canonical: &CanonicalForm) -> PropertyRecord {
        self.catalog
            .get(canonical)
            .cloned()
            .unwrap_or_else(|| PropertyRecord::missing(canonical.clone()))
    }
}
