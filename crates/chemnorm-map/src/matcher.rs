//! Variant matching against a static canonical-form table.
//!
//! Matching is exact and case-sensitive. An input that no canonical form
//! claims is returned unchanged.

use std::collections::HashMap;

use chemnorm_model::{AmbiguousVariant, CanonicalForm, VariantTable};
use tracing::warn;

/// Finds the canonical form owning `name` by scanning `table` in order.
pub fn resolve_variant(name: &str, table: &VariantTable) -> CanonicalForm {
    for (form, variants) in table.iter() {
        if variants.iter().any(|variant| variant == name) {
            return form.clone();
        }
    }
    CanonicalForm::passthrough(name)
}

/// Indexed matcher equivalent to [`resolve_variant`].
///
/// The index is built once; when a variant is claimed by several canonical
/// forms the first declared one is kept.
#[derive(Debug, Clone)]
pub struct VariantMatcher {
    table: VariantTable,
    index: HashMap<String, CanonicalForm>,
    ambiguous: Vec<AmbiguousVariant>,
}

impl VariantMatcher {
    pub fn new(table: VariantTable) -> Self {
        let mut index = HashMap::with_capacity(table.variant_count());
        for (form, variants) in table.iter() {
            for variant in variants {
                index.entry(variant.clone()).or_insert_with(|| form.clone());
            }
        }
        let ambiguous = table.ambiguous_variants();
        for entry in &ambiguous {
            let owners: Vec<&str> = entry.owners.iter().map(CanonicalForm::as_str).collect();
            warn!(
                variant = %entry.variant,
                owners = ?owners,
                winner = %owners[0],
                "variant listed under multiple canonical forms"
            );
        }
        Self {
            table,
            index,
            ambiguous,
        }
    }

    pub fn resolve(&self, name: &str) -> CanonicalForm {
        self.lookup(name)
            .cloned()
            .unwrap_or_else(|| CanonicalForm::passthrough(name))
    }

    /// Canonical form claiming `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&CanonicalForm> {
        self.index.get(name)
    }

    pub fn table(&self) -> &VariantTable {
        &self.table
    }

    pub fn ambiguous_variants(&self) -> &[AmbiguousVariant] {
        &self.ambiguous
    }
}
