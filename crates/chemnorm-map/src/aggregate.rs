//! Batch resolution with per-identity deduplication.
//!
//! Inputs are resolved in order. Every resolved input gets a mapping
//! entry; each distinct canonical form contributes exactly one property
//! record, in first-seen order. Unresolved inputs are reported as
//! diagnostics and left out of the mapping.

use std::collections::HashSet;
use std::time::Instant;

use chemnorm_model::{CanonicalForm, InputMapping, PropertyRecord};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::error::{AggregateError, ResolveError};
use crate::resolver::NameResolver;

/// Batch behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Abort the batch on the first malformed record instead of skipping it.
    pub fail_on_malformed: bool,
}

impl AggregateOptions {
    pub fn strict() -> Self {
        Self {
            fail_on_malformed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    NotFound,
    MalformedRecord,
}

impl DiagnosticKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::MalformedRecord => "malformed record",
        }
    }
}

/// A skipped input and the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Position of the input in the batch.
    pub index: usize,
    pub input: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Everything a batch produces.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub mapping: InputMapping,
    /// One record per distinct canonical form, in first-seen order.
    pub records: Vec<PropertyRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchOutcome {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Drives a [`NameResolver`] over a batch of names.
#[derive(Debug, Clone)]
pub struct Aggregator<R> {
    resolver: R,
    options: AggregateOptions,
}

impl<R: NameResolver> Aggregator<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            options: AggregateOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AggregateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolves every input and deduplicates property records.
    ///
    /// # Errors
    ///
    /// Returns an error when the source becomes unavailable, or on a
    /// malformed record when `fail_on_malformed` is set.
    pub fn process<I, S>(&self, inputs: I) -> Result<BatchOutcome, AggregateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let span = info_span!("aggregate");
        let _guard = span.enter();
        let start = Instant::now();

        let mut outcome = BatchOutcome::default();
        let mut seen: HashSet<CanonicalForm> = HashSet::new();
        let mut input_count = 0usize;

        for (index, input) in inputs.into_iter().enumerate() {
            input_count += 1;
            let name = input.as_ref();
            let resolution = match self.resolver.resolve(name) {
                Ok(Some(resolution)) => resolution,
                Ok(None) => {
                    report(
                        &mut outcome,
                        index,
                        name,
                        DiagnosticKind::NotFound,
                        format!("no canonical form found for '{name}'"),
                    );
                    continue;
                }
                Err(error @ ResolveError::MalformedRecord { .. }) => {
                    if self.options.fail_on_malformed {
                        return Err(AggregateError::MalformedRecord {
                            index,
                            source: error,
                        });
                    }
                    report(
                        &mut outcome,
                        index,
                        name,
                        DiagnosticKind::MalformedRecord,
                        error.to_string(),
                    );
                    continue;
                }
                Err(error @ ResolveError::SourceUnavailable { .. }) => {
                    return Err(AggregateError::SourceUnavailable {
                        index,
                        source: error,
                    });
                }
            };

            let canonical = resolution.canonical;
            debug!(input = name, canonical = %canonical, "resolved input");
            outcome.mapping.push(name, canonical.clone());
            if seen.contains(&canonical) {
                continue;
            }
            let record = match resolution.properties {
                Some(record) => record,
                None => self.resolver.properties(&canonical),
            };
            seen.insert(canonical);
            outcome.records.push(record);
        }

        info!(
            input_count,
            mapped = outcome.mapping.len(),
            distinct = outcome.records.len(),
            skipped = outcome.diagnostics.len(),
            duration_ms = start.elapsed().as_millis(),
            "batch resolved"
        );
        Ok(outcome)
    }
}

fn report(
    outcome: &mut BatchOutcome,
    index: usize,
    input: &str,
    kind: DiagnosticKind,
    message: String,
) {
    warn!(index, input, kind = kind.label(), "{message}");
    outcome.diagnostics.push(Diagnostic {
        index,
        input: input.to_string(),
        kind,
        message,
    });
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use chemnorm_model::VariantTable;

    use super::*;
    use crate::resolver::{PropertyCatalog, Resolution, VariantResolver};

    fn form(value: &str) -> CanonicalForm {
        CanonicalForm::new(value).unwrap()
    }

    /// Counts property lookups per canonical form.
    struct CountingResolver {
        lookups: RefCell<BTreeMap<String, usize>>,
    }

    impl NameResolver for CountingResolver {
        fn resolve(&self, name: &str) -> Result<Option<Resolution>, ResolveError> {
            Ok(Some(Resolution::canonical(form(&name.to_uppercase()))))
        }

        fn properties(&self, canonical: &CanonicalForm) -> PropertyRecord {
            *self
                .lookups
                .borrow_mut()
                .entry(canonical.to_string())
                .or_default() += 1;
            PropertyRecord::missing(canonical.clone())
        }
    }

    #[test]
    fn property_lookup_happens_once_per_identity() {
        let resolver = CountingResolver {
            lookups: RefCell::new(BTreeMap::new()),
        };
        let aggregator = Aggregator::new(&resolver);
        let outcome = aggregator
            .process(["a", "A", "b", "a", "B"])
            .expect("process batch");
        assert_eq!(outcome.mapping.len(), 5);
        assert_eq!(outcome.records.len(), 2);
        let lookups = resolver.lookups.borrow();
        assert_eq!(lookups.get("A"), Some(&1));
        assert_eq!(lookups.get("B"), Some(&1));
    }

    #[test]
    fn catalog_records_are_attached() {
        let table = VariantTable::new().with_entry(form("ADENOSINE"), ["Adenocard"]);
        let catalog: PropertyCatalog =
            [PropertyRecord::missing(form("ADENOSINE")).with_molecular_weight(267.24)]
                .into_iter()
                .collect();
        let resolver = VariantResolver::new(table).with_catalog(catalog);
        let outcome = Aggregator::new(resolver)
            .process(["Adenocard", "unknownX"])
            .unwrap();
        assert_eq!(outcome.records[0].molecular_weight, Some(267.24));
        assert_eq!(outcome.records[1], PropertyRecord::missing(form("unknownX")));
        assert!(!outcome.has_diagnostics());
    }

    #[test]
    fn empty_batch_yields_empty_outcome() {
        let resolver = VariantResolver::new(VariantTable::new());
        let outcome = Aggregator::new(resolver)
            .process(Vec::<String>::new())
            .unwrap();
        assert!(outcome.mapping.is_empty());
        assert!(outcome.records.is_empty());
    }
}
