//! Canonical form to variant spellings table.
//!
//! Entries keep the order in which they were declared. Lookups walk the
//! table front to back, so when a variant is listed under several
//! canonical forms the earliest declaration owns it. When a JSON object
//! repeats a key, the last list is kept at the key's first position.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::CanonicalForm;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantTable {
    entries: Vec<(CanonicalForm, Vec<String>)>,
}

/// A variant string listed under more than one canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousVariant {
    pub variant: String,
    /// Owning canonical forms in declaration order; the first one wins.
    pub owners: Vec<CanonicalForm>,
}

impl VariantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a canonical form with its variants.
    ///
    /// Declaring the same canonical form twice extends its variant list.
    pub fn insert<I, S>(&mut self, canonical: CanonicalForm, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = variants.into_iter().map(Into::into);
        match self.entries.iter_mut().find(|(form, _)| *form == canonical) {
            Some((_, existing)) => existing.extend(variants),
            None => self.entries.push((canonical, variants.collect())),
        }
    }

    /// Sets the variants of a canonical form, replacing any earlier list.
    ///
    /// A replaced form keeps its original position in the table.
    pub fn set<I, S>(&mut self, canonical: CanonicalForm, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();
        match self.entries.iter_mut().find(|(form, _)| *form == canonical) {
            Some((_, existing)) => *existing = variants,
            None => self.entries.push((canonical, variants)),
        }
    }

    #[must_use]
    pub fn with_entry<I, S>(mut self, canonical: CanonicalForm, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(canonical, variants);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalForm, &[String])> {
        self.entries
            .iter()
            .map(|(form, variants)| (form, variants.as_slice()))
    }

    pub fn canonical_forms(&self) -> impl Iterator<Item = &CanonicalForm> {
        self.entries.iter().map(|(form, _)| form)
    }

    pub fn variant_count(&self) -> usize {
        self.entries.iter().map(|(_, variants)| variants.len()).sum()
    }

    /// Variants claimed by more than one canonical form, sorted by variant.
    pub fn ambiguous_variants(&self) -> Vec<AmbiguousVariant> {
        let mut owners: BTreeMap<&str, Vec<CanonicalForm>> = BTreeMap::new();
        for (form, variants) in &self.entries {
            for variant in variants {
                let list = owners.entry(variant.as_str()).or_default();
                if !list.contains(form) {
                    list.push(form.clone());
                }
            }
        }
        owners
            .into_iter()
            .filter(|(_, forms)| forms.len() > 1)
            .map(|(variant, forms)| AmbiguousVariant {
                variant: variant.to_string(),
                owners: forms,
            })
            .collect()
    }
}

impl Serialize for VariantTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (form, variants) in &self.entries {
            map.serialize_entry(form.as_str(), variants)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VariantTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VariantTableVisitor)
    }
}

struct VariantTableVisitor;

impl<'de> Visitor<'de> for VariantTableVisitor {
    type Value = VariantTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping canonical forms to lists of variants")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = VariantTable::new();
        while let Some((key, variants)) = access.next_entry::<String, Vec<String>>()? {
            let form = CanonicalForm::new(key).map_err(de::Error::custom)?;
            // A repeated key overrides the earlier list, as JSON object semantics dictate.
            table.set(form, variants);
        }
        Ok(table)
    }
}
