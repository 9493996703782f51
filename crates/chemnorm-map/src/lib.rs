#![deny(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod matcher;
pub mod rank;
pub mod remote;
pub mod resolver;

pub use aggregate::{AggregateOptions, Aggregator, BatchOutcome, Diagnostic, DiagnosticKind};
pub use error::{AggregateError, ResolveError, SourceError};
pub use matcher::{VariantMatcher, resolve_variant};
pub use rank::{
    Hydrophobicity, MolecularWeight, ScoreFn, SortOrder, WeightedSum, rank, rank_with,
};
pub use remote::{CompoundSource, RemoteResolver, canonical_from_record};
pub use resolver::{NameResolver, PropertyCatalog, Resolution, VariantResolver};
