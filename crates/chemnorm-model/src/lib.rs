pub mod compound;
pub mod error;
pub mod mapping;
pub mod record;
pub mod schema;
pub mod variants;

pub use compound::CompoundRecord;
pub use error::{ModelError, Result};
pub use mapping::{InputMapping, MappingEntry};
pub use record::{CanonicalForm, PropertyRecord, RankedRecord};
pub use schema::{
    Column, MAPPING_COLUMNS, PROPERTY_COLUMNS, RANKED_COLUMNS, SCORE_COLUMNS,
};
pub use variants::{AmbiguousVariant, VariantTable};
