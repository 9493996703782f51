#![deny(unsafe_code)]

pub mod error;
pub mod names;
pub mod output;
pub mod properties;
pub mod variants;

pub use error::{IngestError, Result};
pub use names::{parse_name_lines, read_input_names};
pub use output::{
    write_mapping_csv, write_mapping_csv_to_path, write_properties_csv,
    write_properties_csv_to_path, write_ranked_csv, write_ranked_csv_to_path, write_scores_csv,
    write_scores_csv_to_path,
};
pub use properties::{read_property_records, read_property_table};
pub use variants::{load_variant_table, parse_variant_table};
