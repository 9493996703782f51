//! PubChem compound lookups for the remote resolution strategy.
//!
//! [`PubChemClient`] implements [`chemnorm_map::CompoundSource`] on top of
//! the PUG REST API: a name search returning molecular weight, isomeric
//! SMILES and XLogP, followed by a synonym lookup for the first compound.
//!
//! ```ignore
//! use chemnorm_map::{Aggregator, RemoteResolver};
//! use chemnorm_pubchem::{PubChemClient, PubChemConfig};
//!
//! let client = PubChemClient::new(PubChemConfig::from_env())?;
//! let outcome = Aggregator::new(RemoteResolver::new(client)).process(["Adenocard"])?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::PubChemClient;
pub use config::{BASE_URL_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, PubChemConfig};
pub use error::{PubChemError, Result};
