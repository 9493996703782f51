//! PUG REST response payloads.

use chemnorm_model::CompoundRecord;
use serde::{Deserialize, Deserializer};

/// Properties requested from the name search.
pub const PROPERTY_LIST: &str = "MolecularWeight,IsomericSMILES,XLogP";

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    pub table: PropertyTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyTable {
    #[serde(rename = "Properties", default)]
    pub properties: Vec<CompoundProperties>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompoundProperties {
    #[serde(rename = "CID")]
    pub cid: u64,
    #[serde(
        rename = "MolecularWeight",
        default,
        deserialize_with = "number_or_string"
    )]
    pub molecular_weight: Option<f64>,
    // Newer responses report the isomeric form under "SMILES".
    #[serde(rename = "IsomericSMILES", alias = "SMILES", default)]
    pub isomeric_smiles: Option<String>,
    #[serde(rename = "XLogP", default)]
    pub xlogp: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynonymResponse {
    #[serde(rename = "InformationList")]
    pub information_list: InformationList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InformationList {
    #[serde(rename = "Information", default)]
    pub information: Vec<SynonymInformation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynonymInformation {
    #[serde(rename = "CID")]
    pub cid: u64,
    #[serde(rename = "Synonym", default)]
    pub synonyms: Vec<String>,
}

impl SynonymResponse {
    /// Synonyms listed for `cid`, empty if the compound is absent.
    pub fn synonyms_for(self, cid: u64) -> Vec<String> {
        self.information_list
            .information
            .into_iter()
            .find(|info| info.cid == cid)
            .map(|info| info.synonyms)
            .unwrap_or_default()
    }
}

/// Error body returned alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct FaultResponse {
    #[serde(rename = "Fault")]
    pub fault: Fault,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fault {
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl CompoundProperties {
    pub fn into_record(self, synonyms: Vec<String>) -> CompoundRecord {
        CompoundRecord {
            synonyms,
            molecular_weight: self.molecular_weight,
            structural_descriptor: self.isomeric_smiles,
            hydrophobicity: self.xlogp,
        }
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
