//! Blocking PUG REST client.
//!
//! One name search per input, plus one synonym request for the first
//! compound returned. No retries are attempted; a failed request fails the
//! lookup.

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::debug;

use chemnorm_map::{CompoundSource, SourceError};
use chemnorm_model::CompoundRecord;

use crate::config::PubChemConfig;
use crate::error::{PubChemError, Result};
use crate::types::{FaultResponse, PROPERTY_LIST, PropertyResponse, SynonymResponse};

/// Fallback delay when a busy response carries no `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Client for the PubChem compound endpoints.
#[derive(Debug, Clone)]
pub struct PubChemClient {
    client: Client,
    base_url: Url,
}

impl PubChemClient {
    /// Create a new client from the given configuration.
    pub fn new(config: PubChemConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| PubChemError::InvalidUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(PubChemError::InvalidUrl(config.base_url));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| PubChemError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// URL of the property search for `name`.
    pub fn property_url(&self, name: &str) -> Result<Url> {
        self.endpoint(&["compound", "name", name, "property", PROPERTY_LIST, "JSON"])
    }

    /// URL of the synonym listing for `cid`.
    pub fn synonyms_url(&self, cid: u64) -> Result<Url> {
        self.endpoint(&["compound", "cid", &cid.to_string(), "synonyms", "JSON"])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PubChemError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetches the compound records matching `name`.
    ///
    /// Returns an empty list when PubChem knows no compound by that name.
    /// Only the first record carries synonyms.
    pub fn find_compounds(&self, name: &str) -> Result<Vec<CompoundRecord>> {
        let Some(response) = self.get_json::<PropertyResponse>(self.property_url(name)?)? else {
            debug!(name, "no compound found");
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(response.table.properties.len());
        for (position, properties) in response.table.properties.into_iter().enumerate() {
            let synonyms = if position == 0 {
                self.fetch_synonyms(properties.cid)?
            } else {
                Vec::new()
            };
            records.push(properties.into_record(synonyms));
        }
        debug!(name, count = records.len(), "compounds found");
        Ok(records)
    }

    /// Fetches the ordered synonym list for a compound id.
    pub fn fetch_synonyms(&self, cid: u64) -> Result<Vec<String>> {
        Ok(self
            .get_json::<SynonymResponse>(self.synonyms_url(cid)?)?
            .map(|response| response.synonyms_for(cid))
            .unwrap_or_default())
    }

    /// Issues a GET and decodes the body; `None` on 404.
    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        debug!(url = %url, "PubChem request");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;
        let Some(response) = check_status(response)? else {
            return Ok(None);
        };
        let body = response.text()?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

/// Maps error statuses to errors, 404 to `None`.
fn check_status(response: Response) -> Result<Option<Response>> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(PubChemError::RateLimited { retry_after_secs });
    }
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(PubChemError::Api {
            status: status.as_u16(),
            message: fault_message(&body),
        });
    }
    Ok(Some(response))
}

/// Extracts the fault message from an error body, falling back to the body.
fn fault_message(body: &str) -> String {
    match serde_json::from_str::<FaultResponse>(body) {
        Ok(fault) if !fault.fault.message.is_empty() => {
            format!("{}: {}", fault.fault.code, fault.fault.message)
        }
        _ => body.trim().to_string(),
    }
}

impl CompoundSource for PubChemClient {
    fn search(&self, name: &str) -> std::result::Result<Vec<CompoundRecord>, SourceError> {
        self.find_compounds(name).map_err(SourceError::from)
    }
}
