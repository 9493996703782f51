//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// PUG REST root.
pub const DEFAULT_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV_VAR: &str = "CHEMNORM_PUBCHEM_URL";

/// HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("chemnorm/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PubChemConfig {
    pub base_url: String,
    /// Per-request timeout. A hung request blocks the batch for at most this long.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for PubChemConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }
}

impl PubChemConfig {
    /// Defaults, with the base URL taken from `CHEMNORM_PUBCHEM_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR)
            && !url.trim().is_empty()
        {
            config.base_url = url.trim().to_string();
        }
        config
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
