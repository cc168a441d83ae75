//! File-based configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! [http]
//! timeout_secs = 10
//!
//! [sources]
//! enabled = ["NIST", "LfD", "Local"]
//!
//! [sources.lfd]
//! length = 64
//!
//! [store]
//! path = "/var/lib/qsplit/store.json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sources::SOURCE_NAMES;

/// Environment variable consulted when no ANU API key is configured.
pub const ANU_API_KEY_ENV: &str = "QUANTUM_NUMBERS_API_KEY";

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("http timeout must be at least one second")]
    ZeroTimeout,
    #[error("{0} must request at least one byte")]
    ZeroLength(&'static str),
    #[error("unknown source {0:?} in sources.enabled")]
    UnknownSource(String),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitterConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request transport timeout for every HTTP adapter.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 20 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Source names to register. `None` registers every source.
    pub enabled: Option<Vec<String>>,
    pub anu: AnuConfig,
    pub nist: BeaconConfig,
    pub inmetro: BeaconConfig,
    pub lfd: LfdConfig,
    pub random_org: RandomOrgConfig,
    pub curby: CurbyConfig,
    pub local: LocalConfig,
}

impl SourcesConfig {
    /// Whether `name` should be registered.
    pub fn is_enabled(&self, name: &str) -> bool {
        match &self.enabled {
            Some(names) => names.iter().any(|n| n.eq_ignore_ascii_case(name)),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnuConfig {
    pub base_url: String,
    /// Falls back to `QUANTUM_NUMBERS_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Number of hex16 blocks per request.
    pub length: usize,
    /// Bytes per hex16 block.
    pub size: usize,
}

impl Default for AnuConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.quantumnumbers.anu.edu.au/".to_string(),
            api_key: None,
            length: 1024,
            size: 10,
        }
    }
}

impl AnuConfig {
    /// Configured key, or the environment fallback.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(ANU_API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Pulse-style beacons (NIST, INMETRO) only need an endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    /// `None` selects the provider's public endpoint.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LfdConfig {
    pub base_url: String,
    /// Bytes per request.
    pub length: usize,
}

impl Default for LfdConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lfdr.de/qrng_api/qrng".to_string(),
            length: 128,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomOrgConfig {
    pub base_url: String,
    pub nbytes: usize,
}

impl Default for RandomOrgConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.random.org/cgi-bin/randbyte".to_string(),
            nbytes: 32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurbyConfig {
    pub base_url: String,
}

impl Default for CurbyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://random.colorado.edu/api/curbyq/latest/randomness".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub bytes: usize,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self { bytes: 32 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("qsplit-store.json"),
        }
    }
}

impl SplitterConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SplitterConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let s = &self.sources;
        if s.anu.length == 0 || s.anu.size == 0 {
            return Err(ConfigError::ZeroLength("sources.anu"));
        }
        if s.lfd.length == 0 {
            return Err(ConfigError::ZeroLength("sources.lfd"));
        }
        if s.random_org.nbytes == 0 {
            return Err(ConfigError::ZeroLength("sources.random_org"));
        }
        if s.local.bytes == 0 {
            return Err(ConfigError::ZeroLength("sources.local"));
        }
        if let Some(names) = &s.enabled {
            for name in names {
                if !SOURCE_NAMES.iter().any(|k| k.eq_ignore_ascii_case(name)) {
                    return Err(ConfigError::UnknownSource(name.clone()));
                }
            }
        }
        Ok(())
    }
}
