//! Random.org raw byte endpoint (`randbyte`, hex format).
//!
//! The response is whitespace-separated hex pairs. Length and alphabet are
//! checked strictly against the requested byte count.

use super::http::HttpFetcher;
use crate::config::{HttpConfig, RandomOrgConfig};
use crate::error::SourceError;
use crate::hex_string::HexString;
use crate::source::{RandomnessSource, SourceCategory, SourceInfo};

static RANDOM_ORG_INFO: SourceInfo = SourceInfo {
    name: "Random.org",
    description: "Random.org true random bytes",
    origin: "Atmospheric radio noise sampled by receivers tuned between stations.",
    category: SourceCategory::Commercial,
    output_bits: 256,
};

pub struct RandomOrgSource {
    url: String,
    nbytes: usize,
    fetcher: HttpFetcher,
}

impl RandomOrgSource {
    pub fn new(config: &RandomOrgConfig, http: &HttpConfig) -> Self {
        Self {
            url: format!("{}?nbytes={}&format=h", config.base_url, config.nbytes),
            nbytes: config.nbytes,
            fetcher: HttpFetcher::new(RANDOM_ORG_INFO.name, http.timeout()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Validate a `randbyte` body: exactly `nbytes` bytes of hex once
/// whitespace is removed.
pub fn parse_random_org(body: &str, nbytes: usize) -> Result<HexString, SourceError> {
    let fail = |cause: String| SourceError::new(RANDOM_ORG_INFO.name, cause);
    let cleaned: String = body
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let expected = nbytes * 2;
    if cleaned.len() != expected {
        return Err(fail(format!(
            "invalid hex string length: expected {expected}, got {}",
            cleaned.len()
        )));
    }
    HexString::parse(cleaned).map_err(|e| fail(format!("invalid hex string format: {e}")))
}

impl RandomnessSource for RandomOrgSource {
    fn info(&self) -> &SourceInfo {
        &RANDOM_ORG_INFO
    }

    fn generate(&self) -> Result<HexString, SourceError> {
        let body = self.fetcher.get_text(&self.url)?;
        parse_random_org(&body, self.nbytes)
    }
}
