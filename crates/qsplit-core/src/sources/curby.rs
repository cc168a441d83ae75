//! CURBy distributed randomness beacon (University of Colorado).
//!
//! The endpoint serves the latest round's randomness as raw bytes; they are
//! hex-encoded locally.

use super::http::HttpFetcher;
use crate::config::{CurbyConfig, HttpConfig};
use crate::error::SourceError;
use crate::hex_string::HexString;
use crate::source::{RandomnessSource, SourceCategory, SourceInfo};

static CURBY_INFO: SourceInfo = SourceInfo {
    name: "CURBy",
    description: "CURBy quantum entanglement beacon, latest round",
    origin: "Loophole-free Bell test on entangled photon pairs, distributed \
             through a multi-party beacon protocol.",
    category: SourceCategory::Quantum,
    output_bits: 512,
};

pub struct CurbySource {
    url: String,
    fetcher: HttpFetcher,
}

impl CurbySource {
    pub fn new(config: &CurbyConfig, http: &HttpConfig) -> Self {
        Self {
            url: config.base_url.clone(),
            fetcher: HttpFetcher::new(CURBY_INFO.name, http.timeout()),
        }
    }
}

/// Encode a round's raw randomness bytes.
pub fn encode_curby(bytes: &[u8]) -> Result<HexString, SourceError> {
    if bytes.is_empty() {
        return Err(SourceError::new(
            CURBY_INFO.name,
            "no randomness available from CURBy",
        ));
    }
    HexString::from_bytes(bytes)
        .map_err(|e| SourceError::new(CURBY_INFO.name, format!("malformed hex: {e}")))
}

impl RandomnessSource for CurbySource {
    fn info(&self) -> &SourceInfo {
        &CURBY_INFO
    }

    fn generate(&self) -> Result<HexString, SourceError> {
        let bytes = self.fetcher.get_bytes(&self.url)?;
        encode_curby(&bytes)
    }
}
