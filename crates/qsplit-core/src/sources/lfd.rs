//! LfD quantum random number API (ID Quantique hardware).

use serde::Deserialize;

use super::http::HttpFetcher;
use crate::config::{HttpConfig, LfdConfig};
use crate::error::SourceError;
use crate::hex_string::HexString;
use crate::source::{RandomnessSource, SourceCategory, SourceInfo};

static LFD_INFO: SourceInfo = SourceInfo {
    name: "LfD",
    description: "LfD Laboratorium für Datenverarbeitung QRNG, HEX format",
    origin: "ID Quantique Quantis module: single photons at a beam splitter, \
             each detection yielding one bit.",
    category: SourceCategory::Quantum,
    output_bits: 1024,
};

#[derive(Debug, Deserialize)]
struct LfdResponse {
    qrn: Option<String>,
}

pub struct LfdSource {
    url: String,
    fetcher: HttpFetcher,
}

impl LfdSource {
    pub fn new(config: &LfdConfig, http: &HttpConfig) -> Self {
        Self {
            url: format!("{}?length={}&format=HEX", config.base_url, config.length),
            fetcher: HttpFetcher::new(LFD_INFO.name, http.timeout()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Extract the `qrn` field of an LfD response body.
pub fn parse_lfd(body: &str) -> Result<HexString, SourceError> {
    let fail = |cause: String| SourceError::new(LFD_INFO.name, cause);
    let resp: LfdResponse =
        serde_json::from_str(body).map_err(|e| fail(format!("invalid response format: {e}")))?;
    let qrn = resp
        .qrn
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| fail("invalid response format: missing qrn".to_string()))?;
    HexString::normalize(&qrn).map_err(|e| fail(format!("malformed hex: {e}")))
}

impl RandomnessSource for LfdSource {
    fn info(&self) -> &SourceInfo {
        &LFD_INFO
    }

    fn generate(&self) -> Result<HexString, SourceError> {
        let body = self.fetcher.get_text(&self.url)?;
        parse_lfd(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_returns_qrn() {
        let body = r#"{"date":"2025-01-01 00:00:00","length":"4","qrn":"0A1B2C3D"}"#;
        assert_eq!(parse_lfd(body).unwrap().as_str(), "0a1b2c3d");
    }

    #[test]
    fn parse_missing_qrn_fails() {
        let err = parse_lfd(r#"{"length":"4"}"#).unwrap_err();
        assert!(err.cause.contains("missing qrn"));
    }

    #[test]
    fn url_requests_hex_format() {
        let src = LfdSource::new(&LfdConfig::default(), &HttpConfig::default());
        assert_eq!(src.url(), "https://lfdr.de/qrng_api/qrng?length=128&format=HEX");
    }
}
