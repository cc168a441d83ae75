//! ANU Quantum Random Numbers API.
//!
//! Requests `length` hex16 blocks of `size` bytes each and concatenates them
//! in the order returned.

use serde::Deserialize;

use super::http::HttpFetcher;
use crate::config::{AnuConfig, HttpConfig};
use crate::error::SourceError;
use crate::hex_string::HexString;
use crate::source::{RandomnessSource, SourceCategory, SourceInfo};

static ANU_INFO: SourceInfo = SourceInfo {
    name: "ANU",
    description: "ANU quantum vacuum fluctuation QRNG (hex16 blocks)",
    origin: "Homodyne measurement of vacuum-state electromagnetic field \
             fluctuations at the Australian National University.",
    category: SourceCategory::Quantum,
    output_bits: 1024 * 10 * 8,
};

#[derive(Debug, Deserialize)]
struct AnuResponse {
    data: Option<Vec<String>>,
    success: Option<bool>,
    message: Option<String>,
}

pub struct AnuSource {
    url: String,
    api_key: Option<String>,
    fetcher: HttpFetcher,
}

impl AnuSource {
    pub fn new(config: &AnuConfig, http: &HttpConfig) -> Self {
        let sep = if config.base_url.contains('?') { '&' } else { '?' };
        Self {
            url: format!(
                "{}{sep}length={}&type=hex16&size={}",
                config.base_url, config.length, config.size
            ),
            api_key: config.resolved_api_key(),
            fetcher: HttpFetcher::new(ANU_INFO.name, http.timeout()),
        }
    }

    /// Request URL, including query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Concatenate the hex16 blocks of an ANU response body.
pub fn parse_anu(body: &str) -> Result<HexString, SourceError> {
    let fail = |cause: String| SourceError::new(ANU_INFO.name, cause);
    let resp: AnuResponse =
        serde_json::from_str(body).map_err(|e| fail(format!("invalid response format: {e}")))?;

    if resp.success == Some(false) {
        let msg = resp.message.unwrap_or_else(|| "no message".to_string());
        return Err(fail(format!("API reported failure: {msg}")));
    }
    let blocks = resp
        .data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| fail("missing data array".to_string()))?;

    HexString::normalize(&blocks.concat()).map_err(|e| fail(format!("malformed hex: {e}")))
}

impl RandomnessSource for AnuSource {
    fn info(&self) -> &SourceInfo {
        &ANU_INFO
    }

    fn generate(&self) -> Result<HexString, SourceError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| self.fail("no API key configured"))?;
        let body = self
            .fetcher
            .clone()
            .with_header("x-api-key", key)
            .get_text(&self.url)?;
        parse_anu(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_concatenates_blocks_in_order() {
        let body = r#"{"success":true,"type":"hex16","length":3,
                       "data":["00ff","a1b2","C3D4"]}"#;
        assert_eq!(parse_anu(body).unwrap().as_str(), "00ffa1b2c3d4");
    }

    #[test]
    fn parse_rejects_missing_data() {
        let err = parse_anu(r#"{"success":true}"#).unwrap_err();
        assert_eq!(err.source_name, "ANU");
        assert!(err.cause.contains("missing data"));
    }

    #[test]
    fn parse_rejects_empty_data() {
        assert!(parse_anu(r#"{"data":[]}"#).is_err());
    }

    #[test]
    fn parse_surfaces_api_failure_message() {
        let err = parse_anu(r#"{"success":false,"message":"Limit exceeded"}"#).unwrap_err();
        assert!(err.cause.contains("Limit exceeded"));
    }

    #[test]
    fn parse_rejects_non_hex_block() {
        let err = parse_anu(r#"{"data":["00ff","zz00"]}"#).unwrap_err();
        assert!(err.cause.contains("malformed hex"));
    }

    #[test]
    fn url_carries_length_type_and_size() {
        let src = AnuSource::new(&AnuConfig::default(), &HttpConfig::default());
        assert_eq!(
            src.url(),
            "https://api.quantumnumbers.anu.edu.au/?length=1024&type=hex16&size=10"
        );
    }

    #[test]
    fn generate_without_key_fails_closed() {
        let src = AnuSource {
            url: "http://127.0.0.1:9/".to_string(),
            api_key: None,
            fetcher: HttpFetcher::new("ANU", std::time::Duration::from_secs(1)),
        };
        let err = src.generate().unwrap_err();
        assert_eq!(err.cause, "no API key configured");
    }
}
