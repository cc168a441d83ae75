//! Pulse-publishing randomness beacons: NIST and INMETRO.
//!
//! Both speak the Randomness Beacon 2.0 pulse format and return the
//! 512-bit `pulse.outputValue` (uppercase on the wire).

use serde::Deserialize;

use super::http::HttpFetcher;
use crate::config::{BeaconConfig, HttpConfig};
use crate::error::SourceError;
use crate::hex_string::HexString;
use crate::source::{RandomnessSource, SourceCategory, SourceInfo};

pub const NIST_PULSE_URL: &str = "https://beacon.nist.gov/beacon/2.0/pulse/last";
pub const INMETRO_PULSE_URL: &str = "https://beacon.inmetro.gov.br/beacon/2.1/pulse";

static NIST_INFO: SourceInfo = SourceInfo {
    name: "NIST",
    description: "NIST Randomness Beacon 2.0, latest pulse",
    origin: "Two commercial hardware RNGs combined and published as a signed, \
             hash-chained pulse every 60 seconds.",
    category: SourceCategory::Beacon,
    output_bits: 512,
};

static INMETRO_INFO: SourceInfo = SourceInfo {
    name: "INMETRO",
    description: "INMETRO (Brazil) randomness beacon, latest pulse",
    origin: "Quantum-optical entropy published as a Beacon 2.0 compatible \
             pulse by Brazil's national metrology institute.",
    category: SourceCategory::Beacon,
    output_bits: 512,
};

#[derive(Debug, Deserialize)]
struct Pulse {
    #[serde(rename = "outputValue")]
    output_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PulseResponse {
    pulse: Option<Pulse>,
}

/// A Beacon 2.0 pulse endpoint.
pub struct BeaconSource {
    info: &'static SourceInfo,
    url: String,
    fetcher: HttpFetcher,
}

impl BeaconSource {
    pub fn nist(config: &BeaconConfig, http: &HttpConfig) -> Self {
        Self::with_info(&NIST_INFO, NIST_PULSE_URL, config, http)
    }

    pub fn inmetro(config: &BeaconConfig, http: &HttpConfig) -> Self {
        Self::with_info(&INMETRO_INFO, INMETRO_PULSE_URL, config, http)
    }

    fn with_info(
        info: &'static SourceInfo,
        default_url: &str,
        config: &BeaconConfig,
        http: &HttpConfig,
    ) -> Self {
        Self {
            info,
            url: config
                .base_url
                .clone()
                .unwrap_or_else(|| default_url.to_string()),
            fetcher: HttpFetcher::new(info.name, http.timeout()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Extract `pulse.outputValue` from a beacon response body.
pub fn parse_pulse(source: &str, body: &str) -> Result<HexString, SourceError> {
    let fail = |cause: String| SourceError::new(source, cause);
    let resp: PulseResponse =
        serde_json::from_str(body).map_err(|e| fail(format!("invalid response format: {e}")))?;

    let value = resp
        .pulse
        .and_then(|p| p.output_value)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| fail("no outputValue in beacon response".to_string()))?;

    HexString::normalize(&value).map_err(|e| fail(format!("malformed hex: {e}")))
}

impl RandomnessSource for BeaconSource {
    fn info(&self) -> &SourceInfo {
        self.info
    }

    fn generate(&self) -> Result<HexString, SourceError> {
        let body = self.fetcher.get_text(&self.url)?;
        parse_pulse(self.info.name, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pulse_lowercases_output_value() {
        let body = r#"{"pulse":{"uri":"x","version":"2.0","pulseIndex":7,
                       "outputValue":"A1B2C3D4E5F60718"}}"#;
        assert_eq!(
            parse_pulse("NIST", body).unwrap().as_str(),
            "a1b2c3d4e5f60718"
        );
    }

    #[test]
    fn parse_pulse_missing_field_is_source_error() {
        let err = parse_pulse("INMETRO", r#"{"pulse":{}}"#).unwrap_err();
        assert_eq!(err.source_name, "INMETRO");
        assert!(err.cause.contains("outputValue"));
    }

    #[test]
    fn parse_pulse_missing_pulse_is_source_error() {
        assert!(parse_pulse("NIST", r#"{"status":"ok"}"#).is_err());
    }

    #[test]
    fn parse_pulse_rejects_non_json() {
        let err = parse_pulse("NIST", "<html>maintenance</html>").unwrap_err();
        assert!(err.cause.starts_with("invalid response format"));
    }

    #[test]
    fn parse_pulse_rejects_odd_hex() {
        let err = parse_pulse("NIST", r#"{"pulse":{"outputValue":"ABC"}}"#).unwrap_err();
        assert!(err.cause.contains("odd hex length"));
    }

    #[test]
    fn constructors_use_public_endpoints_by_default() {
        let http = HttpConfig::default();
        assert_eq!(
            BeaconSource::nist(&BeaconConfig::default(), &http).url(),
            NIST_PULSE_URL
        );
        let custom = BeaconConfig {
            base_url: Some("http://localhost:8080/pulse".to_string()),
        };
        let inmetro = BeaconSource::inmetro(&custom, &http);
        assert_eq!(inmetro.url(), "http://localhost:8080/pulse");
        assert_eq!(inmetro.name(), "INMETRO");
    }
}
