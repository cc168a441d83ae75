//! Shared blocking HTTP transport for the network adapters.
//!
//! A fresh client is built per request so adapters can be constructed and
//! dropped from any context, including inside an async runtime.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::error::SourceError;

const USER_AGENT: &str = concat!("qsplit/", env!("CARGO_PKG_VERSION"));

/// One provider's view of the network: a name for error attribution, a
/// timeout, and any fixed request headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    source: &'static str,
    timeout: Duration,
    headers: Vec<(&'static str, String)>,
}

impl HttpFetcher {
    pub fn new(source: &'static str, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    fn err(&self, cause: impl Into<String>) -> SourceError {
        SourceError::new(self.source, cause)
    }

    /// GET `url` and require a 2xx status.
    pub fn get(&self, url: &str) -> Result<Response, SourceError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| self.err(format!("http client setup failed: {e}")))?;

        let mut req = client.get(url);
        for (name, value) in &self.headers {
            req = req.header(*name, value);
        }
        let resp = req
            .send()
            .map_err(|e| self.err(format!("http error: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(self.err(format!("{} returned {status}", self.source)));
        }
        Ok(resp)
    }

    pub fn get_text(&self, url: &str) -> Result<String, SourceError> {
        self.get(url)?
            .text()
            .map_err(|e| self.err(format!("http read error: {e}")))
    }

    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        self.get(url)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| self.err(format!("http read error: {e}")))
    }
}
