//! Validated lowercase hex strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowercase hex encoding of `bytes`.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Lowercase hex over `[0-9a-f]`, even length, never empty.
///
/// Adapters build one through [`HexString::parse`] (or
/// [`HexString::normalize`] for providers that answer in uppercase or with
/// whitespace), so malformed payloads are rejected at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexString(String);

/// Why a string was rejected as hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexFault {
    Empty,
    OddLength(usize),
    BadChar { index: usize, ch: char },
}

impl fmt::Display for HexFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty hex string"),
            Self::OddLength(n) => write!(f, "odd hex length {n}"),
            Self::BadChar { index, ch } => {
                write!(f, "non-hex character {ch:?} at position {index}")
            }
        }
    }
}

impl HexString {
    /// Accept `s` only if it is already lowercase, even-length hex.
    pub fn parse(s: impl Into<String>) -> Result<Self, HexFault> {
        let s = s.into();
        check(&s)?;
        Ok(Self(s))
    }

    /// Strip all whitespace and lowercase before validating.
    pub fn normalize(s: &str) -> Result<Self, HexFault> {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::parse(cleaned)
    }

    /// Hex-encode raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HexFault> {
        Self::parse(encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in hex characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bytes encoded.
    pub fn byte_len(&self) -> usize {
        self.0.len() / 2
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validate `s` as lowercase, even-length, non-empty hex.
pub fn check(s: &str) -> Result<(), HexFault> {
    if s.is_empty() {
        return Err(HexFault::Empty);
    }
    if let Some((index, ch)) = s
        .char_indices()
        .find(|&(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(HexFault::BadChar { index, ch });
    }
    if s.len() % 2 != 0 {
        return Err(HexFault::OddLength(s.len()));
    }
    Ok(())
}

impl fmt::Display for HexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexString {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s).map_err(|e| e.to_string())
    }
}

impl From<HexString> for String {
    fn from(h: HexString) -> Self {
        h.0
    }
}
