//! Error taxonomy for the randomness pipeline.
//!
//! [`SourceError`] is the only recoverable failure: the aggregator folds it
//! into a status entry and carries on with the remaining sources. Everything
//! else surfaces to the caller as an [`Error`].

use thiserror::Error;

/// One adapter failed to produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source_name}: {cause}")]
pub struct SourceError {
    /// Provider name (e.g. `"NIST"`).
    pub source_name: String,
    /// Transport message or shape-mismatch description.
    pub cause: String,
}

impl SourceError {
    pub fn new(source_name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            cause: cause.into(),
        }
    }
}

/// Failures of the backing key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Top-level error for every pipeline operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Every registered source failed in one round. Carries the joined
    /// per-source messages.
    #[error("all randomness sources failed: {0}")]
    AllSourcesFailed(String),

    /// A value handed to the combiner is not well-formed hex.
    #[error("invalid hex string: {prefix}…")]
    InvalidHex { prefix: String },

    #[error("nothing to combine: at least one hex input is required")]
    NothingToCombine,

    #[error("invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: i64, max: i64 },

    #[error("options must be between 2 and 20 items, got {0}")]
    InvalidOptionCount(usize),

    /// The combined value has never been written.
    #[error("no randomness available - call the refresh round first")]
    NotInitialized,

    /// The yarrow-stalk cast produced a line value outside {6,7,8,9}.
    #[error("yarrow-stalk cast produced impossible line value {0}")]
    AlgorithmInvariant(u32),

    /// A 6-bit line pattern has no King Wen table entry.
    #[error("line pattern {0:#08b} is not present in the King Wen sequence")]
    UnknownHexagram(u8),

    /// The OS CSPRNG could not supply a request nonce.
    #[error("failed to draw request nonce: {0}")]
    Nonce(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
