//! Randomness source trait and metadata.
//!
//! Every provider implements [`RandomnessSource`], which exposes metadata via
//! [`SourceInfo`] and a single `generate` call returning validated hex.

use crate::error::SourceError;
use crate::hex_string::HexString;

/// Category of randomness provider based on where the bits come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    /// Quantum hardware behind an HTTP API (photon, vacuum, detector noise).
    Quantum,
    /// Public randomness beacon publishing timestamped pulses.
    Beacon,
    /// Commercial randomness service.
    Commercial,
    /// The local operating system CSPRNG.
    Local,
}

impl std::fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quantum => write!(f, "quantum"),
            Self::Beacon => write!(f, "beacon"),
            Self::Commercial => write!(f, "commercial"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Metadata about a randomness source.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// Display name, also used in status reports (e.g. `"NIST"`).
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// Where the randomness physically originates.
    pub origin: &'static str,
    pub category: SourceCategory,
    /// Nominal output size of one `generate` call, in bits.
    pub output_bits: usize,
}

/// Trait that every randomness provider must implement.
///
/// `generate` issues exactly one outbound request (or one CSPRNG call) and
/// either returns well-formed hex or fails with a [`SourceError`]. Adapters
/// never retry and never swallow errors.
pub trait RandomnessSource: Send + Sync {
    /// Source metadata.
    fn info(&self) -> &SourceInfo;

    /// Produce one batch of randomness.
    fn generate(&self) -> Result<HexString, SourceError>;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Build a [`SourceError`] attributed to this source.
    fn fail(&self, cause: impl Into<String>) -> SourceError
    where
        Self: Sized,
    {
        SourceError::new(self.name(), cause)
    }
}

/// Snapshot of source metadata for listing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SourceInfoSnapshot {
    pub name: String,
    pub description: String,
    pub origin: String,
    pub category: String,
    pub output_bits: usize,
}

impl From<&SourceInfo> for SourceInfoSnapshot {
    fn from(info: &SourceInfo) -> Self {
        Self {
            name: info.name.to_string(),
            description: info.description.to_string(),
            origin: info.origin.to_string(),
            category: info.category.to_string(),
            output_bits: info.output_bits,
        }
    }
}
