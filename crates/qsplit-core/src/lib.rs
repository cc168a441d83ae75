//! # qsplit-core
//!
//! **Many beacons, one value.**
//!
//! `qsplit-core` fetches randomness from independent public providers
//! (quantum RNG services, randomness beacons, a commercial API and the local
//! OS CSPRNG), mixes whatever arrived into one 256-bit value, caches it, and
//! derives small discrete outcomes from it: option picks, numbers, coin
//! flips, I Ching hexagrams and tarot spreads.
//!
//! ## Quick Start
//!
//! ```no_run
//! use qsplit_core::{Oracle, SplitterConfig};
//!
//! let oracle = Oracle::from_config(&SplitterConfig::default());
//!
//! // One source round: every enabled provider is called concurrently.
//! let round = oracle.refresh()?;
//! println!("{}/{} sources succeeded", round.report.succeeded(), round.report.total());
//!
//! let flip = oracle.coin_flip()?;
//! println!("{}", flip.result);
//! # Ok::<(), qsplit_core::Error>(())
//! ```
//!
//! ## Architecture
//!
//! Sources → Aggregator (fan-out) → Combiner (SHA-256) → Store → Derivers
//!
//! Every provider implements [`RandomnessSource`]. The [`Aggregator`] calls
//! them in parallel and isolates failures; a round fails only when every
//! source fails. Derivers never touch the network: they read the stored
//! value and expand it into a [`SeedStream`].

pub mod aggregator;
pub mod clock;
pub mod combiner;
pub mod config;
pub mod derive;
pub mod error;
pub mod hex_string;
pub mod oracle;
pub mod source;
pub mod sources;
pub mod status;
pub mod store;

pub use aggregator::{Aggregator, RoundOutcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use combiner::combine;
pub use config::{ConfigError, SplitterConfig};
pub use derive::iching::{Hexagram, Line, LineType, cast_hexagram};
pub use derive::tarot::{DrawnCard, Orientation, TarotCard, draw_spread};
pub use derive::{Coin, SeedSource, SeedStream, coin_flip, map_range, select, select_index};
pub use error::{Error, Result, SourceError, StoreError};
pub use hex_string::HexString;
pub use oracle::{Choice, CoinFlip, EightBall, IChingReading, Number, Oracle, TarotReading};
pub use source::{RandomnessSource, SourceCategory, SourceInfo, SourceInfoSnapshot};
pub use sources::{SOURCE_NAMES, all_sources, enabled_sources};
pub use status::{SourceResult, SourceStatus, StatusReport};
pub use store::{FileStore, MemoryStore, RandomStore};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
