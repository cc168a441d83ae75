//! Fan-out/fan-in over every registered source.
//!
//! Architecture:
//! 1. Call every source's `generate` on its own scoped thread
//! 2. Time each call and capture success or failure per source
//! 3. A panicking adapter counts as a failure, not a crashed round
//! 4. Keep results in registration order, whatever order they finish in
//! 5. Persist the status report, then (only if anything succeeded) the
//!    combined value
//!
//! Partial failure is normal. A round fails only when every source fails.

use std::sync::Arc;
use std::time::Instant;

use crate::clock::{Clock, SystemClock};
use crate::combiner::combine;
use crate::error::{Error, Result, SourceError};
use crate::source::{RandomnessSource, SourceInfoSnapshot};
use crate::status::{SourceResult, StatusReport};
use crate::store::{self, RandomStore};

/// Result of a successful round.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// The new combined value, already persisted.
    pub combined: String,
    pub report: StatusReport,
}

/// Runs source rounds against a fixed, ordered list of adapters.
pub struct Aggregator {
    sources: Vec<Box<dyn RandomnessSource>>,
    clock: Arc<dyn Clock>,
}

impl Aggregator {
    /// Create an aggregator with no sources and the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sources: Vec::new(),
            clock,
        }
    }

    /// Create an aggregator over `sources`, in the given order.
    pub fn from_sources(sources: Vec<Box<dyn RandomnessSource>>, clock: Arc<dyn Clock>) -> Self {
        Self { sources, clock }
    }

    /// Register a source after the existing ones.
    pub fn add_source(&mut self, source: Box<dyn RandomnessSource>) {
        self.sources.push(source);
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn source_infos(&self) -> Vec<SourceInfoSnapshot> {
        self.sources
            .iter()
            .map(|s| SourceInfoSnapshot::from(s.info()))
            .collect()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Call every source concurrently. The returned vector is in
    /// registration order.
    pub fn collect_all(&self) -> Vec<SourceResult> {
        std::thread::scope(|s| {
            let handles: Vec<_> = self
                .sources
                .iter()
                .map(|source| s.spawn(move || self.collect_one(source.as_ref())))
                .collect();

            handles
                .into_iter()
                .zip(&self.sources)
                .map(|(handle, source)| {
                    handle.join().unwrap_or_else(|_| SourceResult {
                        source_name: source.name().to_string(),
                        outcome: Err(SourceError::new(source.name(), "collector thread panicked")),
                        started_at: self.clock.now(),
                        duration_ms: 0,
                    })
                })
                .collect()
        })
    }

    fn collect_one(&self, source: &dyn RandomnessSource) -> SourceResult {
        let started_at = self.clock.now();
        let t0 = Instant::now();
        let outcome = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            source.generate()
        })) {
            Ok(outcome) => outcome,
            Err(_) => Err(SourceError::new(source.name(), "adapter panicked")),
        };
        let duration_ms = t0.elapsed().as_millis() as u64;

        match &outcome {
            Ok(hex) => log::debug!(
                "{}: {} bytes in {duration_ms}ms",
                source.name(),
                hex.byte_len()
            ),
            Err(e) => log::warn!("{e} ({duration_ms}ms)"),
        }

        SourceResult {
            source_name: source.name().to_string(),
            outcome,
            started_at,
            duration_ms,
        }
    }

    /// One full round: collect, report, mix, persist.
    ///
    /// The status report is written whatever happens. The combined value is
    /// written only when at least one source succeeded; otherwise the round
    /// fails with [`Error::AllSourcesFailed`] and the previous value stays.
    pub fn run_round(&self, store: &dyn RandomStore) -> Result<RoundOutcome> {
        let round_id = uuid::Uuid::new_v4().to_string();
        let started_at = self.clock.now();
        let results = self.collect_all();

        let report = StatusReport::new(round_id, started_at, &results);
        store::save_status(store, &report)?;

        let successes: Vec<&str> = results
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|h| h.as_str()))
            .collect();

        if successes.is_empty() {
            let messages: Vec<String> = results
                .iter()
                .filter_map(|r| r.outcome.as_ref().err().map(|e| e.to_string()))
                .collect();
            let joined = if messages.is_empty() {
                "no sources registered".to_string()
            } else {
                messages.join("; ")
            };
            log::error!("round {} failed: {joined}", report.round_id);
            return Err(Error::AllSourcesFailed(joined));
        }

        let combined = combine(&successes, self.clock.now_millis())?;
        store::save_combined(store, &combined)?;

        log::info!(
            "round {}: {}/{} sources succeeded",
            report.round_id,
            report.succeeded(),
            report.total()
        );
        Ok(RoundOutcome { combined, report })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::hex_string::HexString;
    use crate::source::{SourceCategory, SourceInfo};
    use crate::store::{COMBINED_KEY, MemoryStore, load_combined, load_status};
    use std::time::Duration;

    // -----------------------------------------------------------------------
    // Mock sources
    // -----------------------------------------------------------------------

    fn mock_info(name: &'static str) -> SourceInfo {
        SourceInfo {
            name,
            description: "mock source",
            origin: "deterministic test data",
            category: SourceCategory::Local,
            output_bits: 16,
        }
    }

    /// Returns a fixed hex value after an optional delay.
    struct FixedSource {
        info: SourceInfo,
        hex: &'static str,
        delay: Duration,
    }

    impl FixedSource {
        fn new(name: &'static str, hex: &'static str) -> Self {
            Self::delayed(name, hex, Duration::ZERO)
        }

        fn delayed(name: &'static str, hex: &'static str, delay: Duration) -> Self {
            Self {
                info: mock_info(name),
                hex,
                delay,
            }
        }
    }

    impl RandomnessSource for FixedSource {
        fn info(&self) -> &SourceInfo {
            &self.info
        }
        fn generate(&self) -> Result<HexString, SourceError> {
            std::thread::sleep(self.delay);
            HexString::parse(self.hex).map_err(|e| self.fail(e.to_string()))
        }
    }

    struct FailingSource {
        info: SourceInfo,
    }

    impl FailingSource {
        fn new(name: &'static str) -> Self {
            Self {
                info: mock_info(name),
            }
        }
    }

    impl RandomnessSource for FailingSource {
        fn info(&self) -> &SourceInfo {
            &self.info
        }
        fn generate(&self) -> Result<HexString, SourceError> {
            Err(self.fail("service unavailable"))
        }
    }

    struct PanickingSource {
        info: SourceInfo,
    }

    impl RandomnessSource for PanickingSource {
        fn info(&self) -> &SourceInfo {
            &self.info
        }
        fn generate(&self) -> Result<HexString, SourceError> {
            panic!("adapter bug")
        }
    }

    const T: i64 = 1_700_000_000_000;

    fn aggregator(sources: Vec<Box<dyn RandomnessSource>>) -> Aggregator {
        Aggregator::from_sources(sources, Arc::new(FixedClock::at_millis(T)))
    }

    // -----------------------------------------------------------------------
    // Collection
    // -----------------------------------------------------------------------

    #[test]
    fn test_empty_aggregator() {
        let agg = Aggregator::new();
        assert_eq!(agg.source_count(), 0);
        assert!(agg.collect_all().is_empty());
    }

    #[test]
    fn test_add_source_appends() {
        let mut agg = Aggregator::default();
        agg.add_source(Box::new(FixedSource::new("a", "00")));
        agg.add_source(Box::new(FailingSource::new("b")));
        assert_eq!(agg.source_names(), vec!["a", "b"]);
        assert_eq!(agg.source_infos()[1].category, "local");
    }

    #[test]
    fn test_results_follow_registration_not_completion_order() {
        let agg = aggregator(vec![
            Box::new(FixedSource::delayed("slow", "aa", Duration::from_millis(80))),
            Box::new(FixedSource::new("fast", "bb")),
        ]);
        let results = agg.collect_all();
        let names: Vec<&str> = results.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, vec!["slow", "fast"]);
    }

    #[test]
    fn test_calls_run_concurrently() {
        let agg = aggregator(vec![
            Box::new(FixedSource::delayed("a", "aa", Duration::from_millis(200))),
            Box::new(FixedSource::delayed("b", "bb", Duration::from_millis(200))),
            Box::new(FixedSource::delayed("c", "cc", Duration::from_millis(200))),
        ]);
        let t0 = Instant::now();
        agg.collect_all();
        assert!(t0.elapsed() < Duration::from_millis(550));
    }

    #[test]
    fn test_panicking_source_is_isolated() {
        let agg = aggregator(vec![
            Box::new(PanickingSource {
                info: mock_info("boom"),
            }),
            Box::new(FixedSource::new("ok", "abcd")),
        ]);
        let results = agg.collect_all();
        assert!(!results[0].is_success());
        assert_eq!(
            results[0].outcome.as_ref().unwrap_err().cause,
            "adapter panicked"
        );
        assert!(results[1].is_success());
    }

    // -----------------------------------------------------------------------
    // Rounds
    // -----------------------------------------------------------------------

    #[test]
    fn test_partial_failure_round_uses_successes() {
        let agg = aggregator(vec![
            Box::new(FixedSource::new("a", "00ff")),
            Box::new(FailingSource::new("b")),
            Box::new(FixedSource::new("c", "abcd")),
        ]);
        let store = MemoryStore::new();
        let outcome = agg.run_round(&store).unwrap();

        assert_eq!(outcome.combined, combine(&["00ff", "abcd"], T as u64).unwrap());
        assert_eq!(outcome.report.total(), 3);
        assert_eq!(outcome.report.failed(), 1);
        assert!(!outcome.report.sources[1].success);
        assert_eq!(
            outcome.report.sources[1].error.as_deref(),
            Some("service unavailable")
        );
        assert_eq!(load_combined(&store).unwrap(), outcome.combined);
        assert_eq!(load_status(&store).unwrap(), Some(outcome.report));
    }

    #[test]
    fn test_combined_value_ignores_completion_order() {
        let agg = aggregator(vec![
            Box::new(FixedSource::delayed("slow", "aaaa", Duration::from_millis(80))),
            Box::new(FixedSource::new("fast", "bbbb")),
        ]);
        let store = MemoryStore::new();
        let outcome = agg.run_round(&store).unwrap();

        assert_eq!(outcome.combined, combine(&["aaaa", "bbbb"], T as u64).unwrap());
        assert_ne!(outcome.combined, combine(&["bbbb", "aaaa"], T as u64).unwrap());
        assert_eq!(outcome.report.sources[0].name, "slow");
    }

    #[test]
    fn test_single_success_is_stored_unchanged() {
        let agg = aggregator(vec![
            Box::new(FailingSource::new("a")),
            Box::new(FixedSource::new("b", "0123456789abcdef")),
        ]);
        let store = MemoryStore::new();
        let outcome = agg.run_round(&store).unwrap();
        assert_eq!(outcome.combined, "0123456789abcdef");
    }

    #[test]
    fn test_all_failed_round_keeps_previous_value() {
        let store = MemoryStore::new();
        store.put(COMBINED_KEY, "feedface").unwrap();

        let agg = aggregator(vec![
            Box::new(FailingSource::new("a")),
            Box::new(FailingSource::new("b")),
        ]);
        match agg.run_round(&store) {
            Err(Error::AllSourcesFailed(msg)) => {
                assert_eq!(msg, "a: service unavailable; b: service unavailable");
            }
            other => panic!("expected AllSourcesFailed, got {other:?}"),
        }
        assert_eq!(load_combined(&store).unwrap(), "feedface");

        let report = load_status(&store).unwrap().unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded(), 0);
    }

    #[test]
    fn test_all_failed_round_on_fresh_store_stays_uninitialized() {
        let store = MemoryStore::new();
        let agg = aggregator(vec![Box::new(FailingSource::new("a"))]);
        assert!(agg.run_round(&store).is_err());
        assert!(matches!(load_combined(&store), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_round_with_no_sources_fails() {
        let store = MemoryStore::new();
        let agg = aggregator(Vec::new());
        assert!(matches!(
            agg.run_round(&store),
            Err(Error::AllSourcesFailed(ref m)) if m == "no sources registered"
        ));
    }

    #[test]
    fn test_round_ids_are_unique() {
        let store = MemoryStore::new();
        let agg = aggregator(vec![Box::new(FixedSource::new("a", "00"))]);
        let r1 = agg.run_round(&store).unwrap().report.round_id;
        let r2 = agg.run_round(&store).unwrap().report.round_id;
        assert_ne!(r1, r2);
    }
}
