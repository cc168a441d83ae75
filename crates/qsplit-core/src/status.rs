//! Per-round results and the persisted status report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::hex_string::HexString;

/// Outcome of one adapter call. Produced once per round per source and
/// folded into a [`StatusReport`] plus the list of successful payloads.
#[derive(Debug, Clone)]
pub struct SourceResult {
    pub source_name: String,
    pub outcome: Result<HexString, SourceError>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl SourceResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Summary entry for the status report.
    pub fn to_status(&self) -> SourceStatus {
        let (data_length, error) = match &self.outcome {
            Ok(hex) => (Some(hex.len()), None),
            Err(e) => (None, Some(e.cause.clone())),
        };
        SourceStatus {
            name: self.source_name.clone(),
            success: self.is_success(),
            timestamp: self.started_at,
            duration_ms: self.duration_ms,
            data_length,
            error,
        }
    }
}

/// Health of one source in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub name: String,
    pub success: bool,
    /// When this source's call started.
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    /// Hex characters returned. Present on success only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Snapshot of one aggregation round, written wholesale after every round.
/// Entries follow source registration order. The counts are serialised
/// alongside the entries and recomputed from them on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ReportRecord")]
pub struct StatusReport {
    pub round_id: String,
    pub started_at: DateTime<Utc>,
    succeeded: usize,
    failed: usize,
    total: usize,
    pub sources: Vec<SourceStatus>,
}

/// Stored shape; count fields, if any, are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportRecord {
    round_id: String,
    started_at: DateTime<Utc>,
    sources: Vec<SourceStatus>,
}

impl From<ReportRecord> for StatusReport {
    fn from(r: ReportRecord) -> Self {
        Self::from_statuses(r.round_id, r.started_at, r.sources)
    }
}

impl StatusReport {
    pub fn new(round_id: String, started_at: DateTime<Utc>, results: &[SourceResult]) -> Self {
        let sources = results.iter().map(SourceResult::to_status).collect();
        Self::from_statuses(round_id, started_at, sources)
    }

    pub fn from_statuses(
        round_id: String,
        started_at: DateTime<Utc>,
        sources: Vec<SourceStatus>,
    ) -> Self {
        let succeeded = sources.iter().filter(|s| s.success).count();
        Self {
            round_id,
            started_at,
            succeeded,
            failed: sources.len() - succeeded,
            total: sources.len(),
            sources,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Pretty-print the report.
    pub fn print(&self) {
        println!("\n{}", "=".repeat(60));
        println!("SOURCE ROUND {}", self.round_id);
        println!("{}", "=".repeat(60));
        println!(
            "Started: {} | Sources: {}/{} succeeded",
            self.started_at.to_rfc3339(),
            self.succeeded(),
            self.total()
        );
        println!("\n{:<12} {:>4} {:>9} {:>7}  Detail", "Source", "OK", "Time", "Hex");
        println!("{}", "-".repeat(60));
        for s in &self.sources {
            let ok = if s.success { "✓" } else { "✗" };
            let len = s.data_length.map(|n| n.to_string()).unwrap_or_default();
            println!(
                "{:<12} {:>4} {:>7}ms {:>7}  {}",
                s.name,
                ok,
                s.duration_ms,
                len,
                s.error.as_deref().unwrap_or("")
            );
        }
    }
}
