//! Retrieval run log: query, status, latency, result count, per-stage latency.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use signifier_core::config::defaults;
use signifier_core::models::{RetrievalResponse, StageKind};

/// A single logged retrieval run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalLogEntry {
    pub request_id: Uuid,
    pub query: String,
    pub status: String,
    pub latency: Duration,
    pub result_count: usize,
    pub stage_latencies: Vec<(StageKind, f64)>,
    pub timestamp_epoch_ms: i64,
}

impl RetrievalLogEntry {
    /// Build an entry from a finished response, timestamped now.
    pub fn from_response(query: impl Into<String>, response: &RetrievalResponse) -> Self {
        Self {
            request_id: response.request_id,
            query: query.into(),
            status: response.status.label().to_string(),
            latency: Duration::from_secs_f64(response.total_elapsed_ms.max(0.0) / 1000.0),
            result_count: response.results.len(),
            stage_latencies: response
                .stages
                .iter()
                .map(|s| (s.stage, s.elapsed_ms))
                .collect(),
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn stage_latency_ms(&self, stage: StageKind) -> Option<f64> {
        self.stage_latencies
            .iter()
            .find(|(kind, _)| *kind == stage)
            .map(|(_, ms)| *ms)
    }
}

/// Bounded run log for latency analysis. Oldest entries are dropped first.
#[derive(Debug, Clone)]
pub struct RetrievalLog {
    entries: Vec<RetrievalLogEntry>,
    max_entries: usize,
}

impl Default for RetrievalLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RetrievalLog {
    pub fn new() -> Self {
        Self::with_capacity(defaults::DEFAULT_RETRIEVAL_LOG_CAPACITY)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn record(&mut self, entry: RetrievalLogEntry) {
        tracing::debug!(
            event = "retrieval_logged",
            request_id = %entry.request_id,
            status = %entry.status,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            "retrieval logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[RetrievalLogEntry] {
        &self.entries
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0 to 1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let p = p.clamp(0.0, 1.0);
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    /// Mean latency of one stage over the runs that executed it.
    pub fn avg_stage_latency_ms(&self, stage: StageKind) -> Option<f64> {
        let samples: Vec<f64> = self
            .entries
            .iter()
            .filter_map(|e| e.stage_latency_ms(stage))
            .collect();
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Number of logged runs with the given status label.
    pub fn count_with_status(&self, status: &str) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}
