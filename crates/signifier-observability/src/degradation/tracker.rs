//! Process-level stage health fed by non-mandatory stage failures.
//!
//! Runs only write here; nothing in a run reads it back. Health is the
//! latest outcome per stage across all requests, so a success in any run
//! recovers the stage. Failure history is a bounded ring.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use signifier_core::config::defaults::DEFAULT_DEGRADATION_HISTORY_CAPACITY;
use signifier_core::models::DegradationEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Last outcome was a failure.
    Active,
    Recovered,
}

/// Rolling health of one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageHealth {
    pub status: RecoveryStatus,
    /// Start of the current failure streak.
    pub degraded_since: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
    pub total_failures: u64,
    pub last_failure: Option<String>,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl StageHealth {
    fn failing(event: &DegradationEvent) -> Self {
        Self {
            status: RecoveryStatus::Active,
            degraded_since: Some(event.timestamp),
            consecutive_failures: 1,
            total_failures: 1,
            last_failure: Some(event.failure.clone()),
            recovered_at: None,
        }
    }

    fn fail(&mut self, event: &DegradationEvent) {
        if self.status == RecoveryStatus::Recovered {
            self.status = RecoveryStatus::Active;
            self.degraded_since = Some(event.timestamp);
            self.consecutive_failures = 0;
        }
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.total_failures += 1;
        self.last_failure = Some(event.failure.clone());
    }
}

#[derive(Debug, Clone)]
pub struct DegradationTracker {
    capacity: usize,
    history: VecDeque<DegradationEvent>,
    stages: HashMap<String, StageHealth>,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_DEGRADATION_HISTORY_CAPACITY)
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker keeping at most `capacity` failures (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            history: VecDeque::with_capacity(capacity.min(1024)),
            stages: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.stages
            .entry(event.component.clone())
            .and_modify(|health| health.fail(&event))
            .or_insert_with(|| StageHealth::failing(&event));
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }

    /// Close the failure streak of `stage`. Returns whether it was degraded.
    pub fn mark_recovered(&mut self, stage: &str) -> bool {
        let Some(health) = self.stages.get_mut(stage) else {
            return false;
        };
        if health.status != RecoveryStatus::Active {
            return false;
        }
        health.status = RecoveryStatus::Recovered;
        health.recovered_at = Some(Utc::now());
        health.degraded_since = None;
        tracing::info!(
            event = "degradation_recovered",
            stage = %stage,
            failures = health.consecutive_failures,
            "stage recovered"
        );
        health.consecutive_failures = 0;
        true
    }

    pub fn health(&self, stage: &str) -> Option<&StageHealth> {
        self.stages.get(stage)
    }

    pub fn is_degraded(&self, stage: &str) -> bool {
        self.health(stage)
            .is_some_and(|h| h.status == RecoveryStatus::Active)
    }

    /// Currently degraded stages, sorted by name.
    pub fn degraded_stages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .stages
            .iter()
            .filter(|(_, h)| h.status == RecoveryStatus::Active)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Retained failures, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &DegradationEvent> {
        self.history.iter()
    }

    /// Retained failures of `stage` in the last `window_secs` seconds.
    pub fn count_recent(&self, stage: &str, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.history
            .iter()
            .filter(|e| e.component == stage && e.timestamp > cutoff)
            .count()
    }

    pub fn count_all_recent(&self, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.history.iter().filter(|e| e.timestamp > cutoff).count()
    }

    /// Length of the current failure streak of `stage`.
    pub fn degraded_duration(&self, stage: &str) -> Option<chrono::Duration> {
        let since = self.health(stage)?.degraded_since?;
        Some(Utc::now() - since)
    }
}
