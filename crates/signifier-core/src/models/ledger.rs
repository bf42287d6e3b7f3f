use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Signal;

/// Per-candidate accumulator of named signals.
///
/// Signals keep insertion order per candidate; recording a name that
/// already exists overwrites it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalLedger {
    entries: BTreeMap<String, Vec<Signal>>,
}

impl SignalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, candidate_id: &str, signal: Signal) {
        let signals = self.entries.entry(candidate_id.to_string()).or_default();
        match signals.iter_mut().find(|s| s.name == signal.name) {
            Some(existing) => *existing = signal,
            None => signals.push(signal),
        }
    }

    /// Apply a delta, returning the advanced ledger.
    pub fn merged(mut self, delta: LedgerDelta) -> Self {
        for (candidate_id, signal) in delta.entries {
            self.record(&candidate_id, signal);
        }
        self
    }

    pub fn get(&self, candidate_id: &str) -> Option<&[Signal]> {
        self.entries.get(candidate_id).map(Vec::as_slice)
    }

    pub fn signal(&self, candidate_id: &str, name: &str) -> Option<&Signal> {
        self.get(candidate_id)?.iter().find(|s| s.name == name)
    }

    /// True if the candidate has no signals recorded.
    pub fn is_empty_for(&self, candidate_id: &str) -> bool {
        self.get(candidate_id).map_or(true, <[Signal]>::is_empty)
    }

    pub fn candidate_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Signals produced by one stage, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerDelta {
    entries: Vec<(String, Signal)>,
}

impl LedgerDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, candidate_id: impl Into<String>, signal: Signal) {
        self.entries.push((candidate_id.into(), signal));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Signal)> for LedgerDelta {
    fn from_iter<T: IntoIterator<Item = (String, Signal)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
