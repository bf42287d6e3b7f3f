use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ScalarValue;
use crate::constants::FLAT_KEY_SEPARATOR;

/// Observed environment state: artifact → (property → scalar).
///
/// Backed by ordered maps so serialization (and therefore the content
/// hash) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentSnapshot {
    artifacts: BTreeMap<String, BTreeMap<String, ScalarValue>>,
}

impl EnvironmentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_value(
        mut self,
        artifact: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<ScalarValue>,
    ) -> Self {
        self.insert(artifact, property, value);
        self
    }

    pub fn insert(
        &mut self,
        artifact: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<ScalarValue>,
    ) {
        self.artifacts
            .entry(artifact.into())
            .or_default()
            .insert(property.into(), value.into());
    }

    /// Build from a flat map keyed by `"<artifact>::<property>"`.
    /// Keys without the separator are skipped.
    pub fn from_flat<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ScalarValue)>,
        K: AsRef<str>,
    {
        let mut snapshot = Self::new();
        for (key, value) in entries {
            let key = key.as_ref();
            match key.split_once(FLAT_KEY_SEPARATOR) {
                Some((artifact, property)) if !artifact.is_empty() && !property.is_empty() => {
                    snapshot.insert(artifact, property, value);
                }
                _ => {
                    tracing::warn!(key, "skipping flat snapshot key without artifact::property form");
                }
            }
        }
        snapshot
    }

    pub fn get(&self, artifact: &str, property: &str) -> Option<&ScalarValue> {
        self.artifacts.get(artifact)?.get(property)
    }

    pub fn properties(&self, artifact: &str) -> Option<&BTreeMap<String, ScalarValue>> {
        self.artifacts.get(artifact)
    }

    /// Flattened `((artifact, property), value)` view in key order.
    pub fn features(&self) -> impl Iterator<Item = ((&str, &str), &ScalarValue)> {
        self.artifacts.iter().flat_map(|(artifact, props)| {
            props
                .iter()
                .map(move |(property, value)| ((artifact.as_str(), property.as_str()), value))
        })
    }

    /// Number of `(artifact, property)` features.
    pub fn len(&self) -> usize {
        self.artifacts.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// blake3 hash of the canonical JSON form.
    pub fn content_hash(&self) -> String {
        let bytes = serde_json::to_vec(&self.artifacts).unwrap_or_default();
        blake3::hash(&bytes).to_hex().to_string()
    }
}
