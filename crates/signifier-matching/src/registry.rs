//! Versioned registry of intent matchers.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use signifier_core::config::MatchingConfig;
use signifier_core::errors::MatchingError;
use signifier_core::models::MatcherInfo;
use signifier_core::traits::IIntentMatcher;

use crate::embedding::EmbeddingMatcher;
use crate::lexical::LexicalMatcher;
use crate::providers::HashedTermProvider;

#[derive(Default)]
struct Inner {
    matchers: BTreeMap<String, Arc<dyn IIntentMatcher>>,
    default_version: Option<String>,
}

/// Thread-safe, read-mostly matcher registry.
#[derive(Default)]
pub struct MatcherRegistry {
    inner: RwLock<Inner>,
}

impl MatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `v0` and `v1` matchers, defaulting to
    /// `config.default_version`.
    pub fn with_defaults(config: &MatchingConfig) -> Result<Self, MatchingError> {
        let registry = Self::new();
        registry.register(Arc::new(LexicalMatcher::new(config.case_sensitive)));
        registry.register(Arc::new(EmbeddingMatcher::new(
            Arc::new(HashedTermProvider::new(config.embedding_dimensions)),
            config,
        )));
        registry.set_default(&config.default_version)?;
        Ok(registry)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a matcher under its version. An existing entry is replaced.
    /// The first registered matcher becomes the default.
    pub fn register(&self, matcher: Arc<dyn IIntentMatcher>) {
        let version = matcher.version().to_string();
        let mut inner = self.write();
        if inner.matchers.insert(version.clone(), matcher).is_some() {
            warn!(version = %version, "matcher version re-registered, replacing previous");
        } else {
            info!(version = %version, "matcher registered");
        }
        if inner.default_version.is_none() {
            inner.default_version = Some(version);
        }
    }

    /// Matcher for `version`, or the default when `None`.
    pub fn get(&self, version: Option<&str>) -> Result<Arc<dyn IIntentMatcher>, MatchingError> {
        let inner = self.read();
        let version = match version.or(inner.default_version.as_deref()) {
            Some(v) => v,
            None => {
                return Err(MatchingError::UnknownVersion {
                    version: "<default>".to_string(),
                    available: String::new(),
                })
            }
        };
        inner
            .matchers
            .get(version)
            .cloned()
            .ok_or_else(|| MatchingError::UnknownVersion {
                version: version.to_string(),
                available: Self::joined(&inner),
            })
    }

    pub fn set_default(&self, version: &str) -> Result<(), MatchingError> {
        let mut inner = self.write();
        if !inner.matchers.contains_key(version) {
            return Err(MatchingError::UnknownVersion {
                version: version.to_string(),
                available: Self::joined(&inner),
            });
        }
        inner.default_version = Some(version.to_string());
        Ok(())
    }

    pub fn default_version(&self) -> Option<String> {
        self.read().default_version.clone()
    }

    pub fn list_versions(&self) -> Vec<String> {
        self.read().matchers.keys().cloned().collect()
    }

    pub fn describe(&self) -> Vec<MatcherInfo> {
        self.read().matchers.values().map(|m| m.info()).collect()
    }

    pub fn contains(&self, version: &str) -> bool {
        self.read().matchers.contains_key(version)
    }

    fn joined(inner: &Inner) -> String {
        inner.matchers.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
