use std::cmp::Ordering;

use moka::sync::Cache;
use rayon::prelude::*;
use tracing::debug;

use signifier_core::config::ValidationConfig;
use signifier_core::errors::SignifierResult;
use signifier_core::models::{
    ConformanceReport, EnvironmentSnapshot, ScalarValue, ShapeViolation,
};
use signifier_core::traits::IConstraintValidator;

use crate::shapes::{CompiledProperty, CompiledShape, ShapesDocument};

/// Validates shape documents against a snapshot.
///
/// Optionally caches reports keyed by the hash of (snapshot, shapes).
pub struct StructuralValidator {
    config: ValidationConfig,
    cache: Option<Cache<String, ConformanceReport>>,
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl StructuralValidator {
    pub fn new(config: ValidationConfig) -> Self {
        let cache = config
            .enable_caching
            .then(|| Cache::builder().max_capacity(config.cache_size).build());
        Self { config, cache }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn cache_key(shapes: &serde_json::Value, snapshot: &EnvironmentSnapshot) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(snapshot.content_hash().as_bytes());
        hasher.update(b"\0");
        hasher.update(shapes.to_string().as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Number of cached reports (0 when caching is disabled).
    pub fn cached_reports(&self) -> u64 {
        self.cache.as_ref().map_or(0, |c| {
            c.run_pending_tasks();
            c.entry_count()
        })
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }

    /// Validate several payloads against one snapshot, in parallel when
    /// configured. Output order matches input order.
    pub fn validate_batch<'a>(
        &self,
        items: &[(&'a str, &'a serde_json::Value)],
        snapshot: &EnvironmentSnapshot,
    ) -> Vec<(&'a str, SignifierResult<ConformanceReport>)> {
        self.validate_batch_until(items, snapshot, || false)
    }

    /// As [`validate_batch`](Self::validate_batch), but no candidate is
    /// started once `stop` returns true. Skipped items are absent from the
    /// output; a report already in progress is finished.
    pub fn validate_batch_until<'a, F>(
        &self,
        items: &[(&'a str, &'a serde_json::Value)],
        snapshot: &EnvironmentSnapshot,
        stop: F,
    ) -> Vec<(&'a str, SignifierResult<ConformanceReport>)>
    where
        F: Fn() -> bool + Sync,
    {
        let check = |(id, shapes): &(&'a str, &'a serde_json::Value)| {
            (!stop()).then(|| (*id, self.validate(shapes, snapshot)))
        };
        if self.config.parallel {
            items.par_iter().filter_map(check).collect()
        } else {
            items.iter().filter_map(check).collect()
        }
    }
}

impl IConstraintValidator for StructuralValidator {
    fn name(&self) -> &str {
        "structural"
    }

    fn validate(
        &self,
        shapes: &serde_json::Value,
        snapshot: &EnvironmentSnapshot,
    ) -> SignifierResult<ConformanceReport> {
        let key = self.cache.as_ref().map(|_| Self::cache_key(shapes, snapshot));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(hit) = cache.get(key) {
                return Ok(hit);
            }
        }

        let compiled = ShapesDocument::from_value(shapes)?.compile()?;
        let violations: Vec<ShapeViolation> = compiled
            .iter()
            .flat_map(|shape| check_shape(shape, snapshot))
            .collect();
        let report = ConformanceReport::from_violations(violations);
        debug!(
            conforms = report.conforms,
            violations = report.violations.len(),
            "shapes validated"
        );

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, report.clone());
        }
        Ok(report)
    }
}

fn check_shape(shape: &CompiledShape, snapshot: &EnvironmentSnapshot) -> Vec<ShapeViolation> {
    shape
        .properties
        .iter()
        .flat_map(|property| {
            let value = snapshot.get(&shape.target, &property.shape.path);
            check_property(&shape.target, property, value)
        })
        .collect()
}

fn check_property(
    target: &str,
    property: &CompiledProperty,
    value: Option<&ScalarValue>,
) -> Vec<ShapeViolation> {
    let shape = &property.shape;
    let mut out = Vec::new();
    let mut fail = |component: &str, default_message: String, value: Option<&ScalarValue>| {
        out.push(ShapeViolation {
            focus_node: target.to_string(),
            result_path: shape.path.clone(),
            message: shape.message.clone().unwrap_or(default_message),
            severity: shape.severity,
            source_constraint_component: format!("sh:{component}ConstraintComponent"),
            value: value.cloned(),
        });
    };

    let count = usize::from(value.is_some());
    if let Some(min) = shape.min_count {
        if count < min {
            fail("MinCount", format!("expected at least {min} value(s), found {count}"), None);
        }
    }
    if let Some(max) = shape.max_count {
        if count > max {
            fail("MaxCount", format!("expected at most {max} value(s), found {count}"), value);
        }
    }

    let Some(value) = value else {
        return out;
    };

    if let Some(datatype) = property.datatype {
        if !datatype.matches(value) {
            fail(
                "Datatype",
                format!("value {value} is not of datatype {}", datatype.name()),
                Some(value),
            );
        }
    }

    let bounds: [(&str, &Option<ScalarValue>, fn(Ordering) -> bool, &str); 4] = [
        ("MinInclusive", &shape.min_inclusive, Ordering::is_ge, ">="),
        ("MaxInclusive", &shape.max_inclusive, Ordering::is_le, "<="),
        ("MinExclusive", &shape.min_exclusive, Ordering::is_gt, ">"),
        ("MaxExclusive", &shape.max_exclusive, Ordering::is_lt, "<"),
    ];
    for (component, bound, accepted, symbol) in bounds {
        let Some(bound) = bound else { continue };
        match numeric_order(value, bound) {
            Some(ord) if accepted(ord) => {}
            Some(_) => fail(
                component,
                format!("value {value} must be {symbol} {bound}"),
                Some(value),
            ),
            None => fail(
                component,
                format!("value {value} cannot be compared with {bound}"),
                Some(value),
            ),
        }
    }

    if let Some(allowed) = &shape.allowed {
        if !allowed.iter().any(|a| scalar_eq(a, value)) {
            fail("In", format!("value {value} is not an allowed value"), Some(value));
        }
    }
    if let Some(expected) = &shape.has_value {
        if !scalar_eq(expected, value) {
            fail("HasValue", format!("expected value {expected}, got {value}"), Some(value));
        }
    }
    if let Some(pattern) = &property.pattern {
        if !pattern.is_match(&value.canonical_string()) {
            fail(
                "Pattern",
                format!("value {value} does not match pattern {}", pattern.as_str()),
                Some(value),
            );
        }
    }

    out
}

fn numeric_order(value: &ScalarValue, bound: &ScalarValue) -> Option<Ordering> {
    value.coerce_number()?.partial_cmp(&bound.coerce_number()?)
}

fn scalar_eq(a: &ScalarValue, b: &ScalarValue) -> bool {
    match (a, b) {
        (ScalarValue::Number(x), ScalarValue::Number(y)) => x == y,
        _ => a == b,
    }
}
