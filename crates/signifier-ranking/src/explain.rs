//! Per-signal explanation lines.

use signifier_core::models::{Signal, SignalValue};

/// Render one signal:
/// - numeric: `intent_similarity: 0.8300 (weight: 0.7)`
/// - boolean: `subsumption_pass: PASS (weight: 0.1)`
/// - gate: `constraint_conforms: FAIL (gate)`
pub fn explain_signal(signal: &Signal, weight: f64, gate_pass_threshold: f64) -> String {
    if signal.is_gate {
        let verdict = pass_fail(signal.value.is_truthy(gate_pass_threshold));
        return format!("{}: {verdict} (gate)", signal.name);
    }
    match signal.value {
        SignalValue::Numeric(v) => format!("{}: {v:.4} (weight: {weight})", signal.name),
        SignalValue::Boolean(b) => format!("{}: {} (weight: {weight})", signal.name, pass_fail(b)),
    }
}

fn pass_fail(pass: bool) -> &'static str {
    if pass {
        "PASS"
    } else {
        "FAIL"
    }
}
