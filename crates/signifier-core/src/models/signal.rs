use serde::{Deserialize, Serialize};

/// Heterogeneous signal value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SignalValue {
    Numeric(f64),
    Boolean(bool),
}

impl SignalValue {
    /// The single coercion used by ranking: booleans map to 1.0 / 0.0.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Numeric(v) => *v,
            Self::Boolean(true) => 1.0,
            Self::Boolean(false) => 0.0,
        }
    }

    /// Truthiness for gate evaluation. Numeric values pass at or above
    /// `threshold`; NaN never passes.
    pub fn is_truthy(&self, threshold: f64) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Numeric(v) => *v >= threshold,
        }
    }
}

/// A named measurement attached to one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub name: String,
    pub value: SignalValue,
    /// Weight used when ranking. Stages emit 0; ranked results carry the
    /// configured weight, or this value when the signal is not configured.
    pub weight: f64,
    pub is_gate: bool,
}

impl Signal {
    pub fn numeric(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: SignalValue::Numeric(value),
            weight: 0.0,
            is_gate: false,
        }
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value: SignalValue::Boolean(value),
            weight: 0.0,
            is_gate: false,
        }
    }

    pub fn as_gate(mut self) -> Self {
        self.is_gate = true;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}
