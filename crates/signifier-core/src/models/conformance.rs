use serde::{Deserialize, Serialize};

use super::ScalarValue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Violation,
    Warning,
    Info,
}

/// One failed shape constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeViolation {
    pub focus_node: String,
    pub result_path: String,
    pub message: String,
    pub severity: Severity,
    pub source_constraint_component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ScalarValue>,
}

/// Result of validating one candidate's shapes against a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceReport {
    pub conforms: bool,
    pub violations: Vec<ShapeViolation>,
}

impl ConformanceReport {
    pub fn conforming() -> Self {
        Self {
            conforms: true,
            violations: Vec::new(),
        }
    }

    /// Conforms when no violation has `Violation` severity.
    pub fn from_violations(violations: Vec<ShapeViolation>) -> Self {
        let conforms = !violations.iter().any(|v| v.severity == Severity::Violation);
        Self {
            conforms,
            violations,
        }
    }
}
