use serde::{Deserialize, Serialize};

use signifier_core::models::{ComparisonOperator, ScalarValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    ComparisonFailed,
    MissingProperty,
    CoercionFailed,
    UnparseableCondition,
}

/// One failed declared condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub kind: ViolationKind,
    pub artifact: String,
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<ScalarValue>,
    pub message: String,
}

impl Violation {
    pub(crate) fn comparison(
        artifact: &str,
        property: &str,
        operator: &ComparisonOperator,
        threshold: &ScalarValue,
        actual: &ScalarValue,
    ) -> Self {
        Self {
            kind: ViolationKind::ComparisonFailed,
            artifact: artifact.to_string(),
            property: property.to_string(),
            operator: Some(operator.to_string()),
            threshold: Some(threshold.clone()),
            actual: Some(actual.clone()),
            message: format!(
                "expected value to be {} {threshold}, but got {actual}",
                operator.phrase()
            ),
        }
    }

    pub(crate) fn coercion(
        artifact: &str,
        property: &str,
        operator: &ComparisonOperator,
        threshold: &ScalarValue,
        actual: &ScalarValue,
    ) -> Self {
        Self {
            kind: ViolationKind::CoercionFailed,
            artifact: artifact.to_string(),
            property: property.to_string(),
            operator: Some(operator.to_string()),
            threshold: Some(threshold.clone()),
            actual: Some(actual.clone()),
            message: format!(
                "cannot compare {} value {actual} {} {} threshold {threshold}",
                actual.kind_name(),
                operator.phrase(),
                threshold.kind_name()
            ),
        }
    }

    pub(crate) fn missing(artifact: &str, property: &str) -> Self {
        Self {
            kind: ViolationKind::MissingProperty,
            artifact: artifact.to_string(),
            property: property.to_string(),
            operator: None,
            threshold: None,
            actual: None,
            message: format!("property {artifact}::{property} is not present in the environment"),
        }
    }

    pub(crate) fn unparseable(artifact: &str, property: &str, reason: &str) -> Self {
        Self {
            kind: ViolationKind::UnparseableCondition,
            artifact: artifact.to_string(),
            property: property.to_string(),
            operator: None,
            threshold: None,
            actual: None,
            message: format!("unparseable condition: {reason}"),
        }
    }
}
