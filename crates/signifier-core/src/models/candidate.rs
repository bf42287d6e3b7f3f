use std::fmt;

use serde::{Deserialize, Serialize};

use super::ScalarValue;

/// Comparison operator of a declared value condition.
///
/// Parsed from its camelCase name. Unknown names are kept verbatim in
/// [`ComparisonOperator::Unrecognized`] so the subsumption filter can report
/// the condition as unparseable instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComparisonOperator {
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    Equals,
    NotEquals,
    Unrecognized(String),
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::GreaterEqual => "greaterEqual",
            Self::LessEqual => "lessEqual",
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Human phrase used in violation messages ("less than").
    pub fn phrase(&self) -> &str {
        match self {
            Self::GreaterThan => "greater than",
            Self::LessThan => "less than",
            Self::GreaterEqual => "greater than or equal to",
            Self::LessEqual => "less than or equal to",
            Self::Equals => "equal to",
            Self::NotEquals => "not equal to",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Equality operators may fall back to string comparison.
    pub fn is_equality(&self) -> bool {
        matches!(self, Self::Equals | Self::NotEquals)
    }
}

impl From<String> for ComparisonOperator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "greaterThan" => Self::GreaterThan,
            "lessThan" => Self::LessThan,
            "greaterEqual" => Self::GreaterEqual,
            "lessEqual" => Self::LessEqual,
            "equals" => Self::Equals,
            "notEquals" => Self::NotEquals,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for ComparisonOperator {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<ComparisonOperator> for String {
    fn from(op: ComparisonOperator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(operator, threshold)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueCondition {
    pub operator: ComparisonOperator,
    pub value: ScalarValue,
    /// Optional datatype hint, e.g. `xsd:integer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl ValueCondition {
    pub fn new(operator: impl Into<ComparisonOperator>, value: impl Into<ScalarValue>) -> Self {
        Self {
            operator: operator.into(),
            value: value.into(),
            datatype: None,
        }
    }
}

/// A declared applicability condition binding an artifact property to
/// one or more value conditions (all of which must hold).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredCondition {
    pub artifact: String,
    #[serde(alias = "propertyAffordance", alias = "property_affordance")]
    pub property: String,
    #[serde(default)]
    pub value_conditions: Vec<ValueCondition>,
}

impl StructuredCondition {
    pub fn new(artifact: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            property: property.into(),
            value_conditions: Vec::new(),
        }
    }

    /// Add an `(operator, threshold)` pair.
    pub fn with(
        mut self,
        operator: impl Into<ComparisonOperator>,
        value: impl Into<ScalarValue>,
    ) -> Self {
        self.value_conditions.push(ValueCondition::new(operator, value));
        self
    }
}

/// Natural language and optional structured intent description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDescription {
    pub nl_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignifierStatus {
    #[default]
    Active,
    Deprecated,
}

/// One signifier under evaluation for one request. Immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub intent: IntentDescription,
    #[serde(default)]
    pub declared_conditions: Vec<StructuredCondition>,
    /// Opaque payload handed to the constraint validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_shapes: Option<serde_json::Value>,
    #[serde(default)]
    pub status: SignifierStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affordance_uri: Option<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, nl_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            intent: IntentDescription {
                nl_text: nl_text.into(),
                structured: None,
            },
            declared_conditions: Vec::new(),
            constraint_shapes: None,
            status: SignifierStatus::Active,
            affordance_uri: None,
        }
    }

    pub fn with_condition(mut self, condition: StructuredCondition) -> Self {
        self.declared_conditions.push(condition);
        self
    }

    pub fn with_shapes(mut self, shapes: serde_json::Value) -> Self {
        self.constraint_shapes = Some(shapes);
        self
    }

    pub fn with_structured_intent(mut self, structured: serde_json::Value) -> Self {
        self.intent.structured = Some(structured);
        self
    }

    pub fn with_status(mut self, status: SignifierStatus) -> Self {
        self.status = status;
        self
    }

    /// Number of declared applicability conditions; used as a ranking tie-break.
    pub fn specificity(&self) -> usize {
        self.declared_conditions.len()
    }

    /// Whether the candidate declares constraint shapes for the validator.
    pub fn has_shapes(&self) -> bool {
        match &self.constraint_shapes {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SignifierStatus::Active
    }
}
