//! Datatype hints accepted by property shapes.

use signifier_core::errors::ValidationError;
use signifier_core::models::ScalarValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    Integer,
    Decimal,
    String,
    Boolean,
}

impl Datatype {
    /// Parse a datatype name, with or without an `xsd:` prefix.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim();
        let local = name
            .strip_prefix("xsd:")
            .or_else(|| name.strip_prefix("http://www.w3.org/2001/XMLSchema#"))
            .unwrap_or(name);
        match local.to_ascii_lowercase().as_str() {
            "integer" | "int" | "long" | "short" => Ok(Self::Integer),
            "decimal" | "double" | "float" | "number" => Ok(Self::Decimal),
            "string" => Ok(Self::String),
            "boolean" | "bool" => Ok(Self::Boolean),
            _ => Err(ValidationError::UnsupportedDatatype {
                datatype: raw.to_string(),
            }),
        }
    }

    pub fn matches(&self, value: &ScalarValue) -> bool {
        match (self, value) {
            (Self::Integer, ScalarValue::Number(n)) => n.is_finite() && n.fract() == 0.0,
            (Self::Decimal, ScalarValue::Number(n)) => n.is_finite(),
            (Self::String, ScalarValue::Text(_)) => true,
            (Self::Boolean, ScalarValue::Boolean(_)) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "xsd:integer",
            Self::Decimal => "xsd:decimal",
            Self::String => "xsd:string",
            Self::Boolean => "xsd:boolean",
        }
    }
}
