//! Shape document model and parsing.

use regex::Regex;
use serde::Deserialize;

use signifier_core::errors::ValidationError;
use signifier_core::models::{ScalarValue, Severity};

use crate::datatype::Datatype;

/// `{ "shapes": [ ... ] }`
#[derive(Debug, Clone, Deserialize)]
pub struct ShapesDocument {
    pub shapes: Vec<NodeShape>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeShape {
    /// Artifact the shape applies to.
    pub target: String,
    #[serde(default)]
    pub properties: Vec<PropertyShape>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyShape {
    pub path: String,
    pub min_count: Option<usize>,
    pub max_count: Option<usize>,
    pub datatype: Option<String>,
    pub min_inclusive: Option<ScalarValue>,
    pub max_inclusive: Option<ScalarValue>,
    pub min_exclusive: Option<ScalarValue>,
    pub max_exclusive: Option<ScalarValue>,
    #[serde(rename = "in")]
    pub allowed: Option<Vec<ScalarValue>>,
    pub has_value: Option<ScalarValue>,
    pub pattern: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Severity,
}

/// A property shape with its datatype and pattern resolved.
#[derive(Debug, Clone)]
pub(crate) struct CompiledProperty {
    pub shape: PropertyShape,
    pub datatype: Option<Datatype>,
    pub pattern: Option<Regex>,
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledShape {
    pub target: String,
    pub properties: Vec<CompiledProperty>,
}

impl ShapesDocument {
    /// Parse from the opaque candidate payload. A JSON string payload is
    /// parsed as an embedded document.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let parsed = match value {
            serde_json::Value::String(raw) => serde_json::from_str(raw),
            other => serde_json::from_value(other.clone()),
        };
        parsed.map_err(|e| ValidationError::MalformedShapes {
            reason: e.to_string(),
        })
    }

    pub(crate) fn compile(self) -> Result<Vec<CompiledShape>, ValidationError> {
        self.shapes
            .into_iter()
            .map(|node| {
                if node.target.trim().is_empty() {
                    return Err(ValidationError::MalformedShapes {
                        reason: "shape target is empty".to_string(),
                    });
                }
                let properties = node
                    .properties
                    .into_iter()
                    .map(compile_property)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledShape {
                    target: node.target,
                    properties,
                })
            })
            .collect()
    }
}

fn compile_property(shape: PropertyShape) -> Result<CompiledProperty, ValidationError> {
    if shape.path.trim().is_empty() {
        return Err(ValidationError::MalformedShapes {
            reason: "property path is empty".to_string(),
        });
    }
    let datatype = shape.datatype.as_deref().map(Datatype::parse).transpose()?;
    let pattern = shape
        .pattern
        .as_deref()
        .map(|p| {
            Regex::new(p).map_err(|e| ValidationError::MalformedShapes {
                reason: format!("invalid pattern '{p}': {e}"),
            })
        })
        .transpose()?;
    Ok(CompiledProperty {
        shape,
        datatype,
        pattern,
    })
}
