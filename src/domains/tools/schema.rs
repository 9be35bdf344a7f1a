//! Argument schemas for tool descriptors.
//!
//! A schema is an ordered list of [`FieldSpec`]s. The declaration order is
//! significant: the validator walks fields in this order and reports the
//! first violation it finds. Schemas are rendered to JSON Schema for the
//! `tools/list` response.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Primitive kind of a tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    String,
    Integer,
    Number,
    Boolean,
    StringArray,
}

impl ArgKind {
    /// JSON Schema `type` keyword for this kind.
    pub fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::StringArray => "array",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::String => "a string",
            Self::Integer => "an integer",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::StringArray => "an array of strings",
        };
        f.write_str(label)
    }
}

/// A declared numeric or array bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Minimum(f64),
    Maximum(f64),
    MinItems(usize),
    MaxItems(usize),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimum(min) => write!(f, "must be >= {min}"),
            Self::Maximum(max) => write!(f, "must be <= {max}"),
            Self::MinItems(n) => write!(f, "must contain at least {n} item(s)"),
            Self::MaxItems(n) => write!(f, "must contain at most {n} item(s)"),
        }
    }
}

/// Specification of a single argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: ArgKind,
    pub description: Option<String>,
    pub required: bool,
    pub default: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

impl FieldSpec {
    /// Create an optional field of the given kind.
    pub fn new(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            required: false,
            default: None,
            minimum: None,
            maximum: None,
            min_items: None,
            max_items: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Integer)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Boolean)
    }

    pub fn string_array(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::StringArray)
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a human-readable description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Value used when the caller omits the field.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Inclusive numeric range.
    pub fn range(mut self, min: impl Into<f64>, max: impl Into<f64>) -> Self {
        self.minimum = Some(min.into());
        self.maximum = Some(max.into());
        self
    }

    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Render this field as a JSON Schema property.
    fn to_json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.json_type()));
        if self.kind == ArgKind::StringArray {
            prop.insert("items".into(), json!({ "type": "string" }));
        }
        if let Some(description) = &self.description {
            prop.insert("description".into(), json!(description));
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        if let Some(min) = self.minimum {
            prop.insert("minimum".into(), schema_number(self.kind, min));
        }
        if let Some(max) = self.maximum {
            prop.insert("maximum".into(), schema_number(self.kind, max));
        }
        if let Some(n) = self.min_items {
            prop.insert("minItems".into(), json!(n));
        }
        if let Some(n) = self.max_items {
            prop.insert("maxItems".into(), json!(n));
        }
        Value::Object(prop)
    }
}

/// Integer bounds are rendered as JSON integers so clients see `10`, not `10.0`.
fn schema_number(kind: ArgKind, value: f64) -> Value {
    if kind == ArgKind::Integer && value.fract() == 0.0 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

/// Ordered set of argument specifications for one tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentSchema {
    fields: Vec<FieldSpec>,
}

impl ArgumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Declaration order is validation order.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render the schema as a JSON Schema object.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> ArgumentSchema {
        ArgumentSchema::new()
            .field(FieldSpec::string("secteur").required().describe("Le secteur"))
            .field(FieldSpec::integer("nombre").range(1, 10).default_value(5))
            .field(FieldSpec::string_array("plateformes").min_items(1))
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = sample_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["secteur"]));
        assert_eq!(schema["properties"]["secteur"]["type"], "string");
        assert_eq!(schema["properties"]["secteur"]["description"], "Le secteur");
        assert_eq!(schema["properties"]["nombre"]["minimum"], json!(1));
        assert_eq!(schema["properties"]["nombre"]["maximum"], json!(10));
        assert_eq!(schema["properties"]["nombre"]["default"], json!(5));
        assert_eq!(schema["properties"]["plateformes"]["type"], "array");
        assert_eq!(schema["properties"]["plateformes"]["items"]["type"], "string");
        assert_eq!(schema["properties"]["plateformes"]["minItems"], json!(1));
    }

    #[test]
    fn test_field_order_is_preserved() {
        let schema = sample_schema();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["secteur", "nombre", "plateformes"]);
    }

    #[test]
    fn test_bound_display() {
        assert_eq!(Bound::Maximum(10.0).to_string(), "must be <= 10");
        assert_eq!(Bound::MinItems(1).to_string(), "must contain at least 1 item(s)");
        assert_eq!(ArgKind::Integer.to_string(), "an integer");
    }
}
