//! Argument validation.
//!
//! Raw JSON arguments are checked against a tool's schema and
//! turned into an [`ArgumentBundle`] of typed values. Validation is
//! fail-fast: fields are visited in declaration order and the first
//! violation is returned. Unknown fields are then examined, in sorted
//! key order, only when the validator is configured to reject them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::descriptor::ToolDescriptor;
use super::error::{ArgumentError, HandlerError};
use super::schema::{ArgKind, Bound, FieldSpec};

/// What to do with arguments the schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    #[default]
    Ignore,
    Reject,
}

/// A validated argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    StringArray(Vec<String>),
}

impl ArgValue {
    fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::from(s.as_str()),
            Self::Integer(i) => Value::from(*i),
            Self::Number(n) => Value::from(*n),
            Self::Boolean(b) => Value::from(*b),
            Self::StringArray(items) => Value::from(items.clone()),
        }
    }
}

/// Typed, validated arguments for one tool call.
///
/// Only [`ArgumentValidator::validate`] produces bundles, so every required
/// field is present and every value matches its declared kind and bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentBundle {
    values: BTreeMap<String, ArgValue>,
}

impl ArgumentBundle {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn string_array(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(ArgValue::StringArray(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Deserialize the bundle into a tool's typed parameter struct.
    pub fn into_params<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        let object: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Ok(serde_json::from_value(Value::Object(object))?)
    }
}

/// Validates raw arguments against tool schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentValidator {
    unknown_fields: UnknownFieldPolicy,
}

impl ArgumentValidator {
    pub fn new(unknown_fields: UnknownFieldPolicy) -> Self {
        Self { unknown_fields }
    }

    /// A validator that rejects undeclared arguments.
    pub fn strict() -> Self {
        Self::new(UnknownFieldPolicy::Reject)
    }

    /// Check `raw` against the descriptor's schema.
    ///
    /// `null` is accepted as "no arguments".
    pub fn validate(
        &self,
        descriptor: &ToolDescriptor,
        raw: &Value,
    ) -> Result<ArgumentBundle, ArgumentError> {
        let empty = Map::new();
        let args = match raw {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => return Err(ArgumentError::NotAnObject(json_type_name(other))),
        };

        let schema = descriptor.schema();
        let mut values = BTreeMap::new();

        for spec in schema.fields() {
            let supplied = args.get(&spec.name).filter(|v| !v.is_null());
            let value = match (supplied, &spec.default) {
                (Some(value), _) => value,
                (None, Some(default)) => default,
                (None, None) if spec.required => {
                    return Err(ArgumentError::Missing(spec.name.clone()));
                }
                (None, None) => continue,
            };
            let typed = check_kind(spec, value)?;
            check_bounds(spec, &typed)?;
            values.insert(spec.name.clone(), typed);
        }

        if self.unknown_fields == UnknownFieldPolicy::Reject {
            if let Some(unknown) = args.keys().filter(|k| schema.get(k).is_none()).min() {
                return Err(ArgumentError::UnknownField(unknown.clone()));
            }
        }

        Ok(ArgumentBundle { values })
    }
}

fn check_kind(spec: &FieldSpec, value: &Value) -> Result<ArgValue, ArgumentError> {
    let typed = match spec.kind {
        ArgKind::String => value.as_str().map(|s| ArgValue::String(s.to_string())),
        ArgKind::Integer => match (value.as_i64(), value.as_u64()) {
            (Some(i), _) => Some(ArgValue::Integer(i)),
            // Integral but wider than i64: report the range, not the type.
            (None, Some(_)) => {
                return Err(ArgumentError::OutOfRange {
                    field: spec.name.clone(),
                    bound: Bound::Maximum(spec.maximum.unwrap_or(i64::MAX as f64)),
                });
            }
            (None, None) => None,
        },
        ArgKind::Number => value.as_f64().map(ArgValue::Number),
        ArgKind::Boolean => value.as_bool().map(ArgValue::Boolean),
        ArgKind::StringArray => value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(ArgValue::StringArray)
        }),
    };

    typed.ok_or_else(|| ArgumentError::TypeMismatch {
        field: spec.name.clone(),
        expected: spec.kind,
    })
}

fn check_bounds(spec: &FieldSpec, value: &ArgValue) -> Result<(), ArgumentError> {
    let out_of_range = |bound| ArgumentError::OutOfRange {
        field: spec.name.clone(),
        bound,
    };

    let numeric = match value {
        ArgValue::Integer(i) => Some(*i as f64),
        ArgValue::Number(n) => Some(*n),
        _ => None,
    };
    if let Some(n) = numeric {
        if let Some(min) = spec.minimum.filter(|min| n < *min) {
            return Err(out_of_range(Bound::Minimum(min)));
        }
        if let Some(max) = spec.maximum.filter(|max| n > *max) {
            return Err(out_of_range(Bound::Maximum(max)));
        }
    }

    if let ArgValue::StringArray(items) = value {
        if let Some(min) = spec.min_items.filter(|min| items.len() < *min) {
            return Err(out_of_range(Bound::MinItems(min)));
        }
        if let Some(max) = spec.max_items.filter(|max| items.len() > *max) {
            return Err(out_of_range(Bound::MaxItems(max)));
        }
    }

    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::ArgumentSchema;
    use serde::Deserialize;
    use serde_json::json;

    fn ideas_descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "ideas",
            "Generate ideas",
            ArgumentSchema::new()
                .field(FieldSpec::string("secteur").required())
                .field(FieldSpec::string("plateforme").required())
                .field(FieldSpec::integer("nombre").range(1, 10).default_value(5)),
        )
    }

    fn calendar_descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "calendar",
            "Plan a week",
            ArgumentSchema::new()
                .field(FieldSpec::string_array("plateformes").required().min_items(1).max_items(3)),
        )
    }

    #[test]
    fn test_valid_arguments_with_default() {
        let bundle = ArgumentValidator::default()
            .validate(
                &ideas_descriptor(),
                &json!({ "secteur": "tech", "plateforme": "LinkedIn" }),
            )
            .unwrap();

        assert_eq!(bundle.str("secteur"), Some("tech"));
        assert_eq!(bundle.str("plateforme"), Some("LinkedIn"));
        assert_eq!(bundle.integer("nombre"), Some(5));
        assert_eq!(bundle.len(), 3);
    }

    #[test]
    fn test_missing_required_names_that_field() {
        let validator = ArgumentValidator::default();
        let descriptor = ideas_descriptor();

        let err = validator
            .validate(&descriptor, &json!({ "plateforme": "TikTok" }))
            .unwrap_err();
        assert_eq!(err, ArgumentError::Missing("secteur".into()));

        let err = validator
            .validate(&descriptor, &json!({ "secteur": "mode" }))
            .unwrap_err();
        assert_eq!(err, ArgumentError::Missing("plateforme".into()));
    }

    #[test]
    fn test_integer_wider_than_i64_is_out_of_range() {
        let err = ArgumentValidator::default()
            .validate(
                &ideas_descriptor(),
                &json!({ "secteur": "tech", "plateforme": "x", "nombre": u64::MAX }),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ArgumentError::OutOfRange {
                field: "nombre".into(),
                bound: Bound::Maximum(10.0),
            }
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let err = ArgumentValidator::default()
            .validate(
                &ideas_descriptor(),
                &json!({ "secteur": null, "plateforme": "TikTok" }),
            )
            .unwrap_err();
        assert_eq!(err, ArgumentError::Missing("secteur".into()));
    }

    #[test]
    fn test_first_violation_in_declaration_order() {
        // Both fields are wrong; the first declared one is reported.
        let err = ArgumentValidator::default()
            .validate(&ideas_descriptor(), &json!({ "secteur": 3, "nombre": 99 }))
            .unwrap_err();
        assert_eq!(
            err,
            ArgumentError::TypeMismatch {
                field: "secteur".into(),
                expected: ArgKind::String,
            }
        );
    }

    #[test]
    fn test_integer_type_mismatch() {
        let validator = ArgumentValidator::default();
        let descriptor = ideas_descriptor();

        for bad in [json!("5"), json!(2.5), json!([5])] {
            let err = validator
                .validate(
                    &descriptor,
                    &json!({ "secteur": "tech", "plateforme": "x", "nombre": bad }),
                )
                .unwrap_err();
            assert_eq!(
                err,
                ArgumentError::TypeMismatch {
                    field: "nombre".into(),
                    expected: ArgKind::Integer,
                }
            );
        }
    }

    #[test]
    fn test_numeric_bounds() {
        let validator = ArgumentValidator::default();
        let descriptor = ideas_descriptor();

        let err = validator
            .validate(
                &descriptor,
                &json!({ "secteur": "tech", "plateforme": "x", "nombre": 0 }),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ArgumentError::OutOfRange {
                field: "nombre".into(),
                bound: Bound::Minimum(1.0),
            }
        );

        let err = validator
            .validate(
                &descriptor,
                &json!({ "secteur": "tech", "plateforme": "x", "nombre": 11 }),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ArgumentError::OutOfRange {
                field: "nombre".into(),
                bound: Bound::Maximum(10.0),
            }
        );

        let bundle = validator
            .validate(
                &descriptor,
                &json!({ "secteur": "tech", "plateforme": "x", "nombre": 10 }),
            )
            .unwrap();
        assert_eq!(bundle.integer("nombre"), Some(10));
    }

    #[test]
    fn test_string_array_checks() {
        let validator = ArgumentValidator::default();
        let descriptor = calendar_descriptor();

        let err = validator
            .validate(&descriptor, &json!({ "plateformes": ["Instagram", 4] }))
            .unwrap_err();
        assert!(matches!(err, ArgumentError::TypeMismatch { .. }));

        let err = validator
            .validate(&descriptor, &json!({ "plateformes": [] }))
            .unwrap_err();
        assert_eq!(
            err,
            ArgumentError::OutOfRange {
                field: "plateformes".into(),
                bound: Bound::MinItems(1),
            }
        );

        let err = validator
            .validate(&descriptor, &json!({ "plateformes": ["a", "b", "c", "d"] }))
            .unwrap_err();
        assert!(matches!(
            err,
            ArgumentError::OutOfRange {
                bound: Bound::MaxItems(3),
                ..
            }
        ));

        let bundle = validator
            .validate(&descriptor, &json!({ "plateformes": ["Instagram", "TikTok"] }))
            .unwrap();
        assert_eq!(
            bundle.string_array("plateformes"),
            Some(&["Instagram".to_string(), "TikTok".to_string()][..])
        );
    }

    #[test]
    fn test_unknown_fields_policy() {
        let raw = json!({ "secteur": "tech", "plateforme": "x", "zzz": 1, "extra": true });

        let bundle = ArgumentValidator::default()
            .validate(&ideas_descriptor(), &raw)
            .unwrap();
        assert!(bundle.get("extra").is_none());

        let err = ArgumentValidator::strict()
            .validate(&ideas_descriptor(), &raw)
            .unwrap_err();
        assert_eq!(err, ArgumentError::UnknownField("extra".into()));
    }

    #[test]
    fn test_non_object_arguments() {
        let validator = ArgumentValidator::default();
        let err = validator
            .validate(&ideas_descriptor(), &json!(["tech"]))
            .unwrap_err();
        assert_eq!(err, ArgumentError::NotAnObject("array"));

        let descriptor = ToolDescriptor::new("noop", "No arguments", ArgumentSchema::new());
        assert!(validator.validate(&descriptor, &Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let validator = ArgumentValidator::default();
        let descriptor = ideas_descriptor();
        let raw = json!({ "secteur": "tech", "plateforme": "x", "nombre": 3 });

        let first = validator.validate(&descriptor, &raw).unwrap();
        let second = validator.validate(&descriptor, &raw).unwrap();
        assert_eq!(first, second);

        let bad = json!({ "nombre": 3 });
        assert_eq!(
            validator.validate(&descriptor, &bad).unwrap_err(),
            validator.validate(&descriptor, &bad).unwrap_err()
        );
    }

    #[test]
    fn test_into_params() {
        #[derive(Deserialize)]
        struct Params {
            secteur: String,
            nombre: u8,
        }

        let bundle = ArgumentValidator::default()
            .validate(
                &ideas_descriptor(),
                &json!({ "secteur": "mode", "plateforme": "Instagram", "nombre": 2 }),
            )
            .unwrap();
        let params: Params = bundle.into_params().unwrap();
        assert_eq!(params.secteur, "mode");
        assert_eq!(params.nombre, 2);
    }
}
