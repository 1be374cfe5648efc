//! Generic structural validation of a JSON value against a [`Schema`].
//!
//! Every violation is collected, each with the JSON pointer where it was
//! found:
//! - S001: a required property is missing
//! - S002: a value has the wrong type
//! - S003: a property is not allowed by a closed record

use serde_json::Value;

use super::schema::{Primitive, Record, Schema};
use crate::error::Diagnostic;
use crate::parse::{escape_pointer, json_type_name};

/// Validate `value` against `schema`. Returns all errors found.
pub fn validate_structural(value: &Value, schema: &Schema) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    let mut path = String::new();
    check(value, schema, &mut path, &mut errors);
    errors
}

fn check(value: &Value, schema: &Schema, path: &mut String, errors: &mut Vec<Diagnostic>) {
    match schema {
        Schema::Type(primitive) => check_primitive(value, *primitive, path, errors),
        Schema::Elements(element) => {
            let Some(items) = value.as_array() else {
                type_mismatch("array", value, path, errors);
                return;
            };
            for (i, item) in items.iter().enumerate() {
                with_segment(path, &i.to_string(), |path| check(item, element, path, errors));
            }
        }
        Schema::Values(entry) => {
            let Some(map) = value.as_object() else {
                type_mismatch("object", value, path, errors);
                return;
            };
            for (key, item) in map {
                with_segment(path, &escape_pointer(key), |path| check(item, entry, path, errors));
            }
        }
        Schema::Properties(record) => check_record(value, record, path, errors),
    }
}

fn check_record(value: &Value, record: &Record, path: &mut String, errors: &mut Vec<Diagnostic>) {
    let Some(map) = value.as_object() else {
        type_mismatch("object", value, path, errors);
        return;
    };

    for (name, schema) in &record.required {
        match map.get(*name) {
            Some(field) => with_segment(path, name, |path| check(field, schema, path, errors)),
            None => errors.push(Diagnostic::structure(
                "S001",
                format!("Missing required property '{name}'"),
                path.clone(),
            )),
        }
    }

    for (name, schema) in &record.optional {
        if let Some(field) = map.get(*name) {
            with_segment(path, name, |path| check(field, schema, path, errors));
        }
    }

    if !record.additional {
        for key in map.keys().filter(|key| !record.knows(key)) {
            errors.push(Diagnostic::structure(
                "S003",
                format!("Unknown property '{key}'"),
                path.clone(),
            ));
        }
    }
}

fn check_primitive(value: &Value, primitive: Primitive, path: &str, errors: &mut Vec<Diagnostic>) {
    let ok = match primitive {
        Primitive::String => value.is_string(),
        Primitive::Float32 => value
            .as_f64()
            .is_some_and(|n| (n as f32).is_finite()),
        Primitive::Int32 => value
            .as_i64()
            .is_some_and(|n| i32::try_from(n).is_ok()),
        Primitive::Boolean => value.is_boolean(),
    };
    if !ok {
        type_mismatch(&primitive.to_string(), value, path, errors);
    }
}

fn type_mismatch(expected: &str, value: &Value, path: &str, errors: &mut Vec<Diagnostic>) {
    let found = match value {
        Value::Number(n) if expected == "float32" => format!("out-of-range number {n}"),
        Value::Number(n) if !n.is_i64() && !n.is_u64() => "non-integer number".to_string(),
        Value::Number(n) if expected == "int32" => format!("out-of-range integer {n}"),
        other => json_type_name(other).to_string(),
    };
    errors.push(Diagnostic::structure(
        "S002",
        format!("Expected {expected}, found {found}"),
        path,
    ));
}

/// Run `f` with `segment` appended to the pointer, then restore it.
fn with_segment(path: &mut String, segment: &str, f: impl FnOnce(&mut String)) {
    let len = path.len();
    path.push('/');
    path.push_str(segment);
    f(path);
    path.truncate(len);
}
