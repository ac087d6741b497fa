//! Checks model JSON against the schema of the record it should describe.
//!
//! The schema is the one `schemars` derives for the record type, so the check
//! and the prompt always agree. Only the keywords `schemars` emits for our
//! records are interpreted: `type`, `required`, `properties`, `items`, `$ref`
//! and `anyOf`.

use serde_json::{Map, Value};

use crate::error::{AppError, FieldError, Result};
use crate::models::ExtractionTarget;

/// Parses `json_text` into `T`, reporting every field-level mismatch at once.
pub fn validate<T: ExtractionTarget>(json_text: &str) -> Result<T> {
    let value: Value = serde_json::from_str(json_text).map_err(|e| {
        AppError::ValidationError(vec![FieldError::new("", format!("Invalid JSON: {}", e))])
    })?;

    let schema = T::extraction_schema();
    let mut errors = Vec::new();
    check(&value, &schema, &schema, "", &mut errors);
    if !errors.is_empty() {
        return Err(AppError::ValidationError(errors));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::ValidationError(vec![FieldError::new("", e.to_string())]))
}

fn check(value: &Value, schema: &Value, root: &Value, path: &str, errors: &mut Vec<FieldError>) {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        match resolve(root, reference) {
            Some(target) => check(value, target, root, path, errors),
            None => errors.push(FieldError::new(path, format!("unknown schema reference {}", reference))),
        }
        return;
    }

    if let Some(alternatives) = schema.get("anyOf").and_then(Value::as_array) {
        check_any_of(value, alternatives, root, path, errors);
        return;
    }

    if let Some(expected) = schema.get("type") {
        let allowed = type_names(expected);
        if !allowed.iter().any(|name| matches_type(value, name)) {
            errors.push(FieldError::new(
                path,
                format!("expected {}, got {}", allowed.join(" or "), kind(value)),
            ));
            return;
        }
    }

    match value {
        Value::Object(fields) => check_object(fields, schema, root, path, errors),
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check(item, item_schema, root, &format!("{}[{}]", path, i), errors);
                }
            }
        }
        _ => {}
    }
}

fn check_object(
    fields: &Map<String, Value>,
    schema: &Value,
    root: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !fields.contains_key(name) {
                errors.push(FieldError::new(join(path, name), "field required"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, property) in properties {
            if let Some(field) = fields.get(name) {
                check(field, property, root, &join(path, name), errors);
            }
        }
    }
}

fn check_any_of(
    value: &Value,
    alternatives: &[Value],
    root: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let mut first_failure = None;
    for alternative in alternatives {
        let mut attempt = Vec::new();
        check(value, alternative, root, path, &mut attempt);
        if attempt.is_empty() {
            return;
        }
        let is_null_branch = alternative.get("type").and_then(Value::as_str) == Some("null");
        if first_failure.is_none() && !is_null_branch {
            first_failure = Some(attempt);
        }
    }
    match first_failure {
        Some(failure) => errors.extend(failure),
        None => errors.push(FieldError::new(path, "value does not match any allowed shape")),
    }
}

fn resolve<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    let name = reference.strip_prefix("#/definitions/")?;
    root.get("definitions")?.get(name)
}

fn type_names(expected: &Value) -> Vec<&str> {
    match expected {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn matches_type(value: &Value, name: &str) -> bool {
    match name {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}
