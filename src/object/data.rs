//! Validates an object's data mapping against its template's fields.
//!
//! This is the downstream check the entity schemas leave open: entity
//! validation accepts `data` as any mapping, and this module enforces the
//! per-field semantics the owning template declares.

use chrono::DateTime;
use regex::Regex;
use serde_json::{Map, Value};

use crate::template::{Field, FieldConstraints, FieldType, Template};
use crate::validate::{json_type_name, ValidationError, ValidationResult, Violation};

/// Checks every declared field of the template against the data mapping
/// and rejects undeclared keys. All violations are reported together.
pub fn validate_data(template: &Template, data: &Map<String, Value>) -> ValidationResult<()> {
    let mut out = Vec::new();

    for key in data.keys() {
        if template.field(key).is_none() {
            out.push(Violation::undeclared_field(format!("data.{}", key)));
        }
    }

    for field in &template.field_schema {
        let path = format!("data.{}", field.id);
        match data.get(&field.id) {
            Some(Value::Null) | None => {
                if field.required {
                    out.push(Violation::missing_field(path));
                }
            }
            Some(value) => check_value(field, value, &path, &mut out),
        }
    }

    if out.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(out))
    }
}

fn check_value(field: &Field, value: &Value, path: &str, out: &mut Vec<Violation>) {
    match field.field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Markdown | FieldType::File => {
            match value.as_str() {
                Some(s) => check_string(field, s, path, out),
                None => out.push(Violation::type_mismatch(
                    path,
                    "string",
                    json_type_name(value),
                )),
            }
        }
        FieldType::Checkbox => {
            if !value.is_boolean() {
                out.push(Violation::type_mismatch(path, "bool", json_type_name(value)));
            }
        }
        FieldType::Date => match value.as_str() {
            Some(s) => {
                if DateTime::parse_from_rfc3339(s).is_err() {
                    out.push(Violation::invalid_format(path, "RFC 3339 date-time", s));
                }
            }
            None => out.push(Violation::type_mismatch(
                path,
                "string",
                json_type_name(value),
            )),
        },
        FieldType::Select => match value.as_str() {
            Some(s) => check_membership(field, s, path, out),
            None => out.push(Violation::type_mismatch(
                path,
                "string",
                json_type_name(value),
            )),
        },
        FieldType::Multiselect => match value.as_array() {
            Some(items) => {
                check_count(field, items.len(), path, out);
                for (i, item) in items.iter().enumerate() {
                    let elem_path = format!("{}[{}]", path, i);
                    match item.as_str() {
                        Some(s) => check_membership(field, s, &elem_path, out),
                        None => out.push(Violation::type_mismatch(
                            elem_path,
                            "string",
                            json_type_name(item),
                        )),
                    }
                }
            }
            None => out.push(Violation::type_mismatch(
                path,
                "array",
                json_type_name(value),
            )),
        },
        FieldType::Array => match value.as_array() {
            Some(items) => check_count(field, items.len(), path, out),
            None => out.push(Violation::type_mismatch(
                path,
                "array",
                json_type_name(value),
            )),
        },
    }
}

/// min/max bound string length; pattern must match the whole value.
fn check_string(field: &Field, s: &str, path: &str, out: &mut Vec<Violation>) {
    let Some(constraints) = &field.validation else {
        return;
    };
    let len = s.chars().count();
    check_bounds(constraints, len, "length", path, out);
    if let Some(pattern) = &constraints.pattern {
        // Uncompilable patterns were rejected when the field was defined.
        if let Ok(re) = Regex::new(pattern) {
            if !re.is_match(s) {
                out.push(Violation::out_of_range(
                    path,
                    format!("must match pattern '{}'", pattern),
                    s,
                ));
            }
        }
    }
}

/// min/max bound element count for multiselect and array fields.
fn check_count(field: &Field, count: usize, path: &str, out: &mut Vec<Violation>) {
    if let Some(constraints) = &field.validation {
        check_bounds(constraints, count, "item count", path, out);
    }
}

fn check_bounds(
    constraints: &FieldConstraints,
    actual: usize,
    what: &str,
    path: &str,
    out: &mut Vec<Violation>,
) {
    if let Some(min) = constraints.min {
        if (actual as f64) < min {
            out.push(Violation::out_of_range(
                path,
                format!("{} must be at least {}", what, min),
                actual.to_string(),
            ));
        }
    }
    if let Some(max) = constraints.max {
        if (actual as f64) > max {
            out.push(Violation::out_of_range(
                path,
                format!("{} must be at most {}", what, max),
                actual.to_string(),
            ));
        }
    }
}

/// A declared option list closes the value set; an absent or empty list
/// leaves it open.
fn check_membership(field: &Field, s: &str, path: &str, out: &mut Vec<Violation>) {
    let Some(options) = &field.options else {
        return;
    };
    if options.is_empty() {
        return;
    }
    if !options.iter().any(|o| o.value == s) {
        let allowed: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        out.push(Violation::invalid_enum(path, &allowed, s));
    }
}
