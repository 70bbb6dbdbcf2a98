//! Form field definitions owned by a template.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{make_path, Checker, ClosedEnum, ValidationResult, Violation};

/// Supported form field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Markdown,
    Select,
    Multiselect,
    Checkbox,
    Date,
    File,
    Array,
}

impl FieldType {
    /// Whether this type carries a choice list.
    pub fn supports_options(self) -> bool {
        matches!(self, FieldType::Select | FieldType::Multiselect)
    }
}

impl ClosedEnum for FieldType {
    const ALLOWED: &'static [&'static str] = &[
        "text",
        "textarea",
        "markdown",
        "select",
        "multiselect",
        "checkbox",
        "date",
        "file",
        "array",
    ];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "text" => Some(FieldType::Text),
            "textarea" => Some(FieldType::Textarea),
            "markdown" => Some(FieldType::Markdown),
            "select" => Some(FieldType::Select),
            "multiselect" => Some(FieldType::Multiselect),
            "checkbox" => Some(FieldType::Checkbox),
            "date" => Some(FieldType::Date),
            "file" => Some(FieldType::File),
            "array" => Some(FieldType::Array),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Markdown => "markdown",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::File => "file",
            FieldType::Array => "array",
        }
    }
}

/// One choice in a select/multiselect field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub(crate) fn parse_at(value: &Value, path: &str, out: &mut Vec<Violation>) -> Self {
        let mut c = match Checker::at(value, path) {
            Ok(c) => c,
            Err(v) => {
                out.push(v);
                return Self::default();
            }
        };
        let option = Self {
            label: c.require_str("label"),
            value: c.require_str("value"),
        };
        c.finish_into(out);
        option
    }
}

/// Declared value constraints, enforced against object data downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FieldConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldConstraints {
    pub(crate) fn parse_at(value: &Value, path: &str, out: &mut Vec<Violation>) -> Self {
        let mut c = match Checker::at(value, path) {
            Ok(c) => c,
            Err(v) => {
                out.push(v);
                return Self::default();
            }
        };
        let constraints = Self {
            min: c.optional_f64("min"),
            max: c.optional_f64("max"),
            pattern: c.optional_str("pattern"),
        };
        // A pattern that does not compile can never be enforced downstream.
        if let Some(pattern) = &constraints.pattern {
            if Regex::new(pattern).is_err() {
                c.refute(Violation::invalid_format(
                    make_path(path, "pattern"),
                    "regular expression",
                    pattern.clone(),
                ));
            }
        }
        c.finish_into(out);
        constraints
    }
}

/// One form field within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldConstraints>,
}

impl Field {
    /// Validates untyped input into a field definition.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut out = Vec::new();
        let field = Self::parse_at(value, "", &mut out);
        if out.is_empty() {
            Ok(field)
        } else {
            Err(crate::validate::ValidationError::new(out))
        }
    }

    pub(crate) fn parse_at(value: &Value, path: &str, out: &mut Vec<Violation>) -> Self {
        let mut c = match Checker::at(value, path) {
            Ok(c) => c,
            Err(v) => {
                out.push(v);
                return Self::default();
            }
        };
        let field = Self {
            id: c.require_str("id"),
            field_type: c.require_enum("type"),
            label: c.require_str("label"),
            description: c.optional_str("description"),
            required: c.bool_or("required", false),
            options: c.optional_array_of("options", FieldOption::parse_at),
            validation: c.optional_with("validation", FieldConstraints::parse_at),
        };
        // Choice lists only make sense on choice fields.
        if field.options.is_some() && !field.field_type.supports_options() {
            c.refute(Violation::type_mismatch(
                make_path(path, "options"),
                format!("no options on '{}' fields", field.field_type.as_wire()),
                "options present",
            ));
        }
        c.finish_into(out);
        field
    }
}
