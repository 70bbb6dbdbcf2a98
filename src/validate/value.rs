//! Typed field extraction from untyped JSON input.
//!
//! The `Checker` walks one JSON object, pulling out declared fields and
//! recording a violation for every mismatch instead of stopping at the
//! first. Callers build the typed value from the accessors, then call
//! `finish()`; on any recorded violation the built value is discarded and
//! the full violation list is returned.
//!
//! Field modifiers are distinct and explicit:
//! - required: key must be present, null rejected
//! - optional: key may be absent, null rejected when present
//! - required-but-nullable: key must be present, null allowed
//! - defaultable: key may be absent, default substituted during validation

use chrono::DateTime;
use serde_json::{Map, Value};
use url::Url;

use super::errors::{ValidationError, Violation};

/// A closed enumeration with a fixed wire representation.
///
/// Out-of-set values are rejected at the boundary with the full allowed
/// set; post-parse, invalid members are unrepresentable.
pub trait ClosedEnum: Sized + Copy + Default {
    /// Every allowed wire string, in declaration order.
    const ALLOWED: &'static [&'static str];

    /// Parses a wire string into a member.
    fn from_wire(s: &str) -> Option<Self>;

    /// Returns the wire string for this member.
    fn as_wire(self) -> &'static str;
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
pub fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Violation-collecting accessor over one JSON object.
pub struct Checker<'a> {
    obj: &'a Map<String, Value>,
    path: String,
    declared: Vec<&'static str>,
    violations: Vec<Violation>,
}

impl<'a> Checker<'a> {
    /// Opens a checker on a top-level value, which must be a JSON object.
    pub fn root(value: &'a Value) -> Result<Self, ValidationError> {
        match value.as_object() {
            Some(obj) => Ok(Self {
                obj,
                path: String::new(),
                declared: Vec::new(),
                violations: Vec::new(),
            }),
            None => Err(ValidationError::single(Violation::type_mismatch(
                "$root",
                "object",
                json_type_name(value),
            ))),
        }
    }

    /// Opens a checker on a nested value at the given path.
    pub(crate) fn at(value: &'a Value, path: &str) -> Result<Self, Violation> {
        match value.as_object() {
            Some(obj) => Ok(Self {
                obj,
                path: path.to_string(),
                declared: Vec::new(),
                violations: Vec::new(),
            }),
            None => Err(Violation::type_mismatch(
                if path.is_empty() { "$root" } else { path },
                "object",
                json_type_name(value),
            )),
        }
    }

    fn key_path(&self, key: &str) -> String {
        make_path(&self.path, key)
    }

    fn take(&mut self, key: &'static str) -> Option<&'a Value> {
        self.declared.push(key);
        self.obj.get(key)
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Required string; null rejected.
    pub fn require_str(&mut self, key: &'static str) -> String {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                self.push(Violation::type_mismatch(path, "string", json_type_name(other)));
                String::new()
            }
            None => {
                self.push(Violation::missing_field(path));
                String::new()
            }
        }
    }

    /// Optional string; absent key allowed, null rejected when present.
    pub fn optional_str(&mut self, key: &'static str) -> Option<String> {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.push(Violation::type_mismatch(path, "string", json_type_name(other)));
                None
            }
            None => None,
        }
    }

    /// Required-but-nullable string; key must be present, null maps to None.
    pub fn nullable_str(&mut self, key: &'static str) -> Option<String> {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) => None,
            Some(other) => {
                self.push(Violation::type_mismatch(
                    path,
                    "string or null",
                    json_type_name(other),
                ));
                None
            }
            None => {
                self.push(Violation::missing_field(path));
                None
            }
        }
    }

    /// Optional nullable string, for update shapes: absent means
    /// "no change", present null means "set to null".
    pub fn optional_nullable_str(&mut self, key: &'static str) -> Option<Option<String>> {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(Value::Null) => Some(None),
            Some(other) => {
                self.push(Violation::type_mismatch(
                    path,
                    "string or null",
                    json_type_name(other),
                ));
                None
            }
            None => None,
        }
    }

    /// Defaultable boolean.
    pub fn bool_or(&mut self, key: &'static str, default: bool) -> bool {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.push(Violation::type_mismatch(path, "bool", json_type_name(other)));
                default
            }
            None => default,
        }
    }

    /// Defaultable unsigned integer (version counters and the like).
    pub fn u32_or(&mut self, key: &'static str, default: u32) -> u32 {
        let path = self.key_path(key);
        match self.take(key) {
            Some(value) => match value.as_u64() {
                Some(n) if n <= u64::from(u32::MAX) => n as u32,
                _ => {
                    self.push(Violation::type_mismatch(
                        path,
                        "integer",
                        json_type_name(value),
                    ));
                    default
                }
            },
            None => default,
        }
    }

    /// Optional number.
    pub fn optional_f64(&mut self, key: &'static str) -> Option<f64> {
        let path = self.key_path(key);
        match self.take(key) {
            Some(value) => match value.as_f64() {
                Some(n) => Some(n),
                None => {
                    self.push(Violation::type_mismatch(
                        path,
                        "number",
                        json_type_name(value),
                    ));
                    None
                }
            },
            None => None,
        }
    }

    /// Required RFC 3339 date-time, preserved as the exact input string.
    pub fn require_datetime(&mut self, key: &'static str) -> String {
        let path = self.key_path(key);
        let s = self.require_str(key);
        if !s.is_empty() && DateTime::parse_from_rfc3339(&s).is_err() {
            self.push(Violation::invalid_format(path, "RFC 3339 date-time", s.clone()));
        }
        s
    }

    /// Required absolute URL, preserved as the exact input string.
    pub fn require_url(&mut self, key: &'static str) -> String {
        let path = self.key_path(key);
        let s = self.require_str(key);
        if !s.is_empty() && Url::parse(&s).is_err() {
            self.push(Violation::invalid_format(path, "absolute URL", s.clone()));
        }
        s
    }

    /// Required member of a closed enumeration.
    pub fn require_enum<T: ClosedEnum>(&mut self, key: &'static str) -> T {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::String(s)) => match T::from_wire(s) {
                Some(v) => v,
                None => {
                    self.push(Violation::invalid_enum(path, T::ALLOWED, s.as_str()));
                    T::default()
                }
            },
            Some(other) => {
                self.push(Violation::type_mismatch(path, "string", json_type_name(other)));
                T::default()
            }
            None => {
                self.push(Violation::missing_field(path));
                T::default()
            }
        }
    }

    /// Defaultable member of a closed enumeration.
    pub fn enum_or<T: ClosedEnum>(&mut self, key: &'static str, default: T) -> T {
        if self.obj.contains_key(key) {
            self.require_enum(key)
        } else {
            self.declared.push(key);
            default
        }
    }

    /// Optional member of a closed enumeration.
    pub fn optional_enum<T: ClosedEnum>(&mut self, key: &'static str) -> Option<T> {
        if self.obj.contains_key(key) {
            Some(self.require_enum(key))
        } else {
            self.declared.push(key);
            None
        }
    }

    /// Required array of closed-enumeration members.
    pub fn enum_array<T: ClosedEnum>(&mut self, key: &'static str) -> Vec<T> {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let elem_path = format!("{}[{}]", path, i);
                    match item {
                        Value::String(s) => match T::from_wire(s) {
                            Some(v) => out.push(v),
                            None => self.push(Violation::invalid_enum(
                                elem_path,
                                T::ALLOWED,
                                s.as_str(),
                            )),
                        },
                        other => self.push(Violation::type_mismatch(
                            elem_path,
                            "string",
                            json_type_name(other),
                        )),
                    }
                }
                out
            }
            Some(other) => {
                self.push(Violation::type_mismatch(path, "array", json_type_name(other)));
                Vec::new()
            }
            None => {
                self.push(Violation::missing_field(path));
                Vec::new()
            }
        }
    }

    /// Optional array of closed-enumeration members.
    pub fn optional_enum_array<T: ClosedEnum>(&mut self, key: &'static str) -> Option<Vec<T>> {
        if self.obj.contains_key(key) {
            Some(self.enum_array(key))
        } else {
            self.declared.push(key);
            None
        }
    }

    /// Required array of nested objects, parsed element by element with
    /// indexed paths so violations point at the offending element.
    pub fn array_of<T>(
        &mut self,
        key: &'static str,
        parse: fn(&Value, &str, &mut Vec<Violation>) -> T,
    ) -> Vec<T> {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let elem_path = format!("{}[{}]", path, i);
                    parse(item, &elem_path, &mut self.violations)
                })
                .collect(),
            Some(other) => {
                self.push(Violation::type_mismatch(path, "array", json_type_name(other)));
                Vec::new()
            }
            None => {
                self.push(Violation::missing_field(path));
                Vec::new()
            }
        }
    }

    /// Optional array of nested objects.
    pub fn optional_array_of<T>(
        &mut self,
        key: &'static str,
        parse: fn(&Value, &str, &mut Vec<Violation>) -> T,
    ) -> Option<Vec<T>> {
        if self.obj.contains_key(key) {
            Some(self.array_of(key, parse))
        } else {
            self.declared.push(key);
            None
        }
    }

    /// Optional nested object with its own parser.
    pub fn optional_with<T>(
        &mut self,
        key: &'static str,
        parse: fn(&Value, &str, &mut Vec<Violation>) -> T,
    ) -> Option<T> {
        let path = self.key_path(key);
        self.take(key)
            .map(|value| parse(value, &path, &mut self.violations))
    }

    /// Required open mapping; contents are not inspected.
    pub fn require_record(&mut self, key: &'static str) -> Map<String, Value> {
        let path = self.key_path(key);
        match self.take(key) {
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                self.push(Violation::type_mismatch(path, "object", json_type_name(other)));
                Map::new()
            }
            None => {
                self.push(Violation::missing_field(path));
                Map::new()
            }
        }
    }

    /// Defaultable open mapping; absent key yields an empty mapping.
    pub fn record_or_default(&mut self, key: &'static str) -> Map<String, Value> {
        if self.obj.contains_key(key) {
            self.require_record(key)
        } else {
            self.declared.push(key);
            Map::new()
        }
    }

    /// Optional open mapping.
    pub fn optional_record(&mut self, key: &'static str) -> Option<Map<String, Value>> {
        if self.obj.contains_key(key) {
            Some(self.require_record(key))
        } else {
            self.declared.push(key);
            None
        }
    }

    /// Records a violation discovered by the caller (refinement rules).
    pub fn refute(&mut self, violation: Violation) {
        self.push(violation);
    }

    fn check_undeclared(&mut self) {
        let mut extras = Vec::new();
        for key in self.obj.keys() {
            if !self.declared.iter().any(|d| d == key) {
                extras.push(self.key_path(key));
            }
        }
        for path in extras {
            self.violations.push(Violation::undeclared_field(path));
        }
    }

    /// Ends a top-level check: rejects undeclared keys, then returns every
    /// recorded violation, or Ok if there were none.
    pub fn finish(mut self) -> Result<(), ValidationError> {
        self.check_undeclared();
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    /// Ends a nested check, appending violations to the parent's list.
    pub(crate) fn finish_into(mut self, out: &mut Vec<Violation>) {
        self.check_undeclared();
        out.append(&mut self.violations);
    }
}
