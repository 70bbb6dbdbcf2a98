//! Validation error types.
//!
//! Error codes:
//! - GL_VALIDATION_FAILED (top-level, carries every violation)
//! - GL_SHAPE_MISMATCH (wrong type, missing key, undeclared key)
//! - GL_INVALID_ENUM (value outside a closed set, carries the allowed set)
//! - GL_INVALID_FORMAT (malformed URL or date-time)
//! - GL_OUT_OF_RANGE (min/max/pattern constraint violated)

use std::fmt;

use serde_json::{json, Value};

/// What went wrong at one field path.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Wrong type, missing required key, or undeclared key.
    Shape { expected: String, actual: String },
    /// Value outside a closed enumeration.
    Enum { allowed: Vec<String>, actual: String },
    /// Syntactically malformed value (URL, date-time).
    Format { expected: &'static str, actual: String },
    /// Declared min/max/pattern constraint violated.
    Range { constraint: String, actual: String },
}

impl ViolationKind {
    /// Returns the error code string for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::Shape { .. } => "GL_SHAPE_MISMATCH",
            ViolationKind::Enum { .. } => "GL_INVALID_ENUM",
            ViolationKind::Format { .. } => "GL_INVALID_FORMAT",
            ViolationKind::Range { .. } => "GL_OUT_OF_RANGE",
        }
    }
}

/// One violated constraint at one field path.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Field path, e.g. "fieldSchema[0].type"
    pub path: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::new(
            path,
            ViolationKind::Shape {
                expected: "field to be present".into(),
                actual: "missing".into(),
            },
        )
    }

    pub fn undeclared_field(path: impl Into<String>) -> Self {
        Self::new(
            path,
            ViolationKind::Shape {
                expected: "no undeclared fields".into(),
                actual: "extra field present".into(),
            },
        )
    }

    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            ViolationKind::Shape {
                expected: expected.into(),
                actual: actual.into(),
            },
        )
    }

    pub fn invalid_enum(
        path: impl Into<String>,
        allowed: &[&str],
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            ViolationKind::Enum {
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
                actual: actual.into(),
            },
        )
    }

    pub fn invalid_format(
        path: impl Into<String>,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            ViolationKind::Format {
                expected,
                actual: actual.into(),
            },
        )
    }

    pub fn out_of_range(
        path: impl Into<String>,
        constraint: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            ViolationKind::Range {
                constraint: constraint.into(),
                actual: actual.into(),
            },
        )
    }

    /// Returns the error code string for this violation.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Serializes this violation for an error-details payload.
    pub fn to_json(&self) -> Value {
        match &self.kind {
            ViolationKind::Shape { expected, actual } => json!({
                "path": self.path,
                "code": self.code(),
                "expected": expected,
                "actual": actual,
            }),
            ViolationKind::Enum { allowed, actual } => json!({
                "path": self.path,
                "code": self.code(),
                "allowed": allowed,
                "actual": actual,
            }),
            ViolationKind::Format { expected, actual } => json!({
                "path": self.path,
                "code": self.code(),
                "expected": expected,
                "actual": actual,
            }),
            ViolationKind::Range { constraint, actual } => json!({
                "path": self.path,
                "code": self.code(),
                "constraint": constraint,
                "actual": actual,
            }),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Shape { expected, actual } => {
                write!(f, "field '{}': expected {}, got {}", self.path, expected, actual)
            }
            ViolationKind::Enum { allowed, actual } => write!(
                f,
                "field '{}': '{}' is not one of [{}]",
                self.path,
                actual,
                allowed.join(", ")
            ),
            ViolationKind::Format { expected, actual } => {
                write!(f, "field '{}': '{}' is not a valid {}", self.path, actual, expected)
            }
            ViolationKind::Range { constraint, actual } => {
                write!(f, "field '{}': {} (got {})", self.path, constraint, actual)
            }
        }
    }
}

/// Validation failure carrying every violated path, never just the first.
///
/// Always recoverable by the caller. Nothing in this layer panics on input
/// it does not understand; it reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Creates an error from a non-empty violation list.
    pub fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// Creates an error from a single violation.
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Returns the top-level error code.
    pub fn code(&self) -> &'static str {
        "GL_VALIDATION_FAILED"
    }

    /// Returns every violation, in the order the fields were checked.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns a one-line summary suitable for an error envelope message.
    pub fn message(&self) -> String {
        format!(
            "validation failed with {} violation(s)",
            self.violations.len()
        )
    }

    /// Serializes all violations for an error-details payload.
    pub fn details_json(&self) -> Value {
        Value::Array(self.violations.iter().map(Violation::to_json).collect())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.code(), self.message())?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_codes() {
        assert_eq!(Violation::missing_field("id").code(), "GL_SHAPE_MISMATCH");
        assert_eq!(
            Violation::invalid_enum("status", &["draft", "active"], "bogus").code(),
            "GL_INVALID_ENUM"
        );
        assert_eq!(
            Violation::invalid_format("url", "absolute URL", "not-a-url").code(),
            "GL_INVALID_FORMAT"
        );
        assert_eq!(
            Violation::out_of_range("data.title", "length <= 10", "11").code(),
            "GL_OUT_OF_RANGE"
        );
    }

    #[test]
    fn test_enum_violation_names_allowed_set() {
        let v = Violation::invalid_enum("status", &["draft", "active", "archived"], "stale");
        let display = format!("{}", v);
        assert!(display.contains("draft"));
        assert!(display.contains("active"));
        assert!(display.contains("archived"));
        assert!(display.contains("stale"));
    }

    #[test]
    fn test_error_reports_all_violations() {
        let err = ValidationError::new(vec![
            Violation::missing_field("name"),
            Violation::type_mismatch("version", "integer", "string"),
        ]);
        assert_eq!(err.violations().len(), 2);
        let display = format!("{}", err);
        assert!(display.contains("name"));
        assert!(display.contains("version"));
        assert!(display.contains("GL_VALIDATION_FAILED"));
    }

    #[test]
    fn test_details_json_shape() {
        let err = ValidationError::single(Violation::invalid_enum(
            "type",
            &["text", "select"],
            "blob",
        ));
        let details = err.details_json();
        let arr = details.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["path"], "type");
        assert_eq!(arr[0]["code"], "GL_INVALID_ENUM");
        assert_eq!(arr[0]["allowed"][0], "text");
    }
}
