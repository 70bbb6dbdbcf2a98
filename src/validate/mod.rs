//! Validation machinery shared by every entity schema.
//!
//! # Design Principles
//!
//! - Pure and synchronous: untyped input in, typed value or error out
//! - Every violation reported, never just the first
//! - Defaults substituted during validation, not left to storage
//! - Absent key, present null, and default value are three distinct cases
//! - Undeclared keys rejected

mod errors;
mod value;

pub use errors::{ValidationError, ValidationResult, Violation, ViolationKind};
pub use value::{json_type_name, make_path, Checker, ClosedEnum};
