//! Template schemas: form fields, workflow actions, and the versioned
//! bundle that owns them.

mod action;
mod field;
mod registry;
mod types;

pub use action::{Action, ActionColor, ActionType};
pub use field::{Field, FieldConstraints, FieldOption, FieldType};
pub use registry::{RegistryError, RegistryResult, TemplateRegistry};
pub use types::{CreateTemplate, Template, TemplateStatus, UpdateTemplate};
