//! In-memory template registry.
//!
//! Resolves an object's templateId when its data mapping needs checking
//! against the owning template's field definitions. Purely in-memory;
//! persistence belongs to the database collaborator.

use std::collections::HashMap;

use thiserror::Error;

use super::types::Template;
use crate::object::{validate_data, Object};
use crate::validate::ValidationError;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("template '{id}' version {version} already registered")]
    AlreadyRegistered { id: String, version: u32 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Templates indexed by (id, version).
///
/// Template and object versions are independent counters; objects always
/// resolve against the latest registered version of their template.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<(String, u32), Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template. Each (id, version) pair may be registered once.
    pub fn register(&mut self, template: Template) -> RegistryResult<()> {
        let key = (template.id.clone(), template.version);
        if self.templates.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered {
                id: key.0,
                version: key.1,
            });
        }
        self.templates.insert(key, template);
        Ok(())
    }

    /// Gets a template by id and version.
    pub fn get(&self, id: &str, version: u32) -> Option<&Template> {
        self.templates.get(&(id.to_string(), version))
    }

    /// Gets the highest registered version of a template id.
    pub fn latest(&self, id: &str) -> Option<&Template> {
        self.templates
            .iter()
            .filter(|((tid, _), _)| tid == id)
            .max_by_key(|((_, version), _)| *version)
            .map(|(_, template)| template)
    }

    /// Checks whether any version of a template id is registered.
    pub fn exists(&self, id: &str) -> bool {
        self.templates.keys().any(|(tid, _)| tid == id)
    }

    /// Returns the number of registered template versions.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Validates an object's data mapping against the latest version of
    /// its template.
    pub fn validate_object(&self, object: &Object) -> RegistryResult<()> {
        let template = self
            .latest(&object.template_id)
            .ok_or_else(|| RegistryError::NotFound(object.template_id.clone()))?;
        validate_data(template, &object.data)?;
        Ok(())
    }
}
