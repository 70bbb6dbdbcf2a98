//! Template records and their create/update shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::action::Action;
use super::field::Field;
use crate::validate::{Checker, ClosedEnum, ValidationResult};

/// Publication status of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

impl ClosedEnum for TemplateStatus {
    const ALLOWED: &'static [&'static str] = &["draft", "active", "archived"];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(TemplateStatus::Draft),
            "active" => Some(TemplateStatus::Active),
            "archived" => Some(TemplateStatus::Archived),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            TemplateStatus::Draft => "draft",
            TemplateStatus::Active => "active",
            TemplateStatus::Archived => "archived",
        }
    }
}

/// A named, versioned bundle of field and action definitions.
///
/// Field and action definitions are owned by value; every other
/// relationship is by identifier string. Version increments are owned by
/// the persistence collaborator, not this layer.
///
/// The derived `Deserialize` checks shape only and would let a missing
/// `folderId` through as `None`; validate untrusted input with
/// [`Template::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub workspace_id: String,
    /// Required but nullable: a template outside any folder carries null.
    #[serde(default)]
    pub folder_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub field_schema: Vec<Field>,
    pub action_schema: Vec<Action>,
    pub status: TemplateStatus,
    pub version: u32,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Template {
    /// Validates untyped input into a full template record.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let template = Self {
            id: c.require_str("id"),
            workspace_id: c.require_str("workspaceId"),
            folder_id: c.nullable_str("folderId"),
            name: c.require_str("name"),
            description: c.optional_str("description"),
            field_schema: c.array_of("fieldSchema", Field::parse_at),
            action_schema: c.array_of("actionSchema", Action::parse_at),
            status: c.require_enum("status"),
            version: c.u32_or("version", 1),
            created_by: c.require_str("createdBy"),
            created_at: c.require_datetime("createdAt"),
            updated_at: c.require_datetime("updatedAt"),
        };
        c.finish()?;
        Ok(template)
    }

    /// Looks up an owned field definition by id.
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.field_schema.iter().find(|f| f.id == id)
    }

    /// Looks up an owned action definition by id.
    pub fn action(&self, id: &str) -> Option<&Action> {
        self.action_schema.iter().find(|a| a.id == id)
    }
}

/// Creation payload: server-assigned fields (id, version, createdAt,
/// updatedAt) are not accepted; payloads carrying them are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplate {
    pub workspace_id: String,
    pub folder_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub field_schema: Vec<Field>,
    pub action_schema: Vec<Action>,
    pub status: TemplateStatus,
    pub created_by: String,
}

impl CreateTemplate {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let create = Self {
            workspace_id: c.require_str("workspaceId"),
            folder_id: c.nullable_str("folderId"),
            name: c.require_str("name"),
            description: c.optional_str("description"),
            field_schema: c.array_of("fieldSchema", Field::parse_at),
            action_schema: c.array_of("actionSchema", Action::parse_at),
            status: c.require_enum("status"),
            created_by: c.require_str("createdBy"),
        };
        c.finish()?;
        Ok(create)
    }
}

/// Partial update payload: every create field optional, absent key means
/// "leave unchanged". An empty payload is valid and changes nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// Outer None: no change. Inner None: move out of its folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_schema: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_schema: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TemplateStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl UpdateTemplate {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let update = Self {
            workspace_id: c.optional_str("workspaceId"),
            folder_id: c.optional_nullable_str("folderId"),
            name: c.optional_str("name"),
            description: c.optional_str("description"),
            field_schema: c.optional_array_of("fieldSchema", Field::parse_at),
            action_schema: c.optional_array_of("actionSchema", Action::parse_at),
            status: c.optional_enum("status"),
            created_by: c.optional_str("createdBy"),
        };
        c.finish()?;
        Ok(update)
    }

    /// True when no field was supplied: the update is a no-op.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_template_input() -> Value {
        json!({
            "id": "t1",
            "workspaceId": "w1",
            "folderId": null,
            "name": "Review",
            "fieldSchema": [{ "id": "f1", "type": "text", "label": "Title" }],
            "actionSchema": [{ "id": "a1", "type": "approve", "label": "Approve" }],
            "status": "draft",
            "createdBy": "u1",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_full_template_defaults_cascade() {
        let template = Template::parse(&full_template_input()).unwrap();
        assert_eq!(template.version, 1);
        assert_eq!(template.folder_id, None);
        assert!(!template.field_schema[0].required);
        let action = &template.action_schema[0];
        assert!(!action.requires_comment);
        assert!(!action.allow_edit);
        assert_eq!(action.color, crate::template::ActionColor::Blue);
        assert!(action.webhook_enabled);
    }

    #[test]
    fn test_missing_folder_id_rejected() {
        let mut input = full_template_input();
        input.as_object_mut().unwrap().remove("folderId");
        let err = Template::parse(&input).unwrap_err();
        assert!(err.violations().iter().any(|v| v.path == "folderId"));
    }

    #[test]
    fn test_derived_deserialize_is_shape_only() {
        // serde lets a missing folderId through as None; parse is the
        // entry point that enforces required-but-nullable.
        let mut input = full_template_input();
        input["version"] = json!(1);
        input.as_object_mut().unwrap().remove("folderId");
        assert!(serde_json::from_value::<Template>(input.clone()).is_ok());
        assert!(Template::parse(&input).is_err());
    }

    #[test]
    fn test_null_folder_id_accepted() {
        let template = Template::parse(&full_template_input()).unwrap();
        assert!(template.folder_id.is_none());
    }

    #[test]
    fn test_all_violations_reported_together() {
        let err = Template::parse(&json!({
            "id": "t1",
            "status": "stale"
        }))
        .unwrap_err();
        let paths: Vec<_> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"workspaceId"));
        assert!(paths.contains(&"folderId"));
        assert!(paths.contains(&"name"));
        assert!(paths.contains(&"fieldSchema"));
        assert!(paths.contains(&"status"));
        assert!(paths.contains(&"createdAt"));
    }

    #[test]
    fn test_template_roundtrip_preserves_values() {
        let input = full_template_input();
        let template = Template::parse(&input).unwrap();
        let back = serde_json::to_value(&template).unwrap();
        assert_eq!(back["id"], "t1");
        assert_eq!(back["folderId"], Value::Null);
        assert_eq!(back["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(back["fieldSchema"][0]["type"], "text");
        // Defaults became explicit values.
        assert_eq!(back["version"], 1);
        assert_eq!(back["actionSchema"][0]["color"], "blue");
    }

    #[test]
    fn test_create_rejects_server_assigned_keys() {
        let err = CreateTemplate::parse(&full_template_input()).unwrap_err();
        let paths: Vec<_> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"id"));
        assert!(paths.contains(&"createdAt"));
        assert!(paths.contains(&"updatedAt"));
    }

    #[test]
    fn test_create_accepts_minimal_payload() {
        let create = CreateTemplate::parse(&json!({
            "workspaceId": "w1",
            "folderId": "folder-9",
            "name": "Review",
            "fieldSchema": [],
            "actionSchema": [],
            "status": "active",
            "createdBy": "u1"
        }))
        .unwrap();
        assert_eq!(create.folder_id.as_deref(), Some("folder-9"));
    }

    #[test]
    fn test_empty_update_is_valid_noop() {
        let update = UpdateTemplate::parse(&json!({})).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_single_key_update() {
        let update = UpdateTemplate::parse(&json!({ "name": "Renamed" })).unwrap();
        assert_eq!(update.name.as_deref(), Some("Renamed"));
        assert!(update.status.is_none());
        assert!(update.folder_id.is_none());
    }

    #[test]
    fn test_update_can_null_folder() {
        let update = UpdateTemplate::parse(&json!({ "folderId": null })).unwrap();
        assert_eq!(update.folder_id, Some(None));
    }

    #[test]
    fn test_update_rejects_unknown_keys() {
        let err = UpdateTemplate::parse(&json!({ "version": 4 })).unwrap_err();
        assert_eq!(err.violations()[0].path, "version");
    }
}
