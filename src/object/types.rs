//! Object records: template instances moving through approval.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validate::{Checker, ClosedEnum, ValidationResult};

/// Approval lifecycle status of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    ChangesRequested,
    InProgress,
}

impl ClosedEnum for ObjectStatus {
    const ALLOWED: &'static [&'static str] = &[
        "pending",
        "approved",
        "rejected",
        "changes_requested",
        "in_progress",
    ];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ObjectStatus::Pending),
            "approved" => Some(ObjectStatus::Approved),
            "rejected" => Some(ObjectStatus::Rejected),
            "changes_requested" => Some(ObjectStatus::ChangesRequested),
            "in_progress" => Some(ObjectStatus::InProgress),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            ObjectStatus::Pending => "pending",
            ObjectStatus::Approved => "approved",
            ObjectStatus::Rejected => "rejected",
            ObjectStatus::ChangesRequested => "changes_requested",
            ObjectStatus::InProgress => "in_progress",
        }
    }
}

/// One instance of a template, tracked through the approval lifecycle.
///
/// `data` maps field id to field value; its per-field semantics are
/// governed by the owning template and checked by the data validator, not
/// here. Object and template versions are independent counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    pub id: String,
    pub template_id: String,
    pub workspace_id: String,
    /// Required but nullable.
    pub folder_id: Option<String>,
    pub status: ObjectStatus,
    pub version: u32,
    pub data: Map<String, Value>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Required but nullable: system-created objects carry null.
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Object {
    /// Validates untyped input into a full object record.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let object = Self {
            id: c.require_str("id"),
            template_id: c.require_str("templateId"),
            workspace_id: c.require_str("workspaceId"),
            folder_id: c.nullable_str("folderId"),
            status: c.require_enum("status"),
            version: c.u32_or("version", 1),
            data: c.require_record("data"),
            metadata: c.record_or_default("metadata"),
            created_by: c.nullable_str("createdBy"),
            created_at: c.require_datetime("createdAt"),
            updated_at: c.require_datetime("updatedAt"),
        };
        c.finish()?;
        Ok(object)
    }
}

/// Creation payload: id, status, version, createdAt, and updatedAt are
/// server-assigned; payloads carrying them are rejected. New objects
/// start pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObject {
    pub template_id: String,
    pub workspace_id: String,
    pub folder_id: Option<String>,
    pub data: Map<String, Value>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub created_by: Option<String>,
}

impl CreateObject {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let create = Self {
            template_id: c.require_str("templateId"),
            workspace_id: c.require_str("workspaceId"),
            folder_id: c.nullable_str("folderId"),
            data: c.require_record("data"),
            metadata: c.record_or_default("metadata"),
            created_by: c.nullable_str("createdBy"),
        };
        c.finish()?;
        Ok(create)
    }
}

/// Partial update payload: absent key means "leave unchanged".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Option<String>>,
}

impl UpdateObject {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let update = Self {
            template_id: c.optional_str("templateId"),
            workspace_id: c.optional_str("workspaceId"),
            folder_id: c.optional_nullable_str("folderId"),
            data: c.optional_record("data"),
            metadata: c.optional_record("metadata"),
            created_by: c.optional_nullable_str("createdBy"),
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

    fn full_object_input() -> Value {
        json!({
            "id": "o1",
            "templateId": "t1",
            "workspaceId": "w1",
            "folderId": null,
            "status": "pending",
            "data": { "title": "Launch plan", "urgent": true },
            "createdBy": null,
            "createdAt": "2024-02-01T09:30:00Z",
            "updatedAt": "2024-02-01T09:30:00Z"
        })
    }

    #[test]
    fn test_full_object_defaults() {
        let object = Object::parse(&full_object_input()).unwrap();
        assert_eq!(object.version, 1);
        assert!(object.metadata.is_empty());
        assert_eq!(object.created_by, None);
        assert_eq!(object.status, ObjectStatus::Pending);
    }

    #[test]
    fn test_every_status_parses() {
        for wire in ObjectStatus::ALLOWED {
            let mut input = full_object_input();
            input["status"] = json!(wire);
            assert!(Object::parse(&input).is_ok(), "status '{}'", wire);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut input = full_object_input();
        input["status"] = json!("done");
        let err = Object::parse(&input).unwrap_err();
        assert_eq!(err.violations()[0].code(), "GL_INVALID_ENUM");
    }

    #[test]
    fn test_arbitrary_data_accepted() {
        let mut input = full_object_input();
        input["data"] = json!({
            "nested": { "deep": [1, 2, { "x": null }] },
            "anything": "goes"
        });
        let object = Object::parse(&input).unwrap();
        assert_eq!(object.data["nested"]["deep"][2]["x"], Value::Null);
    }

    #[test]
    fn test_data_must_be_mapping() {
        let mut input = full_object_input();
        input["data"] = json!(["not", "a", "map"]);
        let err = Object::parse(&input).unwrap_err();
        assert!(err.violations().iter().any(|v| v.path == "data"));
    }

    #[test]
    fn test_missing_created_by_rejected_null_accepted() {
        let mut input = full_object_input();
        input.as_object_mut().unwrap().remove("createdBy");
        let err = Object::parse(&input).unwrap_err();
        assert!(err.violations().iter().any(|v| v.path == "createdBy"));
    }

    #[test]
    fn test_create_rejects_lifecycle_keys() {
        let err = CreateObject::parse(&full_object_input()).unwrap_err();
        let paths: Vec<_> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"id"));
        assert!(paths.contains(&"status"));
        assert!(paths.contains(&"createdAt"));
    }

    #[test]
    fn test_create_minimal() {
        let create = CreateObject::parse(&json!({
            "templateId": "t1",
            "workspaceId": "w1",
            "folderId": "f1",
            "data": {},
            "createdBy": "u1"
        }))
        .unwrap();
        assert!(create.metadata.is_empty());
    }

    #[test]
    fn test_empty_update_valid() {
        assert!(UpdateObject::parse(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_update_single_key() {
        let update = UpdateObject::parse(&json!({ "data": { "title": "v2" } })).unwrap();
        assert!(update.data.is_some());
        assert!(update.folder_id.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_object_roundtrip() {
        let object = Object::parse(&full_object_input()).unwrap();
        let back = serde_json::to_value(&object).unwrap();
        assert_eq!(back["data"]["title"], "Launch plan");
        assert_eq!(back["createdBy"], Value::Null);
        assert_eq!(back["createdAt"], "2024-02-01T09:30:00Z");
        assert_eq!(back["version"], 1);
        assert_eq!(back["metadata"], json!({}));
    }
}
