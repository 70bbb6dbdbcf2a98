//! Audit records for actions performed on objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::template::ActionType;
use crate::validate::{Checker, ClosedEnum, ValidationResult};

/// Webhook delivery status on an action record. The only field of an
/// action record that changes after creation, written back by the
/// dispatch collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    /// Valid transitions: pending to delivered or failed. Terminal states
    /// do not move.
    pub fn can_transition(self, to: DeliveryStatus) -> bool {
        matches!(
            (self, to),
            (DeliveryStatus::Pending, DeliveryStatus::Delivered)
                | (DeliveryStatus::Pending, DeliveryStatus::Failed)
        )
    }
}

impl ClosedEnum for DeliveryStatus {
    const ALLOWED: &'static [&'static str] = &["pending", "delivered", "failed"];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DeliveryStatus::Pending),
            "delivered" => Some(DeliveryStatus::Delivered),
            "failed" => Some(DeliveryStatus::Failed),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed => "failed",
        }
    }
}

/// Immutable audit record of one action performed on an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAction {
    pub id: String,
    pub object_id: String,
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub performed_by: String,
    pub performed_at: String,
    pub webhook_status: DeliveryStatus,
}

impl ObjectAction {
    /// Validates untyped input into a full action record.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let action = Self {
            id: c.require_str("id"),
            object_id: c.require_str("objectId"),
            action_type: c.require_enum("actionType"),
            action_data: c.optional_record("actionData"),
            comment: c.optional_str("comment"),
            performed_by: c.require_str("performedBy"),
            performed_at: c.require_datetime("performedAt"),
            webhook_status: c.enum_or("webhookStatus", DeliveryStatus::Pending),
        };
        c.finish()?;
        Ok(action)
    }
}

/// Creation payload: id, performedAt, and webhookStatus are
/// server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObjectAction {
    pub object_id: String,
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub performed_by: String,
}

impl CreateObjectAction {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let create = Self {
            object_id: c.require_str("objectId"),
            action_type: c.require_enum("actionType"),
            action_data: c.optional_record("actionData"),
            comment: c.optional_str("comment"),
            performed_by: c.require_str("performedBy"),
        };
        c.finish()?;
        Ok(create)
    }
}
