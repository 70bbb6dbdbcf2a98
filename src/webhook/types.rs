//! Workspace-level webhook subscriptions and the delivery envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validate::{Checker, ClosedEnum, ValidationResult};

/// Events a webhook may subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WebhookEvent {
    #[default]
    #[serde(rename = "object.created")]
    ObjectCreated,
    #[serde(rename = "object.approved")]
    ObjectApproved,
    #[serde(rename = "object.rejected")]
    ObjectRejected,
    #[serde(rename = "object.changes_requested")]
    ObjectChangesRequested,
    #[serde(rename = "object.edited")]
    ObjectEdited,
    #[serde(rename = "object.commented")]
    ObjectCommented,
    #[serde(rename = "template.approved")]
    TemplateApproved,
}

impl ClosedEnum for WebhookEvent {
    const ALLOWED: &'static [&'static str] = &[
        "object.created",
        "object.approved",
        "object.rejected",
        "object.changes_requested",
        "object.edited",
        "object.commented",
        "template.approved",
    ];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "object.created" => Some(WebhookEvent::ObjectCreated),
            "object.approved" => Some(WebhookEvent::ObjectApproved),
            "object.rejected" => Some(WebhookEvent::ObjectRejected),
            "object.changes_requested" => Some(WebhookEvent::ObjectChangesRequested),
            "object.edited" => Some(WebhookEvent::ObjectEdited),
            "object.commented" => Some(WebhookEvent::ObjectCommented),
            "template.approved" => Some(WebhookEvent::TemplateApproved),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            WebhookEvent::ObjectCreated => "object.created",
            WebhookEvent::ObjectApproved => "object.approved",
            WebhookEvent::ObjectRejected => "object.rejected",
            WebhookEvent::ObjectChangesRequested => "object.changes_requested",
            WebhookEvent::ObjectEdited => "object.edited",
            WebhookEvent::ObjectCommented => "object.commented",
            WebhookEvent::TemplateApproved => "template.approved",
        }
    }
}

/// Whether a subscription currently receives deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    #[default]
    Active,
    Inactive,
}

impl ClosedEnum for WebhookStatus {
    const ALLOWED: &'static [&'static str] = &["active", "inactive"];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "active" => Some(WebhookStatus::Active),
            "inactive" => Some(WebhookStatus::Inactive),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            WebhookStatus::Active => "active",
            WebhookStatus::Inactive => "inactive",
        }
    }
}

/// A workspace-level outbound subscription.
///
/// The secret is opaque here; the dispatch collaborator uses it to sign
/// payloads. The url must be a well-formed absolute URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub url: String,
    pub events: Vec<WebhookEvent>,
    pub secret: String,
    pub status: WebhookStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Webhook {
    /// Validates untyped input into a full webhook record.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let webhook = Self {
            id: c.require_str("id"),
            workspace_id: c.require_str("workspaceId"),
            name: c.require_str("name"),
            url: c.require_url("url"),
            events: c.enum_array("events"),
            secret: c.require_str("secret"),
            status: c.enum_or("status", WebhookStatus::Active),
            created_at: c.require_datetime("createdAt"),
            updated_at: c.require_datetime("updatedAt"),
        };
        c.finish()?;
        Ok(webhook)
    }

    /// Whether this subscription should receive the given event.
    pub fn subscribes_to(&self, event: WebhookEvent) -> bool {
        self.status == WebhookStatus::Active && self.events.contains(&event)
    }
}

/// Creation payload: id, createdAt, and updatedAt are server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhook {
    pub workspace_id: String,
    pub name: String,
    pub url: String,
    pub events: Vec<WebhookEvent>,
    pub secret: String,
    pub status: WebhookStatus,
}

impl CreateWebhook {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let create = Self {
            workspace_id: c.require_str("workspaceId"),
            name: c.require_str("name"),
            url: c.require_url("url"),
            events: c.enum_array("events"),
            secret: c.require_str("secret"),
            status: c.enum_or("status", WebhookStatus::Active),
        };
        c.finish()?;
        Ok(create)
    }
}

/// Partial update payload: absent key means "leave unchanged".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<WebhookEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WebhookStatus>,
}

impl UpdateWebhook {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let url = if value.get("url").is_some() {
            Some(c.require_url("url"))
        } else {
            None
        };
        let update = Self {
            workspace_id: c.optional_str("workspaceId"),
            name: c.optional_str("name"),
            url,
            events: c.optional_enum_array("events"),
            secret: c.optional_str("secret"),
            status: c.optional_enum("status"),
        };
        c.finish()?;
        Ok(update)
    }

    /// True when no field was supplied: the update is a no-op.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Envelope delivered to a subscriber. The dispatch collaborator signs
/// it with the webhook's secret; the data shape depends on the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub event: WebhookEvent,
    pub timestamp: String,
    pub workspace_id: String,
    pub data: Map<String, Value>,
}

impl WebhookPayload {
    /// Validates untyped input into a delivery envelope.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let payload = Self {
            event: c.require_enum("event"),
            timestamp: c.require_datetime("timestamp"),
            workspace_id: c.require_str("workspaceId"),
            data: c.require_record("data"),
        };
        c.finish()?;
        Ok(payload)
    }
}
