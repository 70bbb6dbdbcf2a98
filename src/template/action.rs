//! Workflow action definitions owned by a template.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{Checker, ClosedEnum, ValidationError, ValidationResult, Violation};

/// Permitted workflow operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Approve,
    Reject,
    RequestChanges,
    #[default]
    Comment,
    Edit,
    View,
}

impl ClosedEnum for ActionType {
    const ALLOWED: &'static [&'static str] = &[
        "approve",
        "reject",
        "request_changes",
        "comment",
        "edit",
        "view",
    ];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(ActionType::Approve),
            "reject" => Some(ActionType::Reject),
            "request_changes" => Some(ActionType::RequestChanges),
            "comment" => Some(ActionType::Comment),
            "edit" => Some(ActionType::Edit),
            "view" => Some(ActionType::View),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            ActionType::Approve => "approve",
            ActionType::Reject => "reject",
            ActionType::RequestChanges => "request_changes",
            ActionType::Comment => "comment",
            ActionType::Edit => "edit",
            ActionType::View => "view",
        }
    }
}

/// Display color for an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionColor {
    Green,
    Red,
    Yellow,
    #[default]
    Blue,
    Gray,
}

impl ClosedEnum for ActionColor {
    const ALLOWED: &'static [&'static str] = &["green", "red", "yellow", "blue", "gray"];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "green" => Some(ActionColor::Green),
            "red" => Some(ActionColor::Red),
            "yellow" => Some(ActionColor::Yellow),
            "blue" => Some(ActionColor::Blue),
            "gray" => Some(ActionColor::Gray),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            ActionColor::Green => "green",
            ActionColor::Red => "red",
            ActionColor::Yellow => "yellow",
            ActionColor::Blue => "blue",
            ActionColor::Gray => "gray",
        }
    }
}

/// One allowed workflow action on objects created from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub requires_comment: bool,
    #[serde(default)]
    pub allow_edit: bool,
    #[serde(default)]
    pub color: ActionColor,
    #[serde(default)]
    pub webhook_enabled: bool,
}

impl Action {
    /// Validates untyped input into an action definition.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut out = Vec::new();
        let action = Self::parse_at(value, "", &mut out);
        if out.is_empty() {
            Ok(action)
        } else {
            Err(ValidationError::new(out))
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
        let action = Self {
            id: c.require_str("id"),
            action_type: c.require_enum("type"),
            label: c.require_str("label"),
            description: c.optional_str("description"),
            requires_comment: c.bool_or("requiresComment", false),
            allow_edit: c.bool_or("allowEdit", false),
            color: c.enum_or("color", ActionColor::Blue),
            webhook_enabled: c.bool_or("webhookEnabled", true),
        };
        c.finish_into(out);
        action
    }
}
