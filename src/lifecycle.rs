//! The approval lifecycle implicit in the data model: which action moves
//! an object to which status, and which event it raises for webhook
//! dispatch. Applying the transition and persisting it belong to the
//! collaborators; these mappings are the contract they share.

use crate::object::ObjectStatus;
use crate::template::ActionType;
use crate::webhook::WebhookEvent;

/// Status an object moves to after an action, or None when the action
/// leaves the status untouched (comment, view).
pub fn status_after(action: ActionType) -> Option<ObjectStatus> {
    match action {
        ActionType::Approve => Some(ObjectStatus::Approved),
        ActionType::Reject => Some(ObjectStatus::Rejected),
        ActionType::RequestChanges => Some(ObjectStatus::ChangesRequested),
        ActionType::Edit => Some(ObjectStatus::InProgress),
        ActionType::Comment | ActionType::View => None,
    }
}

/// Event raised for webhook dispatch after an action, or None when no
/// subscriber-visible event occurs (view).
pub fn event_for(action: ActionType) -> Option<WebhookEvent> {
    match action {
        ActionType::Approve => Some(WebhookEvent::ObjectApproved),
        ActionType::Reject => Some(WebhookEvent::ObjectRejected),
        ActionType::RequestChanges => Some(WebhookEvent::ObjectChangesRequested),
        ActionType::Edit => Some(WebhookEvent::ObjectEdited),
        ActionType::Comment => Some(WebhookEvent::ObjectCommented),
        ActionType::View => None,
    }
}
