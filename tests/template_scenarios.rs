//! End-to-end template and object scenarios across the whole layer:
//! parse, default substitution, registry resolution, data validation,
//! and the API envelope a handler would return.

use greenlight::api::ApiResponse;
use greenlight::lifecycle::{event_for, status_after};
use greenlight::object::{CreateObject, Object, ObjectStatus, validate_data};
use greenlight::template::{
    ActionColor, ActionType, CreateTemplate, Template, TemplateRegistry, TemplateStatus,
    UpdateTemplate,
};
use greenlight::webhook::WebhookEvent;
use serde_json::{json, Value};

fn review_template_input() -> Value {
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
fn full_template_scenario_applies_every_default() {
    let template = Template::parse(&review_template_input()).unwrap();

    assert_eq!(template.version, 1);
    assert_eq!(template.status, TemplateStatus::Draft);
    assert!(!template.field_schema[0].required);
    let action = &template.action_schema[0];
    assert!(!action.requires_comment);
    assert!(!action.allow_edit);
    assert_eq!(action.color, ActionColor::Blue);
    assert!(action.webhook_enabled);

    // Timestamps survive verbatim through a full round trip.
    let back = serde_json::to_value(&template).unwrap();
    assert_eq!(back["createdAt"], "2024-01-01T00:00:00Z");
    assert_eq!(back["updatedAt"], "2024-01-01T00:00:00Z");
}

#[test]
fn create_then_update_flow() {
    let create = CreateTemplate::parse(&json!({
        "workspaceId": "w1",
        "folderId": null,
        "name": "Contract review",
        "fieldSchema": [
            { "id": "body", "type": "markdown", "label": "Body", "required": true }
        ],
        "actionSchema": [
            { "id": "sign", "type": "approve", "label": "Sign off", "requiresComment": true }
        ],
        "status": "draft",
        "createdBy": "legal-bot"
    }))
    .unwrap();
    assert!(create.folder_id.is_none());
    assert!(create.action_schema[0].requires_comment);

    let update = UpdateTemplate::parse(&json!({
        "status": "active",
        "folderId": "contracts"
    }))
    .unwrap();
    assert_eq!(update.status, Some(TemplateStatus::Active));
    assert_eq!(update.folder_id, Some(Some("contracts".to_string())));
    assert!(update.name.is_none());
}

#[test]
fn object_validated_against_registered_template() {
    let mut registry = TemplateRegistry::new();
    let template = Template::parse(&json!({
        "id": "t-expense",
        "workspaceId": "w1",
        "folderId": null,
        "name": "Expense",
        "fieldSchema": [
            { "id": "amount", "type": "text", "label": "Amount", "required": true,
              "validation": { "pattern": "^[0-9]+$" } },
            { "id": "category", "type": "select", "label": "Category",
              "options": [
                  { "label": "Travel", "value": "travel" },
                  { "label": "Meals", "value": "meals" }
              ] }
        ],
        "actionSchema": [{ "id": "ok", "type": "approve", "label": "Approve" }],
        "status": "active",
        "createdBy": "u1",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    registry.register(template).unwrap();

    let object = Object::parse(&json!({
        "id": "o1",
        "templateId": "t-expense",
        "workspaceId": "w1",
        "folderId": null,
        "status": "pending",
        "data": { "amount": "120", "category": "travel" },
        "createdBy": "u2",
        "createdAt": "2024-01-05T08:00:00Z",
        "updatedAt": "2024-01-05T08:00:00Z"
    }))
    .unwrap();
    registry.validate_object(&object).unwrap();

    // Entity validation accepts arbitrary data; the per-field check
    // against the template is what rejects it.
    let bad = Object::parse(&json!({
        "id": "o2",
        "templateId": "t-expense",
        "workspaceId": "w1",
        "folderId": null,
        "status": "pending",
        "data": { "amount": "lots", "category": "bribes" },
        "createdBy": "u2",
        "createdAt": "2024-01-05T08:00:00Z",
        "updatedAt": "2024-01-05T08:00:00Z"
    }))
    .unwrap();
    let err = registry.validate_object(&bad).unwrap_err();
    let msg = format!("{}", err);
    assert!(msg.contains("data.amount"));
    assert!(msg.contains("data.category"));
}

#[test]
fn create_object_starts_pending_by_contract() {
    let create = CreateObject::parse(&json!({
        "templateId": "t1",
        "workspaceId": "w1",
        "folderId": null,
        "data": { "f1": "hello" },
        "createdBy": null
    }))
    .unwrap();
    assert!(create.metadata.is_empty());

    // The approve action then moves the object and raises the event.
    assert_eq!(status_after(ActionType::Approve), Some(ObjectStatus::Approved));
    assert_eq!(event_for(ActionType::Approve), Some(WebhookEvent::ObjectApproved));
}

#[test]
fn handler_envelope_for_validation_failure() {
    let err = Template::parse(&json!({ "name": 42 })).unwrap_err();
    let violation_count = err.violations().len();
    assert!(violation_count > 1, "every violation is reported at once");

    let resp: ApiResponse<Value> = ApiResponse::invalid(err);
    let wire: Value = serde_json::from_str(&resp.to_json()).unwrap();
    assert_eq!(wire["success"], false);
    assert_eq!(wire["error"]["code"], "GL_VALIDATION_FAILED");
    assert_eq!(
        wire["error"]["details"].as_array().unwrap().len(),
        violation_count
    );
}

#[test]
fn data_validation_tolerates_template_evolution() {
    let mut registry = TemplateRegistry::new();
    let mut input = review_template_input();
    registry.register(Template::parse(&input).unwrap()).unwrap();

    // v2 adds a required field; objects resolve against the latest.
    input["version"] = json!(2);
    input["fieldSchema"] = json!([
        { "id": "f1", "type": "text", "label": "Title" },
        { "id": "summary", "type": "textarea", "label": "Summary", "required": true }
    ]);
    let v2 = Template::parse(&input).unwrap();
    registry.register(v2.clone()).unwrap();

    let old_data = json!({ "f1": "written before v2" });
    let err = validate_data(&v2, old_data.as_object().unwrap()).unwrap_err();
    assert_eq!(err.violations()[0].path, "data.summary");
}
