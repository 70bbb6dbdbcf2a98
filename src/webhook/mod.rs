//! Outbound webhook subscriptions and delivery envelopes.

mod types;

pub use types::{
    CreateWebhook, UpdateWebhook, Webhook, WebhookEvent, WebhookPayload, WebhookStatus,
};
