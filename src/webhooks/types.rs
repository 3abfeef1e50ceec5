//! Verified webhook events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A webhook delivery that passed signature verification.
///
/// Read-only projection of the payload's `id`, `type`, `data` and
/// `created_at` fields. Other top-level fields are ignored. Field values are
/// kept as sent, so a numeric `id` or epoch `created_at` is still accepted;
/// the `&str` accessors return `None` for non-string values and the `*_value`
/// accessors expose the raw JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    id: Value,
    #[serde(rename = "type", default)]
    event_type: Value,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    created_at: Value,
}

impl WebhookEvent {
    /// Returns the event id if it is a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_str()
    }

    /// Returns the raw `id` value (`null` if absent).
    #[must_use]
    pub const fn id_value(&self) -> &Value {
        &self.id
    }

    /// Returns the event type, e.g. `payment_intent.succeeded`.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.event_type.as_str()
    }

    /// Returns the raw `type` value (`null` if absent).
    #[must_use]
    pub const fn event_type_value(&self) -> &Value {
        &self.event_type
    }

    /// Returns the event payload (`null` if absent).
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the creation time if it was sent as a string.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_str()
    }

    /// Returns the raw `created_at` value (`null` if absent).
    #[must_use]
    pub const fn created_at_value(&self) -> &Value {
        &self.created_at
    }
}
