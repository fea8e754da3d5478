// crates/slack-conformance-core/src/request.rs
// ============================================================================
// Module: Request Model
// Description: Typed request bodies for the Slack chat endpoints.
// Purpose: Build JSON request payloads with explicit optional fields.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Request bodies are plain serde structs. Optional fields are dropped from the
//! JSON entirely when absent, which is how the suite expresses "field omitted"
//! cases such as a post without `text`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::client::ClientError;
use crate::endpoint::Endpoint;

// ============================================================================
// SECTION: Body Types
// ============================================================================

/// Legacy message attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Attachment body text.
    pub text: String,
    /// Hex color without the leading `#`.
    pub color: String,
}

/// Body for `chat.postMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMessageBody {
    /// Target channel id or name.
    pub channel: String,
    /// Message text; omitted from the payload when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Attachments; omitted from the payload when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// Body for `chat.delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteMessageBody {
    /// Channel holding the message.
    pub channel: String,
    /// Timestamp of the message to delete.
    pub ts: String,
    /// Extra text field; the service ignores it for deletes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Body for `chat.update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateMessageBody {
    /// Channel holding the message.
    pub channel: String,
    /// Replacement text.
    pub text: String,
    /// Timestamp of the message to update.
    pub ts: String,
}

/// Body for `chat.scheduleMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleMessageBody {
    /// Target channel id or name.
    pub channel: String,
    /// Message text.
    pub text: String,
    /// Unix epoch seconds at which the message is sent.
    pub post_at: i64,
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Authorization mode for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Auth {
    /// Send `Authorization: Bearer <token>`.
    Bearer,
    /// Send no `Authorization` header.
    Omitted,
}

/// A single request ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Target endpoint.
    pub endpoint: Endpoint,
    /// Authorization mode.
    pub auth: Auth,
    /// JSON request body.
    pub body: Value,
}

impl ApiRequest {
    /// Builds a request from a serializable body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] when the body cannot be serialized.
    pub fn new<T: Serialize>(
        endpoint: Endpoint,
        auth: Auth,
        body: &T,
    ) -> Result<Self, ClientError> {
        let body = serde_json::to_value(body).map_err(|err| ClientError::Encode(err.to_string()))?;
        Ok(Self {
            endpoint,
            auth,
            body,
        })
    }

    /// Returns true when the request carries the bearer token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.auth, Auth::Bearer)
    }
}
