// crates/slack-conformance-core/src/response.rs
// ============================================================================
// Module: Response Model
// Description: Captured response bodies and documented error codes.
// Purpose: Give assertions typed access to the response envelope.
// Dependencies: jsonpath_lib, serde, serde_json
// ============================================================================

//! ## Overview
//! [`ApiResponse`] keeps the raw JSON body exactly as received so failures can
//! be reported verbatim. Accessors read the envelope fields the contract cares
//! about; [`select_path`] resolves `JSONPath` expressions for assertions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use jsonpath_lib::select;
use serde::Serialize;
use serde_json::Value;

use crate::endpoint::Endpoint;

// ============================================================================
// SECTION: Error Codes
// ============================================================================

/// Error codes documented for the chat endpoints.
///
/// # Invariants
/// - `as_str` returns the exact wire value of the `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No authentication token provided.
    NotAuthed,
    /// Authentication token is invalid.
    InvalidAuth,
    /// Value passed for `channel` was invalid.
    ChannelNotFound,
    /// No message text provided.
    NoText,
    /// No message exists with the requested timestamp.
    MessageNotFound,
    /// The `post_at` value is in the past.
    TimeInPast,
}

impl ErrorCode {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotAuthed => "not_authed",
            Self::InvalidAuth => "invalid_auth",
            Self::ChannelNotFound => "channel_not_found",
            Self::NoText => "no_text",
            Self::MessageNotFound => "message_not_found",
            Self::TimeInPast => "time_in_past",
        }
    }

    /// Parses a wire value into a known code.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "not_authed" => Some(Self::NotAuthed),
            "invalid_auth" => Some(Self::InvalidAuth),
            "channel_not_found" => Some(Self::ChannelNotFound),
            "no_text" => Some(Self::NoText),
            "message_not_found" => Some(Self::MessageNotFound),
            "time_in_past" => Some(Self::TimeInPast),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Response
// ============================================================================

/// A captured HTTP response with a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    /// Endpoint that produced the response.
    pub endpoint: Endpoint,
    /// HTTP status code.
    pub status: u16,
    /// Raw JSON body.
    pub body: Value,
}

impl ApiResponse {
    /// Returns the `ok` flag when present and boolean.
    #[must_use]
    pub fn ok(&self) -> Option<bool> {
        self.body.get("ok").and_then(Value::as_bool)
    }

    /// Returns the raw `error` code.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.str_field("error")
    }

    /// Returns the `error` code when it is one of the documented codes.
    #[must_use]
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error().and_then(ErrorCode::parse)
    }

    /// Returns the message timestamp (`ts`).
    #[must_use]
    pub fn ts(&self) -> Option<&str> {
        self.str_field("ts")
    }

    /// Returns the top-level `text` field.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.str_field("text")
    }

    /// Returns the `scheduled_message_id` field.
    #[must_use]
    pub fn scheduled_message_id(&self) -> Option<&str> {
        self.str_field("scheduled_message_id")
    }

    /// Returns `message.text`.
    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        self.body.get("message").and_then(|message| message.get("text")).and_then(Value::as_str)
    }

    /// Reads a top-level string field.
    fn str_field(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }
}

// ============================================================================
// SECTION: Path Selection
// ============================================================================

/// Selects a value from a JSON document with a `JSONPath` expression.
///
/// A single match is returned as-is; multiple matches are collected into an
/// array; no match yields `None`.
///
/// # Errors
///
/// Returns an error string when the path expression is invalid.
pub fn select_path(document: &Value, path: &str) -> Result<Option<Value>, String> {
    let matches = select(document, path).map_err(|_| format!("invalid jsonpath: {path}"))?;
    match matches.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some((*single).clone())),
        many => Ok(Some(Value::Array(many.iter().map(|value| (*value).clone()).collect()))),
    }
}
