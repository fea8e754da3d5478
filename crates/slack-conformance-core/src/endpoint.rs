// crates/slack-conformance-core/src/endpoint.rs
// ============================================================================
// Module: Chat Endpoints
// Description: Closed set of Slack chat endpoints exercised by the suite.
// Purpose: Map endpoint identifiers to their fixed API paths.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every request the suite sends targets one of four fixed `POST` endpoints.
//! [`Endpoint`] keeps that set closed so paths are never built from strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Endpoint
// ============================================================================

/// Slack chat endpoint exercised by the suite.
///
/// # Invariants
/// - Paths are stable and always start with `/api/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// `chat.postMessage`.
    PostMessage,
    /// `chat.delete`.
    Delete,
    /// `chat.update`.
    Update,
    /// `chat.scheduleMessage`.
    ScheduleMessage,
}

impl Endpoint {
    /// All endpoints in declaration order.
    pub const ALL: [Self; 4] =
        [Self::PostMessage, Self::Delete, Self::Update, Self::ScheduleMessage];

    /// Returns the API method name (for example `chat.postMessage`).
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::PostMessage => "chat.postMessage",
            Self::Delete => "chat.delete",
            Self::Update => "chat.update",
            Self::ScheduleMessage => "chat.scheduleMessage",
        }
    }

    /// Returns the request path relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::PostMessage => "/api/chat.postMessage",
            Self::Delete => "/api/chat.delete",
            Self::Update => "/api/chat.update",
            Self::ScheduleMessage => "/api/chat.scheduleMessage",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POST {}", self.path())
    }
}
