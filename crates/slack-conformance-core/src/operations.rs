// crates/slack-conformance-core/src/operations.rs
// ============================================================================
// Module: Chat Operations
// Description: The request shapes the contract cases send.
// Purpose: Build each documented request and send it through the client.
// Dependencies: crate::client, crate::request
// ============================================================================

//! ## Overview
//! [`ChatOperations`] is a thin layer over [`ChatClient`]: each method builds
//! one literal request and returns the captured [`ApiResponse`]. Assertions
//! live in [`crate::suite`], not here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::client::ChatClient;
use crate::client::ClientError;
use crate::endpoint::Endpoint;
use crate::request::ApiRequest;
use crate::request::Attachment;
use crate::request::Auth;
use crate::request::DeleteMessageBody;
use crate::request::PostMessageBody;
use crate::request::ScheduleMessageBody;
use crate::request::UpdateMessageBody;
use crate::response::ApiResponse;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Timestamp literal that never identifies a message.
pub const INVALID_TIMESTAMP: &str = "invalidTimestamp";

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Chat endpoint operations bound to a client.
#[derive(Debug, Clone, Copy)]
pub struct ChatOperations<'a> {
    /// Transport used for every request.
    client: &'a ChatClient,
}

impl<'a> ChatOperations<'a> {
    /// Binds operations to a client.
    #[must_use]
    pub const fn new(client: &'a ChatClient) -> Self {
        Self {
            client,
        }
    }

    /// Posts an authenticated message with optional attachments.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be sent or decoded.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        attachments: &[Attachment],
    ) -> Result<ApiResponse, ClientError> {
        let body = PostMessageBody {
            channel: channel.to_string(),
            text: Some(text.to_string()),
            attachments: attachments.to_vec(),
        };
        self.send(Endpoint::PostMessage, Auth::Bearer, &body).await
    }

    /// Posts a message without an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be sent or decoded.
    pub async fn post_message_unauthenticated(
        &self,
        channel: &str,
        text: &str,
    ) -> Result<ApiResponse, ClientError> {
        let body = PostMessageBody {
            channel: channel.to_string(),
            text: Some(text.to_string()),
            attachments: Vec::new(),
        };
        self.send(Endpoint::PostMessage, Auth::Omitted, &body).await
    }

    /// Posts to a channel that does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be sent or decoded.
    pub async fn post_message_invalid_channel(
        &self,
        invalid_channel: &str,
        text: &str,
    ) -> Result<ApiResponse, ClientError> {
        self.post_message(invalid_channel, text, &[]).await
    }

    /// Posts with the `text` field omitted.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be sent or decoded.
    pub async fn post_message_no_text(&self, channel: &str) -> Result<ApiResponse, ClientError> {
        let body = PostMessageBody {
            channel: channel.to_string(),
            text: None,
            attachments: Vec::new(),
        };
        self.send(Endpoint::PostMessage, Auth::Bearer, &body).await
    }

    /// Deletes the message identified by `ts`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be sent or decoded.
    pub async fn delete_message(
        &self,
        channel: &str,
        ts: &str,
    ) -> Result<ApiResponse, ClientError> {
        let body = DeleteMessageBody {
            channel: channel.to_string(),
            ts: ts.to_string(),
            text: None,
        };
        self.send(Endpoint::Delete, Auth::Bearer, &body).await
    }

    /// Deletes using [`INVALID_TIMESTAMP`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be sent or decoded.
    pub async fn delete_message_invalid_timestamp(
        &self,
        channel: &str,
        text: &str,
    ) -> Result<ApiResponse, ClientError> {
        let body = DeleteMessageBody {
            channel: channel.to_string(),
            ts: INVALID_TIMESTAMP.to_string(),
            text: Some(text.to_string()),
        };
        self.send(Endpoint::Delete, Auth::Bearer, &body).await
    }

    /// Replaces the text of the message identified by `ts`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be sent or decoded.
    pub async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        new_text: &str,
    ) -> Result<ApiResponse, ClientError> {
        let body = UpdateMessageBody {
            channel: channel.to_string(),
            text: new_text.to_string(),
            ts: ts.to_string(),
        };
        self.send(Endpoint::Update, Auth::Bearer, &body).await
    }

    /// Schedules a message for `post_at` (unix epoch seconds).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be sent or decoded.
    pub async fn schedule_message(
        &self,
        channel: &str,
        text: &str,
        post_at: i64,
    ) -> Result<ApiResponse, ClientError> {
        let body = ScheduleMessageBody {
            channel: channel.to_string(),
            text: text.to_string(),
            post_at,
        };
        self.send(Endpoint::ScheduleMessage, Auth::Bearer, &body).await
    }

    /// Encodes and sends a request.
    async fn send<T: serde::Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        auth: Auth,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::new(endpoint, auth, body)?;
        self.client.send(&request).await
    }
}
