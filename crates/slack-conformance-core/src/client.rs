// crates/slack-conformance-core/src/client.rs
// ============================================================================
// Module: Chat HTTP Client
// Description: Async HTTP transport for the Slack chat endpoints.
// Purpose: Send JSON POST requests and capture raw responses with transcripts.
// Dependencies: reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! [`ChatClient`] sends one request per call. There are no retries: any
//! transport failure, non-2xx status or non-JSON body is returned as a
//! [`ClientError`] that keeps the raw body for diagnostics.
//! Invariants:
//! - The bearer token is attached only to [`Auth::Bearer`] requests.
//! - The bearer token is never written to the transcript.
//! - Every attempt that reaches the network appends exactly one
//!   [`TranscriptEntry`]; local failures such as a missing token append none.
//!
//! [`Auth::Bearer`]: crate::request::Auth::Bearer

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::endpoint::Endpoint;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while sending a request.
///
/// # Invariants
/// - `Status` and `InvalidBody` carry the raw response body verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is malformed or uses an unsupported scheme.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// Request body serialization failed.
    #[error("request encoding failed: {0}")]
    Encode(String),
    /// An authenticated request was sent without a configured token.
    #[error("authenticated request requires a bearer token")]
    MissingToken,
    /// Network or protocol failure before a response body was read.
    #[error("http request to {endpoint} failed: {reason}")]
    Http {
        /// Target endpoint.
        endpoint: Endpoint,
        /// Transport error description.
        reason: String,
    },
    /// The service answered with a non-2xx status.
    #[error("{endpoint} returned http status {status}: {body}")]
    Status {
        /// Target endpoint.
        endpoint: Endpoint,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The response body is not valid JSON.
    #[error("{endpoint} returned a non-json body (status {status}): {reason}")]
    InvalidBody {
        /// Target endpoint.
        endpoint: Endpoint,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
        /// Parser error description.
        reason: String,
    },
}

impl ClientError {
    /// Returns the raw response body when one was received.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Status {
                body, ..
            }
            | Self::InvalidBody {
                body, ..
            } => Some(body),
            _ => None,
        }
    }

    /// Returns the HTTP status when a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status {
                status, ..
            }
            | Self::InvalidBody {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One request/response exchange recorded by the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position in the transcript.
    pub sequence: u64,
    /// Target endpoint.
    pub endpoint: Endpoint,
    /// Whether the bearer token was attached.
    pub authenticated: bool,
    /// Request body as sent.
    pub request: Value,
    /// HTTP status when a response arrived.
    pub status: Option<u16>,
    /// Parsed JSON body, or the raw text as a JSON string when unparseable.
    pub response: Value,
    /// Error description for failed exchanges.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Async HTTP client for the chat endpoints.
#[derive(Clone)]
pub struct ChatClient {
    /// Base URL that endpoint paths are joined onto.
    base_url: Url,
    /// Shared reqwest client.
    client: Client,
    /// Bearer token for authenticated requests.
    bearer_token: Option<String>,
    /// Recorded exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url.as_str())
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Creates a client for the base URL with an optional request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] for malformed or non-http(s) URLs and
    /// [`ClientError::Build`] when the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self::with_client(base_url, client))
    }

    /// Creates a client from an existing reqwest client.
    #[must_use]
    pub fn with_client(base_url: Url, client: Client) -> Self {
        Self {
            base_url,
            client,
            bearer_token: None,
            transcript: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Attaches the bearer token used for authenticated requests.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns true when a bearer token is configured.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Returns a snapshot of the transcript.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Returns the absolute URL for an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the path cannot be joined.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ClientError> {
        self.base_url.join(endpoint.path()).map_err(|err| ClientError::InvalidUrl(err.to_string()))
    }

    /// Sends a request and returns the parsed JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-2xx status, non-JSON
    /// body, or when an authenticated request has no token configured.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint_url(request.endpoint)?;
        let mut http_request = self.client.post(url).json(&request.body);
        if request.is_authenticated() {
            let token = self.bearer_token.as_deref().ok_or(ClientError::MissingToken)?;
            http_request = http_request.bearer_auth(token);
        }

        let response = match http_request.send().await {
            Ok(response) => response,
            Err(err) => {
                let error = ClientError::Http {
                    endpoint: request.endpoint,
                    reason: err.to_string(),
                };
                self.record(request, None, Value::Null, Some(error.to_string()));
                return Err(error);
            }
        };
        let status = response.status().as_u16();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(err) => {
                let error = ClientError::Http {
                    endpoint: request.endpoint,
                    reason: format!("failed to read body: {err}"),
                };
                self.record(request, Some(status), Value::Null, Some(error.to_string()));
                return Err(error);
            }
        };

        if !(200..300).contains(&status) {
            let error = ClientError::Status {
                endpoint: request.endpoint,
                status,
                body: raw.clone(),
            };
            self.record(request, Some(status), Value::String(raw), Some(error.to_string()));
            return Err(error);
        }
        let body: Value = match serde_json::from_str(&raw) {
            Ok(body) => body,
            Err(err) => {
                let error = ClientError::InvalidBody {
                    endpoint: request.endpoint,
                    status,
                    body: raw.clone(),
                    reason: err.to_string(),
                };
                self.record(request, Some(status), Value::String(raw), Some(error.to_string()));
                return Err(error);
            }
        };

        self.record(request, Some(status), body.clone(), None);
        Ok(ApiResponse {
            endpoint: request.endpoint,
            status,
            body,
        })
    }

    /// Appends a transcript entry.
    fn record(
        &self,
        request: &ApiRequest,
        status: Option<u16>,
        response: Value,
        error: Option<String>,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            endpoint: request.endpoint,
            authenticated: request.is_authenticated(),
            request: request.body.clone(),
            status,
            response,
            error,
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses and validates a base URL.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim()).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ClientError::InvalidUrl(format!("unsupported scheme: {scheme}")));
        }
    }
    if url.host().is_none() {
        return Err(ClientError::InvalidUrl("missing host".to_string()));
    }
    Ok(url)
}
