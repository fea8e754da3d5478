// crates/slack-conformance-core/src/sink.rs
// ============================================================================
// Module: Suite Event Sinks
// Description: Structured run events and reference sink implementations.
// Purpose: Stream case progress without a global logger.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The runner reports progress as [`SuiteEvent`]s to an [`EventSink`].
//! [`JsonLineSink`] writes one JSON object per line, [`MemorySink`] keeps
//! events for inspection, and [`NoopSink`] drops them.
//! Invariants:
//! - Events never carry the bearer token.
//! - A sink failure never changes a case outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use thiserror::Error;

use crate::endpoint::Endpoint;
use crate::report::CaseStatus;
use crate::suite::CaseId;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by event sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing an event failed.
    #[error("event write failed: {0}")]
    WriteFailed(String),
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// Structured progress event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SuiteEvent {
    /// The suite is about to run.
    SuiteStarted {
        /// Number of selected cases.
        cases: usize,
        /// Target base URL.
        base_url: String,
    },
    /// A case started.
    CaseStarted {
        /// Case identifier.
        case: CaseId,
    },
    /// A request is about to be sent.
    RequestSent {
        /// Owning case.
        case: CaseId,
        /// Target endpoint.
        endpoint: Endpoint,
        /// Whether the bearer token is attached.
        authenticated: bool,
    },
    /// A JSON response arrived.
    ResponseReceived {
        /// Owning case.
        case: CaseId,
        /// Target endpoint.
        endpoint: Endpoint,
        /// HTTP status.
        status: u16,
        /// Envelope `ok` flag.
        ok: Option<bool>,
        /// Envelope `error` code.
        error: Option<String>,
    },
    /// A request failed at the transport level.
    RequestFailed {
        /// Owning case.
        case: CaseId,
        /// Target endpoint.
        endpoint: Endpoint,
        /// Error description.
        error: String,
    },
    /// A case finished.
    CaseFinished {
        /// Case identifier.
        case: CaseId,
        /// Outcome.
        status: CaseStatus,
        /// Number of violations.
        violations: usize,
        /// Wall-clock duration in milliseconds.
        duration_ms: u64,
    },
    /// The suite finished.
    SuiteFinished {
        /// Passed cases.
        passed: usize,
        /// Failed cases.
        failed: usize,
        /// Errored cases.
        errored: usize,
    },
}

// ============================================================================
// SECTION: Sink Trait
// ============================================================================

/// Receives suite events.
pub trait EventSink: Send + Sync {
    /// Records one event.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the event cannot be recorded.
    fn record(&self, event: &SuiteEvent) -> Result<(), SinkError>;
}

// ============================================================================
// SECTION: Implementations
// ============================================================================

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: &SuiteEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes events as JSON lines.
pub struct JsonLineSink<W: Write + Send> {
    /// Output writer.
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLineSink<W> {
    /// Creates a sink over a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> EventSink for JsonLineSink<W> {
    fn record(&self, event: &SuiteEvent) -> Result<(), SinkError> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| SinkError::WriteFailed("event writer mutex poisoned".to_string()))?;
        serde_json::to_writer(&mut *guard, event)
            .map_err(|err| SinkError::WriteFailed(err.to_string()))?;
        guard.write_all(b"\n").map_err(|err| SinkError::WriteFailed(err.to_string()))?;
        guard.flush().map_err(|err| SinkError::WriteFailed(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Recorded events.
    events: Mutex<Vec<SuiteEvent>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<SuiteEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &SuiteEvent) -> Result<(), SinkError> {
        self.events
            .lock()
            .map_err(|_| SinkError::WriteFailed("event buffer mutex poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }
}
