// crates/slack-conformance-core/src/lib.rs
// ============================================================================
// Module: Slack Conformance Core Library
// Description: Request model, HTTP client, assertions, and suite runner.
// Purpose: Exercise the Slack chat endpoints and check documented responses.
// Dependencies: jsonpath_lib, jsonschema, reqwest, serde, thiserror, time, url
// ============================================================================

//! ## Overview
//! `slack-conformance-core` issues fixed requests against the Slack chat API
//! (`chat.postMessage`, `chat.delete`, `chat.update`, `chat.scheduleMessage`)
//! and checks the response bodies against the documented contract.
//!
//! The crate is split into a request model ([`Endpoint`], [`ApiRequest`]), a
//! transport ([`ChatClient`]), the assertion contract ([`Expectation`]), the
//! contract cases ([`CaseId`]) and the runner ([`run_suite`]).
//! Invariants:
//! - Cases run strictly sequentially; each case owns its setup requests.
//! - The bearer token never leaves the client: transcripts, events and reports
//!   omit it.
//! - Transport failures fail the case immediately with the raw response kept.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod endpoint;
pub mod expect;
pub mod operations;
pub mod report;
pub mod request;
pub mod response;
pub mod schedule;
pub mod schema;
pub mod sink;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ChatClient;
pub use client::ClientError;
pub use client::TranscriptEntry;
pub use endpoint::Endpoint;
pub use expect::Expectation;
pub use expect::Violation;
pub use expect::evaluate;
pub use operations::ChatOperations;
pub use operations::INVALID_TIMESTAMP;
pub use report::CaseReport;
pub use report::CaseStatus;
pub use report::ReportError;
pub use report::StepRecord;
pub use report::SuiteSummary;
pub use report::SuiteReport;
pub use request::ApiRequest;
pub use request::Attachment;
pub use request::Auth;
pub use response::ApiResponse;
pub use response::ErrorCode;
pub use schedule::DEFAULT_SCHEDULE_OFFSET;
pub use schedule::PAST_POST_AT;
pub use schedule::future_post_at;
pub use schema::EnvelopeSchema;
pub use schema::SchemaError;
pub use sink::EventSink;
pub use sink::JsonLineSink;
pub use sink::MemorySink;
pub use sink::NoopSink;
pub use sink::SinkError;
pub use sink::SuiteEvent;
pub use suite::CaseId;
pub use suite::SuiteParams;
pub use suite::SuiteRunner;
pub use suite::run_suite;
