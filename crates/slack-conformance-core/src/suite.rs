// crates/slack-conformance-core/src/suite.rs
// ============================================================================
// Module: Contract Suite
// Description: Contract case catalog and sequential suite runner.
// Purpose: Run each case's requests, validate responses, and build reports.
// Dependencies: crate::{client, expect, operations, report, schema, sink}
// ============================================================================

//! ## Overview
//! Each [`CaseId`] is one independent contract check: it performs its own
//! setup requests, sends the request under test and evaluates a fixed list of
//! [`Expectation`]s. [`SuiteRunner`] runs cases strictly in order, one request
//! at a time, and streams progress to an [`EventSink`].
//! Invariants:
//! - A dependent request receives the `ts` returned by its setup step; a setup
//!   response without `ts` fails the case before the dependent request is sent.
//! - Every captured response is validated against the envelope schema.
//! - Transport failures mark the case `error`; violations mark it `fail`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use serde::Serialize;

use crate::client::ChatClient;
use crate::client::ClientError;
use crate::endpoint::Endpoint;
use crate::expect::Expectation;
use crate::expect::Violation;
use crate::expect::evaluate;
use crate::operations::ChatOperations;
use crate::report::CaseReport;
use crate::report::CaseStatus;
use crate::report::StepRecord;
use crate::report::SuiteReport;
use crate::request::Attachment;
use crate::response::ApiResponse;
use crate::response::ErrorCode;
use crate::schedule::DEFAULT_SCHEDULE_OFFSET;
use crate::schedule::PAST_POST_AT;
use crate::schedule::future_post_at;
use crate::schedule::now_utc;
use crate::schema::EnvelopeSchema;
use crate::schema::SchemaError;
use crate::sink::EventSink;
use crate::sink::SuiteEvent;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default message text.
pub const DEFAULT_MESSAGE_TEXT: &str = "Hello World!";
/// Default replacement text for the update case.
pub const DEFAULT_UPDATED_TEXT: &str = "updatedText";
/// Channel literal assumed not to exist.
pub const DEFAULT_INVALID_CHANNEL: &str = "sandbox";
/// Default attachment color.
pub const DEFAULT_ATTACHMENT_COLOR: &str = "FF3333";

// ============================================================================
// SECTION: Case Catalog
// ============================================================================

/// Stable identifiers for the contract cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseId {
    /// Authenticated post succeeds.
    PostMessageSucceeds,
    /// Post echoes `message.text`.
    PostMessageEchoesText,
    /// Post echoes the first attachment text.
    PostMessageEchoesAttachmentText,
    /// Post without a token is rejected.
    PostMessageRequiresAuth,
    /// Post to an unknown channel is rejected.
    PostMessageRejectsUnknownChannel,
    /// Post without text is rejected.
    PostMessageRequiresText,
    /// Delete of a fresh message succeeds.
    DeleteMessageSucceeds,
    /// Delete with a bogus timestamp is rejected.
    DeleteMessageRejectsInvalidTimestamp,
    /// Update replaces the message text.
    UpdateMessageReplacesText,
    /// Schedule in the future succeeds.
    ScheduleMessageInFuture,
    /// Schedule in the past is rejected.
    ScheduleMessageInPast,
}

impl CaseId {
    /// Every case in run order.
    pub const ALL: [Self; 11] = [
        Self::PostMessageSucceeds,
        Self::PostMessageEchoesText,
        Self::PostMessageEchoesAttachmentText,
        Self::PostMessageRequiresAuth,
        Self::PostMessageRejectsUnknownChannel,
        Self::PostMessageRequiresText,
        Self::DeleteMessageSucceeds,
        Self::DeleteMessageRejectsInvalidTimestamp,
        Self::UpdateMessageReplacesText,
        Self::ScheduleMessageInFuture,
        Self::ScheduleMessageInPast,
    ];

    /// Returns the stable snake_case id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostMessageSucceeds => "post_message_succeeds",
            Self::PostMessageEchoesText => "post_message_echoes_text",
            Self::PostMessageEchoesAttachmentText => "post_message_echoes_attachment_text",
            Self::PostMessageRequiresAuth => "post_message_requires_auth",
            Self::PostMessageRejectsUnknownChannel => "post_message_rejects_unknown_channel",
            Self::PostMessageRequiresText => "post_message_requires_text",
            Self::DeleteMessageSucceeds => "delete_message_succeeds",
            Self::DeleteMessageRejectsInvalidTimestamp => {
                "delete_message_rejects_invalid_timestamp"
            }
            Self::UpdateMessageReplacesText => "update_message_replaces_text",
            Self::ScheduleMessageInFuture => "schedule_message_in_future",
            Self::ScheduleMessageInPast => "schedule_message_in_past",
        }
    }

    /// Parses a case id.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|case| case.as_str() == raw)
    }

    /// Returns the endpoint under test.
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::PostMessageSucceeds
            | Self::PostMessageEchoesText
            | Self::PostMessageEchoesAttachmentText
            | Self::PostMessageRequiresAuth
            | Self::PostMessageRejectsUnknownChannel
            | Self::PostMessageRequiresText => Endpoint::PostMessage,
            Self::DeleteMessageSucceeds | Self::DeleteMessageRejectsInvalidTimestamp => {
                Endpoint::Delete
            }
            Self::UpdateMessageReplacesText => Endpoint::Update,
            Self::ScheduleMessageInFuture | Self::ScheduleMessageInPast => {
                Endpoint::ScheduleMessage
            }
        }
    }

    /// Returns a one-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::PostMessageSucceeds => "authenticated post returns ok and no error",
            Self::PostMessageEchoesText => "post echoes message.text",
            Self::PostMessageEchoesAttachmentText => "post echoes message.attachments[0].text",
            Self::PostMessageRequiresAuth => "post without a token returns not_authed",
            Self::PostMessageRejectsUnknownChannel => {
                "post to an unknown channel returns channel_not_found"
            }
            Self::PostMessageRequiresText => "post without text returns no_text",
            Self::DeleteMessageSucceeds => "delete of a fresh message returns ok",
            Self::DeleteMessageRejectsInvalidTimestamp => {
                "delete with a bogus ts returns message_not_found"
            }
            Self::UpdateMessageReplacesText => "update returns the replacement text",
            Self::ScheduleMessageInFuture => "future schedule returns a scheduled_message_id",
            Self::ScheduleMessageInPast => "past schedule returns time_in_past",
        }
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Immutable per-run inputs shared by every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteParams {
    /// Target channel id or name.
    pub channel: String,
    /// Text posted by every message case.
    pub message_text: String,
    /// Replacement text for the update case.
    pub updated_text: String,
    /// Channel literal assumed not to exist.
    pub invalid_channel: String,
    /// Attachment color.
    pub attachment_color: String,
    /// Distance between now and the future schedule time.
    pub schedule_offset: Duration,
}

impl SuiteParams {
    /// Builds parameters for a channel with default literals.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message_text: DEFAULT_MESSAGE_TEXT.to_string(),
            updated_text: DEFAULT_UPDATED_TEXT.to_string(),
            invalid_channel: DEFAULT_INVALID_CHANNEL.to_string(),
            attachment_color: DEFAULT_ATTACHMENT_COLOR.to_string(),
            schedule_offset: DEFAULT_SCHEDULE_OFFSET,
        }
    }

    /// Returns the attachment list sent by the post cases.
    #[must_use]
    pub fn attachments(&self) -> Vec<Attachment> {
        vec![Attachment {
            text: self.message_text.clone(),
            color: self.attachment_color.clone(),
        }]
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Per-case accumulator.
struct CaseRun {
    /// Case being run.
    case: CaseId,
    /// Captured steps.
    steps: Vec<StepRecord>,
    /// Collected violations.
    violations: Vec<Violation>,
}

/// Sequential contract runner.
pub struct SuiteRunner<'a> {
    /// Client shared by every case.
    client: &'a ChatClient,
    /// Run parameters.
    params: &'a SuiteParams,
    /// Compiled envelope schema.
    schema: EnvelopeSchema,
    /// Progress sink.
    sink: &'a dyn EventSink,
    /// Sink failures observed so far.
    sink_errors: Mutex<Vec<String>>,
}

impl<'a> SuiteRunner<'a> {
    /// Creates a runner.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the envelope schema fails to compile.
    pub fn new(
        client: &'a ChatClient,
        params: &'a SuiteParams,
        sink: &'a dyn EventSink,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            client,
            params,
            schema: EnvelopeSchema::new()?,
            sink,
            sink_errors: Mutex::new(Vec::new()),
        })
    }

    /// Runs the given cases in order.
    pub async fn run(&self, cases: &[CaseId]) -> SuiteReport {
        let started_at = now_utc().unix_timestamp();
        self.emit(&SuiteEvent::SuiteStarted {
            cases: cases.len(),
            base_url: self.client.base_url().to_string(),
        });
        let mut reports = Vec::with_capacity(cases.len());
        for case in cases {
            reports.push(self.run_case(*case).await);
        }
        let mut report =
            SuiteReport::new(self.client.base_url().to_string(), started_at, reports, Vec::new());
        self.emit(&SuiteEvent::SuiteFinished {
            passed: report.summary.passed,
            failed: report.summary.failed,
            errored: report.summary.errored,
        });
        report.sink_errors = self.take_sink_errors();
        report
    }

    /// Runs one case and returns its report.
    pub async fn run_case(&self, case: CaseId) -> CaseReport {
        self.emit(&SuiteEvent::CaseStarted {
            case,
        });
        let started = Instant::now();
        let mut run = CaseRun {
            case,
            steps: Vec::new(),
            violations: Vec::new(),
        };
        let outcome = self.execute(&mut run).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (status, error) = match outcome {
            Err(err) => (CaseStatus::Error, Some(err.to_string())),
            Ok(()) if run.violations.is_empty() => (CaseStatus::Pass, None),
            Ok(()) => (CaseStatus::Fail, None),
        };
        self.emit(&SuiteEvent::CaseFinished {
            case,
            status,
            violations: run.violations.len(),
            duration_ms,
        });
        CaseReport {
            case,
            endpoint: case.endpoint(),
            status,
            violations: run.violations,
            error,
            steps: run.steps,
            duration_ms,
        }
    }

    /// Sends the case's requests and collects violations.
    async fn execute(&self, run: &mut CaseRun) -> Result<(), ClientError> {
        let ops = ChatOperations::new(self.client);
        let params = self.params;
        let channel = params.channel.as_str();
        let text = params.message_text.as_str();
        let attachments = params.attachments();

        match run.case {
            CaseId::PostMessageSucceeds => {
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::PostMessage,
                        true,
                        ops.post_message(channel, text, &attachments),
                    )
                    .await?;
                run.expect(&response, &[Expectation::ok(true), Expectation::no_error()]);
            }
            CaseId::PostMessageEchoesText => {
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::PostMessage,
                        true,
                        ops.post_message(channel, text, &attachments),
                    )
                    .await?;
                run.expect(&response, &[Expectation::equals("$.message.text", text)]);
            }
            CaseId::PostMessageEchoesAttachmentText => {
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::PostMessage,
                        true,
                        ops.post_message(channel, text, &attachments),
                    )
                    .await?;
                run.expect(
                    &response,
                    &[Expectation::equals("$.message.attachments[0].text", text)],
                );
            }
            CaseId::PostMessageRequiresAuth => {
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::PostMessage,
                        false,
                        ops.post_message_unauthenticated(channel, text),
                    )
                    .await?;
                run.expect(
                    &response,
                    &[
                        Expectation::present("$.error"),
                        Expectation::error_code(ErrorCode::NotAuthed),
                    ],
                );
            }
            CaseId::PostMessageRejectsUnknownChannel => {
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::PostMessage,
                        true,
                        ops.post_message_invalid_channel(&params.invalid_channel, text),
                    )
                    .await?;
                run.expect(
                    &response,
                    &[
                        Expectation::present("$.error"),
                        Expectation::error_code(ErrorCode::ChannelNotFound),
                    ],
                );
            }
            CaseId::PostMessageRequiresText => {
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::PostMessage,
                        true,
                        ops.post_message_no_text(channel),
                    )
                    .await?;
                run.expect(&response, &[Expectation::error_code(ErrorCode::NoText)]);
            }
            CaseId::DeleteMessageSucceeds => {
                let setup = self
                    .step(
                        run,
                        "setup",
                        Endpoint::PostMessage,
                        true,
                        ops.post_message(channel, text, &[]),
                    )
                    .await?;
                let Some(ts) = run.require_ts(&setup) else {
                    return Ok(());
                };
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::Delete,
                        true,
                        ops.delete_message(channel, &ts),
                    )
                    .await?;
                run.expect(&response, &[Expectation::ok(true), Expectation::no_error()]);
            }
            CaseId::DeleteMessageRejectsInvalidTimestamp => {
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::Delete,
                        true,
                        ops.delete_message_invalid_timestamp(channel, text),
                    )
                    .await?;
                run.expect(
                    &response,
                    &[Expectation::ok(false), Expectation::error_code(ErrorCode::MessageNotFound)],
                );
            }
            CaseId::UpdateMessageReplacesText => {
                let setup = self
                    .step(
                        run,
                        "setup",
                        Endpoint::PostMessage,
                        true,
                        ops.post_message(channel, text, &[]),
                    )
                    .await?;
                let Some(ts) = run.require_ts(&setup) else {
                    return Ok(());
                };
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::Update,
                        true,
                        ops.update_message(channel, &ts, &params.updated_text),
                    )
                    .await?;
                run.expect(
                    &response,
                    &[
                        Expectation::ok(true),
                        Expectation::no_error(),
                        Expectation::equals("$.text", params.updated_text.as_str()),
                    ],
                );
            }
            CaseId::ScheduleMessageInFuture => {
                let post_at = future_post_at(now_utc(), params.schedule_offset);
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::ScheduleMessage,
                        true,
                        ops.schedule_message(channel, text, post_at),
                    )
                    .await?;
                run.expect(
                    &response,
                    &[
                        Expectation::ok(true),
                        Expectation::no_error(),
                        Expectation::non_empty_string("$.scheduled_message_id"),
                    ],
                );
            }
            CaseId::ScheduleMessageInPast => {
                let response = self
                    .step(
                        run,
                        "check",
                        Endpoint::ScheduleMessage,
                        true,
                        ops.schedule_message(channel, text, PAST_POST_AT),
                    )
                    .await?;
                run.expect(
                    &response,
                    &[Expectation::ok(false), Expectation::error_code(ErrorCode::TimeInPast)],
                );
            }
        }
        Ok(())
    }

    /// Awaits one request, records it, and validates the envelope.
    async fn step<F>(
        &self,
        run: &mut CaseRun,
        label: &str,
        endpoint: Endpoint,
        authenticated: bool,
        request: F,
    ) -> Result<ApiResponse, ClientError>
    where
        F: Future<Output = Result<ApiResponse, ClientError>>,
    {
        self.emit(&SuiteEvent::RequestSent {
            case: run.case,
            endpoint,
            authenticated,
        });
        match request.await {
            Ok(response) => {
                self.emit(&SuiteEvent::ResponseReceived {
                    case: run.case,
                    endpoint,
                    status: response.status,
                    ok: response.ok(),
                    error: response.error().map(str::to_string),
                });
                run.violations.extend(self.schema.validate(&response.body).into_iter().map(
                    |mut violation| {
                        violation.detail =
                            violation.detail.map(|detail| format!("{label} {endpoint}: {detail}"));
                        violation
                    },
                ));
                run.steps.push(StepRecord {
                    label: label.to_string(),
                    endpoint,
                    status: Some(response.status),
                    body: Some(response.body.clone()),
                    raw_body: None,
                });
                Ok(response)
            }
            Err(err) => {
                self.emit(&SuiteEvent::RequestFailed {
                    case: run.case,
                    endpoint,
                    error: err.to_string(),
                });
                run.steps.push(StepRecord {
                    label: label.to_string(),
                    endpoint,
                    status: err.status(),
                    body: None,
                    raw_body: err.raw_body().map(str::to_string),
                });
                Err(err)
            }
        }
    }

    /// Sends an event and remembers sink failures.
    fn emit(&self, event: &SuiteEvent) {
        if let Err(err) = self.sink.record(event)
            && let Ok(mut errors) = self.sink_errors.lock()
        {
            errors.push(err.to_string());
        }
    }

    /// Drains recorded sink failures.
    fn take_sink_errors(&self) -> Vec<String> {
        self.sink_errors
            .lock()
            .map_or_else(|_| Vec::new(), |mut errors| std::mem::take(&mut *errors))
    }
}

impl CaseRun {
    /// Evaluates expectations against a response body.
    fn expect(&mut self, response: &ApiResponse, expectations: &[Expectation]) {
        self.violations.extend(evaluate(expectations, &response.body));
    }

    /// Returns the setup `ts`, or records a violation when it is missing.
    fn require_ts(&mut self, setup: &ApiResponse) -> Option<String> {
        match Expectation::non_empty_string("$.ts").check(&setup.body) {
            Ok(()) => setup.ts().map(str::to_string),
            Err(mut violation) => {
                violation.detail =
                    Some("setup post returned no ts; dependent request not sent".to_string());
                self.violations.push(violation);
                None
            }
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Runs the given cases against a client.
///
/// # Errors
///
/// Returns [`SchemaError`] when the envelope schema fails to compile.
pub async fn run_suite(
    client: &ChatClient,
    params: &SuiteParams,
    sink: &dyn EventSink,
    cases: &[CaseId],
) -> Result<SuiteReport, SchemaError> {
    let runner = SuiteRunner::new(client, params, sink)?;
    Ok(runner.run(cases).await)
}
