// crates/slack-conformance-core/src/report.rs
// ============================================================================
// Module: Suite Reports
// Description: Per-case and per-run outcome records.
// Purpose: Serialize results as canonical JSON and render Markdown summaries.
// Dependencies: serde, serde_jcs, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`CaseReport`] records one case: its status, every violation, the
//! transport error (if any) and the responses captured along the way.
//! [`SuiteReport`] aggregates cases and renders canonical JSON (JCS) or a
//! Markdown summary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::endpoint::Endpoint;
use crate::expect::Violation;
use crate::suite::CaseId;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Report rendering errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Canonical JSON serialization failed.
    #[error("report serialization failed: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Case Reports
// ============================================================================

/// Outcome of a single case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Every expectation held.
    Pass,
    /// At least one expectation or schema check failed.
    Fail,
    /// A request failed before a JSON response was captured.
    Error,
}

impl CaseStatus {
    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

/// A response (or failure) captured during a case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Step label (`setup` or `check`).
    pub label: String,
    /// Target endpoint.
    pub endpoint: Endpoint,
    /// HTTP status when a response arrived.
    pub status: Option<u16>,
    /// Parsed response body.
    pub body: Option<Value>,
    /// Raw body kept from a transport failure.
    pub raw_body: Option<String>,
}

/// Report for one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    /// Case identifier.
    pub case: CaseId,
    /// Endpoint under test.
    pub endpoint: Endpoint,
    /// Outcome.
    pub status: CaseStatus,
    /// Failed expectations and schema checks.
    pub violations: Vec<Violation>,
    /// Transport error description.
    pub error: Option<String>,
    /// Captured steps in send order.
    pub steps: Vec<StepRecord>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

// ============================================================================
// SECTION: Suite Report
// ============================================================================

/// Case counts by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    /// Total cases.
    pub total: usize,
    /// Passed cases.
    pub passed: usize,
    /// Failed cases.
    pub failed: usize,
    /// Errored cases.
    pub errored: usize,
}

/// Report for a suite run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    /// Target base URL.
    pub base_url: String,
    /// Run start as unix epoch seconds.
    pub started_at: i64,
    /// Case counts.
    pub summary: SuiteSummary,
    /// Per-case reports in run order.
    pub cases: Vec<CaseReport>,
    /// Event sink failures observed during the run.
    pub sink_errors: Vec<String>,
}

impl SuiteReport {
    /// Builds a report and computes the summary.
    #[must_use]
    pub fn new(
        base_url: String,
        started_at: i64,
        cases: Vec<CaseReport>,
        sink_errors: Vec<String>,
    ) -> Self {
        let count = |status: CaseStatus| cases.iter().filter(|case| case.status == status).count();
        let summary = SuiteSummary {
            total: cases.len(),
            passed: count(CaseStatus::Pass),
            failed: count(CaseStatus::Fail),
            errored: count(CaseStatus::Error),
        };
        Self {
            base_url,
            started_at,
            summary,
            cases,
            sink_errors,
        }
    }

    /// Returns true when every case passed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.summary.passed == self.summary.total
    }

    /// Returns the report for a case, if it ran.
    #[must_use]
    pub fn case(&self, case: CaseId) -> Option<&CaseReport> {
        self.cases.iter().find(|report| report.case == case)
    }

    /// Serializes the report as canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] when serialization fails.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, ReportError> {
        serde_jcs::to_vec(self).map_err(|err| ReportError::Serialize(err.to_string()))
    }

    /// Renders a Markdown summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Slack Conformance Report\n\n");
        out.push_str("## Summary\n\n");
        out.push_str(&format!("- Base URL: {}\n", self.base_url));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n", self.summary.failed));
        out.push_str(&format!("- Errored: {}\n", self.summary.errored));
        out.push_str("\n## Cases\n\n");
        if self.cases.is_empty() {
            out.push_str("- None\n");
        }
        for case in &self.cases {
            out.push_str(&format!(
                "- [{}] {} ({}, {} ms)\n",
                case.status.as_str(),
                case.case.as_str(),
                case.endpoint,
                case.duration_ms
            ));
            if let Some(error) = &case.error {
                out.push_str(&format!("  - error: {error}\n"));
            }
            for violation in &case.violations {
                out.push_str(&format!("  - {violation}\n"));
            }
        }
        out
    }
}
