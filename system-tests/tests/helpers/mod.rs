// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for conformance system-tests.
// Purpose: Provide the Slack stub, suite harness, and artifact writers.
// ============================================================================

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod harness;
pub mod slack_stub;
pub mod timeouts;
