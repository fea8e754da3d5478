// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Environment-backed settings for conformance system tests.
// Purpose: Provide typed access to run-root, timeout, and overwrite settings.
// Dependencies: std
// ============================================================================

//! ## Overview
//! System-test settings come from `SLACK_CONFORMANCE_SYSTEM_TEST_*`
//! environment variables. Service credentials are not read here; the live
//! suite resolves them through `slack-conformance-config`.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
