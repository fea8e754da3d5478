// system-tests/src/lib.rs
// ============================================================================
// Module: Slack Conformance System Tests Library
// Description: Shared configuration for end-to-end conformance scenarios.
// Purpose: Give the system-test binaries one typed view of their settings.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts configuration shared by the binaries in
//! `system-tests/tests`. The binaries drive the conformance suite against a
//! local Slack stub or, behind the `live-slack` feature, the real service.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
