// crates/slack-conformance-config/src/lib.rs
// ============================================================================
// Module: Slack Conformance Config Library
// Description: Typed suite configuration and loaders.
// Purpose: Resolve credentials and run literals once, before any request.
// Dependencies: serde, slack-conformance-core, thiserror, toml, url
// ============================================================================

//! ## Overview
//! [`SuiteConfig`] is assembled from three layers, later layers winning:
//! built-in defaults, an optional TOML file, and environment variables.
//! Invariants:
//! - The bearer token comes only from `SLACK_TOKEN`, never from a file.
//! - Loading fails closed on empty, non-UTF-8 or out-of-range values.
//! - [`BearerToken`] never prints its value through `Debug` or `Display`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod env;
pub mod secret;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::FileConfig;
pub use config::SuiteConfig;
pub use env::ConformanceEnv;
pub use env::EnvOverrides;
pub use env::read_env_strict;
pub use secret::BearerToken;
