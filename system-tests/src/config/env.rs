// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment keys and parsing for system-test settings.
// Purpose: Fail closed on malformed overrides before any scenario runs.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Every key is optional. A key that is set must be valid UTF-8 and
//! non-empty, otherwise [`SystemTestConfig::load`] returns an error naming it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys read by the system tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Directory that receives per-test artifacts.
    RunRoot,
    /// Minimum client timeout in seconds.
    TimeoutSeconds,
    /// Permit writing into a run root that already holds artifacts.
    AllowOverwrite,
}

impl SystemTestEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 3] = [Self::RunRoot, Self::TimeoutSeconds, Self::AllowOverwrite];

    /// Returns the environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "SLACK_CONFORMANCE_SYSTEM_TEST_RUN_ROOT",
            Self::TimeoutSeconds => "SLACK_CONFORMANCE_SYSTEM_TEST_TIMEOUT_SEC",
            Self::AllowOverwrite => "SLACK_CONFORMANCE_SYSTEM_TEST_ALLOW_OVERWRITE",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// System-test settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Artifact root override.
    pub run_root: Option<PathBuf>,
    /// Timeout floor applied to every scenario client.
    pub timeout: Option<Duration>,
    /// Whether an existing run root may be reused.
    pub allow_overwrite: bool,
}

impl SystemTestConfig {
    /// Loads settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the key when a value is not UTF-8, is blank,
    /// or does not parse.
    pub fn load() -> Result<Self, String> {
        let run_root = read_nonempty(SystemTestEnv::RunRoot)?.map(PathBuf::from);
        let timeout = read_nonempty(SystemTestEnv::TimeoutSeconds)?
            .map(|raw| parse_seconds(SystemTestEnv::TimeoutSeconds, &raw))
            .transpose()?;
        let allow_overwrite = read_nonempty(SystemTestEnv::AllowOverwrite)?
            .map(|raw| parse_flag(SystemTestEnv::AllowOverwrite, &raw))
            .transpose()?
            .unwrap_or(false);
        Ok(Self {
            run_root,
            timeout,
            allow_overwrite,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a key, rejecting invalid UTF-8 and blank values.
fn read_nonempty(key: SystemTestEnv) -> Result<Option<String>, String> {
    let name = key.as_str();
    let Some(raw) = std::env::var_os(name) else {
        return Ok(None);
    };
    let value = raw.into_string().map_err(|_| format!("{name} must be valid UTF-8"))?;
    if value.trim().is_empty() {
        return Err(format!("{name} must not be empty"));
    }
    Ok(Some(value))
}

/// Parses a positive whole number of seconds.
fn parse_seconds(key: SystemTestEnv, raw: &str) -> Result<Duration, String> {
    let name = key.as_str();
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses `true`/`false`/`1`/`0`.
fn parse_flag(key: SystemTestEnv, raw: &str) -> Result<bool, String> {
    match raw.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        value if value.eq_ignore_ascii_case("true") => Ok(true),
        value if value.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(format!("{} must be 1, 0, true, or false", key.as_str())),
    }
}
