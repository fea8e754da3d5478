// crates/slack-conformance-config/src/env.rs
// ============================================================================
// Module: Environment Overrides
// Description: Environment-backed settings for the conformance suite.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::config::ConfigError;
use crate::secret::BearerToken;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys read by the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConformanceEnv {
    /// Bearer credential.
    Token,
    /// Target channel id or name.
    Channel,
    /// Base URL override.
    BaseUrl,
    /// Request timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Config file path when `--config` is not given.
    ConfigPath,
}

impl ConformanceEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 5] =
        [Self::Token, Self::Channel, Self::BaseUrl, Self::TimeoutSeconds, Self::ConfigPath];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "SLACK_TOKEN",
            Self::Channel => "SLACK_CHANNEL",
            Self::BaseUrl => "SLACK_BASE_URL",
            Self::TimeoutSeconds => "SLACK_CONFORMANCE_TIMEOUT_SEC",
            Self::ConfigPath => "SLACK_CONFORMANCE_CONFIG",
        }
    }
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Values read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvOverrides {
    /// Bearer credential.
    pub token: Option<BearerToken>,
    /// Target channel.
    pub channel: Option<String>,
    /// Base URL override.
    pub base_url: Option<String>,
    /// Timeout override.
    pub timeout: Option<Duration>,
}

impl EnvOverrides {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] when a value is not valid UTF-8, is empty,
    /// or is not a positive timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = read_env_nonempty(ConformanceEnv::Token)?.map(BearerToken::new);
        let channel = read_env_nonempty(ConformanceEnv::Channel)?;
        let base_url = read_env_nonempty(ConformanceEnv::BaseUrl)?;
        let timeout = read_env_nonempty(ConformanceEnv::TimeoutSeconds)?
            .map(|value| parse_timeout_seconds(ConformanceEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        Ok(Self {
            token,
            channel,
            base_url,
            timeout,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::Env`] when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Env(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
pub(crate) fn read_env_nonempty(key: ConformanceEnv) -> Result<Option<String>, ConfigError> {
    let name = key.as_str();
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Env(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses a positive timeout in whole seconds.
///
/// # Errors
///
/// Returns [`ConfigError::Env`] when the value is non-numeric or zero.
pub(crate) fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        ConfigError::Env(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(ConfigError::Env(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
