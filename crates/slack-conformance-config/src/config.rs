// crates/slack-conformance-config/src/config.rs
// ============================================================================
// Module: Suite Configuration
// Description: Layered configuration model and validation.
// Purpose: Turn defaults, a TOML file and env overrides into run inputs.
// Dependencies: serde, slack-conformance-core, thiserror, toml, url
// ============================================================================

//! ## Overview
//! [`FileConfig`] mirrors the TOML file and rejects unknown keys.
//! [`SuiteConfig`] is the validated result of merging defaults, the file and
//! [`EnvOverrides`]; it converts into [`SuiteParams`] and a [`ChatClient`].
//! Invariants:
//! - Environment values override file values, which override defaults.
//! - The token is required and is read only from the environment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use slack_conformance_core::ChatClient;
use slack_conformance_core::ClientError;
use slack_conformance_core::SuiteParams;
use slack_conformance_core::schedule::DEFAULT_SCHEDULE_OFFSET;
use slack_conformance_core::schedule::MAX_SCHEDULE_OFFSET;
use slack_conformance_core::suite::DEFAULT_ATTACHMENT_COLOR;
use slack_conformance_core::suite::DEFAULT_INVALID_CHANNEL;
use slack_conformance_core::suite::DEFAULT_MESSAGE_TEXT;
use slack_conformance_core::suite::DEFAULT_UPDATED_TEXT;
use thiserror::Error;
use url::Url;

use crate::env::ConformanceEnv;
use crate::env::EnvOverrides;
use crate::env::read_env_nonempty;
use crate::secret::BearerToken;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://slack.com";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum message text length accepted by the API.
pub(crate) const MAX_TEXT_LENGTH: usize = 40_000;
/// Maximum channel identifier length.
pub(crate) const MAX_CHANNEL_LENGTH: usize = 256;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable is malformed.
    #[error("config env error: {0}")]
    Env(String),
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: File Model
// ============================================================================

/// Non-secret settings read from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// API base URL.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Target channel.
    pub channel: Option<String>,
    /// Text posted by message cases.
    pub message_text: Option<String>,
    /// Replacement text for the update case.
    pub updated_text: Option<String>,
    /// Channel literal assumed not to exist.
    pub invalid_channel: Option<String>,
    /// Attachment color.
    pub attachment_color: Option<String>,
    /// Distance between now and the future schedule time, in seconds.
    pub schedule_offset_seconds: Option<u64>,
}

impl FileConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, too large, not
    /// UTF-8, or not valid TOML for this model.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content)
    }

    /// Parses TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}

// ============================================================================
// SECTION: Suite Config
// ============================================================================

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// API base URL.
    pub base_url: String,
    /// Request timeout; `None` keeps the client default.
    pub timeout: Option<Duration>,
    /// Bearer credential.
    pub token: BearerToken,
    /// Target channel.
    pub channel: String,
    /// Text posted by message cases.
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

impl SuiteConfig {
    /// Loads configuration from an optional file and the environment.
    ///
    /// The file is `path` when given, else `SLACK_CONFORMANCE_CONFIG` when set;
    /// without either, only defaults and the environment apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any layer is malformed or the merged
    /// configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match resolve_path(path)? {
            Some(resolved) => FileConfig::load(&resolved)?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, EnvOverrides::from_env()?)
    }

    /// Merges defaults, file settings, and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a required value is missing or
    /// the merged configuration fails validation.
    pub fn from_sources(file: FileConfig, env: EnvOverrides) -> Result<Self, ConfigError> {
        let token = env.token.ok_or_else(|| {
            ConfigError::Invalid(format!("{} must be set", ConformanceEnv::Token.as_str()))
        })?;
        let channel = env.channel.or(file.channel).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "{} must be set (or channel in the config file)",
                ConformanceEnv::Channel.as_str()
            ))
        })?;
        let timeout = env.timeout.or_else(|| file.timeout_seconds.map(Duration::from_secs));
        let config = Self {
            base_url: env
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            token,
            channel,
            message_text: file.message_text.unwrap_or_else(|| DEFAULT_MESSAGE_TEXT.to_string()),
            updated_text: file.updated_text.unwrap_or_else(|| DEFAULT_UPDATED_TEXT.to_string()),
            invalid_channel: file
                .invalid_channel
                .unwrap_or_else(|| DEFAULT_INVALID_CHANNEL.to_string()),
            attachment_color: file
                .attachment_color
                .unwrap_or_else(|| DEFAULT_ATTACHMENT_COLOR.to_string()),
            schedule_offset: file
                .schedule_offset_seconds
                .map_or(DEFAULT_SCHEDULE_OFFSET, Duration::from_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.base_url)?;
        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(ConfigError::Invalid(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.token.expose().trim().is_empty() {
            return Err(ConfigError::Invalid("token must be non-empty".to_string()));
        }
        validate_text("channel", &self.channel, MAX_CHANNEL_LENGTH)?;
        validate_text("invalid_channel", &self.invalid_channel, MAX_CHANNEL_LENGTH)?;
        validate_text("message_text", &self.message_text, MAX_TEXT_LENGTH)?;
        validate_text("updated_text", &self.updated_text, MAX_TEXT_LENGTH)?;
        validate_text("attachment_color", &self.attachment_color, MAX_CHANNEL_LENGTH)?;
        if self.channel == self.invalid_channel {
            return Err(ConfigError::Invalid(
                "invalid_channel must differ from channel".to_string(),
            ));
        }
        if self.updated_text == self.message_text {
            return Err(ConfigError::Invalid(
                "updated_text must differ from message_text".to_string(),
            ));
        }
        if self.schedule_offset.is_zero() || self.schedule_offset > MAX_SCHEDULE_OFFSET {
            return Err(ConfigError::Invalid(format!(
                "schedule_offset_seconds must be between 1 and {}",
                MAX_SCHEDULE_OFFSET.as_secs()
            )));
        }
        Ok(())
    }

    /// Returns the per-run case parameters.
    #[must_use]
    pub fn suite_params(&self) -> SuiteParams {
        SuiteParams {
            channel: self.channel.clone(),
            message_text: self.message_text.clone(),
            updated_text: self.updated_text.clone(),
            invalid_channel: self.invalid_channel.clone(),
            attachment_color: self.attachment_color.clone(),
            schedule_offset: self.schedule_offset,
        }
    }

    /// Builds the HTTP client with the configured token and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the client cannot be constructed.
    pub fn build_client(&self) -> Result<ChatClient, ClientError> {
        Ok(ChatClient::new(&self.base_url, self.timeout)?.with_bearer_token(self.token.expose()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the CLI flag or the environment.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    Ok(read_env_nonempty(ConformanceEnv::ConfigPath)?.map(PathBuf::from))
}

/// Validates that the base URL is absolute http(s) with a host.
fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|err| ConfigError::Invalid(format!("base_url is not a valid url: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid("base_url must use http or https".to_string()));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::Invalid("base_url must include a host".to_string()));
    }
    Ok(())
}

/// Validates a required string field against length constraints.
fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > max_len {
        return Err(ConfigError::Invalid(format!("{field} exceeds {max_len} bytes")));
    }
    Ok(())
}
