// crates/slack-conformance-config/src/secret.rs
// ============================================================================
// Module: Bearer Token
// Description: Wrapper that keeps the API token out of logs.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`BearerToken`] prints `<redacted>` through both `Debug` and `Display`;
//! only [`BearerToken::expose`] yields the raw value.

use std::fmt;

/// Placeholder printed instead of the token.
const REDACTED: &str = "<redacted>";

/// Bearer credential for authenticated requests.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    /// Raw token value.
    raw: String,
}

impl BearerToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
        }
    }

    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.raw
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&REDACTED).finish()
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
