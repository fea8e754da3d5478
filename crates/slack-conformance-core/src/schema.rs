// crates/slack-conformance-core/src/schema.rs
// ============================================================================
// Module: Response Envelope Schema
// Description: JSON Schema for the documented chat API response envelope.
// Purpose: Reject malformed envelopes before field assertions run.
// Dependencies: jsonschema, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every chat API response shares an envelope: a required boolean `ok`, an
//! `error` code when `ok` is false, and endpoint-specific string fields.
//! [`EnvelopeSchema`] compiles that shape once (Draft 2020-12) and reports
//! each schema failure as a [`Violation`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::expect::Violation;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema compilation errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The envelope schema failed to compile.
    #[error("invalid envelope schema: {0}")]
    Compile(String),
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Returns the envelope schema document.
#[must_use]
pub fn envelope_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "chat API response envelope",
        "type": "object",
        "required": ["ok"],
        "properties": {
            "ok": { "type": "boolean" },
            "error": { "type": "string", "minLength": 1 },
            "ts": { "type": "string" },
            "text": { "type": "string" },
            "scheduled_message_id": { "type": "string" },
            "message": { "type": "object" }
        },
        "if": { "properties": { "ok": { "const": false } } },
        "then": { "required": ["error"] }
    })
}

/// Compiled envelope validator.
pub struct EnvelopeSchema {
    /// Compiled Draft 2020-12 validator.
    validator: Validator,
}

impl EnvelopeSchema {
    /// Compiles the envelope schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] when the schema is rejected.
    pub fn new() -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&envelope_schema())
            .map_err(|err| SchemaError::Compile(err.to_string()))?;
        Ok(Self {
            validator,
        })
    }

    /// Validates a body and returns one violation per schema error.
    #[must_use]
    pub fn validate(&self, body: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(body)
            .map(|err| Violation::body("response envelope schema", err.to_string()))
            .collect()
    }
}
