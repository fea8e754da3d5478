// crates/slack-conformance-core/src/expect.rs
// ============================================================================
// Module: Assertion Contract
// Description: Field-level expectations evaluated against response bodies.
// Purpose: Express literal, presence, and absence checks as data.
// Dependencies: jsonpath_lib, serde, serde_json
// ============================================================================

//! ## Overview
//! An [`Expectation`] names a `JSONPath` into a response body and the condition
//! the selected value must meet. [`evaluate`] checks every expectation and
//! returns all [`Violation`]s so a report shows each mismatch at once.
//! Invariants:
//! - A `null` value counts as absent.
//! - Invalid path expressions produce violations, never panics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::response::ErrorCode;
use crate::response::select_path;

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// A single assertion against a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// The selected value equals a literal.
    Equals {
        /// `JSONPath` expression.
        path: String,
        /// Expected value.
        expected: Value,
    },
    /// The path selects a non-null value.
    Present {
        /// `JSONPath` expression.
        path: String,
    },
    /// The path selects nothing or `null`.
    Absent {
        /// `JSONPath` expression.
        path: String,
    },
    /// The path selects a non-empty string.
    NonEmptyString {
        /// `JSONPath` expression.
        path: String,
    },
}

impl Expectation {
    /// Expects the value at `path` to equal `expected`.
    #[must_use]
    pub fn equals(path: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self::Equals {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// Expects a non-null value at `path`.
    #[must_use]
    pub fn present(path: impl Into<String>) -> Self {
        Self::Present {
            path: path.into(),
        }
    }

    /// Expects no value at `path`.
    #[must_use]
    pub fn absent(path: impl Into<String>) -> Self {
        Self::Absent {
            path: path.into(),
        }
    }

    /// Expects a non-empty string at `path`.
    #[must_use]
    pub fn non_empty_string(path: impl Into<String>) -> Self {
        Self::NonEmptyString {
            path: path.into(),
        }
    }

    /// Expects `ok` to equal the given flag.
    #[must_use]
    pub fn ok(expected: bool) -> Self {
        Self::equals("$.ok", expected)
    }

    /// Expects no `error` field.
    #[must_use]
    pub fn no_error() -> Self {
        Self::absent("$.error")
    }

    /// Expects `error` to equal a documented code.
    #[must_use]
    pub fn error_code(code: ErrorCode) -> Self {
        Self::equals("$.error", code.as_str())
    }

    /// Returns the `JSONPath` expression.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Equals {
                path, ..
            }
            | Self::Present {
                path,
            }
            | Self::Absent {
                path,
            }
            | Self::NonEmptyString {
                path,
            } => path,
        }
    }

    /// Describes the condition for reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Equals {
                expected, ..
            } => format!("== {expected}"),
            Self::Present {
                ..
            } => "present".to_string(),
            Self::Absent {
                ..
            } => "absent".to_string(),
            Self::NonEmptyString {
                ..
            } => "non-empty string".to_string(),
        }
    }

    /// Checks the expectation against a body.
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] when the condition does not hold or the path is
    /// invalid.
    pub fn check(&self, body: &Value) -> Result<(), Violation> {
        let selected = match select_path(body, self.path()) {
            Ok(selected) => selected.filter(|value| !value.is_null()),
            Err(reason) => return Err(self.violation(None, Some(reason))),
        };
        let holds = match (self, selected.as_ref()) {
            (
                Self::Equals {
                    expected, ..
                },
                Some(actual),
            ) => actual == expected,
            (
                Self::Present {
                    ..
                },
                Some(_),
            )
            | (
                Self::Absent {
                    ..
                },
                None,
            ) => true,
            (
                Self::NonEmptyString {
                    ..
                },
                Some(Value::String(text)),
            ) => !text.is_empty(),
            _ => false,
        };
        if holds { Ok(()) } else { Err(self.violation(selected, None)) }
    }

    /// Builds a violation for this expectation.
    fn violation(&self, actual: Option<Value>, detail: Option<String>) -> Violation {
        Violation {
            path: self.path().to_string(),
            expected: self.describe(),
            actual,
            detail,
        }
    }
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// A failed expectation or schema check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// `JSONPath` that was checked (`$` for whole-body checks).
    pub path: String,
    /// Human-readable condition.
    pub expected: String,
    /// Value found at the path, if any.
    pub actual: Option<Value>,
    /// Extra detail (invalid path, schema message, missing setup data).
    pub detail: Option<String>,
}

impl Violation {
    /// Builds a whole-body violation with a free-form detail.
    #[must_use]
    pub fn body(expected: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            path: "$".to_string(),
            expected: expected.into(),
            actual: None,
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}", self.path, self.expected)?;
        match &self.actual {
            Some(actual) => write!(f, ", got {actual}")?,
            None => f.write_str(", got nothing")?,
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Checks every expectation and returns all violations.
#[must_use]
pub fn evaluate(expectations: &[Expectation], body: &Value) -> Vec<Violation> {
    expectations.iter().filter_map(|expectation| expectation.check(body).err()).collect()
}
