//! Error types for the parsetypes library.

use std::fmt;

use thiserror::Error;

use crate::schema::{ScalarKind, TypeDescriptor};

/// The category a configured literal (or the list delimiter) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralRole {
    ListDelimiter,
    None,
    True,
    False,
    Inf,
    Nan,
}

impl fmt::Display for LiteralRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralRole::ListDelimiter => "list delimiter",
            LiteralRole::None => "none value",
            LiteralRole::True => "true value",
            LiteralRole::False => "false value",
            LiteralRole::Inf => "inf value",
            LiteralRole::Nan => "nan value",
        };
        f.write_str(name)
    }
}

/// Main error type for parsetypes operations.
#[derive(Debug, Error)]
pub enum ParseTypesError {
    /// A configured literal collides with reserved characters or with
    /// another category. Only raised while building a parser.
    #[error("Configuration error: cannot use {literal:?} as {role}: {reason}")]
    Config {
        role: LiteralRole,
        literal: String,
        reason: String,
    },

    /// A token could not be converted to the requested type.
    #[error("Value conversion error: cannot convert {value:?} to {target}: {reason}")]
    ValueConversion {
        value: String,
        target: ScalarKind,
        reason: &'static str,
    },

    /// The conversion target cannot be produced by this parser.
    #[error("Unsupported type: {target}: {reason}")]
    UnsupportedType {
        target: TypeDescriptor,
        reason: &'static str,
    },

    /// A table row does not have the width of the first row.
    #[error("Shape error: row {row} has {found} columns, expected {expected}")]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParseTypesError {
    pub(crate) fn not_a(value: &str, target: ScalarKind) -> Self {
        ParseTypesError::ValueConversion {
            value: value.to_string(),
            target,
            reason: "not a recognised literal",
        }
    }

    pub(crate) fn out_of_range(value: &str, target: ScalarKind) -> Self {
        ParseTypesError::ValueConversion {
            value: value.to_string(),
            target,
            reason: "out of range",
        }
    }

    /// Returns true if this error came from converting a single value.
    ///
    /// These errors are always recoverable by falling back to the raw string.
    pub fn is_value_conversion(&self) -> bool {
        matches!(self, ParseTypesError::ValueConversion { .. })
    }
}

/// Result type alias for parsetypes operations.
pub type Result<T> = std::result::Result<T, ParseTypesError>;
