use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// The request field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    DivisorA,
    DivisorB,
    Limit,
    TokenA,
    TokenB,
}

impl ParamField {
    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamField::DivisorA => "divisor_a",
            ParamField::DivisorB => "divisor_b",
            ParamField::Limit => "limit",
            ParamField::TokenA => "token_a",
            ParamField::TokenB => "token_b",
        }
    }
}

impl Display for ParamField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request parameter failed its bound.
///
/// Surfaced synchronously to the caller; the offending call is never
/// retried or partially processed.
#[derive(Debug, Clone, Error)]
#[error("invalid parameter {field}: {message}")]
pub struct InvalidParameter {
    pub field: ParamField,
    pub message: String,
}

impl InvalidParameter {
    pub fn new(field: ParamField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}
