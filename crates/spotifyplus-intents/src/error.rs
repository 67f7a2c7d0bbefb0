//! Intent handling errors

use crate::host::MatchFailedReason;
use thiserror::Error;

/// Errors the host has to render itself
///
/// Everything else that goes wrong while handling an intent is reported
/// through an error [`IntentResponse`](crate::IntentResponse) with spoken
/// text, so this enum stays small.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntentError {
    #[error("no media player matched ({reason})")]
    MatchFailed { reason: MatchFailedReason },

    #[error("invalid value for slot '{slot}': {message}")]
    InvalidSlot { slot: String, message: String },

    #[error("unknown intent: {0}")]
    UnknownIntent(String),
}

/// Result type for intent handling
pub type IntentResult<T> = Result<T, IntentError>;

/// Errors returned by host service calls
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("service not found: {domain}.{service}")]
    NotFound { domain: String, service: String },

    #[error("service call failed: {0}")]
    CallFailed(String),

    #[error("invalid service data: {0}")]
    InvalidData(String),
}

/// Result type for service calls
pub type ServiceResult = Result<Option<serde_json::Value>, ServiceError>;
