//! Wire decoding errors.

use thiserror::Error;

use crate::SubmessageId;

/// Result alias for wire decoding.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while decoding server payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Submessage content is not valid JSON or does not match its schema
    #[error("malformed submessage {id}: {reason}")]
    MalformedSubmessage {
        /// Submessage that failed to decode
        id: SubmessageId,
        /// Decoder message
        reason: String,
    },

    /// Widget event with a `type` this client does not know
    #[error("unknown widget event type {kind:?} in submessage {id}")]
    UnknownEventType {
        /// Submessage carrying the event
        id: SubmessageId,
        /// The unrecognized `type` field (empty if absent)
        kind: String,
    },

    /// Visibility policy integer outside the known range
    #[error("unknown visibility policy: {0}")]
    UnknownVisibilityPolicy(u8),

    /// Document-level JSON failure (state files, snapshots)
    #[error("json error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
