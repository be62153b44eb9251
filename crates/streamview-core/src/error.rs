//! Error types for the view-model core.
//!
//! Two layers, matching how failures are recovered:
//!
//! - [`WidgetError`]: the widget cannot be set up at all. The renderer falls
//!   back to the raw message content plus a notice.
//! - [`PollError`]: one poll event could not be applied. Reported to the
//!   caller's sink and skipped; replay continues.

use streamview_proto::{ProtocolError, SubmessageId, UserId};
use thiserror::Error;

/// Reasons a message's widget cannot be rendered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Message has no submessage with `msg_type == "widget"`
    #[error("message has no widget submessages")]
    NoWidgetSubmessage,

    /// First widget submessage does not decode as a widget description
    #[error("widget description undecodable: {0}")]
    Undecodable(#[from] ProtocolError),

    /// Widget is not a poll
    #[error("unsupported widget type {0:?}")]
    UnsupportedType(String),

    /// Poll description has no `extra_data`
    #[error("poll submessage {0} has no extra_data")]
    MissingExtraData(SubmessageId),
}

/// Errors applying a single poll event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// Event payload failed to decode
    #[error("poll event rejected: {0}")]
    Decode(#[from] ProtocolError),

    /// Vote for an option key that does not exist
    #[error("unknown key for poll: {key}")]
    UnknownOptionKey {
        /// Key referenced by the vote
        key: String,
    },

    /// Vote value other than `1` or `-1`
    #[error("invalid vote value {vote} from user {sender_id}")]
    InvalidVote {
        /// Voter
        sender_id: UserId,
        /// Offending value
        vote: i8,
    },

    /// Question edit from someone other than the poll author
    #[error("user {sender_id} is not allowed to edit the question")]
    QuestionEditForbidden {
        /// User who attempted the edit
        sender_id: UserId,
    },
}
