//! Per-topic visibility policies.
//!
//! The server encodes the policy as a small integer. `0` means "no policy":
//! the topic follows the stream's own mute setting.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, StreamId};

/// Visibility policy a user has set on one topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VisibilityPolicy {
    /// No explicit policy; follow the stream default
    #[default]
    Inherit,
    /// Topic is muted
    Muted,
    /// Topic is unmuted (visible even in a muted stream)
    Unmuted,
    /// Topic is followed; visible like `Unmuted`
    Followed,
}

impl TryFrom<u8> for VisibilityPolicy {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inherit),
            1 => Ok(Self::Muted),
            2 => Ok(Self::Unmuted),
            3 => Ok(Self::Followed),
            other => Err(ProtocolError::UnknownVisibilityPolicy(other)),
        }
    }
}

impl From<VisibilityPolicy> for u8 {
    fn from(value: VisibilityPolicy) -> Self {
        match value {
            VisibilityPolicy::Inherit => 0,
            VisibilityPolicy::Muted => 1,
            VisibilityPolicy::Unmuted => 2,
            VisibilityPolicy::Followed => 3,
        }
    }
}

/// One `user_topic` record, from the register payload or a `user_topic`
/// event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTopic {
    /// Stream containing the topic.
    pub stream_id: StreamId,
    /// Topic name.
    pub topic_name: String,
    /// Policy now in effect. `Inherit` clears any previous policy.
    pub visibility_policy: VisibilityPolicy,
}
