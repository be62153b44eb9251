//! Unread message snapshot and recipients.
//!
//! The register call returns unread message ids already bucketed by
//! conversation. Live events then describe individual messages by their
//! [`Recipient`].

use serde::{Deserialize, Serialize};

use crate::{MessageId, StreamId, UserId};

/// Where a message was sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recipient {
    /// A topic within a stream
    Stream {
        /// Target stream
        stream_id: StreamId,
        /// Target topic
        topic: String,
    },
    /// One-to-one direct message
    Direct {
        /// The other participant
        other_user_id: UserId,
    },
    /// Group direct message
    GroupDirect {
        /// All participants, including the current user
        user_ids: Vec<UserId>,
    },
}

impl Recipient {
    /// Stream recipient.
    pub fn stream(stream_id: StreamId, topic: impl Into<String>) -> Self {
        Self::Stream { stream_id, topic: topic.into() }
    }

    /// Canonical key for a group conversation: sorted, deduplicated ids
    /// joined by commas (`"3,7,12"`).
    pub fn group_key(user_ids: &[UserId]) -> String {
        let mut ids = user_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
    }
}

/// Unread message ids from the register payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadSnapshot {
    /// Unread stream messages, one entry per topic.
    #[serde(default)]
    pub streams: Vec<UnreadStreamSnapshot>,
    /// Unread one-to-one direct messages, one entry per conversation.
    #[serde(default)]
    pub pms: Vec<UnreadDmSnapshot>,
    /// Unread group direct messages, one entry per conversation.
    #[serde(default)]
    pub huddles: Vec<UnreadHuddleSnapshot>,
    /// Unread messages mentioning the current user.
    #[serde(default)]
    pub mentions: Vec<MessageId>,
}

/// Unread messages in one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadStreamSnapshot {
    /// Stream id.
    pub stream_id: StreamId,
    /// Topic name.
    pub topic: String,
    /// Unread message ids.
    pub unread_message_ids: Vec<MessageId>,
}

/// Unread messages in one one-to-one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadDmSnapshot {
    /// The other participant.
    pub other_user_id: UserId,
    /// Unread message ids.
    pub unread_message_ids: Vec<MessageId>,
}

/// Unread messages in one group conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadHuddleSnapshot {
    /// Comma-joined sorted participant ids.
    pub user_ids_string: String,
    /// Unread message ids.
    pub unread_message_ids: Vec<MessageId>,
}
