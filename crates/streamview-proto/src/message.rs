//! Messages as handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::{MessageId, RawReaction, Submessage, UserId};

/// A message with the fields the HTML renderer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message id.
    pub id: MessageId,
    /// Author.
    pub sender_id: UserId,
    /// Author display name at send time.
    #[serde(default)]
    pub sender_full_name: String,
    /// Rendered HTML content from the server.
    pub content: String,
    /// Unix timestamp (seconds) of sending.
    #[serde(default)]
    pub timestamp: i64,
    /// Unix timestamp (seconds) of the last edit, if edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edit_timestamp: Option<i64>,
    /// Reactions, one record per user and emoji.
    #[serde(default)]
    pub reactions: Vec<RawReaction>,
    /// Widget and other auxiliary submessages.
    #[serde(default)]
    pub submessages: Vec<Submessage>,
    /// Locally queued message not yet acknowledged by the server.
    #[serde(default)]
    pub is_outbox: bool,
}

impl Message {
    /// Message with content and no reactions or submessages.
    pub fn new(id: MessageId, sender_id: UserId, content: impl Into<String>) -> Self {
        Self {
            id,
            sender_id,
            sender_full_name: String::new(),
            content: content.into(),
            timestamp: 0,
            last_edit_timestamp: None,
            reactions: Vec::new(),
            submessages: Vec::new(),
            is_outbox: false,
        }
    }

    /// Whether the body should be rendered as a widget.
    pub fn has_submessages(&self) -> bool {
        !self.submessages.is_empty()
    }
}
