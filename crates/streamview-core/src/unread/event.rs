//! Unread reducer input events.
//!
//! Events are the client's translation of server pushes (`message`,
//! `update_message_flags`, `delete_message`, `update_message` with a stream or
//! topic change) into the facts the unread set cares about.

use streamview_proto::{MessageId, Recipient, StreamId};

/// A message that may enter the unread set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadMessage {
    /// Message id.
    pub id: MessageId,
    /// Conversation the message belongs to.
    pub recipient: Recipient,
    /// Whether the message mentions the current user.
    pub mentioned: bool,
}

impl UnreadMessage {
    /// Unmentioned stream message.
    pub fn stream(id: MessageId, stream_id: StreamId, topic: impl Into<String>) -> Self {
        Self { id, recipient: Recipient::stream(stream_id, topic), mentioned: false }
    }

    /// Mark as mentioning the current user.
    #[must_use]
    pub fn with_mention(mut self) -> Self {
        self.mentioned = true;
        self
    }
}

/// Events processed by [`super::UnreadState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreadEvent {
    /// New unread message delivered.
    MessageArrived(UnreadMessage),

    /// Messages marked as read.
    MessagesRead {
        /// Message ids.
        ids: Vec<MessageId>,
    },

    /// Read messages flagged unread again.
    MessagesMarkedUnread {
        /// Messages with their recipients.
        messages: Vec<UnreadMessage>,
    },

    /// Messages deleted from the server.
    MessagesDeleted {
        /// Message ids.
        ids: Vec<MessageId>,
    },

    /// Stream messages moved to another stream and/or topic.
    MessagesMoved {
        /// Message ids.
        ids: Vec<MessageId>,
        /// Destination stream.
        new_stream_id: StreamId,
        /// Destination topic.
        new_topic: String,
    },

    /// Mention flag cleared; the messages stay unread.
    MentionsRead {
        /// Message ids.
        ids: Vec<MessageId>,
    },
}
