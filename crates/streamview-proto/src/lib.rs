//! Chat server wire types.
//!
//! Plain serde structures mirroring the subset of the chat server's REST and
//! event API that the view-model core consumes: reactions, subscriptions,
//! topic lists, user-topic visibility policies, the unread snapshot from the
//! register call, and widget submessages.
//!
//! The server owns these schemas. Decoding is lenient where the server is
//! known to omit fields (missing reaction users, legacy subscription flags)
//! and strict where a malformed value must be routed to an error path
//! (submessage payloads).
//!
//! # Components
//!
//! - [`reaction`]: Per-user emoji reactions
//! - [`subscription`]: Stream subscriptions and stream-level mute
//! - [`topic`]: Per-stream topic lists
//! - [`user_topic`]: Topic visibility policies
//! - [`unread`]: Unread snapshot and message recipients
//! - [`submessage`]: Widget submessages and poll events
//! - [`message`]: Messages as handed to the renderer

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod message;
pub mod reaction;
pub mod submessage;
pub mod subscription;
pub mod topic;
pub mod unread;
pub mod user_topic;

pub use errors::{ProtocolError, Result};
pub use message::Message;
pub use reaction::{RawReaction, ReactionType};
pub use submessage::{PollEvent, PollExtraData, Submessage, WIDGET_MSG_TYPE, WidgetData};
pub use subscription::Subscription;
pub use topic::{TopicRecord, TopicsState};
pub use unread::{
    Recipient, UnreadDmSnapshot, UnreadHuddleSnapshot, UnreadSnapshot, UnreadStreamSnapshot,
};
pub use user_topic::{UserTopic, VisibilityPolicy};

/// Server-assigned user identifier.
pub type UserId = u64;

/// Server-assigned stream identifier.
pub type StreamId = u64;

/// Server-assigned message identifier. Increases monotonically.
pub type MessageId = u64;

/// Server-assigned submessage identifier. Defines widget event order.
pub type SubmessageId = u64;
