//! Saved client state.
//!
//! A JSON dump of what a client holds after `register` plus whatever
//! messages were loaded. Every field except `own_user_id` may be omitted.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use streamview_core::{
    MuteState, StreamSection, SubscriptionIndex, UnreadState, build_all_topics,
    build_stream_sections, index_subscriptions, sort_by_recency, unread_by_stream,
};
use streamview_proto::{
    Message, MessageId, Subscription, TopicsState, UnreadSnapshot, UserId, UserTopic,
};
use streamview_render::{FlagsState, UserInfo};
use tracing::{debug, info};

use crate::CliError;

/// Client state loaded from a state file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    /// Current user.
    pub own_user_id: UserId,
    /// Subscribed streams.
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    /// Fetched topic lists, keyed by stream id.
    #[serde(default)]
    pub topics: TopicsState,
    /// Per-topic visibility policies.
    #[serde(default)]
    pub user_topics: Vec<UserTopic>,
    /// Unread messages from `register`.
    #[serde(default)]
    pub unread: UnreadSnapshot,
    /// Loaded messages.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Known users.
    #[serde(default)]
    pub users: BTreeMap<UserId, UserInfo>,
    /// Message flags.
    #[serde(default)]
    pub flags: FlagsState,
    /// Image emoji URLs by emoji code.
    #[serde(default)]
    pub image_emoji: BTreeMap<String, String>,
    /// Clock for relative timestamps, unix seconds.
    #[serde(default)]
    pub now: i64,
}

impl ClientState {
    /// Read and parse a state file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| CliError::Read { path: PathBuf::from(path), source })?;
        let state = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            subscriptions = state.subscriptions.len(),
            messages = state.messages.len(),
            "loaded state"
        );
        Ok(state)
    }

    /// Parse state from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Find a loaded message.
    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    /// Rebuild the reducers from the saved payloads.
    pub fn reduce(&self) -> DerivedState {
        DerivedState {
            subscriptions: index_subscriptions(&self.subscriptions),
            mute: MuteState::from_user_topics(&self.user_topics),
            unread: UnreadState::from_snapshot(&self.unread),
        }
    }

    /// Stream list sections, topics most recent first.
    pub fn stream_sections(&self) -> Vec<StreamSection> {
        let derived = self.reduce();
        let mut topics =
            build_all_topics(&self.topics, &derived.subscriptions, &derived.mute, &derived.unread);
        for list in topics.values_mut() {
            sort_by_recency(list);
        }
        let counts = unread_by_stream(&derived.unread, &derived.subscriptions, &derived.mute);
        debug!(streams = topics.len(), with_unread = counts.len(), "built topic views");

        build_stream_sections(&self.subscriptions, &topics, &counts)
    }
}

/// Reducer state derived from a [`ClientState`].
#[derive(Debug, Clone, Default)]
pub struct DerivedState {
    /// Subscriptions by stream id.
    pub subscriptions: SubscriptionIndex,
    /// Topic visibility policies.
    pub mute: MuteState,
    /// Unread set.
    pub unread: UnreadState,
}
