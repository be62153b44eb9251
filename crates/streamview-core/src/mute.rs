//! Topic visibility.
//!
//! A topic's visibility combines two settings: an optional per-topic
//! [`VisibilityPolicy`] and the stream-level mute flag on the user's
//! [`Subscription`]. An explicit topic policy always wins; without one the
//! topic inherits the stream's setting.
//!
//! A stream the user is not subscribed to contributes no unread signal, so
//! every topic in it resolves as invisible regardless of stray topic policies.

use std::collections::BTreeMap;

use streamview_proto::{StreamId, Subscription, UserTopic, VisibilityPolicy};

/// Per-topic visibility policies, keyed by stream then topic name.
///
/// Only explicit policies are stored; a missing entry is
/// [`VisibilityPolicy::Inherit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MuteState {
    topics: BTreeMap<StreamId, BTreeMap<String, VisibilityPolicy>>,
}

impl MuteState {
    /// Empty state: every topic inherits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the register payload's `user_topics`.
    pub fn from_user_topics(user_topics: &[UserTopic]) -> Self {
        let mut state = Self::new();
        for user_topic in user_topics {
            state.apply(user_topic);
        }
        state
    }

    /// Apply a `user_topic` event.
    ///
    /// `Inherit` removes the entry, so the map only ever holds explicit
    /// policies.
    pub fn apply(&mut self, event: &UserTopic) {
        self.set(event.stream_id, &event.topic_name, event.visibility_policy);
    }

    /// Set the policy for one topic.
    pub fn set(&mut self, stream_id: StreamId, topic: &str, policy: VisibilityPolicy) {
        if policy == VisibilityPolicy::Inherit {
            if let Some(topics) = self.topics.get_mut(&stream_id) {
                topics.remove(topic);
                if topics.is_empty() {
                    self.topics.remove(&stream_id);
                }
            }
            return;
        }
        self.topics.entry(stream_id).or_default().insert(topic.to_owned(), policy);
    }

    /// Policy for one topic; `Inherit` when none is set.
    pub fn policy(&self, stream_id: StreamId, topic: &str) -> VisibilityPolicy {
        self.topics
            .get(&stream_id)
            .and_then(|topics| topics.get(topic))
            .copied()
            .unwrap_or_default()
    }

    /// Number of explicit policies.
    pub fn len(&self) -> usize {
        self.topics.values().map(BTreeMap::len).sum()
    }

    /// Whether no explicit policy is set.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// Whether unread activity in a topic should be shown.
///
/// Resolution order:
/// 1. No subscription: not visible.
/// 2. Explicit `Muted`: not visible. Explicit `Unmuted` or `Followed`:
///    visible.
/// 3. Otherwise the stream's own mute flag decides.
pub fn is_topic_visible(
    stream_id: StreamId,
    topic: &str,
    subscription: Option<&Subscription>,
    mute: &MuteState,
) -> bool {
    let Some(subscription) = subscription else {
        return false;
    };

    match mute.policy(stream_id, topic) {
        VisibilityPolicy::Muted => false,
        VisibilityPolicy::Unmuted | VisibilityPolicy::Followed => true,
        VisibilityPolicy::Inherit => !subscription.is_stream_muted(),
    }
}
