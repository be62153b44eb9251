//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the reducers at a point in time.
//! Invariants operate on snapshots rather than live state so that a check
//! never depends on the accessor it is checking.

use std::collections::{BTreeMap, BTreeSet};

use streamview_core::{
    MuteState, SubscriptionIndex, TopicExtended, UnreadLocation, UnreadState, build_all_topics,
    count_for_stream,
};
use streamview_proto::{MessageId, StreamId, TopicsState, VisibilityPolicy};

/// Snapshot of unread, mute and topic list state.
///
/// Fields are public so tests can corrupt a snapshot and confirm the
/// invariants notice.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    /// Unread ids per conversation bucket, read from the bucket accessors.
    pub buckets: BTreeMap<UnreadLocation, BTreeSet<MessageId>>,
    /// Reverse index, read from [`UnreadState::locations`].
    pub locations: BTreeMap<MessageId, UnreadLocation>,
    /// Unread mentions.
    pub mentions: BTreeSet<MessageId>,
    /// Per-stream unread counts from [`count_for_stream`].
    pub stream_counts: BTreeMap<StreamId, usize>,
    /// Total unread count from [`UnreadState::len`].
    pub total: usize,
    /// Built topic views for every fetched stream.
    pub topics: BTreeMap<StreamId, Vec<TopicExtended>>,
    /// Subscribed streams, with their stream-level mute flag.
    pub subscribed: BTreeMap<StreamId, bool>,
    /// Explicit policies for the topics in `topics`.
    pub policies: BTreeMap<(StreamId, String), VisibilityPolicy>,
}

impl ViewSnapshot {
    /// Capture the observable state of one client.
    pub fn capture(
        unread: &UnreadState,
        subscriptions: &SubscriptionIndex,
        mute: &MuteState,
        topics: &TopicsState,
    ) -> Self {
        let mut buckets = BTreeMap::new();
        let mut stream_counts = BTreeMap::new();
        for stream_id in unread.streams() {
            for (topic, ids) in unread.stream_topics(stream_id) {
                buckets.insert(
                    UnreadLocation::Stream { stream_id, topic: topic.to_owned() },
                    ids.clone(),
                );
            }
            stream_counts.insert(stream_id, count_for_stream(unread, stream_id));
        }
        for (other_user_id, ids) in unread.dm_conversations() {
            buckets.insert(UnreadLocation::Direct { other_user_id }, ids.clone());
        }
        for (key, ids) in unread.group_conversations() {
            buckets.insert(UnreadLocation::GroupDirect { key: key.to_owned() }, ids.clone());
        }

        let views = build_all_topics(topics, subscriptions, mute, unread);
        let mut policies = BTreeMap::new();
        for (&stream_id, views) in &views {
            for view in views {
                let policy = mute.policy(stream_id, &view.name);
                if policy != VisibilityPolicy::Inherit {
                    policies.insert((stream_id, view.name.clone()), policy);
                }
            }
        }

        Self {
            buckets,
            locations: unread.locations().map(|(id, location)| (id, location.clone())).collect(),
            mentions: unread.mentions().clone(),
            stream_counts,
            total: unread.len(),
            topics: views,
            subscribed: subscriptions
                .iter()
                .map(|(&stream_id, subscription)| (stream_id, subscription.is_stream_muted()))
                .collect(),
            policies,
        }
    }

    /// Capture unread state alone, with no subscriptions or topic lists.
    pub fn from_unread(unread: &UnreadState) -> Self {
        Self::capture(unread, &SubscriptionIndex::new(), &MuteState::new(), &TopicsState::new())
    }

    /// Policy for a topic in the snapshot; `Inherit` when none is set.
    pub fn policy(&self, stream_id: StreamId, topic: &str) -> VisibilityPolicy {
        self.policies.get(&(stream_id, topic.to_owned())).copied().unwrap_or_default()
    }
}
