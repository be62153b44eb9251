//! Topic list views.
//!
//! Joins the fetched per-stream topic lists with unread counts and mute
//! state. Views are rebuilt from scratch on every call; nothing is written
//! back into the subscription records.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use streamview_proto::{MessageId, StreamId, Subscription, TopicRecord, TopicsState};
use tracing::warn;

use crate::{MuteState, SubscriptionIndex, UnreadState, count_for_topic, is_topic_visible};

/// A topic annotated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicExtended {
    /// Topic name.
    pub name: String,
    /// Id of the newest message in the topic.
    pub max_id: MessageId,
    /// Whether the topic is hidden by mute settings.
    pub is_muted: bool,
    /// Unread messages in the topic.
    pub unread_count: usize,
}

/// Annotate one stream's topics.
///
/// Returns `None` when the stream's topic list has not been fetched, and an
/// empty list when it has been fetched and is empty. Input order is kept.
/// Without a subscription every topic is muted.
pub fn build_topics_for_stream(
    stream_id: StreamId,
    topics: Option<&[TopicRecord]>,
    subscription: Option<&Subscription>,
    mute: &MuteState,
    unread: &UnreadState,
) -> Option<Vec<TopicExtended>> {
    let topics = topics?;
    Some(
        topics
            .iter()
            .map(|topic| TopicExtended {
                name: topic.name.clone(),
                max_id: topic.max_id,
                is_muted: !is_topic_visible(stream_id, &topic.name, subscription, mute),
                unread_count: count_for_topic(unread, stream_id, &topic.name),
            })
            .collect(),
    )
}

/// Annotate every fetched stream.
///
/// Streams are independent: a duplicated topic name is logged and only its
/// first occurrence kept, without affecting any other stream.
pub fn build_all_topics(
    topics: &TopicsState,
    subscriptions: &SubscriptionIndex,
    mute: &MuteState,
    unread: &UnreadState,
) -> BTreeMap<StreamId, Vec<TopicExtended>> {
    let mut out = BTreeMap::new();
    for (&stream_id, records) in topics {
        let mut seen = HashSet::with_capacity(records.len());
        let unique: Vec<TopicRecord> = records
            .iter()
            .filter(|record| {
                let first = seen.insert(record.name.as_str());
                if !first {
                    warn!(stream_id, topic = %record.name, "duplicate topic in topic list");
                }
                first
            })
            .cloned()
            .collect();

        let annotated = build_topics_for_stream(
            stream_id,
            Some(&unique),
            subscriptions.get(&stream_id),
            mute,
            unread,
        )
        .unwrap_or_default();
        out.insert(stream_id, annotated);
    }
    out
}

/// Most recently active topics first; ties broken by name.
pub fn sort_by_recency(topics: &mut [TopicExtended]) {
    topics.sort_by(|a, b| b.max_id.cmp(&a.max_id).then_with(|| a.name.cmp(&b.name)));
}

/// Topic names for a stream narrow. Empty when the list is not fetched.
pub fn topic_names(stream_id: StreamId, topics: &TopicsState) -> Vec<&str> {
    topics
        .get(&stream_id)
        .map(|records| records.iter().map(|record| record.name.as_str()).collect())
        .unwrap_or_default()
}
