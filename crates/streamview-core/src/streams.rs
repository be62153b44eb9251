//! Stream list sections and stream directory helpers.
//!
//! The subscriptions screen shows pinned streams first, then everything
//! else. Within a section the most recently active stream comes first.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;
use streamview_proto::{MessageId, StreamId, Subscription};

use crate::TopicExtended;

/// Subscriptions keyed by stream id.
pub type SubscriptionIndex = BTreeMap<StreamId, Subscription>;

/// Index subscriptions by stream id. A later duplicate replaces an earlier one.
pub fn index_subscriptions(subscriptions: &[Subscription]) -> SubscriptionIndex {
    subscriptions.iter().map(|sub| (sub.stream_id, sub.clone())).collect()
}

/// Stream list section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Streams with `pin_to_top`
    Pinned,
    /// All other subscribed streams
    Other,
}

/// One stream in the stream list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamRow {
    /// Stream id.
    pub stream_id: StreamId,
    /// Display name.
    pub name: String,
    /// Stream color.
    pub color: String,
    /// Stream-level mute.
    pub is_muted: bool,
    /// Private stream.
    pub invite_only: bool,
    /// Web-public stream.
    pub is_web_public: bool,
    /// Annotated topics; `None` until the topic list is fetched.
    pub topics: Option<Vec<TopicExtended>>,
    /// Newest message across the stream's topics.
    pub last_message_id: Option<MessageId>,
    /// Unread badge.
    pub unread_count: usize,
}

/// A titled group of stream rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSection {
    /// Which section this is.
    pub kind: SectionKind,
    /// Rows in display order.
    pub rows: Vec<StreamRow>,
}

/// Build the `Pinned` and `Other` sections, in that order.
///
/// Rows are ordered by `last_message_id` descending with streams of unknown
/// activity last, then by case-insensitive name, then by stream id. Both
/// sections are always returned, possibly empty.
pub fn build_stream_sections(
    subscriptions: &[Subscription],
    topics: &BTreeMap<StreamId, Vec<TopicExtended>>,
    unread_counts: &BTreeMap<StreamId, usize>,
) -> Vec<StreamSection> {
    let mut pinned = Vec::new();
    let mut other = Vec::new();

    for sub in subscriptions {
        let stream_topics = topics.get(&sub.stream_id).cloned();
        let last_message_id =
            stream_topics.as_ref().and_then(|topics| topics.iter().map(|t| t.max_id).max());
        let row = StreamRow {
            stream_id: sub.stream_id,
            name: sub.name.clone(),
            color: sub.color.clone(),
            is_muted: sub.is_stream_muted(),
            invite_only: sub.invite_only,
            is_web_public: sub.is_web_public,
            topics: stream_topics,
            last_message_id,
            unread_count: unread_counts.get(&sub.stream_id).copied().unwrap_or(0),
        };
        if sub.pin_to_top { pinned.push(row) } else { other.push(row) }
    }

    pinned.sort_by(compare_rows);
    other.sort_by(compare_rows);

    vec![
        StreamSection { kind: SectionKind::Pinned, rows: pinned },
        StreamSection { kind: SectionKind::Other, rows: other },
    ]
}

fn compare_rows(a: &StreamRow, b: &StreamRow) -> Ordering {
    let activity = match (a.last_message_id, b.last_message_id) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    activity.then_with(|| compare_names(&a.name, &b.name)).then(a.stream_id.cmp(&b.stream_id))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Alphabetical order for the stream directory, case-insensitive.
pub fn sort_streams_by_name(subscriptions: &mut [Subscription]) {
    subscriptions.sort_by(|a, b| {
        compare_names(&a.name, &b.name).then(a.stream_id.cmp(&b.stream_id))
    });
}

/// Streams whose name contains `query`, case-insensitive. Surrounding
/// whitespace in the query is ignored; an empty query matches everything.
pub fn filter_streams_by_name<'a>(
    subscriptions: &'a [Subscription],
    query: &str,
) -> Vec<&'a Subscription> {
    let needle = query.trim().to_lowercase();
    subscriptions.iter().filter(|sub| sub.name.to_lowercase().contains(&needle)).collect()
}
