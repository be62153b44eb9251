//! Checks registered by [`InvariantRegistry::standard`](super::InvariantRegistry::standard).
//!
//! Violation messages name the first offending stream, topic or message id
//! where one exists.

use std::collections::{BTreeMap, BTreeSet};

use streamview_core::UnreadLocation;
use streamview_proto::{MessageId, VisibilityPolicy};

use super::{Invariant, InvariantResult, ViewSnapshot};

/// Stream totals equal the sum of their topics, and the overall total equals
/// the sum of every bucket.
pub struct UnreadSumConsistency;

impl Invariant for UnreadSumConsistency {
    fn name(&self) -> &'static str {
        "unread_sum_consistency"
    }

    fn check(&self, state: &ViewSnapshot) -> InvariantResult {
        for (&stream_id, &count) in &state.stream_counts {
            let sum: usize = state
                .buckets
                .iter()
                .filter(|(location, _)| {
                    matches!(location, UnreadLocation::Stream { stream_id: s, .. } if *s == stream_id)
                })
                .map(|(_, ids)| ids.len())
                .sum();
            if sum != count {
                return Err(self.violation(format!(
                    "stream {stream_id}: count {count} but topics sum to {sum}"
                )));
            }
        }

        let sum: usize = state.buckets.values().map(BTreeSet::len).sum();
        if sum != state.total {
            return Err(self.violation(format!("total {} but buckets sum to {sum}", state.total)));
        }
        Ok(())
    }
}

/// Every unread id sits in exactly one bucket, and no bucket is empty.
///
/// A message is a stream message or a direct message, never both; an id
/// in two buckets would be double counted.
pub struct ExclusiveClassification;

impl Invariant for ExclusiveClassification {
    fn name(&self) -> &'static str {
        "exclusive_classification"
    }

    fn check(&self, state: &ViewSnapshot) -> InvariantResult {
        let mut seen: BTreeMap<MessageId, &UnreadLocation> = BTreeMap::new();
        for (location, ids) in &state.buckets {
            if ids.is_empty() {
                return Err(self.violation(format!("empty bucket {location:?} kept")));
            }
            for &id in ids {
                if let Some(first) = seen.insert(id, location) {
                    return Err(self.violation(format!(
                        "message {id} in both {first:?} and {location:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The reverse index and the buckets describe the same partition.
pub struct LocationIndexConsistency;

impl Invariant for LocationIndexConsistency {
    fn name(&self) -> &'static str {
        "location_index_consistency"
    }

    fn check(&self, state: &ViewSnapshot) -> InvariantResult {
        for (location, ids) in &state.buckets {
            for id in ids {
                match state.locations.get(id) {
                    Some(indexed) if indexed == location => {},
                    other => {
                        return Err(self.violation(format!(
                            "message {id} bucketed at {location:?} but indexed at {other:?}"
                        )));
                    },
                }
            }
        }

        for (id, location) in &state.locations {
            let bucketed = state.buckets.get(location).is_some_and(|ids| ids.contains(id));
            if !bucketed {
                return Err(
                    self.violation(format!("message {id} indexed at {location:?} but not bucketed"))
                );
            }
        }
        Ok(())
    }
}

/// Every mention is an unread message.
pub struct MentionsSubsetOfUnread;

impl Invariant for MentionsSubsetOfUnread {
    fn name(&self) -> &'static str {
        "mentions_subset_of_unread"
    }

    fn check(&self, state: &ViewSnapshot) -> InvariantResult {
        match state.mentions.iter().find(|id| !state.locations.contains_key(id)) {
            Some(id) => Err(self.violation(format!("mention {id} is not unread"))),
            None => Ok(()),
        }
    }
}

/// Topic views report the unread count of their bucket and list each topic
/// once.
pub struct TopicViewConsistency;

impl Invariant for TopicViewConsistency {
    fn name(&self) -> &'static str {
        "topic_view_consistency"
    }

    fn check(&self, state: &ViewSnapshot) -> InvariantResult {
        for (&stream_id, views) in &state.topics {
            let mut names = BTreeSet::new();
            for view in views {
                if !names.insert(view.name.as_str()) {
                    return Err(self.violation(format!(
                        "stream {stream_id}: topic {:?} listed twice",
                        view.name
                    )));
                }

                let location = UnreadLocation::Stream { stream_id, topic: view.name.clone() };
                let expected = state.buckets.get(&location).map_or(0, BTreeSet::len);
                if view.unread_count != expected {
                    return Err(self.violation(format!(
                        "stream {stream_id} topic {:?}: view shows {} unread, bucket has {expected}",
                        view.name, view.unread_count
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Topic mute flags follow the policy rules: explicit policies win, inherited
/// topics follow the stream, unsubscribed streams hide everything.
pub struct MutedStreamHidesTopics;

impl Invariant for MutedStreamHidesTopics {
    fn name(&self) -> &'static str {
        "muted_stream_hides_topics"
    }

    fn check(&self, state: &ViewSnapshot) -> InvariantResult {
        for (&stream_id, views) in &state.topics {
            for view in views {
                let expected_muted = match state.subscribed.get(&stream_id) {
                    None => true,
                    Some(&stream_muted) => match state.policy(stream_id, &view.name) {
                        VisibilityPolicy::Muted => true,
                        VisibilityPolicy::Unmuted | VisibilityPolicy::Followed => false,
                        VisibilityPolicy::Inherit => stream_muted,
                    },
                };
                if view.is_muted != expected_muted {
                    return Err(self.violation(format!(
                        "stream {stream_id} topic {:?}: is_muted {} but expected {expected_muted}",
                        view.name, view.is_muted
                    )));
                }
            }
        }
        Ok(())
    }
}
