//! Unread counters.
//!
//! Every count is derived from [`UnreadState`] on demand; nothing is cached,
//! so a stream's count is always the sum of its topics' counts.

use std::collections::{BTreeMap, BTreeSet};

use streamview_proto::{Recipient, StreamId, UserId};

use super::UnreadState;
use crate::{MuteState, SubscriptionIndex, is_topic_visible};

/// Unread messages in one topic. Zero for unknown streams or topics.
pub fn count_for_topic(state: &UnreadState, stream_id: StreamId, topic: &str) -> usize {
    state.topic_ids(stream_id, topic).map_or(0, BTreeSet::len)
}

/// Unread messages in a stream, across all topics and regardless of mute.
pub fn count_for_stream(state: &UnreadState, stream_id: StreamId) -> usize {
    state.stream_topics(stream_id).map(|(_, ids)| ids.len()).sum()
}

/// Unread badge per subscribed stream.
///
/// Counts only topics visible under the current mute settings. Streams whose
/// visible count is zero are omitted, as are unsubscribed streams.
pub fn unread_by_stream(
    state: &UnreadState,
    subscriptions: &SubscriptionIndex,
    mute: &MuteState,
) -> BTreeMap<StreamId, usize> {
    let mut counts = BTreeMap::new();
    for stream_id in state.streams() {
        let Some(subscription) = subscriptions.get(&stream_id) else {
            continue;
        };
        let visible: usize = state
            .stream_topics(stream_id)
            .filter(|(topic, _)| is_topic_visible(stream_id, topic, Some(subscription), mute))
            .map(|(_, ids)| ids.len())
            .sum();
        if visible > 0 {
            counts.insert(stream_id, visible);
        }
    }
    counts
}

/// Unread messages from one user in a one-to-one conversation.
pub fn count_for_dm(state: &UnreadState, other_user_id: UserId) -> usize {
    state.dm_ids(other_user_id).map_or(0, BTreeSet::len)
}

/// Unread messages in a group conversation. Participant order and duplicates
/// do not matter.
pub fn count_for_group_dm(state: &UnreadState, user_ids: &[UserId]) -> usize {
    state.group_ids(&Recipient::group_key(user_ids)).map_or(0, BTreeSet::len)
}

/// Unread direct messages, one-to-one and group combined.
pub fn total_dm_count(state: &UnreadState) -> usize {
    let direct: usize = state.dm_conversations().map(|(_, ids)| ids.len()).sum();
    let group: usize = state.group_conversations().map(|(_, ids)| ids.len()).sum();
    direct + group
}

/// Unread messages mentioning the current user.
pub fn mention_count(state: &UnreadState) -> usize {
    state.mentions().len()
}

#[cfg(test)]
mod tests {
    use streamview_proto::{Subscription, VisibilityPolicy};

    use super::*;
    use crate::{UnreadEvent, UnreadMessage, index_subscriptions};

    fn arrive(state: &mut UnreadState, message: UnreadMessage) {
        state.apply(UnreadEvent::MessageArrived(message));
    }

    #[test]
    fn stream_count_is_sum_of_topics() {
        let mut state = UnreadState::new();
        arrive(&mut state, UnreadMessage::stream(1, 5, "alpha"));
        arrive(&mut state, UnreadMessage::stream(2, 5, "beta"));
        arrive(&mut state, UnreadMessage::stream(3, 5, "beta"));
        arrive(&mut state, UnreadMessage::stream(4, 6, "alpha"));

        assert_eq!(count_for_topic(&state, 5, "beta"), 2);
        assert_eq!(count_for_topic(&state, 5, "gamma"), 0);
        assert_eq!(count_for_stream(&state, 5), 3);
        assert_eq!(count_for_stream(&state, 404), 0);
    }

    #[test]
    fn badge_skips_muted_topics_and_unsubscribed_streams() {
        let mut state = UnreadState::new();
        arrive(&mut state, UnreadMessage::stream(1, 5, "alpha"));
        arrive(&mut state, UnreadMessage::stream(2, 5, "beta"));
        arrive(&mut state, UnreadMessage::stream(3, 6, "only"));
        arrive(&mut state, UnreadMessage::stream(4, 7, "elsewhere"));

        let subscriptions = index_subscriptions(&[Subscription::new(5, "a"), Subscription::new(6, "b")]);
        let mut mute = MuteState::new();
        mute.set(5, "alpha", VisibilityPolicy::Muted);
        mute.set(6, "only", VisibilityPolicy::Muted);

        let counts = unread_by_stream(&state, &subscriptions, &mute);
        assert_eq!(counts, BTreeMap::from([(5, 1)]));
    }

    #[test]
    fn direct_message_counts() {
        let mut state = UnreadState::new();
        for (id, recipient) in [
            (1, Recipient::Direct { other_user_id: 8 }),
            (2, Recipient::Direct { other_user_id: 8 }),
            (3, Recipient::GroupDirect { user_ids: vec![4, 2, 1] }),
        ] {
            arrive(&mut state, UnreadMessage { id, recipient, mentioned: id == 3 });
        }

        assert_eq!(count_for_dm(&state, 8), 2);
        assert_eq!(count_for_group_dm(&state, &[1, 2, 4]), 1);
        assert_eq!(total_dm_count(&state), 3);
        assert_eq!(mention_count(&state), 1);
    }
}
