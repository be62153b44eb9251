//! Unread set reducer.
//!
//! Unread ids are stored in per-conversation buckets with a reverse index from
//! id to bucket. The reverse index is what makes reads, deletes and moves
//! cheap: events only carry message ids.
//!
//! # Invariants
//!
//! - Every id in a bucket has exactly one entry in the location index, and
//!   that entry names the bucket.
//! - No bucket is empty. Emptied topic, stream, DM and group buckets are
//!   removed.
//! - Mentions are a subset of the indexed ids.

use std::collections::{BTreeMap, BTreeSet};

use streamview_proto::{MessageId, Recipient, StreamId, UnreadSnapshot, UserId};
use tracing::{debug, warn};

use super::{UnreadEvent, UnreadMessage};

/// The single conversation an unread message belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnreadLocation {
    /// Stream topic.
    Stream {
        /// Stream id.
        stream_id: StreamId,
        /// Topic name.
        topic: String,
    },
    /// One-to-one direct conversation.
    Direct {
        /// The other participant.
        other_user_id: UserId,
    },
    /// Group direct conversation.
    GroupDirect {
        /// Canonical participant key, see [`Recipient::group_key`].
        key: String,
    },
}

impl From<&Recipient> for UnreadLocation {
    fn from(recipient: &Recipient) -> Self {
        match recipient {
            Recipient::Stream { stream_id, topic } => {
                Self::Stream { stream_id: *stream_id, topic: topic.clone() }
            },
            Recipient::Direct { other_user_id } => Self::Direct { other_user_id: *other_user_id },
            Recipient::GroupDirect { user_ids } => {
                Self::GroupDirect { key: Recipient::group_key(user_ids) }
            },
        }
    }
}

/// Unread message ids, partitioned by conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnreadState {
    /// Stream id → topic → unread ids.
    streams: BTreeMap<StreamId, BTreeMap<String, BTreeSet<MessageId>>>,
    /// Other user → unread ids.
    dms: BTreeMap<UserId, BTreeSet<MessageId>>,
    /// Group key → unread ids.
    huddles: BTreeMap<String, BTreeSet<MessageId>>,
    /// Unread ids that mention the current user.
    mentions: BTreeSet<MessageId>,
    /// Reverse index.
    locations: BTreeMap<MessageId, UnreadLocation>,
}

impl UnreadState {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the register payload.
    ///
    /// An id that appears in more than one bucket keeps its first
    /// classification (streams, then DMs, then groups); later copies are
    /// logged and dropped. Mentions of ids that are not unread are dropped.
    pub fn from_snapshot(snapshot: &UnreadSnapshot) -> Self {
        let mut state = Self::new();

        for entry in &snapshot.streams {
            let location =
                UnreadLocation::Stream { stream_id: entry.stream_id, topic: entry.topic.clone() };
            state.load_bucket(&location, &entry.unread_message_ids);
        }
        for entry in &snapshot.pms {
            let location = UnreadLocation::Direct { other_user_id: entry.other_user_id };
            state.load_bucket(&location, &entry.unread_message_ids);
        }
        for entry in &snapshot.huddles {
            let location = UnreadLocation::GroupDirect { key: canonical_key(&entry.user_ids_string) };
            state.load_bucket(&location, &entry.unread_message_ids);
        }

        for id in &snapshot.mentions {
            if state.locations.contains_key(id) {
                state.mentions.insert(*id);
            } else {
                debug!(id, "ignoring mention of message that is not unread");
            }
        }

        state
    }

    fn load_bucket(&mut self, location: &UnreadLocation, ids: &[MessageId]) {
        for &id in ids {
            if let Some(existing) = self.locations.get(&id) {
                warn!(id, ?existing, duplicate = ?location, "unread id classified twice, keeping first");
                continue;
            }
            self.insert_at(id, location.clone());
        }
    }

    /// Apply an event. Returns whether the set changed.
    pub fn apply(&mut self, event: UnreadEvent) -> bool {
        match event {
            UnreadEvent::MessageArrived(message) => self.insert(&message),
            UnreadEvent::MessagesMarkedUnread { messages } => {
                messages.iter().fold(false, |changed, message| self.insert(message) | changed)
            },
            UnreadEvent::MessagesRead { ids } | UnreadEvent::MessagesDeleted { ids } => {
                ids.iter().fold(false, |changed, &id| self.remove(id) | changed)
            },
            UnreadEvent::MessagesMoved { ids, new_stream_id, new_topic } => ids
                .iter()
                .fold(false, |changed, &id| self.relocate(id, new_stream_id, &new_topic) | changed),
            UnreadEvent::MentionsRead { ids } => {
                ids.iter().fold(false, |changed, id| self.mentions.remove(id) | changed)
            },
        }
    }

    fn insert(&mut self, message: &UnreadMessage) -> bool {
        if self.locations.contains_key(&message.id) {
            return false;
        }
        self.insert_at(message.id, UnreadLocation::from(&message.recipient));
        if message.mentioned {
            self.mentions.insert(message.id);
        }
        true
    }

    fn insert_at(&mut self, id: MessageId, location: UnreadLocation) {
        match &location {
            UnreadLocation::Stream { stream_id, topic } => {
                self.streams
                    .entry(*stream_id)
                    .or_default()
                    .entry(topic.clone())
                    .or_default()
                    .insert(id);
            },
            UnreadLocation::Direct { other_user_id } => {
                self.dms.entry(*other_user_id).or_default().insert(id);
            },
            UnreadLocation::GroupDirect { key } => {
                self.huddles.entry(key.clone()).or_default().insert(id);
            },
        }
        self.locations.insert(id, location);
    }

    fn remove(&mut self, id: MessageId) -> bool {
        let Some(location) = self.locations.remove(&id) else {
            return false;
        };
        self.mentions.remove(&id);
        self.remove_from_bucket(id, &location);
        true
    }

    fn remove_from_bucket(&mut self, id: MessageId, location: &UnreadLocation) {
        match location {
            UnreadLocation::Stream { stream_id, topic } => {
                if let Some(topics) = self.streams.get_mut(stream_id) {
                    if let Some(ids) = topics.get_mut(topic) {
                        ids.remove(&id);
                        if ids.is_empty() {
                            topics.remove(topic);
                        }
                    }
                    if topics.is_empty() {
                        self.streams.remove(stream_id);
                    }
                }
            },
            UnreadLocation::Direct { other_user_id } => {
                if let Some(ids) = self.dms.get_mut(other_user_id) {
                    ids.remove(&id);
                    if ids.is_empty() {
                        self.dms.remove(other_user_id);
                    }
                }
            },
            UnreadLocation::GroupDirect { key } => {
                if let Some(ids) = self.huddles.get_mut(key) {
                    ids.remove(&id);
                    if ids.is_empty() {
                        self.huddles.remove(key);
                    }
                }
            },
        }
    }

    /// Move a stream message. Direct messages cannot be moved and are left
    /// in place.
    fn relocate(&mut self, id: MessageId, new_stream_id: StreamId, new_topic: &str) -> bool {
        let Some(location) = self.locations.get(&id).cloned() else {
            return false;
        };
        let UnreadLocation::Stream { stream_id, topic } = &location else {
            warn!(id, ?location, "ignoring move of a direct message");
            return false;
        };
        if *stream_id == new_stream_id && topic == new_topic {
            return false;
        }

        self.remove_from_bucket(id, &location);
        self.insert_at(
            id,
            UnreadLocation::Stream { stream_id: new_stream_id, topic: new_topic.to_owned() },
        );
        true
    }

    /// Unread ids in one topic.
    pub fn topic_ids(&self, stream_id: StreamId, topic: &str) -> Option<&BTreeSet<MessageId>> {
        self.streams.get(&stream_id).and_then(|topics| topics.get(topic))
    }

    /// Topics with unread messages in a stream, with their unread ids.
    pub fn stream_topics(
        &self,
        stream_id: StreamId,
    ) -> impl Iterator<Item = (&str, &BTreeSet<MessageId>)> {
        self.streams
            .get(&stream_id)
            .into_iter()
            .flat_map(|topics| topics.iter().map(|(topic, ids)| (topic.as_str(), ids)))
    }

    /// Streams with at least one unread message.
    pub fn streams(&self) -> impl Iterator<Item = StreamId> + '_ {
        self.streams.keys().copied()
    }

    /// Unread ids in a one-to-one conversation.
    pub fn dm_ids(&self, other_user_id: UserId) -> Option<&BTreeSet<MessageId>> {
        self.dms.get(&other_user_id)
    }

    /// One-to-one conversations with unread messages.
    pub fn dm_conversations(&self) -> impl Iterator<Item = (UserId, &BTreeSet<MessageId>)> {
        self.dms.iter().map(|(user, ids)| (*user, ids))
    }

    /// Unread ids in a group conversation, by canonical key.
    pub fn group_ids(&self, key: &str) -> Option<&BTreeSet<MessageId>> {
        self.huddles.get(key)
    }

    /// Group conversations with unread messages.
    pub fn group_conversations(&self) -> impl Iterator<Item = (&str, &BTreeSet<MessageId>)> {
        self.huddles.iter().map(|(key, ids)| (key.as_str(), ids))
    }

    /// Unread ids mentioning the current user.
    pub fn mentions(&self) -> &BTreeSet<MessageId> {
        &self.mentions
    }

    /// Where an unread message lives. `None` if the message is read.
    pub fn location(&self, id: MessageId) -> Option<&UnreadLocation> {
        self.locations.get(&id)
    }

    /// Every unread id with its location, ascending by id.
    pub fn locations(&self) -> impl Iterator<Item = (MessageId, &UnreadLocation)> {
        self.locations.iter().map(|(id, location)| (*id, location))
    }

    /// Whether a message is unread.
    pub fn is_unread(&self, id: MessageId) -> bool {
        self.locations.contains_key(&id)
    }

    /// Total unread messages.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether nothing is unread.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Normalize a server group key. Keys that do not parse as ids are kept
/// verbatim so they still form their own bucket.
fn canonical_key(user_ids_string: &str) -> String {
    let parsed: Result<Vec<UserId>, _> =
        user_ids_string.split(',').map(|part| part.trim().parse::<UserId>()).collect();
    match parsed {
        Ok(ids) => Recipient::group_key(&ids),
        Err(_) => user_ids_string.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use streamview_proto::{UnreadDmSnapshot, UnreadHuddleSnapshot, UnreadStreamSnapshot};

    use super::*;

    #[test]
    fn arrival_then_read() {
        let mut state = UnreadState::new();
        assert!(state.apply(UnreadEvent::MessageArrived(UnreadMessage::stream(10, 1, "a"))));
        assert!(!state.apply(UnreadEvent::MessageArrived(UnreadMessage::stream(10, 1, "a"))));
        assert_eq!(state.len(), 1);

        assert!(state.apply(UnreadEvent::MessagesRead { ids: vec![10, 99] }));
        assert!(state.is_empty());
        assert_eq!(state.streams().count(), 0);
    }

    #[test]
    fn mention_cleared_on_read_and_delete() {
        let mut state = UnreadState::new();
        state.apply(UnreadEvent::MessageArrived(UnreadMessage::stream(1, 1, "a").with_mention()));
        state.apply(UnreadEvent::MessageArrived(UnreadMessage::stream(2, 1, "a").with_mention()));
        assert_eq!(state.mentions().len(), 2);

        state.apply(UnreadEvent::MessagesRead { ids: vec![1] });
        state.apply(UnreadEvent::MessagesDeleted { ids: vec![2] });
        assert!(state.mentions().is_empty());
    }

    #[test]
    fn mentions_read_keeps_message_unread() {
        let mut state = UnreadState::new();
        state.apply(UnreadEvent::MessageArrived(UnreadMessage::stream(1, 1, "a").with_mention()));

        assert!(state.apply(UnreadEvent::MentionsRead { ids: vec![1] }));
        assert!(state.mentions().is_empty());
        assert!(state.is_unread(1));
    }

    #[test]
    fn move_relocates_and_prunes() {
        let mut state = UnreadState::new();
        state.apply(UnreadEvent::MessageArrived(UnreadMessage::stream(1, 1, "old")));
        state.apply(UnreadEvent::MessageArrived(UnreadMessage::stream(2, 1, "old")));

        assert!(state.apply(UnreadEvent::MessagesMoved {
            ids: vec![1, 2],
            new_stream_id: 4,
            new_topic: "new".into(),
        }));
        assert!(state.topic_ids(1, "old").is_none());
        assert_eq!(state.topic_ids(4, "new").map(BTreeSet::len), Some(2));
        assert_eq!(
            state.location(1),
            Some(&UnreadLocation::Stream { stream_id: 4, topic: "new".into() })
        );
    }

    #[test]
    fn direct_messages_are_not_moved() {
        let mut state = UnreadState::new();
        state.apply(UnreadEvent::MessageArrived(UnreadMessage {
            id: 5,
            recipient: Recipient::Direct { other_user_id: 8 },
            mentioned: false,
        }));

        assert!(!state.apply(UnreadEvent::MessagesMoved {
            ids: vec![5],
            new_stream_id: 1,
            new_topic: "t".into(),
        }));
        assert_eq!(state.dm_ids(8).map(BTreeSet::len), Some(1));
    }

    #[test]
    fn marked_unread_batch() {
        let mut state = UnreadState::new();
        let changed = state.apply(UnreadEvent::MessagesMarkedUnread {
            messages: vec![
                UnreadMessage::stream(1, 1, "a"),
                UnreadMessage {
                    id: 2,
                    recipient: Recipient::GroupDirect { user_ids: vec![9, 3, 9] },
                    mentioned: true,
                },
            ],
        });

        assert!(changed);
        assert_eq!(state.group_ids("3,9").map(BTreeSet::len), Some(1));
        assert!(state.mentions().contains(&2));
    }

    #[test]
    fn snapshot_keeps_first_classification() {
        let snapshot = UnreadSnapshot {
            streams: vec![UnreadStreamSnapshot {
                stream_id: 1,
                topic: "a".into(),
                unread_message_ids: vec![1, 2],
            }],
            pms: vec![UnreadDmSnapshot { other_user_id: 7, unread_message_ids: vec![2, 3] }],
            huddles: vec![UnreadHuddleSnapshot {
                user_ids_string: "9,3".into(),
                unread_message_ids: vec![4],
            }],
            mentions: vec![1, 50],
        };
        let state = UnreadState::from_snapshot(&snapshot);

        assert_eq!(state.len(), 4);
        assert!(matches!(state.location(2), Some(UnreadLocation::Stream { .. })));
        assert_eq!(state.dm_ids(7).map(BTreeSet::len), Some(1));
        assert!(state.group_ids("3,9").is_some());
        assert_eq!(state.mentions().iter().copied().collect::<Vec<_>>(), vec![1]);
    }
}
