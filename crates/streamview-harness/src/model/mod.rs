//! Reference model of the unread reducer.
//!
//! The model is the oracle against which [`UnreadState`] is verified. It
//! keeps a flat list of unread entries and answers every query by scanning
//! it, so it is easy to read and slow to run.

use std::collections::{BTreeMap, BTreeSet};

use streamview_core::{UnreadEvent, UnreadLocation, UnreadMessage, UnreadState};
use streamview_proto::{MessageId, Recipient};
use tracing::trace;

/// Observable unread state for oracle comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservableUnread {
    /// Unread ids per conversation.
    pub buckets: BTreeMap<UnreadLocation, BTreeSet<MessageId>>,
    /// Unread mentions.
    pub mentions: BTreeSet<MessageId>,
}

impl ObservableUnread {
    /// Observe a real reducer through its bucket accessors.
    pub fn from_state(state: &UnreadState) -> Self {
        let mut buckets = BTreeMap::new();
        for stream_id in state.streams() {
            for (topic, ids) in state.stream_topics(stream_id) {
                buckets.insert(
                    UnreadLocation::Stream { stream_id, topic: topic.to_owned() },
                    ids.clone(),
                );
            }
        }
        for (other_user_id, ids) in state.dm_conversations() {
            buckets.insert(UnreadLocation::Direct { other_user_id }, ids.clone());
        }
        for (key, ids) in state.group_conversations() {
            buckets.insert(UnreadLocation::GroupDirect { key: key.to_owned() }, ids.clone());
        }
        Self { buckets, mentions: state.mentions().clone() }
    }
}

#[derive(Debug, Clone)]
struct ModelEntry {
    id: MessageId,
    location: UnreadLocation,
    mentioned: bool,
}

/// Naive unread set.
#[derive(Debug, Clone, Default)]
pub struct ModelUnread {
    entries: Vec<ModelEntry>,
}

impl ModelUnread {
    /// Empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event and return whether the model changed.
    ///
    /// This is the main entry point for model-based testing. The result
    /// should match [`UnreadState::apply`].
    pub fn apply(&mut self, event: &UnreadEvent) -> bool {
        trace!(?event, "model apply");
        match event {
            UnreadEvent::MessageArrived(message) => self.insert(message),
            UnreadEvent::MessagesMarkedUnread { messages } => {
                let mut changed = false;
                for message in messages {
                    changed |= self.insert(message);
                }
                changed
            },
            UnreadEvent::MessagesRead { ids } | UnreadEvent::MessagesDeleted { ids } => {
                let before = self.entries.len();
                self.entries.retain(|entry| !ids.contains(&entry.id));
                self.entries.len() != before
            },
            UnreadEvent::MessagesMoved { ids, new_stream_id, new_topic } => {
                let target =
                    UnreadLocation::Stream { stream_id: *new_stream_id, topic: new_topic.clone() };
                let mut changed = false;
                for entry in &mut self.entries {
                    let is_stream = matches!(entry.location, UnreadLocation::Stream { .. });
                    if ids.contains(&entry.id) && is_stream && entry.location != target {
                        entry.location = target.clone();
                        changed = true;
                    }
                }
                changed
            },
            UnreadEvent::MentionsRead { ids } => {
                let mut changed = false;
                for entry in &mut self.entries {
                    if ids.contains(&entry.id) && entry.mentioned {
                        entry.mentioned = false;
                        changed = true;
                    }
                }
                changed
            },
        }
    }

    fn insert(&mut self, message: &UnreadMessage) -> bool {
        if self.entries.iter().any(|entry| entry.id == message.id) {
            return false;
        }
        self.entries.push(ModelEntry {
            id: message.id,
            location: location_of(&message.recipient),
            mentioned: message.mentioned,
        });
        true
    }

    /// Whether a message is unread.
    pub fn is_unread(&self, id: MessageId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Number of unread messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is unread.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Observable state for comparison with [`ObservableUnread::from_state`].
    pub fn observable(&self) -> ObservableUnread {
        let mut observable = ObservableUnread::default();
        for entry in &self.entries {
            observable.buckets.entry(entry.location.clone()).or_default().insert(entry.id);
            if entry.mentioned {
                observable.mentions.insert(entry.id);
            }
        }
        observable
    }
}

fn location_of(recipient: &Recipient) -> UnreadLocation {
    match recipient {
        Recipient::Stream { stream_id, topic } => {
            UnreadLocation::Stream { stream_id: *stream_id, topic: topic.clone() }
        },
        Recipient::Direct { other_user_id } => {
            UnreadLocation::Direct { other_user_id: *other_user_id }
        },
        Recipient::GroupDirect { user_ids } => {
            let mut ids = user_ids.clone();
            ids.sort_unstable();
            ids.dedup();
            let key = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
            UnreadLocation::GroupDirect { key }
        },
    }
}
