//! Fuzz target for the unread reducer
//!
//! # Strategy
//!
//! - Register payload with overlapping buckets and stray mentions
//! - Arbitrary event sequence over a small id space
//!
//! # Invariants
//!
//! - Reducer state matches the reference model after every event
//! - Standard invariants hold after every event

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamview_core::{UnreadEvent, UnreadLocation, UnreadMessage, UnreadState};
use streamview_harness::{InvariantRegistry, ModelUnread, ObservableUnread, ViewSnapshot};
use streamview_proto::{Recipient, UnreadDmSnapshot, UnreadSnapshot, UnreadStreamSnapshot};

#[derive(Debug, Clone, Arbitrary)]
enum Target {
    Stream { stream: u8, topic: u8 },
    Direct { user: u8 },
    Group { users: Vec<u8> },
}

#[derive(Debug, Clone, Arbitrary)]
enum Event {
    Arrived { id: u8, target: Target, mentioned: bool },
    Read(Vec<u8>),
    MarkedUnread(Vec<(u8, Target)>),
    Deleted(Vec<u8>),
    Moved { ids: Vec<u8>, stream: u8, topic: u8 },
    MentionsRead(Vec<u8>),
}

#[derive(Debug, Clone, Arbitrary)]
struct Case {
    streams: Vec<(u8, u8, Vec<u8>)>,
    pms: Vec<(u8, Vec<u8>)>,
    events: Vec<Event>,
}

fn topic(index: u8) -> String {
    format!("topic {}", index % 4)
}

fn recipient(target: &Target) -> Recipient {
    match target {
        Target::Stream { stream, topic: t } => Recipient::stream(u64::from(*stream % 4), topic(*t)),
        Target::Direct { user } => Recipient::Direct { other_user_id: u64::from(*user % 8) },
        Target::Group { users } => Recipient::GroupDirect {
            user_ids: users.iter().take(4).map(|u| u64::from(*u % 8)).collect(),
        },
    }
}

fn ids(raw: &[u8]) -> Vec<u64> {
    raw.iter().map(|id| u64::from(*id % 32)).collect()
}

fn event(event: &Event) -> UnreadEvent {
    match event {
        Event::Arrived { id, target, mentioned } => UnreadEvent::MessageArrived(UnreadMessage {
            id: u64::from(*id % 32),
            recipient: recipient(target),
            mentioned: *mentioned,
        }),
        Event::Read(raw) => UnreadEvent::MessagesRead { ids: ids(raw) },
        Event::MarkedUnread(raw) => UnreadEvent::MessagesMarkedUnread {
            messages: raw
                .iter()
                .map(|(id, target)| UnreadMessage {
                    id: u64::from(*id % 32),
                    recipient: recipient(target),
                    mentioned: false,
                })
                .collect(),
        },
        Event::Deleted(raw) => UnreadEvent::MessagesDeleted { ids: ids(raw) },
        Event::Moved { ids: raw, stream, topic: t } => UnreadEvent::MessagesMoved {
            ids: ids(raw),
            new_stream_id: u64::from(*stream % 4),
            new_topic: topic(*t),
        },
        Event::MentionsRead(raw) => UnreadEvent::MentionsRead { ids: ids(raw) },
    }
}

fuzz_target!(|case: Case| {
    let snapshot = UnreadSnapshot {
        streams: case
            .streams
            .iter()
            .map(|(stream, t, raw)| UnreadStreamSnapshot {
                stream_id: u64::from(*stream % 4),
                topic: topic(*t),
                unread_message_ids: ids(raw),
            })
            .collect(),
        pms: case
            .pms
            .iter()
            .map(|(user, raw)| UnreadDmSnapshot {
                other_user_id: u64::from(*user % 8),
                unread_message_ids: ids(raw),
            })
            .collect(),
        huddles: Vec::new(),
        mentions: Vec::new(),
    };

    let registry = InvariantRegistry::standard();
    let mut real = UnreadState::from_snapshot(&snapshot);
    registry.assert_all(&ViewSnapshot::from_unread(&real), "after load");

    // Seed the model with whatever the loader kept.
    let mut model = ModelUnread::new();
    for (id, location) in real.locations() {
        let recipient = match location {
            UnreadLocation::Stream { stream_id, topic } => {
                Recipient::stream(*stream_id, topic.clone())
            }
            UnreadLocation::Direct { other_user_id } => {
                Recipient::Direct { other_user_id: *other_user_id }
            }
            UnreadLocation::GroupDirect { .. } => continue,
        };
        model.apply(&UnreadEvent::MessageArrived(UnreadMessage { id, recipient, mentioned: false }));
    }
    assert_eq!(model.observable(), ObservableUnread::from_state(&real));

    for raw in &case.events {
        let event = event(raw);
        assert_eq!(model.apply(&event), real.apply(event.clone()), "{event:?}");
        assert_eq!(model.observable(), ObservableUnread::from_state(&real), "{event:?}");
        registry.assert_all(&ViewSnapshot::from_unread(&real), "after event");
    }
});
