//! Model-based property tests.
//!
//! These tests generate random event sequences and verify that the real
//! unread reducer behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<UnreadEvent>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelUnread    UnreadState     Compare
//!      (reference)    (real)          Observables
//! ```

use proptest::prelude::*;
use streamview_core::{UnreadEvent, UnreadMessage, UnreadState};
use streamview_harness::{InvariantRegistry, ModelUnread, ObservableUnread, ViewSnapshot};
use streamview_proto::Recipient;

/// Small id space so events collide often.
fn id_strategy() -> impl Strategy<Value = u64> {
    1u64..24
}

fn recipient_strategy() -> impl Strategy<Value = Recipient> {
    prop_oneof![
        4 => (1u64..4, prop_oneof![Just("lunch"), Just("deploys"), Just("Lunch")])
            .prop_map(|(stream_id, topic)| Recipient::stream(stream_id, topic)),
        2 => (1u64..5).prop_map(|other_user_id| Recipient::Direct { other_user_id }),
        1 => prop::collection::vec(1u64..6, 2..4)
            .prop_map(|user_ids| Recipient::GroupDirect { user_ids }),
    ]
}

fn message_strategy() -> impl Strategy<Value = UnreadMessage> {
    (id_strategy(), recipient_strategy(), any::<bool>())
        .prop_map(|(id, recipient, mentioned)| UnreadMessage { id, recipient, mentioned })
}

fn ids_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(id_strategy(), 0..5)
}

fn event_strategy() -> impl Strategy<Value = UnreadEvent> {
    prop_oneof![
        6 => message_strategy().prop_map(UnreadEvent::MessageArrived),
        2 => ids_strategy().prop_map(|ids| UnreadEvent::MessagesRead { ids }),
        1 => prop::collection::vec(message_strategy(), 0..4)
            .prop_map(|messages| UnreadEvent::MessagesMarkedUnread { messages }),
        1 => ids_strategy().prop_map(|ids| UnreadEvent::MessagesDeleted { ids }),
        2 => (ids_strategy(), 1u64..4, prop_oneof![Just("lunch"), Just("moved")]).prop_map(
            |(ids, new_stream_id, new_topic)| UnreadEvent::MessagesMoved {
                ids,
                new_stream_id,
                new_topic: new_topic.to_owned(),
            }
        ),
        1 => ids_strategy().prop_map(|ids| UnreadEvent::MentionsRead { ids }),
    ]
}

proptest! {
    /// Property: Real reducer matches the model after every event
    #[test]
    fn prop_reducer_matches_model(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut model = ModelUnread::new();
        let mut real = UnreadState::new();

        for (step, event) in events.into_iter().enumerate() {
            let model_changed = model.apply(&event);
            let real_changed = real.apply(event);

            prop_assert_eq!(model_changed, real_changed, "change flag diverged at step {}", step);
            prop_assert_eq!(
                model.observable(),
                ObservableUnread::from_state(&real),
                "state diverged at step {}",
                step
            );
            prop_assert_eq!(model.len(), real.len());
        }
    }

    /// Property: Invariants hold after every event
    #[test]
    fn prop_invariants_hold(events in prop::collection::vec(event_strategy(), 0..60)) {
        let registry = InvariantRegistry::standard();
        let mut real = UnreadState::new();

        for event in events {
            real.apply(event);
            let snapshot = ViewSnapshot::from_unread(&real);
            prop_assert!(registry.check_all(&snapshot).is_ok(), "{:?}", registry.check_all(&snapshot));
        }
    }

    /// Property: Reading everything empties the set
    #[test]
    fn prop_read_all_empties(events in prop::collection::vec(event_strategy(), 0..40)) {
        let mut real = UnreadState::new();
        for event in events {
            real.apply(event);
        }

        let ids: Vec<_> = real.locations().map(|(id, _)| id).collect();
        real.apply(UnreadEvent::MessagesRead { ids });

        prop_assert!(real.is_empty());
        prop_assert!(real.mentions().is_empty());
        prop_assert_eq!(ObservableUnread::from_state(&real), ObservableUnread::default());
    }
}

#[test]
fn test_known_id_keeps_first_classification() {
    let mut model = ModelUnread::new();
    let mut real = UnreadState::new();
    let events = [
        UnreadEvent::MessageArrived(UnreadMessage::stream(5, 1, "lunch")),
        UnreadEvent::MessageArrived(UnreadMessage {
            id: 5,
            recipient: Recipient::Direct { other_user_id: 2 },
            mentioned: true,
        }),
    ];

    for event in events {
        assert_eq!(model.apply(&event), real.apply(event));
    }

    assert_eq!(model.observable(), ObservableUnread::from_state(&real));
    assert_eq!(real.len(), 1);
    assert!(real.mentions().is_empty());
}
