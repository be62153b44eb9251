//! Stream list tests: the full pipeline from register data to sections.
//!
//! # Oracle Pattern
//!
//! Each test builds state the way the client does on startup (snapshot,
//! topic lists, user topics) and checks the section rows the UI would draw.

use std::collections::BTreeMap;

use proptest::prelude::*;
use streamview_core::{
    MuteState, SectionKind, StreamRow, UnreadState, build_all_topics, build_stream_sections,
    index_subscriptions, unread_by_stream,
};
use streamview_proto::{
    Subscription, TopicRecord, TopicsState, UnreadSnapshot, UnreadStreamSnapshot, UserTopic,
    VisibilityPolicy,
};

fn subscription(stream_id: u64, name: &str, pinned: bool, muted: bool) -> Subscription {
    let mut sub = Subscription::new(stream_id, name);
    sub.pin_to_top = pinned;
    sub.in_home_view = Some(!muted);
    sub
}

#[test]
fn register_to_sections() {
    let subs = vec![
        subscription(1, "general", false, false),
        subscription(2, "design", true, false),
        subscription(3, "random", false, true),
    ];
    let topics = TopicsState::from([
        (1, vec![TopicRecord::new("hello", 40), TopicRecord::new("muted", 90)]),
        (3, vec![TopicRecord::new("cats", 100)]),
    ]);
    let unread = UnreadState::from_snapshot(&UnreadSnapshot {
        streams: vec![
            UnreadStreamSnapshot { stream_id: 1, topic: "hello".into(), unread_message_ids: vec![38, 39] },
            UnreadStreamSnapshot { stream_id: 1, topic: "muted".into(), unread_message_ids: vec![90] },
            UnreadStreamSnapshot { stream_id: 3, topic: "cats".into(), unread_message_ids: vec![100] },
        ],
        ..UnreadSnapshot::default()
    });
    let mute = MuteState::from_user_topics(&[UserTopic {
        stream_id: 1,
        topic_name: "muted".into(),
        visibility_policy: VisibilityPolicy::Muted,
    }]);

    let index = index_subscriptions(&subs);
    let annotated = build_all_topics(&topics, &index, &mute, &unread);
    let badges = unread_by_stream(&unread, &index, &mute);
    let sections = build_stream_sections(&subs, &annotated, &badges);

    assert_eq!(sections[0].kind, SectionKind::Pinned);
    assert_eq!(sections[0].rows.len(), 1);
    assert_eq!(sections[0].rows[0].topics, None);

    let other: Vec<(u64, Option<u64>, usize, bool)> = sections[1]
        .rows
        .iter()
        .map(|r| (r.stream_id, r.last_message_id, r.unread_count, r.is_muted))
        .collect();
    assert_eq!(other, [(3, Some(100), 0, true), (1, Some(90), 2, false)]);

    let general = &sections[1].rows[1];
    let muted_topic = general.topics.as_ref().and_then(|t| t.iter().find(|t| t.name == "muted"));
    assert!(muted_topic.is_some_and(|t| t.is_muted && t.unread_count == 1));
}

fn sub_strategy() -> impl Strategy<Value = Subscription> {
    (1u64..30, "[A-Za-z]{1,6}", any::<bool>())
        .prop_map(|(stream_id, name, pinned)| subscription(stream_id, &name, pinned, false))
}

fn sort_key(row: &StreamRow) -> (bool, std::cmp::Reverse<u64>, String, u64) {
    (
        row.last_message_id.is_none(),
        std::cmp::Reverse(row.last_message_id.unwrap_or(0)),
        row.name.to_lowercase(),
        row.stream_id,
    )
}

proptest! {
    /// Property: Each subscription lands in exactly one section, matching
    /// its pin flag
    #[test]
    fn prop_every_subscription_in_one_section(
        subs in prop::collection::vec(sub_strategy(), 0..20),
    ) {
        let sections = build_stream_sections(&subs, &BTreeMap::new(), &BTreeMap::new());
        prop_assert_eq!(sections.len(), 2);

        let total: usize = sections.iter().map(|s| s.rows.len()).sum();
        prop_assert_eq!(total, subs.len());

        let pinned = subs.iter().filter(|s| s.pin_to_top).count();
        prop_assert_eq!(sections[0].rows.len(), pinned);
    }

    /// Property: Rows are ordered by activity, then name, then id
    #[test]
    fn prop_rows_sorted(
        subs in prop::collection::vec(sub_strategy(), 0..20),
        activity in prop::collection::btree_map(1u64..30, prop::collection::vec(1u64..500, 0..3), 0..20),
    ) {
        let topics = activity
            .into_iter()
            .map(|(stream_id, ids)| {
                let topics = ids
                    .into_iter()
                    .map(|max_id| streamview_core::TopicExtended {
                        name: format!("t{max_id}"),
                        max_id,
                        is_muted: false,
                        unread_count: 0,
                    })
                    .collect();
                (stream_id, topics)
            })
            .collect();

        for section in build_stream_sections(&subs, &topics, &BTreeMap::new()) {
            let keys: Vec<_> = section.rows.iter().map(sort_key).collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
