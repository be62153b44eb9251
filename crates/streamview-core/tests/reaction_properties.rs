//! Property-based tests for reaction aggregation.
//!
//! Aggregation must account for every well-formed reaction exactly once and
//! derive the self flag from group membership alone.

use proptest::prelude::*;
use streamview_core::aggregate_reactions;
use streamview_proto::{RawReaction, ReactionType};

/// Reactions drawn from a small emoji and user pool so groups collide.
fn reaction_strategy() -> impl Strategy<Value = RawReaction> {
    let emoji = prop_oneof![
        Just(("1f44d", "thumbs_up", ReactionType::UnicodeEmoji)),
        Just(("1f389", "tada", ReactionType::UnicodeEmoji)),
        Just(("42", "parrot", ReactionType::RealmEmoji)),
        Just(("zulip", "zulip", ReactionType::ZulipExtraEmoji)),
    ];
    (prop::option::weighted(0.9, 1u64..6), emoji).prop_map(|(user_id, (code, name, kind))| {
        RawReaction {
            user_id,
            emoji_code: code.into(),
            emoji_name: name.into(),
            reaction_type: kind,
        }
    })
}

proptest! {
    /// Property: Every reaction with a user lands in exactly one group
    #[test]
    fn prop_grouping_is_total(
        reactions in prop::collection::vec(reaction_strategy(), 0..40),
        me in 1u64..6,
    ) {
        let well_formed = reactions.iter().filter(|r| r.user_id.is_some()).count();
        let groups = aggregate_reactions(&reactions, me);

        let grouped: usize = groups.iter().map(|g| g.users.len()).sum();
        prop_assert_eq!(grouped, well_formed);
        for group in &groups {
            prop_assert_eq!(group.count, group.users.len());
        }
    }

    /// Property: self_reacted iff the current user is in the group
    #[test]
    fn prop_self_flag_matches_membership(
        reactions in prop::collection::vec(reaction_strategy(), 0..40),
        me in 1u64..6,
    ) {
        for group in aggregate_reactions(&reactions, me) {
            prop_assert_eq!(group.self_reacted, group.users.contains(&me));
        }
    }

    /// Property: Groups are ordered by count, never increasing
    #[test]
    fn prop_groups_sorted_by_count(reactions in prop::collection::vec(reaction_strategy(), 0..40)) {
        let groups = aggregate_reactions(&reactions, 1);
        prop_assert!(groups.windows(2).all(|w| w[0].count >= w[1].count));
    }

    /// Property: Same input, same output
    #[test]
    fn prop_deterministic(reactions in prop::collection::vec(reaction_strategy(), 0..40)) {
        prop_assert_eq!(aggregate_reactions(&reactions, 2), aggregate_reactions(&reactions, 2));
    }
}
