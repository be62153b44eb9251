//! Reaction aggregation.
//!
//! The server sends one record per (user, emoji). The message footer shows
//! one chip per emoji with the users who reacted, so records are grouped by
//! `(emoji_code, emoji_name, reaction_type)`.

use serde::Serialize;
use streamview_proto::{RawReaction, ReactionType, UserId};
use tracing::warn;

/// All reactions for one emoji on one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedReaction {
    /// Emoji code.
    pub code: String,
    /// Emoji short name.
    pub name: String,
    /// Emoji namespace.
    pub reaction_type: ReactionType,
    /// Users who reacted, in the order their reactions were received.
    pub users: Vec<UserId>,
    /// `users.len()`.
    pub count: usize,
    /// Whether the current user is among `users`.
    pub self_reacted: bool,
}

impl AggregatedReaction {
    fn matches(&self, reaction: &RawReaction) -> bool {
        self.code == reaction.emoji_code
            && self.name == reaction.emoji_name
            && self.reaction_type == reaction.reaction_type
    }
}

/// Group per-user reactions into per-emoji tallies.
///
/// Records without a `user_id` are skipped; every other record lands in
/// exactly one group. Groups are ordered by count descending; ties
/// keep the order in which each emoji first appeared.
pub fn aggregate_reactions(
    reactions: &[RawReaction],
    self_user_id: UserId,
) -> Vec<AggregatedReaction> {
    let mut groups: Vec<AggregatedReaction> = Vec::new();

    for reaction in reactions {
        let Some(user_id) = reaction.user_id else {
            warn!(emoji = %reaction.emoji_name, "skipping reaction without user_id");
            continue;
        };

        match groups.iter_mut().find(|group| group.matches(reaction)) {
            Some(group) => group.users.push(user_id),
            None => groups.push(AggregatedReaction {
                code: reaction.emoji_code.clone(),
                name: reaction.emoji_name.clone(),
                reaction_type: reaction.reaction_type.clone(),
                users: vec![user_id],
                count: 0,
                self_reacted: false,
            }),
        }
    }

    for group in &mut groups {
        group.count = group.users.len();
        group.self_reacted = group.users.contains(&self_user_id);
    }

    // sort_by is stable: ties stay in first-appearance order
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
