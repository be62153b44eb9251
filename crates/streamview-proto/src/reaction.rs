//! Emoji reactions as sent by the server.
//!
//! One record per (user, emoji). The server groups nothing; aggregation into
//! per-emoji tallies happens client-side.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// A single user's reaction on a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReaction {
    /// Reacting user. Absent on some legacy payloads; such records are
    /// skipped during aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    /// Emoji code: hex codepoints for unicode emoji (`1f44d`,
    /// `1f1fa-1f1f8`), or the realm emoji id.
    pub emoji_code: String,

    /// Emoji short name (`thumbs_up`).
    pub emoji_name: String,

    /// Which emoji namespace `emoji_code` refers to.
    pub reaction_type: ReactionType,
}

impl RawReaction {
    /// Reaction from a known user.
    pub fn new(
        user_id: UserId,
        emoji_code: impl Into<String>,
        emoji_name: impl Into<String>,
        reaction_type: ReactionType,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            emoji_code: emoji_code.into(),
            emoji_name: emoji_name.into(),
            reaction_type,
        }
    }
}

/// Emoji namespace of a reaction.
///
/// Unknown namespaces are preserved verbatim so a newer server never breaks
/// decoding of the whole message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReactionType {
    /// Standard unicode emoji; code is hex codepoints
    UnicodeEmoji,
    /// Custom emoji uploaded to the realm; code is the emoji id
    RealmEmoji,
    /// Server-provided extra emoji (e.g. `zulip`)
    ZulipExtraEmoji,
    /// Namespace unknown to this client
    Other(String),
}

impl ReactionType {
    /// Wire name of the namespace.
    pub fn as_str(&self) -> &str {
        match self {
            Self::UnicodeEmoji => "unicode_emoji",
            Self::RealmEmoji => "realm_emoji",
            Self::ZulipExtraEmoji => "zulip_extra_emoji",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ReactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unicode_emoji" => Self::UnicodeEmoji,
            "realm_emoji" => Self::RealmEmoji,
            "zulip_extra_emoji" => Self::ZulipExtraEmoji,
            _ => Self::Other(value),
        }
    }
}

impl From<ReactionType> for String {
    fn from(value: ReactionType) -> Self {
        match value {
            ReactionType::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_id_decodes_as_none() {
        let json = r#"{"emoji_code":"1f44d","emoji_name":"thumbs_up","reaction_type":"unicode_emoji"}"#;
        let reaction: RawReaction = serde_json::from_str(json).unwrap();

        assert_eq!(reaction.user_id, None);
        assert_eq!(reaction.reaction_type, ReactionType::UnicodeEmoji);
    }

    #[test]
    fn unknown_reaction_type_is_preserved() {
        let json = r#"{"user_id":3,"emoji_code":"x","emoji_name":"x","reaction_type":"sticker"}"#;
        let reaction: RawReaction = serde_json::from_str(json).unwrap();

        assert_eq!(reaction.reaction_type, ReactionType::Other("sticker".into()));
        assert_eq!(reaction.reaction_type.as_str(), "sticker");

        let back = serde_json::to_value(&reaction).unwrap();
        assert_eq!(back["reaction_type"], "sticker");
    }
}
