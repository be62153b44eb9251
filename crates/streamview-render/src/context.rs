//! Render inputs beyond the message itself.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use streamview_core::ListKind;
use streamview_proto::{MessageId, UserId};

/// Per-message flags: flag name (`starred`, `read`, `mentioned`, ...) to the
/// ids carrying it.
pub type FlagsState = BTreeMap<String, BTreeSet<MessageId>>;

/// Flag name the star tag is read from.
pub const STARRED_FLAG: &str = "starred";

/// Names of the flags set on a message, in flag-name order.
pub fn flag_strings(flags: &FlagsState, id: MessageId) -> Vec<&str> {
    flags.iter().filter(|(_, ids)| ids.contains(&id)).map(|(name, _)| name.as_str()).collect()
}

/// Display information for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Full name.
    pub full_name: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
}

/// Renderer tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Avatars shown per reaction chip before collapsing into `+N`.
    pub max_reaction_avatars: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { max_reaction_avatars: 3 }
    }
}

/// Client state the renderer reads.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Current user.
    pub own_user_id: UserId,
    /// Known users.
    pub users: BTreeMap<UserId, UserInfo>,
    /// Image emoji source URLs by emoji code (realm and extra emoji).
    pub image_emoji: BTreeMap<String, String>,
    /// Message flags.
    pub flags: FlagsState,
    /// List the messages are shown in.
    pub list_kind: ListKind,
    /// Current time, unix seconds, for relative timestamps.
    pub now: i64,
    /// Tunables.
    pub config: RenderConfig,
}

impl RenderContext {
    /// Context for a user with no other state.
    pub fn new(own_user_id: UserId) -> Self {
        Self { own_user_id, ..Self::default() }
    }

    /// Whether `id` carries `flag`.
    pub fn has_flag(&self, flag: &str, id: MessageId) -> bool {
        self.flags.get(flag).is_some_and(|ids| ids.contains(&id))
    }
}
