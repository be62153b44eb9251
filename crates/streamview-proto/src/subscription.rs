//! Stream subscriptions.

use serde::{Deserialize, Serialize};

use crate::StreamId;

/// The current user's membership in a stream.
///
/// Older servers express stream-level mute as `in_home_view == false`; newer
/// ones send `is_muted`. Either may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscribed stream.
    pub stream_id: StreamId,

    /// Stream display name.
    #[serde(default)]
    pub name: String,

    /// User-chosen stream color (`#rrggbb`).
    #[serde(default)]
    pub color: String,

    /// Stream is pinned to the top of the stream list.
    #[serde(default)]
    pub pin_to_top: bool,

    /// Legacy stream-level mute flag; `false` means muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_home_view: Option<bool>,

    /// Stream-level mute flag on newer servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_muted: Option<bool>,

    /// Private (invite-only) stream.
    #[serde(default)]
    pub invite_only: bool,

    /// Stream readable without an account.
    #[serde(default)]
    pub is_web_public: bool,
}

impl Subscription {
    /// Subscription with default flags (unmuted, unpinned, public).
    pub fn new(stream_id: StreamId, name: impl Into<String>) -> Self {
        Self {
            stream_id,
            name: name.into(),
            color: String::new(),
            pin_to_top: false,
            in_home_view: None,
            is_muted: None,
            invite_only: false,
            is_web_public: false,
        }
    }

    /// Whether the whole stream is muted.
    ///
    /// `is_muted` wins when present; otherwise `in_home_view == false`.
    /// Both absent means not muted.
    pub fn is_stream_muted(&self) -> bool {
        match (self.is_muted, self.in_home_view) {
            (Some(muted), _) => muted,
            (None, Some(in_home_view)) => !in_home_view,
            (None, None) => false,
        }
    }
}
