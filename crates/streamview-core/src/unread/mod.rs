//! Unread message set and counters.
//!
//! [`UnreadState`] is the single source of truth for which messages are
//! unread. It is built from the register snapshot and then driven by
//! [`UnreadEvent`]s. The counters in this module are read-only views over it.

mod count;
mod event;
mod state;

pub use count::{
    count_for_dm, count_for_group_dm, count_for_stream, count_for_topic, mention_count,
    total_dm_count, unread_by_stream,
};
pub use event::{UnreadEvent, UnreadMessage};
pub use state::{UnreadLocation, UnreadState};
