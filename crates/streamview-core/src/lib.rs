//! View-model core for the stream list and message renderer.
//!
//! Pure, synchronous transforms over snapshots of client state. Nothing here
//! performs I/O or holds locks; the caller owns the state and hands out
//! borrows for the duration of one render pass. Reducers ([`UnreadState`],
//! [`MuteState`]) are the only mutating entry points and are driven by
//! server events.
//!
//! # Components
//!
//! - [`reactions`]: Groups per-user reactions into per-emoji tallies
//! - [`mute`]: Topic visibility from topic and stream mute policies
//! - [`unread`]: Unread set reducer and counters
//! - [`topics`]: Topic list views annotated with unread and mute state
//! - [`streams`]: Stream list sections and stream directory helpers
//! - [`poll`]: Poll widget state machine
//! - [`quote`]: Quote-block HTML rewriter and quote preview extraction
//!
//! # Failure model
//!
//! No function in this crate fails a render. Malformed input is skipped and
//! logged through `tracing`; widget setup failures surface as a
//! [`WidgetError`] the renderer turns into a fallback body.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod mute;
pub mod poll;
pub mod quote;
pub mod reactions;
pub mod streams;
pub mod topics;
pub mod unread;

pub use error::{PollError, WidgetError};
pub use mute::{MuteState, is_topic_visible};
pub use poll::{
    Poll, PollErrorSink, PollOptionView, PollSetup, PollState, TracingSink, replay_poll,
};
pub use quote::{ListKind, MAX_QUOTE_DEPTH, QuoteContext, rewrite_quotes, strip_quoted_markdown};
pub use reactions::{AggregatedReaction, aggregate_reactions};
pub use streams::{
    StreamRow, StreamSection, SectionKind, SubscriptionIndex, build_stream_sections,
    filter_streams_by_name, index_subscriptions, sort_streams_by_name,
};
pub use topics::{
    TopicExtended, build_all_topics, build_topics_for_stream, sort_by_recency, topic_names,
};
pub use unread::{
    UnreadEvent, UnreadLocation, UnreadMessage, UnreadState, count_for_dm, count_for_group_dm,
    count_for_stream, count_for_topic, mention_count, total_dm_count, unread_by_stream,
};
