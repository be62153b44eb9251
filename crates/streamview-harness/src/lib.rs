//! Test harness for the streamview view-model core.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a naive reference implementation of the unread
//! reducer. Events are applied to both the model and [`UnreadState`], and
//! their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks over a [`ViewSnapshot`]. Invariants verify WHAT must be true across
//! all event sequences, not specific scenarios. Use
//! [`InvariantRegistry::standard()`] for the unread and topic list
//! invariants.
//!
//! [`UnreadState`]: streamview_core::UnreadState

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod invariants;
pub mod model;

pub use invariants::{
    ExclusiveClassification, Invariant, InvariantRegistry, InvariantResult,
    LocationIndexConsistency, MentionsSubsetOfUnread, MutedStreamHidesTopics, TopicViewConsistency,
    UnreadSumConsistency, ViewSnapshot, Violation,
};
pub use model::{ModelUnread, ObservableUnread};
