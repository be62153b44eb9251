//! Invariant checking for unread and topic list state.
//!
//! Each check relates counts that are derived separately: per-topic unread
//! buckets, the per-stream and overall totals, the mention set, and the
//! topic rows shown in the stream list. Property tests and fuzz targets run
//! the registry after every applied event.
//!
//! # Snapshots
//!
//! [`ViewSnapshot::capture`] copies the unread buckets, subscriptions, mute
//! policies and built topic rows into ordered maps. Checks read only the
//! snapshot, so a failing case can be printed and compared directly.
//!
//! # Example
//!
//! ```
//! use streamview_core::UnreadState;
//! use streamview_harness::{InvariantRegistry, ViewSnapshot};
//!
//! let snapshot = ViewSnapshot::from_unread(&UnreadState::default());
//! assert!(InvariantRegistry::standard().check_all(&snapshot).is_ok());
//! ```

mod checks;
mod snapshot;

pub use checks::{
    ExclusiveClassification, LocationIndexConsistency, MentionsSubsetOfUnread,
    MutedStreamHidesTopics, TopicViewConsistency, UnreadSumConsistency,
};
pub use snapshot::ViewSnapshot;

/// Outcome of a single check.
pub type InvariantResult = Result<(), Violation>;

/// A failed check and what it saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// [`Invariant::name`] of the failed check.
    pub invariant: &'static str,
    /// Offending ids and counts.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property of a [`ViewSnapshot`].
pub trait Invariant: Send + Sync {
    /// Stable snake_case name used in violation output.
    fn name(&self) -> &'static str;

    /// Evaluate against `state`, stopping at the first offending entry.
    fn check(&self, state: &ViewSnapshot) -> InvariantResult;

    /// Violation tagged with this check's name.
    fn violation(&self, message: String) -> Violation {
        Violation { invariant: self.name(), message }
    }
}

/// Ordered set of checks run together against one snapshot.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Registry with no checks.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Every check in this crate:
    /// - [`UnreadSumConsistency`]: stream totals equal the sum of their topics
    /// - [`ExclusiveClassification`]: every unread id is in exactly one bucket
    /// - [`LocationIndexConsistency`]: reverse index agrees with the buckets
    /// - [`MentionsSubsetOfUnread`]: mentions are unread
    /// - [`TopicViewConsistency`]: topic views carry the bucket counts
    /// - [`MutedStreamHidesTopics`]: inherited topics of muted streams are hidden
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(UnreadSumConsistency);
        registry.add(ExclusiveClassification);
        registry.add(LocationIndexConsistency);
        registry.add(MentionsSubsetOfUnread);
        registry.add(TopicViewConsistency);
        registry.add(MutedStreamHidesTopics);
        registry
    }

    /// Append a check.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Run every check. `Err` collects one violation per failing check.
    pub fn check_all(&self, state: &ViewSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Like [`check_all`](Self::check_all), but panics listing every
    /// violation. `context` says which step of a test produced `state`.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &ViewSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// `true` when no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn empty_snapshot_passes_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&ViewSnapshot::default()).is_ok());
    }
}
