//! Poll widget state machine.
//!
//! A poll message carries a list of submessages. The lowest-id widget
//! submessage describes the poll (question and canned options); every later
//! one is a [`PollEvent`]. The poll's state is the fold of those events in id
//! order, so the transport's delivery order never matters.
//!
//! # States
//!
//! ```text
//! (no widget) ──setup──▶ Active ──event──▶ Active
//! ```
//!
//! A bad setup submessage never produces a poll: [`replay_poll`] returns a
//! [`WidgetError`] and the renderer falls back to plain content. A bad event
//! is reported to the caller's [`PollErrorSink`] and skipped.

use std::collections::BTreeSet;

use serde::Serialize;
use streamview_proto::{PollEvent, Submessage, UserId};
use tracing::{debug, warn};

use crate::{PollError, WidgetError};

/// Key prefix for options that came with the poll itself.
const CANNED_KEY_PREFIX: &str = "canned";

const POLL_WIDGET_TYPE: &str = "poll";

/// Receives per-event errors during replay.
///
/// Replay never stops on a bad event; the sink decides what to do with it.
/// Any `FnMut(&PollError)` closure is a sink.
pub trait PollErrorSink {
    /// Handle one rejected event.
    fn report(&mut self, error: &PollError);
}

impl<F: FnMut(&PollError)> PollErrorSink for F {
    fn report(&mut self, error: &PollError) {
        self(error);
    }
}

/// Sink that logs rejected events as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl PollErrorSink for TracingSink {
    fn report(&mut self, error: &PollError) {
        warn!(%error, "poll event skipped");
    }
}

/// Everything needed to start a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSetup {
    /// Author of the poll message; the only user allowed to edit the
    /// question.
    pub message_sender_id: UserId,
    /// Current user, for `current_user_vote` and outbound events.
    pub own_user_id: UserId,
    /// Initial question.
    pub question: String,
    /// Canned options, keyed `canned,<idx>`.
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PollOption {
    key: String,
    text: String,
    voters: BTreeSet<UserId>,
}

/// A live poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poll {
    message_sender_id: UserId,
    own_user_id: UserId,
    question: String,
    /// Creation order.
    options: Vec<PollOption>,
    /// Next free option index for options added by the current user.
    next_own_idx: u32,
}

impl Poll {
    /// Start a poll from its setup.
    pub fn new(setup: PollSetup) -> Self {
        let options = setup
            .options
            .into_iter()
            .enumerate()
            .map(|(idx, text)| PollOption {
                key: format!("{CANNED_KEY_PREFIX},{idx}"),
                text,
                voters: BTreeSet::new(),
            })
            .collect();

        Self {
            message_sender_id: setup.message_sender_id,
            own_user_id: setup.own_user_id,
            question: setup.question,
            options,
            next_own_idx: 0,
        }
    }

    /// Rebuild a poll from a message's submessages.
    ///
    /// Non-widget submessages are ignored. The rest are sorted by id; the
    /// first must describe a poll, the others are replayed as events with
    /// failures going to `sink`.
    ///
    /// # Errors
    ///
    /// - `WidgetError::NoWidgetSubmessage` if no widget submessage exists
    /// - `WidgetError::Undecodable` if the first does not decode
    /// - `WidgetError::UnsupportedType` if it is not a poll
    /// - `WidgetError::MissingExtraData` if it has no `extra_data`
    pub fn replay(
        message_sender_id: UserId,
        own_user_id: UserId,
        submessages: &[Submessage],
        sink: &mut impl PollErrorSink,
    ) -> Result<Self, WidgetError> {
        let mut widgets: Vec<&Submessage> = submessages.iter().filter(|s| s.is_widget()).collect();
        widgets.sort_by_key(|s| s.id);

        let Some((setup, events)) = widgets.split_first() else {
            return Err(WidgetError::NoWidgetSubmessage);
        };

        let data = setup.decode_widget_data()?;
        if data.widget_type != POLL_WIDGET_TYPE {
            return Err(WidgetError::UnsupportedType(data.widget_type));
        }
        let extra = data.extra_data.ok_or(WidgetError::MissingExtraData(setup.id))?;

        let mut poll = Self::new(PollSetup {
            message_sender_id,
            own_user_id,
            question: extra.question.unwrap_or_default(),
            options: extra.options.unwrap_or_default(),
        });

        for submessage in events {
            debug!(id = submessage.id, sender = submessage.sender_id, "replaying poll event");
            if let Err(error) = poll.handle_submessage(submessage) {
                sink.report(&error);
            }
        }

        Ok(poll)
    }

    /// Decode and apply one event submessage.
    ///
    /// # Errors
    ///
    /// `PollError::Decode` for payloads that are not poll events, otherwise
    /// as [`Poll::handle_event`].
    pub fn handle_submessage(&mut self, submessage: &Submessage) -> Result<(), PollError> {
        let event = submessage.decode_poll_event()?;
        self.handle_event(submessage.sender_id, &event)
    }

    /// Apply one event from `sender_id`.
    ///
    /// # Errors
    ///
    /// - `PollError::UnknownOptionKey` for a vote on a missing option
    /// - `PollError::InvalidVote` for a vote value other than 1 or -1
    /// - `PollError::QuestionEditForbidden` if `sender_id` is not the poll
    ///   author
    pub fn handle_event(&mut self, sender_id: UserId, event: &PollEvent) -> Result<(), PollError> {
        match event {
            PollEvent::NewOption { idx, option } => {
                let key = format!("{sender_id},{idx}");
                let fresh = PollOption { key, text: option.clone(), voters: BTreeSet::new() };
                match self.options.iter_mut().find(|o| o.key == fresh.key) {
                    Some(existing) => *existing = fresh,
                    None => self.options.push(fresh),
                }
                if sender_id == self.own_user_id && *idx >= self.next_own_idx {
                    self.next_own_idx = idx.saturating_add(1);
                }
                Ok(())
            },
            PollEvent::Vote { key, vote } => {
                let option = self
                    .options
                    .iter_mut()
                    .find(|o| &o.key == key)
                    .ok_or_else(|| PollError::UnknownOptionKey { key: key.clone() })?;
                match vote {
                    1 => option.voters.insert(sender_id),
                    -1 => option.voters.remove(&sender_id),
                    _ => return Err(PollError::InvalidVote { sender_id, vote: *vote }),
                };
                Ok(())
            },
            PollEvent::Question { question } => {
                if sender_id != self.message_sender_id {
                    return Err(PollError::QuestionEditForbidden { sender_id });
                }
                self.question.clone_from(question);
                Ok(())
            },
        }
    }

    /// Current question.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Whether the current user authored the poll.
    pub fn is_my_poll(&self) -> bool {
        self.message_sender_id == self.own_user_id
    }

    /// Snapshot for rendering.
    pub fn state(&self) -> PollState {
        PollState {
            question: self.question.clone(),
            options: self
                .options
                .iter()
                .map(|o| PollOptionView {
                    key: o.key.clone(),
                    option: o.text.clone(),
                    voters: o.voters.iter().copied().collect(),
                    count: o.voters.len(),
                    current_user_vote: o.voters.contains(&self.own_user_id),
                })
                .collect(),
        }
    }

    /// Event adding an option as the current user.
    ///
    /// Reserves the index, so consecutive calls never collide with each
    /// other or with options this user added from other devices.
    pub fn new_option_event(&mut self, option: impl Into<String>) -> PollEvent {
        let idx = self.next_own_idx;
        self.next_own_idx = idx.saturating_add(1);
        PollEvent::NewOption { idx, option: option.into() }
    }

    /// Event toggling the current user's vote on an option.
    ///
    /// # Errors
    ///
    /// `PollError::UnknownOptionKey` if no option has `key`.
    pub fn vote_event(&self, key: &str) -> Result<PollEvent, PollError> {
        let option = self
            .options
            .iter()
            .find(|o| o.key == key)
            .ok_or_else(|| PollError::UnknownOptionKey { key: key.to_owned() })?;
        let vote = if option.voters.contains(&self.own_user_id) { -1 } else { 1 };
        Ok(PollEvent::Vote { key: key.to_owned(), vote })
    }

    /// Event changing the question. `None` unless the current user authored
    /// the poll.
    pub fn question_event(&self, question: impl Into<String>) -> Option<PollEvent> {
        self.is_my_poll().then(|| PollEvent::Question { question: question.into() })
    }
}

/// One poll option as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollOptionView {
    /// Option key (`canned,<idx>` or `<sender>,<idx>`).
    pub key: String,
    /// Option text.
    pub option: String,
    /// Users who voted for the option, ascending.
    pub voters: Vec<UserId>,
    /// `voters.len()`.
    pub count: usize,
    /// Whether the current user is among `voters`.
    pub current_user_vote: bool,
}

/// Poll as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollState {
    /// Question text.
    pub question: String,
    /// Options in creation order.
    pub options: Vec<PollOptionView>,
}

/// Replay a message's submessages into a displayable poll.
///
/// # Errors
///
/// As [`Poll::replay`]; callers render the fallback body.
pub fn replay_poll(
    message_sender_id: UserId,
    own_user_id: UserId,
    submessages: &[Submessage],
    sink: &mut impl PollErrorSink,
) -> Result<PollState, WidgetError> {
    Poll::replay(message_sender_id, own_user_id, submessages, sink).map(|poll| poll.state())
}
