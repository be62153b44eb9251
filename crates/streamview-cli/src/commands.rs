//! Command execution.
//!
//! Each command reads one state file and writes its result to the given
//! writer, so tests can run commands without touching stdout.

use std::{collections::BTreeMap, io::Write};

use serde::Serialize;
use streamview_core::{
    ListKind, filter_streams_by_name, mention_count, sort_streams_by_name, topic_names,
    total_dm_count, unread_by_stream,
};
use streamview_proto::{MessageId, StreamId};
use streamview_render::{RenderConfig, RenderContext, flag_strings, render_message_body};
use tracing::debug;

use crate::{ClientState, CliError, Command};

/// Unread counts printed by `streamview unread`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadSummary {
    /// Every unread message.
    pub total: usize,
    /// Unread direct messages, one-to-one and group.
    pub direct: usize,
    /// Unread mentions.
    pub mentions: usize,
    /// Visible unread messages per subscribed stream.
    pub streams: BTreeMap<StreamId, usize>,
}

/// Run a command against its state file.
pub fn run(command: &Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Streams { state } => {
            let state = ClientState::load(state)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&state.stream_sections())?)?;
        },
        Command::Directory { state, filter } => {
            let state = ClientState::load(state)?;
            for (stream_id, name) in directory(&state, filter.as_deref()) {
                writeln!(out, "{stream_id}\t{name}")?;
            }
        },
        Command::Topics { state, stream } => {
            let state = ClientState::load(state)?;
            for name in topic_names(*stream, &state.topics) {
                writeln!(out, "{name}")?;
            }
        },
        Command::Unread { state } => {
            let state = ClientState::load(state)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&unread_summary(&state))?)?;
        },
        Command::Render { state, message, list_kind, max_reaction_avatars } => {
            let state = ClientState::load(state)?;
            let config = RenderConfig { max_reaction_avatars: *max_reaction_avatars };
            let html = render(&state, *message, (*list_kind).into(), config)?;
            writeln!(out, "{html}")?;
        },
    }
    Ok(())
}

/// Subscribed streams in directory order, optionally filtered by name.
pub fn directory(state: &ClientState, filter: Option<&str>) -> Vec<(StreamId, String)> {
    let mut subscriptions = state.subscriptions.clone();
    sort_streams_by_name(&mut subscriptions);
    filter_streams_by_name(&subscriptions, filter.unwrap_or_default())
        .into_iter()
        .map(|sub| (sub.stream_id, sub.name.clone()))
        .collect()
}

/// Unread counts for the state.
pub fn unread_summary(state: &ClientState) -> UnreadSummary {
    let derived = state.reduce();
    UnreadSummary {
        total: derived.unread.len(),
        direct: total_dm_count(&derived.unread),
        mentions: mention_count(&derived.unread),
        streams: unread_by_stream(&derived.unread, &derived.subscriptions, &derived.mute),
    }
}

/// Body HTML for one message.
pub fn render(
    state: &ClientState,
    id: MessageId,
    list_kind: ListKind,
    config: RenderConfig,
) -> Result<String, CliError> {
    let message = state.message(id).ok_or(CliError::MessageNotFound(id))?;
    let context = RenderContext {
        own_user_id: state.own_user_id,
        users: state.users.clone(),
        image_emoji: state.image_emoji.clone(),
        flags: state.flags.clone(),
        list_kind,
        now: state.now,
        config,
    };
    debug!(id, flags = ?flag_strings(&context.flags, id), "rendering message");

    Ok(render_message_body(&context, message)?)
}

#[cfg(test)]
mod tests {
    use streamview_proto::{Message, Subscription};

    use super::*;

    fn state() -> ClientState {
        let mut state = ClientState { own_user_id: 1, ..ClientState::default() };
        state.subscriptions = vec![
            Subscription::new(3, "general"),
            Subscription::new(1, "Design"),
            Subscription::new(2, "devops"),
        ];
        state.messages = vec![Message::new(10, 2, "<p>hello</p>")];
        state
    }

    #[test]
    fn directory_sorts_and_filters() {
        let state = state();

        assert_eq!(
            directory(&state, None),
            [(1, "Design".to_owned()), (2, "devops".to_owned()), (3, "general".to_owned())]
        );
        assert_eq!(directory(&state, Some(" DE ")), [(1, "Design".to_owned()), (2, "devops".to_owned())]);
    }

    #[test]
    fn render_unknown_message_fails() {
        let error = render(&state(), 99, ListKind::Conversation, RenderConfig::default());
        assert!(matches!(error, Err(CliError::MessageNotFound(99))));
    }

    #[test]
    fn render_known_message() {
        let html = render(&state(), 10, ListKind::Conversation, RenderConfig::default()).unwrap();
        assert!(html.contains("<p>hello</p>"));
    }
}
