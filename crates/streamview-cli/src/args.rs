//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use streamview_core::ListKind;
use streamview_proto::{MessageId, StreamId};
use streamview_render::RenderConfig;

/// Inspect stream lists and message rendering for a saved client state
#[derive(Parser, Debug)]
#[command(name = "streamview")]
#[command(about = "Inspect stream lists and message rendering for a saved client state")]
#[command(version)]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the stream list sections as JSON
    Streams {
        /// Client state file (JSON)
        #[arg(short, long)]
        state: PathBuf,
    },

    /// List subscribed streams alphabetically
    Directory {
        /// Client state file (JSON)
        #[arg(short, long)]
        state: PathBuf,

        /// Only streams whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// List the fetched topic names of a stream
    Topics {
        /// Client state file (JSON)
        #[arg(short, long)]
        state: PathBuf,

        /// Stream id
        #[arg(long)]
        stream: StreamId,
    },

    /// Print unread counts as JSON
    Unread {
        /// Client state file (JSON)
        #[arg(short, long)]
        state: PathBuf,
    },

    /// Print the rendered body HTML of one message
    Render {
        /// Client state file (JSON)
        #[arg(short, long)]
        state: PathBuf,

        /// Message id
        #[arg(short, long)]
        message: MessageId,

        /// Message list the message is shown in
        #[arg(long, value_enum, default_value_t = ListKindArg::Conversation)]
        list_kind: ListKindArg,

        /// Avatars per reaction before collapsing into "+N"
        #[arg(long, default_value_t = RenderConfig::default().max_reaction_avatars)]
        max_reaction_avatars: usize,
    },
}

/// Message list kinds accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListKindArg {
    /// Stream, topic or direct-message conversation
    #[default]
    Conversation,
    /// Mentions
    Mentioned,
    /// Starred messages
    Starred,
    /// All messages
    AllMessages,
}

impl From<ListKindArg> for ListKind {
    fn from(kind: ListKindArg) -> Self {
        match kind {
            ListKindArg::Conversation => Self::Conversation,
            ListKindArg::Mentioned => Self::Mentioned,
            ListKindArg::Starred => Self::Starred,
            ListKindArg::AllMessages => Self::AllMessages,
        }
    }
}
