//! Offline inspection tool for saved client state.
//!
//! Loads a JSON state file (subscriptions, topic lists, unread payload,
//! messages) and runs the view-model pipeline over it without a server.
//!
//! # Components
//!
//! - [`args`]: Command-line arguments
//! - [`state`]: State file format and reducer rebuild
//! - [`commands`]: Command execution against a writer
//! - [`error`]: CLI errors

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod args;
pub mod commands;
pub mod error;
pub mod state;

pub use args::{Args, Command, ListKindArg};
pub use commands::{UnreadSummary, directory, render, run, unread_summary};
pub use error::CliError;
pub use state::{ClientState, DerivedState};
