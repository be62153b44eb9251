//! CLI error types.

use std::path::PathBuf;

use streamview_proto::MessageId;
use streamview_render::RenderError;
use thiserror::Error;

/// Errors that stop a command.
#[derive(Error, Debug)]
pub enum CliError {
    /// State file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// State file is not valid JSON for [`crate::ClientState`].
    #[error("invalid state file: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested message is not in the state file.
    #[error("message {0} not found in state file")]
    MessageNotFound(MessageId),

    /// Template rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
