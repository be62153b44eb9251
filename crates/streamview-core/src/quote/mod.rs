//! Quote blocks.
//!
//! A quote reply is rendered by the server as a mention paragraph
//! (`@Alice [said](link):`) followed by a `<blockquote>`. The message view
//! replaces the paragraph with a compact author label inside the quote and
//! makes the quote tappable. [`rewrite_quotes`] does that on rendered HTML;
//! [`strip_quoted_markdown`] does the markdown-side cleanup for the compose
//! preview.

mod markdown;
mod rewrite;
mod tree;

pub use markdown::strip_quoted_markdown;
pub use rewrite::rewrite_quotes;

/// Deepest quote nesting level that is rewritten.
pub const MAX_QUOTE_DEPTH: usize = 10;

/// Message list the message is displayed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListKind {
    /// A stream, topic or direct-message conversation
    #[default]
    Conversation,
    /// Messages mentioning the current user
    Mentioned,
    /// Starred messages
    Starred,
    /// Every message across conversations
    AllMessages,
}

impl ListKind {
    /// Whether tapping a quote should replace the current screen rather than
    /// push a new one. Aggregate lists keep their place.
    pub fn need_replace(self) -> bool {
        matches!(self, Self::Conversation)
    }
}

/// How the message being rewritten is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteContext {
    /// Message was sent by the current user.
    pub own: bool,
    /// List the message appears in.
    pub list_kind: ListKind,
}
