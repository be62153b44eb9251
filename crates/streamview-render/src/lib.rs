//! HTML fragments for the message list.
//!
//! Turns a [`Message`](streamview_proto::Message) plus the surrounding client
//! state into the HTML the message list web view displays. Templates are
//! compiled by `askama` and escape every interpolated value; only HTML that
//! came from the server (message content) or from another template is
//! inserted raw.
//!
//! Interactive elements carry a `data-action` attribute holding a JSON
//! descriptor. The host view dispatches on it; no script is emitted.
//!
//! # Components
//!
//! - [`context`]: What the renderer needs to know about users, emoji and flags
//! - [`reactions`]: Reaction chips under a message
//! - [`tags`]: "edited" and "starred" tags
//! - [`widget`]: Poll widget, or the fallback for unsupported widgets
//! - [`body`]: Message body assembly

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod body;
pub mod context;
pub mod emoji;
pub mod error;
pub mod reactions;
pub mod tags;
pub mod widget;

pub use body::{message_body_html, render_message_body};
pub use context::{FlagsState, RenderConfig, RenderContext, UserInfo, flag_strings};
pub use error::{RenderError, Result};
pub use reactions::reaction_list_html;
pub use tags::message_tags_html;
pub use widget::widget_body_html;
