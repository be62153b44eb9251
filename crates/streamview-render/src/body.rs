//! Message body assembly.

use askama::Template;
use streamview_core::{QuoteContext, rewrite_quotes};
use streamview_proto::Message;

use crate::{
    RenderContext, Result, context::STARRED_FLAG, message_tags_html, reaction_list_html,
    widget_body_html,
};

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{{ content|safe }}
{%- if outbox %}
<div class="loading-spinner outbox-spinner"></div>
{%- endif %}
{{ tags|safe }}
{{ reactions|safe }}"#
)]
struct MessageBodyTemplate<'a> {
    content: &'a str,
    outbox: bool,
    tags: &'a str,
    reactions: &'a str,
}

/// Body of a plain message: quote-rewritten content, outbox spinner, tags
/// and reactions.
pub fn message_body_html(context: &RenderContext, message: &Message) -> Result<String> {
    let own = message.sender_id == context.own_user_id;
    let content =
        rewrite_quotes(&message.content, &QuoteContext { own, list_kind: context.list_kind });
    let tags = message_tags_html(
        context.has_flag(STARRED_FLAG, message.id),
        message.last_edit_timestamp,
        context.now,
    )?;
    let reactions = reaction_list_html(context, &message.reactions, message.id, own)?;

    Ok(MessageBodyTemplate {
        content: &content,
        outbox: message.is_outbox,
        tags: &tags,
        reactions: &reactions,
    }
    .render()?)
}

/// Body of any message: the widget for messages with submessages, the plain
/// body otherwise.
pub fn render_message_body(context: &RenderContext, message: &Message) -> Result<String> {
    if message.has_submessages() {
        widget_body_html(context, message)
    } else {
        message_body_html(context, message)
    }
}
