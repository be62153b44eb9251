//! Reaction chips.

use askama::Template;
use serde::Serialize;
use streamview_core::{AggregatedReaction, aggregate_reactions};
use streamview_proto::{MessageId, RawReaction};
use tracing::warn;

use crate::{RenderContext, Result, emoji};

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div class="reaction-list">
{%- for r in reactions -%}
<span class="{{ r.class }}" data-name="{{ r.name }}" data-code="{{ r.code }}" data-type="{{ r.reaction_type }}" data-action="{{ r.action }}">
{%- if r.image_url.is_empty() -%}
<span class="reaction-emoji">{{ r.glyph }}</span>
{%- else -%}
<span class="reaction-emoji"><img src="{{ r.image_url }}"/></span>
{%- endif -%}
<span class="reaction-users">
{%- for a in r.avatars -%}
<img class="reaction-avatar" src="{{ a.src }}" alt="{{ a.alt }}"/>
{%- endfor -%}
{%- if r.remaining > 0 -%}
<span class="reaction-count">+{{ r.remaining }}</span>
{%- endif -%}
</span></span>
{%- endfor -%}
</div>"#
)]
struct ReactionListTemplate {
    reactions: Vec<ReactionChip>,
}

struct ReactionChip {
    class: String,
    name: String,
    code: String,
    reaction_type: String,
    action: String,
    image_url: String,
    glyph: String,
    avatars: Vec<Avatar>,
    remaining: usize,
}

struct Avatar {
    src: String,
    alt: String,
}

/// Tap action for a reaction chip.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReactionAction<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    message_id: MessageId,
    code: &'a str,
    name: &'a str,
    reaction_type: &'a str,
    voted: bool,
}

/// Reaction chips for a message. Empty string when there are no reactions.
///
/// Each chip shows the emoji and up to
/// [`RenderConfig::max_reaction_avatars`](crate::RenderConfig) avatars, with
/// the rest collapsed into `+N`. Users missing from the context are counted
/// but drawn without an avatar.
pub fn reaction_list_html(
    context: &RenderContext,
    reactions: &[RawReaction],
    message_id: MessageId,
    is_own: bool,
) -> Result<String> {
    if reactions.is_empty() {
        return Ok(String::new());
    }

    let reactions = aggregate_reactions(reactions, context.own_user_id)
        .iter()
        .map(|reaction| chip(context, reaction, message_id, is_own))
        .collect();
    Ok(ReactionListTemplate { reactions }.render()?)
}

fn chip(
    context: &RenderContext,
    reaction: &AggregatedReaction,
    message_id: MessageId,
    is_own: bool,
) -> ReactionChip {
    let shown = reaction.users.len().min(context.config.max_reaction_avatars);
    let avatars = reaction.users[..shown]
        .iter()
        .filter_map(|id| {
            let user = context.users.get(id);
            if user.is_none() {
                warn!(user_id = id, "reaction from unknown user");
            }
            user
        })
        .map(|user| Avatar { src: user.avatar_url.clone(), alt: user.full_name.clone() })
        .collect();

    let base = if is_own { "reaction-own" } else { "reaction" };
    let class = if reaction.self_reacted { format!("{base} self-voted") } else { base.to_owned() };

    let action = ReactionAction {
        kind: "reaction",
        message_id,
        code: &reaction.code,
        name: &reaction.name,
        reaction_type: reaction.reaction_type.as_str(),
        voted: reaction.self_reacted,
    };
    let action = serde_json::to_string(&action).unwrap_or_else(|error| {
        warn!(%error, "reaction action not encodable");
        String::new()
    });

    let display = emoji::display(&reaction.code, &reaction.name, &context.image_emoji);

    ReactionChip {
        class,
        name: reaction.name.clone(),
        code: reaction.code.clone(),
        reaction_type: reaction.reaction_type.as_str().to_owned(),
        action,
        image_url: display.image_url,
        glyph: display.glyph,
        avatars,
        remaining: reaction.users.len() - shown,
    }
}
