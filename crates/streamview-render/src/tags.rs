//! Message tags.

use askama::Template;

use crate::Result;

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div class="message-tags">
{%- for tag in tags -%}
<span class="message-tag">{{ tag }}</span>
{%- endfor -%}
</div>"#
)]
struct MessageTagsTemplate {
    tags: Vec<String>,
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Tags under a message: "edited ... ago" and "starred". Empty string when
/// neither applies.
pub fn message_tags_html(starred: bool, last_edit_timestamp: Option<i64>, now: i64) -> Result<String> {
    let mut tags = Vec::new();
    if let Some(edited) = last_edit_timestamp {
        tags.push(format!("edited {} ago", distance(now.saturating_sub(edited))));
    }
    if starred {
        tags.push("starred".to_owned());
    }
    if tags.is_empty() {
        return Ok(String::new());
    }
    Ok(MessageTagsTemplate { tags }.render()?)
}

/// Rough human distance for a span of seconds ("5 minutes", "about 2
/// hours"). Negative spans (clock skew) read as "less than a minute".
fn distance(seconds: i64) -> String {
    let rounded = |unit: i64| (seconds + unit / 2) / unit;
    match seconds {
        s if s < 30 => "less than a minute".to_owned(),
        s if s < 90 => "1 minute".to_owned(),
        s if s < 45 * MINUTE => format!("{} minutes", rounded(MINUTE)),
        s if s < 90 * MINUTE => "about 1 hour".to_owned(),
        s if s < DAY => format!("about {} hours", rounded(HOUR)),
        s if s < 42 * HOUR => "1 day".to_owned(),
        s if s < MONTH => format!("{} days", rounded(DAY)),
        s if s < 45 * DAY => "about 1 month".to_owned(),
        s if s < YEAR => format!("{} months", rounded(MONTH).max(2)),
        s if s < 2 * YEAR => "about 1 year".to_owned(),
        _ => format!("{} years", seconds / YEAR),
    }
}
