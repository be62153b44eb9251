//! Widget message bodies.

use askama::Template;
use streamview_core::{PollOptionView, PollState, TracingSink, replay_poll};
use streamview_proto::Message;
use tracing::warn;

use crate::{RenderContext, Result};

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div class="poll-widget">
<p class="poll-question">{{ question }}</p>
<ul>
{%- for o in options %}
<li><button class="poll-vote" data-voted="{{ o.current_user_vote }}" data-key="{{ o.key }}">{{ o.count }}</button><span class="poll-option">{{ o.option }}</span></li>
{%- endfor %}
</ul>
</div>"#
)]
struct PollTemplate<'a> {
    question: &'a str,
    options: &'a [PollOptionView],
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{{ content|safe }}
<div class="special-message"><p>Interactive message</p><p>To use, open on web or desktop</p></div>"#
)]
struct UnsupportedWidgetTemplate<'a> {
    content: &'a str,
}

/// Body of a message with submessages.
///
/// Renders the poll when the submessages describe one. Anything else
/// (no widget, undecodable setup, another widget type, missing poll data)
/// shows the server-rendered content with a notice to open the message
/// elsewhere.
pub fn widget_body_html(context: &RenderContext, message: &Message) -> Result<String> {
    match replay_poll(message.sender_id, context.own_user_id, &message.submessages, &mut TracingSink)
    {
        Ok(poll) => poll_html(&poll),
        Err(error) => {
            warn!(message_id = message.id, %error, "widget not renderable, showing fallback");
            Ok(UnsupportedWidgetTemplate { content: &message.content }.render()?)
        },
    }
}

fn poll_html(poll: &PollState) -> Result<String> {
    Ok(PollTemplate { question: &poll.question, options: &poll.options }.render()?)
}

#[cfg(test)]
mod tests {
    use streamview_proto::Submessage;

    use super::*;

    fn poll_message() -> Message {
        let mut message = Message::new(10, 1, "<p>/poll Lunch?</p>");
        message.submessages = vec![
            Submessage::widget(
                1,
                1,
                r#"{"widget_type":"poll","extra_data":{"question":"Lunch <now>?","options":["Soup","Salad"]}}"#,
            ),
            Submessage::widget(2, 5, r#"{"type":"vote","key":"canned,1","vote":1}"#),
        ];
        message
    }

    #[test]
    fn renders_poll() {
        let html = widget_body_html(&RenderContext::new(5), &poll_message()).unwrap();

        assert!(html.contains("<p class=\"poll-question\">Lunch "));
        assert!(!html.contains("<now>"));
        assert!(html.contains("data-voted=\"false\" data-key=\"canned,0\">0</button>"));
        assert!(html.contains("data-voted=\"true\" data-key=\"canned,1\">1</button>"));
        assert!(html.contains("<span class=\"poll-option\">Salad</span>"));
        assert!(!html.contains("special-message"));
    }

    #[test]
    fn unsupported_widget_falls_back() {
        let mut message = poll_message();
        message.submessages[0].content = r#"{"widget_type":"todo","extra_data":{}}"#.into();

        let html = widget_body_html(&RenderContext::new(5), &message).unwrap();
        assert!(html.starts_with("<p>/poll Lunch?</p>"));
        assert!(html.contains("<p>Interactive message</p><p>To use, open on web or desktop</p>"));
    }
}
