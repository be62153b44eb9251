//! Quote preview text.
//!
//! When a message is quoted, the compose box shows a preview of the quoted
//! message's own text. If that message was itself a reply, its raw markdown
//! starts with the nested quote and the `@**Name** [said](link):` prefix; both
//! are stripped so the preview shows what the author actually wrote.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

/// Passes before giving up on convergence.
const MAX_STRIP_PASSES: usize = 10;

struct Patterns {
    fenced4: Regex,
    fenced3: Regex,
    said_prefix: Regex,
    blank_run: Regex,
}

fn patterns() -> Option<&'static Patterns> {
    static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Some(Patterns {
                fenced4: Regex::new(r"````quote\n[\s\S]*?\n````").ok()?,
                fenced3: Regex::new(r"```quote\n[\s\S]*?\n```").ok()?,
                said_prefix: Regex::new(r"@_?\*\*[^*]+\*\*\s*\[said\]\([^)]+\):\s*").ok()?,
                blank_run: Regex::new(r"\n\s*\n\s*\n").ok()?,
            })
        })
        .as_ref()
}

/// Strip nested quotes and reply prefixes from raw message markdown.
///
/// Repeats until the text stops changing. Returns `raw` unchanged when
/// nothing would be left, so a message consisting only of a quote still
/// previews as something.
pub fn strip_quoted_markdown(raw: &str) -> String {
    let Some(p) = patterns() else {
        warn!("quote preview patterns unavailable");
        return raw.to_owned();
    };

    let mut current = raw.to_owned();
    for _ in 0..MAX_STRIP_PASSES {
        let mut next = p.fenced4.replace_all(&current, "").into_owned();
        next = p.fenced3.replace_all(&next, "").into_owned();
        next = p.said_prefix.replace_all(&next, "").into_owned();
        next = p.blank_run.replace_all(&next, "\n\n").into_owned();
        let next = next.trim().to_owned();

        if next == current {
            break;
        }
        current = next;
    }

    if current.is_empty() { raw.to_owned() } else { current }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_reply_scaffolding() {
        let raw = "@_**Alice|8** [said](#narrow/near/10):\n```quote\nolder text\n```\n\n\n\nmy reply";
        assert_eq!(strip_quoted_markdown(raw), "my reply");
    }

    #[test]
    fn strips_four_backtick_quotes_with_nested_fences() {
        let raw = "````quote\n@**Bob** [said](#x):\n```quote\ninner\n```\n````\nanswer";
        assert_eq!(strip_quoted_markdown(raw), "answer");
    }

    #[test]
    fn plain_text_is_trimmed_only() {
        assert_eq!(strip_quoted_markdown("  hello\n"), "hello");
    }

    #[test]
    fn quote_only_message_falls_back_to_raw() {
        let raw = "```quote\nall of it\n```";
        assert_eq!(strip_quoted_markdown(raw), raw);
    }
}
