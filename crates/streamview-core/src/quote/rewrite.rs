//! Quote-block rewrite.
//!
//! Works on the owned tree bottom-up: a node's children are rewritten before
//! the node's own sibling list is scanned, so every nesting level is handled
//! in a single pass. A quote that already starts with an author label is
//! never touched again, which makes the rewrite idempotent.

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    MAX_QUOTE_DEPTH, QuoteContext,
    tree::{HtmlElement, HtmlNode, parse_fragment, serialize},
};

const AUTHOR_CLASS: &str = "quote-author";
const AUTHOR_CLASS_OWN: &str = "quote-author-own";

/// Tap action attached to a rewritten quote.
#[derive(Serialize)]
struct QuoteAction<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    href: &'a str,
    #[serde(rename = "needReplace")]
    need_replace: bool,
}

/// Author and link taken from a mention paragraph.
struct QuoteSource {
    author: String,
    href: String,
}

/// Rewrite quote blocks in rendered message HTML.
///
/// Each `<blockquote>` directly preceded by a mention paragraph (ignoring
/// whitespace) loses the paragraph and gains:
/// - class `blockquote` (`blockquote-own` for own messages)
/// - a first child `<div class="quote-author">Name:</div>`
/// - a `data-action` JSON descriptor pointing at the quoted message
///
/// Quotes nested deeper than [`MAX_QUOTE_DEPTH`] are left as they are. HTML
/// with parse errors, or with nothing to rewrite, is returned unchanged.
pub fn rewrite_quotes(html: &str, context: &QuoteContext) -> String {
    let mut nodes = match parse_fragment(html) {
        Ok(nodes) => nodes,
        Err(errors) => {
            warn!(?errors, "message html has parse errors, quotes left as-is");
            return html.to_owned();
        },
    };

    let mut pass = RewritePass { context, rewritten: 0, depth_exceeded: false };
    pass.rewrite_children(&mut nodes, 0);

    if pass.depth_exceeded {
        warn!(max_depth = MAX_QUOTE_DEPTH, "quote nesting too deep, inner quotes left as-is");
    }
    if pass.rewritten == 0 {
        return html.to_owned();
    }
    debug!(count = pass.rewritten, "rewrote quote blocks");
    serialize(&nodes)
}

struct RewritePass<'a> {
    context: &'a QuoteContext,
    rewritten: usize,
    depth_exceeded: bool,
}

impl RewritePass<'_> {
    /// `depth` is the number of blockquotes enclosing `children`.
    fn rewrite_children(&mut self, children: &mut Vec<HtmlNode>, depth: usize) {
        for child in children.iter_mut() {
            if let HtmlNode::Element(element) = child {
                let inner = if element.name == "blockquote" { depth + 1 } else { depth };
                self.rewrite_children(&mut element.children, inner);
            }
        }

        let mut i = 0;
        while i < children.len() {
            let Some(source) = children[i].as_element().and_then(quote_source) else {
                i += 1;
                continue;
            };

            let mut j = i + 1;
            while children.get(j).is_some_and(HtmlNode::is_whitespace) {
                j += 1;
            }
            let target = children
                .get(j)
                .and_then(HtmlNode::as_element)
                .is_some_and(|el| el.name == "blockquote" && !is_labelled(el));
            if !target {
                i += 1;
                continue;
            }
            if depth + 1 > MAX_QUOTE_DEPTH {
                self.depth_exceeded = true;
                i = j + 1;
                continue;
            }

            if let Some(HtmlNode::Element(quote)) = children.get_mut(j) {
                self.label(quote, &source);
            }
            children.drain(i..j);
            self.rewritten += 1;
            i += 1;
        }
    }

    fn label(&self, quote: &mut HtmlElement, source: &QuoteSource) {
        let own = self.context.own;
        quote.add_class(if own { "blockquote-own" } else { "blockquote" });

        let action = QuoteAction {
            kind: "url",
            href: &source.href,
            need_replace: self.context.list_kind.need_replace(),
        };
        match serde_json::to_string(&action) {
            Ok(json) => quote.set_attr("data-action", json),
            Err(error) => warn!(%error, "quote action not encodable"),
        }

        let author = HtmlElement {
            name: "div".to_owned(),
            attrs: vec![(
                "class".to_owned(),
                if own { AUTHOR_CLASS_OWN } else { AUTHOR_CLASS }.to_owned(),
            )],
            children: vec![HtmlNode::Text(format!("{}:", source.author))],
        };
        quote.children.insert(0, HtmlNode::Element(author));
    }
}

/// Author and link of a mention paragraph: a `<p>` holding a
/// `span.user-mention` and an `a[href]`.
fn quote_source(element: &HtmlElement) -> Option<QuoteSource> {
    if element.name != "p" {
        return None;
    }
    let mention =
        element.find_descendant(&|el| el.name == "span" && el.has_class("user-mention"))?;
    let link = element.find_descendant(&|el| el.name == "a" && el.attr("href").is_some())?;

    let text = mention.text();
    let name = text.trim();
    let name = name.strip_prefix('@').unwrap_or(name).trim();
    Some(QuoteSource { author: name.to_owned(), href: link.attr("href")?.to_owned() })
}

fn is_labelled(quote: &HtmlElement) -> bool {
    quote.first_element_child().is_some_and(|first| {
        first.name == "div" && (first.has_class(AUTHOR_CLASS) || first.has_class(AUTHOR_CLASS_OWN))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListKind;

    const REPLY: &str = r#"<p><span class="user-mention" data-user-id="8">@Alice</span> <a href="/#narrow/near/10">said</a>:</p><blockquote><p>hi</p></blockquote><p>reply</p>"#;

    fn quote_level(n: usize, inner: &str) -> String {
        format!(
            r#"<p><span class="user-mention">U{n}</span> <a href="/{n}">said</a>:</p><blockquote>{inner}</blockquote>"#
        )
    }

    fn nested(levels: usize) -> String {
        (1..=levels).rev().fold("<p>x</p>".to_owned(), |inner, n| quote_level(n, &inner))
    }

    #[test]
    fn rewrites_simple_reply() {
        let out = rewrite_quotes(REPLY, &QuoteContext::default());
        insta::assert_snapshot!(out, @r#"<blockquote class="blockquote" data-action="{&quot;type&quot;:&quot;url&quot;,&quot;href&quot;:&quot;/#narrow/near/10&quot;,&quot;needReplace&quot;:true}"><div class="quote-author">Alice:</div><p>hi</p></blockquote><p>reply</p>"#);
    }

    #[test]
    fn rewrites_every_nesting_level_for_own_message() {
        let html = quote_level(1, &format!("{}<p>mid</p>", quote_level(2, "<p>deep</p>")));
        let context = QuoteContext { own: true, list_kind: ListKind::Starred };

        let out = rewrite_quotes(&html, &context);
        insta::assert_snapshot!(out, @r#"<blockquote class="blockquote-own" data-action="{&quot;type&quot;:&quot;url&quot;,&quot;href&quot;:&quot;/1&quot;,&quot;needReplace&quot;:false}"><div class="quote-author-own">U1:</div><blockquote class="blockquote-own" data-action="{&quot;type&quot;:&quot;url&quot;,&quot;href&quot;:&quot;/2&quot;,&quot;needReplace&quot;:false}"><div class="quote-author-own">U2:</div><p>deep</p></blockquote><p>mid</p></blockquote>"#);
    }

    #[test]
    fn whitespace_between_mention_and_quote() {
        let html = "<p><span class=\"user-mention\">Bo</span><a href=\"/x\">said</a>:</p>\n\n<blockquote>q</blockquote>";
        let out = rewrite_quotes(html, &QuoteContext::default());

        assert!(out.starts_with("<blockquote class=\"blockquote\""));
        assert!(out.contains("<div class=\"quote-author\">Bo:</div>q</blockquote>"));
    }

    #[test]
    fn rewrite_is_idempotent() {
        for html in [REPLY.to_owned(), nested(3), format!("{REPLY}{REPLY}")] {
            let once = rewrite_quotes(&html, &QuoteContext::default());
            assert_ne!(once, html);
            assert_eq!(rewrite_quotes(&once, &QuoteContext::default()), once);
        }
    }

    #[test]
    fn second_mention_before_labelled_quote_is_ignored() {
        let mention = r#"<p><span class="user-mention">Z</span><a href="/z">said</a>:</p>"#;
        let once = rewrite_quotes(&format!("{mention}{REPLY}"), &QuoteContext::default());

        assert!(once.starts_with(mention));
        assert_eq!(rewrite_quotes(&once, &QuoteContext::default()), once);
    }

    #[test]
    fn depth_is_bounded() {
        let out = rewrite_quotes(&nested(MAX_QUOTE_DEPTH + 2), &QuoteContext::default());

        assert_eq!(out.matches(r#"<div class="quote-author">"#).count(), MAX_QUOTE_DEPTH);
        assert!(out.contains(&format!("U{}", MAX_QUOTE_DEPTH + 1)));
        assert_eq!(rewrite_quotes(&out, &QuoteContext::default()), out);
    }

    #[test]
    fn pathological_nesting_is_returned_unchanged() {
        let bare = format!("{}x{}", "<blockquote>".repeat(5000), "</blockquote>".repeat(5000));
        assert_eq!(rewrite_quotes(&bare, &QuoteContext::default()), bare);

        let spans = format!("{}{REPLY}{}", "<span>".repeat(20_000), "</span>".repeat(20_000));
        assert_eq!(rewrite_quotes(&spans, &QuoteContext::default()), spans);

        let replies = nested(2000);
        assert_eq!(rewrite_quotes(&replies, &QuoteContext::default()), replies);
    }

    #[test]
    fn untouched_input_is_returned_verbatim() {
        let html = "<P CLASS=x>plain   <b>text</b></P>";
        assert_eq!(rewrite_quotes(html, &QuoteContext::default()), html);

        let orphan = "<blockquote>no author</blockquote>";
        assert_eq!(rewrite_quotes(orphan, &QuoteContext::default()), orphan);
    }

    #[test]
    fn parse_errors_return_input() {
        let html = format!("{}</i>", REPLY);
        assert_eq!(rewrite_quotes(&html, &QuoteContext::default()), html);
    }

    #[test]
    fn need_replace_by_list() {
        assert!(ListKind::Conversation.need_replace());
        assert!(!ListKind::Mentioned.need_replace());
        assert!(!ListKind::Starred.need_replace());
        assert!(!ListKind::AllMessages.need_replace());
    }
}
