//! Fuzz target for the quote-block rewriter
//!
//! # Strategy
//!
//! - Raw strings: arbitrary text handed straight to the HTML parser
//! - Structured: mention paragraphs, blockquotes and filler nested to
//!   arbitrary depth, so the pairing logic is reached often
//! - Deep: a block wrapped in thousands of identical elements, built
//!   without recursion, so the tree depth cap is reached
//!
//! # Invariants
//!
//! - Rewriting completes for any input (no panic, no stack overflow)
//! - Rewriting is idempotent
//! - Markdown quote stripping is stable under a second pass

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamview_core::{ListKind, QuoteContext, rewrite_quotes, strip_quoted_markdown};

#[derive(Debug, Clone, Arbitrary)]
enum Input {
    Raw(String),
    Structured(Vec<Block>),
}

#[derive(Debug, Clone, Arbitrary)]
enum Block {
    Mention { name: String, href: String },
    Quote(Vec<Block>),
    Paragraph(String),
    Whitespace,
    Comment(String),
    Deep { levels: u16, tag: DeepTag, inner: Vec<Block> },
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum DeepTag {
    Blockquote,
    Span,
    Div,
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Kind {
    Conversation,
    Mentioned,
    Starred,
    AllMessages,
}

fuzz_target!(|case: (Input, bool, Kind)| {
    let (input, own, kind) = case;
    let html = match input {
        Input::Raw(raw) => raw,
        Input::Structured(blocks) => {
            let mut html = String::new();
            render(&blocks, 0, &mut html);
            html
        }
    };
    let list_kind = match kind {
        Kind::Conversation => ListKind::Conversation,
        Kind::Mentioned => ListKind::Mentioned,
        Kind::Starred => ListKind::Starred,
        Kind::AllMessages => ListKind::AllMessages,
    };
    let context = QuoteContext { own, list_kind };

    let once = rewrite_quotes(&html, &context);
    let twice = rewrite_quotes(&once, &context);
    assert_eq!(once, twice, "rewrite not idempotent for {html:?}");

    let stripped = strip_quoted_markdown(&html);
    assert_eq!(strip_quoted_markdown(&stripped), stripped);
});

fn render(blocks: &[Block], depth: usize, out: &mut String) {
    // Bounds this generator's own recursion; `Block::Deep` covers deeper trees.
    if depth > 64 {
        return;
    }
    for block in blocks {
        match block {
            Block::Mention { name, href } => {
                out.push_str(&format!(
                    "<p><span class=\"user-mention\">@{}</span> <a href=\"{}\">said</a>:</p>",
                    escape(name),
                    escape(href)
                ));
            }
            Block::Quote(inner) => {
                out.push_str("<blockquote>");
                render(inner, depth + 1, out);
                out.push_str("</blockquote>");
            }
            Block::Paragraph(text) => {
                out.push_str(&format!("<p>{}</p>", escape(text)));
            }
            Block::Whitespace => out.push('\n'),
            Block::Comment(text) => {
                out.push_str(&format!("<!--{}-->", text.replace("--", "")));
            }
            Block::Deep { levels, tag, inner } => {
                let tag = match tag {
                    DeepTag::Blockquote => "blockquote",
                    DeepTag::Span => "span",
                    DeepTag::Div => "div",
                };
                let levels = usize::from(*levels);
                out.push_str(&format!("<{tag}>").repeat(levels));
                render(inner, depth + 1, out);
                out.push_str(&format!("</{tag}>").repeat(levels));
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
