//! Owned HTML fragment tree.
//!
//! `scraper` parses into an arena that is awkward to restructure, so the
//! fragment is copied into plain owned nodes, rewritten, and serialized back
//! with the HTML fragment serialization rules.

use scraper::{ElementRef, Html, Node};

/// Elements with no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text content is emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] =
    &["iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp"];

/// Elements whose leading newline is dropped by the parser.
const NEWLINE_ELEMENTS: &[&str] = &["listing", "pre", "textarea"];

/// Deepest element nesting accepted into the owned tree.
///
/// Every walk over the tree recurses per level, so deeper fragments are
/// rejected like parse errors.
pub(crate) const MAX_TREE_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HtmlNode {
    Element(HtmlElement),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HtmlElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: String) {
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class").is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, class: &str) {
        let classes = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_owned(),
        };
        self.set_attr("class", classes);
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// First element child, skipping text and comments.
    pub fn first_element_child(&self) -> Option<&HtmlElement> {
        self.children.iter().find_map(HtmlNode::as_element)
    }

    /// Depth-first search over descendant elements.
    pub fn find_descendant(&self, pred: &dyn Fn(&HtmlElement) -> bool) -> Option<&HtmlElement> {
        for child in &self.children {
            if let HtmlNode::Element(element) = child {
                if pred(element) {
                    return Some(element);
                }
                if let Some(found) = element.find_descendant(pred) {
                    return Some(found);
                }
            }
        }
        None
    }
}

impl HtmlNode {
    pub fn as_element(&self) -> Option<&HtmlElement> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Text(text) if text.chars().all(char::is_whitespace))
    }
}

fn collect_text(nodes: &[HtmlNode], out: &mut String) {
    for node in nodes {
        match node {
            HtmlNode::Text(text) => out.push_str(text),
            HtmlNode::Element(element) => collect_text(&element.children, out),
            HtmlNode::Comment(_) => {},
        }
    }
}

/// Parse a fragment. `Err` carries the parser's error messages, or a
/// single message when elements nest deeper than [`MAX_TREE_DEPTH`].
pub(crate) fn parse_fragment(html: &str) -> Result<Vec<HtmlNode>, Vec<String>> {
    let document = Html::parse_fragment(html);
    if !document.errors.is_empty() {
        return Err(document.errors.iter().map(ToString::to_string).collect());
    }
    convert_children(document.root_element(), 0)
        .ok_or_else(|| vec![format!("element nesting deeper than {MAX_TREE_DEPTH}")])
}

/// `None` once `depth` passes [`MAX_TREE_DEPTH`].
fn convert_children(parent: ElementRef<'_>, depth: usize) -> Option<Vec<HtmlNode>> {
    if depth > MAX_TREE_DEPTH {
        return None;
    }
    let mut nodes = Vec::new();
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => nodes.push(HtmlNode::Text(String::from(&**text))),
            Node::Comment(comment) => nodes.push(HtmlNode::Comment(String::from(&**comment))),
            Node::Element(element) => {
                let Some(child) = ElementRef::wrap(child) else { continue };
                nodes.push(HtmlNode::Element(HtmlElement {
                    name: element.name().to_owned(),
                    attrs: element.attrs().map(|(k, v)| (k.to_owned(), v.to_owned())).collect(),
                    children: convert_children(child, depth + 1)?,
                }));
            },
            _ => {},
        }
    }
    Some(nodes)
}

/// Serialize nodes as an HTML fragment.
pub(crate) fn serialize(nodes: &[HtmlNode]) -> String {
    let mut out = String::new();
    write_nodes(nodes, None, &mut out);
    out
}

fn write_nodes(nodes: &[HtmlNode], parent: Option<&str>, out: &mut String) {
    let raw = parent.is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name));
    for node in nodes {
        match node {
            HtmlNode::Text(text) if raw => out.push_str(text),
            HtmlNode::Text(text) => escape_text(text, out),
            HtmlNode::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            },
            HtmlNode::Element(element) => write_element(element, out),
        }
    }
}

fn write_element(element: &HtmlElement, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }
    out.push('>');

    let name = element.name.as_str();
    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    if NEWLINE_ELEMENTS.contains(&name)
        && matches!(element.children.first(), Some(HtmlNode::Text(text)) if text.starts_with('\n'))
    {
        out.push('\n');
    }
    write_nodes(&element.children, Some(name), out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}
