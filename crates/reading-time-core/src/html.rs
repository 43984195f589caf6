//! Visible text and images of an HTML document.
//!
//! Input is parsed with `scraper` (html5ever), the same way a browser would,
//! so unclosed tags, stray `<`, comments and every named character reference
//! are handled by the HTML5 parsing rules. Plain text without markup parses
//! to a body holding that text.
//!
//! On top of the parsed tree:
//! - Contents of `script`, `style`, `noscript` and `template` are ignored.
//! - Block-level elements become a single space so adjacent blocks never
//!   merge; inline elements vanish without adding whitespace
//!   (`te<b>st</b>` is one word).
//! - Every `img` element outside ignored contents is an image.

use ego_tree::iter::Edge;
use scraper::{Html, Node};

/// Elements whose contents are never rendered as text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that break the flow of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "br",
    "caption",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hr",
    "html",
    "legend",
    "li",
    "main",
    "nav",
    "ol",
    "option",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "ul",
];

/// What a reader sees in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    /// Rendered text with character references decoded.
    pub text: String,
    /// Number of `img` elements.
    pub images: usize,
}

/// Whether `name` separates blocks of text.
pub fn is_block(name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&name)
}

fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

/// Parse `text` and collect its visible text and images in one walk.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn extract(text: &str) -> Content {
    let document = Html::parse_document(text);
    let mut content = Content {
        text: String::with_capacity(text.len()),
        images: 0,
    };
    // Open elements at or below an ignored element.
    let mut hidden_depth = 0usize;

    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) => {
                    let name = element.name();
                    if hidden_depth > 0 || is_raw_text(name) {
                        hidden_depth += 1;
                    } else if name == "img" {
                        content.images += 1;
                    } else if is_block(name) {
                        content.text.push(' ');
                    }
                }
                Node::Text(fragment) if hidden_depth == 0 => content.text.push_str(fragment),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    if hidden_depth > 0 {
                        hidden_depth -= 1;
                    } else if is_block(element.name()) {
                        content.text.push(' ');
                    }
                }
            }
        }
    }

    content
}

/// The text a browser would render for `text`.
pub fn visible_text(text: &str) -> String {
    extract(text).text
}

/// Number of `img` elements in `text`.
pub fn image_count(text: &str) -> usize {
    extract(text).images
}
