//! # HTML Renderer
//!
//! Serializes a [`Document`] into an HTML5 page in a single depth-first pass.
//! Opening tags are written before a node's children and closing tags after
//! them.
//!
//! | Node | Emission |
//! |------|----------|
//! | Document | `<!DOCTYPE html>\n<html>\n<body>\n` … `</body>\n</html>\n` |
//! | Heading | `<hN>` … `</hN>\n` |
//! | Paragraph | `<p>` … `</p>\n` |
//! | BlockQuote | `<blockquote>\n` … `</blockquote>\n` |
//! | Emphasis | `<em>`, `<strong>` or `<strong><em>` around the children |
//! | Text | the text followed by one space |
//! | Break | `<br/>\n` |
//! | Html | the raw tag followed by `\n` |
//!
//! Text is written as-is; nothing is escaped.

use crate::ast::{Document, EmphasisKind, Node};

/// Opening of every rendered page.
pub const PAGE_START: &str = "<!DOCTYPE html>\n<html>\n<body>\n";
/// Closing of every rendered page.
pub const PAGE_END: &str = "</body>\n</html>\n";

/// Render a document to an HTML string.
pub fn render(document: &Document) -> String {
    let mut renderer = HtmlRenderer::default();
    renderer.document(document);
    renderer.finish()
}

/// Accumulates HTML output while walking the tree.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    content: String,
}

impl HtmlRenderer {
    pub fn finish(self) -> String {
        self.content
    }

    pub fn document(&mut self, document: &Document) {
        self.content.push_str(PAGE_START);
        self.children(&document.children);
        self.content.push_str(PAGE_END);
    }

    fn children(&mut self, children: &[Node]) {
        for child in children {
            self.node(child);
        }
    }

    pub fn node(&mut self, node: &Node) {
        match node {
            Node::Heading { level, children } => {
                self.content.push_str(&format!("<h{level}>"));
                self.children(children);
                self.content.push_str(&format!("</h{level}>\n"));
            }
            Node::Paragraph { children } => {
                self.content.push_str("<p>");
                self.children(children);
                self.content.push_str("</p>\n");
            }
            Node::BlockQuote { children, .. } => {
                self.content.push_str("<blockquote>\n");
                self.children(children);
                self.content.push_str("</blockquote>\n");
            }
            Node::Emphasis { kind, children, .. } => {
                let (open, close) = match kind {
                    EmphasisKind::Italic => ("<em>", "</em>"),
                    EmphasisKind::Bold => ("<strong>", "</strong>"),
                    EmphasisKind::BoldItalic => ("<strong><em>", "</em></strong>"),
                };
                self.content.push_str(open);
                self.children(children);
                self.content.push_str(close);
            }
            Node::Text(value) => {
                self.content.push_str(value);
                self.content.push(' ');
            }
            Node::Break => self.content.push_str("<br/>\n"),
            Node::Html(value) => {
                self.content.push_str(value);
                self.content.push('\n');
            }
        }
    }
}
