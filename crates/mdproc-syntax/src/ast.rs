//! # Syntax Tree
//!
//! The tree the parser builds and the renderer consumes. Nodes form a closed
//! set expressed as the [`Node`] enum, so every consumer matches exhaustively
//! and a new node kind is a compile error until each one handles it.
//!
//! Every node owns its children. There are no parent links: the renderer only
//! walks downwards. Nodes are built append-only during parsing and never
//! change afterwards.

use std::fmt;

/// Root of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Path or URI the source came from, for diagnostics only
    pub source: Option<String>,
    /// Top-level blocks in source order
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(source: Option<String>) -> Self {
        Self {
            source,
            children: Vec::new(),
        }
    }

    /// Build a document out of the given blocks.
    pub fn with_children(children: Vec<Node>) -> Self {
        Self {
            source: None,
            children,
        }
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Strength of an emphasis span, derived from its opening delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmphasisKind {
    Italic,
    Bold,
    BoldItalic,
}

impl EmphasisKind {
    /// Classify an opening delimiter: one character is italic, two bold,
    /// three bold italic. `*` and `_` may be mixed.
    pub fn from_delimiter(delimiter: &str) -> Self {
        match delimiter.chars().count() {
            0 | 1 => EmphasisKind::Italic,
            2 => EmphasisKind::Bold,
            _ => EmphasisKind::BoldItalic,
        }
    }
}

/// Every node kind below the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `level` is the number of `#` characters, at least one.
    Heading { level: usize, children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    /// `marker` is the exact `>` run that opened the quote. Its length is
    /// the nesting depth.
    BlockQuote { marker: String, children: Vec<Node> },
    Text(String),
    Break,
    /// Raw HTML passed through verbatim, inline or as a whole line.
    Html(String),
    Emphasis {
        kind: EmphasisKind,
        delimiter: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn heading(level: usize, children: Vec<Node>) -> Self {
        debug_assert!(level >= 1, "heading level starts at 1");
        Node::Heading { level, children }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph { children }
    }

    pub fn block_quote(marker: impl Into<String>, children: Vec<Node>) -> Self {
        Node::BlockQuote {
            marker: marker.into(),
            children,
        }
    }

    /// Emphasis whose kind follows from `delimiter`.
    pub fn emphasis(delimiter: impl Into<String>, children: Vec<Node>) -> Self {
        let delimiter = delimiter.into();
        Node::Emphasis {
            kind: EmphasisKind::from_delimiter(&delimiter),
            delimiter,
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Heading { .. } => NodeKind::Heading,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::BlockQuote { .. } => NodeKind::BlockQuote,
            Node::Text(_) => NodeKind::Text,
            Node::Break => NodeKind::Break,
            Node::Html(_) => NodeKind::Html,
            Node::Emphasis { .. } => NodeKind::Emphasis,
        }
    }

    /// Child nodes in order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::BlockQuote { children, .. }
            | Node::Emphasis { children, .. } => children.as_slice(),
            Node::Text(_) | Node::Break | Node::Html(_) => &[],
        }
    }

    /// Scalar payload: literal text, raw HTML, or the marker/delimiter.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Text(value) | Node::Html(value) => Some(value.as_str()),
            Node::BlockQuote { marker, .. } => Some(marker.as_str()),
            Node::Emphasis { delimiter, .. } => Some(delimiter.as_str()),
            Node::Heading { .. } | Node::Paragraph { .. } | Node::Break => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

/// Tag naming a node kind, used where the node itself is not at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Heading,
    Paragraph,
    BlockQuote,
    Text,
    Break,
    Html,
    Emphasis,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "document",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::BlockQuote => "block quote",
            NodeKind::Text => "text",
            NodeKind::Break => "break",
            NodeKind::Html => "html",
            NodeKind::Emphasis => "emphasis",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("*", EmphasisKind::Italic)]
    #[case("_", EmphasisKind::Italic)]
    #[case("**", EmphasisKind::Bold)]
    #[case("__", EmphasisKind::Bold)]
    #[case("*_", EmphasisKind::Bold)]
    #[case("_*", EmphasisKind::Bold)]
    #[case("***", EmphasisKind::BoldItalic)]
    #[case("_**", EmphasisKind::BoldItalic)]
    fn emphasis_kind_from_delimiter(#[case] delimiter: &str, #[case] expected: EmphasisKind) {
        assert_eq!(EmphasisKind::from_delimiter(delimiter), expected);
    }

    #[test]
    fn children_and_values() {
        let quote = Node::block_quote(
            ">>",
            vec![Node::paragraph(vec![Node::text("a"), Node::Break])],
        );
        assert_eq!(quote.kind(), NodeKind::BlockQuote);
        assert_eq!(quote.value(), Some(">>"));
        assert_eq!(quote.children().len(), 1);

        let paragraph = &quote.children()[0];
        assert_eq!(paragraph.value(), None);
        assert!(paragraph.children()[1].is_leaf());
        assert_eq!(paragraph.children()[0].value(), Some("a"));
    }

    #[test]
    fn emphasis_constructor_derives_kind() {
        let node = Node::emphasis("**", vec![Node::text("bold")]);
        assert_eq!(
            node,
            Node::Emphasis {
                kind: EmphasisKind::Bold,
                delimiter: "**".to_string(),
                children: vec![Node::Text("bold".to_string())],
            }
        );
    }

    #[test]
    fn empty_document() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc, Document::new(None));
    }
}
