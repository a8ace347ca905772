//! # mdproc-syntax
//!
//! A small Markdown subset compiled to HTML5 through a classic three stage
//! pipeline:
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Document → Renderer → HTML
//!               (Logos)          (recursive descent)   (tree walk)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Turns text into a flat sequence of [`Token`]s. Lexing is total: any input
//! produces tokens, unknown characters simply become text.
//!
//! ### 2. Parser ([`parser`] module)
//!
//! A backtracking recursive-descent parser builds a [`Document`] from the
//! tokens. Malformed markup never aborts a parse; the parser collects
//! [`Diagnostic`]s next to the (possibly partial) tree.
//!
//! ### 3. Renderer ([`html`] module)
//!
//! Walks the tree once and emits HTML. Rendering cannot fail.
//!
//! ## Supported Markup
//!
//! | Markup | HTML |
//! |--------|------|
//! | `# Title` … `###### Title` | `<h1>` … `<h6>` (deeper markers keep counting) |
//! | lines of text | `<p>`, blank line separates paragraphs |
//! | `> quote`, `>> nested` | `<blockquote>` |
//! | `*a*`, `**a**`, `***a***` (or `_`) | `<em>`, `<strong>`, `<strong><em>` |
//! | `<br>` | `<br/>` |
//! | `<tag>` | passed through |
//!
//! ## Quick Start
//!
//! ```
//! let (html, diagnostics) = mdproc_syntax::process("# Hello");
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(
//!     html,
//!     "<!DOCTYPE html>\n<html>\n<body>\n<h1>Hello </h1>\n</body>\n</html>\n"
//! );
//! ```

pub mod ast;
pub mod html;
pub mod lexer;
pub mod parser;

pub use ast::{Document, EmphasisKind, Node, NodeKind};
pub use html::render;
pub use lexer::{Position, Token, TokenKind, tokenize};
pub use parser::{Diagnostic, Parse, parse};

/// Tokenize, parse and render `text` in one go.
///
/// Always produces a full HTML page, even for malformed input; problems the
/// parser recovered from are returned alongside.
pub fn process(text: &str) -> (String, Vec<Diagnostic>) {
    let tokens = tokenize(text, true);
    let (document, diagnostics) = parse(&tokens, None).into_parts();
    (render(&document), diagnostics)
}
