//! # Parser - Recursive Descent with Backtracking
//!
//! This module turns the token sequence from the [`lexer`](crate::lexer) into a
//! [`Document`] tree.
//!
//! ## Speculative Rules
//!
//! Markdown is ambiguous: a `*` may open emphasis or be a literal star, and
//! only later tokens decide. Every grammar rule is therefore a speculative
//! attempt with the shape
//!
//! ```ignore
//! fn rule<'t, 'i>(c: Cursor<'t, 'i>) -> Option<(Cursor<'t, 'i>, Node)>
//! ```
//!
//! The [`Cursor`] is a plain `Copy` index into the token slice. A rule that
//! matches returns the advanced cursor together with the node it built. A rule
//! that does not match returns `None`, and because the caller never handed over
//! its own cursor, it is still sitting at the entry position, ready for the
//! next alternative. Backtracking costs nothing and cannot be forgotten.
//!
//! ## Two Error Channels
//!
//! - "No match" is ordinary control flow: `None` from a rule.
//! - A real syntax error only arises at the top level, when no block rule
//!   accepts the current token. The parser records a [`Diagnostic`], skips the
//!   token and carries on. Previously built blocks are never discarded.
//!
//! ## Module Structure
//!
//! - [`cursor`] - The token stream cursor
//! - [`diagnostic`] - Recovered syntax errors
//! - `grammar` - Grammar rules (root, block, inline)
//!
//! ## Public API
//!
//! ```
//! use mdproc_syntax::{lexer::tokenize, parser::parse};
//!
//! let tokens = tokenize("# Hello\n", true);
//! let (document, diagnostics) = parse(&tokens, None).into_parts();
//! assert_eq!(document.children.len(), 1);
//! assert!(diagnostics.is_empty());
//! ```

pub mod cursor;
pub mod diagnostic;

mod grammar;

use crate::ast::{Document, Node, NodeKind};
use crate::lexer::{Token, TokenKind};
pub use cursor::Cursor;
pub use diagnostic::{Diagnostic, OffendingToken};

/// Result of a parse: the tree plus everything recovered from on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn into_parts(self) -> (Document, Vec<Diagnostic>) {
        (self.document, self.diagnostics)
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Top-level parser state.
///
/// Grammar rules below the document are pure functions over a [`Cursor`];
/// only the document loop needs mutable state to collect blocks and
/// diagnostics.
pub struct Parser<'t, 'input> {
    cursor: Cursor<'t, 'input>,
    document: Document,
    diagnostics: Vec<Diagnostic>,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>], source: Option<&str>) -> Self {
        Self {
            cursor: Cursor::new(tokens),
            document: Document::new(source.map(str::to_string)),
            diagnostics: Vec::new(),
        }
    }

    /// Parse the tokens and return the tree with its diagnostics.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        Parse {
            document: self.document,
            diagnostics: self.diagnostics,
        }
    }

    pub fn cursor(&self) -> Cursor<'t, 'input> {
        self.cursor
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Skip blank lines between blocks.
    fn skip_blank_lines(&mut self) {
        while self.cursor.kind().is_some_and(TokenKind::is_line_end) {
            self.cursor = self.cursor.advance();
        }
    }

    /// Attach a parsed block and move to the cursor the rule returned.
    fn accept(&mut self, cursor: Cursor<'t, 'input>, node: Node) {
        debug_assert!(cursor.position() > self.cursor.position());
        self.cursor = cursor;
        self.document.push(node);
    }

    /// Record that no block accepts the current token and step over it.
    fn recover(&mut self) {
        let token = self.cursor.peek();
        let diagnostic = match token {
            Some(t) if t.kind == TokenKind::Heading => {
                Diagnostic::new("heading marker without text", NodeKind::Heading, token)
            }
            _ => Diagnostic::new("no block matches token", NodeKind::Document, token),
        };
        log::debug!("{diagnostic}");
        self.diagnostics.push(diagnostic);
        self.cursor = self.cursor.advance();
    }
}

/// Parse a token sequence into a document.
///
/// `source` is an optional path or URI recorded on the [`Document`].
pub fn parse(tokens: &[Token<'_>], source: Option<&str>) -> Parse {
    Parser::new(tokens, source).parse()
}
