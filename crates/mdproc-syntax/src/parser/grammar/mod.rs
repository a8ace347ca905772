//! # Grammar Rules
//!
//! ```text
//! document    := block*
//! block       := paragraph | heading | html-block | blockquote
//! heading     := HEADING inline* LINE-END?
//! paragraph   := inline+ (LINE-END inline+)*
//! html-block  := HTML LINE-END
//! blockquote  := QUOTE nested-block* (QUOTE nested-block*)*
//! inline      := TEXT | BREAK | HTML | emphasis
//! emphasis    := EMPHASIS inline* EMPHASIS      -- closed by the reversed opener
//! ```
//!
//! The order of alternatives is their precedence. Each rule takes a
//! [`Cursor`] by value and returns [`Parsed`]: the advanced cursor plus the
//! node on a match, `None` otherwise.
//!
//! ## Module Structure
//!
//! - [`block`] - Block-level elements (paragraphs, headings, quotes, html lines)
//! - [`inline`] - Inline elements (text, breaks, html, emphasis)

mod block;
mod inline;

use crate::ast::Node;
use crate::parser::{Cursor, Parser};

/// Outcome of a speculative rule.
pub(crate) type Parsed<'t, 'i> = Option<(Cursor<'t, 'i>, Node)>;

/// Parse the root document.
///
/// Blocks are collected until the tokens run out. A token no block accepts is
/// diagnosed and skipped so that later blocks still make it into the tree.
pub fn root(p: &mut Parser<'_, '_>) {
    loop {
        p.skip_blank_lines();
        if p.at_end() {
            break;
        }

        match block::block(p.cursor()) {
            Some((next, node)) => p.accept(next, node),
            None => p.recover(),
        }
    }
}
