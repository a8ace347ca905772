//! Block-level grammar rules.

use crate::ast::Node;
use crate::lexer::TokenKind;
use crate::parser::Cursor;

use super::Parsed;
use super::inline::{self, InlineRun};

/// Parse a top-level block.
pub(super) fn block<'t, 'i>(c: Cursor<'t, 'i>) -> Parsed<'t, 'i> {
    paragraph(c, None)
        .or_else(|| heading(c))
        .or_else(|| html_block(c))
        .or_else(|| blockquote(c))
}

/// Parse a block nested in a quote opened by `marker`.
fn quoted_block<'t, 'i>(c: Cursor<'t, 'i>, marker: &str) -> Parsed<'t, 'i> {
    paragraph(c, Some(marker))
        .or_else(|| heading(c))
        .or_else(|| html_block(c))
}

/// Check if a line starting here opens a block other than a paragraph.
fn interrupts_paragraph(c: Cursor<'_, '_>) -> bool {
    match c.kind() {
        Some(TokenKind::Heading | TokenKind::Quote) => true,
        Some(TokenKind::Html) => is_html_line(c),
        _ => false,
    }
}

/// Check if the line is a single HTML tag other than a break.
fn is_html_line(c: Cursor<'_, '_>) -> bool {
    c.peek()
        .is_some_and(|t| t.kind == TokenKind::Html && !t.is_break())
        && c.advance().at_line_end()
}

/// Step over a line terminator, if there is one.
fn eat_line_end<'t, 'i>(c: Cursor<'t, 'i>) -> Cursor<'t, 'i> {
    if c.kind().is_some_and(TokenKind::is_line_end) {
        c.advance()
    } else {
        c
    }
}

/// Parse an ATX heading.
///
/// A marker followed by nothing but the line end is not a heading.
fn heading<'t, 'i>(c: Cursor<'t, 'i>) -> Parsed<'t, 'i> {
    let (c, marker) = c.eat(TokenKind::Heading)?;

    let mut run = InlineRun::default();
    let c = inline::inline_until_line_end(c, &mut run);
    if run.is_empty() {
        return None;
    }

    let level = marker.text.chars().count();
    Some((eat_line_end(c), Node::heading(level, run.finish())))
}

/// Parse a line holding only a raw HTML tag.
fn html_block<'t, 'i>(c: Cursor<'t, 'i>) -> Parsed<'t, 'i> {
    if !is_html_line(c) {
        return None;
    }
    let (c, tag) = c.eat(TokenKind::Html)?;
    Some((eat_line_end(c), Node::Html(tag.text.to_string())))
}

/// Parse a paragraph.
///
/// A single line end is a soft break. The paragraph ends at a blank line, at
/// the end of input, or before a line that opens another block. The blank line
/// itself is left for the caller.
///
/// Inside a quote (`quote` is the enclosing marker) a line continues the
/// paragraph only when it repeats exactly that marker followed by inline
/// content.
fn paragraph<'t, 'i>(c: Cursor<'t, 'i>, quote: Option<&str>) -> Parsed<'t, 'i> {
    if c.at_line_end() || interrupts_paragraph(c) {
        return None;
    }

    let mut run = InlineRun::default();
    let mut c = c;
    loop {
        c = inline::inline_until_line_end(c, &mut run);
        if !c.at_line_end() || c.at_end() {
            break;
        }

        // Consume the terminator: a soft break
        c = c.advance();
        run.line_break();

        // Blank line ends the paragraph
        if c.at_line_end() {
            break;
        }

        match quote {
            None if interrupts_paragraph(c) => break,
            None => {}
            Some(marker) => {
                let continues = c
                    .eat(TokenKind::Quote)
                    .filter(|(next, t)| {
                        t.text == marker && !next.at_line_end() && !interrupts_paragraph(*next)
                    });
                match continues {
                    Some((next, _)) => c = next,
                    None => break,
                }
            }
        }
    }

    if run.is_empty() {
        return None;
    }
    Some((c, Node::paragraph(run.finish())))
}

/// Parse a block quote.
///
/// The opening marker fixes the depth. Following lines stay in this quote
/// while they repeat the exact marker. A longer marker opens a child quote.
/// A shorter one ends this quote and is left unconsumed for the enclosing
/// quote or the document.
pub(super) fn blockquote<'t, 'i>(c: Cursor<'t, 'i>) -> Parsed<'t, 'i> {
    let (mut c, open) = c.eat(TokenKind::Quote)?;
    let marker = open.text;
    let mut children = Vec::new();

    loop {
        // Rest of a line opened by our own marker
        if c.at_line_end() {
            c = eat_line_end(c);
        } else {
            match quoted_block(c, marker) {
                Some((next, node)) => {
                    children.push(node);
                    c = next;
                }
                None => break,
            }
        }

        // Deeper markers nest as child quotes
        while let Some(t) = c.peek()
            && t.kind == TokenKind::Quote
            && t.text.len() > marker.len()
        {
            let Some((next, node)) = blockquote(c) else {
                break;
            };
            children.push(node);
            c = next;
        }

        match c.eat(TokenKind::Quote) {
            Some((next, t)) if t.text == marker => c = next,
            _ => break,
        }
    }

    Some((c, Node::block_quote(marker, children)))
}
