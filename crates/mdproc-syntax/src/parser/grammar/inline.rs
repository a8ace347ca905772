//! # Inline-Level Grammar
//!
//! Inline elements are the content of a line inside a block: text, explicit
//! breaks, raw HTML and emphasis.
//!
//! ## Dispatch Logic
//!
//! | Token | Element |
//! |-------|---------|
//! | `Text` | Text |
//! | `Html` spelling `<br>`/`<br/>` | Break |
//! | other `Html` | Html |
//! | `Emphasis` | Emphasis, or literal text when no closer matches |
//!
//! ## Emphasis Symmetry
//!
//! An emphasis span closes with the character-reversed form of its opening
//! delimiter: `**` closes `**`, `*_` closes only with `_*`. A different
//! delimiter inside the span opens a nested emphasis attempt. If the nested
//! attempt fails, the outer one fails as well and nothing it read is kept:
//! the caller is still holding its own cursor and re-reads the opening
//! delimiter as literal text.
//!
//! Emphasis never spans a line end and nests at most `MAX_EMPHASIS_DEPTH`
//! spans deep. Each line remembers which openers already failed, so a line
//! full of unmatched delimiters is not re-scanned from every opener.

use std::collections::HashMap;

use crate::ast::Node;
use crate::lexer::TokenKind;
use crate::parser::Cursor;

use super::Parsed;

/// Inline children collected for one node.
///
/// Literal text that directly follows text on the same line is merged into
/// one `Text` node, so a delimiter that fell back to text does not split a
/// sentence in two.
#[derive(Debug, Default)]
pub(super) struct InlineRun {
    children: Vec<Node>,
    joinable: bool,
}

impl InlineRun {
    pub(super) fn push(&mut self, node: Node) {
        self.children.push(node);
        self.joinable = false;
    }

    pub(super) fn push_text(&mut self, text: &str) {
        if self.joinable
            && let Some(Node::Text(last)) = self.children.last_mut()
        {
            last.push_str(text);
            return;
        }
        self.children.push(Node::text(text));
        self.joinable = true;
    }

    /// A soft line break: the next text starts a new `Text` node.
    pub(super) fn line_break(&mut self) {
        self.joinable = false;
    }

    pub(super) fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(super) fn finish(self) -> Vec<Node> {
        self.children
    }
}

/// Deepest emphasis nesting the parser will attempt.
///
/// An opener that would nest deeper fails like an unclosed one, which also
/// fails every attempt enclosing it.
const MAX_EMPHASIS_DEPTH: usize = 32;

/// Emphasis openers already known to fail on the current line.
///
/// Maps a token index to the shallowest depth at which the attempt starting
/// there failed. Failing at depth `d` implies failing at any depth `>= d`: a
/// deeper attempt has less room under the nesting cap and otherwise reads the
/// same tokens.
#[derive(Debug, Default)]
struct FailedOpeners {
    depth_by_position: HashMap<usize, usize>,
}

impl FailedOpeners {
    fn fails_at(&self, position: usize, depth: usize) -> bool {
        self.depth_by_position
            .get(&position)
            .is_some_and(|&failed| depth >= failed)
    }

    fn record(&mut self, position: usize, depth: usize) {
        self.depth_by_position
            .entry(position)
            .and_modify(|failed| *failed = (*failed).min(depth))
            .or_insert(depth);
    }
}

/// Parse inline content until the end of the line.
pub(super) fn inline_until_line_end<'t, 'i>(
    mut c: Cursor<'t, 'i>,
    run: &mut InlineRun,
) -> Cursor<'t, 'i> {
    let mut failed = FailedOpeners::default();
    while !c.at_line_end() {
        match inline(c, run, &mut failed) {
            Some(next) => c = next,
            None => break,
        }
    }
    c
}

/// Parse a single inline element into `run`.
///
/// Returns `None` when the current token cannot start inline content.
fn inline<'t, 'i>(
    c: Cursor<'t, 'i>,
    run: &mut InlineRun,
    failed: &mut FailedOpeners,
) -> Option<Cursor<'t, 'i>> {
    let token = c.peek()?;
    match token.kind {
        TokenKind::Text => run.push_text(token.text),
        TokenKind::Html if token.is_break() => run.push(Node::Break),
        TokenKind::Html => run.push(Node::Html(token.text.to_string())),
        TokenKind::Emphasis => match emphasis(c, failed, 0) {
            Some((next, node)) => {
                run.push(node);
                return Some(next);
            }
            // Unmatched delimiter stays as literal text
            None => run.push_text(token.text),
        },
        TokenKind::Heading | TokenKind::Quote | TokenKind::LineEnd | TokenKind::EndOfInput => {
            return None;
        }
    }
    Some(c.advance())
}

/// Parse an emphasis span whose closer is the reversed opener.
///
/// `depth` counts the emphasis spans already open around this one.
fn emphasis<'t, 'i>(
    c: Cursor<'t, 'i>,
    failed: &mut FailedOpeners,
    depth: usize,
) -> Parsed<'t, 'i> {
    if depth >= MAX_EMPHASIS_DEPTH || failed.fails_at(c.position(), depth) {
        return None;
    }

    let parsed = emphasis_span(c, failed, depth);
    if parsed.is_none() {
        failed.record(c.position(), depth);
    }
    parsed
}

fn emphasis_span<'t, 'i>(
    c: Cursor<'t, 'i>,
    failed: &mut FailedOpeners,
    depth: usize,
) -> Parsed<'t, 'i> {
    let (mut c, open) = c.eat(TokenKind::Emphasis)?;
    let close: String = open.text.chars().rev().collect();
    let mut run = InlineRun::default();

    loop {
        let token = c.peek()?;
        match token.kind {
            TokenKind::Emphasis if token.text == close => {
                let node = Node::emphasis(open.text, run.finish());
                return Some((c.advance(), node));
            }
            TokenKind::Emphasis => {
                let (next, node) = emphasis(c, failed, depth + 1)?;
                run.push(node);
                c = next;
            }
            TokenKind::Text | TokenKind::Html => c = inline(c, &mut run, failed)?,
            TokenKind::Heading | TokenKind::Quote | TokenKind::LineEnd | TokenKind::EndOfInput => {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::EmphasisKind;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn try_emphasis<'t, 'i>(c: Cursor<'t, 'i>) -> Parsed<'t, 'i> {
        emphasis(c, &mut FailedOpeners::default(), 0)
    }

    fn emphasis_depth(nodes: &[Node]) -> usize {
        nodes
            .iter()
            .map(|node| match node {
                Node::Emphasis { children, .. } => 1 + emphasis_depth(children),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }

    fn inline_nodes(input: &str) -> Vec<Node> {
        let tokens = tokenize(input, true);
        let mut run = InlineRun::default();
        let c = inline_until_line_end(Cursor::new(&tokens), &mut run);
        assert!(c.at_line_end(), "inline parse stopped early on {input:?}");
        run.finish()
    }

    #[test]
    fn plain_text() {
        assert_eq!(inline_nodes("just text"), vec![Node::text("just text")]);
    }

    #[test]
    fn bold_wraps_text() {
        assert_eq!(
            inline_nodes("**bold**"),
            vec![Node::emphasis("**", vec![Node::text("bold")])]
        );
    }

    #[rstest]
    #[case("*a*", "*", EmphasisKind::Italic)]
    #[case("_a_", "_", EmphasisKind::Italic)]
    #[case("__a__", "__", EmphasisKind::Bold)]
    #[case("*_a_*", "*_", EmphasisKind::Bold)]
    #[case("_*a*_", "_*", EmphasisKind::Bold)]
    #[case("***a***", "***", EmphasisKind::BoldItalic)]
    #[case("*__a__*", "*__", EmphasisKind::BoldItalic)]
    fn symmetric_delimiters_close(
        #[case] input: &str,
        #[case] delimiter: &str,
        #[case] kind: EmphasisKind,
    ) {
        let nodes = inline_nodes(input);
        assert_eq!(nodes.len(), 1);
        match &nodes[0] {
            Node::Emphasis {
                kind: actual,
                delimiter: actual_delimiter,
                children,
            } => {
                assert_eq!(*actual, kind);
                assert_eq!(actual_delimiter, delimiter);
                assert_eq!(children, &vec![Node::text("a")]);
            }
            other => panic!("expected emphasis, got {other:?}"),
        }
    }

    #[rstest]
    #[case("*_mismatched*_")]
    #[case("**unclosed")]
    #[case("*a**")]
    #[case("__a**")]
    fn mismatched_delimiters_fall_back_to_text(#[case] input: &str) {
        assert_eq!(inline_nodes(input), vec![Node::text(input)]);
    }

    #[test]
    fn nested_emphasis() {
        assert_eq!(
            inline_nodes("**a *b* c**"),
            vec![Node::emphasis(
                "**",
                vec![
                    Node::text("a "),
                    Node::emphasis("*", vec![Node::text("b")]),
                    Node::text(" c"),
                ]
            )]
        );
    }

    #[test]
    fn failed_outer_emphasis_keeps_inner_match() {
        assert_eq!(
            inline_nodes("**a *b* c"),
            vec![
                Node::text("**a "),
                Node::emphasis("*", vec![Node::text("b")]),
                Node::text(" c"),
            ]
        );
    }

    #[test]
    fn emphasis_does_not_cross_line_end() {
        let tokens = tokenize("*a\nb*", true);
        assert!(try_emphasis(Cursor::new(&tokens)).is_none());
    }

    #[test]
    fn failed_emphasis_leaves_cursor_alone() {
        let tokens = tokenize("*a", true);
        let c = Cursor::new(&tokens);
        assert!(try_emphasis(c).is_none());
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn long_line_of_alternating_openers_is_text() {
        let input = "*a _a ".repeat(20_000);
        assert_eq!(inline_nodes(&input), vec![Node::text(input.as_str())]);
    }

    #[test]
    fn nesting_stops_at_depth_limit() {
        let levels = MAX_EMPHASIS_DEPTH + 8;
        let opens: Vec<&str> = (0..levels)
            .map(|level| if level % 2 == 0 { "*" } else { "_" })
            .collect();
        let closes: Vec<&str> = opens.iter().rev().copied().collect();
        let input = format!("{} x {}", opens.join(" "), closes.join(" "));

        let nodes = inline_nodes(&input);

        // The outermost openers fall back to text, the rest still nest
        assert_eq!(emphasis_depth(&nodes), MAX_EMPHASIS_DEPTH);
        assert_eq!(nodes[0], Node::text("* _ * _ * _ * _ "));
    }

    #[test]
    fn failure_at_shallow_depth_implies_failure_deeper() {
        let mut failed = FailedOpeners::default();
        failed.record(4, 3);
        failed.record(4, 1);

        assert!(!failed.fails_at(4, 0));
        assert!(failed.fails_at(4, 1));
        assert!(failed.fails_at(4, 7));
        assert!(!failed.fails_at(5, 7));
    }

    #[rstest]
    #[case("a<br>b")]
    #[case("a<BR/>b")]
    fn break_tags_become_breaks(#[case] input: &str) {
        assert_eq!(
            inline_nodes(input),
            vec![Node::text("a"), Node::Break, Node::text("b")]
        );
    }

    #[test]
    fn inline_html_passes_through() {
        assert_eq!(
            inline_nodes("a <b>c</b>"),
            vec![
                Node::text("a "),
                Node::Html("<b>".to_string()),
                Node::text("c"),
                Node::Html("</b>".to_string()),
            ]
        );
    }

    #[test]
    fn html_inside_emphasis() {
        assert_eq!(
            inline_nodes("*a<br>b*"),
            vec![Node::emphasis(
                "*",
                vec![Node::text("a"), Node::Break, Node::text("b")]
            )]
        );
    }

    #[test]
    fn line_break_starts_new_text_node() {
        let mut run = InlineRun::default();
        run.push_text("First Line");
        run.line_break();
        run.push_text("Second Line");
        assert_eq!(
            run.finish(),
            vec![Node::text("First Line"), Node::text("Second Line")]
        );
    }
}
