//! # Lexer - Tokenizing Markdown Source
//!
//! This module provides the first stage of processing: breaking source text
//! into tokens. Scanning happens in two passes:
//!
//! 1. [Logos] splits the input into context-free raw tokens (`RawToken`).
//! 2. A `Tokenizer` applies the line-position rules and produces the
//!    [`Token`] sequence the parser consumes.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Why Two Passes?
//!
//! Logos has no notion of "start of line", but two token kinds depend on it:
//! a `#` run is only a heading marker and a `>` run is only a quote marker when
//! it opens a line. Everywhere else those characters are plain text. The
//! second pass tracks the line state and demotes misplaced markers to text.
//!
//! ```
//! use mdproc_syntax::lexer::{TokenKind, tokenize};
//!
//! let tokens = tokenize("# Title #1\n", false);
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [TokenKind::Heading, TokenKind::Text, TokenKind::LineEnd]);
//! assert_eq!(tokens[1].text, "Title #1");
//! ```
//!
//! ## Token Rules
//!
//! | Kind | Recognized as |
//! |------|---------------|
//! | `Heading` | run of `#` at line start |
//! | `Quote` | run of `>` at line start |
//! | `Emphasis` | run of `*`/`_`, at most three characters per token |
//! | `Html` | `<...>` on a single line |
//! | `LineEnd` | `\n` or `\r\n` |
//! | `Text` | everything else, merged into maximal runs |
//! | `EndOfInput` | synthetic terminator, see [`tokenize`] |
//!
//! Whitespace directly after a heading or quote marker, and indentation at the
//! start of a line, is not significant and is dropped.
//!
//! Lexing is total: characters Logos does not recognize become text.

use std::fmt;
use std::ops::Range;

use logos::Logos;

/// Raw token kinds produced by the Logos pass.
///
/// These carry no line-position knowledge; [`Tokenizer`] maps them onto
/// [`TokenKind`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// `#` run, a heading marker at line start
    #[regex(r"#+")]
    Hashes,

    /// `>` run, a quote marker at line start
    #[regex(r">+")]
    Gts,

    /// Emphasis delimiter run of any length
    #[regex(r"[*_]+")]
    Delimiters,

    /// Angle-bracket construct on a single line
    #[regex(r"<[^<>\r\n]+>")]
    Tag,

    /// `<` that does not open a tag
    #[token("<")]
    Lt,

    /// Plain text - anything not matched by other rules
    #[regex(r"[^#>*_<\r\n \t]+")]
    Word,
}

/// Kinds of tokens handed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of one or more `#` at line start
    Heading,
    /// Run of one or more `>` at line start
    Quote,
    /// Run of one to three `*`/`_` characters
    Emphasis,
    /// Raw `<tag...>` construct, including `<br>`
    Html,
    /// Normalized line terminator
    LineEnd,
    /// Maximal run of plain characters
    Text,
    /// Synthetic terminator appended by [`tokenize`]
    EndOfInput,
}

impl TokenKind {
    /// Whether this token closes a logical line.
    pub fn is_line_end(self) -> bool {
        matches!(self, TokenKind::LineEnd | TokenKind::EndOfInput)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Heading => "heading marker",
            TokenKind::Quote => "quote marker",
            TokenKind::Emphasis => "emphasis delimiter",
            TokenKind::Html => "html",
            TokenKind::LineEnd => "line end",
            TokenKind::Text => "text",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}

/// Source location of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset into the source
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A lexed token with its kind, text slice and start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: Position,
}

impl Token<'_> {
    /// Whether this is an `Html` token spelling an explicit line break.
    pub fn is_break(&self) -> bool {
        self.kind == TokenKind::Html
            && (self.text.eq_ignore_ascii_case("<br>") || self.text.eq_ignore_ascii_case("<br/>"))
    }
}

/// Where the tokenizer is within the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Nothing but indentation seen on this line
    Start,
    /// Right after a quote marker; a heading marker may still follow
    AfterQuote,
    /// Right after a heading marker
    AfterHeading,
    /// Inside inline content
    Inline,
}

impl LineState {
    fn skips_whitespace(self) -> bool {
        self != LineState::Inline
    }
}

/// Second lexing pass: applies line-position rules to raw tokens.
struct Tokenizer<'a> {
    input: &'a str,
    tokens: Vec<Token<'a>>,
    state: LineState,
    line: usize,
    /// Last offset a column was computed for, and that column
    column_offset: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: Vec::new(),
            state: LineState::Start,
            line: 1,
            column_offset: 0,
            column: 1,
        }
    }

    /// Position of `offset`, counting columns on from the previous token.
    ///
    /// Offsets must not decrease within a line.
    fn position(&mut self, offset: usize) -> Position {
        self.column += self.input[self.column_offset..offset].chars().count();
        self.column_offset = offset;
        Position {
            offset,
            line: self.line,
            column: self.column,
        }
    }

    fn emit(&mut self, kind: TokenKind, span: Range<usize>) {
        let position = self.position(span.start);
        self.tokens.push(Token {
            kind,
            text: &self.input[span],
            position,
        });
    }

    /// Append plain text, extending the previous token when it is adjacent text.
    fn text(&mut self, span: Range<usize>) {
        if let Some(last) = self.tokens.last_mut()
            && last.kind == TokenKind::Text
            && last.position.offset + last.text.len() == span.start
        {
            last.text = &self.input[last.position.offset..span.end];
        } else {
            self.emit(TokenKind::Text, span);
        }
        self.state = LineState::Inline;
    }

    fn push(&mut self, raw: RawToken, span: Range<usize>) {
        match raw {
            RawToken::Newline => {
                self.emit(TokenKind::LineEnd, span.clone());
                self.line += 1;
                self.column_offset = span.end;
                self.column = 1;
                self.state = LineState::Start;
            }
            RawToken::Whitespace if self.state.skips_whitespace() => {}
            RawToken::Hashes
                if matches!(self.state, LineState::Start | LineState::AfterQuote) =>
            {
                self.emit(TokenKind::Heading, span);
                self.state = LineState::AfterHeading;
            }
            RawToken::Gts if self.state == LineState::Start => {
                self.emit(TokenKind::Quote, span);
                self.state = LineState::AfterQuote;
            }
            RawToken::Delimiters => {
                // Delimiters are ASCII, so byte chunks are character chunks.
                let mut start = span.start;
                while start < span.end {
                    let end = (start + 3).min(span.end);
                    self.emit(TokenKind::Emphasis, start..end);
                    start = end;
                }
                self.state = LineState::Inline;
            }
            RawToken::Tag => {
                self.emit(TokenKind::Html, span);
                self.state = LineState::Inline;
            }
            RawToken::Whitespace
            | RawToken::Hashes
            | RawToken::Gts
            | RawToken::Lt
            | RawToken::Word => self.text(span),
        }
    }

    fn finish(mut self, append_terminator: bool) -> Vec<Token<'a>> {
        if append_terminator
            && let Some(last) = self.tokens.last()
            && last.kind != TokenKind::LineEnd
        {
            let end = self.input.len();
            self.emit(TokenKind::EndOfInput, end..end);
        }
        self.tokens
    }
}

/// Tokenize the input.
///
/// Never fails. When `append_terminator` is set and the input has content
/// that does not end in a line terminator, a synthetic
/// [`TokenKind::EndOfInput`] token with empty text closes the last line.
pub fn tokenize(input: &str, append_terminator: bool) -> Vec<Token<'_>> {
    let mut tokenizer = Tokenizer::new(input);
    let mut lexer = RawToken::lexer(input);

    while let Some(result) = lexer.next() {
        // Logos error means unrecognized character - treat as text
        let raw = result.unwrap_or(RawToken::Word);
        tokenizer.push(raw, lexer.span());
    }

    tokenizer.finish(append_terminator)
}
