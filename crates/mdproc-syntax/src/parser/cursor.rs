use crate::lexer::{Token, TokenKind};

/// A position in the token stream.
///
/// The cursor is `Copy`: grammar rules take it by value and hand back an
/// advanced copy on success. A rule that does not match simply drops its copy,
/// so the caller still holds the entry position and can try the next
/// alternative. No explicit rollback is ever needed.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
}

impl<'t, 'input> Cursor<'t, 'input> {
    /// Creates a cursor at the first token.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Index of the current token.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Current token, if any.
    pub fn peek(&self) -> Option<&'t Token<'input>> {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> Option<&'t Token<'input>> {
        self.tokens.get(self.pos + n)
    }

    /// Kind of the current token.
    pub fn kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Check if the current line is over: a terminator or no tokens left.
    pub fn at_line_end(&self) -> bool {
        self.kind().is_none_or(TokenKind::is_line_end)
    }

    /// The cursor one token further on. Saturates at the end.
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            pos: (self.pos + 1).min(self.tokens.len()),
            ..self
        }
    }

    /// The cursor one token back. Saturates at the start.
    #[must_use]
    pub fn retreat(self) -> Self {
        Self {
            pos: self.pos.saturating_sub(1),
            ..self
        }
    }

    /// The cursor at an absolute token index.
    #[must_use]
    pub fn rewind_to(self, pos: usize) -> Self {
        Self {
            pos: pos.min(self.tokens.len()),
            ..self
        }
    }

    /// Consume the current token if it matches.
    pub fn eat(self, kind: TokenKind) -> Option<(Self, &'t Token<'input>)> {
        let token = self.peek().filter(|t| t.kind == kind)?;
        Some((self.advance(), token))
    }
}
