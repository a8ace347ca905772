use crate::ast::NodeKind;
use crate::lexer::{Position, Token, TokenKind};

/// Owned copy of the token a diagnostic points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffendingToken {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl From<&Token<'_>> for OffendingToken {
    fn from(token: &Token<'_>) -> Self {
        Self {
            kind: token.kind,
            text: token.text.to_string(),
            position: token.position,
        }
    }
}

/// A syntax problem the parser recovered from.
///
/// Diagnostics never abort parsing; they are collected next to the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Syntax error: {message} in {context}{}", describe(.token))]
pub struct Diagnostic {
    pub message: String,
    /// Kind of the nearest node that was being built
    pub context: NodeKind,
    /// Token that could not be parsed, `None` once input is exhausted
    pub token: Option<OffendingToken>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, context: NodeKind, token: Option<&Token<'_>>) -> Self {
        Self {
            message: message.into(),
            context,
            token: token.map(OffendingToken::from),
        }
    }
}

fn describe(token: &Option<OffendingToken>) -> String {
    match token {
        Some(token) => format!(" at {}, {} {:?}", token.position, token.kind, token.text),
        None => " at end of input".to_string(),
    }
}
