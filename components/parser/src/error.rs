//! Parser error types and helpers
//!
//! Every helper resolves the byte offset against the source so the error
//! carries a line and column. Errors are rare (the first one ends the
//! parse), so the line table is rebuilt on demand.

use crate::lexer::TokenKind;
use core_types::{ErrorKind, LineIndex, ParseError};

fn error_at(kind: ErrorKind, source: &str, offset: usize, message: impl Into<String>) -> ParseError {
    let position = LineIndex::new(source).source_position(offset);
    ParseError::new(kind, message, position)
}

/// Create an error for a malformed token
pub fn lexical_error(source: &str, offset: usize, message: impl Into<String>) -> ParseError {
    error_at(ErrorKind::Lexical, source, offset, message)
}

/// Create a syntax error at a given offset
pub fn syntax_error(source: &str, offset: usize, message: impl Into<String>) -> ParseError {
    error_at(ErrorKind::Syntax, source, offset, message)
}

/// Create an early (static semantics) error at a given offset
pub fn early_error(source: &str, offset: usize, message: impl Into<String>) -> ParseError {
    error_at(ErrorKind::EarlyError, source, offset, message)
}

/// Create an unexpected token error
pub fn unexpected_token(source: &str, offset: usize, got: &TokenKind) -> ParseError {
    match got {
        TokenKind::Eof => unexpected_eof(source, offset),
        _ => syntax_error(source, offset, "Unexpected token"),
    }
}

/// Create an unexpected end of input error
pub fn unexpected_eof(source: &str, offset: usize) -> ParseError {
    syntax_error(source, offset, "Unexpected end of input")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Punctuator;

    #[test]
    fn test_syntax_error() {
        let err = syntax_error("a\nbc", 3, "test");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!((err.position.line, err.position.column), (2, 1));
    }

    #[test]
    fn test_unexpected_token() {
        let err = unexpected_token("a b", 2, &TokenKind::Punctuator(Punctuator::Comma));
        assert_eq!(err.message, "Unexpected token");
        let err = unexpected_token("a", 1, &TokenKind::Eof);
        assert_eq!(err.message, "Unexpected end of input");
    }

    #[test]
    fn test_early_error_kind() {
        let err = early_error("x", 0, "Duplicate label");
        assert_eq!(err.kind, ErrorKind::EarlyError);
        assert_eq!(err.to_string(), "SyntaxError: Duplicate label (1:0)");
    }
}
