//! Error types produced while tokenizing and parsing ECMAScript source.
//!
//! Parsing stops at the first error, so a parse either yields a complete
//! tree or exactly one [`ParseError`].

use crate::source::SourcePosition;
use thiserror::Error;

/// The stage of parsing that rejected the input.
///
/// All kinds surface to callers as a JavaScript `SyntaxError`; the kind is
/// kept for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed token (unterminated string, bad escape, bad number)
    Lexical,
    /// Token sequence does not match the grammar
    Syntax,
    /// Grammatical input rejected by a static-semantics rule
    EarlyError,
}

impl ErrorKind {
    /// Returns a short lowercase label for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Lexical => "lexical",
            ErrorKind::Syntax => "syntax",
            ErrorKind::EarlyError => "early",
        }
    }
}

/// A fatal parse error with the position of the offending token.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, ParseError, SourcePosition};
///
/// let error = ParseError::new(
///     ErrorKind::Syntax,
///     "Unexpected token",
///     SourcePosition { line: 1, column: 4, offset: 4 },
/// );
/// assert_eq!(error.kind, ErrorKind::Syntax);
/// assert_eq!(error.to_string(), "SyntaxError: Unexpected token (1:4)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SyntaxError: {message} ({}:{})", position.line, position.column)]
pub struct ParseError {
    /// Which stage rejected the input
    pub kind: ErrorKind,
    /// Human-readable description
    pub message: String,
    /// Where the offending token starts
    pub position: SourcePosition,
}

impl ParseError {
    /// Creates an error of the given kind at `position`.
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: SourcePosition) -> Self {
        ParseError {
            kind,
            message: message.into(),
            position,
        }
    }

    /// Byte offset of the offending token.
    pub fn offset(&self) -> usize {
        self.position.offset
    }
}

/// Result alias used throughout the parser.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn position(line: u32, column: u32, offset: usize) -> SourcePosition {
        SourcePosition {
            line,
            column,
            offset,
        }
    }

    #[test]
    fn test_display_includes_line_and_column() {
        let error = ParseError::new(ErrorKind::Lexical, "Unterminated string constant", position(3, 7, 20));
        assert_eq!(
            error.to_string(),
            "SyntaxError: Unterminated string constant (3:7)"
        );
    }

    #[test]
    fn test_offset_accessor() {
        let error = ParseError::new(ErrorKind::EarlyError, "Duplicate label", position(1, 2, 2));
        assert_eq!(error.offset(), 2);
        assert_eq!(error.kind.as_str(), "early");
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        let error = ParseError::new(ErrorKind::Syntax, "Unexpected token", position(1, 0, 0));
        takes_error(&error);
    }

    #[test]
    fn test_result_alias_propagates() {
        fn inner() -> ParseResult<u32> {
            Err(ParseError::new(ErrorKind::Syntax, "boom", position(1, 0, 0)))
        }
        fn outer() -> ParseResult<u32> {
            let value = inner()?;
            Ok(value + 1)
        }
        assert_eq!(outer().unwrap_err().message, "boom");
    }
}
