//! Contract compliance tests for core_types
//!
//! These tests pin the public surface the parser crate relies on.

use core_types::{
    ErrorKind, LineIndex, ParseError, ParseResult, Position, SourceLocation, SourcePosition, Span,
};

#[cfg(test)]
mod contract_tests {
    use super::*;

    /// Contract: ErrorKind has exactly the three parsing stages
    #[test]
    fn test_error_kind_variants() {
        let kinds = [ErrorKind::Lexical, ErrorKind::Syntax, ErrorKind::EarlyError];
        assert_eq!(kinds.len(), 3);
    }

    /// Contract: ParseResult is a plain Result alias
    #[test]
    fn test_parse_result_alias() {
        let ok: ParseResult<u8> = Ok(1);
        assert_eq!(ok, Ok(1));
        let err: ParseResult<u8> = Err(ParseError::new(
            ErrorKind::Syntax,
            "x",
            SourcePosition::default(),
        ));
        assert!(err.is_err());
    }

    /// Contract: Span is Copy and carries an optional location
    #[test]
    fn test_span_is_copy() {
        let span = Span::new(0, 1);
        let copy = span;
        assert_eq!(span, copy);
        let with_loc = Span {
            loc: Some(SourceLocation::default()),
            ..span
        };
        assert_ne!(with_loc, span);
    }

    /// Contract: lines are 1-based and columns 0-based
    #[test]
    fn test_line_column_convention() {
        let index = LineIndex::new("x");
        assert_eq!(index.position(0), Position { line: 1, column: 0 });
    }

    /// Contract: ParseError implements std::error::Error and Send + Sync
    #[test]
    fn test_parse_error_traits() {
        fn assert_traits<T: std::error::Error + Send + Sync + 'static>() {}
        assert_traits::<ParseError>();
    }
}
