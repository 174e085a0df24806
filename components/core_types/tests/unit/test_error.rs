//! Unit tests for ParseError and ErrorKind

use core_types::{ErrorKind, ParseError, SourcePosition};

fn at(line: u32, column: u32, offset: usize) -> SourcePosition {
    SourcePosition {
        line,
        column,
        offset,
    }
}

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_labels() {
        assert_eq!(ErrorKind::Lexical.as_str(), "lexical");
        assert_eq!(ErrorKind::Syntax.as_str(), "syntax");
        assert_eq!(ErrorKind::EarlyError.as_str(), "early");
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::Syntax, ErrorKind::Syntax);
        assert_ne!(ErrorKind::Syntax, ErrorKind::Lexical);
    }
}

#[cfg(test)]
mod parse_error_tests {
    use super::*;

    #[test]
    fn test_parse_error_fields() {
        let error = ParseError::new(ErrorKind::Syntax, "Unexpected token", at(2, 3, 10));
        assert_eq!(error.kind, ErrorKind::Syntax);
        assert_eq!(error.message, "Unexpected token");
        assert_eq!(error.position.line, 2);
        assert_eq!(error.offset(), 10);
    }

    #[test]
    fn test_parse_error_display() {
        let error = ParseError::new(ErrorKind::EarlyError, "'return' outside of function", at(1, 0, 0));
        assert_eq!(
            format!("{}", error),
            "SyntaxError: 'return' outside of function (1:0)"
        );
    }

    #[test]
    fn test_parse_error_accepts_owned_message() {
        let name = "x";
        let error = ParseError::new(
            ErrorKind::EarlyError,
            format!("Identifier '{}' has already been declared", name),
            at(1, 4, 4),
        );
        assert!(error.message.contains("'x'"));
    }

    #[test]
    fn test_parse_error_clone_eq() {
        let error = ParseError::new(ErrorKind::Lexical, "Invalid number", at(1, 1, 1));
        assert_eq!(error.clone(), error);
    }
}
