//! Unit tests for positions, spans and the line table

use core_types::{LineIndex, Position, SourcePosition, Span};

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_default_is_origin() {
        let pos = SourcePosition::default();
        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_source_position_is_copy() {
        let pos1 = SourcePosition {
            line: 42,
            column: 7,
            offset: 1000,
        };
        let pos2 = pos1;
        assert_eq!(pos1, pos2);
    }

    #[test]
    fn test_source_position_from_line_index() {
        let index = LineIndex::new("a;\n  b;");
        let pos = index.source_position(5);
        assert_eq!(
            pos,
            SourcePosition {
                line: 2,
                column: 2,
                offset: 5
            }
        );
    }
}

#[cfg(test)]
mod line_index_tests {
    use super::*;

    #[test]
    fn test_empty_source_has_one_line() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(0), Position { line: 1, column: 0 });
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("ab");
        assert_eq!(index.position(2), Position { line: 1, column: 2 });
    }

    #[test]
    fn test_trailing_newline_starts_new_line() {
        let index = LineIndex::new("x\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.position(2), Position { line: 2, column: 0 });
    }

    #[test]
    fn test_non_ascii_on_later_line() {
        let source = "a\n\u{00e9}b";
        let index = LineIndex::new(source);
        let b = source.find('b').unwrap();
        assert_eq!(index.position(b), Position { line: 2, column: 1 });
    }
}

#[cfg(test)]
mod span_tests {
    use super::*;

    #[test]
    fn test_span_new_has_no_loc() {
        let span = Span::new(1, 4);
        assert_eq!(span.start, 1);
        assert_eq!(span.end, 4);
        assert!(span.loc.is_none());
    }

    #[test]
    fn test_span_with_location() {
        let index = LineIndex::new("foo\nbar");
        let span = Span {
            loc: Some(index.location(4, 7)),
            ..Span::new(4, 7)
        };
        let loc = span.loc.unwrap();
        assert_eq!(loc.start, Position { line: 2, column: 0 });
        assert_eq!(loc.end, Position { line: 2, column: 3 });
    }
}
