//! Source positions, spans and the line table.
//!
//! Offsets are byte offsets into the UTF-8 source. Line numbers are
//! 1-based and columns are 0-based counts of UTF-16 code units, which is
//! what ESTree consumers written against JavaScript strings expect.

use serde::Serialize;

/// Position of a diagnostic: byte offset plus line and column.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition {
///     line: 10,
///     column: 5,
///     offset: 150,
/// };
///
/// assert_eq!(pos.line, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourcePosition {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (0-based, UTF-16 code units)
    pub column: u32,
    /// Byte offset from the start of the source
    pub offset: usize,
}

/// A line/column pair as it appears in an ESTree `loc` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (0-based)
    pub column: u32,
}

/// The ESTree `loc` value of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    /// Position of the first character
    pub start: Position,
    /// Position just past the last character
    pub end: Position,
}

/// Byte range covered by a node, with its `loc` when locations are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte
    pub start: usize,
    /// Offset just past the last byte
    pub end: usize,
    /// Line/column form, present only when requested by the caller
    pub loc: Option<SourceLocation>,
}

impl Span {
    /// Creates a span without location information.
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start,
            end,
            loc: None,
        }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Translates byte offsets into line/column positions.
///
/// Built once per source. Column lookup is constant time: for non-ASCII
/// sources a byte-to-UTF-16 prefix table is kept alongside line starts.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    utf16_offsets: Option<Vec<u32>>,
}

impl LineIndex {
    /// Scans `source` for line terminators (LF, CR, CRLF, LS, PS).
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = source.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(offset + ch.len_utf8()),
                '\r' => {
                    if let Some((_, '\n')) = chars.peek() {
                        continue;
                    }
                    line_starts.push(offset + 1);
                }
                _ => {}
            }
        }

        let utf16_offsets = if source.is_ascii() {
            None
        } else {
            let mut table = Vec::with_capacity(source.len() + 1);
            let mut units = 0u32;
            for ch in source.chars() {
                for _ in 0..ch.len_utf8() {
                    table.push(units);
                }
                units += ch.len_utf16() as u32;
            }
            table.push(units);
            Some(table)
        };

        LineIndex {
            line_starts,
            utf16_offsets,
        }
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line/column of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = match &self.utf16_offsets {
            Some(table) => {
                let end = offset.min(table.len() - 1);
                table[end] - table[line_start.min(end)]
            }
            None => (offset - line_start) as u32,
        };
        Position {
            line: line as u32 + 1,
            column,
        }
    }

    /// Full diagnostic position of a byte offset.
    pub fn source_position(&self, offset: usize) -> SourcePosition {
        let Position { line, column } = self.position(offset);
        SourcePosition {
            line,
            column,
            offset,
        }
    }

    /// `loc` value for a byte range.
    pub fn location(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation {
            start: self.position(start),
            end: self.position(end),
        }
    }
}
