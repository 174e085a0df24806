//! Core source-position and error types for the ECMAScript parser.
//!
//! This crate provides the foundational types shared by the lexer, the
//! parser and the ESTree serializer: positions, spans, line tables and the
//! error type every parsing stage reports through.
//!
//! # Overview
//!
//! - [`SourcePosition`] - Offset plus line/column of a diagnostic
//! - [`Position`] / [`SourceLocation`] - ESTree `loc` values
//! - [`Span`] - Byte range (and optional `loc`) carried by every AST node
//! - [`LineIndex`] - Offset to line/column translation
//! - [`ParseError`] / [`ErrorKind`] - The single fatal error of a parse
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, LineIndex, ParseError};
//!
//! let source = "let a;\nlet a;";
//! let index = LineIndex::new(source);
//! let error = ParseError::new(
//!     ErrorKind::EarlyError,
//!     "Identifier 'a' has already been declared",
//!     index.source_position(11),
//! );
//! assert_eq!(
//!     error.to_string(),
//!     "SyntaxError: Identifier 'a' has already been declared (2:4)"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, ParseError, ParseResult};
pub use source::{LineIndex, Position, SourceLocation, SourcePosition, Span};
