//! ECMAScript Parser Component
//!
//! Turns JavaScript source text into an ESTree-shaped syntax tree, or the
//! first syntax error found.
//!
//! # Overview
//!
//! - [`Lexer`] - Tokenizes source code on demand, one goal at a time
//! - [`Parser`] - Recursive descent parser producing a [`Program`]
//! - [`ast`] - Tree node types, named after their ESTree `type`
//! - [`ParseOptions`] - Script or module goal, locations, staged syntax
//! - [`Program::to_estree_json`] - ESTree JSON rendering of a tree
//!
//! # Example
//!
//! ```
//! use parser::{parse, ParseOptions};
//!
//! let program = parse("let x = 42;", &ParseOptions::default()).unwrap();
//! assert_eq!(program.body.len(), 1);
//!
//! let json = program.to_estree_json(&ParseOptions::default());
//! assert_eq!(json["body"][0]["type"], "VariableDeclaration");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
mod context;
pub mod error;
mod estree;
pub mod lexer;
pub mod options;
pub mod parser;
mod scope;

pub use ast::{Expression, Pattern, Program, SourceType, Statement};
pub use core_types::{ErrorKind, ParseError, ParseResult, Span};
pub use lexer::{Keyword, LexGoal, Lexer, Punctuator, Token, TokenKind};
pub use options::ParseOptions;
pub use parser::{Parser, MAX_NESTING_DEPTH};

use tracing::debug;

/// Parse `source` with the given options.
///
/// Returns the program or the first syntax error. No partial tree is
/// produced.
pub fn parse(source: &str, options: &ParseOptions) -> ParseResult<Program> {
    let result = Parser::new(source, options).parse_program();
    if let Err(err) = &result {
        debug!(
            line = err.position.line,
            column = err.position.column,
            message = %err.message,
            "parse failed"
        );
    }
    result
}

/// Parse `source` as a classic script
pub fn parse_script(source: &str) -> ParseResult<Program> {
    parse(source, &ParseOptions::default())
}

/// Parse `source` as a module
pub fn parse_module(source: &str) -> ParseResult<Program> {
    parse(source, &ParseOptions::module())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_and_module() {
        let script = parse_script("var x = 1;").unwrap();
        assert_eq!(script.source_type, SourceType::Script);
        let module = parse_module("export const x = 1;").unwrap();
        assert_eq!(module.source_type, SourceType::Module);
    }

    #[test]
    fn test_module_only_syntax_fails_in_scripts() {
        let err = parse_script("export const x = 1;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!((err.position.line, err.position.column), (1, 0));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "class A extends B { #x = 1; get x() { return this.#x; } }";
        assert_eq!(parse_script(source).unwrap(), parse_script(source).unwrap());
    }
}
