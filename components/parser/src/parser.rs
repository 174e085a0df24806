//! Recursive descent parser for JavaScript
//!
//! Parses a token stream into an ESTree-shaped AST. The parser holds one
//! token of lookahead in `token`; anything further is peeked by saving and
//! restoring the lexer state. Expressions that may turn out to be patterns
//! (destructuring assignment, arrow parameters) are parsed as expressions
//! first and converted afterwards, see `patterns.rs`.

mod classes;
mod expressions;
mod functions;
mod modules;
mod patterns;
mod statements;

use crate::ast::*;
use crate::context::Context;
use crate::error::{early_error, syntax_error, unexpected_token};
use crate::lexer::{Keyword, LexGoal, Lexer, Punctuator, Token, TokenKind};
use crate::options::ParseOptions;
use crate::scope::{PrivateNames, ScopeTracker};
use core_types::{LineIndex, ParseError, ParseResult, Span};
use std::collections::HashSet;
use tracing::debug;

/// Deepest expression/statement nesting accepted before the parse fails.
pub const MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelKind {
    Loop,
    Switch,
    Plain,
}

/// Entry on the label stack. Loops and switches push an unnamed entry so
/// unlabelled `break`/`continue` can be validated the same way.
#[derive(Debug, Clone)]
struct Label {
    name: Option<String>,
    kind: LabelKind,
    statement_start: usize,
}

/// Where a statement appears when it is the body of another statement.
///
/// `None` at the call site means a statement list position, where
/// declarations are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementContext {
    /// Consequent or alternate of an `if`
    If,
    /// Body of a labelled statement
    Label,
    /// Loop or `with` body, or a label inside an `if`
    Nested,
}

/// Pattern-only syntax seen while parsing an expression that may still
/// be reinterpreted as a pattern. Offsets point at the offending token.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CoverGrammar {
    /// `{ a = 1 }` shorthand with initializer
    pub(crate) shorthand_assign: Option<usize>,
    /// Comma after a spread element
    pub(crate) trailing_comma: Option<usize>,
    /// Second `__proto__: value` in one object literal
    pub(crate) double_proto: Option<usize>,
    /// Parenthesized element, invalid in a binding pattern
    pub(crate) parenthesized_bind: Option<usize>,
}

/// Saved `yield`/`await` expression positions around a nested function.
type YieldAwait = (Option<usize>, Option<usize>, Option<usize>);

/// JavaScript parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    source: &'a str,
    options: ParseOptions,
    line_index: Option<LineIndex>,
    token: Token,
    prev_end: usize,
    context: Context,
    scopes: ScopeTracker,
    labels: Vec<Label>,
    private_names: PrivateNames,
    exports: HashSet<String>,
    export_refs: Vec<(String, usize)>,
    // First yield/await expression in the current function, and the first
    // `await` used as an identifier; checked when a cover becomes arrow
    // parameters.
    yield_pos: Option<usize>,
    await_pos: Option<usize>,
    await_ident_pos: Option<usize>,
    potential_arrow_at: Option<usize>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        let lexer = Lexer::new(source)
            .with_module(options.module)
            .with_web_compat(!options.disable_web_compat);
        let mut context = Context::IN;
        context.set(Context::MODULE, options.module);
        context.set(Context::STRICT, options.module);
        context.set(Context::AWAIT, options.module);
        context.set(Context::WEB_COMPAT, !options.disable_web_compat);
        context.set(Context::NEXT, options.next);

        Parser {
            lexer,
            source,
            options: options.clone(),
            line_index: options.loc.then(|| LineIndex::new(source)),
            token: Token {
                kind: TokenKind::Eof,
                start: 0,
                end: 0,
                line: 1,
                column: 0,
                newline_before: false,
                escaped: false,
                legacy_octal: false,
                lone_surrogate: false,
            },
            prev_end: 0,
            context,
            scopes: ScopeTracker::new(options.module),
            labels: Vec::new(),
            private_names: PrivateNames::new(),
            exports: HashSet::new(),
            export_refs: Vec::new(),
            yield_pos: None,
            await_pos: None,
            await_ident_pos: None,
            potential_arrow_at: None,
            depth: 0,
        }
    }

    /// Parse the whole source as a script or module
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let source_type = if self.options.module {
            SourceType::Module
        } else {
            SourceType::Script
        };
        debug!(
            len = self.source.len(),
            source_type = source_type.as_str(),
            "parsing program"
        );

        self.bump_name()?;
        if self.use_strict_ahead(false) {
            self.context |= Context::STRICT;
        }

        let mut body = Vec::new();
        while !self.token.is_eof() {
            body.push(self.parse_statement_list_item(true)?);
        }
        mark_directives(&mut body);

        if self.options.module {
            for (name, offset) in std::mem::take(&mut self.export_refs) {
                if !self.scopes.is_declared_at_top(&name) {
                    return Err(self.early(offset, format!("Export '{}' is not defined", name)));
                }
            }
        }

        debug!(statements = body.len(), "parsed program");
        Ok(Program {
            span: self.span(0, self.source.len()),
            body,
            source_type,
        })
    }

    // ---- token handling ----

    /// Consume the current token and return it.
    ///
    /// Keywords written with unicode escapes are rejected here; positions
    /// that accept any IdentifierName use [`Parser::bump_name`].
    fn bump(&mut self) -> ParseResult<Token> {
        if self.token.escaped {
            if let TokenKind::Keyword(keyword) = self.token.kind {
                if !matches!(keyword, Keyword::Await | Keyword::Yield) {
                    return Err(self.raise(
                        self.token.start,
                        format!("Escape sequence in keyword {}", keyword.as_str()),
                    ));
                }
            }
        }
        self.bump_name()
    }

    fn bump_name(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token(LexGoal::Div)?;
        let token = std::mem::replace(&mut self.token, next);
        self.prev_end = token.end;
        Ok(token)
    }

    fn advance(&mut self) -> ParseResult<()> {
        self.bump().map(|_| ())
    }

    /// Look at the token after the current one without consuming anything
    fn peek(&mut self) -> ParseResult<Token> {
        let state = self.lexer.state();
        let token = self.lexer.next_token(LexGoal::Div);
        self.lexer.restore(state);
        token
    }

    fn keyword(&self) -> Option<Keyword> {
        match self.token.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    fn punctuator(&self) -> Option<Punctuator> {
        match self.token.kind {
            TokenKind::Punctuator(punctuator) => Some(punctuator),
            _ => None,
        }
    }

    fn check_punctuator(&self, punctuator: Punctuator) -> bool {
        self.token.is_punctuator(punctuator)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.token.is_keyword(keyword)
    }

    fn check_contextual(&self, name: &str) -> bool {
        self.token.is_contextual(name)
    }

    fn check_template(&self) -> bool {
        matches!(self.token.kind, TokenKind::Template(_))
    }

    fn eat_punctuator(&mut self, punctuator: Punctuator) -> ParseResult<bool> {
        if self.check_punctuator(punctuator) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> ParseResult<bool> {
        if self.check_keyword(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn eat_contextual(&mut self, name: &str) -> ParseResult<bool> {
        if self.check_contextual(name) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_punctuator(&mut self, punctuator: Punctuator) -> ParseResult<()> {
        if self.eat_punctuator(punctuator)? {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<()> {
        if self.eat_keyword(keyword)? {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_contextual(&mut self, name: &str) -> ParseResult<()> {
        if self.eat_contextual(name)? {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Identifier token, or `await`/`yield` which are identifiers in
    /// some contexts.
    fn at_identifier(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::Identifier(_) | TokenKind::Keyword(Keyword::Await | Keyword::Yield)
        )
    }

    fn can_insert_semicolon(&self) -> bool {
        self.token.is_eof() || self.check_punctuator(Punctuator::RBrace) || self.token.newline_before
    }

    /// Consume a semicolon or apply automatic semicolon insertion
    fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.eat_punctuator(Punctuator::Semicolon)? || self.can_insert_semicolon() {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Whether the current token can begin an expression.
    fn starts_expression(&self) -> bool {
        match self.token.kind {
            TokenKind::Identifier(_)
            | TokenKind::PrivateName(_)
            | TokenKind::Number(_)
            | TokenKind::BigInt(_)
            | TokenKind::String(_)
            | TokenKind::Template(_)
            | TokenKind::RegExp { .. } => true,
            TokenKind::Keyword(keyword) => matches!(
                keyword,
                Keyword::Await
                    | Keyword::Class
                    | Keyword::Delete
                    | Keyword::False
                    | Keyword::Function
                    | Keyword::Import
                    | Keyword::New
                    | Keyword::Null
                    | Keyword::Super
                    | Keyword::This
                    | Keyword::True
                    | Keyword::Typeof
                    | Keyword::Void
                    | Keyword::Yield
            ),
            TokenKind::Punctuator(punctuator) => matches!(
                punctuator,
                Punctuator::LParen
                    | Punctuator::LBracket
                    | Punctuator::LBrace
                    | Punctuator::Plus
                    | Punctuator::Minus
                    | Punctuator::Not
                    | Punctuator::Tilde
                    | Punctuator::PlusPlus
                    | Punctuator::MinusMinus
                    | Punctuator::Slash
                    | Punctuator::SlashEq
                    | Punctuator::At
            ),
            TokenKind::Eof => false,
        }
    }

    // ---- spans and errors ----

    fn span(&self, start: usize, end: usize) -> Span {
        Span {
            start,
            end,
            loc: self.line_index.as_ref().map(|index| index.location(start, end)),
        }
    }

    /// Span from `start` to the end of the last consumed token
    fn finish(&self, start: usize) -> Span {
        self.span(start, self.prev_end)
    }

    fn raise(&self, offset: usize, message: impl Into<String>) -> ParseError {
        syntax_error(self.source, offset, message)
    }

    fn early(&self, offset: usize, message: impl Into<String>) -> ParseError {
        early_error(self.source, offset, message)
    }

    fn unexpected(&self) -> ParseError {
        unexpected_token(self.source, self.token.start, &self.token.kind)
    }

    // ---- context ----

    /// Run `parse` under `context`, restoring the current context afterwards
    /// whether or not it succeeds.
    fn with_context<T>(
        &mut self,
        context: Context,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = self.context;
        self.context = context;
        let result = parse(self);
        self.context = saved;
        result
    }

    fn enter_nesting(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.raise(self.token.start, "Maximum nesting depth exceeded"));
        }
        Ok(())
    }

    fn take_yield_await(&mut self) -> YieldAwait {
        (
            self.yield_pos.take(),
            self.await_pos.take(),
            self.await_ident_pos.take(),
        )
    }

    fn restore_yield_await(&mut self, (yield_pos, await_pos, await_ident_pos): YieldAwait) {
        self.yield_pos = yield_pos;
        self.await_pos = await_pos;
        self.await_ident_pos = await_ident_pos;
    }

    /// Whether the directive prologue starting at the current token (or
    /// the one after it, for a function body's `{`) contains `"use strict"`.
    fn use_strict_ahead(&mut self, skip_current: bool) -> bool {
        let state = self.lexer.state();
        let mut token = if skip_current {
            self.lexer.next_token(LexGoal::Div)
        } else {
            Ok(self.token.clone())
        };
        let found = loop {
            let current = match token {
                Ok(current) => current,
                Err(_) => break false,
            };
            if !matches!(current.kind, TokenKind::String(_)) {
                break false;
            }
            let use_strict = &self.source[current.start + 1..current.end - 1] == "use strict";
            let next = match self.lexer.next_token(LexGoal::Div) {
                Ok(next) => next,
                Err(_) => break false,
            };
            let ends_statement = next.is_punctuator(Punctuator::Semicolon)
                || next.is_punctuator(Punctuator::RBrace)
                || next.is_eof()
                || (next.newline_before && !continues_expression(&next));
            if !ends_statement {
                break false;
            }
            if use_strict {
                break true;
            }
            token = if next.is_punctuator(Punctuator::Semicolon) {
                self.lexer.next_token(LexGoal::Div)
            } else {
                Ok(next)
            };
        };
        self.lexer.restore(state);
        found
    }
}

/// Tokens that continue an expression across a line break, so a string
/// before them is not a complete directive.
fn continues_expression(token: &Token) -> bool {
    match token.kind {
        TokenKind::Template(_) => true,
        TokenKind::Keyword(keyword) => matches!(keyword, Keyword::In | Keyword::Instanceof),
        TokenKind::Punctuator(punctuator) => !matches!(
            punctuator,
            Punctuator::LBrace
                | Punctuator::RBrace
                | Punctuator::Semicolon
                | Punctuator::Not
                | Punctuator::Tilde
                | Punctuator::PlusPlus
                | Punctuator::MinusMinus
                | Punctuator::At
        ),
        _ => false,
    }
}

/// Tag the leading string-literal statements of a body as directives.
fn mark_directives(body: &mut [Statement]) {
    for statement in body.iter_mut() {
        match statement {
            Statement::ExpressionStatement {
                expression: Expression::Literal(literal),
                directive,
                ..
            } if literal.as_str().is_some() => {
                *directive = Some(literal.raw[1..literal.raw.len() - 1].to_string());
            }
            _ => break,
        }
    }
}

/// Track expression errors recorded in a cover, if there is one.
fn has_expression_errors(cover: &Option<&mut CoverGrammar>) -> bool {
    cover
        .as_ref()
        .is_some_and(|cover| cover.shorthand_assign.is_some() || cover.double_proto.is_some())
}
