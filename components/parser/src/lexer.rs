//! JavaScript Lexer - tokenizes source code into tokens
//!
//! The lexer is pulled one token at a time by the parser. Whether `/`
//! starts a regular expression and whether `}` resumes a template literal
//! cannot be decided lexically, so every call names a [`LexGoal`].
//! Lexer state is three integers, which makes lookahead a matter of
//! saving and restoring a [`LexerState`].

mod chars;
mod literals;
mod token;

pub use token::{is_strict_reserved_word, Keyword, Punctuator, TemplatePart, Token, TokenKind};

use crate::error::lexical_error;
use chars::{is_id_continue, is_id_start, is_line_terminator, is_whitespace};
use core_types::{ParseError, ParseResult};

/// What the parser expects at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexGoal {
    /// `/` is the division operator
    Div,
    /// `/` starts a regular expression literal
    RegExp,
    /// `}` closes a template substitution and the template continues
    TemplateTail,
}

/// Saved lexer position, used for lookahead and rescanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerState {
    position: usize,
    line: u32,
    line_start: usize,
}

/// Lexer for ECMAScript source text
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    line_start: usize,
    module: bool,
    web_compat: bool,
    // Per-token flags, reset at the start of every scan
    escaped: bool,
    legacy_octal: bool,
    lone_surrogate: bool,
}

impl<'a> Lexer<'a> {
    /// Create a script-goal lexer with web compatibility enabled
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            position: 0,
            line: 1,
            line_start: 0,
            module: false,
            web_compat: true,
            escaped: false,
            legacy_octal: false,
            lone_surrogate: false,
        }
    }

    /// Lex with the module goal (no HTML-like comments)
    pub fn with_module(mut self, module: bool) -> Self {
        self.module = module;
        self
    }

    /// Toggle Annex B lexical extensions
    pub fn with_web_compat(mut self, web_compat: bool) -> Self {
        self.web_compat = web_compat;
        self
    }

    /// The full source text
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current position, for a later [`Lexer::restore`]
    pub fn state(&self) -> LexerState {
        LexerState {
            position: self.position,
            line: self.line,
            line_start: self.line_start,
        }
    }

    /// Rewind or fast-forward to a saved position
    pub fn restore(&mut self, state: LexerState) {
        self.position = state.position;
        self.line = state.line;
        self.line_start = state.line_start;
    }

    /// Get the next token from the source
    pub fn next_token(&mut self, goal: LexGoal) -> ParseResult<Token> {
        let newline_before = self.skip_trivia()?;
        self.scan(goal, newline_before)
    }

    /// Scan `token` again from its first character under a different goal.
    ///
    /// Used when the parser finds a `/` or `/=` where an expression starts,
    /// or the `}` that ends a template substitution.
    pub fn rescan(&mut self, token: &Token, goal: LexGoal) -> ParseResult<Token> {
        self.position = token.start;
        self.line = token.line;
        self.line_start = token.start - token.column as usize;
        self.scan(goal, token.newline_before)
    }

    fn scan(&mut self, goal: LexGoal, newline_before: bool) -> ParseResult<Token> {
        self.escaped = false;
        self.legacy_octal = false;
        self.lone_surrogate = false;

        let start = self.position;
        let line = self.line;
        let column = (start - self.line_start) as u32;

        let kind = match self.peek() {
            None => TokenKind::Eof,
            Some('/') if goal == LexGoal::RegExp => self.scan_regexp(start)?,
            Some('}') if goal == LexGoal::TemplateTail => {
                self.position += 1;
                self.scan_template_part(start)?
            }
            Some(ch) => self.scan_token(start, ch)?,
        };

        Ok(Token {
            kind,
            start,
            end: self.position,
            line,
            column,
            newline_before,
            escaped: self.escaped,
            legacy_octal: self.legacy_octal,
            lone_surrogate: self.lone_surrogate,
        })
    }

    fn scan_token(&mut self, start: usize, ch: char) -> ParseResult<TokenKind> {
        use Punctuator as P;

        if ch.is_ascii_digit() {
            return self.scan_number(start);
        }
        if ch == '\\' || is_id_start(ch) {
            return self.scan_identifier();
        }

        self.position += ch.len_utf8();
        let punctuator = match ch {
            '(' => P::LParen,
            ')' => P::RParen,
            '{' => P::LBrace,
            '}' => P::RBrace,
            '[' => P::LBracket,
            ']' => P::RBracket,
            ';' => P::Semicolon,
            ',' => P::Comma,
            ':' => P::Colon,
            '~' => P::Tilde,
            '@' => P::At,
            '"' | '\'' => return self.scan_string(start, ch),
            '`' => return self.scan_template_part(start),
            '#' => return self.scan_private_name(start),

            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.position = start;
                    return self.scan_number(start);
                }
                if self.rest().starts_with("..") {
                    self.position += 2;
                    P::Spread
                } else {
                    P::Dot
                }
            }

            '?' => {
                if self.match_char('?') {
                    if self.match_char('=') {
                        P::NullishCoalesceEq
                    } else {
                        P::NullishCoalesce
                    }
                } else if self.peek() == Some('.')
                    && !self.peek_next().is_some_and(|c| c.is_ascii_digit())
                {
                    // `a?.5:b` is a conditional, not an optional chain
                    self.position += 1;
                    P::OptionalChain
                } else {
                    P::Question
                }
            }

            '=' => {
                if self.match_char('>') {
                    P::Arrow
                } else if self.match_char('=') {
                    if self.match_char('=') {
                        P::EqEqEq
                    } else {
                        P::EqEq
                    }
                } else {
                    P::Assign
                }
            }

            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        P::NotEqEq
                    } else {
                        P::NotEq
                    }
                } else {
                    P::Not
                }
            }

            '+' => {
                if self.match_char('+') {
                    P::PlusPlus
                } else if self.match_char('=') {
                    P::PlusEq
                } else {
                    P::Plus
                }
            }

            '-' => {
                if self.match_char('-') {
                    P::MinusMinus
                } else if self.match_char('=') {
                    P::MinusEq
                } else {
                    P::Minus
                }
            }

            '*' => {
                if self.match_char('*') {
                    if self.match_char('=') {
                        P::StarStarEq
                    } else {
                        P::StarStar
                    }
                } else if self.match_char('=') {
                    P::StarEq
                } else {
                    P::Star
                }
            }

            '/' => {
                if self.match_char('=') {
                    P::SlashEq
                } else {
                    P::Slash
                }
            }

            '%' => {
                if self.match_char('=') {
                    P::PercentEq
                } else {
                    P::Percent
                }
            }

            '<' => {
                if self.match_char('<') {
                    if self.match_char('=') {
                        P::LtLtEq
                    } else {
                        P::LtLt
                    }
                } else if self.match_char('=') {
                    P::LtEq
                } else {
                    P::Lt
                }
            }

            '>' => {
                if self.match_char('>') {
                    if self.match_char('>') {
                        if self.match_char('=') {
                            P::GtGtGtEq
                        } else {
                            P::GtGtGt
                        }
                    } else if self.match_char('=') {
                        P::GtGtEq
                    } else {
                        P::GtGt
                    }
                } else if self.match_char('=') {
                    P::GtEq
                } else {
                    P::Gt
                }
            }

            '&' => {
                if self.match_char('&') {
                    if self.match_char('=') {
                        P::AndAndEq
                    } else {
                        P::AndAnd
                    }
                } else if self.match_char('=') {
                    P::AndEq
                } else {
                    P::And
                }
            }

            '|' => {
                if self.match_char('|') {
                    if self.match_char('=') {
                        P::OrOrEq
                    } else {
                        P::OrOr
                    }
                } else if self.match_char('=') {
                    P::OrEq
                } else {
                    P::Or
                }
            }

            '^' => {
                if self.match_char('=') {
                    P::XorEq
                } else {
                    P::Xor
                }
            }

            other => {
                return Err(self.error(start, format!("Unexpected character '{}'", other)));
            }
        };

        Ok(TokenKind::Punctuator(punctuator))
    }

    fn scan_identifier(&mut self) -> ParseResult<TokenKind> {
        let name = self.scan_identifier_name()?;
        match Keyword::lookup(&name) {
            Some(keyword) => Ok(TokenKind::Keyword(keyword)),
            None => Ok(TokenKind::Identifier(name)),
        }
    }

    fn scan_private_name(&mut self, start: usize) -> ParseResult<TokenKind> {
        match self.peek() {
            Some(ch) if ch == '\\' || is_id_start(ch) => {
                let name = self.scan_identifier_name()?;
                Ok(TokenKind::PrivateName(name))
            }
            _ => Err(self.error(start, "Unexpected character '#'")),
        }
    }

    /// IdentifierName, decoding `\u` escapes.
    fn scan_identifier_name(&mut self) -> ParseResult<String> {
        let mut name = String::new();
        let mut first = true;

        while let Some(ch) = self.peek() {
            if ch == '\\' {
                let escape_start = self.position;
                self.position += 1;
                if !self.match_char('u') {
                    return Err(self.error(escape_start, "Expecting Unicode escape sequence \\uXXXX"));
                }
                let decoded = self
                    .read_unicode_escape()
                    .and_then(char::from_u32)
                    .filter(|c| if first { is_id_start(*c) } else { is_id_continue(*c) });
                match decoded {
                    Some(c) => name.push(c),
                    None => return Err(self.error(escape_start, "Invalid Unicode escape")),
                }
                self.escaped = true;
            } else if (first && is_id_start(ch)) || (!first && is_id_continue(ch)) {
                name.push(ch);
                self.position += ch.len_utf8();
            } else {
                break;
            }
            first = false;
        }

        Ok(name)
    }

    /// Skips whitespace and comments; reports whether a line terminator
    /// was crossed.
    fn skip_trivia(&mut self) -> ParseResult<bool> {
        let trivia_start = self.position;
        let mut newline = false;

        if self.position == 0 && self.source.starts_with("#!") {
            self.skip_line_comment();
        }

        while let Some(ch) = self.peek() {
            match ch {
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.position += ch.len_utf8();
                    self.consume_newline(ch);
                    newline = true;
                }
                '/' => match self.peek_next() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => {
                        if self.skip_block_comment()? {
                            newline = true;
                        }
                    }
                    _ => break,
                },
                '<' if self.html_comments() && self.rest().starts_with("<!--") => {
                    self.skip_line_comment();
                }
                '-' if self.html_comments()
                    && (newline || trivia_start == 0)
                    && self.rest().starts_with("-->") =>
                {
                    self.skip_line_comment();
                }
                c if is_whitespace(c) => self.position += c.len_utf8(),
                _ => break,
            }
        }

        Ok(newline)
    }

    fn html_comments(&self) -> bool {
        !self.module && self.web_compat
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if is_line_terminator(ch) {
                break;
            }
            self.position += ch.len_utf8();
        }
    }

    /// Returns true when the comment spans a line terminator.
    fn skip_block_comment(&mut self) -> ParseResult<bool> {
        let start = self.position;
        self.position += 2;
        let mut newline = false;
        loop {
            match self.peek() {
                None => return Err(self.error(start, "Unterminated comment")),
                Some('*') if self.peek_next() == Some('/') => {
                    self.position += 2;
                    return Ok(newline);
                }
                Some(ch) => {
                    self.position += ch.len_utf8();
                    if is_line_terminator(ch) {
                        self.consume_newline(ch);
                        newline = true;
                    }
                }
            }
        }
    }

    /// Bookkeeping after a line terminator `ch` has been consumed.
    fn consume_newline(&mut self, ch: char) {
        if ch == '\r' && self.peek() == Some('\n') {
            self.position += 1;
        }
        self.line += 1;
        self.line_start = self.position;
    }

    fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        lexical_error(self.source, offset, message)
    }
}
