//! Numeric, string, template and regular expression literals

use super::chars::{is_id_continue, is_id_start, is_line_terminator};
use super::{Lexer, TemplatePart, TokenKind};
use core_types::ParseResult;
use num_bigint::{BigInt, BigUint};
use num_traits::{Num, ToPrimitive};

/// Result of decoding one backslash escape.
enum Escape {
    Char(char),
    LineContinuation,
    /// Malformed escape at the given offset
    Invalid(usize, &'static str),
}

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, start: usize) -> ParseResult<TokenKind> {
        let bytes = self.source.as_bytes();
        if bytes[start] == b'0' {
            match bytes.get(start + 1) {
                Some(b'x' | b'X') => return self.scan_radix_number(start, 16),
                Some(b'o' | b'O') => return self.scan_radix_number(start, 8),
                Some(b'b' | b'B') => return self.scan_radix_number(start, 2),
                Some(b'0'..=b'9') => return self.scan_legacy_octal(start),
                Some(b'_') => {
                    return Err(self.error(
                        start + 1,
                        "Numeric separator can not be used after leading 0",
                    ));
                }
                _ => {}
            }
        }

        if bytes[start] != b'.' {
            self.scan_digits(10)?;
        }
        self.scan_decimal_tail(start, true)
    }

    /// Fraction, exponent and BigInt suffix of a decimal literal.
    fn scan_decimal_tail(&mut self, start: usize, allow_bigint: bool) -> ParseResult<TokenKind> {
        let mut is_integer = true;

        if self.match_char('.') {
            is_integer = false;
            if self.peek() == Some('_') {
                return Err(self.error(self.position, "Numeric separator is not allowed here"));
            }
            self.scan_digits(10)?;
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_integer = false;
            self.position += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.position += 1;
            }
            if !self.scan_digits(10)? {
                return Err(self.error(start, "Invalid number"));
            }
        }

        if self.peek() == Some('n') {
            if !is_integer || !allow_bigint {
                return Err(self.error(start, "Invalid BigInt literal"));
            }
            let digits = self.source[start..self.position].replace('_', "");
            self.position += 1;
            self.check_after_number()?;
            let value = BigInt::from_str_radix(&digits, 10)
                .map_err(|_| self.error(start, "Invalid BigInt literal"))?;
            return Ok(TokenKind::BigInt(value));
        }

        self.check_after_number()?;
        let text = self.source[start..self.position].replace('_', "");
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error(start, "Invalid number"))?;
        Ok(TokenKind::Number(value))
    }

    fn scan_radix_number(&mut self, start: usize, radix: u32) -> ParseResult<TokenKind> {
        self.position = start + 2;
        let digits_start = self.position;
        if !self.scan_digits(radix)? {
            return Err(self.error(start, format!("Expected number in radix {}", radix)));
        }
        let digits = self.source[digits_start..self.position].replace('_', "");

        if self.match_char('n') {
            self.check_after_number()?;
            let value = BigInt::from_str_radix(&digits, radix)
                .map_err(|_| self.error(start, "Invalid BigInt literal"))?;
            return Ok(TokenKind::BigInt(value));
        }

        self.check_after_number()?;
        Ok(TokenKind::Number(radix_value(&digits, radix)))
    }

    /// `07` (legacy octal) or `08` (decimal with a leading zero); both are
    /// flagged for the strict-mode check in the parser.
    fn scan_legacy_octal(&mut self, start: usize) -> ParseResult<TokenKind> {
        self.position = start + 1;
        let mut octal = true;
        while let Some(ch) = self.peek() {
            match ch {
                '0'..='7' => {}
                '8' | '9' => octal = false,
                '_' => {
                    return Err(self.error(
                        self.position,
                        "Numeric separator can not be used after leading 0",
                    ));
                }
                _ => break,
            }
            self.position += 1;
        }
        self.legacy_octal = true;

        if octal {
            if self.peek() == Some('n') {
                return Err(self.error(start, "Invalid BigInt literal"));
            }
            self.check_after_number()?;
            let digits = &self.source[start + 1..self.position];
            return Ok(TokenKind::Number(radix_value(digits, 8)));
        }

        self.scan_decimal_tail(start, false)
    }

    /// Digits with numeric separators; returns whether any digit was read.
    fn scan_digits(&mut self, radix: u32) -> ParseResult<bool> {
        let mut any = false;
        let mut last_was_digit = false;
        while let Some(ch) = self.peek() {
            if ch == '_' {
                if !last_was_digit {
                    return Err(self.error(self.position, "Numeric separator is not allowed here"));
                }
                last_was_digit = false;
            } else if ch.is_digit(radix) {
                last_was_digit = true;
                any = true;
            } else {
                break;
            }
            self.position += 1;
        }
        if any && !last_was_digit {
            return Err(self.error(
                self.position - 1,
                "Numeric separators are not allowed at the end of numeric literals",
            ));
        }
        Ok(any)
    }

    fn check_after_number(&self) -> ParseResult<()> {
        match self.peek() {
            Some(ch) if ch == '\\' || ch.is_ascii_digit() || is_id_start(ch) => {
                Err(self.error(self.position, "Identifier directly after number"))
            }
            _ => Ok(()),
        }
    }

    pub(super) fn scan_string(&mut self, start: usize, quote: char) -> ParseResult<TokenKind> {
        let mut value = String::new();
        let mut chunk_start = self.position;

        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.error(start, "Unterminated string constant"));
                }
                Some(ch) if ch == quote => {
                    value.push_str(&self.source[chunk_start..self.position]);
                    self.position += 1;
                    return Ok(TokenKind::String(value));
                }
                Some('\\') => {
                    value.push_str(&self.source[chunk_start..self.position]);
                    match self.read_escape(false)? {
                        Escape::Char(c) => value.push(c),
                        Escape::LineContinuation => {}
                        Escape::Invalid(offset, message) => return Err(self.error(offset, message)),
                    }
                    chunk_start = self.position;
                }
                Some(ch) => {
                    self.position += ch.len_utf8();
                    // LS and PS are allowed in string literals
                    if is_line_terminator(ch) {
                        self.consume_newline(ch);
                    }
                }
            }
        }
    }

    /// Reads template characters after a backtick or a substitution's `}`
    /// up to and including the next `${` or closing backtick.
    pub(super) fn scan_template_part(&mut self, start: usize) -> ParseResult<TokenKind> {
        let content_start = self.position;
        let mut cooked = String::new();
        let mut invalid_escape = None;

        let (content_end, tail) = loop {
            match self.peek() {
                None => return Err(self.error(start, "Unterminated template")),
                Some('`') => {
                    let end = self.position;
                    self.position += 1;
                    break (end, true);
                }
                Some('$') if self.peek_next() == Some('{') => {
                    let end = self.position;
                    self.position += 2;
                    break (end, false);
                }
                Some('\\') => match self.read_escape(true)? {
                    Escape::Char(c) => cooked.push(c),
                    Escape::LineContinuation => {}
                    Escape::Invalid(offset, _) => {
                        invalid_escape.get_or_insert(offset);
                    }
                },
                Some(ch) => {
                    self.position += ch.len_utf8();
                    if is_line_terminator(ch) {
                        self.consume_newline(ch);
                        cooked.push(if ch == '\r' { '\n' } else { ch });
                    } else {
                        cooked.push(ch);
                    }
                }
            }
        };

        let raw = normalize_line_endings(&self.source[content_start..content_end]);
        Ok(TokenKind::Template(Box::new(TemplatePart {
            cooked: if invalid_escape.is_some() { None } else { Some(cooked) },
            raw,
            tail,
            invalid_escape,
        })))
    }

    pub(super) fn scan_regexp(&mut self, start: usize) -> ParseResult<TokenKind> {
        self.position = start + 1;
        let mut in_class = false;
        let mut escaped = false;

        loop {
            let ch = match self.peek() {
                Some(ch) if !is_line_terminator(ch) => ch,
                _ => return Err(self.error(start, "Unterminated regular expression")),
            };
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '[' {
                in_class = true;
            } else if ch == ']' && in_class {
                in_class = false;
            } else if ch == '/' && !in_class {
                break;
            }
            self.position += ch.len_utf8();
        }

        let pattern = self.source[start + 1..self.position].to_string();
        self.position += 1;

        let flags_start = self.position;
        while let Some(ch) = self.peek() {
            if ch == '\\' {
                return Err(self.error(self.position, "Invalid regular expression flag"));
            }
            if !is_id_continue(ch) {
                break;
            }
            self.position += ch.len_utf8();
        }
        let flags = self.source[flags_start..self.position].to_string();
        validate_regexp_flags(&flags).map_err(|_| self.error(start, "Invalid regular expression flag"))?;

        Ok(TokenKind::RegExp { pattern, flags })
    }

    /// Decodes the escape starting at the current `\`.
    fn read_escape(&mut self, in_template: bool) -> ParseResult<Escape> {
        let escape_start = self.position;
        self.position += 1;

        let Some(ch) = self.peek() else {
            let message = if in_template {
                "Unterminated template"
            } else {
                "Unterminated string constant"
            };
            return Err(self.error(escape_start, message));
        };
        self.position += ch.len_utf8();

        let escape = match ch {
            'n' => Escape::Char('\n'),
            't' => Escape::Char('\t'),
            'r' => Escape::Char('\r'),
            'b' => Escape::Char('\u{0008}'),
            'f' => Escape::Char('\u{000C}'),
            'v' => Escape::Char('\u{000B}'),
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                self.consume_newline(ch);
                Escape::LineContinuation
            }
            'x' => match self.read_hex_digits(2).and_then(char::from_u32) {
                Some(c) => Escape::Char(c),
                None => Escape::Invalid(escape_start, "Bad character escape sequence"),
            },
            'u' => match self.read_unicode_escape() {
                Some(code) => Escape::Char(self.combine_surrogates(code)),
                None => Escape::Invalid(escape_start, "Bad character escape sequence"),
            },
            '0' if !self.peek().is_some_and(|c| c.is_ascii_digit()) => Escape::Char('\0'),
            '0'..='7' if in_template => {
                Escape::Invalid(escape_start, "Octal literal in template string")
            }
            '0' => {
                // `\08`, `\09`: NUL followed by a digit, still legacy
                if self.peek().is_some_and(|c| matches!(c, '8' | '9')) {
                    self.legacy_octal = true;
                    Escape::Char('\0')
                } else {
                    self.read_legacy_octal_escape(0)
                }
            }
            '1'..='7' => self.read_legacy_octal_escape(ch as u32 - '0' as u32),
            '8' | '9' if in_template => {
                Escape::Invalid(escape_start, "Invalid escape sequence in template string")
            }
            '8' | '9' => {
                self.legacy_octal = true;
                Escape::Char(ch)
            }
            other => Escape::Char(other),
        };
        Ok(escape)
    }

    /// Up to three octal digits, value at most 0o377.
    fn read_legacy_octal_escape(&mut self, first: u32) -> Escape {
        self.legacy_octal = true;
        let mut value = first;
        let max_digits = if first <= 3 { 2 } else { 1 };
        for _ in 0..max_digits {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(digit) => {
                    value = value * 8 + digit;
                    self.position += 1;
                }
                None => break,
            }
        }
        Escape::Char(char::from_u32(value).unwrap_or('\u{FFFD}'))
    }

    /// Body of a `\u` escape (after the `u`): `XXXX` or `{X...}`.
    pub(super) fn read_unicode_escape(&mut self) -> Option<u32> {
        if self.match_char('{') {
            let mut value: u32 = 0;
            let mut any = false;
            while let Some(digit) = self.peek().and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(digit);
                any = true;
                self.position += 1;
            }
            if !any || !self.match_char('}') {
                return None;
            }
            (value <= 0x10FFFF).then_some(value)
        } else {
            self.read_hex_digits(4)
        }
    }

    fn read_hex_digits(&mut self, count: usize) -> Option<u32> {
        let digits = self.source.get(self.position..self.position + count)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        self.position += count;
        u32::from_str_radix(digits, 16).ok()
    }

    /// Joins `😀` pairs; a lone surrogate becomes U+FFFD since
    /// Rust strings cannot hold it.
    fn combine_surrogates(&mut self, code: u32) -> char {
        if (0xD800..=0xDBFF).contains(&code) && self.source[self.position..].starts_with("\\u") {
            let saved = self.position;
            self.position += 2;
            match self.read_hex_digits(4) {
                Some(low) if (0xDC00..=0xDFFF).contains(&low) => {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).unwrap_or('\u{FFFD}');
                }
                _ => self.position = saved,
            }
        }
        if (0xD800..=0xDFFF).contains(&code) {
            self.lone_surrogate = true;
        }
        char::from_u32(code).unwrap_or('\u{FFFD}')
    }
}

/// Value of an integer literal in `radix`, rounded like `Number()` does.
fn radix_value(digits: &str, radix: u32) -> f64 {
    BigUint::from_str_radix(digits, radix)
        .ok()
        .and_then(|value| value.to_f64())
        .unwrap_or(f64::INFINITY)
}

fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Flags must come from `dgimsuyv`, without repeats, and `u`/`v` exclude
/// each other.
pub fn validate_regexp_flags(flags: &str) -> Result<(), char> {
    let mut seen = String::new();
    for flag in flags.chars() {
        if !"dgimsuyv".contains(flag) || seen.contains(flag) {
            return Err(flag);
        }
        seen.push(flag);
    }
    if seen.contains('u') && seen.contains('v') {
        return Err('v');
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::{LexGoal, Lexer, TokenKind};
    use super::validate_regexp_flags;
    use num_bigint::BigInt;

    fn token(source: &str) -> super::super::Token {
        Lexer::new(source).next_token(LexGoal::Div).unwrap()
    }

    fn number(source: &str) -> f64 {
        match token(source).kind {
            TokenKind::Number(value) => value,
            other => panic!("expected number, got {:?}", other),
        }
    }

    fn string(source: &str) -> String {
        match token(source).kind {
            TokenKind::String(value) => value,
            other => panic!("expected string, got {:?}", other),
        }
    }

    fn error(source: &str) -> String {
        Lexer::new(source)
            .next_token(LexGoal::Div)
            .unwrap_err()
            .message
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(number("123.45"), 123.45);
        assert_eq!(number(".5"), 0.5);
        assert_eq!(number("5."), 5.0);
        assert_eq!(number("1e3"), 1000.0);
        assert_eq!(number("2E-2"), 0.02);
    }

    #[test]
    fn test_radix_numbers() {
        assert_eq!(number("0xFF"), 255.0);
        assert_eq!(number("0o17"), 15.0);
        assert_eq!(number("0b101"), 5.0);
        assert_eq!(number("0x1_0"), 16.0);
    }

    #[test]
    fn test_legacy_octal_and_leading_zero_decimal() {
        let octal = token("017");
        assert_eq!(octal.kind, TokenKind::Number(15.0));
        assert!(octal.legacy_octal);

        let decimal = token("089");
        assert_eq!(decimal.kind, TokenKind::Number(89.0));
        assert!(decimal.legacy_octal);

        assert_eq!(number("08.5"), 8.5);
        assert!(!token("0.5").legacy_octal);
    }

    #[test]
    fn test_numeric_separators() {
        assert_eq!(number("1_000_000"), 1_000_000.0);
        assert_eq!(number("1_0.2_5e1_0"), 10.25e10);
        assert_eq!(error("1__0"), "Numeric separator is not allowed here");
        assert_eq!(
            error("1_"),
            "Numeric separators are not allowed at the end of numeric literals"
        );
        assert_eq!(error("1._5"), "Numeric separator is not allowed here");
        assert_eq!(error("0x_1"), "Numeric separator is not allowed here");
        assert_eq!(error("0_1"), "Numeric separator can not be used after leading 0");
        assert_eq!(error("07_1"), "Numeric separator can not be used after leading 0");
    }

    #[test]
    fn test_bigint_literals() {
        assert_eq!(token("123n").kind, TokenKind::BigInt(BigInt::from(123)));
        assert_eq!(token("0x10n").kind, TokenKind::BigInt(BigInt::from(16)));
        assert_eq!(token("0b11n").kind, TokenKind::BigInt(BigInt::from(3)));
        assert_eq!(error("1.5n"), "Invalid BigInt literal");
        assert_eq!(error("1e3n"), "Invalid BigInt literal");
        assert_eq!(error("017n"), "Invalid BigInt literal");
        assert_eq!(error("09n"), "Invalid BigInt literal");
    }

    #[test]
    fn test_identifier_after_number() {
        assert_eq!(error("3in"), "Identifier directly after number");
        assert_eq!(error("0x1g"), "Identifier directly after number");
    }

    #[test]
    fn test_large_hex_rounds() {
        assert_eq!(number("0x20000000000001"), 9007199254740992.0);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(string(r#""a\nb""#), "a\nb");
        assert_eq!(string(r"'\x41B\u{43}'"), "ABC");
        assert_eq!(string(r"'😀'"), "😀");
        assert_eq!(string(r"'\q'"), "q");
        assert_eq!(string("'a\\\nb'"), "ab");
        assert_eq!(string(r"'\0'"), "\0");
    }

    #[test]
    fn test_string_lone_surrogate_is_replaced() {
        assert_eq!(string(r"'\uD800'"), "\u{FFFD}");
        assert!(token(r"'\uD800'").lone_surrogate);
        assert!(token(r"'\u{DC00}x'").lone_surrogate);
        assert!(!token(r"'\uD83D\uDE00'").lone_surrogate);
        assert!(!token("'\u{FFFD}'").lone_surrogate);
    }

    #[test]
    fn test_string_legacy_octal_escape_is_flagged() {
        let octal = token(r"'\101'");
        assert_eq!(octal.kind, TokenKind::String("A".to_string()));
        assert!(octal.legacy_octal);
        assert!(token(r"'\8'").legacy_octal);
        assert!(token(r"'\08'").legacy_octal);
        assert!(!token(r"'\0'").legacy_octal);
    }

    #[test]
    fn test_string_errors() {
        assert_eq!(error("'abc"), "Unterminated string constant");
        assert_eq!(error("'a\nb'"), "Unterminated string constant");
        assert_eq!(error(r"'\x4'"), "Bad character escape sequence");
        assert_eq!(error(r"'\u{110000}'"), "Bad character escape sequence");
    }

    #[test]
    fn test_string_allows_line_separator() {
        assert_eq!(string("'a\u{2028}b'"), "a\u{2028}b");
    }

    #[test]
    fn test_template_invalid_escape_has_no_cooked_value() {
        match token(r"`\unicode`").kind {
            TokenKind::Template(part) => {
                assert!(part.cooked.is_none());
                assert_eq!(part.raw, r"\unicode");
                assert_eq!(part.invalid_escape, Some(1));
            }
            other => panic!("expected template, got {:?}", other),
        }
    }

    #[test]
    fn test_template_raw_normalizes_carriage_returns() {
        match token("`a\r\nb\rc`").kind {
            TokenKind::Template(part) => {
                assert_eq!(part.raw, "a\nb\nc");
                assert_eq!(part.cooked.as_deref(), Some("a\nb\nc"));
                assert!(part.tail);
            }
            other => panic!("expected template, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_template() {
        assert_eq!(error("`abc"), "Unterminated template");
    }

    #[test]
    fn test_regexp_errors() {
        let mut lexer = Lexer::new("/abc");
        assert_eq!(
            lexer.next_token(LexGoal::RegExp).unwrap_err().message,
            "Unterminated regular expression"
        );
        let mut lexer = Lexer::new("/a/gg");
        assert_eq!(
            lexer.next_token(LexGoal::RegExp).unwrap_err().message,
            "Invalid regular expression flag"
        );
    }

    #[test]
    fn test_regexp_flag_rules() {
        assert!(validate_regexp_flags("dgimsuy").is_ok());
        assert!(validate_regexp_flags("v").is_ok());
        assert_eq!(validate_regexp_flags("uv"), Err('v'));
        assert_eq!(validate_regexp_flags("gx"), Err('x'));
        assert_eq!(validate_regexp_flags("ii"), Err('i'));
    }
}
