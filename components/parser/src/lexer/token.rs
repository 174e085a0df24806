//! Token definitions produced by the lexer

use num_bigint::BigInt;
use std::fmt;

/// ECMAScript reserved words
///
/// Contextual words (`let`, `static`, `async`, `of`, `get`, `set`, ...) are
/// lexed as identifiers; the parser gives them meaning by position.
/// `await` and `yield` are listed here but are valid identifiers in some
/// contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// await keyword
    Await,
    /// break keyword
    Break,
    /// case keyword
    Case,
    /// catch keyword
    Catch,
    /// class keyword
    Class,
    /// const keyword
    Const,
    /// continue keyword
    Continue,
    /// debugger keyword
    Debugger,
    /// default keyword
    Default,
    /// delete keyword
    Delete,
    /// do keyword
    Do,
    /// else keyword
    Else,
    /// enum keyword
    Enum,
    /// export keyword
    Export,
    /// extends keyword
    Extends,
    /// false keyword
    False,
    /// finally keyword
    Finally,
    /// for keyword
    For,
    /// function keyword
    Function,
    /// if keyword
    If,
    /// import keyword
    Import,
    /// in keyword
    In,
    /// instanceof keyword
    Instanceof,
    /// new keyword
    New,
    /// null keyword
    Null,
    /// return keyword
    Return,
    /// super keyword
    Super,
    /// switch keyword
    Switch,
    /// this keyword
    This,
    /// throw keyword
    Throw,
    /// true keyword
    True,
    /// try keyword
    Try,
    /// typeof keyword
    Typeof,
    /// var keyword
    Var,
    /// void keyword
    Void,
    /// while keyword
    While,
    /// with keyword
    With,
    /// yield keyword
    Yield,
}

impl Keyword {
    /// Looks up a reserved word by its source spelling.
    pub fn lookup(name: &str) -> Option<Keyword> {
        let keyword = match name {
            "await" => Keyword::Await,
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "catch" => Keyword::Catch,
            "class" => Keyword::Class,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "debugger" => Keyword::Debugger,
            "default" => Keyword::Default,
            "delete" => Keyword::Delete,
            "do" => Keyword::Do,
            "else" => Keyword::Else,
            "enum" => Keyword::Enum,
            "export" => Keyword::Export,
            "extends" => Keyword::Extends,
            "false" => Keyword::False,
            "finally" => Keyword::Finally,
            "for" => Keyword::For,
            "function" => Keyword::Function,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "in" => Keyword::In,
            "instanceof" => Keyword::Instanceof,
            "new" => Keyword::New,
            "null" => Keyword::Null,
            "return" => Keyword::Return,
            "super" => Keyword::Super,
            "switch" => Keyword::Switch,
            "this" => Keyword::This,
            "throw" => Keyword::Throw,
            "true" => Keyword::True,
            "try" => Keyword::Try,
            "typeof" => Keyword::Typeof,
            "var" => Keyword::Var,
            "void" => Keyword::Void,
            "while" => Keyword::While,
            "with" => Keyword::With,
            "yield" => Keyword::Yield,
            _ => return None,
        };
        Some(keyword)
    }

    /// Source spelling of the keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Await => "await",
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Debugger => "debugger",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Enum => "enum",
            Keyword::Export => "export",
            Keyword::Extends => "extends",
            Keyword::False => "false",
            Keyword::Finally => "finally",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Instanceof => "instanceof",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Return => "return",
            Keyword::Super => "super",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Var => "var",
            Keyword::Void => "void",
            Keyword::While => "while",
            Keyword::With => "with",
            Keyword::Yield => "yield",
        }
    }
}

/// Words reserved only in strict mode code.
pub fn is_strict_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "implements"
            | "interface"
            | "let"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "static"
            | "yield"
    )
}

/// JavaScript punctuators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuator {
    /// (
    LParen,
    /// )
    RParen,
    /// {
    LBrace,
    /// }
    RBrace,
    /// [
    LBracket,
    /// ]
    RBracket,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// .
    Dot,
    /// ...
    Spread,
    /// ?.
    OptionalChain,
    /// :
    Colon,
    /// ?
    Question,
    /// @
    At,
    /// =
    Assign,
    /// =>
    Arrow,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// **
    StarStar,
    /// ==
    EqEq,
    /// ===
    EqEqEq,
    /// !=
    NotEq,
    /// !==
    NotEqEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// &&
    AndAnd,
    /// ||
    OrOr,
    /// ??
    NullishCoalesce,
    /// !
    Not,
    /// &
    And,
    /// |
    Or,
    /// ^
    Xor,
    /// ~
    Tilde,
    /// <<
    LtLt,
    /// >>
    GtGt,
    /// >>>
    GtGtGt,
    /// +=
    PlusEq,
    /// -=
    MinusEq,
    /// *=
    StarEq,
    /// /=
    SlashEq,
    /// %=
    PercentEq,
    /// **=
    StarStarEq,
    /// &=
    AndEq,
    /// |=
    OrEq,
    /// ^=
    XorEq,
    /// <<=
    LtLtEq,
    /// >>=
    GtGtEq,
    /// >>>=
    GtGtGtEq,
    /// &&=
    AndAndEq,
    /// ||=
    OrOrEq,
    /// ??=
    NullishCoalesceEq,
    /// ++
    PlusPlus,
    /// --
    MinusMinus,
}

impl Punctuator {
    /// Source spelling of the punctuator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuator::LParen => "(",
            Punctuator::RParen => ")",
            Punctuator::LBrace => "{",
            Punctuator::RBrace => "}",
            Punctuator::LBracket => "[",
            Punctuator::RBracket => "]",
            Punctuator::Semicolon => ";",
            Punctuator::Comma => ",",
            Punctuator::Dot => ".",
            Punctuator::Spread => "...",
            Punctuator::OptionalChain => "?.",
            Punctuator::Colon => ":",
            Punctuator::Question => "?",
            Punctuator::At => "@",
            Punctuator::Assign => "=",
            Punctuator::Arrow => "=>",
            Punctuator::Plus => "+",
            Punctuator::Minus => "-",
            Punctuator::Star => "*",
            Punctuator::Slash => "/",
            Punctuator::Percent => "%",
            Punctuator::StarStar => "**",
            Punctuator::EqEq => "==",
            Punctuator::EqEqEq => "===",
            Punctuator::NotEq => "!=",
            Punctuator::NotEqEq => "!==",
            Punctuator::Lt => "<",
            Punctuator::LtEq => "<=",
            Punctuator::Gt => ">",
            Punctuator::GtEq => ">=",
            Punctuator::AndAnd => "&&",
            Punctuator::OrOr => "||",
            Punctuator::NullishCoalesce => "??",
            Punctuator::Not => "!",
            Punctuator::And => "&",
            Punctuator::Or => "|",
            Punctuator::Xor => "^",
            Punctuator::Tilde => "~",
            Punctuator::LtLt => "<<",
            Punctuator::GtGt => ">>",
            Punctuator::GtGtGt => ">>>",
            Punctuator::PlusEq => "+=",
            Punctuator::MinusEq => "-=",
            Punctuator::StarEq => "*=",
            Punctuator::SlashEq => "/=",
            Punctuator::PercentEq => "%=",
            Punctuator::StarStarEq => "**=",
            Punctuator::AndEq => "&=",
            Punctuator::OrEq => "|=",
            Punctuator::XorEq => "^=",
            Punctuator::LtLtEq => "<<=",
            Punctuator::GtGtEq => ">>=",
            Punctuator::GtGtGtEq => ">>>=",
            Punctuator::AndAndEq => "&&=",
            Punctuator::OrOrEq => "||=",
            Punctuator::NullishCoalesceEq => "??=",
            Punctuator::PlusPlus => "++",
            Punctuator::MinusMinus => "--",
        }
    }

    /// True for `=` and every compound assignment operator.
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            Punctuator::Assign
                | Punctuator::PlusEq
                | Punctuator::MinusEq
                | Punctuator::StarEq
                | Punctuator::SlashEq
                | Punctuator::PercentEq
                | Punctuator::StarStarEq
                | Punctuator::AndEq
                | Punctuator::OrEq
                | Punctuator::XorEq
                | Punctuator::LtLtEq
                | Punctuator::GtGtEq
                | Punctuator::GtGtGtEq
                | Punctuator::AndAndEq
                | Punctuator::OrOrEq
                | Punctuator::NullishCoalesceEq
        )
    }
}

/// One piece of a template literal, from a backtick or `}` to the next
/// `${` or closing backtick.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePart {
    /// Escape-decoded text; `None` when an escape is malformed
    pub cooked: Option<String>,
    /// Source text with CR and CRLF normalized to LF
    pub raw: String,
    /// True when the part ends the template
    pub tail: bool,
    /// Offset of the first malformed escape
    pub invalid_escape: Option<usize>,
}

/// Token categories with their decoded values
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier name that is not a reserved word
    Identifier(String),
    /// Reserved word
    Keyword(Keyword),
    /// `#name`
    PrivateName(String),
    /// Operator or delimiter
    Punctuator(Punctuator),
    /// Numeric literal value
    Number(f64),
    /// BigInt literal value
    BigInt(BigInt),
    /// String literal, escapes decoded
    String(String),
    /// Template literal part
    Template(Box<TemplatePart>),
    /// Regular expression literal
    RegExp {
        /// Body between the slashes
        pattern: String,
        /// Flag characters
        flags: String,
    },
    /// End of input
    Eof,
}

/// A token with its source range and layout flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Category and decoded value
    pub kind: TokenKind,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset just past the last character
    pub end: usize,
    /// Line of the first character (1-based)
    pub line: u32,
    /// Byte column of the first character (0-based)
    pub column: u32,
    /// A line terminator appeared between the previous token and this one
    pub newline_before: bool,
    /// An identifier or keyword spelled with `\u` escapes
    pub escaped: bool,
    /// A legacy octal number, `08`-style decimal, or a string with an
    /// octal or `\8`/`\9` escape
    pub legacy_octal: bool,
    /// A string whose `\u` escapes left an unpaired surrogate
    pub lone_surrogate: bool,
}

impl Token {
    /// True when the token is the given punctuator.
    pub fn is_punctuator(&self, punctuator: Punctuator) -> bool {
        matches!(self.kind, TokenKind::Punctuator(p) if p == punctuator)
    }

    /// True when the token is the given keyword, however it was spelled.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.kind, TokenKind::Keyword(k) if k == keyword)
    }

    /// True for an unescaped identifier spelled exactly `name`.
    pub fn is_contextual(&self, name: &str) -> bool {
        !self.escaped && matches!(&self.kind, TokenKind::Identifier(n) if n == name)
    }

    /// True at end of input.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// The identifier name of an identifier or keyword token.
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            TokenKind::Keyword(keyword) => Some(keyword.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Keyword(keyword) => write!(f, "keyword '{}'", keyword.as_str()),
            TokenKind::PrivateName(name) => write!(f, "private name '#{}'", name),
            TokenKind::Punctuator(p) => write!(f, "'{}'", p.as_str()),
            TokenKind::Number(_) | TokenKind::BigInt(_) => write!(f, "number"),
            TokenKind::String(_) => write!(f, "string"),
            TokenKind::Template(_) => write!(f, "template"),
            TokenKind::RegExp { .. } => write!(f, "regular expression"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_round_trips() {
        for name in ["await", "enum", "instanceof", "yield", "with"] {
            let keyword = Keyword::lookup(name).unwrap();
            assert_eq!(keyword.as_str(), name);
        }
    }

    #[test]
    fn test_contextual_words_are_not_keywords() {
        for name in ["let", "static", "async", "of", "get", "set", "undefined"] {
            assert!(Keyword::lookup(name).is_none(), "{} should not be reserved", name);
        }
    }

    #[test]
    fn test_strict_reserved_words() {
        assert!(is_strict_reserved_word("implements"));
        assert!(is_strict_reserved_word("let"));
        assert!(!is_strict_reserved_word("await"));
    }

    #[test]
    fn test_assignment_punctuators() {
        assert!(Punctuator::NullishCoalesceEq.is_assignment());
        assert!(Punctuator::Assign.is_assignment());
        assert!(!Punctuator::EqEq.is_assignment());
        assert!(!Punctuator::Arrow.is_assignment());
    }
}
