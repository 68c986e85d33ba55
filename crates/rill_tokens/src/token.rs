//! A lexical token from a source file

use std::fmt::{Debug, Display, Formatter};
use strum::AsRefStr;

/// A lexical token from a source file
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    lexeme: String,
    kind: TokenKind,
    line: usize,
}

impl Token {
    /// Creates a new token
    pub fn new(lexeme: impl Into<String>, kind: TokenKind, line: usize) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            line,
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw text this token was matched from
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The 1-based line this token starts on
    pub fn line(&self) -> usize {
        self.line
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})@{}", self.kind, self.lexeme, self.line)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token(lexeme: '{}', kind: {}, line: {})",
            self.lexeme, self.kind, self.line
        )
    }
}

/// The kind for this token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // reserved words
    Fn,
    Main,
    Let,
    Int,
    Float,
    Char,
    If,
    Else,
    While,
    Println,
    Return,

    Identifier,

    // literals
    IntConst,
    FloatConst,
    CharLiteral,
    FmtString,

    /// (
    LParen,
    /// )
    RParen,
    /// {
    LCurly,
    /// }
    RCurly,
    /// ->
    Arrow,
    Colon,
    SemiColon,
    Comma,

    /// =
    Assign,
    /// ==
    Eq,
    /// !=
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Plus,
    Minus,
    Star,
    Div,
}

impl TokenKind {
    /// Gets the reserved word for a lexeme, if it is one
    pub fn keyword(lexeme: &str) -> Option<Self> {
        let kind = match lexeme {
            "fn" => Self::Fn,
            "main" => Self::Main,
            "let" => Self::Let,
            "int" => Self::Int,
            "float" => Self::Float,
            "char" => Self::Char,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "println" => Self::Println,
            "return" => Self::Return,
            _ => return None,
        };
        Some(kind)
    }

    /// Checks if this is a reserved word
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Fn
                | Self::Main
                | Self::Let
                | Self::Int
                | Self::Float
                | Self::Char
                | Self::If
                | Self::Else
                | Self::While
                | Self::Println
                | Self::Return
        )
    }

    /// A short human readable description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Fn => "'fn'",
            Self::Main => "'main'",
            Self::Let => "'let'",
            Self::Int => "'int'",
            Self::Float => "'float'",
            Self::Char => "'char'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::Println => "'println'",
            Self::Return => "'return'",
            Self::Identifier => "identifier",
            Self::IntConst => "integer constant",
            Self::FloatConst => "float constant",
            Self::CharLiteral => "char literal",
            Self::FmtString => "format string",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LCurly => "'{'",
            Self::RCurly => "'}'",
            Self::Arrow => "'->'",
            Self::Colon => "':'",
            Self::SemiColon => "';'",
            Self::Comma => "','",
            Self::Assign => "'='",
            Self::Eq => "'=='",
            Self::Neq => "'!='",
            Self::Gt => "'>'",
            Self::Gte => "'>='",
            Self::Lt => "'<'",
            Self::Lte => "'<='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Div => "'/'",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
