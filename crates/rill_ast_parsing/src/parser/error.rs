use rill_tokens::{Token, TokenKind};
use std::fmt::{Display, Formatter};

/// Represents an error occurring during parsing.
///
/// The alternate form (`{:#}`) also prints the non terminal stack at the time of the error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub line: usize,
    pub non_terminal_stack: Vec<&'static str>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(kind: ErrorKind, line: usize, non_terminals: Vec<&'static str>) -> Self {
        Self {
            kind,
            line,
            non_terminal_stack: non_terminals,
        }
    }

    /// Whether this is a syntactic or a semantic error
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} error at line {}: {}",
            self.category(),
            self.line,
            self.kind
        )?;
        if f.alternate() && !self.non_terminal_stack.is_empty() {
            writeln!(f)?;
            writeln!(f, "non terminal stack:")?;
            for (idx, non_terminal) in self.non_terminal_stack.iter().enumerate() {
                writeln!(f, "  {}: {}", idx, non_terminal)?;
            }
        }
        Ok(())
    }
}

/// [SyntaxError] kind
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("expected {}, found {}", .expected.describe(), describe_found(.found))]
    ExpectedToken {
        expected: TokenKind,
        found: Option<Token>,
    },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid statement starting with '{}'", .0.lexeme())]
    InvalidStatement(Token),
    #[error("expected an expression, found '{}'", .0.lexeme())]
    InvalidFactor(Token),
    #[error("expected a type, found {}", describe_found(.0))]
    ExpectedType(Option<Token>),
    #[error("expected a function name, found {}", describe_found(.0))]
    ExpectedFunctionName(Option<Token>),
    #[error("unexpected '{}' outside of a function", .0.lexeme())]
    TrailingTokens(Token),
    #[error("undeclared identifier {name:?}")]
    Undeclared { name: String },
    #[error("{name:?} is already declared in this scope at line {previous_line}")]
    Redeclaration { name: String, previous_line: usize },
    #[error("call to undeclared function {name:?}")]
    UndeclaredFunction { name: String },
    #[error("constructs nested more than {limit} rules deep")]
    NestingTooDeep { limit: usize },
}

impl ErrorKind {
    pub fn expected_token(expected: TokenKind, found: impl Into<Option<Token>>) -> Self {
        Self::ExpectedToken {
            expected,
            found: found.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::Undeclared { .. }
            | ErrorKind::Redeclaration { .. }
            | ErrorKind::UndeclaredFunction { .. } => ErrorCategory::Semantic,
            _ => ErrorCategory::Syntactic,
        }
    }
}

fn describe_found(token: &Option<Token>) -> String {
    match token {
        Some(token) => format!("'{}'", token.lexeme()),
        None => "end of input".to_string(),
    }
}

/// The two families of parse time errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The token sequence does not match the grammar
    Syntactic,
    /// The tokens match but a name is used or declared incorrectly
    Semantic,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Syntactic => f.write_str("syntax"),
            ErrorCategory::Semantic => f.write_str("semantic"),
        }
    }
}

pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;
