//! Responsible with converting source text into a token stream

use crate::lexer::token_parsing::{parse_insignificant, parse_token};
use rill_tokens::Token;
use thiserror::Error;
use tracing::{debug, trace};

mod token_parsing;

/// Converts source text into tokens, one at a time.
///
/// Lexing never stops early: a character that starts no token is reported as a
/// [`LexicalError`] and skipped, and scanning resumes at the next character.
///
/// # Examples
/// ```
/// # use rill_ast_parsing::lexer::Lexer;
/// let (tokens, errors) = Lexer::new("let x: int; @").scan();
/// assert_eq!(tokens.len(), 5);
/// assert_eq!(errors.len(), 1);
/// ```
#[derive(Debug)]
pub struct Lexer<'s> {
    rest: &'s str,
    line: usize,
}

impl<'s> Lexer<'s> {
    /// Creates a new lexer
    pub fn new(src: &'s str) -> Self {
        Self { rest: src, line: 1 }
    }

    /// The line the lexer is currently on
    pub fn line(&self) -> usize {
        self.line
    }

    /// Runs the lexer to completion, separating tokens from errors. Both keep source order.
    pub fn scan(self) -> (Vec<Token>, Vec<LexicalError>) {
        let mut tokens = vec![];
        let mut errors = vec![];
        for next in self {
            match next {
                Ok(token) => tokens.push(token),
                Err(error) => errors.push(error),
            }
        }
        debug!(
            "scanned {} tokens with {} lexical errors",
            tokens.len(),
            errors.len()
        );
        (tokens, errors)
    }

    fn advance(&mut self, consumed: &'s str) {
        self.line += consumed.matches('\n').count();
        self.rest = &self.rest[consumed.len()..];
    }

    fn skip_insignificant(&mut self) {
        if let Ok((_, skipped)) = parse_insignificant(self.rest) {
            self.advance(skipped);
        }
    }

    fn next_token(&mut self) -> Option<LexResult<Token>> {
        self.skip_insignificant();
        if self.rest.is_empty() {
            return None;
        }
        let line = self.line;
        match parse_token(self.rest) {
            Ok((_, (lexeme, kind))) => {
                self.advance(lexeme);
                let token = Token::new(lexeme, kind, line);
                trace!("lexed {token:?}");
                Some(Ok(token))
            }
            Err(_) => {
                let mut chars = self.rest.chars();
                let character = chars.next()?;
                self.rest = chars.as_str();
                trace!("invalid char {character:?} at line {line}");
                Some(Err(LexicalError { character, line }))
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Scans a whole source text
pub fn scan(src: &str) -> (Vec<Token>, Vec<LexicalError>) {
    Lexer::new(src).scan()
}

type LexResult<T> = Result<T, LexicalError>;

/// A character that does not start any token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexical error: unexpected character {character:?} at line {line}")]
pub struct LexicalError {
    pub character: char,
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_tokens::TokenKind;
    use test_log::test;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, errors) = scan(src);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens.iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_lexer() {
        let (tokens, errors) = scan("fn main() -> int { let a: int; a = 5; }");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 17);
        assert_eq!(tokens[0].kind(), TokenKind::Fn);
        assert_eq!(tokens[1].kind(), TokenKind::Main);
        assert_eq!(tokens[5].kind(), TokenKind::Arrow);
        assert_eq!(tokens[13].lexeme(), "=");
    }

    #[test]
    fn test_line_numbers() {
        let (tokens, _) = scan("let\n\n  x // comment\n;\r\n}");
        let lines = tokens.iter().map(|t| t.line()).collect::<Vec<_>>();
        assert_eq!(lines, [1, 3, 4, 5]);
    }

    #[test]
    fn test_newlines_inside_strings_are_counted() {
        let (tokens, _) = scan("println(\"a\nb\") x");
        let last = tokens.last().unwrap();
        assert_eq!(tokens[2].line(), 1);
        assert_eq!(last.lexeme(), "x");
        assert_eq!(last.line(), 2);
    }

    #[test]
    fn test_invalid_chars_are_skipped() {
        let (tokens, errors) = scan("a @ b\n#!c");
        assert_eq!(
            tokens.iter().map(|t| t.lexeme()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
        assert_eq!(
            errors,
            [
                LexicalError { character: '@', line: 1 },
                LexicalError { character: '#', line: 2 },
                LexicalError { character: '!', line: 2 },
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, errors) = scan("\"abc");
        assert_eq!(errors, [LexicalError { character: '"', line: 1 }]);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_keywords_need_whole_words() {
        assert_eq!(
            kinds("if iffy while_ return1 else"),
            [
                TokenKind::If,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Else
            ]
        );
    }

    #[test]
    fn test_float_and_int() {
        assert_eq!(
            kinds("1.5 7 2."),
            [TokenKind::FloatConst, TokenKind::IntConst, TokenKind::IntConst]
        );
    }

    #[test]
    fn test_every_char_is_accounted_for() {
        let src = "fn f(a: int) { let b: float; b = a * 2.5 / (a - 1); } $ ~";
        let (tokens, errors) = scan(src);
        let significant = src.chars().filter(|c| !c.is_whitespace()).count();
        let lexed = tokens.iter().map(|t| t.lexeme().chars().count()).sum::<usize>();
        assert_eq!(lexed + errors.len(), significant);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let src = "fn a(x: int) -> char { return 'c'; }";
        assert_eq!(scan(src), scan(src));
    }
}
