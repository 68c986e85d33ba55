//! A forward-only cursor over lexed tokens

use crate::{Token, TokenKind};
use std::collections::VecDeque;

/// A stream of tokens that is consumed strictly left to right.
///
/// # Examples
/// ```
/// # use rill_tokens::{Token, TokenKind, TokenStream};
/// let mut stream = TokenStream::new([
///     Token::new("let", TokenKind::Let, 1),
///     Token::new("x", TokenKind::Identifier, 2),
/// ]);
/// assert_eq!(stream.peek_kind(), Some(TokenKind::Let));
/// assert_eq!(stream.peek_nth(1).map(Token::lexeme), Some("x"));
/// stream.next();
/// assert_eq!(stream.last_line(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
    consumed: usize,
    last_line: usize,
}

impl TokenStream {
    /// Creates a new token stream
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            consumed: 0,
            last_line: 1,
        }
    }

    /// The next token, without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// The kind of the next token
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(Token::kind)
    }

    /// Looks `n` tokens ahead, where `0` is the next token
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(n)
    }

    /// Gets whether every token was consumed
    pub fn is_eof(&self) -> bool {
        self.tokens.is_empty()
    }

    /// How many tokens were consumed so far
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// How many tokens are left
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// The line of the most recently consumed token, or `1` if none were consumed yet.
    pub fn last_line(&self) -> usize {
        self.last_line
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.pop_front()?;
        self.consumed += 1;
        self.last_line = token.line();
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tokens.len(), Some(self.tokens.len()))
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self::new(iter)
    }
}
