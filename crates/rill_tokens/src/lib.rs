#![doc = include_str!("../README.md")]

pub mod stream;
pub mod token;

pub use stream::TokenStream;
pub use token::{Token, TokenKind};
