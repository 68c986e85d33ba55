use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while1};
use nom::character::complete::{char, digit1, none_of, satisfy};
use nom::combinator::{consumed, map, recognize, value};
use nom::error::{context, VerboseError};
use nom::multi::many0_count;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;
use rill_tokens::TokenKind;

type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parses a single token, returning its kind along with the lexeme it was matched from.
///
/// Leading insignificant text must already be removed with [`parse_insignificant`].
pub fn parse_token(src: &str) -> Result<(&str, TokenKind)> {
    context(
        "token",
        consumed(alt((
            parse_word,
            parse_literal,
            parse_operator,
            parse_punctuation,
        ))),
    )(src)
}

/// Reserved words and identifiers. Reserved words only match whole words.
fn parse_word(src: &str) -> Result<TokenKind> {
    context(
        "word",
        map(recognize_identifier, |id: &str| {
            TokenKind::keyword(id).unwrap_or(TokenKind::Identifier)
        }),
    )(src)
}

fn recognize_identifier(src: &str) -> Result<&str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        many0_count(satisfy(|c| c.is_ascii_alphanumeric() || c == '_')),
    ))(src)
}

fn parse_literal(src: &str) -> Result<TokenKind> {
    context(
        "literal",
        alt((
            value(
                TokenKind::FloatConst,
                recognize(tuple((digit1, char('.'), digit1))),
            ),
            value(TokenKind::IntConst, digit1),
            value(TokenKind::FmtString, parse_fmt_string),
            value(TokenKind::CharLiteral, parse_char_literal),
        )),
    )(src)
}

fn parse_fmt_string(src: &str) -> Result<&str> {
    recognize(delimited(char('"'), take_till(|c: char| c == '"'), char('"')))(src)
}

fn parse_char_literal(src: &str) -> Result<&str> {
    recognize(delimited(
        char('\''),
        alt((
            recognize(preceded(char('\\'), satisfy(|c| c != '\n'))),
            recognize(none_of("'\\")),
        )),
        char('\''),
    ))(src)
}

fn parse_operator(src: &str) -> Result<TokenKind> {
    context(
        "operator",
        alt((
            value(TokenKind::Arrow, tag("->")),
            value(TokenKind::Eq, tag("==")),
            value(TokenKind::Neq, tag("!=")),
            value(TokenKind::Gte, tag(">=")),
            value(TokenKind::Lte, tag("<=")),
            value(TokenKind::Assign, char('=')),
            value(TokenKind::Gt, char('>')),
            value(TokenKind::Lt, char('<')),
            value(TokenKind::Plus, char('+')),
            value(TokenKind::Minus, char('-')),
            value(TokenKind::Star, char('*')),
            value(TokenKind::Div, char('/')),
        )),
    )(src)
}

fn parse_punctuation(src: &str) -> Result<TokenKind> {
    context(
        "punctuation",
        alt((
            value(TokenKind::LParen, char('(')),
            value(TokenKind::RParen, char(')')),
            value(TokenKind::LCurly, char('{')),
            value(TokenKind::RCurly, char('}')),
            value(TokenKind::Colon, char(':')),
            value(TokenKind::SemiColon, char(';')),
            value(TokenKind::Comma, char(',')),
        )),
    )(src)
}

/// Whitespace, newlines and `//` comments. Never fails.
pub fn parse_insignificant(src: &str) -> Result<&str> {
    recognize(many0_count(alt((
        take_while1(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')),
        recognize(pair(tag("//"), take_till(|c: char| c == '\n'))),
    ))))(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;
    use test_log::test;

    fn kind_of(src: &str) -> TokenKind {
        let (rest, (lexeme, kind)) = parse_token(src).expect("could not parse token");
        assert_eq!(rest, "", "{src:?} should be fully consumed, got lexeme {lexeme:?}");
        kind
    }

    #[test]
    fn test_insignificant() {
        let (rest, _) = all_consuming(parse_insignificant)("  \t\n// a comment\n\x0B")
            .expect("should be insignificant");
        assert_eq!(rest, "");
        let (rest, _) = parse_insignificant("// trailing comment").unwrap();
        assert_eq!(rest, "");
        let (rest, consumed) = parse_insignificant("x").unwrap();
        assert_eq!((rest, consumed), ("x", ""));
    }

    #[test]
    fn test_parse_keyword() {
        assert_eq!(kind_of("fn"), TokenKind::Fn);
        assert_eq!(kind_of("println"), TokenKind::Println);
        assert_eq!(kind_of("main"), TokenKind::Main);
        assert_eq!(kind_of("fnord"), TokenKind::Identifier);
        assert_eq!(kind_of("int_value"), TokenKind::Identifier);
        assert_eq!(kind_of("x1"), TokenKind::Identifier);
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(kind_of("3.14"), TokenKind::FloatConst);
        assert_eq!(kind_of("42"), TokenKind::IntConst);
        assert_eq!(kind_of("\"%d %f\""), TokenKind::FmtString);
        assert_eq!(kind_of("\"\""), TokenKind::FmtString);
        assert_eq!(kind_of("'a'"), TokenKind::CharLiteral);
        assert_eq!(kind_of("'\\''"), TokenKind::CharLiteral);
    }

    #[test]
    fn test_float_needs_digits_on_both_sides() {
        let (rest, (lexeme, kind)) = parse_token("3.").unwrap();
        assert_eq!((lexeme, kind, rest), ("3", TokenKind::IntConst, "."));
    }

    #[test]
    fn test_longest_operator_first() {
        assert_eq!(kind_of("->"), TokenKind::Arrow);
        assert_eq!(kind_of("=="), TokenKind::Eq);
        assert_eq!(kind_of("<="), TokenKind::Lte);
        assert_eq!(kind_of(">="), TokenKind::Gte);
        assert_eq!(kind_of("!="), TokenKind::Neq);
        let (rest, (_, kind)) = parse_token("=>").unwrap();
        assert_eq!((kind, rest), (TokenKind::Assign, ">"));
    }

    #[test]
    fn test_unknown_chars_fail() {
        assert!(parse_token("!").is_err());
        assert!(parse_token("@").is_err());
        assert!(parse_token("\"unterminated").is_err());
        assert!(parse_token("'ab'").is_err());
    }
}
