use dowl_common::nom_helpers::{any_line_ending, blank1, recognize_identifier};
use dowl_tokens::TokenKind;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_until};
use nom::character::complete::{char, digit1};
use nom::combinator::{
    all_consuming, cut, map, map_parser, map_res, opt, peek, recognize, value,
};
use nom::error::{context, VerboseError, VerboseErrorKind};
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

pub(super) type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub(super) const BLOCK_COMMENT: &str = "block comment";
pub(super) const INTEGER_LITERAL: &str = "integer literal";

/// Parses one run of insignificant text, either whitespace or a comment.
///
/// An opened block comment that is never closed is a failure, not an error, so the lexer does
/// not fall back to reading `/*` as two operators.
pub(super) fn parse_insignificant(src: &str) -> Result<&str> {
    context(
        "insignificant",
        alt((
            context("whitespace", blank1),
            context(
                BLOCK_COMMENT,
                recognize(preceded(
                    tag("/*"),
                    cut(terminated(take_until("*/"), tag("*/"))),
                )),
            ),
            context(
                "line comment",
                recognize(tuple((
                    tag("//"),
                    take_till(|c: char| c == '\n' || c == '\r'),
                    opt(any_line_ending),
                ))),
            ),
        )),
    )(src)
}

/// Parses a single significant token
pub(super) fn parse_token(src: &str) -> Result<TokenKind> {
    context(
        "token",
        alt((parse_word, parse_number, parse_operator, parse_punctuation)),
    )(src)
}

/// The innermost context a failure was raised in
pub(super) fn failed_context(e: &VerboseError<&str>) -> Option<&'static str> {
    e.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(ctx) => Some(*ctx),
        _ => None,
    })
}

fn parse_word(src: &str) -> Result<TokenKind> {
    context(
        "word",
        map_parser(recognize_identifier, alt((parse_keyword, parse_identifier))),
    )(src)
}

fn all_consuming_tag(src: &str) -> impl FnMut(&str) -> Result<&str> + '_ {
    move |i| all_consuming(tag(src))(i)
}

fn parse_keyword(src: &str) -> Result<TokenKind> {
    context(
        "keyword",
        alt((
            value(TokenKind::Float, all_consuming_tag("float")),
            value(TokenKind::Int, all_consuming_tag("int")),
            value(TokenKind::Do, all_consuming_tag("do")),
            value(TokenKind::While, all_consuming_tag("while")),
            value(TokenKind::If, all_consuming_tag("if")),
            value(TokenKind::Else, all_consuming_tag("else")),
        )),
    )(src)
}

fn parse_identifier(src: &str) -> Result<TokenKind> {
    context(
        "identifier",
        map(recognize_identifier, |id: &str| {
            TokenKind::Identifier(id.to_string())
        }),
    )(src)
}

/// Floats are tried first, otherwise `3.14` would be read as `3` followed by `.14`
fn parse_number(src: &str) -> Result<TokenKind> {
    context("number", alt((parse_float, parse_integer)))(src)
}

fn parse_float(src: &str) -> Result<TokenKind> {
    context(
        "float literal",
        map_res(recognize(tuple((digit1, char('.'), digit1))), |s: &str| {
            s.parse::<f64>().map(TokenKind::FloatLiteral)
        }),
    )(src)
}

/// A run of digits that does not fit in an `i64` can not be read as anything else
fn parse_integer(src: &str) -> Result<TokenKind> {
    preceded(
        peek(digit1),
        context(
            INTEGER_LITERAL,
            cut(map_res(digit1, |s: &str| {
                s.parse::<i64>().map(TokenKind::IntLiteral)
            })),
        ),
    )(src)
}

fn parse_operator(src: &str) -> Result<TokenKind> {
    context(
        "operator",
        alt((
            value(TokenKind::Lte, tag("<=")),
            value(TokenKind::Gte, tag(">=")),
            value(TokenKind::Eq, tag("==")),
            value(TokenKind::Neq, tag("!=")),
            value(TokenKind::Lt, char('<')),
            value(TokenKind::Gt, char('>')),
            value(TokenKind::Assign, char('=')),
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
            value(TokenKind::SemiColon, char(';')),
            value(TokenKind::LParen, char('(')),
            value(TokenKind::RParen, char(')')),
            value(TokenKind::LCurly, char('{')),
            value(TokenKind::RCurly, char('}')),
        )),
    )(src)
}
