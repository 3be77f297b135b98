//! nom helpers

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::satisfy;
use nom::combinator::recognize;
use nom::error::ParseError;
use nom::sequence::pair;
use nom::IResult;

/// Recognizes `[A-Za-z_][A-Za-z0-9_]*`
pub fn recognize_identifier<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Recognizes a single line terminator, `\r\n`, `\n` or `\r`
pub fn any_line_ending<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    alt((tag("\r\n"), tag("\n"), tag("\r")))(input)
}

/// Recognizes a run of spaces, tabs, carriage returns and line feeds
pub fn blank1<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    take_while1(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'))(input)
}
