//! Converts source text into a sequence of tokens

use dowl_common::error::LexicalErrorKind;
use dowl_common::{LexicalError, Span};
use dowl_tokens::{Token, TokenKind};
use nom::error::VerboseError;
use tracing::{debug, instrument, trace};

mod token_parsing;

use token_parsing::{
    failed_context, parse_insignificant, parse_token, BLOCK_COMMENT, INTEGER_LITERAL,
};

/// Reads tokens from source text one at a time.
///
/// Comments and whitespace are skipped but still advance the line and column counters. `\r\n`,
/// `\n` and a lone `\r` each count as exactly one line break. The final item is always a single
/// [`TokenKind::Eof`] token; after it, or after the first error, the lexer is exhausted.
#[derive(Debug)]
pub struct Lexer<'s> {
    source: &'s str,
    offset: usize,
    line: usize,
    column: usize,
    state: State,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Lexing,
    Done,
}

impl<'s> Lexer<'s> {
    /// Creates a new lexer positioned at line 1, column 1
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            state: State::Lexing,
        }
    }

    fn rest(&self) -> &'s str {
        &self.source[self.offset..]
    }

    fn span(&self, len: usize) -> Span {
        Span::new(self.offset, len, self.line, self.column)
    }

    /// Moves past `consumed`, which must be a prefix of the remaining input.
    ///
    /// Columns count characters, not bytes, and only the text after the last line break in
    /// `consumed` is counted.
    fn advance(&mut self, consumed: &str) {
        let bytes = consumed.as_bytes();
        let mut idx = 0;
        let mut last_break = None;
        while idx < bytes.len() {
            let newline_len = match (bytes[idx], bytes.get(idx + 1).copied()) {
                (b'\r', Some(b'\n')) => 2,
                (b'\r' | b'\n', _) => 1,
                _ => 0,
            };
            if newline_len > 0 {
                idx += newline_len;
                self.line += 1;
                last_break = Some(idx);
            } else {
                idx += 1;
            }
        }
        match last_break {
            Some(start) => self.column = consumed[start..].chars().count() + 1,
            None => self.column += consumed.chars().count(),
        }
        self.offset += consumed.len();
    }

    fn skip_insignificant(&mut self) -> Result<(), LexicalError> {
        loop {
            match parse_insignificant(self.rest()) {
                Ok((_, consumed)) => self.advance(consumed),
                Err(nom::Err::Failure(e)) => return Err(self.failure(&e)),
                Err(_) => return Ok(()),
            }
        }
    }

    fn failure(&self, e: &VerboseError<&str>) -> LexicalError {
        match failed_context(e) {
            Some(BLOCK_COMMENT) => {
                LexicalError::new(LexicalErrorKind::UnterminatedComment, self.span(2))
            }
            Some(INTEGER_LITERAL) => {
                let digits = self
                    .rest()
                    .split(|c: char| !c.is_ascii_digit())
                    .next()
                    .unwrap_or_default();
                LexicalError::new(
                    LexicalErrorKind::IntegerOutOfRange(digits.to_string()),
                    self.span(digits.len()),
                )
            }
            _ => self.unexpected_char(),
        }
    }

    fn unexpected_char(&self) -> LexicalError {
        let c = self.rest().chars().next().unwrap_or_default();
        LexicalError::new(LexicalErrorKind::UnexpectedChar(c), self.span(c.len_utf8()))
    }

    fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.skip_insignificant()?;
        let rest = self.rest();
        if rest.is_empty() {
            self.state = State::Done;
            return Ok(Token::eof(self.span(0)));
        }
        match parse_token(rest) {
            Ok((remaining, kind)) => {
                let lexeme = &rest[..rest.len() - remaining.len()];
                let token = Token::new(self.span(lexeme.len()), kind, lexeme);
                self.advance(lexeme);
                trace!("lexed {token:?}");
                Ok(token)
            }
            Err(nom::Err::Failure(e)) => Err(self.failure(&e)),
            Err(_) => Err(self.unexpected_char()),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }
        let next = self.next_token();
        if next.is_err() {
            self.state = State::Done;
        }
        Some(next)
    }
}

/// Tokenizes an entire source string.
///
/// The returned tokens end in exactly one [`TokenKind::Eof`]. Stops at the first character that
/// can not start a token.
#[instrument(skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    debug!("produced {} tokens", tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("could not tokenize")
            .into_iter()
            .map(|t| t.kind().clone())
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            kinds("int x = 5;"),
            vec![
                TokenKind::Int,
                ident("x"),
                TokenKind::Assign,
                TokenKind::IntLiteral(5),
                TokenKind::SemiColon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("int x = 5;").unwrap();
        let positions = tokens
            .iter()
            .map(|t| (t.line(), t.column()))
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![(1, 1), (1, 5), (1, 7), (1, 9), (1, 10), (1, 11)]);
        assert_eq!(tokens[0].lexeme(), "int");
        assert_eq!(tokens[3].lexeme(), "5");
    }

    #[test]
    fn test_float_literal() {
        let tokens = tokenize("float y = 2.75;").unwrap();
        assert_eq!(tokens[3].kind(), &TokenKind::FloatLiteral(2.75));
        assert_eq!(tokens[3].lexeme(), "2.75");
        assert_eq!(tokens[3].column(), 11);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            kinds("integer dox whilex _do"),
            vec![ident("integer"), ident("dox"), ident("whilex"), ident("_do"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = tokenize("// first line\nint /* inline\n more */ x;").unwrap();
        let x = &tokens[1];
        assert_eq!(x.kind(), &ident("x"));
        assert_eq!((x.line(), x.column()), (3, 10));
        assert_eq!(tokens[0].line(), 2);
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        assert_eq!(kinds("x; // trailing"), vec![ident("x"), TokenKind::SemiColon, TokenKind::Eof]);
    }

    #[test]
    fn test_line_endings_count_once() {
        let tokens = tokenize("a\r\nb\rc\nd").unwrap();
        let lines = tokens.iter().map(Token::line).collect::<Vec<_>>();
        assert_eq!(lines, vec![1, 2, 3, 4, 4]);
        assert!(tokens.iter().all(|t| t.column() == 1 || t.is_eof()));
    }

    #[test]
    fn test_relational_operators() {
        assert_eq!(
            kinds("a==b!=c<=d>=e<f>g=h"),
            vec![
                ident("a"),
                TokenKind::Eq,
                ident("b"),
                TokenKind::Neq,
                ident("c"),
                TokenKind::Lte,
                ident("d"),
                TokenKind::Gte,
                ident("e"),
                TokenKind::Lt,
                ident("f"),
                TokenKind::Gt,
                ident("g"),
                TokenKind::Assign,
                ident("h"),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_eof_position() {
        let tokens = tokenize("x;\n").unwrap();
        let eof = tokens.last().unwrap();
        assert!(eof.is_eof());
        assert_eq!((eof.line(), eof.column()), (2, 1));

        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!((tokens[0].line(), tokens[0].column()), (1, 1));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("int x;\nx = 1 # 2;").expect_err("should fail");
        assert_eq!(err.kind(), &LexicalErrorKind::UnexpectedChar('#'));
        assert_eq!((err.line(), err.column()), (2, 7));
        assert_eq!(err.message(), "Unexpected character: '#'");
    }

    #[test]
    fn test_lone_bang_is_unexpected() {
        let err = tokenize("x ! y").expect_err("should fail");
        assert_eq!(err.kind(), &LexicalErrorKind::UnexpectedChar('!'));
        assert_eq!(err.column(), 3);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = tokenize("int x;\n  /* no end").expect_err("should fail");
        assert_eq!(err.kind(), &LexicalErrorKind::UnterminatedComment);
        assert_eq!((err.line(), err.column()), (2, 3));
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = tokenize("x = 123456789012345678901;").expect_err("should fail");
        assert_eq!(
            err.kind(),
            &LexicalErrorKind::IntegerOutOfRange("123456789012345678901".to_string())
        );
        assert_eq!(err.column(), 5);
    }

    #[test]
    fn test_columns_count_characters() {
        let err = tokenize("/* é */ @").expect_err("should fail");
        assert_eq!(err.column(), 9);
    }

    #[test]
    fn test_columns_on_a_long_line() {
        let tokens = tokenize(&"x=1;".repeat(20_000)).unwrap();
        assert_eq!(tokens.len(), 80_001);
        let semi = &tokens[79_999];
        assert_eq!(semi.kind(), &TokenKind::SemiColon);
        assert_eq!((semi.line(), semi.column()), (1, 80_000));
        let eof = &tokens[80_000];
        assert_eq!((eof.line(), eof.column()), (1, 80_001));
    }

    #[test]
    fn test_column_resets_inside_comment() {
        let tokens = tokenize("a /* é\r\n  é */ b\n  c").unwrap();
        let positions = tokens
            .iter()
            .map(|t| (t.line(), t.column()))
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![(1, 1), (2, 8), (3, 3), (3, 4)]);
    }

    #[test]
    fn test_lexer_stops_after_error() {
        let mut lexer = Lexer::new("a $ b");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lexemes_rebuild_source_without_whitespace() {
        let source = "int count = 0;\ndo {\n  count = count + 1; // bump\n} while (count < 10);";
        let rebuilt = tokenize(source)
            .unwrap()
            .iter()
            .map(Token::lexeme)
            .collect::<String>();
        let expected = "int count = 0;\ndo {\n  count = count + 1;\n} while (count < 10);"
            .split_whitespace()
            .collect::<String>();
        assert_eq!(rebuilt, expected);
    }
}
