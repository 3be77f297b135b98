//! Recursive descent parser over a token slice

use dowl_ast::Program;
use dowl_common::error::SyntaxErrorKind;
use dowl_common::{Span, Spanned, SyntaxError};
use dowl_tokens::{Token, TokenKind};
use std::any::type_name;
use tracing::{debug, instrument, trace};

mod expr;
mod statements;

pub use statements::parse_statement_list;

/// The text used in place of a token when the slice runs out
pub const END_OF_INPUT: &str = "end of input";

/// How many parenthesized expressions or loop bodies may enclose each other
pub const MAX_NESTING: usize = 128;

pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;

/// A type that can be parsed from the token stream
pub trait Parsable: Sized {
    /// Parses this type, failing if the upcoming tokens don't form it
    fn parse(parser: &mut Parser<'_>) -> SyntaxResult<Self>;
}

/// A type whose presence can be decided from the next token alone
pub trait CouldParse: Parsable {
    fn could_parse(parser: &Parser<'_>) -> bool;
}

/// Parses a token slice with a single token of lookahead
#[derive(Debug)]
pub struct Parser<'t> {
    tokens: &'t [Token],
    cursor: usize,
    depth: usize,
    non_terminals: Vec<&'static str>,
}

impl<'t> Parser<'t> {
    /// Creates a new parser positioned at the first token
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            non_terminals: vec![],
        }
    }

    /// Parses some parsable type
    pub fn parse<P: Parsable>(&mut self) -> SyntaxResult<P> {
        let name = short_name::<P>();
        self.non_terminals.push(name);
        trace!("entering {name}");
        let result = P::parse(self);
        trace!("leaving {name} (ok: {})", result.is_ok());
        self.non_terminals.pop();
        result
    }

    /// Parses a type only if it could start at the current token
    pub fn parse_opt<P: CouldParse>(&mut self) -> SyntaxResult<Option<P>> {
        if P::could_parse(self) {
            self.parse().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Runs `f` one nesting level deeper, failing at the current token past [MAX_NESTING]
    pub fn nested<T, F>(&mut self, f: F) -> SyntaxResult<T>
    where
        F: FnOnce(&mut Self) -> SyntaxResult<T>,
    {
        if self.depth >= MAX_NESTING {
            return Err(self.error(SyntaxErrorKind::NestingTooDeep(MAX_NESTING)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Peeks the current token without consuming it
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.cursor)
    }

    pub fn peek_kind(&self) -> Option<&'t TokenKind> {
        self.peek().map(Token::kind)
    }

    /// Consumes the current token
    pub fn consume(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        trace!("consumed {token:?}");
        Some(token)
    }

    /// Consumes the current token only if it matches the predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<&'t Token>
    where
        F: FnOnce(&TokenKind) -> bool,
    {
        match self.peek() {
            Some(token) if predicate(token.kind()) => self.consume(),
            _ => None,
        }
    }

    /// Consumes the current token if it is of the given kind, otherwise errors
    pub fn expect(&mut self, kind: TokenKind) -> SyntaxResult<&'t Token> {
        match self.consume_if(|k| k.same_kind(&kind)) {
            Some(token) => Ok(token),
            None => Err(self.error(SyntaxErrorKind::expected_token(
                [kind.to_string()],
                self.found(),
            ))),
        }
    }

    /// Describes the current token for error messages
    pub fn found(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => END_OF_INPUT.to_string(),
        }
    }

    /// Creates an error located at the current token
    pub fn error(&self, kind: impl Into<SyntaxErrorKind>) -> SyntaxError {
        let kind = kind.into();
        debug!(non_terminals = ?self.non_terminals, "syntax error: {kind}");
        SyntaxError::new(kind, self.location())
    }

    fn location(&self) -> Span {
        match (self.peek(), self.tokens.last()) {
            (Some(token), _) => token.span(),
            (None, Some(last)) => last.span().end(),
            (None, None) => Span::new(0, 0, 1, 1),
        }
    }
}

fn short_name<P>() -> &'static str {
    let name = type_name::<P>();
    name.rsplit("::").next().unwrap_or(name)
}

impl Parsable for Program {
    fn parse(parser: &mut Parser<'_>) -> SyntaxResult<Self> {
        let statements = parse_statement_list(parser, &[TokenKind::Eof])?;
        parser.expect(TokenKind::Eof)?;
        Ok(Program::new(statements))
    }
}

/// Parses a complete program from tokens.
///
/// The token slice should end with an [`TokenKind::Eof`] token, as produced by
/// [`tokenize`](crate::lexer::tokenize). The first syntax error aborts parsing.
#[instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> SyntaxResult<Program> {
    let program = Parser::new(tokens).parse::<Program>()?;
    debug!("parsed {} top level statements", program.statements.len());
    Ok(program)
}
