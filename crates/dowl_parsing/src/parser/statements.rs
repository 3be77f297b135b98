use crate::parser::{CouldParse, Parsable, Parser, SyntaxResult};
use dowl_ast::{Assignment, Declaration, DoWhile, Expr, Ident, Statement, StatementList};
use dowl_common::error::SyntaxErrorKind;
use dowl_common::Spanned;
use dowl_tokens::TokenKind;

/// Parses statements until the current token is one of `stop`. The stop token is not consumed.
pub fn parse_statement_list(
    parser: &mut Parser<'_>,
    stop: &[TokenKind],
) -> SyntaxResult<StatementList> {
    let mut statements = vec![];
    while !matches!(parser.peek_kind(), Some(kind) if stop.contains(kind)) {
        statements.push(parser.parse::<Statement>()?);
    }
    Ok(StatementList::new(statements))
}

impl Parsable for Statement {
    fn parse(parser: &mut Parser<'_>) -> SyntaxResult<Self> {
        if let Some(decl) = parser.parse_opt::<Declaration>()? {
            Ok(Statement::Declaration(decl))
        } else if let Some(assign) = parser.parse_opt::<Assignment>()? {
            Ok(Statement::Assignment(assign))
        } else if let Some(do_while) = parser.parse_opt::<DoWhile>()? {
            Ok(Statement::DoWhile(do_while))
        } else {
            Err(parser.error(SyntaxErrorKind::UnexpectedStatement(parser.found())))
        }
    }
}

impl Parsable for Ident {
    fn parse(parser: &mut Parser<'_>) -> SyntaxResult<Self> {
        let token = parser.expect(TokenKind::Identifier(String::new()))?;
        Ok(Ident::new(token.lexeme(), token.span()))
    }
}

impl Parsable for Declaration {
    fn parse(parser: &mut Parser<'_>) -> SyntaxResult<Self> {
        let Some((ty, ty_span)) = parser
            .peek()
            .and_then(|token| Some((token.kind().as_value_type()?, token.span())))
        else {
            return Err(parser.error(SyntaxErrorKind::expected_token(
                [TokenKind::Int.to_string(), TokenKind::Float.to_string()],
                parser.found(),
            )));
        };
        parser.consume();
        let name = parser.parse::<Ident>()?;
        let init = match parser.consume_if(|k| k == &TokenKind::Assign) {
            Some(_) => Some(parser.parse::<Expr>()?),
            None => None,
        };
        parser.expect(TokenKind::SemiColon)?;
        Ok(Declaration {
            ty,
            ty_span,
            name,
            init,
        })
    }
}

impl CouldParse for Declaration {
    fn could_parse(parser: &Parser<'_>) -> bool {
        parser
            .peek_kind()
            .is_some_and(|kind| kind.as_value_type().is_some())
    }
}

impl Parsable for Assignment {
    fn parse(parser: &mut Parser<'_>) -> SyntaxResult<Self> {
        let target = parser.parse::<Ident>()?;
        parser.expect(TokenKind::Assign)?;
        let value = parser.parse::<Expr>()?;
        parser.expect(TokenKind::SemiColon)?;
        Ok(Assignment { target, value })
    }
}

impl CouldParse for Assignment {
    fn could_parse(parser: &Parser<'_>) -> bool {
        matches!(parser.peek_kind(), Some(TokenKind::Identifier(_)))
    }
}

impl Parsable for DoWhile {
    fn parse(parser: &mut Parser<'_>) -> SyntaxResult<Self> {
        parser.nested(|parser| {
            let do_token = parser.expect(TokenKind::Do)?;
            parser.expect(TokenKind::LCurly)?;
            let body = parse_statement_list(parser, &[TokenKind::RCurly])?;
            parser.expect(TokenKind::RCurly)?;
            parser.expect(TokenKind::While)?;
            parser.expect(TokenKind::LParen)?;
            let condition = parser.parse::<Expr>()?;
            parser.expect(TokenKind::RParen)?;
            parser.expect(TokenKind::SemiColon)?;
            Ok(DoWhile {
                do_span: do_token.span(),
                body,
                condition,
            })
        })
    }
}

impl CouldParse for DoWhile {
    fn could_parse(parser: &Parser<'_>) -> bool {
        matches!(parser.peek_kind(), Some(TokenKind::Do))
    }
}
