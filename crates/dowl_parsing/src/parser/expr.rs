//! Expression grammar.
//!
//! ```text
//! expr       := arithmetic ( relop arithmetic )*
//! arithmetic := term ( ('+' | '-') term )*
//! term       := factor ( ('*' | '/') factor )*
//! factor     := INT | FLOAT | IDENT | '(' expr ')'
//! ```
//!
//! Every level is left associative, so `a < b < c` is `(a < b) < c`.

use crate::parser::{Parsable, Parser, SyntaxResult};
use dowl_ast::{BinOp, BinaryExpr, Expr, FloatLiteral, Ident, IntLiteral};
use dowl_common::error::SyntaxErrorKind;
use dowl_common::{Span, Spanned};
use dowl_tokens::TokenKind;

impl Parsable for Expr {
    fn parse(parser: &mut Parser<'_>) -> SyntaxResult<Self> {
        parse_relational(parser)
    }
}

fn bin_op(kind: &TokenKind) -> Option<BinOp> {
    let op = match kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Star => BinOp::Mult,
        TokenKind::Div => BinOp::Div,
        TokenKind::Eq => BinOp::Eq,
        TokenKind::Neq => BinOp::Neq,
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Lte => BinOp::Lte,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::Gte => BinOp::Gte,
        _ => return None,
    };
    Some(op)
}

/// Consumes the current token if it is one of the given operators
fn consume_op(parser: &mut Parser<'_>, ops: &[BinOp]) -> Option<(BinOp, Span)> {
    let op = parser
        .peek_kind()
        .and_then(bin_op)
        .filter(|op| ops.contains(op))?;
    let token = parser.consume()?;
    Some((op, token.span()))
}

fn parse_left_assoc(
    parser: &mut Parser<'_>,
    ops: &[BinOp],
    operand: fn(&mut Parser<'_>) -> SyntaxResult<Expr>,
) -> SyntaxResult<Expr> {
    let mut l = operand(parser)?;
    while let Some((op, op_span)) = consume_op(parser, ops) {
        let r = operand(parser)?;
        l = Expr::Binary(BinaryExpr::new(l, op, op_span, r));
    }
    Ok(l)
}

fn parse_relational(parser: &mut Parser<'_>) -> SyntaxResult<Expr> {
    parse_left_assoc(
        parser,
        &[
            BinOp::Eq,
            BinOp::Neq,
            BinOp::Lt,
            BinOp::Lte,
            BinOp::Gt,
            BinOp::Gte,
        ],
        parse_arithmetic,
    )
}

fn parse_arithmetic(parser: &mut Parser<'_>) -> SyntaxResult<Expr> {
    parse_left_assoc(parser, &[BinOp::Add, BinOp::Sub], parse_term)
}

fn parse_term(parser: &mut Parser<'_>) -> SyntaxResult<Expr> {
    parse_left_assoc(parser, &[BinOp::Mult, BinOp::Div], parse_factor)
}

fn parse_factor(parser: &mut Parser<'_>) -> SyntaxResult<Expr> {
    let Some(token) = parser.peek() else {
        return Err(parser.error(SyntaxErrorKind::UnexpectedFactor(parser.found())));
    };
    match token.kind() {
        TokenKind::IntLiteral(value) => {
            parser.consume();
            Ok(Expr::Int(IntLiteral {
                value: *value,
                span: token.span(),
            }))
        }
        TokenKind::FloatLiteral(value) => {
            parser.consume();
            Ok(Expr::Float(FloatLiteral {
                value: *value,
                span: token.span(),
            }))
        }
        TokenKind::Identifier(_) => Ok(Expr::Identifier(parser.parse::<Ident>()?)),
        TokenKind::LParen => parser.nested(|parser| {
            parser.consume();
            let expr = parser.parse::<Expr>()?;
            parser.expect(TokenKind::RParen)?;
            Ok(expr)
        }),
        _ => Err(parser.error(SyntaxErrorKind::UnexpectedFactor(parser.found()))),
    }
}
