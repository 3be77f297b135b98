//! Expressions

use dowl_common::spanned::{Span, Spanned};
use strum::{AsRefStr, Display};

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Int(IntLiteral),
    Float(FloatLiteral),
    Identifier(Ident),
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Binary(binary) => binary.span(),
            Expr::Int(int) => int.span,
            Expr::Float(float) => float.span,
            Expr::Identifier(ident) => ident.span,
        }
    }
}

/// A binary operation, `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinOp,
    /// The span of the operator token
    pub op_span: Span,
    pub right: Box<Expr>,
}

impl BinaryExpr {
    pub fn new(left: Expr, op: BinOp, op_span: Span, right: Expr) -> Self {
        Self {
            left: Box::new(left),
            op,
            op_span,
            right: Box::new(right),
        }
    }
}

impl Spanned for BinaryExpr {
    fn span(&self) -> Span {
        let mut first = &*self.left;
        while let Expr::Binary(binary) = first {
            first = &binary.left;
        }
        let mut last = &*self.right;
        while let Expr::Binary(binary) = last {
            last = &binary.right;
        }
        first.span().join(last.span())
    }
}

/// Operator chains are arbitrarily long, so nested operations are torn down from a work list
/// instead of recursively.
impl Drop for BinaryExpr {
    fn drop(&mut self) {
        let mut pending = vec![];
        self.detach_operations(&mut pending);
        while let Some(mut binary) = pending.pop() {
            binary.detach_operations(&mut pending);
        }
    }
}

impl BinaryExpr {
    /// Moves every operand that is itself an operation into `pending`, leaving a leaf behind
    fn detach_operations(&mut self, pending: &mut Vec<BinaryExpr>) {
        for operand in [&mut self.left, &mut self.right] {
            if matches!(**operand, Expr::Binary(_)) {
                let leaf = Expr::Int(IntLiteral {
                    value: 0,
                    span: Span::new(0, 0, 0, 0),
                });
                if let Expr::Binary(binary) = std::mem::replace(&mut **operand, leaf) {
                    pending.push(binary);
                }
            }
        }
    }
}

/// A binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum BinOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mult,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Neq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Lte,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Gte,
}

impl BinOp {
    /// Comparisons always produce an `int` truth value
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Neq | BinOp::Lt | BinOp::Lte | BinOp::Gt | BinOp::Gte
        )
    }
}

/// An integer constant
#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub value: i64,
    pub span: Span,
}

/// A floating point constant
#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
    pub span: Span,
}

/// A use of a variable name
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl Spanned for Ident {
    fn span(&self) -> Span {
        self.span
    }
}
