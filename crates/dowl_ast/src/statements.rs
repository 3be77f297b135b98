//! Statements and statement lists

use crate::expr::{Expr, Ident};
use dowl_common::spanned::{Span, Spanned};
use dowl_common::ValueType;

/// An ordered sequence of statements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementList {
    pub statements: Vec<Statement>,
}

impl StatementList {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl<'a> IntoIterator for &'a StatementList {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    Assignment(Assignment),
    DoWhile(DoWhile),
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        match self {
            Statement::Declaration(decl) => decl.span(),
            Statement::Assignment(assign) => assign.span(),
            Statement::DoWhile(do_while) => do_while.span(),
        }
    }
}

/// `int x;`, `float y = 1.5;`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub ty: ValueType,
    /// The span of the type keyword
    pub ty_span: Span,
    pub name: Ident,
    pub init: Option<Expr>,
}

impl Spanned for Declaration {
    fn span(&self) -> Span {
        let span = self.ty_span.join(self.name.span);
        match &self.init {
            Some(init) => span.join(init.span()),
            None => span,
        }
    }
}

/// `x = expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Ident,
    pub value: Expr,
}

impl Spanned for Assignment {
    fn span(&self) -> Span {
        self.target.span.join(self.value.span())
    }
}

/// `do { body } while (condition);`
///
/// The body always runs once before the condition is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhile {
    /// The span of the `do` keyword
    pub do_span: Span,
    pub body: StatementList,
    pub condition: Expr,
}

impl Spanned for DoWhile {
    fn span(&self) -> Span {
        self.do_span.join(self.condition.span())
    }
}
