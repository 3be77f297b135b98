#![doc = include_str!("../README.md")]

pub mod expr;
pub mod printer;
pub mod program;
pub mod statements;

pub use expr::{BinOp, BinaryExpr, Expr, FloatLiteral, Ident, IntLiteral};
pub use program::Program;
pub use statements::{Assignment, Declaration, DoWhile, Statement, StatementList};
