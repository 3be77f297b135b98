//! Prints a tree as an indented outline, one node per line and two spaces per level.

use crate::expr::Expr;
use crate::program::Program;
use crate::statements::{Statement, StatementList};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// A node that can print itself and its children as an indented outline
pub trait PrintTree {
    fn print_tree(&self, out: &mut dyn Write, level: usize) -> fmt::Result;

    /// Prints the outline into a new string
    fn tree_string(&self) -> String {
        let mut out = String::new();
        // writing into a String never fails
        let _ = self.print_tree(&mut out, 0);
        out
    }
}

fn line(out: &mut dyn Write, level: usize, node: fmt::Arguments<'_>) -> fmt::Result {
    writeln!(out, "{}{}", INDENT.repeat(level), node)
}

impl PrintTree for Program {
    fn print_tree(&self, out: &mut dyn Write, level: usize) -> fmt::Result {
        line(out, level, format_args!("Program"))?;
        self.statements.print_tree(out, level + 1)
    }
}

impl PrintTree for StatementList {
    fn print_tree(&self, out: &mut dyn Write, level: usize) -> fmt::Result {
        line(out, level, format_args!("StatementList"))?;
        for statement in self {
            statement.print_tree(out, level + 1)?;
        }
        Ok(())
    }
}

impl PrintTree for Statement {
    fn print_tree(&self, out: &mut dyn Write, level: usize) -> fmt::Result {
        match self {
            Statement::Declaration(decl) => {
                line(out, level, format_args!("Declaration({}: {})", decl.name.name, decl.ty))?;
                if let Some(init) = &decl.init {
                    init.print_tree(out, level + 1)?;
                }
                Ok(())
            }
            Statement::Assignment(assign) => {
                line(out, level, format_args!("Assignment({})", assign.target.name))?;
                assign.value.print_tree(out, level + 1)
            }
            Statement::DoWhile(do_while) => {
                line(out, level, format_args!("DoWhile"))?;
                do_while.body.print_tree(out, level + 1)?;
                do_while.condition.print_tree(out, level + 1)
            }
        }
    }
}

impl PrintTree for Expr {
    fn print_tree(&self, out: &mut dyn Write, level: usize) -> fmt::Result {
        let mut pending = vec![(self, level)];
        while let Some((expr, level)) = pending.pop() {
            match expr {
                Expr::Binary(binary) => {
                    line(out, level, format_args!("BinaryOp({})", binary.op))?;
                    pending.push((&binary.right, level + 1));
                    pending.push((&binary.left, level + 1));
                }
                Expr::Int(int) => line(out, level, format_args!("IntLiteral({})", int.value))?,
                Expr::Float(float) => {
                    line(out, level, format_args!("FloatLiteral({:?})", float.value))?
                }
                Expr::Identifier(ident) => {
                    line(out, level, format_args!("Identifier({})", ident.name))?
                }
            }
        }
        Ok(())
    }
}
