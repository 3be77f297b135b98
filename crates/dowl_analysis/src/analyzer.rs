//! Type checks a program while building its symbol table

use crate::symbol_table::{Symbol, SymbolTable};
use dowl_ast::{
    Assignment, BinOp, BinaryExpr, Declaration, DoWhile, Expr, Ident, Program, Statement,
    StatementList,
};
use dowl_common::error::SemanticErrorKind;
use dowl_common::{SemanticError, Spanned, ValueType};
use std::fmt::{Display, Formatter};
use tracing::{debug, instrument};

pub type SemanticResult<T = ()> = Result<T, SemanticError>;

/// A single rule application made during analysis
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Declared {
        name: String,
        ty: ValueType,
    },
    Assigned {
        name: String,
        ty: ValueType,
        value: ValueType,
    },
    CheckedLoop {
        condition: ValueType,
    },
    CheckedBinaryOp {
        op: BinOp,
        left: ValueType,
        right: ValueType,
        result: ValueType,
    },
    IntLiteral(i64),
    FloatLiteral(f64),
    Identifier {
        name: String,
        ty: ValueType,
    },
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEvent::Declared { name, ty } => {
                write!(f, "declared variable '{name}' with type '{ty}'")
            }
            TraceEvent::Assigned { name, ty, value } => {
                write!(f, "checked assignment of '{value}' to '{name}' ('{ty}')")
            }
            TraceEvent::CheckedLoop { condition } => {
                write!(f, "checked do-while loop with '{condition}' condition")
            }
            TraceEvent::CheckedBinaryOp {
                op,
                left,
                right,
                result,
            } => write!(
                f,
                "checked binary operation '{op}' with operand types '{left}' and '{right}', resulting type '{result}'"
            ),
            TraceEvent::IntLiteral(value) => write!(f, "found int literal {value}"),
            TraceEvent::FloatLiteral(value) => write!(f, "found float literal {value:?}"),
            TraceEvent::Identifier { name, ty } => {
                write!(f, "found identifier '{name}' with type '{ty}'")
            }
        }
    }
}

/// The result of a successful analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub symbols: SymbolTable,
    /// Every rule applied, in order. Empty unless trace collection was enabled.
    pub trace: Vec<TraceEvent>,
}

/// Walks a program top down, failing at the first semantic error.
#[derive(Debug)]
pub struct Analyzer {
    symbols: SymbolTable,
    trace: Vec<TraceEvent>,
    collect_trace: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Creates a new analyzer that collects a trace
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            trace: vec![],
            collect_trace: true,
        }
    }

    /// Sets whether trace events are kept in the [`Analysis`]. They are always logged.
    pub fn collect_trace(mut self, collect_trace: bool) -> Self {
        self.collect_trace = collect_trace;
        self
    }

    /// Analyzes a program
    #[instrument(skip_all)]
    pub fn analyze(mut self, program: &Program) -> SemanticResult<Analysis> {
        self.visit_statement_list(&program.statements)?;
        debug!("analysis finished with {} symbols", self.symbols.len());
        Ok(Analysis {
            symbols: self.symbols,
            trace: self.trace,
        })
    }

    fn record(&mut self, event: TraceEvent) {
        debug!("{event}");
        if self.collect_trace {
            self.trace.push(event);
        }
    }

    fn lookup(&self, ident: &Ident) -> SemanticResult<ValueType> {
        self.symbols
            .get(&ident.name)
            .map(|symbol| symbol.ty)
            .ok_or_else(|| {
                SemanticError::new(
                    SemanticErrorKind::UndeclaredVariable(ident.name.clone()),
                    ident.span,
                )
            })
    }

    fn visit_statement_list(&mut self, statements: &StatementList) -> SemanticResult {
        for statement in statements {
            self.visit_statement(statement)?;
        }
        Ok(())
    }

    fn visit_statement(&mut self, statement: &Statement) -> SemanticResult {
        match statement {
            Statement::Declaration(decl) => self.visit_declaration(decl),
            Statement::Assignment(assign) => self.visit_assignment(assign),
            Statement::DoWhile(do_while) => self.visit_do_while(do_while),
        }
    }

    /// The name is registered before the initializer is checked, so `int x = x;` is accepted
    fn visit_declaration(&mut self, decl: &Declaration) -> SemanticResult {
        self.symbols
            .declare(&decl.name.name, Symbol::new(decl.ty, decl.name.span))?;
        if let Some(init) = &decl.init {
            let found = self.visit_expr(init)?;
            check_store(&decl.name, decl.ty, found)?;
        }
        self.record(TraceEvent::Declared {
            name: decl.name.name.clone(),
            ty: decl.ty,
        });
        Ok(())
    }

    fn visit_assignment(&mut self, assign: &Assignment) -> SemanticResult {
        let ty = self.lookup(&assign.target)?;
        let value = self.visit_expr(&assign.value)?;
        check_store(&assign.target, ty, value)?;
        self.record(TraceEvent::Assigned {
            name: assign.target.name.clone(),
            ty,
            value,
        });
        Ok(())
    }

    fn visit_do_while(&mut self, do_while: &DoWhile) -> SemanticResult {
        self.visit_statement_list(&do_while.body)?;
        let condition = self.visit_expr(&do_while.condition)?;
        if !condition.is_numeric() {
            return Err(SemanticError::new(
                SemanticErrorKind::NonNumericCondition(condition),
                do_while.condition.span(),
            ));
        }
        self.record(TraceEvent::CheckedLoop { condition });
        Ok(())
    }

    /// Checks an expression bottom up from an explicit work list, so operator chains of any
    /// length are checked without recursion. Events are recorded left operand first.
    fn visit_expr(&mut self, expr: &Expr) -> SemanticResult<ValueType> {
        let mut work = vec![Visit::Enter(expr)];
        let mut types = vec![];
        while let Some(visit) = work.pop() {
            match visit {
                Visit::Enter(Expr::Binary(binary)) => {
                    work.push(Visit::Exit(binary));
                    work.push(Visit::Enter(&binary.right));
                    work.push(Visit::Enter(&binary.left));
                }
                Visit::Enter(Expr::Int(int)) => {
                    self.record(TraceEvent::IntLiteral(int.value));
                    types.push(ValueType::Int);
                }
                Visit::Enter(Expr::Float(float)) => {
                    self.record(TraceEvent::FloatLiteral(float.value));
                    types.push(ValueType::Float);
                }
                Visit::Enter(Expr::Identifier(ident)) => {
                    let ty = self.lookup(ident)?;
                    self.record(TraceEvent::Identifier {
                        name: ident.name.clone(),
                        ty,
                    });
                    types.push(ty);
                }
                Visit::Exit(binary) => {
                    let (Some(right), Some(left)) = (types.pop(), types.pop()) else {
                        unreachable!("both operands are checked before their operator");
                    };
                    types.push(self.visit_binary(binary, left, right)?);
                }
            }
        }
        let Some(ty) = types.pop() else {
            unreachable!("an expression always has a type");
        };
        Ok(ty)
    }

    fn visit_binary(
        &mut self,
        binary: &BinaryExpr,
        left: ValueType,
        right: ValueType,
    ) -> SemanticResult<ValueType> {
        let promoted = left
            .promote(right)
            .filter(|_| left.is_numeric() && right.is_numeric())
            .ok_or_else(|| {
                SemanticError::new(
                    SemanticErrorKind::InvalidOperands {
                        op: binary.op.to_string(),
                        left,
                        right,
                    },
                    binary.op_span,
                )
            })?;
        let result = if binary.op.is_comparison() {
            ValueType::Int
        } else {
            promoted
        };
        self.record(TraceEvent::CheckedBinaryOp {
            op: binary.op,
            left,
            right,
            result,
        });
        Ok(result)
    }
}

/// A step of the expression walk
enum Visit<'e> {
    Enter(&'e Expr),
    /// Both operands have been checked
    Exit(&'e BinaryExpr),
}

fn check_store(target: &Ident, declared: ValueType, found: ValueType) -> SemanticResult {
    if declared.accepts(found) {
        Ok(())
    } else {
        Err(SemanticError::new(
            SemanticErrorKind::NarrowingConversion {
                name: target.name.clone(),
                declared,
                found,
            },
            target.span,
        ))
    }
}

/// Analyzes a program, returning its symbol table
pub fn analyze(program: &Program) -> SemanticResult<SymbolTable> {
    Analyzer::new()
        .collect_trace(false)
        .analyze(program)
        .map(|analysis| analysis.symbols)
}
