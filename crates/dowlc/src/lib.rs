#![doc = include_str!("../README.md")]

mod frontend;

pub use frontend::*;

pub use dowl_analysis::{analyze, Analysis, Analyzer, Symbol, SymbolTable, TraceEvent};
pub use dowl_ast::Program;
pub use dowl_common::{FrontendError, LexicalError, SemanticError, Stage, SyntaxError};
pub use dowl_parsing::{parse, tokenize};
pub use dowl_tokens::{Token, TokenKind};

/// The syntax tree node types
pub mod ast {
    pub use dowl_ast::*;
}
