#![doc = include_str!("../README.md")]

pub mod analyzer;
pub mod symbol_table;

pub use analyzer::{analyze, Analysis, Analyzer, TraceEvent};
pub use symbol_table::{Symbol, SymbolTable};
