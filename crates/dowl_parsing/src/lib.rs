#![doc = include_str!("../README.md")]

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, Lexer};
pub use parser::{parse, Parser};
