#![doc = include_str!("../README.md")]

pub mod error;
pub mod nom_helpers;
pub mod spanned;
pub mod types;

pub use error::{FrontendError, LexicalError, SemanticError, SpannedError, Stage, SyntaxError};
pub use spanned::{Span, Spanned};
pub use types::ValueType;
