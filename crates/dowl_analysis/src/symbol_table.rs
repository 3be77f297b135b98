//! The flat, program wide registry of declared variables

use dowl_common::error::SemanticErrorKind;
use dowl_common::{SemanticError, Span, Spanned, ValueType};
use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

/// A declared variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub ty: ValueType,
    /// Where the declaring identifier is
    pub span: Span,
}

impl Symbol {
    pub fn new(ty: ValueType, span: Span) -> Self {
        Self { ty, span }
    }
}

impl Spanned for Symbol {
    fn span(&self) -> Span {
        self.span
    }
}

/// Maps variable names to their symbols, iterating in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    /// Creates a new, empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new symbol.
    ///
    /// The first declaration of a name wins. Declaring it again is an
    /// [`AlreadyDeclared`](SemanticErrorKind::AlreadyDeclared) error located at the new symbol.
    pub fn declare(&mut self, name: impl AsRef<str>, symbol: Symbol) -> Result<(), SemanticError> {
        let name = name.as_ref();
        if self.symbols.contains_key(name) {
            return Err(SemanticError::new(
                SemanticErrorKind::AlreadyDeclared(name.to_string()),
                symbol.span,
            ));
        }
        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&Symbol> {
        self.symbols.get(name.as_ref())
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.symbols.contains_key(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (name, symbol) in self.iter() {
            writeln!(f, "{name}: {}", symbol.ty)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn at(line: usize) -> Span {
        Span::new(0, 1, line, 5)
    }

    #[test]
    fn test_declare_and_get() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        table.declare("x", Symbol::new(ValueType::Int, at(1))).unwrap();
        assert!(table.contains("x"));
        assert_eq!(table.get("x").map(|s| s.ty), Some(ValueType::Int));
        assert!(table.get("y").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_redeclare_is_rejected() {
        let mut table = SymbolTable::new();
        table.declare("x", Symbol::new(ValueType::Int, at(1))).unwrap();
        let err = table
            .declare("x", Symbol::new(ValueType::Float, at(2)))
            .expect_err("should not redeclare");
        assert_eq!(err.kind(), &SemanticErrorKind::AlreadyDeclared("x".to_string()));
        assert_eq!(err.line(), 2);
        assert_eq!(table.get("x").map(|s| s.ty), Some(ValueType::Int), "first declaration wins");
    }

    #[test]
    fn test_declaration_order() {
        let mut table = SymbolTable::new();
        for (i, name) in ["zeta", "alpha", "mid"].into_iter().enumerate() {
            table.declare(name, Symbol::new(ValueType::Float, at(i + 1))).unwrap();
        }
        let names = table.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(table.to_string(), "zeta: float\nalpha: float\nmid: float\n");
    }
}
