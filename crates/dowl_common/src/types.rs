//! The value types of the language

use strum::{AsRefStr, Display, EnumString};

/// The type of a variable or of an expression's result.
///
/// `Float` is wider than `Int`: mixing both in an operator promotes to `Float`, and a `Float`
/// value can never be stored into an `Int` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ValueType {
    Int,
    Float,
}

impl ValueType {
    /// Whether values of this type can take part in arithmetic and comparisons.
    pub const fn is_numeric(self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float)
    }

    /// The result type of an arithmetic operator applied to `self` and `other`, if any.
    pub const fn promote(self, other: ValueType) -> Option<ValueType> {
        match (self, other) {
            (ValueType::Float, _) | (_, ValueType::Float) => Some(ValueType::Float),
            (ValueType::Int, ValueType::Int) => Some(ValueType::Int),
        }
    }

    /// Whether a value of type `value` may be stored in a variable of this type.
    pub const fn accepts(self, value: ValueType) -> bool {
        !matches!((self, value), (ValueType::Int, ValueType::Float))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_promotion() {
        assert_eq!(ValueType::Int.promote(ValueType::Int), Some(ValueType::Int));
        assert_eq!(ValueType::Int.promote(ValueType::Float), Some(ValueType::Float));
        assert_eq!(ValueType::Float.promote(ValueType::Int), Some(ValueType::Float));
    }

    #[test]
    fn test_narrowing_rejected() {
        assert!(!ValueType::Int.accepts(ValueType::Float));
        assert!(ValueType::Float.accepts(ValueType::Int));
        assert!(ValueType::Int.accepts(ValueType::Int));
    }

    #[test]
    fn test_keyword_names() {
        assert_eq!(ValueType::from_str("float").unwrap(), ValueType::Float);
        assert_eq!(ValueType::Int.to_string(), "int");
        assert_eq!(ValueType::Float.as_ref(), "float");
    }
}
