//! A lexical token from a source file

use dowl_common::spanned::{Span, Spanned};
use dowl_common::ValueType;
use std::fmt::{Debug, Display, Formatter};

/// A lexical token from a source file
#[derive(Clone, PartialEq)]
pub struct Token {
    span: Span,
    kind: TokenKind,
    lexeme: String,
}

impl Token {
    /// Creates a new token
    pub fn new(span: Span, kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            span,
            kind,
            lexeme: lexeme.into(),
        }
    }

    /// Creates the end of input token at the given position
    pub fn eof(span: Span) -> Self {
        Self::new(span, TokenKind::Eof, "")
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The exact source text this token was read from. Empty for [TokenKind::Eof].
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn line(&self) -> usize {
        self.span.line()
    }

    pub fn column(&self) -> usize {
        self.span.column()
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token({:?}, '{}', Line {}, Col {})",
            self.kind,
            self.lexeme,
            self.line(),
            self.column()
        )
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_eof() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "'{}'", self.lexeme)
        }
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

/// The kind for this token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Int,
    Float,
    Do,
    While,
    If,
    Else,

    Identifier(String),

    // literals
    IntLiteral(i64),
    FloatLiteral(f64),

    Plus,
    Minus,
    Star,
    Div,
    /// =
    Assign,
    /// ==
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,

    SemiColon,
    LParen,
    RParen,
    LCurly,
    RCurly,

    /// EOF, will only appear at the end of a token sequence
    Eof,
}

impl TokenKind {
    /// The value type named by this token, if it is a type keyword
    pub fn as_value_type(&self) -> Option<ValueType> {
        match self {
            TokenKind::Int => Some(ValueType::Int),
            TokenKind::Float => Some(ValueType::Float),
            _ => None,
        }
    }

    /// Whether both kinds are the same variant, ignoring any payload
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Do => "do",
            TokenKind::While => "while",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Div => "/",
            TokenKind::Assign => "=",
            TokenKind::Eq => "==",
            TokenKind::Neq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::SemiColon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LCurly => "{",
            TokenKind::RCurly => "}",
            TokenKind::Identifier(_)
            | TokenKind::IntLiteral(_)
            | TokenKind::FloatLiteral(_)
            | TokenKind::Eof => return None,
        };
        Some(symbol)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self, self.symbol()) {
            (_, Some(symbol)) => write!(f, "'{symbol}'"),
            (TokenKind::Identifier(_), None) => write!(f, "identifier"),
            (TokenKind::IntLiteral(_), None) => write!(f, "integer literal"),
            (TokenKind::FloatLiteral(_), None) => write!(f, "float literal"),
            (_, None) => write!(f, "EOF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let token = Token::new(
            Span::new(4, 1, 1, 5),
            TokenKind::Identifier("x".to_string()),
            "x",
        );
        assert_eq!(token.to_string(), "'x'");
        assert_eq!(format!("{token:?}"), "Token(Identifier(\"x\"), 'x', Line 1, Col 5)");
        let eof = Token::eof(Span::new(6, 0, 1, 7));
        assert_eq!(eof.to_string(), "EOF");
        assert_eq!(eof.lexeme(), "");
        assert!(eof.is_eof());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::SemiColon.to_string(), "';'");
        assert_eq!(TokenKind::Lte.to_string(), "'<='");
        assert_eq!(TokenKind::Identifier(String::new()).to_string(), "identifier");
        assert_eq!(TokenKind::Int.to_string(), "'int'");
    }

    #[test]
    fn test_same_kind_ignores_payload() {
        let a = TokenKind::Identifier("a".to_string());
        let b = TokenKind::Identifier("b".to_string());
        assert!(a.same_kind(&b));
        assert_ne!(a, b);
        assert!(!a.same_kind(&TokenKind::IntLiteral(1)));
    }

    #[test]
    fn test_type_keywords() {
        assert_eq!(TokenKind::Float.as_value_type(), Some(ValueType::Float));
        assert_eq!(TokenKind::Do.as_value_type(), None);
    }
}
