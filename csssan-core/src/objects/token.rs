// csssan-core/src/objects/token.rs
//! Lexical tokens and source positions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CssObject;

/// A `(line, column)` pair locating a node in the source stylesheet.
///
/// Both components are 1-based. Tokens synthesized by the library (separators,
/// replacement blocks, keywords built from a name) carry [`Position::UNKNOWN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: i64,
    pub column: i64,
}

impl Position {
    pub const UNKNOWN: Position = Position { line: -1, column: -1 };

    pub fn new(line: i64, column: i64) -> Self {
        Self { line, column }
    }

    pub fn is_known(&self) -> bool {
        self.line >= 0 && self.column >= 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lexical class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Ident,
    Function,
    AtKeyword,
    Hash,
    String,
    BadString,
    Url,
    BadUrl,
    Delim,
    Number,
    Percentage,
    Dimension,
    Whitespace,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    IncludeMatch,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
    /// A comment preserved for a downstream preprocessor (e.g. `/* @noflip */`).
    PpComment,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Ident => "ident",
            TokenKind::Function => "function",
            TokenKind::AtKeyword => "at-keyword",
            TokenKind::Hash => "hash",
            TokenKind::String => "string",
            TokenKind::BadString => "bad-string",
            TokenKind::Url => "url",
            TokenKind::BadUrl => "bad-url",
            TokenKind::Delim => "delim",
            TokenKind::Number => "number",
            TokenKind::Percentage => "percentage",
            TokenKind::Dimension => "dimension",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Cdo => "CDO",
            TokenKind::Cdc => "CDC",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::IncludeMatch => "include-match",
            TokenKind::DashMatch => "dash-match",
            TokenKind::PrefixMatch => "prefix-match",
            TokenKind::SuffixMatch => "suffix-match",
            TokenKind::SubstringMatch => "substring-match",
            TokenKind::PpComment => "preprocessor-comment",
        }
    }

    /// The closing kind for an opening delimiter, or `None` if `self` does not open a block.
    pub fn matching_close(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LeftBrace => Some(TokenKind::RightBrace),
            TokenKind::LeftBracket => Some(TokenKind::RightBracket),
            TokenKind::LeftParen => Some(TokenKind::RightParen),
            _ => None,
        }
    }

    /// `{`, `[`, `(` or a function name, each of which starts a nested group.
    pub fn opens_group(&self) -> bool {
        self.matching_close().is_some() || *self == TokenKind::Function
    }

    pub fn closes_group(&self) -> bool {
        matches!(self, TokenKind::RightBrace | TokenKind::RightBracket | TokenKind::RightParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexical token.
///
/// Tokens are value objects. Equality compares kind, value and significance; the
/// position is informational and deliberately left out, so a synthesized token
/// compares equal to the same token read from source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    kind: TokenKind,
    value: String,
    position: Position,
    significant: bool,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            value: String::new(),
            position: Position::UNKNOWN,
            significant: true,
        }
    }

    /// Shorthand for `Token::new(kind).with_value(value)`.
    pub fn with(kind: TokenKind, value: impl Into<String>) -> Self {
        Self::new(kind).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn at(mut self, line: i64, column: i64) -> Self {
        self.position = Position::new(line, column);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Marks whitespace as a separator inserted by the library rather than source text.
    pub fn insignificant(mut self) -> Self {
        self.significant = false;
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn line(&self) -> i64 {
        self.position.line
    }

    pub fn column(&self) -> i64 {
        self.position.column
    }

    pub fn is_significant(&self) -> bool {
        self.significant
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// True for an ident (or delim) whose value matches `value` ASCII case-insensitively.
    pub fn matches(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value.eq_ignore_ascii_case(value)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value && self.significant == other.significant
    }
}

impl Eq for Token {}

impl CssObject for Token {
    fn position(&self) -> Position {
        self.position
    }

    fn to_token_array(&self) -> Vec<Token> {
        vec![self.clone()]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::util::write_token(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_position() {
        let a = Token::new(TokenKind::Whitespace).at(1, 2);
        let b = Token::new(TokenKind::Whitespace).at(42, 23);
        assert_eq!(a, b);
        assert_ne!(a, Token::new(TokenKind::Whitespace).insignificant());
        assert_ne!(a, Token::with(TokenKind::Whitespace, "\n"));
    }

    #[test]
    fn test_clone_is_independent_and_equal() {
        let token = Token::with(TokenKind::Ident, "color").at(3, 4);
        let copy = token.clone();
        assert_eq!(token, copy);
        assert_eq!(copy.position(), Position::new(3, 4));
        assert!(!std::ptr::eq(&token, &copy));
    }

    #[test]
    fn test_defaults() {
        let token = Token::new(TokenKind::Semicolon);
        assert_eq!(token.value(), "");
        assert_eq!(token.position(), Position::UNKNOWN);
        assert!(token.is_significant());
        assert!(!token.position().is_known());
    }

    #[test]
    fn test_matching_close() {
        assert_eq!(TokenKind::LeftBrace.matching_close(), Some(TokenKind::RightBrace));
        assert_eq!(TokenKind::LeftBracket.matching_close(), Some(TokenKind::RightBracket));
        assert_eq!(TokenKind::LeftParen.matching_close(), Some(TokenKind::RightParen));
        assert_eq!(TokenKind::Ident.matching_close(), None);
    }
}
