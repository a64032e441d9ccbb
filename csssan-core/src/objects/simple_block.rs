// csssan-core/src/objects/simple_block.rs
//! Bracket-delimited groupings: `{...}`, `[...]` and `(...)`.

use std::fmt;

use super::component_value::ComponentValueList;
use super::token::{Position, Token, TokenKind};
use super::CssObject;
use crate::errors::{CssSanError, Result};

/// A simple block. Only the opening token is stored; the closing token is always
/// derived from it, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleBlock {
    open: Token,
    value: ComponentValueList,
}

impl SimpleBlock {
    /// Wraps an empty value list in the block opened by `open`.
    ///
    /// Fails with [`CssSanError::BlockDelimiter`] unless `open` is `{`, `[` or `(`.
    pub fn new(open: Token) -> Result<Self> {
        if open.kind().matching_close().is_none() {
            return Err(CssSanError::BlockDelimiter(open.kind()));
        }
        Ok(Self { open, value: ComponentValueList::new() })
    }

    /// Creates an empty block with a freshly synthesized opening token of `delimiter`.
    pub fn new_from_delimiter(delimiter: TokenKind) -> Result<Self> {
        Self::new(Token::new(delimiter))
    }

    pub fn open_token(&self) -> &Token {
        &self.open
    }

    pub fn delimiter(&self) -> TokenKind {
        self.open.kind()
    }

    /// The closing token matching the opening delimiter.
    pub fn end_token(&self) -> Token {
        // The constructor guarantees an opening delimiter.
        let kind = self.open.kind().matching_close().unwrap_or(TokenKind::RightBrace);
        Token::new(kind)
    }

    pub fn value(&self) -> &ComponentValueList {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ComponentValueList {
        &mut self.value
    }

    pub fn set_value(&mut self, value: ComponentValueList) {
        self.value = value;
    }
}

impl CssObject for SimpleBlock {
    fn position(&self) -> Position {
        self.open.position()
    }

    fn to_token_array(&self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.value.len() + 2);
        tokens.push(self.open.clone());
        tokens.extend(self.value.to_token_array());
        tokens.push(self.end_token());
        tokens
    }
}

impl fmt::Display for SimpleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_delimiter() {
        let err = SimpleBlock::new(Token::with(TokenKind::Ident, "x")).unwrap_err();
        assert_eq!(err, CssSanError::BlockDelimiter(TokenKind::Ident));
        assert_eq!(
            err.to_string(),
            "A SimpleBlock is delimited by either {}, [], or (); got ident"
        );
        assert!(SimpleBlock::new_from_delimiter(TokenKind::RightBrace).is_err());
    }

    #[test]
    fn test_close_token_is_derived() {
        for (open, close) in [
            (TokenKind::LeftBrace, TokenKind::RightBrace),
            (TokenKind::LeftBracket, TokenKind::RightBracket),
            (TokenKind::LeftParen, TokenKind::RightParen),
        ] {
            let block = SimpleBlock::new_from_delimiter(open).unwrap();
            assert_eq!(block.end_token().kind(), close);
            assert!(block.value().is_empty());
        }
    }

    #[test]
    fn test_token_array_and_position() {
        let mut block = SimpleBlock::new(Token::new(TokenKind::LeftParen).at(4, 9)).unwrap();
        block.value_mut().add(Token::with(TokenKind::Number, "1"));
        assert_eq!(block.position(), Position::new(4, 9));
        assert_eq!(
            block.to_token_array(),
            vec![
                Token::new(TokenKind::LeftParen),
                Token::with(TokenKind::Number, "1"),
                Token::new(TokenKind::RightParen),
            ]
        );
        assert_eq!(block.to_string(), "(1)");
    }
}
