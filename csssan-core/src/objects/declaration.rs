// csssan-core/src/objects/declaration.rs
//! Property declarations (`color: red !important`) and declaration lists.

use std::fmt;

use super::component_value::ComponentValueList;
use super::token::{Position, Token, TokenKind};
use super::CssObject;
use crate::errors::{CssSanError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: Token,
    value: ComponentValueList,
    important: bool,
}

impl Declaration {
    pub fn new(name: Token) -> Result<Self> {
        if name.kind() != TokenKind::Ident {
            return Err(CssSanError::NotIdent(name.kind()));
        }
        Ok(Self { name, value: ComponentValueList::new(), important: false })
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn name_token(&self) -> &Token {
        &self.name
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

    pub fn is_important(&self) -> bool {
        self.important
    }

    pub fn set_important(&mut self, important: bool) {
        self.important = important;
    }
}

impl CssObject for Declaration {
    fn position(&self) -> Position {
        self.name.position()
    }

    fn to_token_array(&self) -> Vec<Token> {
        let mut tokens = vec![self.name.clone(), Token::new(TokenKind::Colon)];
        tokens.extend(self.value.to_token_array());
        if self.important {
            tokens.push(Token::new(TokenKind::Whitespace).insignificant());
            tokens.push(Token::with(TokenKind::Delim, "!"));
            tokens.push(Token::with(TokenKind::Ident, "important"));
        }
        tokens
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// The body of a declaration block, serialized with `;` separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationList {
    declarations: Vec<Declaration>,
}

impl DeclarationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }
}

impl CssObject for DeclarationList {
    fn position(&self) -> Position {
        self.declarations.first().map(CssObject::position).unwrap_or_default()
    }

    fn to_token_array(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                tokens.push(Token::new(TokenKind::Semicolon));
            }
            tokens.extend(declaration.to_token_array());
        }
        tokens
    }
}

impl FromIterator<Declaration> for DeclarationList {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self { declarations: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a DeclarationList {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

impl fmt::Display for DeclarationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
