// csssan-core/src/objects/css_function.rs
//! Function component values, e.g. `rgb(0, 0, 0)`.

use std::fmt;

use super::component_value::ComponentValueList;
use super::token::{Position, Token, TokenKind};
use super::CssObject;
use crate::errors::{CssSanError, Result};

/// A function: a function token (`name(`), its arguments, and an implied `)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssFunction {
    name: Token,
    value: ComponentValueList,
}

impl CssFunction {
    pub fn new(name: Token) -> Result<Self> {
        if name.kind() != TokenKind::Function {
            return Err(CssSanError::NotFunction(name.kind()));
        }
        Ok(Self { name, value: ComponentValueList::new() })
    }

    pub fn new_from_name(name: &str) -> Self {
        Self {
            name: Token::with(TokenKind::Function, name),
            value: ComponentValueList::new(),
        }
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
}

impl CssObject for CssFunction {
    fn position(&self) -> Position {
        self.name.position()
    }

    fn to_token_array(&self) -> Vec<Token> {
        let mut tokens = vec![self.name.clone()];
        tokens.extend(self.value.to_token_array());
        tokens.push(Token::new(TokenKind::RightParen));
        tokens
    }
}

impl fmt::Display for CssFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
