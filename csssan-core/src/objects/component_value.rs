// csssan-core/src/objects/component_value.rs
//! Component values and the ordered lists that hold them.

use std::fmt;
use std::ops::Index;

use super::css_function::CssFunction;
use super::simple_block::SimpleBlock;
use super::token::{Position, Token, TokenKind};
use super::CssObject;

/// A token or a grouping node, as found in preludes and block bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentValue {
    Token(Token),
    Block(SimpleBlock),
    Function(CssFunction),
}

impl ComponentValue {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            ComponentValue::Token(token) => Some(token),
            _ => None,
        }
    }

    /// True if this is a plain token of the given kind.
    pub fn is_token(&self, kind: TokenKind) -> bool {
        matches!(self, ComponentValue::Token(t) if t.kind() == kind)
    }

    pub fn is_whitespace(&self) -> bool {
        self.is_token(TokenKind::Whitespace)
    }
}

impl CssObject for ComponentValue {
    fn position(&self) -> Position {
        match self {
            ComponentValue::Token(t) => t.position(),
            ComponentValue::Block(b) => b.position(),
            ComponentValue::Function(f) => f.position(),
        }
    }

    fn to_token_array(&self) -> Vec<Token> {
        match self {
            ComponentValue::Token(t) => vec![t.clone()],
            ComponentValue::Block(b) => b.to_token_array(),
            ComponentValue::Function(f) => f.to_token_array(),
        }
    }
}

impl From<Token> for ComponentValue {
    fn from(token: Token) -> Self {
        ComponentValue::Token(token)
    }
}

impl From<SimpleBlock> for ComponentValue {
    fn from(block: SimpleBlock) -> Self {
        ComponentValue::Block(block)
    }
}

impl From<CssFunction> for ComponentValue {
    fn from(function: CssFunction) -> Self {
        ComponentValue::Function(function)
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// An ordered, owned sequence of component values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentValueList {
    values: Vec<ComponentValue>,
}

impl ComponentValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: impl Into<ComponentValue>) {
        self.values.push(value.into());
    }

    /// Inserts at `index`, shifting later values right. Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: impl Into<ComponentValue>) {
        self.values.insert(index, value.into());
    }

    pub fn remove(&mut self, index: usize) -> Option<ComponentValue> {
        if index < self.values.len() {
            Some(self.values.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ComponentValue> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentValue> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[ComponentValue] {
        &self.values
    }

    /// Drops leading and trailing whitespace tokens in place.
    pub fn trim_whitespace(&mut self) {
        while self.values.last().is_some_and(ComponentValue::is_whitespace) {
            self.values.pop();
        }
        let leading = self.values.iter().take_while(|v| v.is_whitespace()).count();
        self.values.drain(..leading);
    }
}

impl CssObject for ComponentValueList {
    fn position(&self) -> Position {
        self.values.first().map(CssObject::position).unwrap_or_default()
    }

    fn to_token_array(&self) -> Vec<Token> {
        self.values.iter().flat_map(CssObject::to_token_array).collect()
    }
}

impl Index<usize> for ComponentValueList {
    type Output = ComponentValue;

    fn index(&self, index: usize) -> &ComponentValue {
        &self.values[index]
    }
}

impl From<Vec<ComponentValue>> for ComponentValueList {
    fn from(values: Vec<ComponentValue>) -> Self {
        Self { values }
    }
}

impl<V: Into<ComponentValue>> FromIterator<V> for ComponentValueList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(Into::into).collect() }
    }
}

impl IntoIterator for ComponentValueList {
    type Item = ComponentValue;
    type IntoIter = std::vec::IntoIter<ComponentValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComponentValueList {
    type Item = &'a ComponentValue;
    type IntoIter = std::slice::Iter<'a, ComponentValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for ComponentValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
