// csssan-core/src/objects/rule.rs
//! Rules: at-rules (`@media ... { }`, `@import ...;`) and qualified rules (`a { }`).

use std::fmt;

use super::component_value::ComponentValueList;
use super::simple_block::SimpleBlock;
use super::token::{Position, Token, TokenKind};
use super::CssObject;
use crate::errors::{CssSanError, Result};

/// An at-rule: a keyword, a prelude, and either a `{}` block or a terminating `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pp_comments: Vec<Token>,
    keyword: Token,
    prelude: ComponentValueList,
    block: Option<SimpleBlock>,
}

impl AtRule {
    /// Starts an at-rule from its keyword token.
    ///
    /// Fails with [`CssSanError::NotAtKeyword`] unless `keyword` is an at-keyword.
    pub fn new(keyword: Token) -> Result<Self> {
        if keyword.kind() != TokenKind::AtKeyword {
            return Err(CssSanError::NotAtKeyword(keyword.kind()));
        }
        Ok(Self {
            pp_comments: Vec::new(),
            keyword,
            prelude: ComponentValueList::new(),
            block: None,
        })
    }

    /// Builds an at-rule with a synthesized keyword, e.g. `AtRule::new_from_name("media")`.
    pub fn new_from_name(name: &str) -> Self {
        Self {
            pp_comments: Vec::new(),
            keyword: Token::with(TokenKind::AtKeyword, name),
            prelude: ComponentValueList::new(),
            block: None,
        }
    }

    pub fn name(&self) -> &str {
        self.keyword.value()
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }

    pub fn pp_comments(&self) -> &[Token] {
        &self.pp_comments
    }

    pub fn set_pp_comments(&mut self, comments: Vec<Token>) {
        self.pp_comments = comments;
    }

    pub fn prelude(&self) -> &ComponentValueList {
        &self.prelude
    }

    pub fn prelude_mut(&mut self) -> &mut ComponentValueList {
        &mut self.prelude
    }

    pub fn block(&self) -> Option<&SimpleBlock> {
        self.block.as_ref()
    }

    pub fn block_mut(&mut self) -> Option<&mut SimpleBlock> {
        self.block.as_mut()
    }

    /// Attaches (or with `None`, removes) the rule's block.
    ///
    /// Fails with [`CssSanError::AtRuleBlockDelimiter`] unless the block is `{}`-delimited.
    pub fn set_block(&mut self, block: Option<SimpleBlock>) -> Result<()> {
        if let Some(b) = &block {
            if b.delimiter() != TokenKind::LeftBrace {
                return Err(CssSanError::AtRuleBlockDelimiter);
            }
        }
        self.block = block;
        Ok(())
    }
}

impl CssObject for AtRule {
    fn position(&self) -> Position {
        self.keyword.position()
    }

    fn to_token_array(&self) -> Vec<Token> {
        let mut tokens = pp_comment_tokens(&self.pp_comments);
        tokens.push(self.keyword.clone());
        tokens.extend(self.prelude.to_token_array());
        match &self.block {
            Some(block) => tokens.extend(block.to_token_array()),
            None => tokens.push(Token::new(TokenKind::Semicolon)),
        }
        tokens
    }
}

impl fmt::Display for AtRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// A qualified rule: a prelude (usually a selector list) followed by a `{}` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedRule {
    pp_comments: Vec<Token>,
    position: Position,
    prelude: ComponentValueList,
    block: SimpleBlock,
}

impl QualifiedRule {
    pub fn new() -> Self {
        Self::at(Position::UNKNOWN)
    }

    pub fn at(position: Position) -> Self {
        Self {
            pp_comments: Vec::new(),
            position,
            prelude: ComponentValueList::new(),
            block: empty_brace_block(),
        }
    }

    pub fn pp_comments(&self) -> &[Token] {
        &self.pp_comments
    }

    pub fn set_pp_comments(&mut self, comments: Vec<Token>) {
        self.pp_comments = comments;
    }

    pub fn prelude(&self) -> &ComponentValueList {
        &self.prelude
    }

    pub fn prelude_mut(&mut self) -> &mut ComponentValueList {
        &mut self.prelude
    }

    pub fn block(&self) -> &SimpleBlock {
        &self.block
    }

    pub fn block_mut(&mut self) -> &mut SimpleBlock {
        &mut self.block
    }

    pub fn set_block(&mut self, block: SimpleBlock) -> Result<()> {
        if block.delimiter() != TokenKind::LeftBrace {
            return Err(CssSanError::QualifiedRuleBlockDelimiter);
        }
        self.block = block;
        Ok(())
    }
}

impl Default for QualifiedRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CssObject for QualifiedRule {
    fn position(&self) -> Position {
        self.position
    }

    fn to_token_array(&self) -> Vec<Token> {
        let mut tokens = pp_comment_tokens(&self.pp_comments);
        tokens.extend(self.prelude.to_token_array());
        tokens.extend(self.block.to_token_array());
        tokens
    }
}

impl fmt::Display for QualifiedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Any rule that can appear in a [`RuleList`](super::rule_list::RuleList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    At(AtRule),
    Qualified(QualifiedRule),
}

impl Rule {
    /// The at-keyword name, or `None` for qualified rules.
    pub fn name(&self) -> Option<&str> {
        match self {
            Rule::At(rule) => Some(rule.name()),
            Rule::Qualified(_) => None,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            Rule::At(rule) => Some(rule),
            Rule::Qualified(_) => None,
        }
    }

    pub fn as_qualified_rule(&self) -> Option<&QualifiedRule> {
        match self {
            Rule::Qualified(rule) => Some(rule),
            Rule::At(_) => None,
        }
    }

    pub fn pp_comments(&self) -> &[Token] {
        match self {
            Rule::At(rule) => rule.pp_comments(),
            Rule::Qualified(rule) => rule.pp_comments(),
        }
    }

    pub fn prelude(&self) -> &ComponentValueList {
        match self {
            Rule::At(rule) => rule.prelude(),
            Rule::Qualified(rule) => rule.prelude(),
        }
    }

    pub fn block(&self) -> Option<&SimpleBlock> {
        match self {
            Rule::At(rule) => rule.block(),
            Rule::Qualified(rule) => Some(rule.block()),
        }
    }
}

impl CssObject for Rule {
    fn position(&self) -> Position {
        match self {
            Rule::At(rule) => rule.position(),
            Rule::Qualified(rule) => rule.position(),
        }
    }

    fn to_token_array(&self) -> Vec<Token> {
        match self {
            Rule::At(rule) => rule.to_token_array(),
            Rule::Qualified(rule) => rule.to_token_array(),
        }
    }
}

impl From<AtRule> for Rule {
    fn from(rule: AtRule) -> Self {
        Rule::At(rule)
    }
}

impl From<QualifiedRule> for Rule {
    fn from(rule: QualifiedRule) -> Self {
        Rule::Qualified(rule)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn pp_comment_tokens(comments: &[Token]) -> Vec<Token> {
    let mut tokens = comments.to_vec();
    if !tokens.is_empty() {
        tokens.push(Token::new(TokenKind::Whitespace).insignificant());
    }
    tokens
}

fn empty_brace_block() -> SimpleBlock {
    match SimpleBlock::new_from_delimiter(TokenKind::LeftBrace) {
        Ok(block) => block,
        Err(_) => unreachable!("`{{` always opens a simple block"),
    }
}
