// csssan-core/src/objects/rule_list.rs
use std::fmt;
use std::ops::Index;

use super::rule::Rule;
use super::token::{Position, Token};
use super::CssObject;

/// An ordered, owned sequence of rules, e.g. the top level of a stylesheet or the
/// contents of an `@media` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleList {
    rules: Vec<Rule>,
}

impl RuleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: impl Into<Rule>) {
        self.rules.push(rule.into());
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }
}

impl CssObject for RuleList {
    fn position(&self) -> Position {
        self.rules.first().map(CssObject::position).unwrap_or_default()
    }

    fn to_token_array(&self) -> Vec<Token> {
        self.rules.iter().flat_map(CssObject::to_token_array).collect()
    }
}

impl Index<usize> for RuleList {
    type Output = Rule;

    fn index(&self, index: usize) -> &Rule {
        &self.rules[index]
    }
}

impl From<Vec<Rule>> for RuleList {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl<R: Into<Rule>> FromIterator<R> for RuleList {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self { rules: iter.into_iter().map(Into::into).collect() }
    }
}

impl IntoIterator for RuleList {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
