// csssan-core/src/sanitizers/value.rs
//! Allow-list checks for component values: property values, at-rule preludes and selectors.
//!
//! A value is either accepted unchanged or rejected. A block or function is rejected as a
//! whole if anything inside it is rejected; every offending descendant is still reported.

use log::trace;
use std::borrow::Cow;

use crate::config::{contains_ignore_case, SanitizerPolicy};
use crate::diagnostic::ErrorLog;
use crate::objects::{ComponentValue, ComponentValueList, CssFunction, CssObject, Token, TokenKind};
use crate::sanitizer::{NodeSanitizer, Sanitizer};
use crate::tokenizer::{MAX_GROUP_DEPTH, NESTING_TOO_DEEP};

pub const INVALID_TOKEN: &str = "invalid-token";
pub const DISALLOWED_FUNCTION: &str = "disallowed-function";
pub const DISALLOWED_URL: &str = "disallowed-url";
pub const UNEXPECTED_BLOCK: &str = "unexpected-block";

#[derive(Debug, Clone)]
pub struct ValueSanitizer {
    log: ErrorLog,
    functions: Vec<String>,
    allow_urls: bool,
    depth: usize,
}

impl ValueSanitizer {
    pub fn new(functions: Vec<String>, allow_urls: bool) -> Self {
        Self { log: ErrorLog::new(), functions, allow_urls, depth: 0 }
    }

    /// Checks property values and at-rule preludes.
    pub fn for_values(policy: &SanitizerPolicy) -> Self {
        Self::new(policy.values.functions.clone(), policy.values.allow_urls)
    }

    /// Checks selectors. URLs never appear in a valid selector.
    pub fn for_selectors(policy: &SanitizerPolicy) -> Self {
        Self::new(policy.selectors.functions.clone(), false)
    }

    fn check_token(&mut self, token: &Token) -> bool {
        match token.kind() {
            TokenKind::Url if !self.allow_urls => {
                self.log.record(DISALLOWED_URL, token);
                false
            }
            TokenKind::BadString
            | TokenKind::BadUrl
            | TokenKind::AtKeyword
            | TokenKind::Cdo
            | TokenKind::Cdc
            | TokenKind::Semicolon
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::RightParen
            | TokenKind::RightBracket => {
                self.log.record(INVALID_TOKEN, token);
                false
            }
            _ => true,
        }
    }

    fn check_function(&mut self, function: &CssFunction) -> bool {
        if function.name().eq_ignore_ascii_case("url") {
            if !self.allow_urls {
                self.log.record(DISALLOWED_URL, function);
                return false;
            }
            // `url("...")` may only wrap a single string.
            let mut args = function.value().iter().filter(|v| !v.is_whitespace());
            let well_formed = matches!(
                (args.next(), args.next()),
                (Some(arg), None) if arg.is_token(TokenKind::String)
            );
            if !well_formed {
                self.log.record(INVALID_TOKEN, function);
            }
            return well_formed;
        }
        if !contains_ignore_case(&self.functions, function.name()) {
            self.log.record(DISALLOWED_FUNCTION, function);
            return false;
        }
        self.check_group(function, function.value())
    }

    /// Checks the contents of a block or function, one level down.
    fn check_group(&mut self, group: &dyn CssObject, list: &ComponentValueList) -> bool {
        if self.depth >= MAX_GROUP_DEPTH {
            self.log.record(NESTING_TOO_DEEP, group);
            return false;
        }
        self.depth += 1;
        let accepted = self.check_all(list);
        self.depth -= 1;
        accepted
    }

    fn check_all(&mut self, list: &ComponentValueList) -> bool {
        let mut accepted = true;
        for value in list {
            if self.do_sanitize(value).is_none() {
                accepted = false;
            }
        }
        accepted
    }
}

impl Sanitizer for ValueSanitizer {
    fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.log
    }
}

impl NodeSanitizer<ComponentValue> for ValueSanitizer {
    fn do_sanitize<'a>(&mut self, node: &'a ComponentValue) -> Option<Cow<'a, ComponentValue>> {
        let accepted = match node {
            ComponentValue::Token(token) => self.check_token(token),
            ComponentValue::Block(block) if block.delimiter() == TokenKind::LeftBrace => {
                self.log.record(UNEXPECTED_BLOCK, block);
                false
            }
            ComponentValue::Block(block) => self.check_group(block, block.value()),
            ComponentValue::Function(function) => self.check_function(function),
        };
        if !accepted {
            trace!("Rejected value {}", node);
        }
        accepted.then_some(Cow::Borrowed(node))
    }
}
