// csssan-core/src/sanitizers/style_rule.rs
//! Qualified rules: `selector { declarations }`.

use log::{debug, warn};
use std::borrow::Cow;

use crate::config::SanitizerPolicy;
use crate::diagnostic::ErrorLog;
use crate::objects::{ComponentValue, CssObject, Rule};
use crate::sanitizer::{sanitize_list, NodeSanitizer, RuleIndex, RuleSanitizer, Sanitizer};
use crate::sanitizers::declaration::DeclarationSanitizer;
use crate::sanitizers::sanitize_declaration_block;
use crate::sanitizers::value::ValueSanitizer;

pub const INVALID_SELECTOR: &str = "invalid-selector";

#[derive(Debug, Clone)]
pub struct StyleRuleSanitizer {
    log: ErrorLog,
    index: RuleIndex,
    selectors: ValueSanitizer,
    declarations: DeclarationSanitizer,
}

impl StyleRuleSanitizer {
    pub fn from_policy(policy: &SanitizerPolicy) -> Self {
        Self {
            log: ErrorLog::new(),
            index: policy.style_rules.index,
            selectors: ValueSanitizer::for_selectors(policy),
            declarations: DeclarationSanitizer::from_policy(policy),
        }
    }
}

impl Sanitizer for StyleRuleSanitizer {
    fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.log
    }
}

impl NodeSanitizer<Rule> for StyleRuleSanitizer {
    fn do_sanitize<'a>(&mut self, node: &'a Rule) -> Option<Cow<'a, Rule>> {
        let Rule::Qualified(rule) = node else {
            return None;
        };

        if rule.prelude().iter().all(ComponentValue::is_whitespace) {
            self.log.record(INVALID_SELECTOR, node);
            return None;
        }
        let selector = sanitize_list(&mut self.log, &mut self.selectors, rule.prelude());
        if selector.len() != rule.prelude().len() {
            self.log.record(INVALID_SELECTOR, node);
            return None;
        }

        let Some(block) = sanitize_declaration_block(&mut self.log, &mut self.declarations, rule.block())
        else {
            return Some(Cow::Borrowed(node));
        };
        debug!("Rewrote declarations of style rule at {}", rule.position());
        let mut rule = rule.clone();
        if let Err(e) = rule.set_block(block) {
            warn!("Discarding style rule: {}", e);
            return None;
        }
        Some(Cow::Owned(Rule::Qualified(rule)))
    }
}

impl RuleSanitizer for StyleRuleSanitizer {
    fn handles_rule(&self, rule: &Rule) -> bool {
        matches!(rule, Rule::Qualified(_))
    }

    fn index(&self) -> RuleIndex {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::CssObject;
    use crate::parser::Parser;

    fn sanitizer() -> StyleRuleSanitizer {
        StyleRuleSanitizer::from_policy(&SanitizerPolicy::load_default_policy().unwrap())
    }

    #[test]
    fn test_clean_rule_is_returned_unchanged() {
        let rules = Parser::new_from_string("a:not(.b) > c { color: red;  width: 1px }").parse_stylesheet();
        let mut san = sanitizer();
        let result = san.sanitize(&rules[0]).unwrap();
        assert!(std::ptr::eq(result.as_ref(), &rules[0]));
        assert!(san.sanitization_errors().is_empty());
    }

    #[test]
    fn test_bad_declarations_are_removed() {
        let rules = Parser::new_from_string("a { color: red; behavior: url(x); width: 1px }").parse_stylesheet();
        let mut san = sanitizer();
        let result = san.sanitize(&rules[0]).unwrap();
        assert_eq!(result.to_css(), "a {color:red;width:1px}");
        let codes: Vec<_> = san.sanitization_errors().into_iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["unrecognized-property"]);
    }

    #[test]
    fn test_bad_selector_drops_rule() {
        let rules = Parser::new_from_string("a:has(b) { color: red }").parse_stylesheet();
        let mut san = sanitizer();
        assert!(san.sanitize(&rules[0]).is_none());
        let codes: Vec<_> = san.sanitization_errors().into_iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["disallowed-function", INVALID_SELECTOR]);
    }

    #[test]
    fn test_handles_only_qualified_rules() {
        let rules = Parser::new_from_string("@media x {} a {}").parse_stylesheet();
        let san = sanitizer();
        assert!(!san.handles_rule(&rules[0]));
        assert!(san.handles_rule(&rules[1]));
        assert_eq!(san.index(), RuleIndex::at(3));
    }
}
