// csssan-core/src/sanitizers/at_rule.rs
//! At-rules allowed by name, one sanitizer per [`AtRulePolicy`].
//!
//! The sanitizer checks that the rule has the block shape its policy asks for, that the
//! prelude passes the value checks, and then sanitizes the block contents: nested rules
//! for conditional group rules (`@media`, `@supports`), declarations for descriptor
//! blocks (`@font-face`, `@page`).

use log::{debug, warn};
use std::borrow::Cow;

use crate::config::{AtRulePolicy, BlockPolicy, SanitizerPolicy};
use crate::diagnostic::ErrorLog;
use crate::objects::{AtRule, CssObject, Rule, SimpleBlock};
use crate::parser::Parser;
use crate::sanitizer::{sanitize_list, sanitize_rules, NodeSanitizer, RuleIndex, RuleSanitizer, Sanitizer};
use crate::sanitizers::declaration::DeclarationSanitizer;
use crate::sanitizers::style_rule::StyleRuleSanitizer;
use crate::sanitizers::value::ValueSanitizer;
use crate::sanitizers::{rebuild_block, sanitize_declaration_block};

pub const INVALID_AT_RULE_PRELUDE: &str = "invalid-at-rule-prelude";
pub const AT_RULE_BLOCK_REQUIRED: &str = "at-rule-block-required";
pub const AT_RULE_BLOCK_NOT_ALLOWED: &str = "at-rule-block-not-allowed";

/// How deeply conditional group rules may nest inside each other.
pub const MAX_NESTING_DEPTH: usize = 3;

pub struct AtRuleSanitizer {
    log: ErrorLog,
    policy: AtRulePolicy,
    prelude: ValueSanitizer,
    declarations: DeclarationSanitizer,
    nested: Vec<Box<dyn RuleSanitizer>>,
}

impl AtRuleSanitizer {
    /// Builds the sanitizer for the at-rule described by `rule`, a member of `policy`.
    pub fn new(rule: &AtRulePolicy, policy: &SanitizerPolicy) -> Self {
        Self::with_depth(rule, policy, 0)
    }

    fn with_depth(rule: &AtRulePolicy, policy: &SanitizerPolicy, depth: usize) -> Self {
        let mut nested: Vec<Box<dyn RuleSanitizer>> = Vec::new();
        if rule.block == BlockPolicy::Rules {
            if depth < MAX_NESTING_DEPTH {
                for group in policy.at_rules.iter().filter(|r| r.block == BlockPolicy::Rules) {
                    nested.push(Box::new(Self::with_depth(group, policy, depth + 1)));
                }
            }
            if policy.style_rules.enabled {
                nested.push(Box::new(StyleRuleSanitizer::from_policy(policy)));
            }
        }

        Self {
            log: ErrorLog::new(),
            policy: rule.clone(),
            prelude: ValueSanitizer::for_values(policy),
            declarations: DeclarationSanitizer::from_policy(policy),
            nested,
        }
    }

    pub fn name(&self) -> &str {
        &self.policy.name
    }

    fn check_block_shape(&mut self, rule: &AtRule) -> bool {
        match (self.policy.block, rule.block()) {
            (BlockPolicy::None, Some(_)) => {
                self.log.record(AT_RULE_BLOCK_NOT_ALLOWED, rule);
                false
            }
            (BlockPolicy::Rules | BlockPolicy::Declarations, None) => {
                self.log.record(AT_RULE_BLOCK_REQUIRED, rule);
                false
            }
            _ => true,
        }
    }

    /// Returns the replacement block, or `None` if `block` can be kept as it is.
    fn sanitize_block(&mut self, block: &SimpleBlock) -> Option<SimpleBlock> {
        match self.policy.block {
            BlockPolicy::Rules => {
                let mut parser = Parser::new_from_tokens(block.value().to_token_array());
                let rules = parser.parse_rule_list();
                let parse_errors = parser.take_parse_errors();
                let clean = parse_errors.is_empty();
                self.log.extend(parse_errors);

                let sanitized = sanitize_rules(&mut self.log, &mut self.nested, &rules);
                if clean && sanitized == rules {
                    return None;
                }
                Some(rebuild_block(block, sanitized.to_token_array()))
            }
            BlockPolicy::Declarations | BlockPolicy::Optional => {
                sanitize_declaration_block(&mut self.log, &mut self.declarations, block)
            }
            BlockPolicy::None => None,
        }
    }
}

impl Sanitizer for AtRuleSanitizer {
    fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.log
    }
}

impl NodeSanitizer<Rule> for AtRuleSanitizer {
    fn do_sanitize<'a>(&mut self, node: &'a Rule) -> Option<Cow<'a, Rule>> {
        let Rule::At(rule) = node else {
            return None;
        };
        if !self.check_block_shape(rule) {
            return None;
        }

        let prelude = sanitize_list(&mut self.log, &mut self.prelude, rule.prelude());
        if prelude.len() != rule.prelude().len() {
            self.log.record(INVALID_AT_RULE_PRELUDE, rule);
            return None;
        }

        let Some(block) = rule.block().and_then(|block| self.sanitize_block(block)) else {
            return Some(Cow::Borrowed(node));
        };
        debug!("Rewrote block of @{} at {}", rule.name(), rule.position());
        let mut rule = rule.clone();
        if let Err(e) = rule.set_block(Some(block)) {
            warn!("Discarding @{}: {}", rule.name(), e);
            return None;
        }
        Some(Cow::Owned(Rule::At(rule)))
    }
}

impl RuleSanitizer for AtRuleSanitizer {
    fn handles_rule(&self, rule: &Rule) -> bool {
        rule.name().is_some_and(|name| name.eq_ignore_ascii_case(&self.policy.name))
    }

    fn index(&self) -> RuleIndex {
        self.policy.index
    }
}
