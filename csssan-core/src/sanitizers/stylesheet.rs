// csssan-core/src/sanitizers/stylesheet.rs
//! The top-level sanitizer for a whole stylesheet.

use log::{debug, info};
use std::borrow::Cow;

use crate::config::SanitizerPolicy;
use crate::diagnostic::ErrorLog;
use crate::objects::RuleList;
use crate::sanitizer::{sanitize_rules, NodeSanitizer, RuleSanitizer, Sanitizer};
use crate::sanitizers::at_rule::AtRuleSanitizer;
use crate::sanitizers::style_rule::StyleRuleSanitizer;

/// Dispatches every top-level rule to its [`RuleSanitizer`] in priority order.
pub struct StylesheetSanitizer {
    log: ErrorLog,
    rule_sanitizers: Vec<Box<dyn RuleSanitizer>>,
}

impl StylesheetSanitizer {
    pub fn new(rule_sanitizers: Vec<Box<dyn RuleSanitizer>>) -> Self {
        Self { log: ErrorLog::new(), rule_sanitizers }
    }

    /// One [`AtRuleSanitizer`] per policy at-rule, in policy order, then style rules.
    pub fn from_policy(policy: &SanitizerPolicy) -> Self {
        let mut rule_sanitizers: Vec<Box<dyn RuleSanitizer>> = policy
            .at_rules
            .iter()
            .map(|rule| Box::new(AtRuleSanitizer::new(rule, policy)) as Box<dyn RuleSanitizer>)
            .collect();
        if policy.style_rules.enabled {
            rule_sanitizers.push(Box::new(StyleRuleSanitizer::from_policy(policy)));
        }
        info!(
            "Stylesheet sanitizer ready with {} at-rules, style rules {}.",
            policy.at_rules.len(),
            if policy.style_rules.enabled { "enabled" } else { "disabled" }
        );
        Self::new(rule_sanitizers)
    }

    pub fn rule_sanitizers(&self) -> &[Box<dyn RuleSanitizer>] {
        &self.rule_sanitizers
    }
}

impl Sanitizer for StylesheetSanitizer {
    fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.log
    }
}

impl NodeSanitizer<RuleList> for StylesheetSanitizer {
    fn do_sanitize<'a>(&mut self, node: &'a RuleList) -> Option<Cow<'a, RuleList>> {
        let sanitized = sanitize_rules(&mut self.log, &mut self.rule_sanitizers, node);
        debug!("Stylesheet pass finished with {} diagnostics.", self.log.len());
        if sanitized == *node {
            Some(Cow::Borrowed(node))
        } else {
            Some(Cow::Owned(sanitized))
        }
    }
}
