// csssan-core/src/sanitizer.rs
//! The sanitizer engine: the traits every allow-list sanitizer implements and the generic
//! tree-walking algorithms they compose.
//!
//! A concrete sanitizer implements [`NodeSanitizer::do_sanitize`] for one node kind. The
//! result is a [`Cow`]: `Borrowed` hands the input back unchanged, `Owned` is a replacement,
//! and `None` drops the node entirely. Content problems are never returned as errors. They
//! are recorded in the sanitizer's own [`ErrorLog`] and the offending node is removed.
//!
//! Parents delegate to children with [`sanitize_obj`], [`sanitize_list`] and
//! [`sanitize_rules`]. Each merges the child's diagnostics into the parent's log and clears
//! the child, so the top-level sanitizer always holds the complete, ordered account of a pass.
//! These are free functions over `&mut ErrorLog` so a sanitizer can pass its own log and one
//! of its child fields at the same time; the same operations are available as default
//! methods on [`Sanitizer`] when the child is not a field of `self`.
//!
//! License: MIT OR Apache-2.0

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::diagnostic::{Diagnostic, ErrorLog};
use crate::objects::{ComponentValue, ComponentValueList, CssObject, Rule, RuleList};

/// Recorded when no rule sanitizer claims a rule.
pub const UNRECOGNIZED_RULE: &str = "unrecognized-rule";
/// Recorded when a rule appears after rules it must precede.
pub const MISORDERED_RULE: &str = "misordered-rule";

/// Error-log ownership shared by every sanitizer.
pub trait Sanitizer {
    fn error_log(&self) -> &ErrorLog;

    fn error_log_mut(&mut self) -> &mut ErrorLog;

    /// Diagnostics recorded since the last clear, in order.
    ///
    /// Composite sanitizers may override this (and [`clear_sanitization_errors`]) to expose
    /// their log differently; the delegation helpers only ever go through these two methods.
    ///
    /// [`clear_sanitization_errors`]: Sanitizer::clear_sanitization_errors
    fn sanitization_errors(&self) -> Vec<Diagnostic> {
        self.error_log().to_vec()
    }

    fn clear_sanitization_errors(&mut self) {
        self.error_log_mut().clear();
    }

    /// Records `code` at the position of `node`.
    fn sanitization_error(&mut self, code: &str, node: &dyn CssObject) {
        self.error_log_mut().record(code, node);
    }

    /// See [`sanitize_obj`].
    fn sanitize_obj<'a, N, C>(&mut self, child: &mut C, value: &'a N) -> Option<Cow<'a, N>>
    where
        Self: Sized,
        N: Clone,
        C: NodeSanitizer<N> + ?Sized,
    {
        sanitize_obj(self.error_log_mut(), child, value)
    }

    /// See [`sanitize_list`].
    fn sanitize_list<C>(&mut self, child: &mut C, list: &ComponentValueList) -> ComponentValueList
    where
        Self: Sized,
        C: NodeSanitizer<ComponentValue> + ?Sized,
    {
        sanitize_list(self.error_log_mut(), child, list)
    }

    /// See [`sanitize_rules`].
    fn sanitize_rules(
        &mut self,
        rule_sanitizers: &mut [Box<dyn RuleSanitizer>],
        rules: &RuleList,
    ) -> RuleList
    where
        Self: Sized,
    {
        sanitize_rules(self.error_log_mut(), rule_sanitizers, rules)
    }
}

/// A sanitizer for one kind of node.
pub trait NodeSanitizer<N: Clone>: Sanitizer {
    /// The allow-list check.
    fn do_sanitize<'a>(&mut self, node: &'a N) -> Option<Cow<'a, N>>;

    /// Sanitizes `node`. Returns `None` if it must be removed.
    fn sanitize<'a>(&mut self, node: &'a N) -> Option<Cow<'a, N>> {
        let result = self.do_sanitize(node);
        match &result {
            None => trace!("Node removed"),
            Some(Cow::Borrowed(_)) => trace!("Node accepted unchanged"),
            Some(Cow::Owned(_)) => trace!("Node replaced"),
        }
        result
    }
}

/// A sanitizer that takes part in rule-list dispatch.
pub trait RuleSanitizer: NodeSanitizer<Rule> {
    /// Whether this sanitizer is responsible for `rule`.
    fn handles_rule(&self, rule: &Rule) -> bool;

    /// Where rules handled by this sanitizer may appear relative to their siblings.
    fn index(&self) -> RuleIndex;
}

/// Ordering key for [`RuleSanitizer`]s.
///
/// A rule is admitted when `test` is not below the highest `set` of the rules admitted
/// before it. Admitting it raises that maximum to `set`. A plain index `n` is `(n, n)`:
/// any number of such rules may follow each other, but not rules with a lower index.
/// `(0, 1)` admits a rule only at the very start, and only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRuleIndex", into = "RawRuleIndex")]
pub struct RuleIndex {
    pub test: i32,
    pub set: i32,
}

impl RuleIndex {
    pub const fn at(index: i32) -> Self {
        Self { test: index, set: index }
    }

    pub const fn range(test: i32, set: i32) -> Self {
        Self { test, set }
    }

    pub fn is_scalar(&self) -> bool {
        self.test == self.set
    }
}

impl From<i32> for RuleIndex {
    fn from(index: i32) -> Self {
        Self::at(index)
    }
}

impl From<(i32, i32)> for RuleIndex {
    fn from((test, set): (i32, i32)) -> Self {
        Self::range(test, set)
    }
}

impl fmt::Display for RuleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalar() {
            write!(f, "{}", self.test)
        } else {
            write!(f, "[{}, {}]", self.test, self.set)
        }
    }
}

/// `3` or `[0, 1]` in policy files.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRuleIndex {
    Single(i32),
    Pair(i32, i32),
}

impl From<RawRuleIndex> for RuleIndex {
    fn from(raw: RawRuleIndex) -> Self {
        match raw {
            RawRuleIndex::Single(index) => Self::at(index),
            RawRuleIndex::Pair(test, set) => Self::range(test, set),
        }
    }
}

impl From<RuleIndex> for RawRuleIndex {
    fn from(index: RuleIndex) -> Self {
        if index.is_scalar() {
            Self::Single(index.test)
        } else {
            Self::Pair(index.test, index.set)
        }
    }
}

fn merge_child_errors<C: Sanitizer + ?Sized>(log: &mut ErrorLog, child: &mut C) {
    let errors = child.sanitization_errors();
    if !errors.is_empty() {
        trace!("Merging {} diagnostics from child sanitizer", errors.len());
    }
    log.extend(errors);
    child.clear_sanitization_errors();
}

/// Runs `child` over `value`, then moves the child's diagnostics into `log`.
pub fn sanitize_obj<'a, N, C>(log: &mut ErrorLog, child: &mut C, value: &'a N) -> Option<Cow<'a, N>>
where
    N: Clone,
    C: NodeSanitizer<N> + ?Sized,
{
    let result = child.do_sanitize(value);
    merge_child_errors(log, child);
    result
}

/// Runs `child` over every element of `list`, keeping the survivors in order.
///
/// The child's diagnostics are merged once, after the whole list.
pub fn sanitize_list<C>(log: &mut ErrorLog, child: &mut C, list: &ComponentValueList) -> ComponentValueList
where
    C: NodeSanitizer<ComponentValue> + ?Sized,
{
    let sanitized: ComponentValueList = list
        .iter()
        .filter_map(|value| child.do_sanitize(value).map(Cow::into_owned))
        .collect();
    merge_child_errors(log, child);
    sanitized
}

/// Dispatches each rule to the first sanitizer that handles it, enforcing rule order.
///
/// Rules no sanitizer claims are dropped as [`UNRECOGNIZED_RULE`]. Rules whose index orders
/// before an already admitted rule are dropped as [`MISORDERED_RULE`] without being
/// sanitized. The output is always a subsequence of `rules`.
pub fn sanitize_rules(
    log: &mut ErrorLog,
    rule_sanitizers: &mut [Box<dyn RuleSanitizer>],
    rules: &RuleList,
) -> RuleList {
    let mut max_index = i32::MIN;
    let mut sanitized = RuleList::new();

    for rule in rules {
        let Some(sanitizer) = rule_sanitizers.iter_mut().find(|s| s.handles_rule(rule)) else {
            debug!("No sanitizer handles {} at {}", describe(rule), rule.position());
            log.record(UNRECOGNIZED_RULE, rule);
            continue;
        };

        let index = sanitizer.index();
        if index.test < max_index {
            debug!(
                "{} at {} has index {} but rules up to {} were already seen",
                describe(rule),
                rule.position(),
                index,
                max_index
            );
            log.record(MISORDERED_RULE, rule);
            continue;
        }
        max_index = max_index.max(index.set);

        if let Some(rule) = sanitize_obj(log, &mut **sanitizer, rule) {
            sanitized.add(rule.into_owned());
        }
    }

    debug!("sanitize_rules kept {} of {} rules", sanitized.len(), rules.len());
    sanitized
}

fn describe(rule: &Rule) -> String {
    match rule.name() {
        Some(name) => format!("@{}", name),
        None => "style rule".to_string(),
    }
}
