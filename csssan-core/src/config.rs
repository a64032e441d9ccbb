//! Configuration management for `csssan-core`.
//!
//! This module defines the allow-list policy the concrete sanitizers are built from. It
//! handles serialization/deserialization of YAML policies and provides utilities for
//! loading, merging, filtering and validating them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::CssSanError;
use crate::sanitizer::RuleIndex;

/// Index of ordinary style rules and block at-rules in the default policy.
pub const DEFAULT_RULE_INDEX: RuleIndex = RuleIndex::at(3);

/// The embedded default policy, parsed once.
static DEFAULT_POLICY: Lazy<Result<SanitizerPolicy, String>> = Lazy::new(|| {
    debug!("Parsing embedded default policy...");
    serde_yml::from_str(include_str!("../config/default_policy.yaml")).map_err(|e| e.to_string())
});

/// What an at-rule may carry after its prelude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockPolicy {
    /// Statement at-rule terminated by `;` (e.g. `@import`).
    #[default]
    None,
    /// A `{}` block holding nested style rules (e.g. `@media`).
    Rules,
    /// A `{}` block holding declarations (e.g. `@font-face`).
    Declarations,
    /// Either form; a block, if present, holds declarations.
    Optional,
}

/// One allowed at-rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AtRulePolicy {
    /// At-rule name without the `@`, matched case-insensitively.
    pub name: String,
    pub description: Option<String>,
    /// Ordering key relative to sibling rules.
    pub index: RuleIndex,
    pub block: BlockPolicy,
    /// If true, the at-rule is disabled unless explicitly enabled.
    pub opt_in: bool,
}

impl Default for AtRulePolicy {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            index: DEFAULT_RULE_INDEX,
            block: BlockPolicy::None,
            opt_in: false,
        }
    }
}

/// Policy for qualified (selector) rules and their declarations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleRulePolicy {
    pub enabled: bool,
    pub index: RuleIndex,
    /// Allowed property names. Custom properties (`--*`) are always allowed.
    pub properties: Vec<String>,
}

impl Default for StyleRulePolicy {
    fn default() -> Self {
        Self { enabled: true, index: DEFAULT_RULE_INDEX, properties: Vec::new() }
    }
}

/// Policy for property values and at-rule preludes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValuePolicy {
    /// Allowed function names, e.g. `rgb`, `calc`.
    pub functions: Vec<String>,
    /// Whether `url(...)` values are kept.
    pub allow_urls: bool,
}

/// Policy for selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorPolicy {
    /// Allowed functional pseudo-classes, e.g. `not`, `nth-child`.
    pub functions: Vec<String>,
}

/// Represents the top-level policy structure for csssan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerPolicy {
    pub at_rules: Vec<AtRulePolicy>,
    pub style_rules: StyleRulePolicy,
    pub values: ValuePolicy,
    pub selectors: SelectorPolicy,
}

pub(crate) fn contains_ignore_case(list: &[String], name: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

impl SanitizerPolicy {
    /// Loads a policy from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom policy from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file {}", path.display()))?;
        let policy: SanitizerPolicy = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse policy file {}", path.display()))?;

        validate_policy(&policy)?;
        info!("Loaded {} at-rules from file {}.", policy.at_rules.len(), path.display());

        Ok(policy)
    }

    /// Loads the default policy from the embedded configuration.
    pub fn load_default_policy() -> Result<Self> {
        let policy = DEFAULT_POLICY
            .as_ref()
            .map_err(|e| anyhow!("Failed to parse default policy: {}", e))?
            .clone();

        debug!("Loaded {} default at-rules.", policy.at_rules.len());
        Ok(policy)
    }

    /// Filters at-rules based on enable/disable lists provided via CLI.
    ///
    /// Opt-in at-rules survive only when enabled; disabled names are always removed.
    pub fn set_active_at_rules(&mut self, enable: &[String], disable: &[String]) {
        let enable_set: HashSet<String> = enable.iter().map(|n| n.to_ascii_lowercase()).collect();
        let disable_set: HashSet<String> = disable.iter().map(|n| n.to_ascii_lowercase()).collect();

        debug!("At-rules count before filtering: {}", self.at_rules.len());

        let known: HashSet<String> = self.at_rules.iter().map(|r| r.name.to_ascii_lowercase()).collect();
        for name in enable_set.difference(&known) {
            warn!("At-rule '{}' in the enable list does not exist.", name);
        }
        for name in disable_set.difference(&known) {
            warn!("At-rule '{}' in the disable list does not exist.", name);
        }

        self.at_rules.retain(|rule| {
            let name = rule.name.to_ascii_lowercase();
            !disable_set.contains(&name) && (!rule.opt_in || enable_set.contains(&name))
        });

        debug!("At-rules count after filtering: {}", self.at_rules.len());
    }

    /// Looks up an at-rule by name, case-insensitively.
    pub fn at_rule(&self, name: &str) -> Option<&AtRulePolicy> {
        self.at_rules.iter().find(|rule| rule.name.eq_ignore_ascii_case(name))
    }

    pub fn allows_property(&self, name: &str) -> bool {
        name.starts_with("--") || contains_ignore_case(&self.style_rules.properties, name)
    }
}

fn union_into(target: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        if !contains_ignore_case(target, &item) {
            target.push(item);
        }
    }
}

/// Merges a user-defined policy into the defaults.
///
/// User at-rules replace default ones of the same name. Property and function lists are
/// unioned. The url switch and style-rule settings come from the user policy.
pub fn merge_policies(default_policy: SanitizerPolicy, user_policy: Option<SanitizerPolicy>) -> SanitizerPolicy {
    debug!("merge_policies called. Default at-rules: {}", default_policy.at_rules.len());

    let Some(user) = user_policy else {
        return default_policy;
    };
    let mut merged = default_policy;

    debug!("User policy provided. Merging {} user at-rules.", user.at_rules.len());
    for user_rule in user.at_rules {
        match merged.at_rules.iter_mut().find(|r| r.name.eq_ignore_ascii_case(&user_rule.name)) {
            Some(existing) => *existing = user_rule,
            None => merged.at_rules.push(user_rule),
        }
    }

    union_into(&mut merged.style_rules.properties, user.style_rules.properties);
    merged.style_rules.enabled = user.style_rules.enabled;
    merged.style_rules.index = user.style_rules.index;

    union_into(&mut merged.values.functions, user.values.functions);
    if user.values.allow_urls != merged.values.allow_urls {
        debug!("Overriding allow_urls with user value: {}", user.values.allow_urls);
    }
    merged.values.allow_urls = user.values.allow_urls;

    union_into(&mut merged.selectors.functions, user.selectors.functions);

    debug!("Final at-rules after merge: {}", merged.at_rules.len());
    merged
}

/// Validates policy integrity: at-rule names and ordering keys.
pub fn validate_policy(policy: &SanitizerPolicy) -> Result<()> {
    let mut names = HashSet::new();
    let mut errors = Vec::new();

    for rule in &policy.at_rules {
        if rule.name.is_empty() {
            errors.push("An at-rule has an empty `name` field.".to_string());
        } else if rule.name.starts_with('@') {
            errors.push(format!("At-rule '{}' must be named without the leading '@'.", rule.name));
        } else if !names.insert(rule.name.to_ascii_lowercase()) {
            errors.push(format!("Duplicate at-rule name found: '{}'.", rule.name));
        }

        if rule.index.test > rule.index.set {
            errors.push(format!(
                "At-rule '{}' has index {} whose test value exceeds its set value.",
                rule.name, rule.index
            ));
        }
    }

    let style_index = policy.style_rules.index;
    if style_index.test > style_index.set {
        errors.push(format!("Style rules have index {} whose test value exceeds its set value.", style_index));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CssSanError::InvalidPolicy(errors.join("\n")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_rule(name: &str, opt_in: bool) -> AtRulePolicy {
        AtRulePolicy { name: name.to_string(), opt_in, ..Default::default() }
    }

    #[test]
    fn test_default_policy_is_valid() -> Result<()> {
        let policy = SanitizerPolicy::load_default_policy()?;
        validate_policy(&policy)?;
        assert_eq!(policy.at_rule("CHARSET").map(|r| r.index), Some(RuleIndex::range(0, 1)));
        assert_eq!(policy.at_rule("media").map(|r| r.block), Some(BlockPolicy::Rules));
        assert!(policy.allows_property("color"));
        assert!(policy.allows_property("--brand"));
        assert!(!policy.allows_property("behavior"));
        assert!(!policy.values.allow_urls);
        Ok(())
    }

    #[test]
    fn test_set_active_at_rules() {
        let mut policy = SanitizerPolicy {
            at_rules: vec![at_rule("media", false), at_rule("import", true), at_rule("page", false)],
            ..Default::default()
        };
        policy.set_active_at_rules(&["Import".to_string()], &["page".to_string(), "nope".to_string()]);
        let names: Vec<_> = policy.at_rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["media", "import"]);
    }

    #[test]
    fn test_opt_in_rules_are_dropped_by_default() {
        let mut policy = SanitizerPolicy {
            at_rules: vec![at_rule("media", false), at_rule("import", true)],
            ..Default::default()
        };
        policy.set_active_at_rules(&[], &[]);
        assert_eq!(policy.at_rules.len(), 1);
    }

    #[test]
    fn test_merge_policies() {
        let default = SanitizerPolicy {
            at_rules: vec![at_rule("media", false), at_rule("page", false)],
            style_rules: StyleRulePolicy { properties: vec!["color".into()], ..Default::default() },
            ..Default::default()
        };
        let user = SanitizerPolicy {
            at_rules: vec![
                AtRulePolicy { name: "MEDIA".into(), block: BlockPolicy::Rules, ..Default::default() },
                at_rule("layer", false),
            ],
            style_rules: StyleRulePolicy {
                properties: vec!["COLOR".into(), "width".into()],
                ..Default::default()
            },
            values: ValuePolicy { functions: vec!["min".into()], allow_urls: true },
            ..Default::default()
        };

        let merged = merge_policies(default.clone(), Some(user));
        let names: Vec<_> = merged.at_rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["MEDIA", "page", "layer"]);
        assert_eq!(merged.at_rule("media").map(|r| r.block), Some(BlockPolicy::Rules));
        assert_eq!(merged.style_rules.properties, vec!["color".to_string(), "width".to_string()]);
        assert!(merged.values.allow_urls);

        assert_eq!(merge_policies(default.clone(), None), default);
    }

    #[test]
    fn test_validate_policy_errors() {
        let policy = SanitizerPolicy {
            at_rules: vec![
                at_rule("", false),
                at_rule("media", false),
                at_rule("Media", false),
                AtRulePolicy { name: "charset".into(), index: RuleIndex::range(2, 1), ..Default::default() },
            ],
            ..Default::default()
        };
        let err = validate_policy(&policy).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("empty `name`"));
        assert!(message.contains("Duplicate at-rule name found: 'Media'"));
        assert!(message.contains("'charset' has index [2, 1]"));
        assert!(matches!(err.downcast_ref::<CssSanError>(), Some(CssSanError::InvalidPolicy(_))));
    }
}
