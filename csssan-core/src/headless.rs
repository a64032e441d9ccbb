// csssan-core/src/headless.rs
//! `headless.rs`
//! Convenience wrappers for using the sanitizers in headless mode (non-UI).
//! Provides helper functions for a full, one-shot sanitization of stylesheet text.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

use crate::config::{validate_policy, SanitizerPolicy};
use crate::diagnostic::Diagnostic;
use crate::objects::{CssObject, RuleList};
use crate::parser::Parser;
use crate::sanitizer::{NodeSanitizer, Sanitizer};
use crate::sanitizers::StylesheetSanitizer;

/// The outcome of one headless pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedStylesheet {
    /// The sanitized stylesheet, one top-level rule per line.
    pub css: String,
    /// Recoveries made while parsing the top level.
    pub parse_errors: Vec<Diagnostic>,
    /// Everything the sanitizers rejected, in document order per rule.
    pub sanitization_errors: Vec<Diagnostic>,
}

impl SanitizedStylesheet {
    pub fn diagnostic_count(&self) -> usize {
        self.parse_errors.len() + self.sanitization_errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostic_count() == 0
    }
}

/// Renders a rule list with each rule on its own line.
pub fn render_stylesheet(rules: &RuleList) -> String {
    rules.iter().map(|rule| rule.to_css()).collect::<Vec<_>>().join("\n")
}

/// Parses and sanitizes `css` against `policy`.
///
/// # Arguments
///
/// * `policy` - The merged policy (defaults + optional user overrides).
/// * `css` - The untrusted stylesheet text.
pub fn headless_sanitize_stylesheet(policy: &SanitizerPolicy, css: &str) -> Result<SanitizedStylesheet> {
    validate_policy(policy).context("Refusing to sanitize with an invalid policy")?;

    let mut parser = Parser::new_from_string(css);
    let rules = parser.parse_stylesheet();
    let parse_errors = parser.take_parse_errors();

    let mut sanitizer = StylesheetSanitizer::from_policy(policy);
    let css = match sanitizer.sanitize(&rules) {
        Some(sanitized) => render_stylesheet(&sanitized),
        None => String::new(),
    };
    let sanitization_errors = sanitizer.sanitization_errors();
    debug!(
        "Headless pass: {} parse errors, {} sanitization errors.",
        parse_errors.len(),
        sanitization_errors.len()
    );

    Ok(SanitizedStylesheet { css, parse_errors, sanitization_errors })
}

/// Like [`headless_sanitize_stylesheet`], returning only the sanitized text.
pub fn headless_sanitize_string(policy: &SanitizerPolicy, css: &str) -> Result<String> {
    Ok(headless_sanitize_stylesheet(policy, css)?.css)
}
