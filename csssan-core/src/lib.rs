// csssan-core/src/lib.rs
//! # csssan Core Library
//!
//! `csssan-core` provides the platform-independent logic for accepting untrusted stylesheets.
//! It parses CSS into a syntax object model and runs the tree through allow-list sanitizers,
//! so only rules, at-rules and values the policy permits reach downstream consumers.
//!
//! The library does no I/O beyond reading policy files. Everything it rejects is reported as
//! a [`Diagnostic`] rather than an error; [`CssSanError`] is reserved for nodes that violate
//! structural invariants and for invalid policies.
//!
//! ## Modules
//!
//! * `objects`: The CSS syntax object model (tokens, component values, blocks, rules).
//! * `tokenizer`: Adapts the `cssparser` tokenizer to [`Token`]s with 1-based positions.
//! * `parser`: CSS Syntax Level 3 consumption of token streams.
//! * `diagnostic`: `(code, line, column)` records and the per-sanitizer [`ErrorLog`].
//! * `sanitizer`: The [`Sanitizer`] engine traits and the generic tree-walking algorithms.
//! * `sanitizers`: Concrete sanitizers built from a [`SanitizerPolicy`].
//! * `config`: YAML policies: loading, merging, filtering and validation.
//! * `headless`: Convenience wrappers for one-shot, non-interactive sanitization.
//! * `util`: Token serialization back to text.
//!
//! ## Usage Example
//!
//! ```rust
//! use csssan_core::{headless_sanitize_stylesheet, SanitizerPolicy};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let policy = SanitizerPolicy::load_default_policy()?;
//!     let result = headless_sanitize_stylesheet(
//!         &policy,
//!         "a { color: red; background: url(javascript:alert(1)) }",
//!     )?;
//!     assert_eq!(result.css, "a {color:red}");
//!     for diagnostic in &result.sanitization_errors {
//!         println!("{}", diagnostic);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! License: MIT OR Apache-2.0

pub mod config;
pub mod diagnostic;
pub mod errors;
pub mod headless;
pub mod objects;
pub mod parser;
pub mod sanitizer;
pub mod sanitizers;
pub mod tokenizer;
pub mod util;

/// Re-exports the policy types and functions.
pub use config::{
    merge_policies, validate_policy, AtRulePolicy, BlockPolicy, SanitizerPolicy, SelectorPolicy,
    StyleRulePolicy, ValuePolicy,
};

/// Re-exports the custom error type for contract violations.
pub use errors::CssSanError;

pub use diagnostic::{Diagnostic, ErrorLog};

pub use objects::{
    AtRule, ComponentValue, ComponentValueList, CssFunction, CssObject, Declaration,
    DeclarationList, Position, QualifiedRule, Rule, RuleList, SimpleBlock, Token, TokenKind,
};

pub use parser::Parser;

/// Re-exports the engine traits and delegation helpers.
pub use sanitizer::{
    sanitize_list, sanitize_obj, sanitize_rules, NodeSanitizer, RuleIndex, RuleSanitizer,
    Sanitizer, MISORDERED_RULE, UNRECOGNIZED_RULE,
};

pub use sanitizers::{
    AtRuleSanitizer, DeclarationSanitizer, StyleRuleSanitizer, StylesheetSanitizer, ValueSanitizer,
};

/// Re-exports functions for one-shot, non-interactive use.
pub use headless::{
    headless_sanitize_stylesheet, headless_sanitize_string, render_stylesheet, SanitizedStylesheet,
};
