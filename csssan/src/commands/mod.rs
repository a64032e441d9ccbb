// csssan/src/commands/mod.rs
//! Subcommand runners and the input/policy plumbing they share.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csssan_core::config::{merge_policies, SanitizerPolicy};

use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

pub mod sanitize;
pub mod scan;

pub use sanitize::run_sanitize;
pub use scan::run_scan;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Reads the stylesheet from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("Reading input from file: {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            debug!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stylesheet from stdin")?;
            Ok(buffer)
        }
    }
}

/// Builds the effective policy: the embedded default, merged with the user's file if any,
/// then filtered by the enable/disable lists.
pub fn build_policy(config: Option<&PathBuf>, enable: &[String], disable: &[String]) -> Result<SanitizerPolicy> {
    let default_policy = SanitizerPolicy::load_default_policy()?;
    let user_policy = match config {
        Some(path) => {
            info!("Loading custom policy from {}", path.display());
            Some(SanitizerPolicy::load_from_file(path)?)
        }
        None => None,
    };
    let mut policy = merge_policies(default_policy, user_policy);
    policy.set_active_at_rules(enable, disable);
    debug!(
        "Effective policy: {} at-rule(s), style rules {}",
        policy.at_rules.len(),
        if policy.style_rules.enabled { "enabled" } else { "disabled" }
    );
    Ok(policy)
}
