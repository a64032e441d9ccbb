// csssan/src/commands/sanitize.rs
//! The `sanitize` command: writes the cleaned stylesheet and summarizes what was dropped.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};

use csssan_core::{headless_sanitize_stylesheet, SanitizedStylesheet};

use super::{build_policy, info_msg, read_input, warn_msg};
use crate::cli::SanitizeCommand;
use crate::ui::diagnostics_summary;
use crate::ui::theme::{ThemeMap, ThemeStyle};

/// Runs the `sanitize` command.
pub fn run_sanitize(cmd: &SanitizeCommand, quiet: bool) -> Result<()> {
    info!("Starting csssan sanitize operation.");
    let theme_map = ThemeStyle::default_theme_map();

    let input = read_input(cmd.input_file.as_deref())?;
    let policy = build_policy(cmd.config.as_ref(), &cmd.enable, &cmd.disable)?;
    let result = headless_sanitize_stylesheet(&policy, &input).context("Sanitization failed")?;

    debug!(
        "Stylesheet sanitized. Original length: {}, Sanitized length: {}",
        input.len(),
        result.css.len()
    );

    if !quiet && result.css.is_empty() && !input.trim().is_empty() {
        warn_msg("Every rule was removed; the sanitized stylesheet is empty.", &theme_map);
    }

    handle_primary_output(cmd, &result, quiet, &theme_map)?;
    handle_summary(cmd, &result, quiet, &theme_map)?;

    info!("csssan sanitize operation completed.");
    Ok(())
}

fn handle_primary_output(
    cmd: &SanitizeCommand,
    result: &SanitizedStylesheet,
    quiet: bool,
    theme_map: &ThemeMap,
) -> Result<()> {
    if let Some(path) = &cmd.output {
        if !quiet {
            info_msg(format!("Writing sanitized stylesheet to file: {}", path.display()), theme_map);
        }
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        writeln!(file, "{}", result.css)?;
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        writeln!(writer, "{}", result.css)?;
    }
    Ok(())
}

fn handle_summary(
    cmd: &SanitizeCommand,
    result: &SanitizedStylesheet,
    quiet: bool,
    theme_map: &ThemeMap,
) -> Result<()> {
    if !cmd.no_summary && !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        diagnostics_summary::print_summary(result, &mut io::stderr(), theme_map, stderr_supports_color)?;
    }
    Ok(())
}
