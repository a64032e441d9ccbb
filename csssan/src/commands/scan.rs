// csssan/src/commands/scan.rs
//! The `scan` command: reports diagnostics without writing the cleaned stylesheet.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

use csssan_core::{headless_sanitize_stylesheet, Diagnostic, SanitizedStylesheet};

use super::{build_policy, error_msg, read_input};
use crate::cli::ScanCommand;
use crate::ui::diagnostics_summary;
use crate::ui::theme::ThemeStyle;

/// The machine-readable scan result printed by `--json-stdout`.
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub total: usize,
    pub counts: BTreeMap<&'a str, usize>,
    pub parse_errors: &'a [Diagnostic],
    pub sanitization_errors: &'a [Diagnostic],
}

impl<'a> ScanReport<'a> {
    pub fn new(result: &'a SanitizedStylesheet) -> Self {
        let mut counts = diagnostics_summary::count_by_code(&result.parse_errors);
        for (code, count) in diagnostics_summary::count_by_code(&result.sanitization_errors) {
            *counts.entry(code).or_insert(0) += count;
        }
        ScanReport {
            total: result.diagnostic_count(),
            counts,
            parse_errors: &result.parse_errors,
            sanitization_errors: &result.sanitization_errors,
        }
    }
}

/// Runs the `scan` command. Fails when the diagnostic count exceeds `--fail-over-threshold`.
pub fn run_scan(cmd: &ScanCommand, quiet: bool) -> Result<()> {
    info!("Starting csssan scan operation.");
    let theme_map = ThemeStyle::default_theme_map();

    let input = read_input(cmd.input_file.as_deref())?;
    let policy = build_policy(cmd.config.as_ref(), &cmd.enable, &cmd.disable)?;
    let result = headless_sanitize_stylesheet(&policy, &input).context("Scan failed")?;

    if cmd.json_stdout {
        let report = ScanReport::new(&result);
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        writeln!(writer, "{}", json)?;
    } else if !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        diagnostics_summary::print_summary(&result, &mut io::stderr(), &theme_map, stderr_supports_color)?;
    }

    if let Some(threshold) = cmd.fail_over_threshold {
        let total = result.diagnostic_count();
        if total > threshold {
            if !quiet {
                error_msg(
                    format!("Found {} diagnostic(s), exceeding the threshold of {}.", total, threshold),
                    &theme_map,
                );
            }
            bail!("Diagnostic count {} exceeds threshold {}", total, threshold);
        }
    }

    info!("csssan scan operation completed.");
    Ok(())
}
