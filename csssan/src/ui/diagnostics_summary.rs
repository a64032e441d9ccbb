// csssan/src/ui/diagnostics_summary.rs
//! Human-readable summary of the diagnostics a sanitization run produced.

use std::collections::BTreeMap;
use std::io::{self, Write};

use csssan_core::{Diagnostic, SanitizedStylesheet};

use super::theme::{styled, ThemeEntry, ThemeMap};

/// Counts diagnostics per code, ordered by code.
pub fn count_by_code(diagnostics: &[Diagnostic]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for diagnostic in diagnostics {
        *counts.entry(diagnostic.code.as_str()).or_insert(0) += 1;
    }
    counts
}

fn print_section<W: Write>(
    writer: &mut W,
    title: &str,
    diagnostics: &[Diagnostic],
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    writeln!(writer, "{}", styled(title, ThemeEntry::Header, theme, enable_colors))?;
    for (code, count) in count_by_code(diagnostics) {
        let positions: Vec<String> = diagnostics
            .iter()
            .filter(|d| d.code == code)
            .map(|d| format!("{}:{}", d.line, d.column))
            .collect();
        writeln!(
            writer,
            "  {} ({}) at {}",
            styled(code, ThemeEntry::DiagnosticCode, theme, enable_colors),
            styled(&count.to_string(), ThemeEntry::SummaryOccurrences, theme, enable_colors),
            styled(&positions.join(", "), ThemeEntry::DiagnosticPosition, theme, enable_colors),
        )?;
    }
    Ok(())
}

/// Prints parse and sanitization diagnostics grouped by code.
pub fn print_summary<W: Write>(
    result: &SanitizedStylesheet,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if result.is_clean() {
        return writeln!(
            writer,
            "{}",
            styled("No issues found. Stylesheet accepted as-is.", ThemeEntry::Success, theme, enable_colors)
        );
    }
    print_section(writer, "Parse errors:", &result.parse_errors, theme, enable_colors)?;
    print_section(writer, "Sanitization errors:", &result.sanitization_errors, theme, enable_colors)?;
    writeln!(writer, "{} diagnostic(s) in total.", result.diagnostic_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn groups_by_code() {
        let result = SanitizedStylesheet {
            css: String::new(),
            parse_errors: vec![Diagnostic::new("unexpected-eof-in-block", 3, 4)],
            sanitization_errors: vec![
                Diagnostic::new("unrecognized-property", 1, 5),
                Diagnostic::new("misordered-rule", 2, 1),
                Diagnostic::new("unrecognized-property", 1, 20),
            ],
        };
        let mut out = Vec::new();
        print_summary(&result, &mut out, &ThemeStyle::default_theme_map(), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Parse errors:\n  unexpected-eof-in-block (1) at 3:4\n\
             Sanitization errors:\n  misordered-rule (1) at 2:1\n  unrecognized-property (2) at 1:5, 1:20\n\
             4 diagnostic(s) in total.\n"
        );
    }

    #[test]
    fn clean_result() {
        let result = SanitizedStylesheet {
            css: "a {}".into(),
            parse_errors: Vec::new(),
            sanitization_errors: Vec::new(),
        };
        let mut out = Vec::new();
        print_summary(&result, &mut out, &ThemeStyle::default_theme_map(), false).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("No issues found"));
    }
}
