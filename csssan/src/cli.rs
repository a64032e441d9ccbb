// csssan/src/cli.rs
//! This file defines the command-line interface (CLI) for the csssan application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "csssan",
    author = "csssan contributors",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sanitize untrusted stylesheets against an allow-list policy",
    long_about = "csssan parses CSS into a syntax tree and keeps only the rules, at-rules, properties and values that an allow-list policy permits. Everything it drops is reported as a diagnostic with the source line and column of the offending construct.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG to DEBUG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `csssan` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes a stylesheet from a file or stdin.
    #[command(about = "Sanitizes a stylesheet from a file or stdin, writing the cleaned CSS.")]
    Sanitize(SanitizeCommand),

    /// Reports diagnostics for a stylesheet without writing the cleaned CSS.
    #[command(about = "Reports parse and sanitization diagnostics without writing the cleaned CSS.")]
    Scan(ScanCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Path to a custom sanitizer policy file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom sanitizer policy file (YAML), merged over the default policy.")]
    pub config: Option<PathBuf>,

    /// Enable these opt-in at-rules (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these opt-in at-rules by name (comma-separated).")]
    pub enable: Vec<String>,

    /// Disable these at-rules (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these at-rules by name (comma-separated).")]
    pub disable: Vec<String>,

    /// Suppress the diagnostics summary.
    #[arg(long = "no-summary", help = "Suppress the diagnostics summary printed to stderr.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom sanitizer policy file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom sanitizer policy file (YAML), merged over the default policy.")]
    pub config: Option<PathBuf>,

    /// Enable these opt-in at-rules (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these opt-in at-rules by name (comma-separated).")]
    pub enable: Vec<String>,

    /// Disable these at-rules (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these at-rules by name (comma-separated).")]
    pub disable: Vec<String>,

    /// Print the scan report as JSON to stdout.
    #[arg(long = "json-stdout", help = "Print the scan report as JSON to stdout.")]
    pub json_stdout: bool,

    /// Exit with a non-zero status if more diagnostics than this are found.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero status when the diagnostic count exceeds N.")]
    pub fail_over_threshold: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sanitize_with_comma_separated_lists() {
        let cli = Cli::try_parse_from([
            "csssan", "sanitize", "-i", "in.css", "-e", "import,layer", "-x", "page", "--no-summary",
        ])
        .unwrap();
        match cli.command {
            Commands::Sanitize(cmd) => {
                assert_eq!(cmd.input_file, Some(PathBuf::from("in.css")));
                assert_eq!(cmd.enable, vec!["import", "layer"]);
                assert_eq!(cmd.disable, vec!["page"]);
                assert!(cmd.no_summary);
                assert!(cmd.output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["csssan", "scan", "-q", "--fail-over-threshold", "2"]).unwrap();
        assert!(cli.quiet);
        assert!(!cli.debug);
        match cli.command {
            Commands::Scan(cmd) => assert_eq!(cmd.fail_over_threshold, Some(2)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["csssan"]).is_err());
    }
}
