// csssan/src/ui/mod.rs
//! Terminal output: colors, status messages and the diagnostics summary.

pub mod diagnostics_summary;
pub mod output_format;
pub mod theme;
