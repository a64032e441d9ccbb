// csssan/src/ui/theme.rs
//! Module for the CLI color theme.
//!
//! Each logical part of the output maps to a 16-color ANSI foreground. Colors are only
//! applied when the destination stream is a terminal.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use owo_colors::{AnsiColors, OwoColorize};

/// Type alias for the theme map.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    /// Section titles.
    Header,
    /// Successful operation messages.
    Success,
    Info,
    Warn,
    Error,
    /// The code of a parse or sanitization diagnostic.
    DiagnosticCode,
    /// The `line:column` of a diagnostic.
    DiagnosticPosition,
    /// Occurrence counts in the summary.
    SummaryOccurrences,
}

/// A named ANSI color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor(String);

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white"
            | "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue"
            | "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    /// Converts the color name into its `owo_colors::AnsiColors` value.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self.0.as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }
}

/// The style configuration for one `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeStyle {
    /// Foreground color, if any.
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn named(color: &str) -> Self {
        ThemeStyle { fg: color.parse().ok() }
    }

    /// Returns the default theme map.
    pub fn default_theme_map() -> ThemeMap {
        let mut theme = HashMap::new();
        theme.insert(ThemeEntry::Header, ThemeStyle::named("brightwhite"));
        theme.insert(ThemeEntry::Success, ThemeStyle::named("green"));
        theme.insert(ThemeEntry::Info, ThemeStyle::named("cyan"));
        theme.insert(ThemeEntry::Warn, ThemeStyle::named("yellow"));
        theme.insert(ThemeEntry::Error, ThemeStyle::named("red"));
        theme.insert(ThemeEntry::DiagnosticCode, ThemeStyle::named("magenta"));
        theme.insert(ThemeEntry::DiagnosticPosition, ThemeStyle::named("brightblack"));
        theme.insert(ThemeEntry::SummaryOccurrences, ThemeStyle::named("brightyellow"));
        theme
    }
}

/// Renders `text` with the theme's color for `entry`, or plainly when color is off
/// or the entry has no color.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) if enable_colors => text.color(color.to_ansi_color()).to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_colors() {
        assert!("red".parse::<ThemeColor>().is_ok());
        assert!("BrightGreen".parse::<ThemeColor>().is_ok());
        assert!("unknown".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn to_ansi_color_mapping() {
        let color: ThemeColor = "brightcyan".parse().unwrap();
        assert!(matches!(color.to_ansi_color(), AnsiColors::BrightCyan));
    }

    #[test]
    fn styled_respects_color_switch() {
        let theme = ThemeStyle::default_theme_map();
        assert_eq!(styled("plain", ThemeEntry::Error, &theme, false), "plain");
        let colored = styled("red", ThemeEntry::Error, &theme, true);
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("red"));
        assert_eq!(styled("x", ThemeEntry::Error, &ThemeMap::new(), true), "x");
    }
}
