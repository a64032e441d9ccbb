// csssan/src/ui/output_format.rs
//! Prefixed status messages written to a stream (normally stderr).

use std::io::{self, Write};

use super::theme::{styled, ThemeEntry, ThemeMap};

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    entry: ThemeEntry,
    message: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{} {}", styled(prefix, entry, theme, enable_colors), message)
}

pub fn print_info_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_message(writer, "[info]", ThemeEntry::Info, message, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_message(writer, "[warn]", ThemeEntry::Warn, message, theme, enable_colors)
}

pub fn print_error_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_message(writer, "[error]", ThemeEntry::Error, message, theme, enable_colors)
}
