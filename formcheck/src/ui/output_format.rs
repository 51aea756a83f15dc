//! Status message helpers shared by every command.
//!
//! Messages go to whatever writer the caller supplies (normally stderr) and
//! are coloured from the active theme only when the target is a terminal.

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};
use owo_colors::OwoColorize;
use std::io::{self, Write};

fn print_styled<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let line = format!("{}{}", prefix, message);
    if enable_colors {
        writeln!(writer, "{}", line.color(color_for(theme_map, entry)))
    } else {
        writeln!(writer, "{}", line)
    }
}

/// Prints an informational message.
pub fn print_info_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(writer, "", message, ThemeEntry::Info, theme_map, enable_colors)
}

/// Prints a warning message prefixed with `Warning: `.
pub fn print_warn_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(writer, "Warning: ", message, ThemeEntry::Warn, theme_map, enable_colors)
}

/// Prints an error message prefixed with `Error: `.
pub fn print_error_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(writer, "Error: ", message, ThemeEntry::Error, theme_map, enable_colors)
}
