//! Line diff between an original record and its corrected form.

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};
use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes a unified-style diff of `original` against `corrected`.
///
/// Removed lines are prefixed with `-`, added lines with `+`. When the two
/// texts are identical a single "No changes" line is written instead.
pub fn print_diff<W: Write>(
    original: &str,
    corrected: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let header = "--- Suggested corrections ---";
    if enable_colors {
        writeln!(writer, "{}", header.color(color_for(theme_map, ThemeEntry::DiffHeader)))?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let patch = create_patch(original, corrected);
    if patch.hunks().is_empty() {
        writeln!(writer, "No changes.")?;
        return Ok(());
    }

    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    let text = format!("- {}", s.trim_end_matches('\n'));
                    if enable_colors {
                        writeln!(writer, "{}", text.color(color_for(theme_map, ThemeEntry::DiffRemoved)))?;
                    } else {
                        writeln!(writer, "{}", text)?;
                    }
                }
                DiffLine::Insert(s) => {
                    let text = format!("+ {}", s.trim_end_matches('\n'));
                    if enable_colors {
                        writeln!(writer, "{}", text.color(color_for(theme_map, ThemeEntry::DiffAdded)))?;
                    } else {
                        writeln!(writer, "{}", text)?;
                    }
                }
                DiffLine::Context(s) => {
                    writeln!(writer, "  {}", s.trim_end_matches('\n'))?;
                }
            }
        }
    }
    Ok(())
}
