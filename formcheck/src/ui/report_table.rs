//! Human-readable rendering of a `ValidationReport`.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use formcheck_core::{CompiledForm, ValidationReport};
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, table_color_for, ThemeEntry, ThemeMap};

fn write_heading<W: Write>(
    writer: &mut W,
    text: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{}", text.color(color_for(theme_map, entry)))
    } else {
        writeln!(writer, "{}", text)
    }
}

/// A cell coloured from the theme when colours are enabled.
fn themed_cell(text: &str, entry: ThemeEntry, theme_map: &ThemeMap, enable_colors: bool) -> Cell {
    let cell = Cell::new(text);
    match table_color_for(theme_map, entry) {
        Some(color) if enable_colors => cell.fg(color),
        _ => cell,
    }
}

fn new_table(headers: &[&str], theme_map: &ThemeMap, enable_colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| themed_cell(h, ThemeEntry::Header, theme_map, enable_colors))
                .collect::<Vec<_>>(),
        );
    if enable_colors {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

/// Prints the outcome line, an error table and a suggestion table.
///
/// `form` supplies the human labels shown next to field names; fields the
/// form does not declare are shown by name only.
pub fn print_report<W: Write>(
    report: &ValidationReport,
    form: Option<&CompiledForm>,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if report.valid {
        write_heading(
            writer,
            &format!("Record is valid for form '{}'.", report.form),
            ThemeEntry::Success,
            theme_map,
            enable_colors,
        )?;
    } else {
        write_heading(
            writer,
            &format!(
                "Record is invalid for form '{}': {} field(s) failed.",
                report.form,
                report.errors.failed_field_count()
            ),
            ThemeEntry::Error,
            theme_map,
            enable_colors,
        )?;

        let mut table = new_table(&["Field", "Label", "Message"], theme_map, enable_colors);
        for (field, messages) in report.errors.iter() {
            let label = form.map(|f| f.label(field)).unwrap_or(field);
            table.add_row(vec![
                themed_cell(field, ThemeEntry::FieldName, theme_map, enable_colors),
                Cell::new(label),
                themed_cell(&messages.join("; "), ThemeEntry::ValidationMessage, theme_map, enable_colors),
            ]);
        }
        writeln!(writer, "{table}")?;
    }

    if report.has_suggestions() {
        write_heading(writer, "Did you mean:", ThemeEntry::Suggestion, theme_map, enable_colors)?;
        let mut table = new_table(&["Field", "Suggested domain", "Suggested email"], theme_map, enable_colors);
        for suggestion in &report.suggestions {
            table.add_row(vec![
                themed_cell(&suggestion.field, ThemeEntry::FieldName, theme_map, enable_colors),
                Cell::new(&suggestion.correction.suggested_domain),
                themed_cell(&suggestion.correction.suggested_email, ThemeEntry::Suggestion, theme_map, enable_colors),
            ]);
        }
        writeln!(writer, "{table}")?;
    }
    Ok(())
}
