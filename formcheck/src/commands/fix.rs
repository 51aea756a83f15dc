//! `formcheck fix`: apply every email domain suggestion to a JSON record.

use anyhow::{Context, Result};
use formcheck_core::{parse_record_json, RecordValidator};
use is_terminal::IsTerminal;
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::cli::FixCommand;
use crate::commands::{info_msg, read_input, resolve_engine, warn_msg};
use crate::ui::diff_viewer;
use crate::ui::theme::ThemeMap;

/// Writes the corrected record as pretty JSON, or a diff with `--diff`.
///
/// Fields without a suggestion are copied unchanged. Validation errors are
/// not reported here; use `validate` for that.
pub fn run_fix(cmd: &FixCommand, theme_map: &ThemeMap, quiet: bool) -> Result<ExitCode> {
    let engine = resolve_engine(&cmd.selection)?;
    let input = read_input(cmd.input_file.as_deref())?;
    let record = parse_record_json(&input)?;

    if engine.compiled().suggestion_fields.is_empty() && !quiet {
        warn_msg(
            format!("Form '{}' has no fields that accept domain suggestions; the record is unchanged.", engine.form_name()),
            theme_map,
        );
    }

    let suggestions = engine.suggestions(&record);
    for s in &suggestions {
        debug!("Applying suggestion for field '{}' (domain {}).", s.field, s.correction.suggested_domain);
    }
    let corrected = engine.apply_suggestions(&record);

    let corrected_json = serde_json::to_string_pretty(&corrected).context("Failed to serialize record")?;

    if let Some(path) = &cmd.output {
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        if cmd.diff {
            let original_json = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
            diff_viewer::print_diff(&format!("{original_json}\n"), &format!("{corrected_json}\n"), &mut file, theme_map, false)?;
        } else {
            writeln!(file, "{corrected_json}")?;
        }
        if !quiet {
            info_msg(format!("Corrected record written to {}", path.display()), theme_map);
        }
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();
        if cmd.diff {
            let original_json = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
            diff_viewer::print_diff(&format!("{original_json}\n"), &format!("{corrected_json}\n"), &mut writer, theme_map, supports_color)?;
        } else {
            writeln!(writer, "{corrected_json}")?;
        }
    }

    if !quiet {
        info_msg(format!("Applied {} suggestion(s).", suggestions.len()), theme_map);
    }
    Ok(ExitCode::SUCCESS)
}
