//! `formcheck validate`: check a JSON record against a form.

use anyhow::{Context, Result};
use formcheck_core::{parse_record_json, ValidationReport};
use is_terminal::IsTerminal;
use log::info;
use std::fs;
use std::io;
use std::process::ExitCode;

use crate::cli::ValidateCommand;
use crate::commands::{info_msg, read_input, resolve_engine};
use crate::ui::report_table;
use crate::ui::theme::ThemeMap;

/// Validates the record and prints a table, or JSON with `--json-stdout`.
///
/// With `--json-file` the report is also written to disk. The exit code is 1
/// only when `--fail-on-invalid` is set and the record has errors.
pub fn run_validate(cmd: &ValidateCommand, theme_map: &ThemeMap, quiet: bool) -> Result<ExitCode> {
    let engine = resolve_engine(&cmd.selection)?;
    let input = read_input(cmd.input_file.as_deref())?;
    let record = parse_record_json(&input)?;

    let report = ValidationReport::build(&engine, &record);
    info!(
        "Validation run {} for form '{}': {} failed field(s), {} suggestion(s).",
        report.run_id,
        report.form,
        report.errors.failed_field_count(),
        report.suggestions.len()
    );

    if cmd.json_stdout {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();
        report_table::print_report(&report, Some(engine.compiled()), &mut writer, theme_map, supports_color)?;
    }

    if let Some(path) = &cmd.json_file {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        fs::write(path, json).with_context(|| format!("Failed to write report to {}", path.display()))?;
        if !quiet {
            info_msg(format!("Report written to {}", path.display()), theme_map);
        }
    }

    if cmd.fail_on_invalid && !report.valid {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
