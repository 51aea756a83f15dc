//! `formcheck forms`: list available forms or print one schema.

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use formcheck_core::{list_available_forms, load_form_by_name, FormSource, FormSummary};
use std::process::ExitCode;

use crate::cli::FormsCommand;

fn source_label(source: &FormSource) -> String {
    match source {
        FormSource::BuiltIn => "built-in".to_string(),
        FormSource::File(path) => path.display().to_string(),
    }
}

fn forms_table(forms: &[FormSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Name", "Description", "Fields", "Source"]);
    for form in forms {
        table.add_row(vec![
            form.name.clone(),
            form.description.clone().unwrap_or_default(),
            form.field_count.to_string(),
            source_label(&form.source),
        ]);
    }
    table
}

pub fn run_forms(cmd: &FormsCommand) -> Result<ExitCode> {
    match cmd {
        FormsCommand::List { json } => {
            let forms = list_available_forms();
            if *json {
                let out = serde_json::to_string_pretty(&forms).context("Failed to serialize form list")?;
                println!("{out}");
            } else {
                println!("{}", forms_table(&forms));
            }
        }
        FormsCommand::Show { name } => {
            let schema = load_form_by_name(name)?;
            let yaml = serde_yaml::to_string(&schema).context("Failed to serialize form schema")?;
            print!("{yaml}");
        }
    }
    Ok(ExitCode::SUCCESS)
}
