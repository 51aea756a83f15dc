// formcheck/src/commands/mod.rs
//! Command implementations and the helpers they share: form resolution,
//! input reading and themed status messages on stderr.

pub mod check;
pub mod fix;
pub mod forms;
pub mod suggest;
pub mod validate;

use anyhow::{bail, Context, Result};
use formcheck_core::{load_form_by_name, merge_forms, FormConfig, FormEngine, FormcheckError};
use is_terminal::IsTerminal;
use log::debug;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::FormSelection;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Reads the whole input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => {
            debug!("Reading input from file: {}", p.display());
            std::fs::read_to_string(p).with_context(|| format!("Failed to read input file: {}", p.display()))
        }
        None => {
            debug!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Builds the engine for the form the user selected.
///
/// * `--schema` and `--form`: the schema file is merged over the built-in
///   forms and the named form is taken from the result.
/// * `--schema` alone: the file must declare exactly one form.
/// * `--form` alone: a path, a form directory entry or a built-in name.
pub fn resolve_engine(selection: &FormSelection) -> Result<FormEngine> {
    match (selection.form.as_deref(), selection.schema.as_deref()) {
        (Some(name), Some(schema_path)) => {
            let user = FormConfig::load_from_file(schema_path)?;
            let merged = merge_forms(FormConfig::load_default_forms()?, Some(user));
            FormEngine::from_config(&merged, name)
        }
        (None, Some(schema_path)) => {
            let user = FormConfig::load_from_file(schema_path)?;
            match user.forms.as_slice() {
                [only] => FormEngine::new(only.clone()),
                [] => bail!("Schema file {} declares no forms.", schema_path.display()),
                _ => bail!(
                    "Schema file {} declares {} forms; choose one with --form ({}).",
                    schema_path.display(),
                    user.forms.len(),
                    user.form_names().join(", ")
                ),
            }
        }
        (Some(name), None) => {
            let schema = load_form_by_name(name)?;
            FormEngine::new(schema)
        }
        (None, None) => Err(FormcheckError::Fatal(
            "No form selected. Use --form <NAME> or --schema <FILE>.".to_string(),
        )
        .into()),
    }
}
