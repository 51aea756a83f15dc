// File: formcheck-core/src/forms.rs

//! forms.rs - Locating named form schemas on disk and among the built-ins.
//!
//! A form can be referenced by a file path or by name. Names are resolved
//! against the user and system form directories first (one `<name>.yaml`
//! document per form), then against the built-in forms, so a file on disk
//! can shadow a built-in form of the same name.
//!
//! license: MIT OR Apache-2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, warn};

use crate::config::{validate_forms, FormConfig, FormSchema};
use crate::errors::FormcheckError;

/// Where a listed form comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSource {
    BuiltIn,
    File(PathBuf),
}

/// Short description of an available form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSummary {
    pub name: String,
    pub description: Option<String>,
    pub field_count: usize,
    pub source: FormSource,
}

fn form_directories() -> Vec<PathBuf> {
    let base_dirs = vec![
        dirs::home_dir().map(|p| p.join(".formcheck").join("forms")),
        dirs::config_dir().map(|p| p.join("formcheck").join("forms")),
        Some(PathBuf::from("/etc/formcheck/forms")),
        Some(PathBuf::from("./config")),
    ];
    base_dirs.into_iter().flatten().collect()
}

/// Candidate file locations for a form named `name`, in lookup order.
pub fn form_candidate_paths(name: &str) -> Vec<PathBuf> {
    form_directories()
        .into_iter()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Reads a single-form YAML document.
pub fn load_form_file(path: &Path) -> Result<FormSchema> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading form file {}", path.display()))?;
    let schema: FormSchema = serde_yml::from_str(&text)
        .with_context(|| format!("parsing form YAML {}", path.display()))?;
    validate_forms(std::slice::from_ref(&schema))
        .with_context(|| format!("checking form file {}", path.display()))?;
    Ok(schema)
}

/// Resolves a form by file path, then by name on disk, then among the built-ins.
pub fn load_form_by_name(name_or_path: &str) -> Result<FormSchema> {
    debug!("Attempting to load form from: '{}'", name_or_path);

    let path = Path::new(name_or_path);
    if path.is_file() {
        debug!("Input is a valid file path. Loading directly from: {}", path.display());
        return load_form_file(path);
    }

    if let Some(found) = form_candidate_paths(name_or_path).into_iter().find(|p| p.is_file()) {
        debug!("Found form '{}' at {}", name_or_path, found.display());
        return load_form_file(&found);
    }

    let defaults = FormConfig::load_default_forms()?;
    match defaults.form(name_or_path) {
        Some(schema) => {
            debug!("Using built-in form '{}'.", name_or_path);
            Ok(schema.clone())
        }
        None => Err(FormcheckError::FormNotFound(name_or_path.to_string()).into()),
    }
}

/// Lists built-in forms followed by forms found in the form directories.
///
/// Unreadable or unparsable files are skipped with a warning.
pub fn list_available_forms() -> Vec<FormSummary> {
    let mut out = Vec::new();

    match FormConfig::load_default_forms() {
        Ok(defaults) => out.extend(defaults.forms.into_iter().map(|f| FormSummary {
            field_count: f.fields.len(),
            name: f.name,
            description: f.description,
            source: FormSource::BuiltIn,
        })),
        Err(e) => warn!("Failed to load built-in forms: {:#}", e),
    }

    let mut seen_paths: HashSet<PathBuf> = HashSet::new();
    for dir in form_directories() {
        let Ok(entries) = fs::read_dir(&dir) else {
            debug!("Candidate form directory not found: {}", dir.display());
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("yaml") || !seen_paths.insert(path.clone()) {
                continue;
            }
            debug!("Found potential form at: {}", path.display());
            match load_form_file(&path) {
                Ok(schema) => out.push(FormSummary {
                    field_count: schema.fields.len(),
                    name: schema.name,
                    description: schema.description,
                    source: FormSource::File(path),
                }),
                Err(e) => warn!("Skipping form file '{}': {:#}", path.display(), e),
            }
        }
    }
    out
}
