// File: formcheck-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot use of the core without a UI: parse a
//! JSON record, validate it against a named form, or apply every domain
//! suggestion in one call.

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::config::FormConfig;
use crate::engine::{FormEngine, RecordValidator};
use crate::form::FieldRecord;
use crate::report::ValidationReport;

/// Parses a JSON object into a `FieldRecord`.
///
/// String values are kept verbatim, numbers and booleans are converted to
/// their JSON text, and `null` becomes the empty string. Nested arrays and
/// objects are rejected.
pub fn parse_record_json(text: &str) -> Result<FieldRecord> {
    let value: Value = serde_json::from_str(text).context("Input is not valid JSON")?;
    let Value::Object(map) = value else {
        bail!("Input must be a JSON object mapping field names to values");
    };

    let mut record = FieldRecord::new();
    for (field, value) in map {
        let text = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                bail!("Field '{}' must be a string, number, boolean or null", field)
            }
        };
        record.insert(field, text);
    }
    Ok(record)
}

/// Validates `record` against the form called `form_name` in `config`.
/// This function is the primary entry point for non-interactive use.
pub fn headless_validate(config: &FormConfig, form_name: &str, record: &FieldRecord) -> Result<ValidationReport> {
    let engine = FormEngine::from_config(config, form_name)?;
    Ok(ValidationReport::build(&engine, record))
}

/// Applies every domain suggestion the named form allows and returns the corrected record.
pub fn headless_apply_suggestions(config: &FormConfig, form_name: &str, record: &FieldRecord) -> Result<FieldRecord> {
    let engine = FormEngine::from_config(config, form_name)?;
    Ok(engine.apply_suggestions(record))
}
