// formcheck-core/src/engine.rs
//! Defines the `RecordValidator` trait and the schema-driven `FormEngine`.
//!
//! The trait is the seam between callers (CLI, report builder, embedding
//! applications) and whatever produces the rules: a compiled YAML form or a
//! hand-built rule map.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;

use crate::config::{FormConfig, FormSchema};
use crate::corrections::{apply_all_suggestions, suggest_for_record, FieldSuggestion};
use crate::errors::FormcheckError;
use crate::form::{validate, FieldRecord, FieldRules, ValidationRecord};
use crate::rules::compiler::{get_or_compile_form, CompiledForm};

/// Validates whole records and proposes email domain fixes.
pub trait RecordValidator: Send + Sync {
    /// Name reported alongside results.
    fn form_name(&self) -> &str;

    /// Runs every field's rules; see [`crate::form::validate`] for the policy.
    fn validate(&self, record: &FieldRecord) -> ValidationRecord;

    /// Domain typo suggestions for the fields that accept them.
    fn suggestions(&self, record: &FieldRecord) -> Vec<FieldSuggestion>;

    /// Returns `record` with every suggestion applied.
    fn apply_suggestions(&self, record: &FieldRecord) -> FieldRecord {
        apply_all_suggestions(record, &self.suggestions(record))
    }
}

/// A `RecordValidator` built from a declared `FormSchema`.
#[derive(Debug)]
pub struct FormEngine {
    compiled: Arc<CompiledForm>,
    schema: FormSchema,
}

impl FormEngine {
    pub fn new(schema: FormSchema) -> Result<Self> {
        let compiled = get_or_compile_form(&schema)
            .with_context(|| format!("Failed to compile form '{}' for FormEngine", schema.name))?;
        Ok(Self { compiled, schema })
    }

    /// Builds an engine for the form called `name` in `config`.
    pub fn from_config(config: &FormConfig, name: &str) -> Result<Self> {
        let schema = config
            .form(name)
            .cloned()
            .ok_or_else(|| FormcheckError::FormNotFound(name.to_string()))?;
        Self::new(schema)
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn compiled(&self) -> &CompiledForm {
        &self.compiled
    }
}

impl RecordValidator for FormEngine {
    fn form_name(&self) -> &str {
        &self.schema.name
    }

    fn validate(&self, record: &FieldRecord) -> ValidationRecord {
        debug!("Validating record against form '{}'.", self.schema.name);
        validate(record, &self.compiled.rules)
    }

    fn suggestions(&self, record: &FieldRecord) -> Vec<FieldSuggestion> {
        suggest_for_record(record, &self.compiled.suggestion_fields)
    }
}

/// Ad-hoc rule maps validate without a name and never suggest corrections.
impl RecordValidator for FieldRules {
    fn form_name(&self) -> &str {
        "ad-hoc"
    }

    fn validate(&self, record: &FieldRecord) -> ValidationRecord {
        validate(record, self)
    }

    fn suggestions(&self, _record: &FieldRecord) -> Vec<FieldSuggestion> {
        Vec::new()
    }
}
