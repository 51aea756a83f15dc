//! report.rs - Serializable summary of one validation run.
//!
//! A report bundles the per-field errors and the domain suggestions with a
//! run identifier and timestamp, for JSON output and audit trails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::corrections::FieldSuggestion;
use crate::engine::RecordValidator;
use crate::form::{FieldRecord, ValidationRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub run_id: String,
    pub checked_at: DateTime<Utc>,
    pub form: String,
    pub valid: bool,
    pub errors: ValidationRecord,
    pub suggestions: Vec<FieldSuggestion>,
}

impl ValidationReport {
    /// Runs `validator` over `record` and records the outcome.
    pub fn build(validator: &dyn RecordValidator, record: &FieldRecord) -> Self {
        let errors = validator.validate(record);
        Self {
            run_id: Uuid::new_v4().to_string(),
            checked_at: Utc::now(),
            form: validator.form_name().to_string(),
            valid: errors.is_valid(),
            errors,
            suggestions: validator.suggestions(record),
        }
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}
