// formcheck-core/src/lib.rs
//! # formcheck Core Library
//!
//! `formcheck-core` provides the platform-independent validation and input
//! correction logic behind the library portal's forms: reader registration,
//! postal address, sign-in, password reset and catalog entry. It checks raw
//! text fields before they are submitted to the backend.
//!
//! Everything on the validation path is pure: no I/O, no shared mutable
//! state, no panics for any string input. The only process-wide data are the
//! immutable domain correction table, static regexes and a cache of compiled
//! forms.
//!
//! ## Modules
//!
//! * `validators`: Single-field predicates (PESEL checksum, postal code, phone, name, email, ISBN).
//! * `corrections`: Email domain typo table, suggestion lookup and suggestion application.
//! * `form`: The form aggregator, turning rule failures into per-field messages.
//! * `config`: YAML form schemas, default forms, merging and integrity checks.
//! * `rules`: Compilation of schemas into executable rules, with message templates.
//! * `forms`: Resolving named forms on disk and among the built-ins.
//! * `engine`: The `RecordValidator` trait and the schema-driven `FormEngine`.
//! * `report`: Serializable summary of a validation run.
//! * `headless`: One-shot helpers for non-interactive use.
//! * `pii`: Masking and fingerprinting of field values in debug logs.
//!
//! ## Usage Example
//!
//! ```rust
//! use formcheck_core::{headless_validate, parse_record_json, FormConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = FormConfig::load_default_forms()?;
//!     let record = parse_record_json(r#"{"email": "jan@gmial.com", "pesel": "44051401359"}"#)?;
//!
//!     let report = headless_validate(&config, "forgot_password", &record)?;
//!     assert!(report.valid);
//!     assert_eq!(report.suggestions[0].correction.suggested_email, "jan@gmail.com");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Invalid input is never an error: validators return `bool`, the aggregator
//! returns messages as data. Loading and compiling schemas uses
//! `anyhow::Error`, with `FormcheckError` for the cases callers may want to
//! match on.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod corrections;
pub mod engine;
pub mod errors;
pub mod form;
pub mod forms;
pub mod headless;
pub mod pii;
pub mod report;
pub mod rules;
pub mod validators;

/// Re-exports the single-field predicates.
pub use validators::{
    is_positive_integer,
    is_valid_email,
    is_valid_isbn,
    is_valid_name,
    is_valid_national_id,
    is_valid_phone,
    is_valid_postal_code,
};

/// Re-exports domain typo correction.
pub use corrections::{
    apply_all_suggestions,
    apply_correction,
    suggest_correction,
    suggest_for_record,
    DomainCorrection,
    FieldSuggestion,
    CORRECTION_TABLE,
};

/// Re-exports the form aggregator and its data types.
pub use form::{validate, FieldRecord, FieldRules, Rule, RuleKind, ValidationRecord};

/// Re-exports the schema configuration types and functions.
pub use config::{
    merge_forms,
    FieldSpec,
    FormConfig,
    FormSchema,
    RuleSpec,
    RuleSpecKind,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::FormcheckError;

pub use engine::{FormEngine, RecordValidator};
pub use forms::{list_available_forms, load_form_by_name, FormSource, FormSummary};
pub use report::ValidationReport;
pub use headless::{headless_apply_suggestions, headless_validate, parse_record_json};
pub use rules::compiler::{compile_form, get_or_compile_form, CompiledForm};
