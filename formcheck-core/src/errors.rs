//! errors.rs - Custom error types for the formcheck-core library.
//!
//! Validation failures are never errors: validators return `bool` and the
//! aggregator returns messages as data. This enum covers the fallible parts
//! of the crate, which are loading and compiling form schemas.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `formcheck-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FormcheckError {
    #[error("Failed to compile pattern rule for field '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Field '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Field '{0}': rule '{1}' requires a `{2}`")]
    MissingRuleParameter(String, String, &'static str),

    #[error("Field '{0}': failed to render message template: {1}")]
    TemplateError(String, String),

    #[error("Form '{0}' not found.")]
    FormNotFound(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
