//! messages.rs - Default message templates and template rendering.
//!
//! Templates use `tinytemplate` syntax. The context exposes `label` (the
//! field's human-readable name), `field` (its key) and `value` (the rule's
//! numeric parameter, empty when the rule has none).
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;
use tinytemplate::{format_unescaped, TinyTemplate};

use crate::config::RuleSpecKind;
use crate::errors::FormcheckError;

#[derive(Serialize)]
struct MessageContext<'a> {
    label: &'a str,
    field: &'a str,
    value: Option<usize>,
}

/// The template used when a rule declares no `message`.
pub fn default_message(kind: RuleSpecKind) -> &'static str {
    match kind {
        RuleSpecKind::Required => "{label} is required",
        RuleSpecKind::NationalId => "{label} must be a valid PESEL number",
        RuleSpecKind::PostalCode => "{label} must have the form 00-000",
        RuleSpecKind::Phone => "{label} must be a valid Polish phone number",
        RuleSpecKind::Name => "{label} may only contain letters, spaces and hyphens",
        RuleSpecKind::Email => "{label} must be a valid email address",
        RuleSpecKind::Isbn => "{label} must be a valid ISBN",
        RuleSpecKind::Positive => "{label} must be a positive number",
        RuleSpecKind::MinLength => "{label} must be at least {value} characters",
        RuleSpecKind::MaxLength => "{label} must be at most {value} characters",
        RuleSpecKind::Pattern => "{label} has an invalid format",
        RuleSpecKind::MatchesField => "{label} does not match",
    }
}

/// Renders a message template for one field.
pub fn render_message(
    template: &str,
    field: &str,
    label: &str,
    value: Option<usize>,
) -> Result<String, FormcheckError> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&format_unescaped);
    tt.add_template("message", template)
        .map_err(|e| FormcheckError::TemplateError(field.to_string(), e.to_string()))?;

    let ctx = MessageContext { label, field, value };
    tt.render("message", &ctx)
        .map_err(|e| FormcheckError::TemplateError(field.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_required() {
        let msg = render_message(default_message(RuleSpecKind::Required), "first_name", "First name", None).unwrap();
        assert_eq!(msg, "First name is required");
    }

    #[test]
    fn test_render_value_placeholder() {
        let msg = render_message(default_message(RuleSpecKind::MinLength), "password", "Password", Some(8)).unwrap();
        assert_eq!(msg, "Password must be at least 8 characters");
    }

    #[test]
    fn test_render_does_not_html_escape() {
        let msg = render_message("{label} is required", "terms", "Terms & conditions", None).unwrap();
        assert_eq!(msg, "Terms & conditions is required");
    }

    #[test]
    fn test_plain_message_passes_through() {
        let msg = render_message("Invalid ISBN number", "isbn", "ISBN", None).unwrap();
        assert_eq!(msg, "Invalid ISBN number");
    }

    #[test]
    fn test_unknown_placeholder_is_an_error() {
        let err = render_message("{nope} is required", "isbn", "ISBN", None).unwrap_err();
        assert!(matches!(err, FormcheckError::TemplateError(field, _) if field == "isbn"));
    }
}
