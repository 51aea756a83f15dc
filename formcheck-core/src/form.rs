// File: formcheck-core/src/form.rs
//! Form aggregation: runs per-field rule lists over a record of raw values.
//!
//! The aggregator is the only place where a failed predicate becomes a
//! user-facing message. Policy, applied to every form:
//!
//! * rules for a field run in declaration order and the first failure wins,
//!   so a field never carries more than one message;
//! * a value that is empty or whitespace-only only meets `Required` rules;
//!   format rules are skipped, and a field without a `Required` rule is valid
//!   when empty. This is stricter about blanks than the portal's browser
//!   forms, whose `required` and pattern checks treat `"  "` as filled in;
//! * `MatchesField` compares against another field of the same record and
//!   fails only when both values are non-empty and differ;
//! * a field named in the rules but absent from the record is treated as the
//!   empty string;
//! * fields present in the record but not named in the rules are ignored.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pii::{loggable_value, value_fingerprint};
use crate::validators;

/// Raw field values keyed by field name.
pub type FieldRecord = BTreeMap<String, String>;

/// Ordered rule lists keyed by field name.
pub type FieldRules = BTreeMap<String, Vec<Rule>>;

/// Signature of a caller-supplied predicate.
pub type CustomCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// The check a [`Rule`] performs.
#[derive(Clone)]
pub enum RuleKind {
    Required,
    NationalId,
    PostalCode,
    Phone,
    Name,
    Email,
    Isbn,
    Positive,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    /// Must equal the value of the named field.
    MatchesField(String),
    Custom(CustomCheck),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Required => write!(f, "Required"),
            RuleKind::NationalId => write!(f, "NationalId"),
            RuleKind::PostalCode => write!(f, "PostalCode"),
            RuleKind::Phone => write!(f, "Phone"),
            RuleKind::Name => write!(f, "Name"),
            RuleKind::Email => write!(f, "Email"),
            RuleKind::Isbn => write!(f, "Isbn"),
            RuleKind::Positive => write!(f, "Positive"),
            RuleKind::MinLength(n) => write!(f, "MinLength({})", n),
            RuleKind::MaxLength(n) => write!(f, "MaxLength({})", n),
            RuleKind::Pattern(re) => write!(f, "Pattern({:?})", re.as_str()),
            RuleKind::MatchesField(other) => write!(f, "MatchesField({:?})", other),
            RuleKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A single check plus the message reported when it fails.
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: String,
}

impl Rule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Required, message)
    }

    /// Wraps an arbitrary predicate as a rule.
    pub fn custom<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(RuleKind::Custom(Arc::new(check)), message)
    }

    pub fn is_required(&self) -> bool {
        matches!(self.kind, RuleKind::Required)
    }

    /// Runs the rule against `value`, looking up other fields in `record`.
    pub fn passes_in(&self, value: &str, record: &FieldRecord) -> bool {
        match &self.kind {
            RuleKind::MatchesField(other) => {
                let other_value = record.get(other).map(String::as_str).unwrap_or("");
                value.trim().is_empty() || other_value.trim().is_empty() || value == other_value
            }
            _ => self.passes(value),
        }
    }

    /// Runs the underlying predicate against a raw value.
    ///
    /// Cross-field rules have nothing to compare against here and pass; use
    /// [`Rule::passes_in`] to evaluate them.
    pub fn passes(&self, value: &str) -> bool {
        match &self.kind {
            RuleKind::Required => !value.trim().is_empty(),
            RuleKind::NationalId => validators::is_valid_national_id(value),
            RuleKind::PostalCode => validators::is_valid_postal_code(value),
            RuleKind::Phone => validators::is_valid_phone(value),
            RuleKind::Name => validators::is_valid_name(value),
            RuleKind::Email => validators::is_valid_email(value),
            RuleKind::Isbn => validators::is_valid_isbn(value),
            RuleKind::Positive => validators::is_positive_integer(value),
            RuleKind::MinLength(n) => validators::has_min_length(value, *n),
            RuleKind::MaxLength(n) => validators::has_max_length(value, *n),
            RuleKind::Pattern(re) => re.is_match(value),
            RuleKind::MatchesField(_) => true,
            RuleKind::Custom(check) => check(value),
        }
    }
}

/// Per-field error messages produced by one validation pass.
///
/// Only failed fields have an entry; a valid field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationRecord {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationRecord {
    /// `true` when no field has a message.
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Messages for one field; empty for valid or unchecked fields.
    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.errors_for(field).first().map(String::as_str)
    }

    pub fn has_errors(&self, field: &str) -> bool {
        !self.errors_for(field).is_empty()
    }

    /// Number of fields with at least one message.
    pub fn failed_field_count(&self) -> usize {
        self.errors.values().filter(|v| !v.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// Validates `record` against `rules`, returning the messages of failed fields.
///
/// See the module documentation for the empty-value and missing-field policy.
/// This never panics and never fails: every string, including empty, very
/// long and non-printable input, produces a record.
pub fn validate(record: &FieldRecord, rules: &FieldRules) -> ValidationRecord {
    let mut result = ValidationRecord::default();

    for (field, field_rules) in rules {
        let value = match record.get(field) {
            Some(v) => v.as_str(),
            None => {
                debug!("Field '{}' absent from record, treating as empty.", field);
                ""
            }
        };

        if let Some(message) = first_failure(value, field_rules, record) {
            debug!(
                "Field '{}' failed validation (value {} / {}): {}",
                field,
                loggable_value(value),
                value_fingerprint(field, value),
                message
            );
            result.errors.insert(field.clone(), vec![message.to_string()]);
        } else {
            debug!("Field '{}' passed {} rule(s).", field, field_rules.len());
        }
    }

    debug!(
        "Validation pass finished: {} field(s) checked, {} failed.",
        rules.len(),
        result.failed_field_count()
    );
    result
}

fn first_failure<'r>(value: &str, rules: &'r [Rule], record: &FieldRecord) -> Option<&'r str> {
    if value.trim().is_empty() {
        return rules.iter().find(|r| r.is_required()).map(|r| r.message.as_str());
    }
    rules.iter().find(|r| !r.passes_in(value, record)).map(|r| r.message.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> FieldRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn registration_rules() -> FieldRules {
        let mut rules = FieldRules::new();
        rules.insert(
            "email".to_string(),
            vec![
                Rule::required("Email is required"),
                Rule::new(RuleKind::Email, "Invalid email format"),
            ],
        );
        rules.insert(
            "pesel".to_string(),
            vec![
                Rule::required("PESEL is required"),
                Rule::new(RuleKind::NationalId, "Invalid PESEL checksum"),
            ],
        );
        rules
    }

    #[test]
    fn required_and_checksum_failures_are_both_reported() {
        let rec = record(&[("email", ""), ("pesel", "44051401350")]);
        let result = validate(&rec, &registration_rules());

        assert!(!result.is_valid());
        assert_eq!(result.errors_for("email"), ["Email is required".to_string()]);
        assert_eq!(result.first_error("pesel"), Some("Invalid PESEL checksum"));
    }

    #[test]
    fn valid_record_has_no_entries() {
        let rec = record(&[("email", "jan@example.com"), ("pesel", "44051401359")]);
        let result = validate(&rec, &registration_rules());
        assert!(result.is_valid());
        assert_eq!(result.failed_field_count(), 0);
        assert!(result.into_inner().is_empty());
    }

    #[test]
    fn first_failing_rule_wins() {
        let mut rules = FieldRules::new();
        rules.insert(
            "password".to_string(),
            vec![
                Rule::new(RuleKind::MinLength(8), "too short"),
                Rule::new(RuleKind::Pattern(Regex::new("[0-9]").unwrap()), "needs a digit"),
            ],
        );
        let result = validate(&record(&[("password", "abc")]), &rules);
        assert_eq!(result.errors_for("password"), ["too short".to_string()]);
    }

    #[test]
    fn empty_value_skips_format_rules() {
        let mut rules = FieldRules::new();
        rules.insert(
            "apartment".to_string(),
            vec![Rule::new(RuleKind::Positive, "Apartment number must be positive")],
        );
        rules.insert(
            "phone".to_string(),
            vec![
                Rule::new(RuleKind::Phone, "bad phone"),
                Rule::required("Phone is required"),
            ],
        );
        let result = validate(&record(&[("apartment", "   "), ("phone", "")]), &rules);

        assert!(!result.has_errors("apartment"));
        assert_eq!(result.first_error("phone"), Some("Phone is required"));
    }

    #[test]
    fn whitespace_only_optional_value_is_valid() {
        let mut rules = FieldRules::new();
        rules.insert(
            "apartment_number".to_string(),
            vec![Rule::new(RuleKind::Positive, "Apartment number must be positive")],
        );
        assert!(validate(&record(&[("apartment_number", "  ")]), &rules).is_valid());
        assert!(!validate(&record(&[("apartment_number", " 0 ")]), &rules).is_valid());
    }

    fn confirmation_rules() -> FieldRules {
        let mut rules = FieldRules::new();
        rules.insert("new_password".to_string(), vec![Rule::required("New password is required")]);
        rules.insert(
            "confirm_password".to_string(),
            vec![
                Rule::required("Password confirmation is required"),
                Rule::new(RuleKind::MatchesField("new_password".to_string()), "Passwords do not match"),
            ],
        );
        rules
    }

    #[test]
    fn matches_field_reports_mismatch_on_the_confirming_field() {
        let rec = record(&[("new_password", "newsecret1"), ("confirm_password", "different99")]);
        let result = validate(&rec, &confirmation_rules());
        assert_eq!(result.errors_for("confirm_password"), ["Passwords do not match".to_string()]);
        assert!(!result.has_errors("new_password"));
    }

    #[test]
    fn matches_field_passes_when_equal_or_other_is_empty() {
        let rules = confirmation_rules();
        let same = record(&[("new_password", "newsecret1"), ("confirm_password", "newsecret1")]);
        assert!(validate(&same, &rules).is_valid());

        let other_empty = validate(&record(&[("confirm_password", "newsecret1")]), &rules);
        assert!(!other_empty.has_errors("confirm_password"));
        assert_eq!(other_empty.first_error("new_password"), Some("New password is required"));

        let own_empty = validate(&record(&[("new_password", "newsecret1")]), &rules);
        assert_eq!(own_empty.first_error("confirm_password"), Some("Password confirmation is required"));
    }

    #[test]
    fn missing_field_is_treated_as_empty() {
        let result = validate(&FieldRecord::new(), &registration_rules());
        assert_eq!(result.first_error("email"), Some("Email is required"));
        assert_eq!(result.first_error("pesel"), Some("PESEL is required"));
    }

    #[test]
    fn unchecked_fields_never_appear() {
        let rec = record(&[("email", "jan@example.com"), ("pesel", "44051401359"), ("nickname", "!!!")]);
        let result = validate(&rec, &registration_rules());
        assert!(result.iter().all(|(field, _)| field != "nickname"));
    }

    #[test]
    fn passes_are_fresh_each_time() {
        let rules = registration_rules();
        let first = validate(&record(&[("email", ""), ("pesel", "")]), &rules);
        assert!(!first.is_valid());
        let second = validate(&record(&[("email", "a@b.pl"), ("pesel", "44051401359")]), &rules);
        assert!(second.is_valid());
    }

    #[test]
    fn custom_rules_run_in_order() {
        let mut rules = FieldRules::new();
        rules.insert(
            "card".to_string(),
            vec![Rule::custom("Card number must start with LIB", |v| v.starts_with("LIB"))],
        );
        assert!(validate(&record(&[("card", "LIB-0001")]), &rules).is_valid());
        assert!(!validate(&record(&[("card", "0001")]), &rules).is_valid());
    }

    #[test]
    fn hostile_values_never_panic() {
        let long = "ż".repeat(10_000);
        let mut rules = registration_rules();
        rules.insert(
            "name".to_string(),
            vec![Rule::required("Name is required"), Rule::new(RuleKind::Name, "Invalid name")],
        );
        for value in ["", long.as_str(), "🦀🦀🦀", "\u{0}\u{8}\u{1b}", "\u{feff}"] {
            let rec = record(&[("email", value), ("pesel", value), ("name", value)]);
            let _ = validate(&rec, &rules);
        }
    }

    #[test]
    fn record_serializes_as_plain_map() {
        let rec = record(&[("email", ""), ("pesel", "44051401359")]);
        let json = serde_json::to_value(validate(&rec, &registration_rules())).unwrap();
        assert_eq!(json, serde_json::json!({ "email": ["Email is required"] }));
    }
}
