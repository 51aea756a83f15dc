//! Configuration management for `formcheck-core`.
//!
//! This module defines the YAML-facing form schema: forms made of fields, each
//! field carrying an ordered list of rule declarations. It handles loading the
//! embedded default forms, loading user files, merging the two, and checking
//! schema integrity before anything is compiled.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use log::{debug, info, warn};
use regex::Regex;

/// Maximum allowed length for a `pattern` rule's regex string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// The predicate a declared rule maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSpecKind {
    Required,
    NationalId,
    PostalCode,
    Phone,
    Name,
    Email,
    Isbn,
    Positive,
    MinLength,
    MaxLength,
    Pattern,
    MatchesField,
}

impl RuleSpecKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSpecKind::Required => "required",
            RuleSpecKind::NationalId => "national_id",
            RuleSpecKind::PostalCode => "postal_code",
            RuleSpecKind::Phone => "phone",
            RuleSpecKind::Name => "name",
            RuleSpecKind::Email => "email",
            RuleSpecKind::Isbn => "isbn",
            RuleSpecKind::Positive => "positive",
            RuleSpecKind::MinLength => "min_length",
            RuleSpecKind::MaxLength => "max_length",
            RuleSpecKind::Pattern => "pattern",
            RuleSpecKind::MatchesField => "matches_field",
        }
    }

    /// Whether the rule needs a numeric `value`.
    pub fn needs_value(&self) -> bool {
        matches!(self, RuleSpecKind::MinLength | RuleSpecKind::MaxLength)
    }
}

impl fmt::Display for RuleSpecKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule declaration inside a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RuleSpec {
    pub kind: RuleSpecKind,
    /// Message template; a default per kind is used when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Length bound for `min_length` / `max_length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<usize>,
    /// Regex for `pattern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Name of the field a `matches_field` rule compares against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl RuleSpec {
    pub fn new(kind: RuleSpecKind) -> Self {
        Self { kind, message: None, value: None, pattern: None, field: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_value(mut self, value: usize) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// A named input field and its rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FieldSpec {
    pub name: String,
    /// Human-readable name used in messages; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    /// If true, the field is an email address eligible for domain typo suggestions.
    #[serde(default)]
    pub suggest_domain: bool,
}

impl FieldSpec {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A complete form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FormSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Top-level configuration: a list of forms.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormConfig {
    pub forms: Vec<FormSchema>,
}

impl FormConfig {
    /// Loads form schemas from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom forms from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load form file {}", path.display()))?;

        info!("Loaded {} forms from file {}.", config.forms.len(), path.display());
        Ok(config)
    }

    /// Loads the built-in form schemas from the embedded configuration.
    pub fn load_default_forms() -> Result<Self> {
        debug!("Loading default forms from embedded string...");
        let default_yaml = include_str!("../config/default_forms.yaml");
        let config = Self::from_yaml_str(default_yaml).context("Failed to parse default forms")?;

        debug!("Loaded {} default forms.", config.forms.len());
        Ok(config)
    }

    /// Parses and checks a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: FormConfig = serde_yml::from_str(text).context("Failed to parse form YAML")?;
        validate_forms(&config.forms)?;
        Ok(config)
    }

    pub fn form(&self, name: &str) -> Option<&FormSchema> {
        self.forms.iter().find(|f| f.name == name)
    }

    pub fn form_names(&self) -> Vec<&str> {
        self.forms.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Merges user-defined forms with the defaults.
///
/// A user form replaces the default form of the same name wholesale. Default
/// order is kept; new user forms are appended in their file order.
pub fn merge_forms(default_config: FormConfig, user_config: Option<FormConfig>) -> FormConfig {
    debug!("merge_forms called. Initial default forms count: {}", default_config.forms.len());

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    debug!("User config provided. Merging {} user forms.", user_cfg.forms.len());
    let mut overrides: HashMap<String, FormSchema> = user_cfg
        .forms
        .iter()
        .map(|f| (f.name.clone(), f.clone()))
        .collect();

    let mut final_forms: Vec<FormSchema> = default_config
        .forms
        .into_iter()
        .map(|form| match overrides.remove(&form.name) {
            Some(user_form) => {
                debug!("Form '{}' overridden by user configuration.", user_form.name);
                user_form
            }
            None => form,
        })
        .collect();

    final_forms.extend(user_cfg.forms.into_iter().filter(|f| overrides.contains_key(&f.name)));

    debug!("Final total forms after merge: {}", final_forms.len());
    FormConfig { forms: final_forms }
}

/// Validates schema integrity (names, rule parameters, regex compilation).
pub fn validate_forms(forms: &[FormSchema]) -> Result<()> {
    let mut form_names = HashSet::new();
    let mut errors = Vec::new();

    for form in forms {
        if form.name.is_empty() {
            errors.push("A form has an empty `name` field.".to_string());
        } else if !form_names.insert(form.name.as_str()) {
            errors.push(format!("Duplicate form name found: '{}'.", form.name));
        }

        if form.fields.is_empty() {
            warn!("Form '{}' declares no fields; it will accept any record.", form.name);
        }

        let mut field_names = HashSet::new();
        for field in &form.fields {
            if field.name.is_empty() {
                errors.push(format!("Form '{}' has a field with an empty `name`.", form.name));
            } else if !field_names.insert(field.name.as_str()) {
                errors.push(format!("Form '{}': duplicate field name '{}'.", form.name, field.name));
            }

            for rule in &field.rules {
                validate_rule(form, &field.name, rule, &mut errors);
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Form validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

fn validate_rule(schema: &FormSchema, field: &str, rule: &RuleSpec, errors: &mut Vec<String>) {
    let form = schema.name.as_str();
    if rule.kind.needs_value() && rule.value.is_none() {
        errors.push(format!(
            "Form '{}', field '{}': rule '{}' is missing the `value` field.",
            form, field, rule.kind
        ));
    }

    if rule.kind == RuleSpecKind::MatchesField {
        match rule.field.as_deref() {
            None | Some("") => errors.push(format!(
                "Form '{}', field '{}': rule 'matches_field' is missing the `field` field.",
                form, field
            )),
            Some(other) if other == field => errors.push(format!(
                "Form '{}', field '{}': rule 'matches_field' compares the field with itself.",
                form, field
            )),
            Some(other) if !schema.fields.iter().any(|f| f.name == other) => errors.push(format!(
                "Form '{}', field '{}': rule 'matches_field' refers to unknown field '{}'.",
                form, field, other
            )),
            Some(_) => {}
        }
        return;
    }

    if rule.kind != RuleSpecKind::Pattern {
        return;
    }

    let pattern = match &rule.pattern {
        Some(p) if !p.is_empty() => p,
        _ => {
            errors.push(format!(
                "Form '{}', field '{}': rule 'pattern' is missing the `pattern` field.",
                form, field
            ));
            return;
        }
    };

    if pattern.len() > MAX_PATTERN_LENGTH {
        errors.push(format!(
            "Form '{}', field '{}': pattern length ({}) exceeds maximum allowed ({}).",
            form, field, pattern.len(), MAX_PATTERN_LENGTH
        ));
    } else if let Err(e) = Regex::new(pattern) {
        errors.push(format!(
            "Form '{}', field '{}' has an invalid regex pattern: {}",
            form, field, e
        ));
    }
}
