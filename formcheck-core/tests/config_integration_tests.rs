// formcheck-core/tests/config_integration_tests.rs
use anyhow::Result;
use tempfile::NamedTempFile;
use std::io::Write;
use test_log::test;

use formcheck_core::config::{self, FieldSpec, FormConfig, FormSchema, RuleSpec, RuleSpecKind};

fn schema(name: &str, fields: Vec<FieldSpec>) -> FormSchema {
    FormSchema { name: name.to_string(), description: None, fields }
}

fn field(name: &str, rules: Vec<RuleSpec>) -> FieldSpec {
    FieldSpec { name: name.to_string(), label: None, rules, suggest_domain: false }
}

fn write_yaml(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_forms() {
    let config = FormConfig::load_default_forms().unwrap();
    for name in ["registration", "address", "login", "forgot_password", "password_change", "feedback", "book"] {
        assert!(config.form(name).is_some(), "missing built-in form {}", name);
    }

    let registration = config.form("registration").unwrap();
    let email = registration.fields.iter().find(|f| f.name == "email").unwrap();
    assert!(email.suggest_domain);
    assert_eq!(email.rules[0].kind, RuleSpecKind::Required);
}

#[test]
fn test_load_from_file() -> Result<()> {
    let file = write_yaml(
        r#"
forms:
  - name: library_card
    description: "Replacement library card"
    fields:
      - name: card_number
        label: Card number
        rules:
          - kind: required
          - kind: pattern
            pattern: "^LIB-[0-9]{6}$"
            message: "{label} must look like LIB-000000"
"#,
    )?;
    let config = FormConfig::load_from_file(file.path())?;
    assert_eq!(config.forms.len(), 1);
    let form = &config.forms[0];
    assert_eq!(form.name, "library_card");
    assert_eq!(form.fields[0].label(), "Card number");
    assert_eq!(form.fields[0].rules[1].pattern.as_deref(), Some("^LIB-[0-9]{6}$"));
    assert!(!form.fields[0].suggest_domain);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_unknown_kind() -> Result<()> {
    let file = write_yaml(
        r#"
forms:
  - name: broken
    fields:
      - name: x
        rules:
          - kind: telepathy
"#,
    )?;
    let err = FormConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse form YAML"));
    Ok(())
}

#[test]
fn test_load_from_file_reports_every_problem() -> Result<()> {
    let file = write_yaml(
        r#"
forms:
  - name: dup
    fields:
      - name: a
        rules:
          - kind: min_length
      - name: a
  - name: dup
    fields:
      - name: b
        rules:
          - kind: pattern
            pattern: "(unclosed"
"#,
    )?;
    let err = format!("{:#}", FormConfig::load_from_file(file.path()).unwrap_err());
    assert!(err.contains("Duplicate form name found: 'dup'"), "{}", err);
    assert!(err.contains("duplicate field name 'a'"), "{}", err);
    assert!(err.contains("rule 'min_length' is missing the `value` field"), "{}", err);
    assert!(err.contains("invalid regex pattern"), "{}", err);
    Ok(())
}

#[test]
fn test_matches_field_target_is_checked() -> Result<()> {
    let file = write_yaml(
        r#"
forms:
  - name: signup
    fields:
      - name: password
      - name: confirm
        rules:
          - kind: matches_field
      - name: again
        rules:
          - kind: matches_field
            field: again
      - name: repeat
        rules:
          - kind: matches_field
            field: pasword
"#,
    )?;
    let err = format!("{:#}", FormConfig::load_from_file(file.path()).unwrap_err());
    assert!(err.contains("field 'confirm': rule 'matches_field' is missing the `field` field"), "{}", err);
    assert!(err.contains("field 'again': rule 'matches_field' compares the field with itself"), "{}", err);
    assert!(err.contains("refers to unknown field 'pasword'"), "{}", err);
    Ok(())
}

#[test]
fn test_missing_file_has_context() {
    let err = FormConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read form file"));
}

#[test]
fn test_merge_forms_no_user_config() {
    let default_config = FormConfig {
        forms: vec![schema("login", vec![field("email", vec![RuleSpec::new(RuleSpecKind::Required)])])],
    };
    let merged = config::merge_forms(default_config.clone(), None);
    assert_eq!(merged, default_config);
}

#[test]
fn test_merge_forms_override_and_append() {
    let default_config = FormConfig {
        forms: vec![
            schema("login", vec![field("email", vec![RuleSpec::new(RuleSpecKind::Required)])]),
            schema("book", vec![field("isbn", vec![RuleSpec::new(RuleSpecKind::Isbn)])]),
        ],
    };
    let user_config = FormConfig {
        forms: vec![
            schema("card", vec![field("number", vec![])]),
            schema(
                "login",
                vec![field("username", vec![RuleSpec::new(RuleSpecKind::Required).with_message("Username is required")])],
            ),
        ],
    };

    let merged = config::merge_forms(default_config, Some(user_config));

    assert_eq!(merged.form_names(), vec!["login", "book", "card"]);
    let login = merged.form("login").unwrap();
    assert_eq!(login.fields.len(), 1);
    assert_eq!(login.fields[0].name, "username");
}

#[test]
fn test_schema_round_trips_through_yaml_without_empty_options() -> Result<()> {
    let config = FormConfig {
        forms: vec![schema("feedback", vec![field("message", vec![RuleSpec::new(RuleSpecKind::MaxLength).with_value(2000)])])],
    };
    let yaml = serde_yml::to_string(&config)?;
    assert!(!yaml.contains("pattern"));
    assert!(!yaml.contains("description"));
    assert_eq!(FormConfig::from_yaml_str(&yaml)?, config);
    Ok(())
}
