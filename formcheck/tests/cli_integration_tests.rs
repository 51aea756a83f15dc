// formcheck/tests/cli_integration_tests.rs
//! Command-line integration tests for the `formcheck` binary.
//!
//! Each test runs the real executable through `assert_cmd`, feeding records
//! on stdin or through temporary files, and checks stdout, stderr and the
//! exit code. Output is passed through `strip_ansi_escapes` before text
//! comparisons so the assertions hold whether or not colour is enabled.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

fn formcheck() -> Command {
    let mut cmd = Command::cargo_bin("formcheck").unwrap();
    cmd.env("RUST_LOG", "debug");
    cmd
}

fn strip_ansi(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(bytes)).to_string()
}

const VALID_REGISTRATION: &str = r#"{
    "email": "jan.kowalski@example.com",
    "first_name": "Jan",
    "last_name": "Kowalski-Nowak",
    "phone": "+48 600 700 800",
    "pesel": "44051401359"
}"#;

#[test]
fn validate_valid_record_prints_success() -> Result<()> {
    let output = formcheck()
        .args(["validate", "--form", "registration"])
        .write_stdin(VALID_REGISTRATION)
        .output()?;

    assert!(output.status.success());
    let stdout = strip_ansi(&output.stdout);
    assert!(stdout.contains("Record is valid for form 'registration'."), "stdout: {stdout}");
    Ok(())
}

#[test]
fn validate_json_stdout_reports_first_failure_per_field() -> Result<()> {
    let output = formcheck()
        .args(["validate", "--form", "registration", "--json-stdout"])
        .write_stdin(r#"{"email": "jan@gmial.com", "first_name": "", "last_name": "K0walski", "phone": "12345", "pesel": "44051401358"}"#)
        .output()?;

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["form"], "registration");
    assert_eq!(report["valid"], false);
    assert_eq!(report["errors"]["first_name"][0], "First name is required");
    assert_eq!(report["errors"]["pesel"][0], "PESEL must be 11 digits with a valid checksum");
    assert_eq!(report["errors"]["pesel"].as_array().map(Vec::len), Some(1));
    assert!(report["errors"].get("email").is_none());
    assert_eq!(report["suggestions"][0]["field"], "email");
    assert_eq!(report["suggestions"][0]["correction"]["suggestedEmail"], "jan@gmail.com");
    assert!(report["run_id"].as_str().is_some());
    Ok(())
}

#[test]
fn validate_fail_on_invalid_sets_exit_code() {
    formcheck()
        .args(["validate", "--form", "login", "--fail-on-invalid"])
        .write_stdin(r#"{"email": "not-an-email", "password": "x"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid email format"));
}

#[test]
fn validate_json_file_export() -> Result<()> {
    let report_file = NamedTempFile::new()?;
    let mut input = NamedTempFile::new()?;
    write!(input, r#"{{"email": "jan@wp.pl", "pesel": "02070803628"}}"#)?;

    formcheck()
        .args(["validate", "--form", "forgot_password", "-i"])
        .arg(input.path())
        .arg("--json-file")
        .arg(report_file.path())
        .assert()
        .success();

    let report: Value = serde_json::from_str(&fs::read_to_string(report_file.path())?)?;
    assert_eq!(report["valid"], true);
    assert_eq!(report["suggestions"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[test]
fn validate_without_form_is_an_error() {
    formcheck()
        .arg("validate")
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No form selected"));
}

#[test]
fn validate_rejects_non_object_json() {
    formcheck()
        .args(["validate", "--form", "login"])
        .write_stdin("[1, 2, 3]")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be a JSON object"));
}

#[test]
fn validate_unknown_form_is_an_error() {
    formcheck()
        .args(["validate", "--form", "no_such_form_anywhere"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Form 'no_such_form_anywhere' not found."));
}

#[test]
fn validate_with_custom_schema() -> Result<()> {
    let mut schema = NamedTempFile::new()?;
    writeln!(
        schema,
        r#"
forms:
  - name: card
    fields:
      - name: card_number
        label: Card number
        rules:
          - kind: required
          - kind: pattern
            pattern: "^LIB-[0-9]{{6}}$"
            message: "{{label}} must look like LIB-000000"
"#
    )?;

    let output = formcheck()
        .args(["validate", "--json-stdout", "--schema"])
        .arg(schema.path())
        .write_stdin(r#"{"card_number": "LIB-12"}"#)
        .output()?;

    assert!(output.status.success(), "stderr: {}", strip_ansi(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["form"], "card");
    assert_eq!(report["errors"]["card_number"][0], "Card number must look like LIB-000000");
    Ok(())
}

#[test]
fn check_national_id() {
    formcheck()
        .args(["check", "national-id", "44051401359"])
        .assert()
        .success()
        .stdout("valid\n");

    formcheck()
        .args(["check", "national-id", "44051401358"])
        .assert()
        .code(1)
        .stdout("invalid\n");
}

#[test]
fn check_postal_code_and_phone() {
    formcheck().args(["check", "postal-code", "00-950"]).assert().success();
    formcheck().args(["check", "postal-code", "00950"]).assert().code(1);
    formcheck().args(["check", "phone", "+48123456789"]).assert().success();
    formcheck().args(["check", "phone", "-48123456789"]).assert().code(1);
}

#[test]
fn suggest_prints_corrected_address() {
    formcheck()
        .args(["suggest", "Jan.Kowalski@GMIAL.COM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Did you mean Jan.Kowalski@gmail.com?"));
}

#[test]
fn suggest_json_null_when_domain_is_fine() -> Result<()> {
    let output = formcheck().args(["suggest", "jan@gmail.com", "--json"]).output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.trim(), "null");
    Ok(())
}

#[test]
fn fix_applies_domain_suggestions() -> Result<()> {
    let output = formcheck()
        .args(["fix", "--form", "registration"])
        .write_stdin(r#"{"email": "anna@gmal.com", "first_name": "Anna"}"#)
        .output()?;

    assert!(output.status.success());
    let record: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(record["email"], "anna@gmail.com");
    assert_eq!(record["first_name"], "Anna");
    assert!(strip_ansi(&output.stderr).contains("Applied 1 suggestion(s)."));
    Ok(())
}

#[test]
fn fix_writes_output_file() -> Result<()> {
    let out = NamedTempFile::new()?;
    formcheck()
        .args(["--quiet", "fix", "--form", "login", "-o"])
        .arg(out.path())
        .write_stdin(r#"{"email": "piotr@hotmial.com", "password": "secret"}"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let record: Value = serde_json::from_str(&fs::read_to_string(out.path())?)?;
    assert_eq!(record["email"], "piotr@hotmail.com");
    Ok(())
}

#[test]
fn fix_diff_shows_changed_line() -> Result<()> {
    let output = formcheck()
        .args(["fix", "--form", "login", "--diff"])
        .write_stdin(r#"{"email": "ola@yahooo.com", "password": "secret"}"#)
        .output()?;

    assert!(output.status.success());
    let stdout = strip_ansi(&output.stdout);
    assert!(stdout.contains(r#"-   "email": "ola@yahooo.com","#), "stdout: {stdout}");
    assert!(stdout.contains(r#"+   "email": "ola@yahoo.com","#), "stdout: {stdout}");
    Ok(())
}

#[test]
fn forms_list_includes_built_ins() -> Result<()> {
    let output = formcheck().args(["forms", "list", "--json"]).output()?;
    assert!(output.status.success());
    let forms: Value = serde_json::from_slice(&output.stdout)?;
    let names: Vec<&str> = forms
        .as_array()
        .map(|a| a.iter().filter_map(|f| f["name"].as_str()).collect())
        .unwrap_or_default();
    for expected in ["registration", "address", "login", "forgot_password", "password_change", "feedback", "book"] {
        assert!(names.contains(&expected), "missing form {expected}");
    }
    Ok(())
}

#[test]
fn forms_show_prints_yaml() {
    formcheck()
        .args(["forms", "show", "book"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: book"))
        .stdout(predicate::str::contains("isbn"));
}

#[test]
fn fix_warns_when_form_has_no_email_fields() {
    formcheck()
        .args(["fix", "--form", "book"])
        .write_stdin(r#"{"title": "Lalka"}"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("no fields that accept domain suggestions"));
}

#[test]
fn unknown_theme_color_is_rejected() -> Result<()> {
    let mut theme = NamedTempFile::new()?;
    writeln!(theme, "error:\n  fg: purpel")?;
    formcheck()
        .args(["check", "postal-code", "00-950", "--theme"])
        .arg(theme.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Theme error"))
        .stderr(predicate::str::contains("purpel"));
    Ok(())
}

#[test]
fn custom_theme_is_used_for_errors() -> Result<()> {
    let mut theme = NamedTempFile::new()?;
    writeln!(theme, "error:\n  fg: magenta")?;
    formcheck()
        .args(["validate", "--theme"])
        .arg(theme.path())
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No form selected"));
    Ok(())
}
