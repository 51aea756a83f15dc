//! `formcheck check`: run one validator over one value.

use anyhow::Result;
use formcheck_core::{
    is_valid_email, is_valid_isbn, is_valid_name, is_valid_national_id, is_valid_phone,
    is_valid_postal_code,
};
use log::debug;
use std::process::ExitCode;

use crate::cli::{CheckCommand, CheckKind};

fn run_validator(kind: CheckKind, value: &str) -> bool {
    match kind {
        CheckKind::NationalId => is_valid_national_id(value),
        CheckKind::PostalCode => is_valid_postal_code(value),
        CheckKind::Phone => is_valid_phone(value),
        CheckKind::Name => is_valid_name(value),
        CheckKind::Email => is_valid_email(value),
        CheckKind::Isbn => is_valid_isbn(value),
    }
}

/// Prints `valid` or `invalid`; the exit code is 1 for an invalid value.
pub fn run_check(cmd: &CheckCommand) -> Result<ExitCode> {
    let ok = run_validator(cmd.kind, &cmd.value);
    debug!("check {:?}: {}", cmd.kind, ok);
    if ok {
        println!("valid");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("invalid");
        Ok(ExitCode::from(1))
    }
}
