//! `formcheck suggest`: look up a domain correction for one address.

use anyhow::{Context, Result};
use formcheck_core::suggest_correction;
use std::process::ExitCode;

use crate::cli::SuggestCommand;

/// Prints the corrected address, or JSON (`null` when there is no suggestion).
pub fn run_suggest(cmd: &SuggestCommand) -> Result<ExitCode> {
    let correction = suggest_correction(&cmd.email);
    if cmd.json {
        let json = serde_json::to_string_pretty(&correction).context("Failed to serialize suggestion")?;
        println!("{json}");
    } else {
        match correction {
            Some(c) => println!("Did you mean {}?", c.suggested_email),
            None => println!("No suggestion."),
        }
    }
    Ok(ExitCode::SUCCESS)
}
