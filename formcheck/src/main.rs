// formcheck/src/main.rs
//! formcheck entry point.
//!
//! Loads `.env`, parses the command line, sets up logging and the theme, then
//! hands off to the selected command.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use formcheck::cli::{Cli, Commands};
use formcheck::commands::{check, error_msg, fix, forms, suggest, validate};
use formcheck::logger;
use formcheck::ui::theme::{build_theme_map, ThemeMap, ThemeStyle};

fn dispatch(cli: &Cli, theme_map: &ThemeMap) -> Result<ExitCode> {
    match &cli.command {
        Commands::Validate(cmd) => validate::run_validate(cmd, theme_map, cli.quiet),
        Commands::Check(cmd) => check::run_check(cmd),
        Commands::Suggest(cmd) => suggest::run_suggest(cmd),
        Commands::Fix(cmd) => fix::run_fix(cmd, theme_map, cli.quiet),
        Commands::Forms(cmd) => forms::run_forms(cmd),
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug, cli.disable_debug));

    let theme_map = match build_theme_map(cli.theme.as_ref()).context("Theme error") {
        Ok(map) => map,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            return ExitCode::from(2);
        }
    };

    match dispatch(&cli, &theme_map) {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme_map);
            ExitCode::from(2)
        }
    }
}
