// formcheck/src/logger.rs
//! Logger initialization for the formcheck CLI.
//!
//! Logs go to stderr so they never mix with JSON or corrected records on
//! stdout. `RUST_LOG` is honored unless a level override is given.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger. Safe to call more than once; later calls are ignored.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(Target::Stderr);
    let _ = builder.try_init();
}

/// Maps the CLI logging flags to a level override.
///
/// `quiet` wins over everything, `disable_debug` wins over `debug`, and with
/// no flags the environment decides.
pub fn level_from_flags(quiet: bool, debug: bool, disable_debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if disable_debug {
        Some(LevelFilter::Info)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
