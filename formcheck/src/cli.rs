// formcheck/src/cli.rs
//! This file defines the command-line interface (CLI) for the formcheck application,
//! including all available commands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "formcheck",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Validate library portal form records",
    long_about = "formcheck validates the records submitted through the library portal's forms (registration, address, sign-in, password reset, catalog entry). It checks PESEL checksums, postal codes, phone numbers, names, emails and ISBNs, and suggests fixes for mistyped email domains.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Explicitly disable debug logging, even if RUST_LOG is set to DEBUG
    #[arg(long = "disable-debug", global = true, help = "Disable debug logging, overriding RUST_LOG.")]
    pub disable_debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `formcheck` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validates a JSON record against a form.
    #[command(about = "Validates a JSON record (file or stdin) against a form.")]
    Validate(ValidateCommand),

    /// Checks a single value with one validator.
    #[command(about = "Checks a single value with one validator.")]
    Check(CheckCommand),

    /// Suggests a correction for a mistyped email domain.
    #[command(about = "Suggests a correction for a mistyped email domain.")]
    Suggest(SuggestCommand),

    /// Applies every email domain suggestion to a JSON record.
    #[command(about = "Applies every email domain suggestion to a JSON record.")]
    Fix(FixCommand),

    /// Tools for inspecting the available forms.
    #[command(subcommand, about = "Tools for inspecting the available forms.")]
    Forms(FormsCommand),
}

/// Form selection shared by `validate` and `fix`.
#[derive(Parser, Debug, Clone)]
pub struct FormSelection {
    /// Name of a built-in form, a form in the form directories, or a path to a single-form YAML file.
    #[arg(long = "form", short = 'f', value_name = "NAME", help = "Form name or path to a single-form YAML file.")]
    pub form: Option<String>,

    /// Path to a YAML file with a `forms:` list, merged over the built-in forms.
    #[arg(long = "schema", value_name = "FILE", help = "Path to a YAML file of form schemas (merged over the built-ins).")]
    pub schema: Option<PathBuf>,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub selection: FormSelection,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the JSON record from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Print the report as JSON to stdout.
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Print the validation report to stdout as JSON.")]
    pub json_stdout: bool,

    /// Export the report to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the validation report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Exit with a non-zero code if the record is invalid.
    #[arg(long = "fail-on-invalid", help = "Exit with a non-zero code if the record is invalid.")]
    pub fail_on_invalid: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Which validator to run.
    #[arg(value_enum, value_name = "KIND")]
    pub kind: CheckKind,

    /// The value to check.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for the `suggest` command.
#[derive(Parser, Debug)]
pub struct SuggestCommand {
    /// The email address to inspect.
    #[arg(value_name = "EMAIL")]
    pub email: String,

    /// Print the suggestion as JSON (`null` when there is none).
    #[arg(long = "json", help = "Print the suggestion as JSON.")]
    pub json: bool,
}

/// Arguments for the `fix` command.
#[derive(Parser, Debug)]
pub struct FixCommand {
    #[command(flatten)]
    pub selection: FormSelection,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the JSON record from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write the corrected record to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Show a unified diff of the record instead of the corrected JSON.
    #[arg(long, short = 'D', help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,
}

/// Subcommands for the `forms` command.
#[derive(Subcommand, Debug)]
pub enum FormsCommand {
    #[command(about = "Lists built-in forms and forms found in the form directories.")]
    List {
        /// Print the list as JSON.
        #[arg(long = "json", help = "Print the list as JSON.")]
        json: bool,
    },
    #[command(about = "Prints the schema of one form as YAML.")]
    Show {
        /// Form name or path.
        #[arg(value_name = "NAME")]
        name: String,
    },
}

/// The single-field validators available to `check`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CheckKind {
    /// Polish PESEL number with checksum.
    NationalId,
    /// Postal code in the 00-000 form.
    PostalCode,
    /// Polish phone number, optional +48 prefix.
    Phone,
    /// Letters, spaces and hyphens only.
    Name,
    /// Coarse email syntax.
    Email,
    /// ISBN-10 or ISBN-13.
    Isbn,
}
