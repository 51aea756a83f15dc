//! Module for managing the application's command-line interface (CLI) theme.
//!
//! This module defines the structure for theme configuration, allowing users
//! to customize the colors of validation output. It supports 16-color ANSI
//! named colors for foreground styling and provides functionality to load
//! themes from YAML files and manage default theme settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use comfy_table::Color as TableColor;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Style for prominent headers or section titles.
    Header,
    /// Style for successful operation messages.
    Success,
    /// Style for general informational messages.
    Info,
    /// Style for warning messages.
    Warn,
    /// Style for error messages.
    Error,
    /// Style for field names in reports.
    FieldName,
    /// Style for validation messages in reports.
    ValidationMessage,
    /// Style for suggested corrections.
    Suggestion,
    /// Style for lines added in a diff view.
    DiffAdded,
    /// Style for lines removed in a diff view.
    DiffRemoved,
    /// Style for the header/footer of a diff view.
    DiffHeader,
}

const ALL_ENTRIES: [ThemeEntry; 11] = [
    ThemeEntry::Header,
    ThemeEntry::Success,
    ThemeEntry::Info,
    ThemeEntry::Warn,
    ThemeEntry::Error,
    ThemeEntry::FieldName,
    ThemeEntry::ValidationMessage,
    ThemeEntry::Suggestion,
    ThemeEntry::DiffAdded,
    ThemeEntry::DiffRemoved,
    ThemeEntry::DiffHeader,
];

/// Represents an ANSI color that can be used in the theme.
///
/// Deserialization goes through [`FromStr`], so an unknown colour name in a
/// theme file is a load error rather than a silent fallback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" |
            "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue" |
            "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse()
            .map_err(|e: ParseThemeColorError| format!("'{}': {}", value, e))
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        match color {
            ThemeColor::Named(name) => name,
        }
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor::Named(name.to_string())
    }

    /// Converts the `ThemeColor` into its corresponding `owo_colors::AnsiColors`.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => AnsiColors::Black,
                "red" => AnsiColors::Red,
                "green" => AnsiColors::Green,
                "yellow" => AnsiColors::Yellow,
                "blue" => AnsiColors::Blue,
                "magenta" => AnsiColors::Magenta,
                "cyan" => AnsiColors::Cyan,
                "white" => AnsiColors::White,
                "brightblack" => AnsiColors::BrightBlack,
                "brightred" => AnsiColors::BrightRed,
                "brightgreen" => AnsiColors::BrightGreen,
                "brightyellow" => AnsiColors::BrightYellow,
                "brightblue" => AnsiColors::BrightBlue,
                "brightmagenta" => AnsiColors::BrightMagenta,
                "brightcyan" => AnsiColors::BrightCyan,
                "brightwhite" => AnsiColors::BrightWhite,
                _ => AnsiColors::White,
            },
        }
    }

    /// Converts the `ThemeColor` into the colour type used by `comfy_table` cells.
    pub fn to_table_color(&self) -> TableColor {
        match self {
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => TableColor::Black,
                "red" => TableColor::DarkRed,
                "green" => TableColor::DarkGreen,
                "yellow" => TableColor::DarkYellow,
                "blue" => TableColor::DarkBlue,
                "magenta" => TableColor::DarkMagenta,
                "cyan" => TableColor::DarkCyan,
                "white" => TableColor::Grey,
                "brightblack" => TableColor::DarkGrey,
                "brightred" => TableColor::Red,
                "brightgreen" => TableColor::Green,
                "brightyellow" => TableColor::Yellow,
                "brightblue" => TableColor::Blue,
                "brightmagenta" => TableColor::Magenta,
                "brightcyan" => TableColor::Cyan,
                "brightwhite" => TableColor::White,
                _ => TableColor::Reset,
            },
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    if let Some(path) = theme_path {
        ThemeStyle::load_from_file(path)
    } else {
        Ok(ThemeStyle::default_theme_map())
    }
}

/// Looks up the colour for an entry, falling back to white.
pub fn color_for(theme_map: &ThemeMap, entry: ThemeEntry) -> AnsiColors {
    theme_map
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_ansi_color)
        .unwrap_or(AnsiColors::White)
}

/// Looks up the table cell colour for an entry, if the theme sets one.
pub fn table_color_for(theme_map: &ThemeMap, entry: ThemeEntry) -> Option<TableColor> {
    theme_map
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_table_color)
}

impl ThemeStyle {
    /// Loads a theme configuration from a YAML file on disk and fills gaps from the default theme.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        let mut default_theme = HashMap::new();
        default_theme.insert(ThemeEntry::Header, ThemeStyle { fg: Some(ThemeColor::named("brightwhite")) });
        default_theme.insert(ThemeEntry::Success, ThemeStyle { fg: Some(ThemeColor::named("green")) });
        default_theme.insert(ThemeEntry::Warn, ThemeStyle { fg: Some(ThemeColor::named("yellow")) });
        default_theme.insert(ThemeEntry::Error, ThemeStyle { fg: Some(ThemeColor::named("red")) });
        default_theme.insert(ThemeEntry::FieldName, ThemeStyle { fg: Some(ThemeColor::named("cyan")) });
        default_theme.insert(ThemeEntry::ValidationMessage, ThemeStyle { fg: Some(ThemeColor::named("brightred")) });
        default_theme.insert(ThemeEntry::Suggestion, ThemeStyle { fg: Some(ThemeColor::named("brightgreen")) });
        default_theme.insert(ThemeEntry::DiffAdded, ThemeStyle { fg: Some(ThemeColor::named("green")) });
        default_theme.insert(ThemeEntry::DiffRemoved, ThemeStyle { fg: Some(ThemeColor::named("red")) });
        default_theme.insert(ThemeEntry::DiffHeader, ThemeStyle { fg: Some(ThemeColor::named("yellow")) });

        for entry in ALL_ENTRIES {
            default_theme.entry(entry).or_insert_with(|| ThemeStyle { fg: Some(ThemeColor::named("white")) });
        }
        default_theme
    }
}
