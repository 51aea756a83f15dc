//! Terminal output: colour theme, message helpers, tables and diffs.

pub mod diff_viewer;
pub mod output_format;
pub mod report_table;
pub mod theme;
