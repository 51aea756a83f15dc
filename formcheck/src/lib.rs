// formcheck/src/lib.rs
//! # formcheck CLI Application
//!
//! This crate provides the terminal interface for the formcheck validation
//! core: validating JSON records against forms, checking single values and
//! fixing mistyped email domains.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
