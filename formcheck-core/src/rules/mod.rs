//! Turns declared form schemas into executable rules.
//!
//! `compiler` maps each `RuleSpec` to a [`crate::form::Rule`], compiling
//! regexes and rendering message templates once, and caches the result per
//! schema. `messages` holds the default message templates and the renderer.

pub mod compiler;
pub mod messages;
