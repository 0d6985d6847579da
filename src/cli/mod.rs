//! CLI module for meetnotes
//!
//! Contains argument parsing and command implementations.

pub mod args;
pub mod commands;
pub mod completions;
pub mod review;

pub use args::{Cli, Commands, ConfigCommand, PromptArgs};
