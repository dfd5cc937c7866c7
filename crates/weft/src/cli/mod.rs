//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the weft binary.

mod commands;
mod prefs;
mod search;

pub use commands::{Cli, Commands, OutputFormat, PrefsCommands};
pub use prefs::handle_prefs_command;
pub use search::{SearchArgs, handle_search_command};
