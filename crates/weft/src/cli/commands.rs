//! Command definitions.

use super::SearchArgs;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use weft::LogFormat;

/// Search a remote index and page through the results.
#[derive(Parser, Debug)]
#[command(name = "weft")]
#[command(about = "Weft - incrementally loaded search tables")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML client configuration file
    #[arg(short, long, env = "WEFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a search and print the loaded rows
    Search(SearchArgs),

    /// Inspect or reset stored table preferences
    Prefs {
        /// Directory holding preference files (default: the user config directory)
        #[arg(long, global = true)]
        dir: Option<PathBuf>,

        #[command(subcommand)]
        command: PrefsCommands,
    },
}

/// Preference subcommands.
#[derive(Subcommand, Debug)]
pub enum PrefsCommands {
    /// Print the stored preferences of a table page
    Show {
        /// Table page type (e.g. material, order)
        #[arg(long)]
        page_type: String,
    },
    /// Delete the stored preferences of a table page
    Reset {
        /// Table page type (e.g. material, order)
        #[arg(long)]
        page_type: String,
    },
}

/// How rows are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per row: identifier, then the row as compact JSON
    #[default]
    Text,
    /// A single JSON document with totals and rows
    Json,
}

/// Log format as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
