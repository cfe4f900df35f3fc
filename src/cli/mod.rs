//! CLI layer for wordbank.
//!
//! Provides the command-line interface using clap, with commands for
//! initializing the database and managing categories and words.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{CategoryCommands, Cli, Commands, WordCommands, WordFields};
