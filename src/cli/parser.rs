//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros. The category and word
//! subcommands mirror the REST routes of the vocabulary backend:
//! `category list|show|add|rename|delete` for `/categories[/{id}]` and
//! `word list|show|add|update|delete` for `/categories/{id}/words[/{wordId}]`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Wordbank: categories of vocabulary words with translations, pictures and
/// recordings.
#[derive(Parser, Debug)]
#[command(name = "wordbank")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file.
    ///
    /// Defaults to `.wordbank/wordbank.db` in the current directory.
    #[arg(short, long, env = "WORDBANK_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Root directory for word images and audio.
    ///
    /// Defaults to `.wordbank/assets` in the current directory.
    #[arg(short, long, env = "WORDBANK_ASSET_DIR")]
    pub asset_dir: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database.
    ///
    /// Creates the database file and tables if they don't exist.
    Init {
        /// Force re-initialization (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Show category and word counts.
    Status,

    /// Delete every category and word, with their files.
    Reset {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Report words whose category no longer exists.
    Check {
        /// Delete the orphaned words.
        #[arg(long)]
        prune: bool,
    },

    /// Category operations.
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Word operations within a category.
    #[command(subcommand)]
    Word(WordCommands),
}

/// Category subcommands.
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories.
    #[command(alias = "ls")]
    List,

    /// Show one category.
    Show {
        /// Category ID.
        id: String,
    },

    /// Create a category.
    Add {
        /// Display name.
        name: String,
    },

    /// Rename a category.
    Rename {
        /// Category ID.
        id: String,

        /// New display name.
        name: String,
    },

    /// Delete a category with all its words and files.
    #[command(alias = "rm")]
    Delete {
        /// Category ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Word subcommands.
#[derive(Subcommand, Debug)]
pub enum WordCommands {
    /// List the words of a category.
    #[command(alias = "ls")]
    List {
        /// Category ID.
        category: String,
    },

    /// Show one word.
    Show {
        /// Category ID.
        category: String,

        /// Word ID.
        word: String,
    },

    /// Add a word to a category. All fields are required.
    Add {
        /// Category ID.
        category: String,

        /// Word fields.
        #[command(flatten)]
        fields: WordFields,
    },

    /// Update a word. Omitted fields keep their current values.
    Update {
        /// Category ID.
        category: String,

        /// Word ID.
        word: String,

        /// Word fields.
        #[command(flatten)]
        fields: WordFields,
    },

    /// Delete a word.
    #[command(alias = "rm")]
    Delete {
        /// Category ID.
        category: String,

        /// Word ID.
        word: String,
    },
}

/// Word fields shared by `word add` and `word update`.
#[derive(Args, Debug, Clone, Default)]
pub struct WordFields {
    /// The word itself.
    #[arg(short = 'w', long = "word", value_name = "TEXT")]
    pub text: Option<String>,

    /// Its translation.
    #[arg(short, long)]
    pub translation: Option<String>,

    /// Image file to copy into the asset store.
    #[arg(short, long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Audio file to copy into the asset store.
    #[arg(short, long, value_name = "FILE")]
    pub sound: Option<PathBuf>,
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }

    /// Returns the asset root, using the default if not specified.
    #[must_use]
    pub fn get_asset_dir(&self) -> PathBuf {
        self.asset_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::assets::DEFAULT_ASSET_DIR))
    }
}
