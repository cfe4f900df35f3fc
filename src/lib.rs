//! # Wordbank
//!
//! Storage for a vocabulary-learning backend: categories contain words, and
//! each word carries a translation plus the paths of an image and an audio
//! clip.
//!
//! ## Layers
//!
//! - **Storage engine** ([`SqliteStorage`]): schema creation, parameterized
//!   statements, transactions
//! - **Repositories** ([`SqliteCategories`], [`SqliteWords`]): CRUD over the
//!   two tables; deleting a category deletes its words in the same transaction
//! - **Catalog** ([`Catalog`]): input validation, not-found mapping, and the
//!   word ownership check the store itself does not enforce
//! - **Assets** ([`FsAssetStore`]): image and audio files on disk

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod error;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Category, NewWord, Word, WordChanges};

// Re-export storage types
pub use storage::{
    CategoryRepository, DEFAULT_DB_PATH, SqliteCategories, SqliteStorage, SqliteWords,
    StorageStats, WordRepository,
};

// Re-export catalog and asset types
pub use assets::{AssetKind, AssetStore, FsAssetStore};
pub use catalog::{Catalog, WordInput, check_word_ownership};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
