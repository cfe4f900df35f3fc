//! Error types for wordbank operations.
//!
//! This module provides the error hierarchy using `thiserror` for storage,
//! catalog validation, asset handling, and CLI commands. Lookups that find
//! nothing are not errors at the repository level; they return `None` or
//! `false`, and the catalog layer turns them into [`Error::NotFound`].

use thiserror::Error;

/// Result type alias for wordbank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (statement execution, transactions).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A looked-up record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record ("category" or "word").
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Missing field, referential mismatch, or malformed input.
    #[error("bad request: {message}")]
    BadRequest {
        /// Description of what was wrong with the request.
        message: String,
    },

    /// Asset store errors (image/audio files).
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

impl Error {
    /// Shorthand for a missing category.
    pub fn category_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "category",
            id: id.into(),
        }
    }

    /// Shorthand for a missing word.
    pub fn word_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "word",
            id: id.into(),
        }
    }

    /// Shorthand for a bad request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Stable machine-readable kind, used by JSON error output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Storage(_) => "store_failure",
            Self::NotFound { .. } => "not_found",
            Self::BadRequest { .. } => "bad_request",
            Self::Asset(_) => "asset_failure",
            Self::Command(_) => "command_failure",
        }
    }
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or statement error.
    #[error("database error: {0}")]
    Database(String),

    /// Storage not initialized (init command not run).
    #[error("wordbank not initialized. Run: wordbank init")]
    NotInitialized,

    /// Transaction begin/commit error.
    #[error("transaction error: {0}")]
    Transaction(String),
}

/// Asset store errors for image and audio files.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Failed to create or remove a category directory.
    #[error("failed to manage directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to copy a file into the store.
    #[error("failed to store file: {path}: {reason}")]
    CopyFailed {
        /// Source path of the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to delete a stored file.
    #[error("failed to remove file: {path}: {reason}")]
    RemoveFailed {
        /// Path of the stored file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
