//! `SQLite` storage engine.
//!
//! Owns the connection, creates the schema, and runs raw parameterized
//! statements on behalf of the repositories. Each call to [`execute`],
//! [`query_one`] or [`query_all`] is its own implicit transaction; use
//! [`transaction`] to group statements.
//!
//! [`execute`]: SqliteStorage::execute
//! [`query_one`]: SqliteStorage::query_one
//! [`query_all`]: SqliteStorage::query_all
//! [`transaction`]: SqliteStorage::transaction

// SQLite counts are i64. They are never negative.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::core::Word;
use crate::error::{Result, StorageError};
use crate::storage::schema::{CHECK_SCHEMA_SQL, SCHEMA_SQL, TABLE_COUNT, WORD_COLUMNS};
use crate::storage::traits::StorageStats;
use crate::storage::word::row_to_word;
use rusqlite::{Connection, OptionalExtension, Params, Row};
use std::path::{Path, PathBuf};

/// SQLite-backed storage handle.
///
/// Repositories borrow it at construction; there is no global instance.
///
/// # Examples
///
/// ```no_run
/// use wordbank::storage::SqliteStorage;
///
/// let storage = SqliteStorage::open("wordbank.db").unwrap();
/// storage.init().unwrap();
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Creates the parent directory if it does not exist. Does not create
    /// the schema; call [`init`](Self::init) for that.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Database(e.to_string()))?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;
        tracing::debug!(path = %path.display(), "opened database");

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Creates both tables if absent. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn init(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .map_err(StorageError::from)?;
        tracing::info!("schema ready");
        Ok(())
    }

    /// Checks whether both tables exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    pub fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count == TABLE_COUNT)
    }

    /// Runs a statement that returns no records.
    ///
    /// Returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        Ok(self
            .conn
            .execute(sql, params)
            .map_err(StorageError::from)?)
    }

    /// Runs a query expected to return at most one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row mapping fails.
    pub fn query_one<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        Ok(self
            .conn
            .query_row(sql, params, map)
            .optional()
            .map_err(StorageError::from)?)
    }

    /// Runs a query returning a sequence of records, in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or any row mapping fails.
    pub fn query_all<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql).map_err(StorageError::from)?;
        let rows = stmt
            .query_map(params, map)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;
        Ok(rows)
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok`. When `f` returns `Err` the transaction
    /// guard is dropped uncommitted and every statement it ran is rolled back.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a transaction error if begin or commit
    /// fails.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let value = f(&tx)?;

        tx.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(value)
    }

    /// Deletes every row in both tables, keeping the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub fn reset(&self) -> Result<()> {
        self.transaction(|conn| {
            conn.execute_batch(
                r"
            DELETE FROM words;
            DELETE FROM categories;
        ",
            )
            .map_err(StorageError::from)?;
            Ok(())
        })?;
        tracing::info!("all categories and words deleted");
        Ok(())
    }

    /// Lists words whose `idCategory` resolves to no category.
    ///
    /// These can only appear through direct manipulation of the database or
    /// a delete that bypassed the category cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn orphaned_words(&self) -> Result<Vec<Word>> {
        let sql = format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE NOT EXISTS \
             (SELECT 1 FROM categories WHERE categories.id = words.idCategory)"
        );
        let orphans = self.query_all(&sql, [], row_to_word)?;
        if !orphans.is_empty() {
            tracing::warn!(count = orphans.len(), "found orphaned words");
        }
        Ok(orphans)
    }

    /// Deletes all orphaned words. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub fn prune_orphaned_words(&self) -> Result<usize> {
        let removed = self.execute(
            "DELETE FROM words WHERE NOT EXISTS \
             (SELECT 1 FROM categories WHERE categories.id = words.idCategory)",
            [],
        )?;
        tracing::info!(removed, "pruned orphaned words");
        Ok(removed)
    }

    /// Gets storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    pub fn stats(&self) -> Result<StorageStats> {
        let count = |sql: &str| -> Result<usize> {
            let n: i64 = self
                .conn
                .query_row(sql, [], |row| row.get(0))
                .map_err(StorageError::from)?;
            Ok(n as usize)
        };

        let category_count = count("SELECT COUNT(*) FROM categories")?;
        let word_count = count("SELECT COUNT(*) FROM words")?;
        let orphaned_word_count = count(
            "SELECT COUNT(*) FROM words WHERE NOT EXISTS \
             (SELECT 1 FROM categories WHERE categories.id = words.idCategory)",
        )?;

        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok().map(|m| m.len()));

        Ok(StorageStats {
            category_count,
            word_count,
            orphaned_word_count,
            db_size,
        })
    }
}
