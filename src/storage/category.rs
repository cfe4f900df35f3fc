//! `SQLite` category repository.
//!
//! The store has no foreign keys, so deleting a category must remove its
//! words explicitly and before the category row. Both statements run in one
//! transaction: a failure between them rolls back the word delete instead of
//! leaving a half-deleted category behind.

use crate::core::Category;
use crate::error::{Result, StorageError};
use crate::storage::schema::CATEGORY_COLUMNS;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::{CategoryRepository, WordRepository};
use crate::storage::word::SqliteWords;
use rusqlite::{Row, params};

/// Category repository over a borrowed [`SqliteStorage`].
pub struct SqliteCategories<'a> {
    storage: &'a SqliteStorage,
}

impl<'a> SqliteCategories<'a> {
    /// Creates a repository using the given storage handle.
    #[must_use]
    pub const fn new(storage: &'a SqliteStorage) -> Self {
        Self { storage }
    }
}

fn row_to_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        category_name: row.get(1)?,
    })
}

impl CategoryRepository for SqliteCategories<'_> {
    fn create(&self, category_name: &str) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();

        self.storage.execute(
            "INSERT INTO categories (id, categoryName) VALUES (?, ?)",
            params![id, category_name],
        )?;

        tracing::debug!(category_id = %id, "created category");
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Option<Category>> {
        self.storage.query_one(
            &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?"),
            params![id],
            row_to_category,
        )
    }

    fn list(&self) -> Result<Vec<Category>> {
        self.storage.query_all(
            &format!("SELECT {CATEGORY_COLUMNS} FROM categories"),
            [],
            row_to_category,
        )
    }

    fn update(&self, id: &str, category_name: &str) -> Result<bool> {
        let changed = self.storage.execute(
            "UPDATE categories SET categoryName = ? WHERE id = ?",
            params![category_name, id],
        )?;

        tracing::debug!(category_id = %id, existed = changed > 0, "renamed category");
        Ok(changed > 0)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let (words_removed, existed) = self.storage.transaction(|conn| {
            // Words first; nothing in the schema cascades. The repository
            // shares this connection, so its delete joins the transaction.
            let words_removed = SqliteWords::new(self.storage).delete_all_for_category(id)?;
            let removed = conn
                .execute("DELETE FROM categories WHERE id = ?", params![id])
                .map_err(StorageError::from)?;
            Ok((words_removed, removed > 0))
        })?;

        tracing::debug!(category_id = %id, existed, words_removed, "deleted category");
        Ok(existed)
    }
}
