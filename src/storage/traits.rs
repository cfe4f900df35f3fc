//! Repository trait definitions.
//!
//! The catalog layer is written against these traits, so storage backends
//! other than `SQLite` can be dropped in.

use crate::core::{Category, NewWord, Word, WordChanges};
use crate::error::Result;
use serde::Serialize;

/// CRUD over categories.
pub trait CategoryRepository {
    /// Inserts a category and returns its generated identifier.
    ///
    /// Names are not required to be unique.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn create(&self, category_name: &str) -> Result<String>;

    /// Retrieves a category by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get(&self, id: &str) -> Result<Option<Category>>;

    /// Lists all categories in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list(&self) -> Result<Vec<Category>>;

    /// Renames a category.
    ///
    /// Returns `false` without creating anything if the category does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn update(&self, id: &str, category_name: &str) -> Result<bool>;

    /// Deletes a category and, first, every word that references it.
    ///
    /// Both deletes commit together or not at all. Returns whether the
    /// category existed.
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails; nothing is removed then.
    fn delete(&self, id: &str) -> Result<bool>;
}

/// CRUD over words, scoped by owning category.
pub trait WordRepository {
    /// Inserts a word under `id_category` and returns its identifier.
    ///
    /// The insert is unconditional. Callers must have verified that
    /// `id_category` names a live category; [`crate::catalog::Catalog`] does.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn create(&self, id_category: &str, word: &NewWord) -> Result<String>;

    /// Retrieves a word by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get(&self, id: &str) -> Result<Option<Word>>;

    /// Lists the words of a category. Empty when it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_by_category(&self, id_category: &str) -> Result<Vec<Word>>;

    /// Replaces a word's text and asset paths.
    ///
    /// Returns `false` if the word does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn update(&self, id: &str, changes: &WordChanges) -> Result<bool>;

    /// Deletes a single word. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn delete(&self, id: &str) -> Result<bool>;

    /// Deletes every word of a category. Returns how many were removed.
    ///
    /// This is the word half of the category delete cascade, which calls it
    /// inside its transaction. Other callers go through the category delete.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn delete_all_for_category(&self, id_category: &str) -> Result<usize>;
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    /// Number of categories stored.
    pub category_count: usize,
    /// Number of words stored.
    pub word_count: usize,
    /// Words whose category no longer exists.
    pub orphaned_word_count: usize,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
