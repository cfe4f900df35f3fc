//! `SQLite` word repository.

use crate::core::{NewWord, Word, WordChanges};
use crate::error::Result;
use crate::storage::schema::WORD_COLUMNS;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::WordRepository;
use rusqlite::{Row, params};

/// Word repository over a borrowed [`SqliteStorage`].
pub struct SqliteWords<'a> {
    storage: &'a SqliteStorage,
}

impl<'a> SqliteWords<'a> {
    /// Creates a repository using the given storage handle.
    #[must_use]
    pub const fn new(storage: &'a SqliteStorage) -> Self {
        Self { storage }
    }
}

/// Maps a row selected with [`WORD_COLUMNS`] to a [`Word`].
pub(crate) fn row_to_word(row: &Row<'_>) -> rusqlite::Result<Word> {
    Ok(Word {
        id: row.get(0)?,
        id_category: row.get(1)?,
        word: row.get(2)?,
        translation: row.get(3)?,
        image: row.get(4)?,
        sound: row.get(5)?,
    })
}

impl WordRepository for SqliteWords<'_> {
    fn create(&self, id_category: &str, word: &NewWord) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();

        self.storage.execute(
            r"
            INSERT INTO words (id, idCategory, word, translation, image, sound)
            VALUES (?, ?, ?, ?, ?, ?)
        ",
            params![
                id,
                id_category,
                word.word,
                word.translation,
                word.image,
                word.sound
            ],
        )?;

        tracing::debug!(word_id = %id, category_id = %id_category, "created word");
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Option<Word>> {
        self.storage.query_one(
            &format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ?"),
            params![id],
            row_to_word,
        )
    }

    fn list_by_category(&self, id_category: &str) -> Result<Vec<Word>> {
        self.storage.query_all(
            &format!("SELECT {WORD_COLUMNS} FROM words WHERE idCategory = ?"),
            params![id_category],
            row_to_word,
        )
    }

    fn update(&self, id: &str, changes: &WordChanges) -> Result<bool> {
        // Single conditional statement: the affected-row count doubles as
        // the existence check.
        let changed = self.storage.execute(
            "UPDATE words SET word = ?, translation = ?, image = ?, sound = ? WHERE id = ?",
            params![
                changes.word,
                changes.translation,
                changes.image,
                changes.sound,
                id
            ],
        )?;

        tracing::debug!(word_id = %id, existed = changed > 0, "updated word");
        Ok(changed > 0)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let removed = self
            .storage
            .execute("DELETE FROM words WHERE id = ?", params![id])?;
        tracing::debug!(word_id = %id, existed = removed > 0, "deleted word");
        Ok(removed > 0)
    }

    fn delete_all_for_category(&self, id_category: &str) -> Result<usize> {
        let removed = self
            .storage
            .execute("DELETE FROM words WHERE idCategory = ?", params![id_category])?;
        tracing::debug!(category_id = %id_category, removed, "deleted category words");
        Ok(removed)
    }
}
