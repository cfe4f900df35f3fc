//! Validating facade over the category and word repositories.
//!
//! The repositories report absence as `None`/`false` and insert whatever they
//! are given. The catalog is the layer that turns absence into
//! [`Error::NotFound`], rejects bad input with [`Error::BadRequest`], checks
//! word ownership before mutation, and keeps the asset store in step with the
//! categories.

pub mod checks;

pub use checks::{INVALID_CATEGORY_ID, check_word_ownership, require_parent};

use crate::assets::{AssetKind, AssetStore};
use crate::core::{Category, NewWord, Word, WordChanges};
use crate::error::{Error, Result};
use crate::storage::{
    CategoryRepository, SqliteCategories, SqliteStorage, SqliteWords, WordRepository,
};
use std::path::{Path, PathBuf};

/// Word fields supplied by a caller.
///
/// All four are required to add a word. For an update, fields left `None`
/// keep their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordInput {
    /// The word itself.
    pub word: Option<String>,
    /// Its translation.
    pub translation: Option<String>,
    /// Local image file to copy into the asset store.
    pub image: Option<PathBuf>,
    /// Local audio file to copy into the asset store.
    pub sound: Option<PathBuf>,
}

/// Category and word operations with validation and consistency checks.
pub struct Catalog<C, W, A> {
    categories: C,
    words: W,
    assets: A,
}

impl<'s, A: AssetStore> Catalog<SqliteCategories<'s>, SqliteWords<'s>, A> {
    /// Builds a catalog over `SQLite` repositories sharing one storage handle.
    #[must_use]
    pub const fn sqlite(storage: &'s SqliteStorage, assets: A) -> Self {
        Self::new(
            SqliteCategories::new(storage),
            SqliteWords::new(storage),
            assets,
        )
    }
}

impl<C, W, A> Catalog<C, W, A>
where
    C: CategoryRepository,
    W: WordRepository,
    A: AssetStore,
{
    /// Creates a catalog from its collaborators.
    pub const fn new(categories: C, words: W, assets: A) -> Self {
        Self {
            categories,
            words,
            assets,
        }
    }

    /// Lists all categories.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn categories(&self) -> Result<Vec<Category>> {
        self.categories.list()
    }

    /// Gets a category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist.
    pub fn category(&self, id: &str) -> Result<Category> {
        self.categories
            .get(id)?
            .ok_or_else(|| Error::category_not_found(id))
    }

    /// Creates a category and its asset directories.
    ///
    /// If the directories cannot be created the category row is removed
    /// again and the asset error returned.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a blank name, or a storage/asset error.
    pub fn create_category(&self, category_name: &str) -> Result<Category> {
        let name = required("categoryName", Some(category_name))?;
        let id = self.categories.create(name)?;

        if let Err(e) = self.assets.create_category_dirs(&id) {
            tracing::warn!(category_id = %id, error = %e, "asset directories failed, undoing create");
            self.categories.delete(&id)?;
            return Err(e);
        }

        Ok(Category::new(id, name))
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a blank name, `NotFound` for an unknown id.
    pub fn rename_category(&self, id: &str, category_name: &str) -> Result<Category> {
        let name = required("categoryName", Some(category_name))?;
        if !self.categories.update(id, name)? {
            return Err(Error::category_not_found(id));
        }
        Ok(Category::new(id, name))
    }

    /// Deletes a category, its words, and its asset directories.
    ///
    /// The database delete runs first so a failure there leaves the files
    /// the words still point at.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage/asset error.
    pub fn delete_category(&self, id: &str) -> Result<Category> {
        let category = self.category(id)?;
        if !self.categories.delete(id)? {
            return Err(Error::category_not_found(id));
        }
        self.assets.remove_category_dirs(id)?;
        Ok(category)
    }

    /// Lists the words of a category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown category.
    pub fn words(&self, category_id: &str) -> Result<Vec<Word>> {
        self.category(category_id)?;
        self.words.list_by_category(category_id)
    }

    /// Gets a word of a category.
    ///
    /// A word owned by a different category is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the word is absent or not in this category.
    pub fn word(&self, category_id: &str, word_id: &str) -> Result<Word> {
        self.words
            .get(word_id)?
            .filter(|w| w.belongs_to(category_id))
            .ok_or_else(|| Error::word_not_found(word_id))
    }

    /// Adds a word to a category, storing its image and audio files.
    ///
    /// Both source files are checked before either is copied. Files stored
    /// for a word that is then not created are removed again.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a missing field or file or an unknown
    /// category, or a storage/asset error.
    pub fn add_word(&self, category_id: &str, input: &WordInput) -> Result<Word> {
        let word = required("word", input.word.as_deref())?;
        let translation = required("translation", input.translation.as_deref())?;
        let image = input
            .image
            .as_deref()
            .ok_or_else(|| Error::bad_request("image is required"))?;
        let sound = input
            .sound
            .as_deref()
            .ok_or_else(|| Error::bad_request("sound is required"))?;
        require_source(AssetKind::Image, image)?;
        require_source(AssetKind::Audio, sound)?;

        let category = require_parent(self.categories.get(category_id)?)?;

        let image_path = self.assets.store(AssetKind::Image, &category.id, image)?;
        let sound_path = match self.assets.store(AssetKind::Audio, &category.id, sound) {
            Ok(path) => path,
            Err(e) => {
                self.discard(&[&image_path]);
                return Err(e);
            }
        };

        let fields = NewWord::new(word, translation, image_path, sound_path);
        let id = match self.words.create(&category.id, &fields) {
            Ok(id) => id,
            Err(e) => {
                self.discard(&[&fields.image, &fields.sound]);
                return Err(e);
            }
        };

        Ok(Word {
            id,
            id_category: category.id,
            word: fields.word,
            translation: fields.translation,
            image: fields.image,
            sound: fields.sound,
        })
    }

    /// Updates a word reached through its category.
    ///
    /// The category and the word are both looked up and must agree before
    /// anything is written. Supplied files are stored; omitted fields keep
    /// their current values. Files replaced by the update are removed once
    /// it is saved.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown word, `BadRequest` for a blank field,
    /// a missing file or a category that does not own the word.
    pub fn update_word(&self, category_id: &str, word_id: &str, input: &WordInput) -> Result<Word> {
        let category = self.categories.get(category_id)?;
        let current = self.words.get(word_id)?;
        let current = check_word_ownership(category.as_ref(), current, word_id)?;

        let mut changes = WordChanges::from(&current);
        if let Some(word) = input.word.as_deref() {
            changes.word = required("word", Some(word))?.to_string();
        }
        if let Some(translation) = input.translation.as_deref() {
            changes.translation = required("translation", Some(translation))?.to_string();
        }
        if let Some(image) = input.image.as_deref() {
            require_source(AssetKind::Image, image)?;
        }
        if let Some(sound) = input.sound.as_deref() {
            require_source(AssetKind::Audio, sound)?;
        }

        let stored = self.store_replacements(&current.id_category, input, &mut changes)?;
        match self.words.update(word_id, &changes) {
            Ok(true) => {}
            Ok(false) => {
                self.discard(&stored);
                return Err(Error::word_not_found(word_id));
            }
            Err(e) => {
                self.discard(&stored);
                return Err(e);
            }
        }

        let superseded: Vec<&str> = [
            (&current.image, &changes.image),
            (&current.sound, &changes.sound),
        ]
        .into_iter()
        .filter(|(old, new)| old != new)
        .map(|(old, _)| old.as_str())
        .collect();
        self.discard(&superseded);

        Ok(Word {
            id: current.id,
            id_category: current.id_category,
            word: changes.word,
            translation: changes.translation,
            image: changes.image,
            sound: changes.sound,
        })
    }

    /// Deletes a word of a category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the word is absent or not in this category.
    pub fn delete_word(&self, category_id: &str, word_id: &str) -> Result<Word> {
        let word = self.word(category_id, word_id)?;
        if !self.words.delete(word_id)? {
            return Err(Error::word_not_found(word_id));
        }
        self.discard(&[&word.image, &word.sound]);
        Ok(word)
    }

    /// Stores the files an update supplies and writes their paths into
    /// `changes`. If one fails, those already stored are removed.
    fn store_replacements(
        &self,
        category_id: &str,
        input: &WordInput,
        changes: &mut WordChanges,
    ) -> Result<Vec<String>> {
        let mut stored = Vec::new();
        let slots = [
            (AssetKind::Image, input.image.as_deref(), &mut changes.image),
            (AssetKind::Audio, input.sound.as_deref(), &mut changes.sound),
        ];
        for (kind, source, slot) in slots {
            let Some(source) = source else { continue };
            match self.assets.store(kind, category_id, source) {
                Ok(path) => {
                    slot.clone_from(&path);
                    stored.push(path);
                }
                Err(e) => {
                    self.discard(&stored);
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    /// Best-effort removal of stored files no row points at any more.
    fn discard<S: AsRef<str>>(&self, public_paths: &[S]) {
        for path in public_paths {
            let path: &str = path.as_ref();
            if let Err(e) = self.assets.remove(path) {
                tracing::warn!(path, error = %e, "could not remove asset");
            }
        }
    }
}

/// Rejects a source file that does not exist, before anything is copied.
fn require_source(kind: AssetKind, source: &Path) -> Result<()> {
    if source.is_file() {
        Ok(())
    } else {
        Err(Error::bad_request(format!(
            "{kind} file not found: {}",
            source.display()
        )))
    }
}

/// Trims a required text field, rejecting it when missing or blank.
fn required<'v>(field: &str, value: Option<&'v str>) -> Result<&'v str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::bad_request(format!("{field} is required"))),
    }
}
