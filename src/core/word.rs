//! Word records and the inputs used to create and change them.

use serde::{Deserialize, Serialize};

/// A vocabulary entry as stored in the `words` table.
///
/// `image` and `sound` are public paths into the asset store
/// (`/img/<categoryId>/<file>`, `/audio/<categoryId>/<file>`); the binary
/// content lives outside the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Unique identifier (UUID v4 string, assigned at creation).
    pub id: String,

    /// Owning category. Not enforced by the store.
    pub id_category: String,

    /// The word itself.
    pub word: String,

    /// Its translation.
    pub translation: String,

    /// Path of the associated image.
    pub image: String,

    /// Path of the associated audio clip.
    pub sound: String,
}

impl Word {
    /// Returns true if the word belongs to the given category.
    #[must_use]
    pub fn belongs_to(&self, category_id: &str) -> bool {
        self.id_category == category_id
    }
}

/// Fields for inserting a word. The owning category is passed separately.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewWord {
    /// The word itself.
    pub word: String,
    /// Its translation.
    pub translation: String,
    /// Stored image path.
    pub image: String,
    /// Stored audio path.
    pub sound: String,
}

impl NewWord {
    /// Creates insert fields.
    #[must_use]
    pub fn new(
        word: impl Into<String>,
        translation: impl Into<String>,
        image: impl Into<String>,
        sound: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            image: image.into(),
            sound: sound.into(),
        }
    }
}

/// Full replacement values for an existing word.
///
/// The owning category cannot be changed through an update.
pub type WordChanges = NewWord;

impl From<&Word> for WordChanges {
    fn from(word: &Word) -> Self {
        Self {
            word: word.word.clone(),
            translation: word.translation.clone(),
            image: word.image.clone(),
            sound: word.sound.clone(),
        }
    }
}
