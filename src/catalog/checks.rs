//! Referential consistency checks.
//!
//! The store does not know that `words.idCategory` points at
//! `categories.id`. These checks run before a word is touched through a
//! category-scoped path, so a caller cannot edit a word through a category
//! that does not own it.

use crate::core::{Category, Word};
use crate::error::{Error, Result};

/// Message used for every category/word mismatch.
pub const INVALID_CATEGORY_ID: &str = "invalid category id";

/// Verifies that `word` exists and is owned by `category`.
///
/// Takes the results of two independent lookups. A missing word is
/// `NotFound`; a missing category or a word owned by a different category is
/// `BadRequest`. Nothing is corrected on failure.
///
/// # Errors
///
/// Returns [`Error::NotFound`] or [`Error::BadRequest`] as described above.
pub fn check_word_ownership(
    category: Option<&Category>,
    word: Option<Word>,
    word_id: &str,
) -> Result<Word> {
    let word = word.ok_or_else(|| Error::word_not_found(word_id))?;

    match category {
        Some(category) if word.belongs_to(&category.id) => Ok(word),
        Some(category) => {
            tracing::debug!(
                word_id,
                claimed = %category.id,
                actual = %word.id_category,
                "category mismatch"
            );
            Err(Error::bad_request(INVALID_CATEGORY_ID))
        }
        None => Err(Error::bad_request(INVALID_CATEGORY_ID)),
    }
}

/// Verifies that a category lookup found something before inserting a word
/// under it.
///
/// # Errors
///
/// Returns [`Error::BadRequest`] if `category` is `None`.
pub fn require_parent(category: Option<Category>) -> Result<Category> {
    category.ok_or_else(|| Error::bad_request(INVALID_CATEGORY_ID))
}
