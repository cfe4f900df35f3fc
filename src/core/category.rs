//! Category records.
//!
//! A category is a named grouping of words and the unit of cascading
//! deletion: removing a category removes every word that references it.

use serde::{Deserialize, Serialize};

/// A category as stored in the `categories` table.
///
/// # Examples
///
/// ```
/// use wordbank::core::Category;
///
/// let category = Category::new("c1", "Fruits");
/// assert_eq!(category.category_name, "Fruits");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier (UUID v4 string, assigned at creation).
    pub id: String,

    /// Display name. Not required to be unique.
    pub category_name: String,
}

impl Category {
    /// Creates a category record from its parts.
    #[must_use]
    pub fn new(id: impl Into<String>, category_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category_name: category_name.into(),
        }
    }
}
