//! Database schema definitions.
//!
//! Two flat tables with no indexes and no foreign keys. The word-to-category
//! reference is checked by the application, not by `SQLite`. There is no
//! schema versioning: creation is additive and idempotent.

/// SQL schema for database setup.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS categories (
    id TEXT,
    categoryName TEXT
);

CREATE TABLE IF NOT EXISTS words (
    id TEXT,
    idCategory TEXT,
    word TEXT,
    translation TEXT,
    image TEXT,
    sound TEXT
);
";

/// SQL to check if schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name IN ('categories', 'words');
";

/// Number of tables [`SCHEMA_SQL`] creates.
pub const TABLE_COUNT: i64 = 2;

/// Column list for category selects, in [`crate::storage::category`] row order.
pub const CATEGORY_COLUMNS: &str = "id, categoryName";

/// Column list for word selects, in [`crate::storage::word`] row order.
pub const WORD_COLUMNS: &str = "id, idCategory, word, translation, image, sound";
