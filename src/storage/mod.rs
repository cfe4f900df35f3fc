//! Storage layer for wordbank.
//!
//! [`SqliteStorage`] is the engine: schema creation, parameterized statement
//! execution, transactions. [`SqliteCategories`] and [`SqliteWords`] borrow it
//! and implement the repository traits.

pub mod category;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod word;

pub use category::SqliteCategories;
pub use schema::SCHEMA_SQL;
pub use sqlite::SqliteStorage;
pub use traits::{CategoryRepository, StorageStats, WordRepository};
pub use word::SqliteWords;

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".wordbank/wordbank.db";
