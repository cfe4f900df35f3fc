//! Core domain models for wordbank.
//!
//! Categories and the words they own. These are plain data types with no
//! I/O dependencies; persistence lives in [`crate::storage`].

pub mod category;
pub mod word;

pub use category::Category;
pub use word::{NewWord, Word, WordChanges};
