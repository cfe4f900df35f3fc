//! Asset storage for word images and audio clips.
//!
//! The database only keeps path strings. Files live under an asset root,
//! one directory per category and kind:
//!
//! ```text
//! <root>/img/<categoryId>/<generated>.png
//! <root>/audio/<categoryId>/<generated>.mp3
//! ```
//!
//! The stored path is the public one (`/img/<categoryId>/<generated>.png`),
//! independent of where the root is on disk.

pub mod fs;

pub use fs::FsAssetStore;

use crate::error::Result;
use std::fmt;
use std::path::Path;

/// Default asset root relative to the working directory.
pub const DEFAULT_ASSET_DIR: &str = ".wordbank/assets";

/// Kind of asset attached to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Picture shown with the word.
    Image,
    /// Pronunciation recording.
    Audio,
}

impl AssetKind {
    /// Both kinds, in directory creation order.
    pub const ALL: [Self; 2] = [Self::Image, Self::Audio];

    /// Directory name under the asset root, also the public path prefix.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Image => "img",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Storage collaborator for the binary files words point at.
pub trait AssetStore {
    /// Creates the image and audio directories of a category.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_category_dirs(&self, category_id: &str) -> Result<()>;

    /// Removes the image and audio directories of a category with their
    /// contents. Missing directories are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory exists but cannot be removed.
    fn remove_category_dirs(&self, category_id: &str) -> Result<()>;

    /// Copies `source` into the category's directory for `kind` under a
    /// generated name and returns the public path to store on the word.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` does not exist or the copy fails.
    fn store(&self, kind: AssetKind, category_id: &str, source: &Path) -> Result<String>;

    /// Deletes a file previously returned by [`store`](Self::store). A file
    /// that is already gone is not an error.
    ///
    /// # Errors
    ///
    /// Returns a bad request if `public_path` is not an asset path, or an
    /// error if the file exists but cannot be removed.
    fn remove(&self, public_path: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_names() {
        assert_eq!(AssetKind::Image.dir_name(), "img");
        assert_eq!(AssetKind::Audio.to_string(), "audio");
    }
}
