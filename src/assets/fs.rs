//! Filesystem-backed asset store.

use crate::assets::{AssetKind, AssetStore};
use crate::error::{AssetError, Error, Result};
use std::path::{Path, PathBuf};

/// Asset store rooted at a directory on local disk.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Creates a store rooted at `root`. Nothing is created until used.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the asset root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding `kind` files of a category.
    ///
    /// # Errors
    ///
    /// Returns a bad request if `category_id` is not a single path segment.
    pub fn category_dir(&self, kind: AssetKind, category_id: &str) -> Result<PathBuf> {
        validate_segment(category_id)?;
        Ok(self.root.join(kind.dir_name()).join(category_id))
    }

    /// Maps a public path (`/img/<id>/<file>`) back to its file on disk.
    ///
    /// # Errors
    ///
    /// Returns a bad request unless the path is exactly a kind directory, a
    /// category id and a file name.
    pub fn resolve(&self, public_path: &str) -> Result<PathBuf> {
        let relative = public_path.strip_prefix('/').unwrap_or(public_path);
        let mut parts = relative.split('/');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(category_id), Some(file), None)
                if AssetKind::ALL.iter().any(|k| k.dir_name() == kind) =>
            {
                validate_segment(category_id)?;
                validate_segment(file)?;
                Ok(self.root.join(kind).join(category_id).join(file))
            }
            _ => Err(Error::bad_request(format!(
                "not an asset path: {public_path:?}"
            ))),
        }
    }
}

/// Rejects path segments that would escape their directory.
fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains(['/', '\\']) {
        return Err(Error::bad_request(format!(
            "invalid asset path segment: {segment:?}"
        )));
    }
    Ok(())
}

/// Generated file name keeping the source extension, if any.
fn generated_name(source: &Path) -> String {
    let stem = uuid::Uuid::new_v4().to_string();
    match source.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{stem}.{ext}"),
        _ => stem,
    }
}

impl AssetStore for FsAssetStore {
    fn create_category_dirs(&self, category_id: &str) -> Result<()> {
        for kind in AssetKind::ALL {
            let dir = self.category_dir(kind, category_id)?;
            std::fs::create_dir_all(&dir).map_err(|e| AssetError::DirectoryFailed {
                path: dir.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        }
        tracing::debug!(category_id, "created asset directories");
        Ok(())
    }

    fn remove_category_dirs(&self, category_id: &str) -> Result<()> {
        for kind in AssetKind::ALL {
            let dir = self.category_dir(kind, category_id)?;
            if !dir.exists() {
                continue;
            }
            std::fs::remove_dir_all(&dir).map_err(|e| AssetError::DirectoryFailed {
                path: dir.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        }
        tracing::debug!(category_id, "removed asset directories");
        Ok(())
    }

    fn store(&self, kind: AssetKind, category_id: &str, source: &Path) -> Result<String> {
        if !source.is_file() {
            return Err(Error::bad_request(format!(
                "{kind} file not found: {}",
                source.display()
            )));
        }

        let dir = self.category_dir(kind, category_id)?;
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| AssetError::DirectoryFailed {
                path: dir.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        }

        let file_name = generated_name(source);
        std::fs::copy(source, dir.join(&file_name)).map_err(|e| AssetError::CopyFailed {
            path: source.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;

        let public = format!("/{}/{category_id}/{file_name}", kind.dir_name());
        tracing::debug!(category_id, path = %public, "stored asset");
        Ok(public)
    }

    fn remove(&self, public_path: &str) -> Result<()> {
        let path = self.resolve(public_path)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %public_path, "removed asset");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssetError::RemoveFailed {
                path: path.to_string_lossy().to_string(),
                reason: e.to_string(),
            }
            .into()),
        }
    }
}
