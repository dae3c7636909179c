//! Product image storage.
//!
//! Images live on the filesystem, keyed by product id: one file named
//! `<id>.jpg` under a fixed directory, regardless of the original
//! upload format. The product row and its image file are deliberately
//! not transactional together; a row can exist without an image.

use std::path::{Path, PathBuf};

use shopkart_core::ProductId;

/// Per-file upload size ceiling (10 MB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Content types accepted for product images.
pub const ALLOWED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Errors from image validation and storage.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The upload's content type is not in the allow-list.
    #[error("invalid image file, only JPEG, PNG, and GIF are allowed")]
    UnsupportedType,

    /// The upload exceeds [`MAX_IMAGE_BYTES`].
    #[error("image file is too large (limit is 10 MB)")]
    TooLarge,

    /// Filesystem failure while writing or removing the file.
    #[error("image storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem store for product images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `dir`. The directory is created lazily
    /// on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory images are stored under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate an upload before anything touches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedType`] for content types
    /// outside the allow-list and [`ImageError::TooLarge`] above the
    /// size ceiling.
    pub fn validate(content_type: Option<&str>, len: usize) -> Result<(), ImageError> {
        let normalized = content_type.unwrap_or_default().to_ascii_lowercase();
        if !ALLOWED_IMAGE_TYPES.contains(&normalized.as_str()) {
            tracing::warn!(content_type = %normalized, "rejected image upload: bad type");
            return Err(ImageError::UnsupportedType);
        }

        if len > MAX_IMAGE_BYTES {
            tracing::warn!(len, "rejected image upload: too large");
            return Err(ImageError::TooLarge);
        }

        Ok(())
    }

    /// The path a product's image is stored at.
    #[must_use]
    pub fn path_for(&self, id: &ProductId) -> PathBuf {
        self.dir.join(format!("{id}.jpg"))
    }

    /// Whether an image exists for the product.
    pub async fn exists(&self, id: &ProductId) -> bool {
        tokio::fs::try_exists(self.path_for(id)).await.unwrap_or(false)
    }

    /// Write the image for a product, creating the directory if
    /// absent. Concurrent writers to the same id are last-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Io`] on filesystem failure.
    pub async fn save(&self, id: &ProductId, bytes: &[u8]) -> Result<PathBuf, ImageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(id);
        tokio::fs::write(&path, bytes).await?;

        tracing::info!(product_id = %id, path = %path.display(), "product image saved");
        Ok(path)
    }

    /// Remove a product's image. Missing files are not an error;
    /// returns whether a file was actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Io`] on filesystem failure other than
    /// the file being absent.
    pub async fn remove(&self, id: &ProductId) -> Result<bool, ImageError> {
        let path = self.path_for(id);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(product_id = %id, path = %path.display(), "product image removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_store(suffix: &str) -> ImageStore {
        let dir = std::env::temp_dir().join(format!(
            "shopkart-images-{}-{suffix}",
            std::process::id()
        ));
        ImageStore::new(dir)
    }

    #[test]
    fn test_validate_accepts_allowed_types() {
        for ty in ALLOWED_IMAGE_TYPES {
            assert!(ImageStore::validate(Some(ty), 1024).is_ok());
        }
    }

    #[test]
    fn test_validate_is_case_insensitive() {
        assert!(ImageStore::validate(Some("IMAGE/JPEG"), 1024).is_ok());
    }

    #[test]
    fn test_validate_rejects_text_plain() {
        assert!(matches!(
            ImageStore::validate(Some("text/plain"), 1024),
            Err(ImageError::UnsupportedType)
        ));
    }

    #[test]
    fn test_validate_rejects_missing_type() {
        assert!(matches!(
            ImageStore::validate(None, 1024),
            Err(ImageError::UnsupportedType)
        ));
    }

    #[test]
    fn test_validate_rejects_oversized() {
        assert!(matches!(
            ImageStore::validate(Some("image/png"), MAX_IMAGE_BYTES + 1),
            Err(ImageError::TooLarge)
        ));
    }

    #[test]
    fn test_validate_accepts_exact_limit() {
        assert!(ImageStore::validate(Some("image/png"), MAX_IMAGE_BYTES).is_ok());
    }

    #[test]
    fn test_path_for_uses_jpg_regardless_of_format() {
        let store = test_store("paths");
        let id = ProductId::parse("P1").unwrap();
        assert!(store.path_for(&id).ends_with("P1.jpg"));
    }

    #[tokio::test]
    async fn test_save_exists_remove_round_trip() {
        let store = test_store("round-trip");
        let id = ProductId::parse("round-trip").unwrap();

        assert!(!store.exists(&id).await);

        let path = store.save(&id, b"fake image bytes").await.unwrap();
        assert!(path.exists());
        assert!(store.exists(&id).await);

        assert!(store.remove(&id).await.unwrap());
        assert!(!store.exists(&id).await);

        tokio::fs::remove_dir_all(store.dir()).await.ok();
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let store = test_store("remove-missing");
        let id = ProductId::parse("never-saved").unwrap();
        assert!(!store.remove(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let store = test_store("overwrite");
        let id = ProductId::parse("twice").unwrap();

        store.save(&id, b"first").await.unwrap();
        let path = store.save(&id, b"second").await.unwrap();

        let content = tokio::fs::read(&path).await.unwrap();
        assert_eq!(content, b"second");

        tokio::fs::remove_dir_all(store.dir()).await.ok();
    }
}
