//! Media Store
//!
//! The catalog never touches image bytes. It only decides when a product's
//! or variant's media folder has to go, and asks a [`MediaStore`] to purge it.
//!
//! Folder layout under the images root:
//!
//! ```text
//! {images_dir}/{product_id}/                        product folder
//! {images_dir}/{product_id}/{variant_id}_gallery    variant gallery
//! {images_dir}/{product_id}/{variant_id}_thumbnail  variant thumbnail
//! ```

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::ImageKind;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match &err {
            MediaError::Remove { path, .. } => {
                AppError::with_message(ErrorCode::MediaCleanupFailed, err.to_string())
                    .with_detail("path", path.display().to_string())
            }
        }
    }
}

/// Storage-side cleanup hooks invoked after catalog commits
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Remove everything stored for a product
    async fn purge_product_folder(&self, product_id: i64) -> Result<(), MediaError>;

    /// Remove one image folder of one variant
    async fn purge_variant_folder(
        &self,
        product_id: i64,
        variant_id: i64,
        kind: ImageKind,
    ) -> Result<(), MediaError>;
}

/// Filesystem media store
#[derive(Clone, Debug)]
pub struct FsMediaStore {
    /// Image root: {work_dir}/images/
    images_dir: PathBuf,
}

impl FsMediaStore {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn product_folder(&self, product_id: i64) -> PathBuf {
        self.images_dir.join(product_id.to_string())
    }

    pub fn variant_folder(&self, product_id: i64, variant_id: i64, kind: ImageKind) -> PathBuf {
        self.product_folder(product_id)
            .join(kind.variant_folder(variant_id))
    }

    /// A folder that is already gone counts as purged
    async fn remove_dir(path: PathBuf) -> Result<(), MediaError> {
        match fs::remove_dir_all(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Media folder removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(MediaError::Remove { path, source }),
        }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn purge_product_folder(&self, product_id: i64) -> Result<(), MediaError> {
        Self::remove_dir(self.product_folder(product_id)).await
    }

    async fn purge_variant_folder(
        &self,
        product_id: i64,
        variant_id: i64,
        kind: ImageKind,
    ) -> Result<(), MediaError> {
        Self::remove_dir(self.variant_folder(product_id, variant_id, kind)).await
    }
}
