//! Employee profile image lifecycle.
//!
//! Only the filename is stored on the employee row; the blob lives under
//! `images/` in the configured [`BlobStore`]. Every operation here keeps the
//! two sides consistent:
//!
//! * attach: write blob, persist row; a failed persist deletes the new blob.
//! * replace: write new blob, persist row, then delete the old blob. A failed
//!   persist deletes the new blob and leaves the old one in place.
//! * remove: delete the blob after the row is gone; failures are logged only.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use super::BlobStore;
use crate::db::models::api::error_codes;
use crate::error::{AppError, AppResult};

pub const IMAGE_DIRECTORY: &str = "images";

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "svg"];

/// An uploaded file as received from the form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(original_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes,
        }
    }

    /// Extension of the client-side filename, as given.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
    }

    pub fn validate(&self, max_bytes: usize) -> AppResult<()> {
        if self.bytes.is_empty() {
            return Err(invalid_image("The image must not be empty"));
        }
        if self.bytes.len() > max_bytes {
            return Err(invalid_image(format!(
                "The image may not be greater than {} kilobytes",
                max_bytes / 1024
            )));
        }
        match self.extension() {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => Ok(()),
            _ => Err(invalid_image(format!(
                "The image must be a file of type: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))),
        }
    }
}

fn invalid_image(message: impl Into<String>) -> AppError {
    AppError::invalid_field("image", error_codes::EMPLOYEE_INVALID_IMAGE, message)
}

/// `<unix seconds><8 random digits>.<extension>`: an integer stem that does
/// not collide for uploads within the same second.
pub fn generate_filename(extension: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let random = Uuid::new_v4().as_u128() % 100_000_000;
    format!("{}{:08}.{}", timestamp, random, extension)
}

pub fn image_path(filename: &str) -> String {
    format!("{}/{}", IMAGE_DIRECTORY, filename)
}

#[derive(Clone)]
pub struct ImageStorage {
    store: Arc<dyn BlobStore>,
    max_bytes: usize,
}

impl ImageStorage {
    pub fn new(store: Arc<dyn BlobStore>, max_bytes: usize) -> Self {
        Self { store, max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn validate(&self, upload: &ImageUpload) -> AppResult<()> {
        upload.validate(self.max_bytes)
    }

    /// Writes the upload and returns the generated filename.
    ///
    /// A failed write may leave a partial file behind, so it is deleted before
    /// the error is returned.
    pub async fn store(&self, upload: &ImageUpload) -> AppResult<String> {
        self.validate(upload)?;
        let extension = upload
            .extension()
            .ok_or_else(|| invalid_image("The image must have a file extension"))?;
        let filename = generate_filename(extension);
        if let Err(e) = self.store.put(&image_path(&filename), &upload.bytes).await {
            tracing::warn!(filename = %filename, error = %e, "Image write failed, removing partial file");
            self.discard(&filename).await;
            return Err(e);
        }
        tracing::debug!(filename = %filename, size = upload.bytes.len(), "Stored image");
        Ok(filename)
    }

    pub async fn exists(&self, filename: &str) -> AppResult<bool> {
        self.store.exists(&image_path(filename)).await
    }

    /// Best-effort delete; a failure is logged and swallowed.
    pub async fn discard(&self, filename: &str) {
        match self.store.delete(&image_path(filename)).await {
            Ok(true) => tracing::debug!(filename = %filename, "Deleted image"),
            Ok(false) => tracing::debug!(filename = %filename, "Image already absent"),
            Err(e) => tracing::warn!(filename = %filename, error = %e, "Failed to delete image"),
        }
    }

    /// Stores `upload` (if any) and hands the filename to `persist`.
    ///
    /// If `persist` fails the new blob is deleted before the error is returned.
    pub async fn attach<T, F>(&self, upload: Option<&ImageUpload>, persist: F) -> AppResult<T>
    where
        F: FnOnce(Option<String>) -> AppResult<T>,
    {
        let filename = match upload {
            Some(upload) => Some(self.store(upload).await?),
            None => None,
        };

        match persist(filename.clone()) {
            Ok(value) => Ok(value),
            Err(e) => {
                if let Some(filename) = filename.as_deref() {
                    tracing::warn!(filename = %filename, error = %e, "Persist failed, removing new image");
                    self.discard(filename).await;
                }
                Err(e)
            }
        }
    }

    /// Like [`ImageStorage::attach`], and once `persist` succeeds with a new
    /// image the `previous` blob is deleted.
    pub async fn replace<T, F>(
        &self,
        previous: Option<&str>,
        upload: Option<&ImageUpload>,
        persist: F,
    ) -> AppResult<T>
    where
        F: FnOnce(Option<String>) -> AppResult<T>,
    {
        let replacing = upload.is_some();
        let value = self.attach(upload, persist).await?;

        if replacing {
            if let Some(previous) = previous {
                self.discard(previous).await;
            }
        }
        Ok(value)
    }

    /// Deletes the blob of a removed employee.
    pub async fn remove(&self, filename: Option<&str>) {
        if let Some(filename) = filename {
            self.discard(filename).await;
        }
    }
}
