// File: src/upload/mod.rs
// Purpose: Optional photo intake: size and content checks, then storage

pub mod sniff;
pub mod store;

pub use sniff::ImageKind;
pub use store::{sanitize_base_name, PhotoStore, StoredPhoto};

use tracing::{debug, warn};

use crate::error::{PhotoError, UploadError};

/// A photo as received from the client
///
/// `bytes` holds at most the configured photo limit; `size` is the full
/// length that was received, so an oversize photo is known to be oversize
/// without being buffered.
#[derive(Debug, Clone, Default)]
pub struct PhotoUpload {
    pub file_name: String,
    /// Recorded for logs only, never trusted
    pub declared_content_type: Option<String>,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            declared_content_type: None,
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Browsers send an empty, unnamed part when no file was chosen
    pub fn is_empty_part(&self) -> bool {
        self.file_name.is_empty() && self.size == 0
    }
}

/// What the request carried in its photo slot
#[derive(Debug, Clone, Default)]
pub enum PhotoIntake {
    #[default]
    Absent,
    Received(PhotoUpload),
    /// Reading the part itself failed
    Failed(UploadError),
}

/// Checks size, then content type
pub fn inspect(upload: &PhotoUpload, max_bytes: u64) -> Result<ImageKind, UploadError> {
    if upload.size > max_bytes {
        return Err(UploadError::TooLarge { limit: max_bytes });
    }

    let kind = ImageKind::sniff(&upload.bytes).ok_or(UploadError::DisallowedType)?;

    if let Some(declared) = &upload.declared_content_type {
        if declared != kind.mime_type() {
            debug!(declared = %declared, detected = kind.mime_type(), "declared content type ignored");
        }
    }

    Ok(kind)
}

/// Runs the optional photo through inspection and storage
///
/// Returns `Ok(None)` when no photo was sent. Nothing is written unless
/// every check passes.
pub async fn process(
    intake: PhotoIntake,
    max_bytes: u64,
    store: &PhotoStore,
) -> Result<Option<StoredPhoto>, PhotoError> {
    let upload = match intake {
        PhotoIntake::Absent => return Ok(None),
        PhotoIntake::Failed(err) => {
            warn!(error = %err, "photo part could not be read");
            return Err(err.into());
        }
        PhotoIntake::Received(upload) => upload,
    };

    let kind = inspect(&upload, max_bytes).map_err(|err| {
        warn!(size = upload.size, error = %err, "photo rejected");
        err
    })?;

    let stored = store.store(&upload.file_name, kind, &upload.bytes).await?;
    Ok(Some(stored))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 2 * 1024 * 1024;

    fn jpeg(len: usize) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.resize(len.max(4), 0);
        bytes
    }

    fn count_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[test]
    fn test_inspect_accepts_at_limit() {
        let upload = PhotoUpload::new("me.jpg", jpeg(LIMIT as usize));
        assert_eq!(inspect(&upload, LIMIT), Ok(ImageKind::Jpeg));
    }

    #[test]
    fn test_inspect_rejects_one_byte_over() {
        let upload = PhotoUpload::new("me.jpg", jpeg(LIMIT as usize + 1));
        assert_eq!(inspect(&upload, LIMIT), Err(UploadError::TooLarge { limit: LIMIT }));
    }

    #[test]
    fn test_inspect_uses_received_size_not_buffer() {
        // Oversize uploads are not fully buffered, only counted
        let upload = PhotoUpload {
            file_name: "big.jpg".to_string(),
            declared_content_type: Some("image/jpeg".to_string()),
            size: 3 * 1024 * 1024,
            bytes: Vec::new(),
        };
        assert_eq!(inspect(&upload, LIMIT), Err(UploadError::TooLarge { limit: LIMIT }));
    }

    #[test]
    fn test_inspect_ignores_declared_type_and_name() {
        let mut upload = PhotoUpload::new("totally-a-photo.jpg", b"<?php echo 1; ?>".to_vec());
        upload.declared_content_type = Some("image/jpeg".to_string());
        assert_eq!(inspect(&upload, LIMIT), Err(UploadError::DisallowedType));

        let mut png = PhotoUpload::new("notes.txt", b"\x89PNG\r\n\x1a\n....".to_vec());
        png.declared_content_type = Some("text/plain".to_string());
        assert_eq!(inspect(&png, LIMIT), Ok(ImageKind::Png));
    }

    #[test]
    fn test_empty_part_detection() {
        assert!(PhotoUpload::new("", Vec::new()).is_empty_part());
        assert!(!PhotoUpload::new("empty.jpg", Vec::new()).is_empty_part());
    }

    #[tokio::test]
    async fn test_process_absent_is_not_an_error() {
        let root = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(root.path().join("uploads"), "uploads");

        let result = process(PhotoIntake::Absent, LIMIT, &store).await.unwrap();

        assert!(result.is_none());
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_process_rejections_write_nothing() {
        let root = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(root.path(), "uploads");

        let oversize = PhotoIntake::Received(PhotoUpload::new("big.jpg", jpeg(3 * 1024 * 1024)));
        let err = process(oversize, LIMIT, &store).await.unwrap_err();
        assert_eq!(err.to_string(), "Uploaded image must be <= 2MB.");

        let svg = PhotoIntake::Received(PhotoUpload::new("x.svg", b"<svg/>".to_vec()));
        let err = process(svg, LIMIT, &store).await.unwrap_err();
        assert_eq!(err.to_string(), "Only JPG, PNG or GIF image files allowed.");

        let broken = PhotoIntake::Failed(UploadError::Transport);
        let err = process(broken, LIMIT, &store).await.unwrap_err();
        assert_eq!(err.to_string(), "File upload error.");

        let too_large = PhotoIntake::Failed(UploadError::TooLarge { limit: LIMIT });
        let err = process(too_large.clone(), LIMIT, &store).await.unwrap_err();
        assert_eq!(err.to_string(), "Uploaded image must be <= 2MB.");
        assert!(matches!(
            too_large,
            PhotoIntake::Failed(UploadError::TooLarge { limit: LIMIT })
        ));

        assert_eq!(count_files(root.path()), 0);
    }

    #[tokio::test]
    async fn test_process_stores_accepted_photo() {
        let root = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(root.path().join("uploads"), "uploads");

        let gif = PhotoIntake::Received(PhotoUpload::new("Team Pic.GIF", b"GIF89a\x01\x00".to_vec()));
        let stored = process(gif, LIMIT, &store).await.unwrap().unwrap();

        assert!(stored.url.starts_with("uploads/team_pic_"));
        assert!(stored.url.ends_with(".gif"));
        assert_eq!(count_files(store.dir()), 1);
    }
}
