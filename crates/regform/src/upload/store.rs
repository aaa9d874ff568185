//! Writing accepted photos into the upload directory

use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use crate::config::UploadConfig;
use crate::error::StorageError;
use crate::upload::sniff::ImageKind;

// Anything outside this set in a base name becomes '_'
static UNSAFE_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_\-]").unwrap());

/// Longest base name kept from the client's filename, in characters
const MAX_BASE_CHARS: usize = 64;

/// Name used when the client's filename has no usable stem
const FALLBACK_BASE: &str = "photo";

/// How many numbered variants are tried when the timestamped name is taken
const MAX_NAME_ATTEMPTS: u32 = 100;

/// A photo written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Where the file was written
    pub path: PathBuf,
    /// Relative reference for `<img src>`
    pub url: String,
}

/// Turns a client-supplied filename into a filesystem-safe base name
///
/// Directory components and the last extension are dropped, the rest is
/// lowercased and every character outside `[a-z0-9_-]` is replaced by `_`.
pub fn sanitize_base_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or("");
    let stem = match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    };

    let lowered: String = stem.to_lowercase().chars().take(MAX_BASE_CHARS).collect();
    let safe = UNSAFE_NAME_CHARS.replace_all(&lowered, "_").into_owned();

    if safe.is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        safe
    }
}

/// `{base}_{timestamp}.{ext}`, or `{base}_{timestamp}_{attempt}.{ext}` for
/// later attempts
pub fn stored_file_name(base: &str, timestamp: i64, kind: ImageKind, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}_{}.{}", base, timestamp, kind.extension())
    } else {
        format!("{}_{}_{}.{}", base, timestamp, attempt, kind.extension())
    }
}

/// The upload directory plus the URL prefix it is served under
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
    url_prefix: String,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.dir.clone(), config.url_prefix())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a name derived from `original_name`, timestamped now
    pub async fn store(
        &self,
        original_name: &str,
        kind: ImageKind,
        bytes: &[u8],
    ) -> Result<StoredPhoto, StorageError> {
        let timestamp = chrono::Utc::now().timestamp();
        self.store_at(original_name, kind, bytes, timestamp).await
    }

    /// Same as [`store`](Self::store) with an explicit timestamp
    ///
    /// An existing file is never overwritten: when the timestamped name is
    /// already taken a numbered variant is tried instead.
    pub async fn store_at(
        &self,
        original_name: &str,
        kind: ImageKind,
        bytes: &[u8],
        timestamp: i64,
    ) -> Result<StoredPhoto, StorageError> {
        self.ensure_dir().await?;

        let base = sanitize_base_name(original_name);

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = stored_file_name(&base, timestamp, kind, attempt);
            let path = self.dir.join(&name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(file = %name, "stored name taken, trying next");
                    continue;
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "failed to create photo file");
                    return Err(StorageError::Move(e));
                }
            };

            if let Err(e) = write_all(&mut file, bytes).await {
                error!(path = %path.display(), error = %e, "failed to write photo file");
                drop(file);
                fs::remove_file(&path).await.ok();
                return Err(StorageError::Move(e));
            }

            info!(file = %name, bytes = bytes.len(), mime = kind.mime_type(), "stored photo");
            return Ok(StoredPhoto {
                url: format!("{}/{}", self.url_prefix, name),
                path,
            });
        }

        error!(base = %base, timestamp, "no free photo name left");
        Err(StorageError::Move(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "every candidate photo name is taken",
        )))
    }

    /// Creates the upload directory if it is missing
    async fn ensure_dir(&self) -> Result<(), StorageError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o755);

        builder.create(&self.dir).await.map_err(|e| {
            error!(dir = %self.dir.display(), error = %e, "failed to create upload directory");
            StorageError::CreateDir(e)
        })
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await
}
