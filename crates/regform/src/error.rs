// File: src/error.rs
// Purpose: Error types for request parsing, photo intake and storage
//
// The Display text of each variant is what the user sees on the error page.

use std::fmt;
use std::io;
use thiserror::Error;

/// The request body could not be turned into form fields
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Unsupported form encoding.")]
    UnsupportedEncoding,

    #[error("Could not read the submitted form.")]
    Malformed(String),
}

/// The photo was received but cannot be accepted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("File upload error.")]
    Transport,

    #[error("Uploaded image must be <= {}.", format_limit(.limit))]
    TooLarge { limit: u64 },

    #[error("Only JPG, PNG or GIF image files allowed.")]
    DisallowedType,
}

/// The photo was accepted but could not be written
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to prepare upload directory.")]
    CreateDir(#[source] io::Error),

    #[error("Failed to move uploaded file.")]
    Move(#[source] io::Error),
}

/// Any reason the optional photo step failed
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// "2MB", "512KB" or "1000 bytes"
pub(crate) fn format_limit(bytes: &u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    match *bytes {
        b if b >= MB && b % MB == 0 => format!("{}MB", b / MB),
        b if b >= KB && b % KB == 0 => format!("{}KB", b / KB),
        b => format!("{} bytes", b),
    }
}

/// Ordered list of user-facing error messages
///
/// Every problem with a submission lands here so the user sees all of them
/// in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList {
    messages: Vec<String>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl fmt::Display) {
        self.messages.push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ErrorList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RequestError> for ErrorList {
    fn from(err: RequestError) -> Self {
        let mut list = ErrorList::new();
        list.push(err);
        list
    }
}

impl From<PhotoError> for ErrorList {
    fn from(err: PhotoError) -> Self {
        let mut list = ErrorList::new();
        list.push(err);
        list
    }
}
