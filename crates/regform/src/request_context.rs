// File: src/request_context.rs
// Purpose: Turn a POSTed registration body into form fields plus the optional photo

use axum::{
    async_trait,
    body::Bytes,
    extract::{multipart::Field, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::app::AppState;
use crate::error::{RequestError, UploadError};
use crate::upload::{PhotoIntake, PhotoUpload};

/// Name of the multipart part carrying the photo
pub const PHOTO_FIELD: &str = "photo";

/// Text fields of a submitted form
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Create from form fields with automatic trimming
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        let trimmed_fields = fields
            .into_iter()
            .map(|(k, v)| (k, v.trim().to_string()))
            .collect();

        Self {
            fields: trimmed_fields,
        }
    }

    /// Parse an `application/x-www-form-urlencoded` body
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let form_str = String::from_utf8_lossy(body);
        let fields = form_str
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(k), decode_component(v))
            })
            .collect();
        Self::from_fields(fields)
    }

    /// Insert a field, trimming it; a repeated name replaces the earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: &str) {
        self.fields.insert(key.into(), value.trim().to_string());
    }

    /// Get a form field value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.fields.get(key)
    }

    /// Get a field, treating an empty value as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

}

/// `+` means space in form bodies; anything undecodable is kept as sent
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

/// A registration POST, parsed but not yet validated
#[derive(Debug, Default)]
pub struct ParsedRequest {
    pub form: FormData,
    pub photo: PhotoIntake,
}

#[async_trait]
impl FromRequest<AppState> for ParsedRequest {
    type Rejection = RequestError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| RequestError::Malformed(e.body_text()))?;
            read_multipart(multipart, state.config.upload.max_photo_bytes).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| RequestError::Malformed(e.body_text()))?;
            Ok(ParsedRequest {
                form: FormData::from_urlencoded(&body),
                photo: PhotoIntake::Absent,
            })
        } else {
            debug!(content_type = %content_type, "unsupported form encoding");
            Err(RequestError::UnsupportedEncoding)
        }
    }
}

/// Reads every part; text parts become fields, the photo part is counted
/// and buffered up to `max_photo_bytes`
pub async fn read_multipart(
    mut multipart: Multipart,
    max_photo_bytes: u64,
) -> Result<ParsedRequest, RequestError> {
    let mut parsed = ParsedRequest::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // A broken photo part usually breaks the rest of the stream too
            Err(_) if matches!(parsed.photo, PhotoIntake::Failed(_)) => break,
            // The body limit can trip while the next part is being located;
            // fields read so far are still validated
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!(limit = max_photo_bytes, "request body limit reached before the photo was read");
                parsed.photo = PhotoIntake::Failed(UploadError::TooLarge {
                    limit: max_photo_bytes,
                });
                break;
            }
            Err(e) => return Err(RequestError::Malformed(e.body_text())),
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == PHOTO_FIELD {
            parsed.photo = read_photo(field, max_photo_bytes).await;
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| RequestError::Malformed(e.body_text()))?;
            parsed.form.insert(name, &value);
        }
    }

    Ok(parsed)
}

async fn read_photo(mut field: Field<'_>, max_photo_bytes: u64) -> PhotoIntake {
    let mut upload = PhotoUpload::new(field.file_name().unwrap_or_default(), Vec::new());
    upload.declared_content_type = field.content_type().map(str::to_string);

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                upload.size += chunk.len() as u64;
                if upload.size <= max_photo_bytes {
                    upload.bytes.extend_from_slice(&chunk);
                } else if !upload.bytes.is_empty() {
                    // Over the limit: keep counting, stop buffering
                    upload.bytes = Vec::new();
                }
            }
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!(received = upload.size, "photo exceeded the request body limit");
                return PhotoIntake::Failed(UploadError::TooLarge {
                    limit: max_photo_bytes,
                });
            }
            Err(e) => {
                warn!(error = %e, "photo part could not be read");
                return PhotoIntake::Failed(UploadError::Transport);
            }
        }
    }

    if upload.is_empty_part() {
        PhotoIntake::Absent
    } else {
        debug!(file = %upload.file_name, size = upload.size, "photo received");
        PhotoIntake::Received(upload)
    }
}
