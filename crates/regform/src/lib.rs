// regform - student registration form intake
// Shared client/server validation, optional photo upload and Maud pages on Axum

pub mod app;
pub mod config;
pub mod error;
pub mod form_field;
pub mod handlers;
pub mod layouts;
pub mod pages;
pub mod request_context;
pub mod response;
pub mod submission;
pub mod upload;

// Re-export framework types
pub use app::{router, AppState};
pub use config::Config;
pub use error::{ErrorList, PhotoError, RequestError, StorageError, UploadError};
pub use request_context::{FormData, ParsedRequest};
pub use submission::RegistrationSubmission;
pub use upload::{ImageKind, PhotoIntake, PhotoStore, PhotoUpload, StoredPhoto};
