// File: src/response.rs
// Purpose: HTML responses for the two outcomes of a submission

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::{ErrorList, RequestError};
use crate::pages;

/// The error page, sent with 422 so the form can be fixed and resubmitted
#[derive(Debug)]
pub struct ErrorPage {
    errors: ErrorList,
}

impl ErrorPage {
    pub fn new(errors: ErrorList) -> Self {
        Self { errors }
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let body = pages::error_page(&self.errors).into_string();
        (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
    }
}

impl From<ErrorList> for ErrorPage {
    fn from(errors: ErrorList) -> Self {
        Self::new(errors)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        if let RequestError::Malformed(detail) = &self {
            tracing::warn!(detail = %detail, "unreadable registration body");
        }
        ErrorPage::new(self.into()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_page_status() {
        let errors: ErrorList = ["Valid email is required."].into_iter().collect();
        let response = ErrorPage::from(errors).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_request_error_renders_page() {
        let response = RequestError::UnsupportedEncoding.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
