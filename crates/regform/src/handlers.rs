// File: src/handlers.rs
// Purpose: GET / and POST /submit

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::ErrorList;
use crate::pages;
use crate::request_context::ParsedRequest;
use crate::response::ErrorPage;
use crate::submission::RegistrationSubmission;
use crate::upload;

/// GET / : the registration form
pub async fn show_form(State(state): State<AppState>) -> Html<String> {
    let form = &state.config.form;
    Html(pages::form_page(&form.courses, state.config.upload.max_photo_bytes).into_string())
}

/// POST /submit
///
/// Validates every field first. Only a fully valid submission gets its
/// photo inspected and stored; any failure renders the error page.
pub async fn submit(State(state): State<AppState>, request: ParsedRequest) -> Response {
    match register(&state, request).await {
        Ok(page) => Html(page).into_response(),
        Err(errors) => {
            warn!(errors = errors.len(), "registration rejected");
            ErrorPage::new(errors).into_response()
        }
    }
}

async fn register(state: &AppState, request: ParsedRequest) -> Result<String, ErrorList> {
    let ParsedRequest { form, photo } = request;

    let submission = RegistrationSubmission::from_form(&form)?;

    let stored = upload::process(photo, state.config.upload.max_photo_bytes, &state.store).await?;
    let photo_url = stored.as_ref().map(|p| p.url.as_str());

    info!(photo = photo_url.unwrap_or("none"), "registration accepted");

    Ok(pages::success_page(&submission, photo_url).into_string())
}
