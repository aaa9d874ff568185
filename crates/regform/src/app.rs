// File: src/app.rs
// Purpose: Application state and the router

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::handlers;
use crate::upload::PhotoStore;

/// Application state shared across handlers
///
/// Read-only: every request is independent.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<PhotoStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = PhotoStore::from_config(&config.upload);
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}

/// Builds the registration app
///
/// - `GET /` form page
/// - `POST /submit` registration handler
/// - `/static/*` stylesheet, client script and wasm package
/// - `/{upload.public_prefix}/*` stored photos
pub fn router(config: Config) -> Router {
    let state = AppState::new(config);

    let static_dir = state.config.form.static_dir.clone();
    let uploads_path = format!("/{}", state.config.upload.url_prefix());
    let body_limit = state.config.upload.max_request_bytes;

    Router::new()
        .route("/", get(handlers::show_form))
        .route("/submit", post(handlers::submit))
        .nest_service("/static", ServeDir::new(static_dir))
        .nest_service(&uploads_path, ServeDir::new(state.store.dir()))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
