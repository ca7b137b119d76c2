//! Route configuration and setup.

mod health;

use crate::constants::{FORM_PATH, HEALTH_PATH, UPLOAD_PATH};
use crate::handlers::{form, upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use mailpic_core::Config;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route(FORM_PATH, get(form::upload_form))
        .route(UPLOAD_PATH, post(upload::upload_image))
        .route(HEALTH_PATH, get(health::liveness_check))
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
