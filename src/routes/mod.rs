pub mod chat;
pub mod health;
pub mod transcribe;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::state::AppState;

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_size_bytes();

    Router::new()
        .route("/transcribe", post(transcribe::transcribe_audio))
        .route("/chat", post(chat::chat))
        .merge(health::routes())
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
