use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    chat::Turn,
    errors::{AppError, Result},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Send a chat message to the generative-text provider.
///
/// Every request opens a fresh session: the history passed to the provider
/// is always empty, so repeated calls are independent.
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::ChatProcessing(e.body_text()))?;

    let message = payload.message.trim().to_string();
    tracing::info!("Received message: {}", message);

    if message.is_empty() {
        return Err(AppError::EmptyMessage);
    }

    let history: Vec<Turn> = Vec::new();
    let response = state.chat.send_message(&history, &message).await?;
    tracing::info!("AI response: {} chars", response.len());

    Ok(Json(ChatResponse { response }))
}
