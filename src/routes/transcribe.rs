use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::{
    audio,
    errors::{AppError, Result},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcription: String,
}

/// Transcribe an uploaded audio file.
///
/// The upload is staged to a per-request temp file, decoded and calibrated,
/// and the staging file is removed before the provider call, so a
/// recognition failure never leaves it behind.
pub async fn transcribe_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::AudioProcessing(e.to_string()))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::AudioProcessing(e.to_string()))?;
            upload = Some(data);
            break;
        }
    }

    let data = upload.ok_or(AppError::MissingFile)?;

    let path = audio::stage_upload(&data)
        .await
        .map_err(|e| AppError::AudioProcessing(e.to_string()))?;
    tracing::info!("Staged {} byte upload to {}", data.len(), path.display());

    let captured = audio::capture(&path).await;
    audio::discard(&path).await;

    let clip = captured.map_err(|e| AppError::AudioProcessing(e.to_string()))?;
    tracing::debug!(
        duration_secs = clip.duration_secs(),
        sample_rate = clip.sample_rate,
        noise_floor = clip.noise_floor,
        "Captured recording"
    );

    let transcription = state
        .speech
        .recognize(&clip, &state.config.google.speech_language)
        .await?;
    tracing::info!("Transcription: {}", transcription);

    Ok(Json(TranscribeResponse { transcription }))
}
