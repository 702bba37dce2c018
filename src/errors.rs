use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type
///
/// Every variant maps to a well-formed JSON body; no failure path returns a
/// bare HTTP error page.
#[derive(Debug)]
pub enum AppError {
    /// Multipart request had no `file` part.
    MissingFile,
    /// Chat message was empty after trimming.
    EmptyMessage,
    /// Speech provider found no recognizable speech in the audio.
    UnintelligibleAudio,
    /// Speech provider was unreachable or returned a service failure.
    SpeechService(String),
    /// Local audio handling failed (staging I/O, WAV decode, multipart read).
    AudioProcessing(String),
    /// Chat provider call failed (quota, auth, transport).
    ChatProvider(String),
    /// Chat request failed before reaching the provider (malformed JSON).
    ChatProcessing(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingFile => write!(f, "No file uploaded"),
            AppError::EmptyMessage => write!(f, "Empty chat message"),
            AppError::UnintelligibleAudio => write!(f, "Could not understand audio"),
            AppError::SpeechService(msg) => write!(f, "Speech service error: {}", msg),
            AppError::AudioProcessing(msg) => write!(f, "Audio processing error: {}", msg),
            AppError::ChatProvider(msg) => write!(f, "Chat provider error: {}", msg),
            AppError::ChatProcessing(msg) => write!(f, "Chat processing error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The empty-message reply keeps its historical `response` key;
        // existing callers read that field on the 400 path.
        if let AppError::EmptyMessage = self {
            let body = Json(json!({ "response": "I couldn't understand that." }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = match self {
            AppError::MissingFile => {
                (StatusCode::BAD_REQUEST, "No file uploaded".to_string())
            }
            AppError::UnintelligibleAudio => {
                (StatusCode::BAD_REQUEST, "Could not understand audio".to_string())
            }
            AppError::SpeechService(msg) => {
                tracing::error!("Speech recognition service error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Speech recognition service unavailable".to_string(),
                )
            }
            AppError::AudioProcessing(msg) => {
                tracing::error!("Audio processing error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Audio processing error: {}", msg),
                )
            }
            AppError::ChatProvider(msg) => {
                // All provider-side chat failures collapse to the fixed
                // quota message; the real cause only goes to the log.
                tracing::error!("Chat provider error: {}", msg);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "Google Gemini API quota exceeded. Try again later.".to_string(),
                )
            }
            AppError::ChatProcessing(msg) => {
                tracing::error!("Chat processing error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Chat processing error: {}", msg),
                )
            }
            AppError::EmptyMessage => unreachable!("handled above"),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<crate::speech::SpeechError> for AppError {
    fn from(err: crate::speech::SpeechError) -> Self {
        match err {
            crate::speech::SpeechError::Unintelligible => AppError::UnintelligibleAudio,
            crate::speech::SpeechError::Service(msg) => AppError::SpeechService(msg),
        }
    }
}

impl From<crate::chat::ChatError> for AppError {
    fn from(err: crate::chat::ChatError) -> Self {
        match err {
            crate::chat::ChatError::Provider(msg) => AppError::ChatProvider(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_file_maps_to_400_error_body() {
        let response = AppError::MissingFile.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "No file uploaded");
    }

    #[tokio::test]
    async fn empty_message_uses_response_key() {
        let response = AppError::EmptyMessage.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["response"], "I couldn't understand that.");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn chat_provider_failures_collapse_to_quota_429() {
        let response = AppError::ChatProvider("auth failed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Google Gemini API quota exceeded. Try again later."
        );
    }

    #[tokio::test]
    async fn speech_service_error_hides_detail() {
        let response = AppError::SpeechService("dns failure".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Speech recognition service unavailable");
    }

    #[tokio::test]
    async fn audio_processing_error_embeds_message() {
        let response = AppError::AudioProcessing("bad header".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Audio processing error: bad header");
    }
}
