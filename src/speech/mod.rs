pub mod google;

pub use google::GoogleSpeechClient;

use crate::audio::AudioClip;
use async_trait::async_trait;
use std::fmt;

/// Failure modes of a speech-to-text provider.
#[derive(Debug)]
pub enum SpeechError {
    /// The provider found no recognizable speech in the audio.
    Unintelligible,
    /// The provider was unreachable or returned a service failure.
    Service(String),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Unintelligible => write!(f, "Could not understand audio"),
            SpeechError::Service(msg) => write!(f, "Speech service failure: {}", msg),
        }
    }
}

impl std::error::Error for SpeechError {}

/// External speech-to-text provider.
///
/// Injected into `AppState` as a trait object so tests can substitute stubs.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Recognize speech in a captured recording, in the given language.
    async fn recognize(
        &self,
        clip: &AudioClip,
        language: &str,
    ) -> Result<String, SpeechError>;
}
