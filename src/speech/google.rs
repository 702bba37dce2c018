use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::audio::AudioClip;
use crate::speech::{SpeechError, SpeechProvider};

const SPEECH_API_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Google Cloud Speech-to-Text client.
#[derive(Clone)]
pub struct GoogleSpeechClient {
    http_client: Client,
    api_key: String,
}

impl GoogleSpeechClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            api_key,
        }
    }
}

#[async_trait]
impl SpeechProvider for GoogleSpeechClient {
    async fn recognize(
        &self,
        clip: &AudioClip,
        language: &str,
    ) -> Result<String, SpeechError> {
        let wav = clip
            .to_wav_bytes()
            .map_err(|e| SpeechError::Service(format!("Failed to encode audio: {}", e)))?;

        let request_body = RecognizeRequest {
            config: RecognitionConfig {
                language_code: language.to_string(),
            },
            audio: RecognitionAudio {
                content: general_purpose::STANDARD.encode(&wav),
            },
        };

        let response = self
            .http_client
            .post(SPEECH_API_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SpeechError::Service(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::Service(format!(
                "Speech API returned status {}: {}",
                status, error_text
            )));
        }

        let recognized: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Service(format!("Failed to parse response: {}", e)))?;

        // An empty result set means the service processed the audio but
        // found no speech in it.
        let transcript: String = recognized
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.trim().is_empty() {
            return Err(SpeechError::Unintelligible);
        }

        Ok(transcript.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
struct RecognitionConfig {
    #[serde(rename = "languageCode")]
    language_code: String,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    transcript: String,
}
