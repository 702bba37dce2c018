pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use std::fmt;

/// One prior exchange in a conversation. History is always supplied
/// explicitly by the caller; the server holds no conversation state.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// Failure modes of a generative-text provider.
#[derive(Debug)]
pub enum ChatError {
    /// Any provider-side failure: quota, auth, transport.
    Provider(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Provider(msg) => write!(f, "Provider failure: {}", msg),
        }
    }
}

impl std::error::Error for ChatError {}

/// External generative-text provider.
///
/// Each call is an independent session seeded with the supplied history;
/// the `/chat` endpoint always passes an empty one.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn send_message(
        &self,
        history: &[Turn],
        message: &str,
    ) -> Result<String, ChatError>;
}
