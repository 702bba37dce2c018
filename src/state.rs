use std::sync::Arc;

use crate::{chat::ChatProvider, config::Config, speech::SpeechProvider};

/// Application state shared across all handlers.
///
/// Providers are injected as trait objects so the production Google clients
/// and test stubs plug in the same way.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub speech: Arc<dyn SpeechProvider>,
    pub chat: Arc<dyn ChatProvider>,
}

impl AppState {
    pub fn new(
        config: Config,
        speech: Arc<dyn SpeechProvider>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            config,
            speech,
            chat,
        }
    }
}
