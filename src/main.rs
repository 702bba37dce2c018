mod audio;
mod chat;
mod config;
mod errors;
mod routes;
mod speech;
mod state;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    tracing::info!("Starting voice assistant API server...");

    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: server={}:{} model={}",
        config.server.host,
        config.server.port,
        config.google.gemini_model
    );

    let timeout = Duration::from_secs(config.performance.provider_timeout_seconds);

    let speech = Arc::new(speech::GoogleSpeechClient::new(
        config.google.api_key.clone(),
        timeout,
    ));
    let chat = Arc::new(chat::GeminiClient::new(
        config.google.api_key.clone(),
        config.google.gemini_model.clone(),
        timeout,
    ));

    let state = state::AppState::new(config.clone(), speech, chat);

    let app = routes::create_router(state).layer(
        ServiceBuilder::new()
            // Logging layer
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            // Cross-origin requests are permitted from any origin
            .layer(CorsLayer::permissive()),
    );

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_api=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
