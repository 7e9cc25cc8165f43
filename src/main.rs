use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use asr_relay::infrastructure::observability::{TracingConfig, init_tracing};
use asr_relay::infrastructure::speech::OpenAiSpeechClient;
use asr_relay::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env()?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        environment,
        &settings.logging,
    ));
    tracing::debug!(speech = ?settings.speech, "Settings loaded");

    let speech_client = Arc::new(
        OpenAiSpeechClient::new(
            settings.speech.api_key.clone(),
            &settings.speech.base_url,
            settings.speech.model.clone(),
        )
        .context("Failed to configure speech client")?,
    );

    let state = AppState::new(speech_client, settings.upload.max_body_bytes);
    let router = create_router(state);

    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
