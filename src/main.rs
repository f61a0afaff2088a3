//! Wonder Facts - bite-sized science facts for young children
//!
//! A terminal app that walks a child through short, generated facts,
//! checks whether each one was already known, and steers the next fact
//! by topic and difficulty.

mod config;
mod facts;
mod runtime;
mod state_machine;
mod tui;

use config::AppConfig;
use facts::{FallbackPolicy, GeminiFactProvider, LoggingProvider, SafeFactProvider};
use state_machine::SessionContext;
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    // The terminal belongs to the UI, so logs go to a file
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wonder_facts=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    if !config.has_credentials() {
        tracing::warn!("No API key configured. Set GEMINI_API_KEY or LLM_GATEWAY; every fact will be the fallback.");
    }

    let facts = Arc::new(SafeFactProvider::new(
        LoggingProvider::new(GeminiFactProvider::new(&config)?),
        FallbackPolicy::default(),
    ));
    tracing::info!(
        model = %facts.model_id(),
        gateway = config.gateway.is_some(),
        domains = ?config.domains,
        timeout_secs = config.request_timeout.as_secs(),
        "Fact provider initialized"
    );

    let context = SessionContext::new(uuid::Uuid::new_v4().to_string(), config.domains.clone());
    tracing::info!(session_id = %context.session_id, "Session started");

    let handle = runtime::spawn_session(context.clone(), facts);
    tui::run(&context, handle).await?;

    Ok(())
}
