//! Fact provider abstraction
//!
//! Turns a topic/complexity/history request into a [`FactRecord`]. Providers
//! report failures as [`ProviderError`]; the [`SafeFactProvider`] wrapper
//! applies the fallback policy so callers always receive a record.

mod error;
mod fallback;
mod gemini;
mod prompt;
mod types;

pub use error::ProviderError;
pub use fallback::{FallbackPolicy, SafeFactProvider};
pub use gemini::GeminiFactProvider;
pub use types::*;

#[cfg(test)]
pub use error::ProviderErrorKind;
#[cfg(test)]
pub use prompt::PALETTE;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for fact providers
#[async_trait]
pub trait FactProvider: Send + Sync {
    /// Request one fact
    async fn request_fact(&self, request: &FactRequest) -> Result<FactRecord, ProviderError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: FactProvider + ?Sized> FactProvider for Arc<T> {
    async fn request_fact(&self, request: &FactRequest) -> Result<FactRecord, ProviderError> {
        (**self).request_fact(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Logging wrapper for fact providers
pub struct LoggingProvider<P> {
    inner: P,
    model_id: String,
}

impl<P: FactProvider> LoggingProvider<P> {
    pub fn new(inner: P) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl<P: FactProvider> FactProvider for LoggingProvider<P> {
    async fn request_fact(&self, request: &FactRequest) -> Result<FactRecord, ProviderError> {
        let start = std::time::Instant::now();
        let result = self.inner.request_fact(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(fact) => {
                tracing::info!(
                    model = %self.model_id,
                    topic = %request.topic,
                    complexity = %request.complexity,
                    history_len = request.history.len(),
                    duration_ms = %duration.as_millis(),
                    domain = %fact.domain,
                    "Fact request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    topic = %request.topic,
                    complexity = %request.complexity,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    transient = e.kind.is_transient(),
                    error = %e.message,
                    "Fact request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
