//! Fallback substitution at the provider boundary
//!
//! A failed request never reaches the session: the policy swaps the error for
//! a fixed, always-valid record and logs what happened.

use super::{FactProvider, FactRecord, FactRequest, ProviderError};

/// Decides what the session sees when a provider call fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPolicy {
    record: FactRecord,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(FactRecord::new(
            "The Earth spins around once every day, which causes day and night.",
            "Space",
            "🌍",
            "indigo",
        ))
    }
}

impl FallbackPolicy {
    pub fn new(record: FactRecord) -> Self {
        Self { record }
    }

    #[cfg(test)]
    pub fn record(&self) -> &FactRecord {
        &self.record
    }

    /// Pass successes through, replace any error with the fallback record
    pub fn resolve(&self, result: Result<FactRecord, ProviderError>) -> FactRecord {
        match result {
            Ok(fact) => fact,
            Err(e) => {
                tracing::warn!(
                    kind = ?e.kind,
                    error = %e.message,
                    fallback_domain = %self.record.domain,
                    "Substituting fallback fact"
                );
                self.record.clone()
            }
        }
    }
}

/// A provider that cannot fail
pub struct SafeFactProvider<P> {
    inner: P,
    policy: FallbackPolicy,
}

impl<P: FactProvider> SafeFactProvider<P> {
    pub fn new(inner: P, policy: FallbackPolicy) -> Self {
        Self { inner, policy }
    }

    pub async fn fetch_or_fallback(&self, request: &FactRequest) -> FactRecord {
        self.policy.resolve(self.inner.request_fact(request).await)
    }

    pub fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}
