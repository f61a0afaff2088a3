//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::facts::{FactProvider, FactRecord, FactRequest, SafeFactProvider};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of facts as seen by the session: every fetch yields a record
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch(&self, request: &FactRequest) -> FactRecord;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: FactSource + ?Sized> FactSource for Arc<T> {
    async fn fetch(&self, request: &FactRequest) -> FactRecord {
        (**self).fetch(request).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// A provider wrapped in the fallback policy is a valid fact source
#[async_trait]
impl<P: FactProvider> FactSource for SafeFactProvider<P> {
    async fn fetch(&self, request: &FactRequest) -> FactRecord {
        self.fetch_or_fallback(request).await
    }
}
