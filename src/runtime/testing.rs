//! Mock implementations for testing
//!
//! These mocks enable runtime testing without real I/O.

use super::traits::FactSource;
use crate::facts::{FactProvider, FactRecord, FactRequest, ProviderError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Mock Fact Source
// ============================================================================

/// Mock fact source that returns queued records
pub struct MockFactSource {
    facts: Mutex<VecDeque<FactRecord>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<FactRequest>>,
}

impl MockFactSource {
    pub fn new() -> Self {
        Self {
            facts: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue the next record to return
    pub fn queue_fact(&self, fact: FactRecord) {
        self.facts.lock().unwrap().push_back(fact);
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<FactRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockFactSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Record echoing the requested topic, used when nothing is queued
pub fn echo_fact(request: &FactRequest, n: usize) -> FactRecord {
    let domain = request.topic.domain().unwrap_or("Space");
    FactRecord::new(
        format!("Fact number {n} about {domain}."),
        domain,
        "✨",
        "blue",
    )
}

#[async_trait]
impl FactSource for MockFactSource {
    async fn fetch(&self, request: &FactRequest) -> FactRecord {
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        self.facts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| echo_fact(request, n))
    }
}

// ============================================================================
// Gated Mock Fact Source (for observing the loading screen)
// ============================================================================

/// Mock fact source that holds every fetch until released
pub struct GatedMockFactSource {
    inner: MockFactSource,
    /// Each `notify_one` lets exactly one pending fetch complete
    pub gate: Arc<Notify>,
    /// Notified when a fetch starts (for test synchronization)
    pub fetch_started: Arc<Notify>,
}

impl GatedMockFactSource {
    pub fn new() -> Self {
        Self {
            inner: MockFactSource::new(),
            gate: Arc::new(Notify::new()),
            fetch_started: Arc::new(Notify::new()),
        }
    }

    pub fn recorded_requests(&self) -> Vec<FactRequest> {
        self.inner.recorded_requests()
    }
}

#[async_trait]
impl FactSource for GatedMockFactSource {
    async fn fetch(&self, request: &FactRequest) -> FactRecord {
        self.fetch_started.notify_one();
        self.gate.notified().await;
        self.inner.fetch(request).await
    }
}

// ============================================================================
// Mock Fact Provider (fallible, for exercising the fallback adapter)
// ============================================================================

/// Mock provider that returns queued results
pub struct MockFactProvider {
    results: Mutex<VecDeque<Result<FactRecord, ProviderError>>>,
}

impl MockFactProvider {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
        }
    }

    pub fn queue_result(&self, result: Result<FactRecord, ProviderError>) {
        self.results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl FactProvider for MockFactProvider {
    async fn request_fact(&self, _request: &FactRequest) -> Result<FactRecord, ProviderError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::network("No mock result queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}
