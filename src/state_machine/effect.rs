//! Effects produced by state transitions

use crate::facts::FactRequest;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one fact; the result comes back as `Event::FactLoaded`
    RequestFact { request: FactRequest },

    /// Session reached its terminal state
    Shutdown,
}

impl Effect {
    pub fn request_fact(request: FactRequest) -> Self {
        Effect::RequestFact { request }
    }
}
