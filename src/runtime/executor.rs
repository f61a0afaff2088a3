//! Session runtime executor

use super::traits::FactSource;
use crate::state_machine::{transition, Effect, Event, SessionContext, SessionState, TransitionError};
use rand::Rng;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Whether the loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Shutdown,
}

/// Session controller that can work with any fact source and random source
pub struct SessionRuntime<F, R>
where
    F: FactSource + 'static,
    R: Rng + Send,
{
    context: SessionContext,
    state: SessionState,
    facts: Arc<F>,
    rng: R,
    event_rx: mpsc::Receiver<Event>,
    state_tx: watch::Sender<SessionState>,
}

impl<F, R> SessionRuntime<F, R>
where
    F: FactSource + 'static,
    R: Rng + Send,
{
    pub fn new(
        context: SessionContext,
        facts: Arc<F>,
        rng: R,
        event_rx: mpsc::Receiver<Event>,
        state_tx: watch::Sender<SessionState>,
    ) -> Self {
        Self {
            context,
            state: SessionState::new(),
            facts,
            rng,
            event_rx,
            state_tx,
        }
    }

    /// Process events until the session ends or every sender is dropped.
    /// Returns the final state.
    pub async fn run(mut self) -> SessionState {
        tracing::info!(
            session_id = %self.context.session_id,
            domains = ?self.context.domains,
            "Starting session runtime"
        );
        self.publish();

        while let Some(event) = self.event_rx.recv().await {
            match self.process_event(event).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Shutdown) => break,
                Err(e) => {
                    // Misuse is the presentation layer's to prevent; never shown
                    tracing::warn!(
                        session_id = %self.context.session_id,
                        screen = self.state.screen.name(),
                        error = %e,
                        "Transition rejected"
                    );
                }
            }
        }

        tracing::info!(
            session_id = %self.context.session_id,
            facts_seen = self.state.history.len(),
            visited = self.state.visited_domains.len(),
            "Session runtime stopped"
        );
        self.state
    }

    async fn process_event(&mut self, event: Event) -> Result<Flow, TransitionError> {
        let mut flow = Flow::Continue;
        // Chained events (fetch results) are processed in a loop - no recursion
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            // Pure state transition
            let result = transition(&self.state, &self.context, current_event, &mut self.rng)?;

            self.state = result.new_state;
            self.publish();

            for effect in result.effects {
                match effect {
                    Effect::RequestFact { request } => {
                        tracing::debug!(
                            session_id = %self.context.session_id,
                            topic = %request.topic,
                            complexity = %request.complexity,
                            history_len = request.history.len(),
                            "Fetching fact"
                        );
                        let fact = self.facts.fetch(&request).await;
                        self.discard_queued_intents();
                        events_to_process.push(Event::FactLoaded { fact });
                    }
                    Effect::Shutdown => flow = Flow::Shutdown,
                }
            }
        }

        Ok(flow)
    }

    /// Nothing is actionable while loading; drop whatever arrived meanwhile
    fn discard_queued_intents(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            tracing::debug!(?event, "Discarding intent received while loading");
        }
    }

    fn publish(&self) {
        // send_replace never fails, even with no receivers left
        self.state_tx.send_replace(self.state.clone());
    }
}
