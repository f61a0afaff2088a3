//! Runtime for executing a session
//!
//! One controller task owns the only `SessionState`. The presentation layer
//! sends intents in and watches state snapshots come out.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;
pub use traits::*;

use crate::state_machine::{Event, SessionContext, SessionState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Handle to interact with a running session
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<Event>,
    pub state_rx: watch::Receiver<SessionState>,
    pub task: JoinHandle<SessionState>,
}

/// Spawn the controller task for a fresh session
pub fn spawn_session<F: FactSource + 'static>(context: SessionContext, facts: Arc<F>) -> SessionHandle {
    let (event_tx, event_rx) = mpsc::channel(32);
    let (state_tx, state_rx) = watch::channel(SessionState::new());

    let runtime = SessionRuntime::new(context, facts, StdRng::from_entropy(), event_rx, state_tx);

    SessionHandle {
        event_tx,
        state_rx,
        task: tokio::spawn(runtime.run()),
    }
}
