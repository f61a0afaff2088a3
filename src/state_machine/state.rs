//! Session state types

use crate::facts::{FactRecord, FactRequest, HistoryEntry};
use std::collections::BTreeSet;

/// Which question the fact screen is asking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// "Did you know that?"
    AskedKnowledge,
    /// "What next?"; the fact is already in history
    AskedNextAction,
}

/// Why a fetch was issued; decides how `current_topic` is updated on arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Domain picked from the start menu
    Start,
    /// Random unvisited domain
    NewTopic,
    /// Same topic again
    MoreOnTopic,
}

/// What the presentation layer should be showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Domain menu
    #[default]
    Start,

    /// Request in flight; no actionable controls
    Loading {
        request: FactRequest,
        origin: LoadOrigin,
    },

    /// A fact is on screen
    ShowingFact { fact: FactRecord, stage: Stage },

    /// Terminal
    Exit,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Loading { .. } => "loading",
            Screen::ShowingFact { .. } => "showing_fact",
            Screen::Exit => "exit",
        }
    }
}

/// Everything the session remembers. Lives only as long as the process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub screen: Screen,
    pub current_topic: Option<String>,
    pub last_knew: bool,
    /// Only grows
    pub visited_domains: BTreeSet<String>,
    /// One entry per answered knowledge check, oldest first
    pub history: Vec<HistoryEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn current_fact(&self) -> Option<&FactRecord> {
        match &self.screen {
            Screen::ShowingFact { fact, .. } => Some(fact),
            _ => None,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match &self.screen {
            Screen::ShowingFact { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading { .. })
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        matches!(self.screen, Screen::Exit)
    }

    /// Whether "new topic" would be accepted right now
    pub fn can_choose_new_topic(&self, context: &SessionContext) -> bool {
        self.stage() == Some(Stage::AskedNextAction)
            && !context.unvisited(&self.visited_domains).is_empty()
    }
}

/// Immutable configuration for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: String,
    /// Ordered domain menu
    pub domains: Vec<String>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, domains: Vec<String>) -> Self {
        Self {
            session_id: session_id.into(),
            domains,
        }
    }

    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    /// Configured domains not yet visited, in menu order
    pub fn unvisited(&self, visited: &BTreeSet<String>) -> Vec<&str> {
        self.domains
            .iter()
            .filter(|d| !visited.contains(*d))
            .map(String::as_str)
            .collect()
    }
}
