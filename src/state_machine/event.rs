//! Events that can occur in a session

use crate::facts::FactRecord;

/// Choices offered after the knowledge check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    MoreOnTopic,
    NewTopic,
    Done,
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    SelectStartDomain { domain: String },
    AnswerKnowledge { knew_it: bool },
    ChooseNext { action: NextAction },

    // Provider events
    FactLoaded { fact: FactRecord },
}

impl Event {
    /// Whether this came from the person at the keyboard
    pub fn is_user_intent(&self) -> bool {
        !matches!(self, Event::FactLoaded { .. })
    }
}
