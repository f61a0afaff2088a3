//! Pure state transition function
//!
//! Given the same state, event and random source, a transition always
//! produces the same new state and effects, with no I/O.

use super::event::NextAction;
use super::state::{LoadOrigin, Screen, SessionContext, SessionState, Stage};
use super::{Effect, Event};
use crate::facts::{Complexity, FactRecord, FactRequest, HistoryEntry, Topic};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition. None of these are shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Session has ended")]
    SessionEnded,
    #[error("A fact is still loading")]
    FetchInFlight,
    #[error("Start domain can only be chosen from the start screen")]
    NotAtStart,
    #[error("Not waiting for a knowledge answer")]
    NotAwaitingKnowledge,
    #[error("Not waiting for a next action")]
    NotAwaitingNextAction,
    #[error("Every domain has already been visited")]
    NoUnvisitedDomains,
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),
    #[error("No current topic to continue")]
    NoCurrentTopic,
    #[error("Fact arrived while nothing was loading")]
    UnexpectedFact,
}

/// Pure transition function
pub fn transition<R: Rng + ?Sized>(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
    rng: &mut R,
) -> Result<TransitionResult, TransitionError> {
    match (&state.screen, event) {
        // ============================================================
        // Terminal and busy states
        // ============================================================
        (Screen::Exit, _) => Err(TransitionError::SessionEnded),

        (Screen::Loading { .. }, event) if event.is_user_intent() => {
            Err(TransitionError::FetchInFlight)
        }

        // ============================================================
        // Start screen
        // ============================================================
        (Screen::Start, Event::SelectStartDomain { domain }) => {
            if !context.has_domain(&domain) {
                return Err(TransitionError::UnknownDomain(domain));
            }
            let mut next = state.clone();
            next.visited_domains.insert(domain.clone());
            // First fetch of the session: nothing to avoid yet
            let request = FactRequest::new(Topic::Domain(domain), Complexity::Simple, vec![]);
            Ok(start_loading(next, request, LoadOrigin::Start))
        }

        (_, Event::SelectStartDomain { .. }) => Err(TransitionError::NotAtStart),

        // ============================================================
        // Fact arrival
        // ============================================================
        (Screen::Loading { request, origin }, Event::FactLoaded { fact }) => {
            let mut next = state.clone();
            match origin {
                LoadOrigin::Start => {
                    next.current_topic = request.topic.domain().map(str::to_string);
                }
                LoadOrigin::NewTopic => next.current_topic = Some(fact.domain.clone()),
                LoadOrigin::MoreOnTopic => {}
            }
            next.screen = Screen::ShowingFact {
                fact,
                stage: Stage::AskedKnowledge,
            };
            Ok(TransitionResult::new(next))
        }

        (_, Event::FactLoaded { .. }) => Err(TransitionError::UnexpectedFact),

        // ============================================================
        // Knowledge check
        // ============================================================
        (
            Screen::ShowingFact {
                fact,
                stage: Stage::AskedKnowledge,
            },
            Event::AnswerKnowledge { knew_it },
        ) => Ok(TransitionResult::new(answer_knowledge(state, fact, knew_it))),

        (_, Event::AnswerKnowledge { .. }) => Err(TransitionError::NotAwaitingKnowledge),

        // ============================================================
        // Next action
        // ============================================================
        (
            Screen::ShowingFact {
                stage: Stage::AskedNextAction,
                ..
            },
            Event::ChooseNext { action },
        ) => choose_next(state, context, action, rng),

        (_, Event::ChooseNext { .. }) => Err(TransitionError::NotAwaitingNextAction),
    }
}

fn answer_knowledge(state: &SessionState, fact: &FactRecord, knew_it: bool) -> SessionState {
    let mut next = state.clone();
    next.history.push(HistoryEntry::from_answer(fact, knew_it));
    next.last_knew = knew_it;
    next.screen = Screen::ShowingFact {
        fact: fact.clone(),
        stage: Stage::AskedNextAction,
    };
    next
}

fn choose_next<R: Rng + ?Sized>(
    state: &SessionState,
    context: &SessionContext,
    action: NextAction,
    rng: &mut R,
) -> Result<TransitionResult, TransitionError> {
    match action {
        NextAction::Done => {
            let mut next = state.clone();
            next.screen = Screen::Exit;
            Ok(TransitionResult::new(next).with_effect(Effect::Shutdown))
        }

        NextAction::NewTopic => {
            let domain = context
                .unvisited(&state.visited_domains)
                .choose(rng)
                .map(|d| (*d).to_string())
                .ok_or(TransitionError::NoUnvisitedDomains)?;

            let mut next = state.clone();
            next.visited_domains.insert(domain.clone());
            let request = FactRequest::new(
                Topic::Domain(domain),
                Complexity::Simple,
                state.history.clone(),
            );
            Ok(start_loading(next, request, LoadOrigin::NewTopic))
        }

        NextAction::MoreOnTopic => {
            let topic = state
                .current_topic
                .clone()
                .ok_or(TransitionError::NoCurrentTopic)?;

            let request = FactRequest::new(
                Topic::Domain(topic),
                Complexity::after_answer(state.last_knew),
                state.history.clone(),
            );
            Ok(start_loading(state.clone(), request, LoadOrigin::MoreOnTopic))
        }
    }
}

fn start_loading(
    mut next: SessionState,
    request: FactRequest,
    origin: LoadOrigin,
) -> TransitionResult {
    next.screen = Screen::Loading {
        request: request.clone(),
        origin,
    };
    TransitionResult::new(next).with_effect(Effect::request_fact(request))
}
