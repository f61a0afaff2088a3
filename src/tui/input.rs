//! Keyboard handling
//!
//! Keys map to session intents as a pure function of the current snapshot,
//! so the mapping is testable without a terminal.

use crate::state_machine::{Event, NextAction, Screen, SessionContext, SessionState, Stage};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do with a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Forward an intent to the session
    Send(Event),
    /// Leave the app
    Quit,
}

/// Map a key press to an action, or `None` when the key means nothing here
pub fn map_key(state: &SessionState, context: &SessionContext, key: KeyEvent) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let is_ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
    if is_ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        return Some(UiAction::Quit);
    }

    match &state.screen {
        Screen::Exit => Some(UiAction::Quit),
        Screen::Loading { .. } => None,
        Screen::Start => start_key(context, key.code),
        Screen::ShowingFact { stage, .. } => match (stage, key.code) {
            (Stage::AskedKnowledge, KeyCode::Char('y')) => {
                Some(UiAction::Send(Event::AnswerKnowledge { knew_it: true }))
            }
            (Stage::AskedKnowledge, KeyCode::Char('n')) => {
                Some(UiAction::Send(Event::AnswerKnowledge { knew_it: false }))
            }
            (Stage::AskedNextAction, KeyCode::Char('m')) => Some(choose(NextAction::MoreOnTopic)),
            (Stage::AskedNextAction, KeyCode::Char('t')) if state.can_choose_new_topic(context) => {
                Some(choose(NextAction::NewTopic))
            }
            (Stage::AskedNextAction, KeyCode::Char('d')) => Some(choose(NextAction::Done)),
            _ => None,
        },
    }
}

fn start_key(context: &SessionContext, code: KeyCode) -> Option<UiAction> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    let index = c.to_digit(10)?.checked_sub(1)?;
    let domain = context.domains.get(usize::try_from(index).ok()?)?;
    Some(UiAction::Send(Event::SelectStartDomain {
        domain: domain.clone(),
    }))
}

fn choose(action: NextAction) -> UiAction {
    UiAction::Send(Event::ChooseNext { action })
}
