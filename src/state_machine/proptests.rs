//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::event::NextAction;
use super::state::*;
use super::transition::*;
use super::*;
use crate::facts::{Complexity, FactRecord, HistoryEntry, Topic};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Test Helpers
// ============================================================================

const DOMAINS: &[&str] = &["Space", "Animals", "Machines", "Outdoors"];

fn test_context() -> SessionContext {
    SessionContext::new(
        "test-session",
        DOMAINS.iter().map(|d| (*d).to_string()).collect(),
    )
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_fact() -> impl Strategy<Value = FactRecord> {
    (
        "[A-Z][a-z ]{5,40}\\.",
        prop_oneof![
            Just("Space".to_string()),
            Just("Animals".to_string()),
            "[A-Z][a-z]{3,10}",
        ],
        prop_oneof![Just("🚀"), Just("🦁"), Just("🤖"), Just("🌲")],
        prop_oneof![Just("blue"), Just("green"), Just("bg-rose-100")],
    )
        .prop_map(|(text, domain, emoji, hint)| FactRecord::new(text, domain, emoji, hint))
}

fn arb_next_action() -> impl Strategy<Value = NextAction> {
    prop_oneof![
        Just(NextAction::MoreOnTopic),
        Just(NextAction::NewTopic),
        Just(NextAction::Done),
    ]
}

fn arb_domain() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(DOMAINS).prop_map(str::to_string),
        1 => Just("Dinosaurs".to_string()),
    ]
}

/// Mostly user intents, with the occasional stray provider event
fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => arb_domain().prop_map(|domain| Event::SelectStartDomain { domain }),
        4 => any::<bool>().prop_map(|knew_it| Event::AnswerKnowledge { knew_it }),
        4 => arb_next_action().prop_map(|action| Event::ChooseNext { action }),
        1 => arb_fact().prop_map(|fact| Event::FactLoaded { fact }),
    ]
}

/// Fact reply that the runtime would feed back after a `RequestFact`
fn reply_fact(request: &crate::facts::FactRequest, seed: &FactRecord) -> FactRecord {
    let mut fact = seed.clone();
    if let Topic::Domain(domain) = &request.topic {
        fact.domain.clone_from(domain);
    }
    fact
}

/// Drive a session like the runtime does: every `RequestFact` is answered
/// immediately with a `FactLoaded`. Calls `check` after each accepted transition
/// with (old state, event, result).
fn drive(
    events: Vec<Event>,
    facts: &[FactRecord],
    seed: u64,
    mut check: impl FnMut(&SessionState, &Event, &TransitionResult) -> Result<(), TestCaseError>,
) -> Result<SessionState, TestCaseError> {
    let ctx = test_context();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = SessionState::new();
    let mut fact_idx = 0usize;

    for event in events {
        let mut pending = vec![event];
        while let Some(current) = pending.pop() {
            let Ok(result) = transition(&state, &ctx, current.clone(), &mut rng) else {
                continue;
            };
            check(&state, &current, &result)?;
            for effect in &result.effects {
                if let Effect::RequestFact { request } = effect {
                    let seed_fact = &facts[fact_idx % facts.len()];
                    fact_idx += 1;
                    pending.push(Event::FactLoaded {
                        fact: reply_fact(request, seed_fact),
                    });
                }
            }
            state = result.new_state;
        }
    }

    Ok(state)
}

fn valid_state(state: &SessionState, ctx: &SessionContext) -> bool {
    let visited_known = state
        .visited_domains
        .iter()
        .all(|d| ctx.has_domain(d));
    let next_action_implies_recorded = match &state.screen {
        Screen::ShowingFact {
            fact,
            stage: Stage::AskedNextAction,
        } => state.history.last() == Some(&HistoryEntry::from_answer(fact, state.last_knew)),
        _ => true,
    };
    let started_implies_visited = match &state.screen {
        Screen::Start => state.visited_domains.is_empty() && state.history.is_empty(),
        _ => !state.visited_domains.is_empty(),
    };
    visited_known && next_action_implies_recorded && started_implies_visited
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Valid state after any transition
    #[test]
    fn prop_transitions_preserve_validity(
        events in proptest::collection::vec(arb_event(), 0..40),
        facts in proptest::collection::vec(arb_fact(), 1..5),
        seed in any::<u64>()
    ) {
        let ctx = test_context();
        drive(events, &facts, seed, |_, _, result| {
            prop_assert!(valid_state(&result.new_state, &ctx), "Invalid state: {:?}", result.new_state);
            Ok(())
        })?;
    }

    // Invariant 2: Answering appends exactly one matching entry
    #[test]
    fn prop_answer_appends_one_entry(
        events in proptest::collection::vec(arb_event(), 0..40),
        facts in proptest::collection::vec(arb_fact(), 1..5),
        seed in any::<u64>()
    ) {
        drive(events, &facts, seed, |old, event, result| {
            if let Event::AnswerKnowledge { knew_it } = event {
                let Some(shown) = old.current_fact() else {
                    return Err(TestCaseError::fail("answered without a fact on screen"));
                };
                let expected = HistoryEntry::from_answer(shown, *knew_it);
                prop_assert_eq!(result.new_state.history.len(), old.history.len() + 1);
                prop_assert_eq!(result.new_state.history.last(), Some(&expected));
                prop_assert!(result.effects.is_empty(), "Answering must not fetch");
            } else {
                prop_assert_eq!(&result.new_state.history, &old.history);
            }
            Ok(())
        })?;
    }

    // Invariant 3: Visited domains never shrink
    #[test]
    fn prop_visited_monotonic(
        events in proptest::collection::vec(arb_event(), 0..40),
        facts in proptest::collection::vec(arb_fact(), 1..5),
        seed in any::<u64>()
    ) {
        drive(events, &facts, seed, |old, _, result| {
            prop_assert!(old.visited_domains.is_subset(&result.new_state.visited_domains));
            Ok(())
        })?;
    }

    // Invariant 4: New topic only ever picks an unvisited domain
    #[test]
    fn prop_new_topic_is_unvisited(
        events in proptest::collection::vec(arb_event(), 0..40),
        facts in proptest::collection::vec(arb_fact(), 1..5),
        seed in any::<u64>()
    ) {
        drive(events, &facts, seed, |old, event, result| {
            if matches!(event, Event::ChooseNext { action: NextAction::NewTopic }) {
                let Some(Effect::RequestFact { request }) = result.effects.first() else {
                    return Err(TestCaseError::fail("new topic must request a fact"));
                };
                let domain = request.topic.domain().unwrap_or_default();
                prop_assert!(!old.visited_domains.contains(domain), "revisited {}", domain);
                prop_assert!(result.new_state.visited_domains.contains(domain));
                prop_assert_eq!(request.complexity, Complexity::Simple);
            }
            Ok(())
        })?;
    }

    // Invariant 5: More-on-topic escalates only after a "yes"
    #[test]
    fn prop_complexity_follows_last_answer(
        events in proptest::collection::vec(arb_event(), 0..40),
        facts in proptest::collection::vec(arb_fact(), 1..5),
        seed in any::<u64>()
    ) {
        drive(events, &facts, seed, |old, event, result| {
            if matches!(event, Event::ChooseNext { action: NextAction::MoreOnTopic }) {
                let Some(Effect::RequestFact { request }) = result.effects.first() else {
                    return Err(TestCaseError::fail("more must request a fact"));
                };
                let expected = if old.last_knew { Complexity::Complex } else { Complexity::Simple };
                prop_assert_eq!(request.complexity, expected);
                prop_assert_eq!(request.topic.domain(), old.current_topic.as_deref());
            }
            Ok(())
        })?;
    }

    // Invariant 6: Every fetch carries the full history so far
    #[test]
    fn prop_requests_carry_history(
        events in proptest::collection::vec(arb_event(), 0..40),
        facts in proptest::collection::vec(arb_fact(), 1..5),
        seed in any::<u64>()
    ) {
        drive(events, &facts, seed, |old, _, result| {
            for effect in &result.effects {
                if let Effect::RequestFact { request } = effect {
                    prop_assert_eq!(&request.history, &old.history);
                    prop_assert!(result.new_state.is_loading());
                }
            }
            Ok(())
        })?;
    }

    // Invariant 7: Exit absorbs every event
    #[test]
    fn prop_exit_is_terminal(event in arb_event(), seed in any::<u64>()) {
        let state = SessionState { screen: Screen::Exit, ..SessionState::new() };
        let result = transition(&state, &test_context(), event, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(result.unwrap_err(), TransitionError::SessionEnded);
    }

    // Invariant 8: Loading rejects every user intent
    #[test]
    fn prop_loading_rejects_intents(event in arb_event(), seed in any::<u64>()) {
        prop_assume!(event.is_user_intent());
        let state = SessionState {
            screen: Screen::Loading {
                request: crate::facts::FactRequest::about("Space", Complexity::Simple),
                origin: LoadOrigin::Start,
            },
            ..SessionState::new()
        };
        let result = transition(&state, &test_context(), event, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(result.unwrap_err(), TransitionError::FetchInFlight);
    }

    // Invariant 9: Visiting every domain exhausts "new topic"
    #[test]
    fn prop_visiting_all_domains_exhausts_new_topic(seed in any::<u64>()) {
        let ctx = test_context();
        let mut rng = StdRng::seed_from_u64(seed);
        let fact = FactRecord::new("Fact.", "Space", "✨", "blue");
        let mut state = SessionState::new();

        let mut events = vec![Event::SelectStartDomain { domain: "Space".into() }];
        for _ in 1..DOMAINS.len() {
            events.push(Event::FactLoaded { fact: fact.clone() });
            events.push(Event::AnswerKnowledge { knew_it: true });
            events.push(Event::ChooseNext { action: NextAction::NewTopic });
        }
        events.push(Event::FactLoaded { fact });
        events.push(Event::AnswerKnowledge { knew_it: false });

        for event in events {
            state = transition(&state, &ctx, event, &mut rng).unwrap().new_state;
        }

        prop_assert_eq!(state.visited_domains.len(), DOMAINS.len());
        prop_assert!(!state.can_choose_new_topic(&ctx));
        let result = transition(
            &state,
            &ctx,
            Event::ChooseNext { action: NextAction::NewTopic },
            &mut rng,
        );
        prop_assert_eq!(result.unwrap_err(), TransitionError::NoUnvisitedDomains);
    }
}
