//! Prompt and response-schema construction for fact requests
//!
//! The novelty block lists every fact and emoji already shown this session so
//! the model can steer clear of them. Nothing here checks the reply for
//! repeats; that is left to the model.

use super::types::{Complexity, HistoryEntry};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Color tokens the model may pick for the fact card
pub const PALETTE: &[&str] = &[
    "blue", "green", "yellow", "purple", "orange", "rose", "indigo", "slate", "emerald",
];

/// System instruction establishing the educator role
pub const SYSTEM_INSTRUCTION: &str = r#"You are a science educator for children aged 3-10.
Your goal is to provide scientifically accurate, interesting facts that fit an early childhood science curriculum.
Use clear, simple, and direct language.
Do NOT use metaphors, personification, or baby talk (e.g., do NOT say "the moon is Earth's best friend" or "clouds are crying").
Instead, state the scientific reality simply (e.g., "The Moon orbits around the Earth" or "Rain falls from clouds when they get heavy").
All facts must be 1-2 sentences long.
Use bright, positive emojis."#;

/// Build the system instruction including the allowed palette
pub fn system_instruction() -> String {
    format!(
        "{SYSTEM_INSTRUCTION}\nFor presentationHint, pick exactly one of these color tokens that matches the domain: {}.",
        PALETTE.join(", ")
    )
}

/// Build the user prompt for one fact about `domain`
pub fn build_prompt(domain: &str, complexity: Complexity, history: &[HistoryEntry]) -> String {
    let mut prompt = match complexity {
        Complexity::Complex => format!(
            "Tell me a specific, scientifically accurate fact about {domain} suitable for an elementary school student.\n\
             It must be exactly one sentence long.\n\
             It should explain a clear concept or function without being overly technical."
        ),
        Complexity::Simple => format!(
            "Tell me a simple, true, scientifically accurate one-sentence fact about {domain}.\n\
             It should be a basic observation or definition suitable for a preschooler."
        ),
    };

    if !history.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(&novelty_block(history));
    }

    prompt
}

fn novelty_block(history: &[HistoryEntry]) -> String {
    let mut block = String::from("These facts were already shown. Do NOT repeat any of them:\n");
    for entry in history {
        let known = if entry.knew_it_already {
            "the child already knew this"
        } else {
            "this was new to the child"
        };
        let _ = writeln!(block, "- [{}] {} ({known})", entry.domain, entry.fact_text);
    }

    let emojis: BTreeSet<&str> = history
        .iter()
        .map(|entry| entry.emoji.as_str())
        .filter(|emoji| !emoji.is_empty())
        .collect();
    if !emojis.is_empty() {
        let _ = write!(
            block,
            "Do NOT use any of these emojis: {}",
            emojis.into_iter().collect::<Vec<_>>().join(" ")
        );
    }

    block
}

/// JSON schema the reply must follow
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "fact": {
                "type": "STRING",
                "description": "The interesting fact text (1-2 sentences, scientifically accurate)."
            },
            "domain": {
                "type": "STRING",
                "description": "The category of the fact."
            },
            "emoji": {
                "type": "STRING",
                "description": "A single emoji representing the topic."
            },
            "presentationHint": {
                "type": "STRING",
                "description": "One color token from the allowed palette."
            }
        },
        "required": ["fact", "domain", "emoji", "presentationHint"]
    })
}
