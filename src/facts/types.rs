//! Fact data types shared by the provider and the session

use std::fmt;

/// A short fact produced by the provider. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRecord {
    /// One or two sentences
    pub text: String,
    /// Category label, usually one of the configured domains
    pub domain: String,
    /// A single glyph
    pub emoji: String,
    /// Color token for the fact card (e.g. `blue`, `bg-blue-100`)
    pub presentation_hint: String,
}

impl FactRecord {
    pub fn new(
        text: impl Into<String>,
        domain: impl Into<String>,
        emoji: impl Into<String>,
        presentation_hint: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            domain: domain.into(),
            emoji: emoji.into(),
            presentation_hint: presentation_hint.into(),
        }
    }
}

/// One completed "did you know this?" cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub fact_text: String,
    pub domain: String,
    /// Kept so the provider can avoid reusing a glyph
    pub emoji: String,
    pub knew_it_already: bool,
}

impl HistoryEntry {
    pub fn from_answer(fact: &FactRecord, knew_it_already: bool) -> Self {
        Self {
            fact_text: fact.text.clone(),
            domain: fact.domain.clone(),
            emoji: fact.emoji.clone(),
            knew_it_already,
        }
    }
}

/// Requested depth of a fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Complexity {
    #[default]
    Simple,
    Complex,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Complex => "complex",
        }
    }

    /// A child who already knew the last fact gets a deeper one
    pub fn after_answer(knew_it: bool) -> Self {
        if knew_it {
            Complexity::Complex
        } else {
            Complexity::Simple
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the fact should be about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topic {
    /// Provider picks a random domain from its own set
    #[allow(dead_code)] // Part of the provider contract; the session always names a domain
    Any,
    Domain(String),
}

impl Topic {
    pub fn domain(&self) -> Option<&str> {
        match self {
            Topic::Any => None,
            Topic::Domain(d) => Some(d),
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Any => f.write_str("any"),
            Topic::Domain(d) => f.write_str(d),
        }
    }
}

/// A single fetch handed to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRequest {
    pub topic: Topic,
    pub complexity: Complexity,
    /// Everything shown so far this session, oldest first
    pub history: Vec<HistoryEntry>,
}

impl FactRequest {
    pub fn new(topic: Topic, complexity: Complexity, history: Vec<HistoryEntry>) -> Self {
        Self {
            topic,
            complexity,
            history,
        }
    }

    #[cfg(test)]
    pub fn about(domain: impl Into<String>, complexity: Complexity) -> Self {
        Self::new(Topic::Domain(domain.into()), complexity, Vec::new())
    }
}
