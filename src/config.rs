//! Environment-driven configuration
//!
//! Everything is read once at startup. Nothing here is persisted.

use std::path::PathBuf;
use std::time::Duration;

/// Topic menu offered on the start screen
pub const CORE_DOMAINS: &[&str] = &["Space", "Animals", "Machines", "Outdoors"];

/// Extended menu; a strict superset of [`CORE_DOMAINS`] with the same prefix order
pub const EXTENDED_DOMAINS: &[&str] = &[
    "Space",
    "Animals",
    "Machines",
    "Outdoors",
    "Food",
    "Human Body",
    "Sports",
];

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Configuration for the fact provider and the process
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    /// Gateway base URL (e.g., `http://169.254.169.254/gateway/llm`)
    pub gateway: Option<String>,
    pub model: String,
    pub domains: Vec<String>,
    pub request_timeout: Duration,
    pub log_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup so tests don't touch the process env
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty());

        let gateway = lookup("LLM_GATEWAY").filter(|gw| !gw.trim().is_empty());

        let model = lookup("WONDER_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let extended = lookup("WONDER_EXTENDED_DOMAINS").is_some_and(|v| is_truthy(&v));
        let domains = if extended { EXTENDED_DOMAINS } else { CORE_DOMAINS };

        let request_timeout = lookup("WONDER_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(
                Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                Duration::from_secs,
            );

        let log_path = lookup("WONDER_LOG_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(format!("{home}/.wonder-facts/wonder-facts.log"))
            },
            PathBuf::from,
        );

        Self {
            api_key,
            gateway,
            model,
            domains: domains.iter().map(|d| (*d).to_string()).collect(),
            request_timeout,
            log_path,
        }
    }

    /// Whether a provider call has any chance of authenticating
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() || self.gateway.is_some()
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
