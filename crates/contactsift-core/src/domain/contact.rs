use serde::{Deserialize, Serialize};

/// Name used when no plausible name line precedes a phone line.
pub const UNKNOWN_NAME: &str = "Unknown";

pub const MAX_NAME_TOKENS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactCandidate {
    pub name: String,
    /// Canonical phone key; empty when nothing parsable was found.
    pub phone: String,
    pub confidence: f64,
    pub raw_phone: String,
    pub raw_text: String,
}

impl ContactCandidate {
    pub fn has_known_name(&self) -> bool {
        self.name != UNKNOWN_NAME
    }
}

/// A name line has one to four whitespace-separated tokens and no digits.
pub fn is_plausible_name(text: &str) -> bool {
    let tokens = text.split_whitespace().count();
    (1..=MAX_NAME_TOKENS).contains(&tokens) && !text.chars().any(char::is_numeric)
}
