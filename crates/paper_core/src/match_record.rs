//! Judged outcomes and the append-only match log

use serde::{Deserialize, Serialize};

/// Longest rationale stored on a match record, in characters
pub const RATIONALE_LIMIT: usize = 240;

/// Outcome of one comparison, relative to the order the pair was presented in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Winner {
    /// The first-listed paper
    A,
    /// The second-listed paper
    B,
    Tie,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::A => "paperA",
            Winner::B => "paperB",
            Winner::Tie => "tie",
        }
    }

    /// Parse a stored winner leniently (any case, `a`/`b` short forms).
    /// Anything unrecognised is a tie.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "papera" | "a" => Winner::A,
            "paperb" | "b" => Winner::B,
            _ => Winner::Tie,
        }
    }

    /// Parse a judge's answer. Only the exact tokens `paperA`, `paperB`
    /// and `tie` are accepted; everything else is a tie.
    pub fn from_judge_token(raw: &str) -> Self {
        match raw.trim() {
            "paperA" => Winner::A,
            "paperB" => Winner::B,
            _ => Winner::Tie,
        }
    }

    /// Relabel a verdict given with the pair presented in reverse order.
    pub fn swapped(self) -> Self {
        match self {
            Winner::A => Winner::B,
            Winner::B => Winner::A,
            Winner::Tie => Winner::Tie,
        }
    }

    /// Actual score for the first-listed side (1, 0 or 0.5)
    pub fn score_a(self) -> f64 {
        match self {
            Winner::A => 1.0,
            Winner::B => 0.0,
            Winner::Tie => 0.5,
        }
    }
}

impl From<String> for Winner {
    fn from(raw: String) -> Self {
        Winner::parse(&raw)
    }
}

impl From<Winner> for String {
    fn from(winner: Winner) -> Self {
        winner.as_str().to_string()
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of a single resolved comparison. Never modified once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    #[serde(rename = "paper_a", alias = "paperA", default)]
    pub entry_a_id: String,
    #[serde(rename = "paper_b", alias = "paperB", default)]
    pub entry_b_id: String,
    #[serde(default = "default_winner")]
    pub winner: Winner,
    #[serde(rename = "date", default = "crate::utc_now_iso")]
    pub timestamp: String,
    #[serde(rename = "judge_model", alias = "judgeModel", default = "default_judge")]
    pub judge_identifier: String,
    #[serde(
        rename = "swapped_consistent",
        alias = "swappedConsistent",
        default = "default_consistent"
    )]
    pub swap_consistent: bool,
    #[serde(rename = "rationale_short", alias = "rationaleShort", default)]
    pub rationale: String,
}

fn default_winner() -> Winner {
    Winner::Tie
}

fn default_judge() -> String {
    "unknown".to_string()
}

fn default_consistent() -> bool {
    true
}

impl MatchRecord {
    pub fn new(
        entry_a_id: &str,
        entry_b_id: &str,
        winner: Winner,
        judge_identifier: &str,
        swap_consistent: bool,
        rationale: &str,
    ) -> Self {
        Self {
            entry_a_id: entry_a_id.to_string(),
            entry_b_id: entry_b_id.to_string(),
            winner,
            timestamp: crate::utc_now_iso(),
            judge_identifier: judge_identifier.to_string(),
            swap_consistent,
            rationale: truncate_chars(rationale, RATIONALE_LIMIT),
        }
    }
}

/// Truncate to at most `limit` characters without splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
#[path = "match_record_tests.rs"]
mod match_record_tests;
