//! Outcome tallies, recent-match summaries and the leaderboard

use paper_core::{Entry, MatchRecord, Origin, Winner};
use serde::{Deserialize, Serialize};

use crate::round::RoundStats;

/// How many recent matches a summary keeps by default
pub const RECENT_MATCHES: usize = 20;

/// Win/loss/tie counts with the ai paper as side A
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeCounts {
    pub ai_wins: usize,
    pub human_wins: usize,
    pub ties: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, winner: Winner) {
        match winner {
            Winner::A => self.ai_wins += 1,
            Winner::B => self.human_wins += 1,
            Winner::Tie => self.ties += 1,
        }
    }

    pub fn from_matches(matches: &[MatchRecord]) -> Self {
        let mut counts = Self::default();
        for record in matches {
            counts.record(record.winner);
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.ai_wins + self.human_wins + self.ties
    }
}

/// Aggregate view of the full match history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total_matches: usize,
    pub ai_vs_human: OutcomeCounts,
    /// Newest first
    pub recent_matches: Vec<MatchRecord>,
}

impl HistorySummary {
    /// Summarize `matches`, keeping the last `recent_limit` newest first.
    pub fn from_matches(matches: &[MatchRecord], recent_limit: usize) -> Self {
        let recent_matches = matches.iter().rev().take(recent_limit).cloned().collect();
        Self {
            total_matches: matches.len(),
            ai_vs_human: OutcomeCounts::from_matches(matches),
            recent_matches,
        }
    }

    /// Share of swap-checked matches among the recent ones
    pub fn recent_consistency(&self) -> f64 {
        if self.recent_matches.is_empty() {
            return 0.0;
        }
        let consistent = self.recent_matches.iter().filter(|m| m.swap_consistent).count();
        consistent as f64 / self.recent_matches.len() as f64
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Match History: {} matches ===\n\n", self.total_matches));
        report.push_str(&format!(
            "AI wins: {}, Human wins: {}, Ties: {}\n\n",
            self.ai_vs_human.ai_wins, self.ai_vs_human.human_wins, self.ai_vs_human.ties
        ));

        report.push_str("Recent:\n");
        report.push_str(&format!(
            "{:<26} {:<20} vs {:<20} {:>7} {:>5}\n",
            "Date", "AI paper", "Human paper", "Winner", "Swap"
        ));
        report.push_str(&"-".repeat(84));
        report.push('\n');

        for record in &self.recent_matches {
            report.push_str(&format!(
                "{:<26} {:<20} vs {:<20} {:>7} {:>5}\n",
                record.timestamp,
                record.entry_a_id,
                record.entry_b_id,
                record.winner.as_str(),
                if record.swap_consistent { "ok" } else { "-" }
            ));
        }

        report
    }
}

/// Entries ranked by conservative score, best first
pub fn leaderboard(entries: &[Entry]) -> Vec<&Entry> {
    let mut ranked: Vec<&Entry> = entries.iter().collect();
    ranked.sort_by(|a, b| {
        b.conservative_score()
            .partial_cmp(&a.conservative_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Render the leaderboard as a table
pub fn format_leaderboard(entries: &[Entry]) -> String {
    let mut out = String::new();
    out.push_str("\n=== Paper Leaderboard ===\n");
    out.push_str(&format!(
        "{:<24} {:<6} {:>8} {:>7} {:>6} {:>8}\n",
        "Paper", "Source", "Score", "Sigma", "Elo", "Matches"
    ));
    out.push_str(&"-".repeat(64));
    out.push('\n');
    for entry in leaderboard(entries) {
        let source = match entry.origin {
            Origin::Ai => "ai",
            Origin::Human => "human",
        };
        out.push_str(&format!(
            "{:<24} {:<6} {:>8.2} {:>7.3} {:>6} {:>8}\n",
            entry.id,
            source,
            entry.conservative_score(),
            entry.sigma,
            entry.elo,
            entry.matches_played
        ));
    }
    out
}

/// One-paragraph report for a finished round
pub fn format_round(stats: &RoundStats, total_matches: usize) -> String {
    format!(
        concat!(
            "=== Round Result ===\n",
            "New matches: {}\n",
            "AI wins: {}, Human wins: {}, Ties: {}\n",
            "Total matches: {}\n",
        ),
        stats.matches_created,
        stats.outcomes.ai_wins,
        stats.outcomes.human_wins,
        stats.outcomes.ties,
        total_matches,
    )
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod summary_tests;
