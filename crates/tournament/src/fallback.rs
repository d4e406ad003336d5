//! Seeded quality scoring used when the judge cannot be reached

use paper_core::{bound_score, seeded_rng, Entry, Origin, Winner};
use rand::rngs::StdRng;
use rand::Rng;

/// Reference quality score that neither helps nor hurts an ai paper
pub const QUALITY_PIVOT: f64 = 70.0;

/// Weight on the advisor score above the pivot
pub const ADVISOR_WEIGHT: f64 = 0.12;

/// Weight on the reviewer score above the pivot
pub const REVIEWER_WEIGHT: f64 = 0.18;

/// Penalty per integrity flag
pub const FLAG_PENALTY: f64 = 1.5;

/// Cap on the total integrity penalty
pub const MAX_FLAG_PENALTY: f64 = 6.0;

/// Deterministic stand-in for the external judge.
///
/// Quality is the conservative skill estimate, adjusted for ai papers by
/// their advisor and reviewer scores and integrity flags, plus symmetric
/// jitter drawn from a generator seeded by the caller's key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackScorer {
    /// Half-width of the uniform jitter added to each side
    pub jitter: f64,
    /// Score gaps at or below this are ties
    pub tie_margin: f64,
}

impl Default for FallbackScorer {
    fn default() -> Self {
        Self {
            jitter: 1.2,
            tie_margin: 0.6,
        }
    }
}

impl FallbackScorer {
    pub fn new(jitter: f64, tie_margin: f64) -> Self {
        Self { jitter, tie_margin }
    }

    /// Quality without jitter
    pub fn quality(entry: &Entry) -> f64 {
        let mut base = entry.conservative_score();
        if entry.origin == Origin::Ai {
            base += (bound_score(entry.advisor_score) - QUALITY_PIVOT) * ADVISOR_WEIGHT;
            base += (bound_score(entry.reviewer_score) - QUALITY_PIVOT) * REVIEWER_WEIGHT;
            base -= MAX_FLAG_PENALTY.min(FLAG_PENALTY * entry.integrity_flags.len() as f64);
        }
        base
    }

    /// Quality plus the first jitter draw for `seed_key`
    pub fn score(&self, entry: &Entry, seed_key: &str) -> f64 {
        let mut rng = seeded_rng(seed_key);
        Self::quality(entry) + self.draw_jitter(&mut rng)
    }

    /// Predict the stronger side, with `order_bias_to_a` added to the first.
    pub fn predict(&self, a: &Entry, b: &Entry, order_bias_to_a: f64, seed_key: &str) -> Winner {
        let mut rng = seeded_rng(seed_key);
        let score_a = Self::quality(a) + order_bias_to_a + self.draw_jitter(&mut rng);
        let score_b = Self::quality(b) + self.draw_jitter(&mut rng);

        let margin = score_a - score_b;
        if margin.abs() <= self.tie_margin {
            Winner::Tie
        } else if margin > 0.0 {
            Winner::A
        } else {
            Winner::B
        }
    }

    fn draw_jitter(&self, rng: &mut StdRng) -> f64 {
        if self.jitter > 0.0 {
            rng.gen_range(-self.jitter..self.jitter)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
#[path = "fallback_tests.rs"]
mod fallback_tests;
