//! Swap-consistent verdicts from a possibly order-biased judge
//!
//! Every pair is judged twice, the second time with the papers presented
//! in reverse order. Only verdicts that survive the swap count as wins;
//! anything else is recorded as an inconsistent tie.

use paper_core::{Entry, Judge, JudgeRequest, Winner};
use tracing::{debug, warn};

use crate::fallback::FallbackScorer;

/// Order bias the fallback judge gives the first-listed paper
pub const FALLBACK_ORDER_BIAS: f64 = 0.35;

/// Reconciled outcome of the two judging calls
#[derive(Debug, Clone, PartialEq)]
pub struct ArbiterVerdict {
    pub winner: Winner,
    /// True only when both orientations agreed on a decisive winner
    pub consistent: bool,
    /// First non-empty rationale either call produced; may be empty
    pub rationale: String,
}

/// Combine two verdicts that are both already in the original orientation.
///
/// Returns the final winner and whether it was swap-consistent.
pub fn reconcile(first: Winner, second: Winner) -> (Winner, bool) {
    match (first, second) {
        (Winner::Tie, _) | (_, Winner::Tie) => (Winner::Tie, false),
        (a, b) if a == b => (a, true),
        _ => (Winner::Tie, false),
    }
}

/// Drives the double-call protocol against a judge backend
pub struct ConsistencyArbiter<J> {
    judge: J,
    fallback: FallbackScorer,
}

impl<J: Judge> ConsistencyArbiter<J> {
    pub fn new(judge: J) -> Self {
        Self {
            judge,
            fallback: FallbackScorer::default(),
        }
    }

    pub fn with_fallback(judge: J, fallback: FallbackScorer) -> Self {
        Self { judge, fallback }
    }

    /// Judge `a` against `b` and return one swap-checked verdict.
    ///
    /// If the judge is unavailable on the first call, both orientations
    /// come from the seeded fallback scorer instead. If only the second
    /// call fails, the first verdict stands on its own.
    pub fn resolve(
        &self,
        a: &Entry,
        b: &Entry,
        seed_key: &str,
        judge_model: &str,
    ) -> ArbiterVerdict {
        let request = JudgeRequest::between(a, b);

        let Some(first) = self.judge.judge(judge_model, &request) else {
            debug!(
                judge = judge_model,
                a = %a.id,
                b = %b.id,
                "judge unavailable, using seeded fallback"
            );
            let forward = self
                .fallback
                .predict(a, b, FALLBACK_ORDER_BIAS, &format!("{seed_key}:ab"));
            let reverse = self
                .fallback
                .predict(a, b, -FALLBACK_ORDER_BIAS, &format!("{seed_key}:ba"));
            let (winner, consistent) = reconcile(forward, reverse);
            debug!(%forward, %reverse, %winner, consistent, "fallback verdict");
            return ArbiterVerdict {
                winner,
                consistent,
                rationale: String::new(),
            };
        };

        let Some(second) = self.judge.judge(judge_model, &request.swapped()) else {
            warn!(
                judge = judge_model,
                a = %a.id,
                b = %b.id,
                "swapped judge call unavailable, keeping first verdict"
            );
            return ArbiterVerdict {
                winner: first.winner,
                consistent: first.winner != Winner::Tie,
                rationale: first.rationale,
            };
        };

        let forward = first.winner;
        let reverse = second.winner.swapped();
        let (winner, consistent) = reconcile(forward, reverse);
        debug!(%forward, %reverse, %winner, consistent, "judge verdict");

        let rationale = if first.rationale.is_empty() {
            second.rationale
        } else {
            first.rationale
        };

        ArbiterVerdict {
            winner,
            consistent,
            rationale,
        }
    }
}

#[cfg(test)]
#[path = "arbiter_tests.rs"]
mod arbiter_tests;
