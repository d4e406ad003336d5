//! Round scheduler: draws ai vs human pairs and rates the verdicts

use chrono::{NaiveDate, Utc};
use paper_core::{seeded_rng, Entry, Judge, MatchRecord, Origin, Winner};
use rand::Rng;
use tracing::{debug, info};

use crate::arbiter::ConsistencyArbiter;
use crate::rating::RatingModel;
use crate::summary::OutcomeCounts;

/// Rationale recorded when the ai paper wins and the judge gave none
pub const AI_WIN_RATIONALE: &str = "AI paper preferred on identification and policy relevance.";

/// Rationale recorded when the human paper wins and the judge gave none
pub const HUMAN_WIN_RATIONALE: &str = "Human paper preferred for robustness and reporting clarity.";

/// Rationale recorded for a tie when the judge gave none
pub const TIE_RATIONALE: &str = "Judge could not determine a stable preference after swap.";

/// Tallies for the matches created by one round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    pub matches_created: usize,
    pub outcomes: OutcomeCounts,
}

/// Fallback rationale for an outcome, ai paper as side A
pub fn default_rationale(winner: Winner) -> &'static str {
    match winner {
        Winner::A => AI_WIN_RATIONALE,
        Winner::B => HUMAN_WIN_RATIONALE,
        Winner::Tie => TIE_RATIONALE,
    }
}

/// Seed key for a round's pair draws.
///
/// Depends on the day and on how many matches already exist, so repeated
/// rounds on one day draw different but reproducible pairs.
pub fn round_seed_key(date: NaiveDate, existing_matches: usize) -> String {
    format!("tournament:{}:{}", date.format("%Y-%m-%d"), existing_matches)
}

/// Indices of eligible (ai, human) entries in pool order
pub fn eligible_indices(pool: &[Entry]) -> (Vec<usize>, Vec<usize>) {
    let mut ais = Vec::new();
    let mut humans = Vec::new();
    for (idx, entry) in pool.iter().enumerate() {
        if !entry.is_eligible() {
            continue;
        }
        match entry.origin {
            Origin::Ai => ais.push(idx),
            Origin::Human => humans.push(idx),
        }
    }
    (ais, humans)
}

/// Two distinct mutable entries out of one pool
fn pair_mut(pool: &mut [Entry], i: usize, j: usize) -> (&mut Entry, &mut Entry) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = pool.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = pool.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

/// Runs tournament rounds between eligible ai and human papers
pub struct RoundRunner<J> {
    arbiter: ConsistencyArbiter<J>,
    rating: Box<dyn RatingModel>,
    date: Option<NaiveDate>,
}

impl<J: Judge> RoundRunner<J> {
    pub fn new(arbiter: ConsistencyArbiter<J>, rating: Box<dyn RatingModel>) -> Self {
        Self {
            arbiter,
            rating,
            date: None,
        }
    }

    /// Pin the date used for the round seed instead of today's UTC date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn rating_model(&self) -> &dyn RatingModel {
        self.rating.as_ref()
    }

    /// Play `match_count` matches and append them to `history`.
    ///
    /// Each match draws one eligible ai paper (side A) and one eligible
    /// human paper (side B) with replacement, so ratings changed by an
    /// earlier match are what later matches see. With no eligible paper on
    /// either side the history comes back untouched.
    pub fn run_round(
        &self,
        pool: &mut [Entry],
        mut history: Vec<MatchRecord>,
        judge_model: &str,
        match_count: usize,
    ) -> (Vec<MatchRecord>, RoundStats) {
        let (ais, humans) = eligible_indices(pool);
        if ais.is_empty() || humans.is_empty() {
            info!(
                ai = ais.len(),
                human = humans.len(),
                "no eligible pairs, skipping round"
            );
            return (history, RoundStats::default());
        }

        let existing = history.len();
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        let mut rng = seeded_rng(&round_seed_key(date, existing));
        let mut stats = RoundStats::default();

        info!(
            matches = match_count,
            ai = ais.len(),
            human = humans.len(),
            rating = self.rating.name(),
            judge = judge_model,
            "starting tournament round"
        );

        for idx in 0..match_count {
            let ai_idx = ais[rng.gen_range(0..ais.len())];
            let human_idx = humans[rng.gen_range(0..humans.len())];
            let (ai, human) = pair_mut(pool, ai_idx, human_idx);

            let seed_key = format!("{}:{}:{}", ai.id, human.id, existing + idx);
            let verdict = self.arbiter.resolve(ai, human, &seed_key, judge_model);

            self.rating.apply(ai, human, verdict.winner);
            ai.matches_played += 1;
            human.matches_played += 1;
            stats.outcomes.record(verdict.winner);

            let rationale = if verdict.rationale.is_empty() {
                default_rationale(verdict.winner)
            } else {
                verdict.rationale.as_str()
            };

            debug!(
                ai = %ai.id,
                human = %human.id,
                winner = %verdict.winner,
                consistent = verdict.consistent,
                ai_mu = ai.mu,
                human_mu = human.mu,
                "match resolved"
            );

            history.push(MatchRecord::new(
                &ai.id,
                &human.id,
                verdict.winner,
                judge_model,
                verdict.consistent,
                rationale,
            ));
            stats.matches_created += 1;
        }

        info!(
            created = stats.matches_created,
            ai_wins = stats.outcomes.ai_wins,
            human_wins = stats.outcomes.human_wins,
            ties = stats.outcomes.ties,
            "tournament round finished"
        );

        (history, stats)
    }
}

#[cfg(test)]
#[path = "round_tests.rs"]
mod round_tests;
