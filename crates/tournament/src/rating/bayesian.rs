//! TrueSkill 1v1 update on Gaussian skill beliefs

use paper_core::{Entry, Winner, DEFAULT_MU, SIGMA_FLOOR};
use skillratings::trueskill::{trueskill, TrueSkillConfig, TrueSkillRating};
use skillratings::Outcomes;
use tracing::warn;

use super::{elo_from_mu, RatingModel};

/// Gaussian skill model in the TrueSkill family.
///
/// Each paper holds a belief `N(mu, sigma^2)`. A decisive verdict moves the
/// winner up and the loser down; a draw pulls the two means together. Both
/// variances shrink, scaled by how surprising the result was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayesianModel {
    /// Performance variance around skill
    pub beta: f64,
    /// Dynamics noise added before each update
    pub tau: f64,
    /// Prior chance that a comparison ends level
    pub draw_probability: f64,
}

impl Default for BayesianModel {
    fn default() -> Self {
        let sigma = DEFAULT_MU / 3.0;
        Self {
            beta: sigma / 2.0,
            tau: sigma / 100.0,
            draw_probability: 0.10,
        }
    }
}

impl BayesianModel {
    fn config(&self) -> TrueSkillConfig {
        TrueSkillConfig {
            draw_probability: self.draw_probability,
            beta: self.beta,
            default_dynamics: self.tau,
        }
    }
}

fn belief(entry: &Entry) -> TrueSkillRating {
    TrueSkillRating {
        rating: entry.mu,
        uncertainty: entry.sigma,
    }
}

/// Write a posterior back, keeping the prior when the update blew up.
fn store(entry: &mut Entry, posterior: TrueSkillRating) {
    if posterior.rating.is_finite() && posterior.uncertainty.is_finite() {
        entry.mu = posterior.rating;
        entry.sigma = posterior.uncertainty;
    } else {
        warn!(id = %entry.id, "rating update produced non-finite values, keeping prior");
    }
    entry.sigma = entry.sigma.max(SIGMA_FLOOR);
    entry.elo = elo_from_mu(entry.mu);
}

impl RatingModel for BayesianModel {
    fn apply(&self, a: &mut Entry, b: &mut Entry, winner: Winner) {
        let outcome = match winner {
            Winner::A => Outcomes::WIN,
            Winner::B => Outcomes::LOSS,
            Winner::Tie => Outcomes::DRAW,
        };
        let (new_a, new_b) = trueskill(&belief(a), &belief(b), &outcome, &self.config());
        store(a, new_a);
        store(b, new_b);
    }

    fn name(&self) -> &str {
        "bayesian"
    }
}
