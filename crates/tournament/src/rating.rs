//! Skill rating updates for judged pairs
//!
//! Two models share one interface:
//! - `BayesianModel`: TrueSkill-style Gaussian belief update (authoritative)
//! - `EloModel`: classic logistic Elo, used when the Bayesian model is not
//!   compiled in or is switched off in config
//!
//! The two produce different Elo trajectories for the same matches; no
//! attempt is made to keep them numerically in step.

use paper_core::{Entry, Winner, DEFAULT_ELO, DEFAULT_MU, SIGMA_FLOOR};
use serde::{Deserialize, Serialize};

#[cfg(feature = "bayesian")]
mod bayesian;

#[cfg(feature = "bayesian")]
pub use bayesian::BayesianModel;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 24.0;

/// Elo points per unit of `mu`
pub const ELO_PER_MU: f64 = 38.0;

/// Per-match sigma decay under the Elo model
pub const ELO_SIGMA_DECAY: f64 = 0.995;

/// Updates both entries' skill state after a verdict.
///
/// `winner` is relative to the order of the arguments: `Winner::A` means
/// `a` won.
pub trait RatingModel {
    fn apply(&self, a: &mut Entry, b: &mut Entry, winner: Winner);

    /// Short name for logs and state metadata
    fn name(&self) -> &str;
}

/// Which rating model to build
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RatingModelKind {
    #[default]
    Bayesian,
    Elo,
}

impl std::str::FromStr for RatingModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bayesian" | "trueskill" => Ok(RatingModelKind::Bayesian),
            "elo" => Ok(RatingModelKind::Elo),
            other => Err(format!("Unknown rating model: {}", other)),
        }
    }
}

/// Build the requested rating model.
///
/// Asking for the Bayesian model in a build without it yields Elo.
pub fn rating_model(kind: RatingModelKind) -> Box<dyn RatingModel> {
    match kind {
        RatingModelKind::Elo => Box::new(EloModel::default()),
        RatingModelKind::Bayesian => bayesian_or_elo(),
    }
}

#[cfg(feature = "bayesian")]
fn bayesian_or_elo() -> Box<dyn RatingModel> {
    Box::new(BayesianModel::default())
}

#[cfg(not(feature = "bayesian"))]
fn bayesian_or_elo() -> Box<dyn RatingModel> {
    tracing::warn!("bayesian rating model not compiled in, using Elo");
    Box::new(EloModel::default())
}

/// Elo projection of a Bayesian mean
pub fn elo_from_mu(mu: f64) -> i32 {
    (DEFAULT_ELO as f64 + (mu - DEFAULT_MU) * ELO_PER_MU).round() as i32
}

/// Bayesian mean implied by an Elo rating
pub fn mu_from_elo(elo: i32) -> f64 {
    DEFAULT_MU + (elo - DEFAULT_ELO) as f64 / ELO_PER_MU
}

/// Expected score for a player rated `elo_a` against `elo_b`
pub fn expected_score(elo_a: f64, elo_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((elo_b - elo_a) / 400.0))
}

/// Expected scores for both sides; they always sum to one
pub fn expected_scores(elo_a: f64, elo_b: f64) -> (f64, f64) {
    let expected_a = expected_score(elo_a, elo_b);
    (expected_a, 1.0 - expected_a)
}

/// Classic logistic Elo with a fixed K-factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloModel {
    pub k_factor: f64,
}

impl Default for EloModel {
    fn default() -> Self {
        Self { k_factor: K_FACTOR }
    }
}

impl RatingModel for EloModel {
    fn apply(&self, a: &mut Entry, b: &mut Entry, winner: Winner) {
        let (expected_a, expected_b) = expected_scores(a.elo as f64, b.elo as f64);
        let actual_a = winner.score_a();
        let actual_b = 1.0 - actual_a;

        a.elo = (a.elo as f64 + self.k_factor * (actual_a - expected_a)).round() as i32;
        b.elo = (b.elo as f64 + self.k_factor * (actual_b - expected_b)).round() as i32;

        for entry in [a, b] {
            entry.mu = mu_from_elo(entry.elo);
            entry.sigma = (entry.sigma * ELO_SIGMA_DECAY).max(SIGMA_FLOOR);
        }
    }

    fn name(&self) -> &str {
        "elo"
    }
}

#[cfg(test)]
#[path = "rating_tests.rs"]
mod rating_tests;
