//! AI vs human paper tournament
//!
//! This crate provides:
//! - Swap-consistent pairwise judging with a seeded offline fallback
//! - Bayesian (TrueSkill-style) and Elo rating updates
//! - Seeded round scheduling between eligible ai and human papers
//! - JSON state files, history summaries and the leaderboard
//!
//! # Usage
//!
//! ```bash
//! # Play a round of 20 matches with the configured judge model
//! cargo run -p tournament -- round --matches 20
//!
//! # Play without any judge backend, using seeded fallback scoring only
//! cargo run -p tournament -- round --offline
//!
//! # Show standings
//! cargo run -p tournament -- leaderboard
//! ```

mod arbiter;
mod config;
mod fallback;
pub mod rating;
mod round;
mod store;
mod summary;

#[cfg(test)]
mod test_support;

pub use arbiter::*;
pub use config::*;
pub use fallback::*;
pub use rating::{
    elo_from_mu, expected_score, expected_scores, mu_from_elo, rating_model, EloModel, RatingModel,
    RatingModelKind,
};
#[cfg(feature = "bayesian")]
pub use rating::BayesianModel;
pub use round::*;
pub use store::*;
pub use summary::*;
