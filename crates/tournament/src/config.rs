//! Tournament configuration: TOML file plus environment overrides

use llm_judge::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::rating::RatingModelKind;
use crate::summary::RECENT_MATCHES;

pub const ENV_JUDGE_MODEL: &str = "TOURNAMENT_JUDGE_MODEL";
pub const ENV_RATING_MODEL: &str = "TOURNAMENT_RATING_MODEL";
pub const ENV_MATCHES: &str = "TOURNAMENT_MATCHES";
pub const ENV_STATE_DIR: &str = "TOURNAMENT_STATE_DIR";
pub const ENV_JUDGE_TIMEOUT: &str = "TOURNAMENT_JUDGE_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },
}

/// Settings for one tournament invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TournamentConfig {
    /// Model identifier handed to the judge
    pub judge_model: String,
    pub rating_model: RatingModelKind,
    /// Matches played per round
    pub matches_per_round: usize,
    /// Directory holding papers.json / matches.json / meta.json
    pub state_dir: PathBuf,
    pub judge_timeout_secs: u64,
    /// Matches kept in the recent-history summary
    pub recent_limit: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            judge_model: "gemini-2.5-flash".to_string(),
            rating_model: RatingModelKind::Bayesian,
            matches_per_round: 20,
            state_dir: PathBuf::from("state"),
            judge_timeout_secs: DEFAULT_TIMEOUT_SECS,
            recent_limit: RECENT_MATCHES,
        }
    }
}

impl TournamentConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(model) = get(ENV_JUDGE_MODEL) {
            self.judge_model = model;
        }
        if let Some(raw) = get(ENV_RATING_MODEL) {
            self.rating_model = raw.parse().map_err(|_| ConfigError::Env {
                name: ENV_RATING_MODEL,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = get(ENV_MATCHES) {
            self.matches_per_round = raw.parse().map_err(|_| ConfigError::Env {
                name: ENV_MATCHES,
                value: raw.clone(),
            })?;
        }
        if let Some(dir) = get(ENV_STATE_DIR) {
            self.state_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(ENV_JUDGE_TIMEOUT) {
            self.judge_timeout_secs = raw.parse().map_err(|_| ConfigError::Env {
                name: ENV_JUDGE_TIMEOUT,
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = TournamentConfig::from_toml("matches_per_round = 50\nrating_model = \"elo\"\n")
            .unwrap();
        assert_eq!(config.matches_per_round, 50);
        assert_eq!(config.rating_model, RatingModelKind::Elo);
        assert_eq!(config.judge_model, "gemini-2.5-flash");
        assert_eq!(config.recent_limit, 20);
        assert_eq!(config.judge_timeout_secs, 60);
    }

    #[test]
    fn env_overrides_file_values() {
        let config = TournamentConfig::default()
            .apply_overrides(env(&[
                (ENV_JUDGE_MODEL, "openai:gpt-4.1"),
                (ENV_MATCHES, " 7 "),
                (ENV_STATE_DIR, "/tmp/state"),
            ]))
            .unwrap();
        assert_eq!(config.judge_model, "openai:gpt-4.1");
        assert_eq!(config.matches_per_round, 7);
        assert_eq!(config.state_dir, PathBuf::from("/tmp/state"));
        assert_eq!(config.rating_model, RatingModelKind::Bayesian);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = TournamentConfig::default()
            .apply_overrides(env(&[(ENV_JUDGE_MODEL, "  ")]))
            .unwrap();
        assert_eq!(config.judge_model, "gemini-2.5-flash");
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = TournamentConfig::default()
            .apply_overrides(env(&[(ENV_RATING_MODEL, "glicko")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_RATING_MODEL));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = TournamentConfig::load(Path::new("/nonexistent/tournament.toml")).unwrap();
        assert_eq!(config, TournamentConfig::default());
    }
}
