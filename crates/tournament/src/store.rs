//! JSON state files shared with the surrounding paper pipeline

use paper_core::{utc_now_iso, Entry, MatchRecord, Origin, Recommendation, Status};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Bookkeeping written after every round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateMeta {
    pub last_cycle_at: String,
    pub total_papers: usize,
    pub total_matches: usize,
    pub judge_model: String,
    pub rating_model: String,
}

/// Paper pool and match log on disk
#[derive(Debug, Clone)]
pub struct StateStore {
    state_dir: PathBuf,
}

impl StateStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn papers_path(&self) -> PathBuf {
        self.state_dir.join("papers.json")
    }

    pub fn matches_path(&self) -> PathBuf {
        self.state_dir.join("matches.json")
    }

    pub fn meta_path(&self) -> PathBuf {
        self.state_dir.join("meta.json")
    }

    pub fn load_papers(&self) -> Result<Vec<Entry>, StoreError> {
        load_json(&self.papers_path())
    }

    pub fn save_papers(&self, papers: &[Entry]) -> Result<(), StoreError> {
        dump_json(&self.papers_path(), papers)
    }

    pub fn load_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        load_json(&self.matches_path())
    }

    pub fn save_matches(&self, matches: &[MatchRecord]) -> Result<(), StoreError> {
        dump_json(&self.matches_path(), matches)
    }

    pub fn load_meta(&self) -> Result<Option<StateMeta>, StoreError> {
        let path = self.meta_path();
        if !has_content(&path)? {
            return Ok(None);
        }
        load_json(&path).map(Some)
    }

    pub fn save_meta(&self, meta: &StateMeta) -> Result<(), StoreError> {
        dump_json(&self.meta_path(), meta)
    }
}

fn has_content(path: &Path) -> Result<bool, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(!text.trim().is_empty()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a JSON file; a missing or blank file is the type's default.
fn load_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn dump_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Bring loaded entries into a consistent state before a round.
///
/// Human benchmarks are published work: they are peer reviewed, carry
/// strong default review scores, and start with a tight uncertainty.
pub fn normalize_entries(entries: &mut [Entry]) {
    for entry in entries.iter_mut() {
        match entry.origin {
            Origin::Human => {
                entry.status = Status::PeerReviewed;
                if entry.advisor_total == 0 {
                    entry.advisor_total = 4;
                }
                if entry.advisor_passes == 0 {
                    entry.advisor_passes = entry.advisor_total;
                }
                if entry.advisor_score == 0.0 {
                    entry.advisor_score = 95.0;
                }
                if entry.reviewer_score == 0.0 {
                    entry.reviewer_score = 92.0;
                }
                if entry.review_recommendation == Recommendation::Pending {
                    entry.review_recommendation = Recommendation::Accept;
                }
                if entry.sigma > 2.5 {
                    entry.sigma = 1.4;
                }
            }
            Origin::Ai => {
                if entry.status == Status::PeerReviewed {
                    entry.status = Status::Reviewed;
                }
            }
        }
    }
}

/// Stamp `updated_at` on every entry that played in `new_matches`.
pub fn touch_matched(entries: &mut [Entry], new_matches: &[MatchRecord]) {
    let ids: HashSet<&str> = new_matches
        .iter()
        .flat_map(|m| [m.entry_a_id.as_str(), m.entry_b_id.as_str()])
        .collect();
    if ids.is_empty() {
        return;
    }
    let now = utc_now_iso();
    for entry in entries.iter_mut() {
        if ids.contains(entry.id.as_str()) {
            entry.updated_at = now.clone();
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
