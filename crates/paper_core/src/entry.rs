//! Paper entries and their skill state

use serde::{Deserialize, Serialize};

/// Default mean skill for a fresh entry
pub const DEFAULT_MU: f64 = 25.0;

/// Default skill uncertainty for a fresh entry
pub const DEFAULT_SIGMA: f64 = 8.333;

/// Lowest uncertainty any rating model may leave behind
pub const SIGMA_FLOOR: f64 = 0.9;

/// Default Elo projection for a fresh entry
pub const DEFAULT_ELO: i32 = 1500;

/// Who authored the paper
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Human,
    Ai,
}

/// Lifecycle status, advanced by the review pipeline.
///
/// Human benchmarks sit at `PeerReviewed`; ai papers walk
/// `Idea -> Draft -> AdvisorPassed | AdvisorFailed -> Reviewed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Idea,
    Draft,
    AdvisorPassed,
    AdvisorFailed,
    Reviewed,
    PeerReviewed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idea => "idea",
            Status::Draft => "draft",
            Status::AdvisorPassed => "advisor_passed",
            Status::AdvisorFailed => "advisor_failed",
            Status::Reviewed => "reviewed",
            Status::PeerReviewed => "peer_reviewed",
        }
    }

    /// Parse a status token. Blank or unknown tokens become `Idea`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Status::Draft,
            "advisor_passed" => Status::AdvisorPassed,
            "advisor_failed" => Status::AdvisorFailed,
            "reviewed" => Status::Reviewed,
            "peer_reviewed" => Status::PeerReviewed,
            _ => Status::Idea,
        }
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        Status::parse(&raw)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

/// Reviewer recommendation attached to an ai paper
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum Recommendation {
    #[default]
    Pending,
    Accept,
    Minor,
    Major,
    Revise,
    Reject,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Pending => "pending",
            Recommendation::Accept => "accept",
            Recommendation::Minor => "minor",
            Recommendation::Major => "major",
            Recommendation::Revise => "r_and_r",
            Recommendation::Reject => "reject",
        }
    }

    /// Parse a recommendation token.
    ///
    /// Blank input means no review has happened yet. Anything else outside
    /// the vocabulary is treated as `major`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "pending" => Recommendation::Pending,
            "accept" => Recommendation::Accept,
            "minor" => Recommendation::Minor,
            "major" => Recommendation::Major,
            "r_and_r" => Recommendation::Revise,
            "reject" => Recommendation::Reject,
            _ => Recommendation::Major,
        }
    }
}

impl From<String> for Recommendation {
    fn from(raw: String) -> Self {
        Recommendation::parse(&raw)
    }
}

impl From<Recommendation> for String {
    fn from(rec: Recommendation) -> Self {
        rec.as_str().to_string()
    }
}

/// Clamp a 0-100 quality score. Non-finite values count as zero.
pub fn bound_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Current UTC time as an RFC 3339 string with second precision
pub fn utc_now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
}

/// A scoreable paper in the tournament pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(rename = "source")]
    pub origin: Origin,
    #[serde(default = "default_venue")]
    pub venue: String,
    #[serde(default = "default_track")]
    pub track: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default = "default_paper_url", alias = "paperUrl")]
    pub paper_url: String,

    #[serde(default)]
    pub status: Status,
    #[serde(default, alias = "advisorPasses")]
    pub advisor_passes: u32,
    #[serde(default, alias = "advisorTotal")]
    pub advisor_total: u32,
    #[serde(default, alias = "advisorScore")]
    pub advisor_score: f64,
    #[serde(default, alias = "reviewerScore")]
    pub reviewer_score: f64,
    #[serde(default, alias = "reviewRecommendation")]
    pub review_recommendation: Recommendation,
    #[serde(default, alias = "integrityFlags")]
    pub integrity_flags: Vec<String>,

    #[serde(default = "default_mu")]
    pub mu: f64,
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    #[serde(default = "default_elo")]
    pub elo: i32,
    #[serde(default, alias = "matchesPlayed")]
    pub matches_played: u32,

    #[serde(default = "default_contributor")]
    pub contributor: String,
    #[serde(default = "utc_now_iso", alias = "createdAt")]
    pub created_at: String,
    #[serde(default = "utc_now_iso", alias = "updatedAt")]
    pub updated_at: String,
}

fn default_venue() -> String {
    "Unknown".to_string()
}

fn default_track() -> String {
    "Community Health".to_string()
}

fn default_method() -> String {
    "Unknown".to_string()
}

fn default_year() -> i32 {
    2026
}

fn default_paper_url() -> String {
    "#".to_string()
}

fn default_mu() -> f64 {
    DEFAULT_MU
}

fn default_sigma() -> f64 {
    DEFAULT_SIGMA
}

fn default_elo() -> i32 {
    DEFAULT_ELO
}

fn default_contributor() -> String {
    "system".to_string()
}

impl Entry {
    /// Create a fresh entry with default skill state.
    pub fn new(id: &str, title: &str, origin: Origin) -> Self {
        let now = utc_now_iso();
        Self {
            id: id.to_string(),
            title: title.to_string(),
            origin,
            venue: default_venue(),
            track: default_track(),
            method: default_method(),
            year: default_year(),
            paper_url: default_paper_url(),
            status: match origin {
                Origin::Human => Status::PeerReviewed,
                Origin::Ai => Status::Idea,
            },
            advisor_passes: 0,
            advisor_total: 0,
            advisor_score: 0.0,
            reviewer_score: 0.0,
            review_recommendation: Recommendation::Pending,
            integrity_flags: Vec::new(),
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
            elo: DEFAULT_ELO,
            matches_played: 0,
            contributor: default_contributor(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Lower confidence bound on skill: `mu - 3 * sigma`
    pub fn conservative_score(&self) -> f64 {
        self.mu - 3.0 * self.sigma
    }

    /// Whether this entry may be drawn into a tournament round.
    ///
    /// Human papers must be peer reviewed. Ai papers must have finished
    /// review without a reject recommendation.
    pub fn is_eligible(&self) -> bool {
        match self.origin {
            Origin::Human => self.status == Status::PeerReviewed,
            Origin::Ai => {
                self.status == Status::Reviewed
                    && self.review_recommendation != Recommendation::Reject
            }
        }
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod entry_tests;
