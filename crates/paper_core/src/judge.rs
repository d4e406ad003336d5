//! Boundary to the external pairwise judge

use crate::entry::Entry;
use crate::match_record::{truncate_chars, Winner};

/// Longest rationale a judge hands back, in characters
pub const JUDGE_RATIONALE_LIMIT: usize = 400;

/// What the judge sees of one paper
#[derive(Debug, Clone, PartialEq)]
pub struct PaperBrief {
    pub title: String,
    pub track: String,
    pub method: String,
    pub advisor_score: f64,
    pub reviewer_score: f64,
}

impl PaperBrief {
    pub fn of(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            track: entry.track.clone(),
            method: entry.method.clone(),
            advisor_score: entry.advisor_score,
            reviewer_score: entry.reviewer_score,
        }
    }
}

/// A single pairwise comparison request, `a` presented first
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeRequest {
    pub a: PaperBrief,
    pub b: PaperBrief,
}

impl JudgeRequest {
    pub fn between(a: &Entry, b: &Entry) -> Self {
        Self {
            a: PaperBrief::of(a),
            b: PaperBrief::of(b),
        }
    }

    /// The same pair with `b` presented first
    pub fn swapped(&self) -> Self {
        Self {
            a: self.b.clone(),
            b: self.a.clone(),
        }
    }
}

/// A judge's answer, relative to the order of the request it answered
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeVerdict {
    pub winner: Winner,
    pub rationale: String,
}

impl JudgeVerdict {
    /// Normalize a raw winner token and clip the rationale.
    pub fn from_raw(winner: &str, rationale: &str) -> Self {
        Self {
            winner: Winner::from_judge_token(winner),
            rationale: truncate_chars(rationale, JUDGE_RATIONALE_LIMIT),
        }
    }
}

/// Trait implemented by every pairwise judge backend.
///
/// Calls block until the backend answers or gives up. Transport errors,
/// timeouts and unparseable answers are all reported as `None`; a judge
/// never fails the caller.
pub trait Judge {
    /// Compare the two papers in `request` using the named model.
    fn judge(&self, model: &str, request: &JudgeRequest) -> Option<JudgeVerdict>;
}

/// A judge that is never reachable. Rounds fall back to seeded scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableJudge;

impl Judge for UnavailableJudge {
    fn judge(&self, _model: &str, _request: &JudgeRequest) -> Option<JudgeVerdict> {
        None
    }
}

impl<J: Judge + ?Sized> Judge for &J {
    fn judge(&self, model: &str, request: &JudgeRequest) -> Option<JudgeVerdict> {
        (**self).judge(model, request)
    }
}

impl<J: Judge + ?Sized> Judge for Box<J> {
    fn judge(&self, model: &str, request: &JudgeRequest) -> Option<JudgeVerdict> {
        (**self).judge(model, request)
    }
}
