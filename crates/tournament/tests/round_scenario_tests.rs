//! End-to-end rounds against on-disk state

use chrono::NaiveDate;
use paper_core::{
    Entry, Judge, JudgeRequest, JudgeVerdict, Origin, Recommendation, Status, UnavailableJudge,
    Winner,
};
use tempfile::tempdir;
use tournament::{
    normalize_entries, rating_model, touch_matched, ConsistencyArbiter, HistorySummary,
    RatingModelKind, RoundRunner, StateStore, RECENT_MATCHES,
};

const MODEL: &str = "gemini-2.5-flash";

/// Answers every call with the same raw winner token.
struct FixedJudge(&'static str);

impl Judge for FixedJudge {
    fn judge(&self, _model: &str, _request: &JudgeRequest) -> Option<JudgeVerdict> {
        Some(JudgeVerdict::from_raw(self.0, "fixed answer"))
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()
}

fn seed_pool() -> Vec<Entry> {
    let mut ai = Entry::new("ai-1", "Wildfire smoke and ER visits", Origin::Ai);
    ai.status = Status::Reviewed;
    ai.review_recommendation = Recommendation::Minor;
    ai.advisor_score = 82.0;
    ai.reviewer_score = 76.0;

    let mut draft = Entry::new("ai-2", "Unfinished draft", Origin::Ai);
    draft.status = Status::Draft;

    let human = Entry::new("hum-1", "Published benchmark", Origin::Human);
    vec![ai, draft, human]
}

#[test]
fn offline_round_persists_and_reloads() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state"));
    store.save_papers(&seed_pool()).unwrap();

    let mut papers = store.load_papers().unwrap();
    normalize_entries(&mut papers);
    let history = store.load_matches().unwrap();
    assert!(history.is_empty());

    let runner = RoundRunner::new(
        ConsistencyArbiter::new(UnavailableJudge),
        rating_model(RatingModelKind::Bayesian),
    )
    .with_date(day());
    let (history, stats) = runner.run_round(&mut papers, history, MODEL, 5);
    touch_matched(&mut papers, &history);

    assert_eq!(stats.matches_created, 5);
    assert_eq!(history.len(), 5);
    assert_eq!(papers[0].matches_played, 5);
    assert_eq!(papers[1].matches_played, 0);
    assert_eq!(papers[2].matches_played, 5);
    // Normalized human benchmark starts with tight uncertainty
    assert!(papers[2].sigma < 2.5);

    store.save_papers(&papers).unwrap();
    store.save_matches(&history).unwrap();
    assert_eq!(store.load_papers().unwrap(), papers);
    assert_eq!(store.load_matches().unwrap(), history);

    let summary = HistorySummary::from_matches(&history, RECENT_MATCHES);
    assert_eq!(summary.ai_vs_human.total(), 5);
}

#[test]
fn invalid_winner_token_becomes_inconsistent_tie() {
    let runner = RoundRunner::new(
        ConsistencyArbiter::new(FixedJudge("paperC")),
        rating_model(RatingModelKind::Elo),
    )
    .with_date(day());
    let mut pool = seed_pool();
    normalize_entries(&mut pool);

    let (history, stats) = runner.run_round(&mut pool, Vec::new(), MODEL, 3);

    assert_eq!(stats.outcomes.ties, 3);
    for record in &history {
        assert_eq!(record.winner, Winner::Tie);
        assert!(!record.swap_consistent);
        assert_eq!(record.rationale, "fixed answer");
    }
}

#[test]
fn position_biased_judge_never_produces_a_win() {
    let runner = RoundRunner::new(
        ConsistencyArbiter::new(FixedJudge("paperB")),
        rating_model(RatingModelKind::Bayesian),
    )
    .with_date(day());
    let mut pool = seed_pool();
    normalize_entries(&mut pool);
    let before_ai_sigma = pool[0].sigma;

    let (history, _) = runner.run_round(&mut pool, Vec::new(), MODEL, 4);

    assert!(history.iter().all(|m| m.winner == Winner::Tie));
    // Draws still carry information
    assert!(pool[0].sigma < before_ai_sigma);
}

#[test]
fn rounds_on_different_days_draw_different_seeds() {
    let mut pool = seed_pool();
    pool.push(Entry::new("hum-2", "Second benchmark", Origin::Human));
    normalize_entries(&mut pool);

    let pairs_on = |date: NaiveDate| {
        let runner = RoundRunner::new(
            ConsistencyArbiter::new(UnavailableJudge),
            rating_model(RatingModelKind::Elo),
        )
        .with_date(date);
        let mut pool = pool.clone();
        let (history, _) = runner.run_round(&mut pool, Vec::new(), MODEL, 30);
        history
            .into_iter()
            .map(|m| m.entry_b_id)
            .collect::<Vec<_>>()
    };

    let first = pairs_on(day());
    assert_eq!(first, pairs_on(day()));
    assert_ne!(first, pairs_on(day().succ_opt().unwrap()));
}
