use super::*;
use paper_core::{Origin, DEFAULT_SIGMA};

fn pair() -> (Entry, Entry) {
    (
        Entry::new("a1", "AI paper", Origin::Ai),
        Entry::new("h1", "Human paper", Origin::Human),
    )
}

#[test]
fn test_elo_calculation() {
    // Equal ratings should give 50% expected score
    let expected = expected_score(1500.0, 1500.0);
    assert!((expected - 0.5).abs() < 0.001);
}

#[test]
fn expected_scores_sum_to_one() {
    for (a, b) in [(1500.0, 1500.0), (1200.0, 1850.0), (2400.0, 900.0), (1501.0, 1499.0)] {
        let (ea, eb) = expected_scores(a, b);
        assert!((ea + eb - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_elo_update() {
    let (mut a, mut b) = pair();
    EloModel::default().apply(&mut a, &mut b, Winner::A);

    assert_eq!(a.elo, 1512);
    assert_eq!(b.elo, 1488);
    assert!((a.mu - (25.0 + 12.0 / 38.0)).abs() < 1e-12);
    assert!((a.sigma - DEFAULT_SIGMA * 0.995).abs() < 1e-12);
}

#[test]
fn elo_draw_between_equals_changes_nothing() {
    let (mut a, mut b) = pair();
    EloModel::default().apply(&mut a, &mut b, Winner::Tie);
    assert_eq!(a.elo, 1500);
    assert_eq!(b.elo, 1500);
}

#[test]
fn elo_sigma_never_below_floor() {
    let (mut a, mut b) = pair();
    let model = EloModel::default();
    for i in 0..2000 {
        let winner = match i % 3 {
            0 => Winner::A,
            1 => Winner::B,
            _ => Winner::Tie,
        };
        model.apply(&mut a, &mut b, winner);
        assert!(a.sigma >= SIGMA_FLOOR);
        assert!(b.sigma >= SIGMA_FLOOR);
    }
    assert_eq!(a.sigma, SIGMA_FLOOR);
}

#[test]
fn elo_projection_round_trips_mu() {
    assert_eq!(elo_from_mu(25.0), 1500);
    assert_eq!(elo_from_mu(26.0), 1538);
    assert_eq!(elo_from_mu(mu_from_elo(1615)), 1615);
}

#[test]
fn kind_parses_from_config_strings() {
    assert_eq!("elo".parse::<RatingModelKind>(), Ok(RatingModelKind::Elo));
    assert_eq!(" TrueSkill ".parse::<RatingModelKind>(), Ok(RatingModelKind::Bayesian));
    assert!("glicko".parse::<RatingModelKind>().is_err());
}

#[test]
fn elo_kind_builds_elo_model() {
    assert_eq!(rating_model(RatingModelKind::Elo).name(), "elo");
}

#[cfg(feature = "bayesian")]
mod bayesian_model {
    use super::*;

    #[test]
    fn default_kind_builds_bayesian_model() {
        assert_eq!(rating_model(RatingModelKind::default()).name(), "bayesian");
    }

    #[test]
    fn win_between_fresh_entries_matches_reference() {
        let (mut a, mut b) = pair();
        BayesianModel::default().apply(&mut a, &mut b, Winner::A);

        assert!((a.mu - 29.3956).abs() < 1e-3);
        assert!((b.mu - 20.6044).abs() < 1e-3);
        assert!((a.sigma - 7.1712).abs() < 1e-3);
        assert!((b.sigma - 7.1712).abs() < 1e-3);
        assert_eq!(a.elo, elo_from_mu(a.mu));
        assert_eq!(b.elo, elo_from_mu(b.mu));
    }

    #[test]
    fn loss_mirrors_win() {
        let (mut a, mut b) = pair();
        BayesianModel::default().apply(&mut a, &mut b, Winner::B);
        assert!(a.mu < 25.0);
        assert!(b.mu > 25.0);
    }

    #[test]
    fn draw_between_equals_only_shrinks_sigma() {
        let (mut a, mut b) = pair();
        BayesianModel::default().apply(&mut a, &mut b, Winner::Tie);

        assert!((a.mu - 25.0).abs() < 1e-6);
        assert!((b.mu - 25.0).abs() < 1e-6);
        assert!((a.sigma - 6.4573).abs() < 1e-3);
    }

    #[test]
    fn draw_pulls_means_together_less_than_a_win() {
        let model = BayesianModel::default();
        let (mut strong, mut weak) = pair();
        strong.mu = 30.0;
        strong.sigma = 4.0;
        weak.mu = 20.0;
        weak.sigma = 4.0;
        let (mut strong_loss, mut weak_win) = (strong.clone(), weak.clone());

        model.apply(&mut strong, &mut weak, Winner::Tie);
        assert!((strong.mu - 27.608).abs() < 1e-2);
        assert!((weak.mu - 22.392).abs() < 1e-2);

        model.apply(&mut strong_loss, &mut weak_win, Winner::B);
        assert!(30.0 - strong.mu < 30.0 - strong_loss.mu);
    }

    #[test]
    fn sigma_never_below_floor() {
        let model = BayesianModel::default();
        let (mut a, mut b) = pair();
        for i in 0..500 {
            let winner = if i % 2 == 0 { Winner::A } else { Winner::Tie };
            model.apply(&mut a, &mut b, winner);
            assert!(a.sigma >= SIGMA_FLOOR);
            assert!(b.sigma >= SIGMA_FLOOR);
            assert!(a.mu.is_finite() && b.mu.is_finite());
        }
    }
}
