//! Elo rating computation for matrix tournaments.
//!
//! Ratings are folded over the result sequence in schedule order, which
//! affects the outcome: the same wins in a different order produce
//! different final ratings.

use std::collections::BTreeMap;

use crate::matrix::types::{EloRating, MatrixDebateResult};

/// K-factor applied to every update.
pub const DEFAULT_K: f64 = 32.0;

/// Rating every model starts at.
pub const DEFAULT_RATING: f64 = 1500.0;

/// Expected score for a player rated `rating_a` against `rating_b`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / 400.0))
}

/// Update ratings after a game.
///
/// Returns `(new_winner_rating, new_loser_rating)`.
pub fn update_ratings(rating_winner: f64, rating_loser: f64, k: f64) -> (f64, f64) {
    let expected_w = expected_score(rating_winner, rating_loser);
    let expected_l = expected_score(rating_loser, rating_winner);

    let new_winner = rating_winner + k * (1.0 - expected_w);
    let new_loser = rating_loser + k * (0.0 - expected_l);

    (new_winner, new_loser)
}

/// Compute Elo ratings from debate results in schedule order.
pub fn compute_elo_ratings(
    debate_results: &[MatrixDebateResult],
    model_names: &[String],
    k: f64,
) -> BTreeMap<String, EloRating> {
    let mut ratings: BTreeMap<String, EloRating> = model_names
        .iter()
        .map(|name| (name.clone(), EloRating::new(name.clone(), DEFAULT_RATING)))
        .collect();

    for result in debate_results {
        let winner_rating = match ratings.get(&result.winner_model) {
            Some(r) => r.rating,
            None => continue,
        };
        let loser_rating = match ratings.get(&result.loser_model) {
            Some(r) => r.rating,
            None => continue,
        };

        let (new_winner, new_loser) = update_ratings(winner_rating, loser_rating, k);

        if let Some(winner) = ratings.get_mut(&result.winner_model) {
            winner.rating = new_winner;
            winner.games_played += 1;
            winner.rating_history.push(new_winner);
        }
        if let Some(loser) = ratings.get_mut(&result.loser_model) {
            loser.rating = new_loser;
            loser.games_played += 1;
            loser.rating_history.push(new_loser);
        }
    }

    ratings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn round(index: usize, winner: &str, loser: &str, winner_is_aff: bool) -> MatrixDebateResult {
        let (aff, neg) = if winner_is_aff {
            (winner, loser)
        } else {
            (loser, winner)
        };
        MatrixDebateResult {
            debate_index: index,
            affirmative_model: aff.to_string(),
            negative_model: neg.to_string(),
            winner_model: winner.to_string(),
            loser_model: loser.to_string(),
            winner_side: if winner_is_aff {
                crate::debate::formats::SpeakerRole::Affirmative
            } else {
                crate::debate::formats::SpeakerRole::Negative
            },
            margin: 5.0,
            is_unanimous: true,
            aggregate_aff_total: 40.0,
            aggregate_neg_total: 35.0,
            category_scores: BTreeMap::new(),
            judge_names: vec![],
            transcript_id: format!("t{}", index),
        }
    }

    #[test]
    fn test_expected_score_even_match() {
        assert!((expected_score(1500.0, 1500.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_expected_score_favors_higher_rating() {
        let strong = expected_score(1700.0, 1500.0);
        let weak = expected_score(1500.0, 1700.0);
        assert!(strong > 0.5);
        assert!(weak < 0.5);
        assert!((strong + weak - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_is_zero_sum() {
        for (w, l, k) in [
            (1500.0, 1500.0, 32.0),
            (1650.0, 1420.0, 32.0),
            (1200.0, 1900.0, 16.0),
        ] {
            let (new_w, new_l) = update_ratings(w, l, k);
            let delta = (new_w - w) + (new_l - l);
            assert!(delta.abs() < 1e-9, "not zero-sum for ({}, {}, {})", w, l, k);
        }
    }

    #[test]
    fn test_even_match_update() {
        let (new_w, new_l) = update_ratings(1500.0, 1500.0, DEFAULT_K);
        assert!((new_w - 1516.0).abs() < 1e-9);
        assert!((new_l - 1484.0).abs() < 1e-9);
    }

    #[test]
    fn test_upset_moves_more_points() {
        // An underdog win transfers more rating than a favorite win.
        let (fav_w, _) = update_ratings(1700.0, 1500.0, DEFAULT_K);
        let (dog_w, _) = update_ratings(1500.0, 1700.0, DEFAULT_K);
        assert!((dog_w - 1500.0) > (fav_w - 1700.0));
    }

    #[test]
    fn test_ratings_fold_in_schedule_order() {
        let names = vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()];
        let results = vec![
            round(0, "Alpha", "Beta", true),
            round(1, "Alpha", "Gamma", true),
            round(2, "Beta", "Gamma", false),
        ];

        let ratings = compute_elo_ratings(&results, &names, DEFAULT_K);

        assert_eq!(ratings["Alpha"].games_played, 2);
        assert_eq!(ratings["Beta"].games_played, 2);
        assert_eq!(ratings["Gamma"].games_played, 2);

        // History includes the starting rating plus one entry per game.
        assert_eq!(ratings["Alpha"].rating_history.len(), 3);
        assert!((ratings["Alpha"].rating_history[0] - DEFAULT_RATING).abs() < 1e-9);

        // Alpha won both games and must lead.
        assert!(ratings["Alpha"].rating > ratings["Beta"].rating);
        assert!(ratings["Alpha"].rating > ratings["Gamma"].rating);

        // Total rating mass is conserved.
        let total: f64 = ratings.values().map(|r| r.rating).sum();
        assert!((total - 3.0 * DEFAULT_RATING).abs() < 1e-9);
    }

    #[test]
    fn test_order_affects_ratings() {
        let names = vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()];
        let forward = vec![
            round(0, "Alpha", "Beta", true),
            round(1, "Beta", "Gamma", true),
        ];
        let reversed = vec![
            round(0, "Beta", "Gamma", true),
            round(1, "Alpha", "Beta", true),
        ];

        let first = compute_elo_ratings(&forward, &names, DEFAULT_K);
        let second = compute_elo_ratings(&reversed, &names, DEFAULT_K);

        // Beta's rating when it beats Gamma differs depending on whether
        // it already lost to Alpha, so the folds diverge.
        assert!((first["Gamma"].rating - second["Gamma"].rating).abs() > 1e-9);
    }
}
