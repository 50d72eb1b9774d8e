//! Statistics computation for matrix tournaments.
//!
//! Everything here is a pure fold over the ordered result sequence plus
//! the model-name list, recomputable at any time.

use std::collections::BTreeMap;

use crate::debate::formats::SpeakerRole;
use crate::judging::scoring::ScoringCategory;
use crate::matrix::elo::{compute_elo_ratings, DEFAULT_K};
use crate::matrix::types::{
    CategoryAverages, HeadToHead, MatrixDebateResult, MatrixStats, ModelRecord,
};

/// Tally wins/losses overall and by side for each model.
pub fn compute_records(
    debate_results: &[MatrixDebateResult],
    model_names: &[String],
) -> BTreeMap<String, ModelRecord> {
    let mut records: BTreeMap<String, ModelRecord> = model_names
        .iter()
        .map(|name| (name.clone(), ModelRecord::new(name.clone())))
        .collect();

    for result in debate_results {
        let winner_side = result.winner_side;

        if let Some(winner) = records.get_mut(&result.winner_model) {
            winner.wins += 1;
            match winner_side {
                SpeakerRole::Affirmative => winner.aff_wins += 1,
                SpeakerRole::Negative => winner.neg_wins += 1,
            }
        }
        if let Some(loser) = records.get_mut(&result.loser_model) {
            loser.losses += 1;
            match winner_side {
                SpeakerRole::Affirmative => loser.neg_losses += 1,
                SpeakerRole::Negative => loser.aff_losses += 1,
            }
        }
    }

    records
}

/// Compute head-to-head records between all ordered pairs.
pub fn compute_head_to_head(
    debate_results: &[MatrixDebateResult],
    model_names: &[String],
) -> BTreeMap<String, BTreeMap<String, HeadToHead>> {
    let mut h2h: BTreeMap<String, BTreeMap<String, HeadToHead>> = BTreeMap::new();

    for a in model_names {
        let row = h2h.entry(a.clone()).or_default();
        for b in model_names {
            if a != b {
                row.insert(b.clone(), HeadToHead::new(a.clone(), b.clone()));
            }
        }
    }

    for result in debate_results {
        let winner = &result.winner_model;
        let loser = &result.loser_model;

        if let Some(record) = h2h.get_mut(winner).and_then(|row| row.get_mut(loser)) {
            record.a_wins += 1;
        }
        if let Some(record) = h2h.get_mut(loser).and_then(|row| row.get_mut(winner)) {
            record.b_wins += 1;
        }
    }

    h2h
}

/// Average the five scoring categories across every round each model
/// participated in, counted once per round.
pub fn compute_category_averages(
    debate_results: &[MatrixDebateResult],
    model_names: &[String],
) -> BTreeMap<String, CategoryAverages> {
    let mut totals: BTreeMap<String, BTreeMap<&str, f64>> = model_names
        .iter()
        .map(|name| {
            (
                name.clone(),
                ScoringCategory::ALL
                    .iter()
                    .map(|c| (c.as_str(), 0.0))
                    .collect(),
            )
        })
        .collect();
    let mut counts: BTreeMap<String, u32> =
        model_names.iter().map(|name| (name.clone(), 0)).collect();

    for result in debate_results {
        for model_name in [&result.affirmative_model, &result.negative_model] {
            let Some(scores) = result.category_scores.get(model_name) else {
                continue;
            };
            let Some(model_totals) = totals.get_mut(model_name) else {
                continue;
            };
            *counts.entry(model_name.clone()).or_default() += 1;
            for category in ScoringCategory::ALL {
                let value = scores.get(category.as_str()).copied().unwrap_or(0.0);
                *model_totals.entry(category.as_str()).or_default() += value;
            }
        }
    }

    model_names
        .iter()
        .map(|name| {
            let n = counts.get(name).copied().unwrap_or(0);
            let averages = if n > 0 {
                let model_totals = &totals[name];
                CategoryAverages {
                    model_name: name.clone(),
                    argumentation: model_totals["argumentation"] / n as f64,
                    evidence: model_totals["evidence"] / n as f64,
                    clash: model_totals["clash"] / n as f64,
                    rebuttal: model_totals["rebuttal"] / n as f64,
                    persuasiveness: model_totals["persuasiveness"] / n as f64,
                }
            } else {
                CategoryAverages::new(name.clone())
            };
            (name.clone(), averages)
        })
        .collect()
}

/// Compute all statistics for a matrix tournament.
pub fn compute_matrix_stats(
    debate_results: &[MatrixDebateResult],
    model_names: &[String],
) -> MatrixStats {
    MatrixStats {
        records: compute_records(debate_results, model_names),
        head_to_head: compute_head_to_head(debate_results, model_names),
        category_averages: compute_category_averages(debate_results, model_names),
        elo_ratings: compute_elo_ratings(debate_results, model_names, DEFAULT_K),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_map(value: f64) -> BTreeMap<String, f64> {
        ScoringCategory::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), value))
            .collect()
    }

    fn round(
        index: usize,
        aff: &str,
        neg: &str,
        winner_side: SpeakerRole,
        aff_score: f64,
        neg_score: f64,
    ) -> MatrixDebateResult {
        let (winner, loser) = match winner_side {
            SpeakerRole::Affirmative => (aff, neg),
            SpeakerRole::Negative => (neg, aff),
        };
        let mut category_scores = BTreeMap::new();
        category_scores.insert(aff.to_string(), category_map(aff_score));
        category_scores.insert(neg.to_string(), category_map(neg_score));

        MatrixDebateResult {
            debate_index: index,
            affirmative_model: aff.to_string(),
            negative_model: neg.to_string(),
            winner_model: winner.to_string(),
            loser_model: loser.to_string(),
            winner_side,
            margin: 2.5,
            is_unanimous: false,
            aggregate_aff_total: aff_score * 5.0,
            aggregate_neg_total: neg_score * 5.0,
            category_scores,
            judge_names: vec!["Judge".to_string()],
            transcript_id: format!("t{}", index),
        }
    }

    fn names() -> Vec<String> {
        vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()]
    }

    #[test]
    fn test_records_split_by_side() {
        let results = vec![
            round(0, "Alpha", "Beta", SpeakerRole::Affirmative, 8.0, 6.0),
            round(1, "Beta", "Alpha", SpeakerRole::Negative, 6.0, 8.0),
            round(2, "Beta", "Gamma", SpeakerRole::Affirmative, 7.0, 6.0),
        ];

        let records = compute_records(&results, &names());

        // Alpha won once as affirmative, once as negative.
        assert_eq!(records["Alpha"].wins, 2);
        assert_eq!(records["Alpha"].aff_wins, 1);
        assert_eq!(records["Alpha"].neg_wins, 1);
        assert_eq!(records["Alpha"].losses, 0);

        // Beta lost as negative (round 0) and as affirmative (round 1),
        // then won as affirmative (round 2).
        assert_eq!(records["Beta"].wins, 1);
        assert_eq!(records["Beta"].aff_wins, 1);
        assert_eq!(records["Beta"].neg_losses, 1);
        assert_eq!(records["Beta"].aff_losses, 1);

        assert_eq!(records["Gamma"].losses, 1);
        assert_eq!(records["Gamma"].neg_losses, 1);
    }

    #[test]
    fn test_head_to_head_tallies_ordered_pairs() {
        let results = vec![
            round(0, "Alpha", "Beta", SpeakerRole::Affirmative, 8.0, 6.0),
            round(1, "Beta", "Alpha", SpeakerRole::Negative, 6.0, 8.0),
        ];

        let h2h = compute_head_to_head(&results, &names());

        // Alpha beat Beta twice.
        assert_eq!(h2h["Alpha"]["Beta"].a_wins, 2);
        assert_eq!(h2h["Alpha"]["Beta"].b_wins, 0);
        assert_eq!(h2h["Beta"]["Alpha"].a_wins, 0);
        assert_eq!(h2h["Beta"]["Alpha"].b_wins, 2);
        // Untouched pairs stay zeroed.
        assert_eq!(h2h["Alpha"]["Gamma"].a_wins, 0);
    }

    #[test]
    fn test_category_averages_once_per_round() {
        let results = vec![
            round(0, "Alpha", "Beta", SpeakerRole::Affirmative, 8.0, 6.0),
            round(1, "Beta", "Alpha", SpeakerRole::Negative, 4.0, 6.0),
        ];

        let averages = compute_category_averages(&results, &names());

        // Alpha scored 8.0 in round 0 and 6.0 in round 1.
        assert!((averages["Alpha"].argumentation - 7.0).abs() < 1e-9);
        assert!((averages["Alpha"].total() - 35.0).abs() < 1e-9);
        // Beta scored 6.0 and 4.0.
        assert!((averages["Beta"].persuasiveness - 5.0).abs() < 1e-9);
        // Gamma never debated.
        assert!((averages["Gamma"].total() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_stats_cover_all_models() {
        let results = vec![round(
            0,
            "Alpha",
            "Beta",
            SpeakerRole::Affirmative,
            8.0,
            6.0,
        )];
        let stats = compute_matrix_stats(&results, &names());

        assert_eq!(stats.records.len(), 3);
        assert_eq!(stats.category_averages.len(), 3);
        assert_eq!(stats.elo_ratings.len(), 3);
        assert_eq!(stats.head_to_head["Alpha"].len(), 2);
        assert!(stats.elo_ratings["Alpha"].rating > stats.elo_ratings["Beta"].rating);
    }
}
