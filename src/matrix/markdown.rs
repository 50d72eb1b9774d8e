//! Markdown output for matrix tournament results and leaderboards.

use crate::matrix::types::{MatrixResult, MatrixStats};

/// Format a compact leaderboard table.
pub fn leaderboard_to_markdown(stats: &MatrixStats) -> String {
    let mut lines = vec![
        "## Leaderboard".to_string(),
        String::new(),
        "| Rank | Model | W-L | Win% | Aff% | Neg% | Elo |".to_string(),
        "|:----:|-------|:---:|:----:|:----:|:----:|:---:|".to_string(),
    ];

    let mut sorted: Vec<_> = stats.records.values().collect();
    sorted.sort_by(|a, b| {
        let elo_a = stats.elo_ratings.get(&a.model_name).map_or(0.0, |e| e.rating);
        let elo_b = stats.elo_ratings.get(&b.model_name).map_or(0.0, |e| e.rating);
        (b.win_rate(), b.wins, elo_b)
            .partial_cmp(&(a.win_rate(), a.wins, elo_a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (rank, record) in sorted.iter().enumerate() {
        let elo = stats
            .elo_ratings
            .get(&record.model_name)
            .map_or(0.0, |e| e.rating);
        lines.push(format!(
            "| {} | {} | {}-{} | {:.0}% | {:.0}% | {:.0}% | {:.0} |",
            rank + 1,
            record.model_name,
            record.wins,
            record.losses,
            record.win_rate() * 100.0,
            record.aff_win_rate() * 100.0,
            record.neg_win_rate() * 100.0,
            elo
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Format an NxN head-to-head grid.
fn head_to_head_grid(result: &MatrixResult) -> String {
    let names = &result.model_names;
    let h2h = &result.stats.head_to_head;
    let mut lines = vec![
        "## Head-to-Head".to_string(),
        String::new(),
        "Wins by row model against column model:".to_string(),
        String::new(),
    ];

    lines.push(format!("| | {} |", names.join(" | ")));
    lines.push(format!(
        "|---|{}|",
        names.iter().map(|_| ":---:").collect::<Vec<_>>().join("|")
    ));

    for row_name in names {
        let cells: Vec<String> = names
            .iter()
            .map(|col_name| {
                if row_name == col_name {
                    "-".to_string()
                } else {
                    h2h.get(row_name)
                        .and_then(|row| row.get(col_name))
                        .map_or("0".to_string(), |record| record.a_wins.to_string())
                }
            })
            .collect();
        lines.push(format!("| {} | {} |", row_name, cells.join(" | ")));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Format per-model category averages.
fn category_averages_table(result: &MatrixResult) -> String {
    let mut lines = vec![
        "## Category Averages".to_string(),
        String::new(),
        "| Model | Arg | Evi | Clash | Reb | Pers | Total |".to_string(),
        "|-------|:---:|:---:|:-----:|:---:|:----:|:-----:|".to_string(),
    ];

    let mut sorted: Vec<_> = result.stats.category_averages.values().collect();
    sorted.sort_by(|a, b| {
        b.total()
            .partial_cmp(&a.total())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for averages in sorted {
        lines.push(format!(
            "| {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} |",
            averages.model_name,
            averages.argumentation,
            averages.evidence,
            averages.clash,
            averages.rebuttal,
            averages.persuasiveness,
            averages.total()
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Format Elo ratings with delta from the starting value.
fn elo_ratings_section(result: &MatrixResult) -> String {
    let mut lines = vec![
        "## Elo Ratings".to_string(),
        String::new(),
        "| Model | Rating | Delta | Games |".to_string(),
        "|-------|:------:|:-----:|:-----:|".to_string(),
    ];

    let mut sorted: Vec<_> = result.stats.elo_ratings.values().collect();
    sorted.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for elo in sorted {
        let delta = elo.rating - crate::matrix::elo::DEFAULT_RATING;
        let sign = if delta >= 0.0 { "+" } else { "" };
        lines.push(format!(
            "| {} | {:.0} | {}{:.0} | {} |",
            elo.model_name, elo.rating, sign, delta, elo.games_played
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Format per-debate summaries.
fn debate_summaries(result: &MatrixResult) -> String {
    let mut lines = vec!["## Debate Summaries".to_string(), String::new()];

    for dr in &result.debate_results {
        let decision = if dr.is_unanimous { "Unanimous" } else { "Split" };
        lines.push(format!(
            "### Debate {}: {} (AFF) vs {} (NEG)",
            dr.debate_index + 1,
            dr.affirmative_model,
            dr.negative_model
        ));
        lines.push(format!(
            "- **Winner:** {} ({})",
            dr.winner_model, dr.winner_side
        ));
        lines.push(format!(
            "- **Decision:** {} | Margin: {:.1}",
            decision, dr.margin
        ));
        lines.push(format!(
            "- **Scores:** AFF {:.1} — NEG {:.1}",
            dr.aggregate_aff_total, dr.aggregate_neg_total
        ));
        lines.push(format!("- **Judges:** {}", dr.judge_names.join(", ")));
        lines.push(format!("- **Transcript:** `debate-{}.md`", dr.transcript_id));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Format complete matrix tournament results as Markdown.
pub fn matrix_to_markdown(result: &MatrixResult) -> String {
    let duration = result.duration_seconds();
    let minutes = (duration / 60.0) as u64;
    let seconds = (duration % 60.0) as u64;

    let header = vec![
        "# Matrix Tournament Results".to_string(),
        String::new(),
        format!("**Resolution:** {}", result.resolution),
        format!("**Date:** {}", result.started_at.format("%Y-%m-%d %H:%M UTC")),
        format!("**Models:** {}", result.model_names.join(", ")),
        format!("**Total Debates:** {}", result.total_debates),
        format!("**Duration:** {}m {}s", minutes, seconds),
        String::new(),
    ];

    let sections = [
        leaderboard_to_markdown(&result.stats),
        head_to_head_grid(result),
        category_averages_table(result),
        elo_ratings_section(result),
        debate_summaries(result),
    ];

    header.join("\n") + &sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::formats::SpeakerRole;
    use crate::matrix::stats::compute_matrix_stats;
    use crate::matrix::types::MatrixDebateResult;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn sample_result() -> MatrixResult {
        let names = vec!["Alpha".to_string(), "Beta".to_string()];
        let mut category_scores = BTreeMap::new();
        for (model, value) in [("Alpha", 8.0), ("Beta", 6.0)] {
            category_scores.insert(
                model.to_string(),
                crate::judging::scoring::ScoringCategory::ALL
                    .iter()
                    .map(|c| (c.as_str().to_string(), value))
                    .collect(),
            );
        }

        let debate_results = vec![MatrixDebateResult {
            debate_index: 0,
            affirmative_model: "Alpha".to_string(),
            negative_model: "Beta".to_string(),
            winner_model: "Alpha".to_string(),
            loser_model: "Beta".to_string(),
            winner_side: SpeakerRole::Affirmative,
            margin: 10.0,
            is_unanimous: true,
            aggregate_aff_total: 40.0,
            aggregate_neg_total: 30.0,
            category_scores,
            judge_names: vec!["Gamma".to_string()],
            transcript_id: "abcd1234".to_string(),
        }];

        let stats = compute_matrix_stats(&debate_results, &names);
        MatrixResult {
            id: "t1".to_string(),
            resolution: "Resolved: tables render".to_string(),
            model_names: names,
            total_debates: 1,
            debate_results,
            stats,
            started_at: Utc::now(),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_matrix_markdown_sections() {
        let md = matrix_to_markdown(&sample_result());

        assert!(md.contains("# Matrix Tournament Results"));
        assert!(md.contains("## Leaderboard"));
        assert!(md.contains("## Head-to-Head"));
        assert!(md.contains("## Category Averages"));
        assert!(md.contains("## Elo Ratings"));
        assert!(md.contains("### Debate 1: Alpha (AFF) vs Beta (NEG)"));
        assert!(md.contains("- **Transcript:** `debate-abcd1234.md`"));
    }

    #[test]
    fn test_leaderboard_ranks_winner_first() {
        let result = sample_result();
        let md = leaderboard_to_markdown(&result.stats);
        let alpha_pos = md.find("| 1 | Alpha").expect("Alpha ranked first");
        let beta_pos = md.find("| 2 | Beta").expect("Beta ranked second");
        assert!(alpha_pos < beta_pos);
    }
}
