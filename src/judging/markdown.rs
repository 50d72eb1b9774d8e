//! Markdown rendering for judging results.
//!
//! Appended to a debate's transcript document by the caller.

use crate::judging::scoring::{DebateResult, ScoringCategory};

/// Render a judging result as a Markdown section.
pub fn result_to_markdown(result: &DebateResult) -> String {
    let mut lines = vec![
        String::new(),
        "---".to_string(),
        String::new(),
        "## Judging Results".to_string(),
        String::new(),
        format!(
            "**Winner: {}** ({})",
            result.winner_model, result.winner_side
        ),
        format!(
            "**Decision: {}**",
            if result.is_unanimous() {
                "Unanimous"
            } else {
                "Split"
            }
        ),
        format!("**Margin: {:.1} points**", result.margin),
        String::new(),
        "### Aggregate Scores".to_string(),
        String::new(),
        "| Category | Debater A (AFF) | Debater B (NEG) |".to_string(),
        "|----------|:-:|:-:|".to_string(),
    ];

    for category in ScoringCategory::ALL {
        let mut label = category.as_str().to_string();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        lines.push(format!(
            "| {} | {:.1} | {:.1} |",
            label,
            result.aggregate_a.get(category),
            result.aggregate_b.get(category)
        ));
    }

    lines.push(format!(
        "| **Total** | **{:.1}** | **{:.1}** |",
        result.aggregate_a.total(),
        result.aggregate_b.total()
    ));
    lines.push(String::new());

    lines.push("### Per-Judge Breakdown".to_string());
    lines.push(String::new());

    for decision in &result.decisions {
        lines.push(format!(
            "#### {} ({})",
            decision.judge_name, decision.judge_provider
        ));
        lines.push(format!("- **Pick:** Debater {}", decision.winner));
        lines.push(format!(
            "- **Scores A:** {} | Scores B: {}",
            decision.scores_a.total(),
            decision.scores_b.total()
        ));
        lines.push(format!("- **Reasoning:** {}", decision.reasoning));
        lines.push(String::new());
    }

    lines.join("\n")
}
