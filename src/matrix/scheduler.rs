//! Round-robin schedule generation for matrix tournaments.

use serde::{Deserialize, Serialize};

use crate::matrix::types::MatrixDebateEntry;

/// Build a full round-robin schedule where every model debates every
/// other model once as affirmative.
///
/// For each ordered pair (A, B) with A != B, A debates as affirmative
/// against B as negative, and every remaining model serves as a judge.
/// Indices increase in iteration order (outer loop over affirmative,
/// inner loop over negative). For N models: N * (N - 1) debates, each
/// with N - 2 judges.
pub fn build_matrix_schedule(models: &[String]) -> Vec<MatrixDebateEntry> {
    let mut schedule = Vec::with_capacity(models.len().saturating_mul(models.len().saturating_sub(1)));
    let mut index = 0;

    for aff in models {
        for neg in models {
            if aff == neg {
                continue;
            }
            let judges = models
                .iter()
                .filter(|m| *m != aff && *m != neg)
                .cloned()
                .collect();
            schedule.push(MatrixDebateEntry {
                affirmative_name: aff.clone(),
                negative_name: neg.clone(),
                judge_names: judges,
                debate_index: index,
            });
            index += 1;
        }
    }

    schedule
}

/// Token-cost projection for a matrix tournament. Pure arithmetic,
/// no I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCostEstimate {
    pub total_debates: usize,
    pub judges_per_debate: usize,
    pub estimated_debate_tokens: u64,
    pub estimated_judge_tokens: u64,
    pub estimated_total_tokens: u64,
}

/// Default token assumption for one full debate.
pub const DEFAULT_TOKENS_PER_DEBATE: u64 = 40_000;

/// Default token assumption for one judge pass.
pub const DEFAULT_TOKENS_PER_JUDGE: u64 = 8_000;

/// Estimate token cost for a matrix tournament of `num_models` models.
pub fn estimate_matrix_cost(
    num_models: usize,
    avg_tokens_per_debate: u64,
    avg_tokens_per_judge: u64,
) -> MatrixCostEstimate {
    let total_debates = num_models * num_models.saturating_sub(1);
    let judges_per_debate = num_models.saturating_sub(2);

    let debate_tokens = total_debates as u64 * avg_tokens_per_debate;
    let judge_tokens = total_debates as u64 * judges_per_debate as u64 * avg_tokens_per_judge;

    MatrixCostEstimate {
        total_debates,
        judges_per_debate,
        estimated_debate_tokens: debate_tokens,
        estimated_judge_tokens: judge_tokens,
        estimated_total_tokens: debate_tokens + judge_tokens,
    }
}
