//! Matrix tournament runner.
//!
//! Executes schedule entries strictly sequentially, never overlapping,
//! so no model is ever debating and judging at the same time and
//! external rate limits shared by all models are respected. Judges
//! within a round still fan out concurrently via [`JudgePanel`].
//!
//! The per-round completion callback is the sole checkpoint mechanism:
//! a caller can persist each round's artifacts immediately, bounding
//! loss on a later failure to the in-flight round.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;

use crate::debate::engine::{short_id, DebateEngine, DebateTranscript};
use crate::debate::formats::{DebateFormat, SpeakerRole};
use crate::error::MatrixError;
use crate::judging::panel::JudgePanel;
use crate::judging::scoring::{AggregateScores, DebateResult, ScoringCategory};
use crate::matrix::stats::compute_matrix_stats;
use crate::matrix::types::{MatrixDebateEntry, MatrixDebateResult, MatrixResult};
use crate::models::DebateModel;

/// Callback invoked synchronously after each round completes, with the
/// schedule index, the flattened record, and the full
/// (transcript, verdict) pair.
pub type DebateCompleteCallback =
    Box<dyn Fn(usize, &MatrixDebateResult, &DebateTranscript, &DebateResult) + Send + Sync>;

/// Extract category aggregates into a flat map keyed by model name.
fn build_category_scores(
    aff_model: &str,
    neg_model: &str,
    aggregate_a: &AggregateScores,
    aggregate_b: &AggregateScores,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let flatten = |agg: &AggregateScores| -> BTreeMap<String, f64> {
        ScoringCategory::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), agg.get(*c)))
            .collect()
    };

    let mut scores = BTreeMap::new();
    scores.insert(aff_model.to_string(), flatten(aggregate_a));
    scores.insert(neg_model.to_string(), flatten(aggregate_b));
    scores
}

/// Orchestrates a full round-robin matrix tournament.
pub struct MatrixRunner {
    model_names: Vec<String>,
    models: HashMap<String, Arc<dyn DebateModel>>,
    engine: DebateEngine,
    on_debate_complete: Option<DebateCompleteCallback>,
    full_results: Vec<(DebateTranscript, DebateResult)>,
}

impl std::fmt::Debug for MatrixRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixRunner")
            .field("model_names", &self.model_names)
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .field(
                "on_debate_complete",
                &self.on_debate_complete.as_ref().map(|_| "<callback>"),
            )
            .field("full_results_len", &self.full_results.len())
            .finish()
    }
}

impl MatrixRunner {
    /// Creates a runner over the given roster.
    ///
    /// Roster order is preserved for schedule building and reporting.
    ///
    /// # Errors
    ///
    /// Fails when names are not unique or fewer than 2 models are given.
    pub fn new(
        models: Vec<(String, Arc<dyn DebateModel>)>,
        format: DebateFormat,
    ) -> Result<Self, MatrixError> {
        let names: Vec<String> = models.iter().map(|(name, _)| name.clone()).collect();
        let unique: HashSet<&String> = names.iter().collect();
        if unique.len() != names.len() {
            return Err(MatrixError::DuplicateModelName);
        }
        if names.len() < 2 {
            return Err(MatrixError::NotEnoughModels(names.len()));
        }

        Ok(Self {
            model_names: names,
            models: models.into_iter().collect(),
            engine: DebateEngine::new(format),
            on_debate_complete: None,
            full_results: Vec::new(),
        })
    }

    /// Sets the per-round completion callback.
    pub fn with_on_debate_complete(mut self, callback: DebateCompleteCallback) -> Self {
        self.on_debate_complete = Some(callback);
        self
    }

    /// Roster names in registration order.
    pub fn model_names(&self) -> &[String] {
        &self.model_names
    }

    /// Full (transcript, verdict) pairs for the rounds run by the last
    /// `run_matrix` call, for external archival.
    pub fn full_results(&self) -> &[(DebateTranscript, DebateResult)] {
        &self.full_results
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn DebateModel>, MatrixError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| MatrixError::UnknownModel(name.to_string()))
    }

    /// Run all debates in the schedule sequentially.
    pub async fn run_matrix(
        &mut self,
        resolution: &str,
        schedule: &[MatrixDebateEntry],
    ) -> Result<MatrixResult, MatrixError> {
        self.run_matrix_resuming(resolution, schedule, Vec::new())
            .await
    }

    /// Run a schedule, skipping a previously completed prefix.
    ///
    /// `completed` holds flattened results persisted by an earlier run
    /// (via the completion callback); execution restarts at the first
    /// schedule entry without one. Statistics are recomputed from the
    /// full record sequence, so a resumed tournament is
    /// indistinguishable from an uninterrupted one.
    pub async fn run_matrix_resuming(
        &mut self,
        resolution: &str,
        schedule: &[MatrixDebateEntry],
        completed: Vec<MatrixDebateResult>,
    ) -> Result<MatrixResult, MatrixError> {
        let started_at = Utc::now();
        let mut debate_results = completed;
        let skip = debate_results.len();
        self.full_results.clear();

        if skip > 0 {
            tracing::info!(completed = skip, "Resuming matrix from checkpoint");
        }

        for entry in schedule.iter().skip(skip) {
            tracing::info!(
                debate = entry.debate_index + 1,
                total = schedule.len(),
                affirmative = %entry.affirmative_name,
                negative = %entry.negative_name,
                judges = ?entry.judge_names,
                "Matrix debate"
            );

            let affirmative = self.lookup(&entry.affirmative_name)?;
            let negative = self.lookup(&entry.negative_name)?;
            let judges = entry
                .judge_names
                .iter()
                .map(|name| self.lookup(name))
                .collect::<Result<Vec<_>, _>>()?;

            // Run the debate, then judge it (concurrent within the panel).
            let transcript = self
                .engine
                .run_debate(resolution, affirmative.as_ref(), negative.as_ref())
                .await?;

            let panel = JudgePanel::new(judges);
            let result = panel.judge_debate(&transcript).await?;

            let loser = match result.winner_side {
                SpeakerRole::Affirmative => transcript.negative_model.clone(),
                SpeakerRole::Negative => transcript.affirmative_model.clone(),
            };

            let matrix_result = MatrixDebateResult {
                debate_index: entry.debate_index,
                affirmative_model: transcript.affirmative_model.clone(),
                negative_model: transcript.negative_model.clone(),
                winner_model: result.winner_model.clone(),
                loser_model: loser,
                winner_side: result.winner_side,
                margin: result.margin,
                is_unanimous: result.is_unanimous(),
                aggregate_aff_total: result.aggregate_a.total(),
                aggregate_neg_total: result.aggregate_b.total(),
                category_scores: build_category_scores(
                    &transcript.affirmative_model,
                    &transcript.negative_model,
                    &result.aggregate_a,
                    &result.aggregate_b,
                ),
                judge_names: result.decisions.iter().map(|d| d.judge_name.clone()).collect(),
                transcript_id: transcript.id.clone(),
            };

            tracing::info!(
                debate = entry.debate_index + 1,
                winner = %matrix_result.winner_model,
                "Debate decided"
            );

            if let Some(callback) = &self.on_debate_complete {
                callback(entry.debate_index, &matrix_result, &transcript, &result);
            }

            self.full_results.push((transcript, result));
            debate_results.push(matrix_result);
        }

        let completed_at = Utc::now();
        let stats = compute_matrix_stats(&debate_results, &self.model_names);

        Ok(MatrixResult {
            id: short_id(),
            resolution: resolution.to_string(),
            model_names: self.model_names.clone(),
            total_debates: debate_results.len(),
            debate_results,
            stats,
            started_at,
            completed_at,
        })
    }
}
