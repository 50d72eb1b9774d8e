//! Data types for matrix debate tournaments.
//!
//! `MatrixDebateResult` is a flattened, serialization-friendly summary
//! of one completed round: strings and numbers only, no embedded engine
//! objects. Full transcripts are retained separately by the runner.
//! All statistics types are pure derivations, recomputable at any time
//! from the ordered result sequence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::debate::formats::SpeakerRole;

/// A scheduled debate within a matrix tournament. Pure plan data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixDebateEntry {
    /// Model debating as affirmative.
    pub affirmative_name: String,
    /// Model debating as negative.
    pub negative_name: String,
    /// Every non-debating model, serving as judges.
    pub judge_names: Vec<String>,
    /// Position in the schedule, strictly increasing from 0.
    pub debate_index: usize,
}

/// Flattened summary of a single completed round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixDebateResult {
    /// Position in the schedule.
    pub debate_index: usize,
    /// Model that argued affirmative.
    pub affirmative_model: String,
    /// Model that argued negative.
    pub negative_model: String,
    /// Winning model's display name.
    pub winner_model: String,
    /// Losing model's display name.
    pub loser_model: String,
    /// Side the winner argued.
    pub winner_side: SpeakerRole,
    /// Margin on the quantity that decided the round.
    pub margin: f64,
    /// True when every judge picked the same winner.
    pub is_unanimous: bool,
    /// Aggregate total for the affirmative.
    pub aggregate_aff_total: f64,
    /// Aggregate total for the negative.
    pub aggregate_neg_total: f64,
    /// Per-category aggregate scores keyed by model name.
    pub category_scores: BTreeMap<String, BTreeMap<String, f64>>,
    /// Judges that scored this round.
    pub judge_names: Vec<String>,
    /// Identifier of the full transcript saved separately.
    pub transcript_id: String,
}

/// Win/loss record for a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelRecord {
    pub model_name: String,
    pub wins: u32,
    pub losses: u32,
    pub aff_wins: u32,
    pub aff_losses: u32,
    pub neg_wins: u32,
    pub neg_losses: u32,
}

impl ModelRecord {
    /// Record with zeroed tallies for the given model.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Self::default()
        }
    }

    /// Total games played.
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Overall win rate, 0.0 when no games were played.
    pub fn win_rate(&self) -> f64 {
        if self.total_games() > 0 {
            self.wins as f64 / self.total_games() as f64
        } else {
            0.0
        }
    }

    /// Win rate when debating as affirmative.
    pub fn aff_win_rate(&self) -> f64 {
        let aff_total = self.aff_wins + self.aff_losses;
        if aff_total > 0 {
            self.aff_wins as f64 / aff_total as f64
        } else {
            0.0
        }
    }

    /// Win rate when debating as negative.
    pub fn neg_win_rate(&self) -> f64 {
        let neg_total = self.neg_wins + self.neg_losses;
        if neg_total > 0 {
            self.neg_wins as f64 / neg_total as f64
        } else {
            0.0
        }
    }
}

/// Head-to-head record between one ordered pair of models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadToHead {
    pub model_a: String,
    pub model_b: String,
    pub a_wins: u32,
    pub b_wins: u32,
}

impl HeadToHead {
    /// Zeroed record for the given pair.
    pub fn new(model_a: impl Into<String>, model_b: impl Into<String>) -> Self {
        Self {
            model_a: model_a.into(),
            model_b: model_b.into(),
            a_wins: 0,
            b_wins: 0,
        }
    }

    /// Win rate of the first model against the second.
    pub fn a_win_rate(&self) -> f64 {
        let total = self.a_wins + self.b_wins;
        if total > 0 {
            self.a_wins as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Average scores per scoring category for a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryAverages {
    pub model_name: String,
    pub argumentation: f64,
    pub evidence: f64,
    pub clash: f64,
    pub rebuttal: f64,
    pub persuasiveness: f64,
}

impl CategoryAverages {
    /// Zeroed averages for the given model.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Self::default()
        }
    }

    /// Sum of all five category averages.
    pub fn total(&self) -> f64 {
        self.argumentation + self.evidence + self.clash + self.rebuttal + self.persuasiveness
    }
}

/// Elo rating for a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloRating {
    pub model_name: String,
    pub rating: f64,
    pub games_played: u32,
    /// Every rating this model has held, starting at the initial value.
    pub rating_history: Vec<f64>,
}

impl EloRating {
    /// Fresh rating at the starting value.
    pub fn new(model_name: impl Into<String>, initial_rating: f64) -> Self {
        Self {
            model_name: model_name.into(),
            rating: initial_rating,
            games_played: 0,
            rating_history: vec![initial_rating],
        }
    }
}

/// Aggregated statistics for a matrix tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixStats {
    /// Win/loss records keyed by model name.
    pub records: BTreeMap<String, ModelRecord>,
    /// Head-to-head records keyed by (row model, column model).
    pub head_to_head: BTreeMap<String, BTreeMap<String, HeadToHead>>,
    /// Category averages keyed by model name.
    pub category_averages: BTreeMap<String, CategoryAverages>,
    /// Elo ratings keyed by model name.
    pub elo_ratings: BTreeMap<String, EloRating>,
}

/// Complete results of a matrix tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixResult {
    /// Short unique identifier for this tournament.
    pub id: String,
    /// The debated resolution.
    pub resolution: String,
    /// Participating model names in roster order.
    pub model_names: Vec<String>,
    /// Number of completed debates.
    pub total_debates: usize,
    /// Flattened round records in schedule order.
    pub debate_results: Vec<MatrixDebateResult>,
    /// Derived statistics.
    pub stats: MatrixStats,
    /// When the tournament started.
    pub started_at: DateTime<Utc>,
    /// When the tournament completed.
    pub completed_at: DateTime<Utc>,
}

impl MatrixResult {
    /// Wall-clock duration of the tournament in seconds.
    pub fn duration_seconds(&self) -> f64 {
        (self.completed_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}
