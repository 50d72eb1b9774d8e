//! Scoring types, aggregation, and winner determination.

use serde::{Deserialize, Serialize};

use crate::debate::formats::SpeakerRole;
use crate::error::JudgeError;

/// Categories used for scoring debates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringCategory {
    Argumentation,
    Evidence,
    Clash,
    Rebuttal,
    Persuasiveness,
}

impl ScoringCategory {
    /// All categories in rubric order.
    pub const ALL: [ScoringCategory; 5] = [
        Self::Argumentation,
        Self::Evidence,
        Self::Clash,
        Self::Rebuttal,
        Self::Persuasiveness,
    ];

    /// Lowercase label used in prompts and serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Argumentation => "argumentation",
            Self::Evidence => "evidence",
            Self::Clash => "clash",
            Self::Rebuttal => "rebuttal",
            Self::Persuasiveness => "persuasiveness",
        }
    }
}

impl std::fmt::Display for ScoringCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side label used in blind judging ("Debater A" / "Debater B").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebaterLabel {
    A,
    B,
}

impl DebaterLabel {
    /// Parse a winner declaration, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, JudgeError> {
        match value.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(JudgeError::InvalidWinner(value.to_string())),
        }
    }

    /// The debate side this label corresponds to.
    pub fn side(&self) -> SpeakerRole {
        match self {
            Self::A => SpeakerRole::Affirmative,
            Self::B => SpeakerRole::Negative,
        }
    }
}

impl std::fmt::Display for DebaterLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Scores for a single debater from a single judge.
///
/// Each category is an integer constrained to [1, 10]; the constraint
/// is enforced by [`DebaterScores::validate`] before any aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebaterScores {
    pub argumentation: u32,
    pub evidence: u32,
    pub clash: u32,
    pub rebuttal: u32,
    pub persuasiveness: u32,
}

impl DebaterScores {
    /// Score for one category.
    pub fn get(&self, category: ScoringCategory) -> u32 {
        match category {
            ScoringCategory::Argumentation => self.argumentation,
            ScoringCategory::Evidence => self.evidence,
            ScoringCategory::Clash => self.clash,
            ScoringCategory::Rebuttal => self.rebuttal,
            ScoringCategory::Persuasiveness => self.persuasiveness,
        }
    }

    /// Sum of all five category scores. Range [5, 50] for valid scores.
    pub fn total(&self) -> u32 {
        ScoringCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Check every category is within [1, 10].
    pub fn validate(&self) -> Result<(), JudgeError> {
        for category in ScoringCategory::ALL {
            let value = self.get(category);
            if !(1..=10).contains(&value) {
                return Err(JudgeError::InvalidScore {
                    category: category.as_str().to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A single judge's decision for a debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeDecision {
    /// Display name of the judging model.
    pub judge_name: String,
    /// API model identifier of the judge.
    pub judge_model_id: String,
    /// Provider label of the judge.
    pub judge_provider: String,
    /// Scores for Debater A (affirmative).
    pub scores_a: DebaterScores,
    /// Scores for Debater B (negative).
    pub scores_b: DebaterScores,
    /// Declared winner.
    pub winner: DebaterLabel,
    /// Free-text reasoning from the judge.
    pub reasoning: String,
    /// The judge's unmodified raw response.
    pub raw_response: String,
    /// Prompt tokens reported by the backend.
    pub input_tokens: u32,
    /// Generated tokens reported by the backend.
    pub output_tokens: u32,
}

/// Averaged scores across multiple judges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateScores {
    pub argumentation: f64,
    pub evidence: f64,
    pub clash: f64,
    pub rebuttal: f64,
    pub persuasiveness: f64,
}

impl AggregateScores {
    /// Aggregate value for one category.
    pub fn get(&self, category: ScoringCategory) -> f64 {
        match category {
            ScoringCategory::Argumentation => self.argumentation,
            ScoringCategory::Evidence => self.evidence,
            ScoringCategory::Clash => self.clash,
            ScoringCategory::Rebuttal => self.rebuttal,
            ScoringCategory::Persuasiveness => self.persuasiveness,
        }
    }

    /// Sum of all five category averages.
    pub fn total(&self) -> f64 {
        ScoringCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Complete judging result for a debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateResult {
    /// Transcript identifier this result belongs to.
    pub debate_id: String,
    /// The debated resolution.
    pub resolution: String,
    /// Display name of the affirmative model.
    pub affirmative_model: String,
    /// Display name of the negative model.
    pub negative_model: String,
    /// Every judge's decision.
    pub decisions: Vec<JudgeDecision>,
    /// Averaged scores for Debater A.
    pub aggregate_a: AggregateScores,
    /// Averaged scores for Debater B.
    pub aggregate_b: AggregateScores,
    /// The winning side.
    pub winner_side: SpeakerRole,
    /// Display name of the winning model.
    pub winner_model: String,
    /// Absolute difference on the quantity that decided the winner.
    pub margin: f64,
}

impl DebateResult {
    /// True when every judge picked the same winner.
    pub fn is_unanimous(&self) -> bool {
        match self.decisions.first() {
            None => true,
            Some(first) => self.decisions.iter().all(|d| d.winner == first.winner),
        }
    }
}

/// Average scores across judges for one side.
pub fn aggregate_scores(decisions: &[JudgeDecision], side: DebaterLabel) -> AggregateScores {
    if decisions.is_empty() {
        return AggregateScores {
            argumentation: 0.0,
            evidence: 0.0,
            clash: 0.0,
            rebuttal: 0.0,
            persuasiveness: 0.0,
        };
    }

    let n = decisions.len() as f64;
    let sum = |category: ScoringCategory| -> f64 {
        decisions
            .iter()
            .map(|d| {
                let scores = match side {
                    DebaterLabel::A => &d.scores_a,
                    DebaterLabel::B => &d.scores_b,
                };
                scores.get(category) as f64
            })
            .sum::<f64>()
    };

    AggregateScores {
        argumentation: sum(ScoringCategory::Argumentation) / n,
        evidence: sum(ScoringCategory::Evidence) / n,
        clash: sum(ScoringCategory::Clash) / n,
        rebuttal: sum(ScoringCategory::Rebuttal) / n,
        persuasiveness: sum(ScoringCategory::Persuasiveness) / n,
    }
}

/// Determine the winner with deterministic tie-breaking.
///
/// Rules applied in order until one discriminates:
/// 1. Majority of individual judge picks (margin: aggregate totals).
/// 2. Higher aggregate total (margin: aggregate totals).
/// 3. Higher aggregate persuasiveness (margin: persuasiveness).
/// 4. Affirmative wins, margin 0.
pub fn determine_winner(
    decisions: &[JudgeDecision],
    aggregate_a: &AggregateScores,
    aggregate_b: &AggregateScores,
) -> (DebaterLabel, f64) {
    let a_picks = decisions
        .iter()
        .filter(|d| d.winner == DebaterLabel::A)
        .count();
    let b_picks = decisions.len() - a_picks;

    // 1. Majority picks
    if a_picks != b_picks {
        let winner = if a_picks > b_picks {
            DebaterLabel::A
        } else {
            DebaterLabel::B
        };
        let margin = (aggregate_a.total() - aggregate_b.total()).abs();
        return (winner, margin);
    }

    // 2. Higher aggregate total
    if aggregate_a.total() != aggregate_b.total() {
        let winner = if aggregate_a.total() > aggregate_b.total() {
            DebaterLabel::A
        } else {
            DebaterLabel::B
        };
        let margin = (aggregate_a.total() - aggregate_b.total()).abs();
        return (winner, margin);
    }

    // 3. Higher persuasiveness
    if aggregate_a.persuasiveness != aggregate_b.persuasiveness {
        let winner = if aggregate_a.persuasiveness > aggregate_b.persuasiveness {
            DebaterLabel::A
        } else {
            DebaterLabel::B
        };
        let margin = (aggregate_a.persuasiveness - aggregate_b.persuasiveness).abs();
        return (winner, margin);
    }

    // 4. Affirmative wins
    (DebaterLabel::A, 0.0)
}
