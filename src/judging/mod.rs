//! Blind judging: rubric, verdict parsing, scoring, and the panel.

pub mod markdown;
pub mod panel;
pub mod rubric;
pub mod scoring;

pub use markdown::result_to_markdown;
pub use panel::{format_blind_transcript, parse_judge_response, JudgePanel};
pub use rubric::build_judge_system_prompt;
pub use scoring::{
    aggregate_scores, determine_winner, AggregateScores, DebateResult, DebaterLabel,
    DebaterScores, JudgeDecision, ScoringCategory,
};
