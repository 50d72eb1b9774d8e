//! Judge panel: blind transcript rendering, verdict parsing, and the
//! concurrent fan-out over all judges.
//!
//! Judges never see model identities: the transcript they receive uses
//! side-only labels ("Debater A" / "Debater B") everywhere. All judges
//! for one debate run concurrently and the join is all-or-nothing: a
//! single judge failure fails the whole panel with no partial result.

use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::debate::engine::DebateTranscript;
use crate::debate::formats::SpeakerRole;
use crate::error::JudgeError;
use crate::judging::rubric::build_judge_system_prompt;
use crate::judging::scoring::{
    aggregate_scores, determine_winner, DebateResult, DebaterLabel, DebaterScores, JudgeDecision,
    ScoringCategory,
};
use crate::models::{DebateModel, Message};

/// Generation ceiling for a judge verdict.
const JUDGE_MAX_TOKENS: u32 = 2048;

/// Maximum characters of a raw response echoed in a parse error.
const PARSE_ERROR_EXCERPT_CHARS: usize = 500;

/// Render a debate transcript with model identities stripped.
///
/// Uses side labels only, so model display names never appear anywhere
/// in judge input.
pub fn format_blind_transcript(transcript: &DebateTranscript) -> String {
    let mut lines = vec![
        format!("RESOLUTION: {}", transcript.resolution),
        String::new(),
        "Debater A argues the AFFIRMATIVE position.".to_string(),
        "Debater B argues the NEGATIVE position.".to_string(),
        String::new(),
        "--- TRANSCRIPT ---".to_string(),
        String::new(),
    ];

    for phase in &transcript.phases {
        let label = match phase.speaker_role {
            SpeakerRole::Affirmative => "Debater A (AFFIRMATIVE)",
            SpeakerRole::Negative => "Debater B (NEGATIVE)",
        };
        lines.push(format!("=== {} — {} ===", phase.phase.name, label));
        lines.push(phase.content.clone());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Parse JSON from a judge's raw response with fallback strategies.
///
/// Tries, in order, stopping at the first success:
/// 1. Direct JSON parse of the whole text
/// 2. Contents of a fenced code block
/// 3. The substring from the first `{` to the last `}`
pub fn parse_judge_response(raw: &str) -> Result<Value, JudgeError> {
    // 1. Direct parse
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Ok(value);
    }

    // 2. Fenced code block
    if let Ok(fence) = Regex::new(r"(?s)```(?:json)?\s*\n(.*?)\n```") {
        if let Some(captures) = fence.captures(raw) {
            if let Some(inner) = captures.get(1) {
                if let Ok(value) = serde_json::from_str::<Value>(inner.as_str()) {
                    return Ok(value);
                }
            }
        }
    }

    // 3. Outermost braces
    if let (Some(first), Some(last)) = (raw.find('{'), raw.rfind('}')) {
        if last > first {
            if let Ok(value) = serde_json::from_str::<Value>(&raw[first..=last]) {
                return Ok(value);
            }
        }
    }

    Err(JudgeError::ParseError {
        excerpt: raw.chars().take(PARSE_ERROR_EXCERPT_CHARS).collect(),
    })
}

/// Extract one side's scores from the parsed verdict.
fn extract_scores(parsed: &Value, field: &str) -> Result<DebaterScores, JudgeError> {
    let obj = parsed
        .get(field)
        .ok_or_else(|| JudgeError::MissingField(field.to_string()))?;

    let score = |category: ScoringCategory| -> Result<u32, JudgeError> {
        let value = obj.get(category.as_str()).ok_or_else(|| {
            JudgeError::MissingField(format!("{}.{}", field, category.as_str()))
        })?;
        value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| JudgeError::InvalidScore {
                category: category.as_str().to_string(),
                value: value.to_string(),
            })
    };

    let scores = DebaterScores {
        argumentation: score(ScoringCategory::Argumentation)?,
        evidence: score(ScoringCategory::Evidence)?,
        clash: score(ScoringCategory::Clash)?,
        rebuttal: score(ScoringCategory::Rebuttal)?,
        persuasiveness: score(ScoringCategory::Persuasiveness)?,
    };
    scores.validate()?;
    Ok(scores)
}

/// Convert a parsed verdict into a validated [`JudgeDecision`].
pub fn extract_decision(
    parsed: &Value,
    judge: &dyn DebateModel,
    raw_response: &str,
    input_tokens: u32,
    output_tokens: u32,
) -> Result<JudgeDecision, JudgeError> {
    let scores_a = extract_scores(parsed, "debater_a_scores")?;
    let scores_b = extract_scores(parsed, "debater_b_scores")?;

    let winner_field = parsed
        .get("winner")
        .and_then(Value::as_str)
        .ok_or_else(|| JudgeError::MissingField("winner".to_string()))?;
    let winner = DebaterLabel::parse(winner_field)?;

    let reasoning = parsed
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    Ok(JudgeDecision {
        judge_name: judge.name().to_string(),
        judge_model_id: judge.model_id().to_string(),
        judge_provider: judge.provider().to_string(),
        scores_a,
        scores_b,
        winner,
        reasoning,
        raw_response: raw_response.to_string(),
        input_tokens,
        output_tokens,
    })
}

/// Runs a panel of judges against a finished debate.
///
/// The caller is responsible for ensuring no judge is also a debater in
/// the transcript being judged.
pub struct JudgePanel {
    judges: Vec<Arc<dyn DebateModel>>,
}

impl JudgePanel {
    /// Creates a panel from the given judges.
    pub fn new(judges: Vec<Arc<dyn DebateModel>>) -> Self {
        Self { judges }
    }

    /// Number of judges on the panel.
    pub fn len(&self) -> usize {
        self.judges.len()
    }

    /// True when the panel has no judges.
    pub fn is_empty(&self) -> bool {
        self.judges.is_empty()
    }

    async fn run_single_judge(
        &self,
        judge: &Arc<dyn DebateModel>,
        blind_transcript: &str,
        system_prompt: &str,
    ) -> Result<JudgeDecision, JudgeError> {
        tracing::info!(judge = judge.name(), "Judging");

        let messages = [Message::user(blind_transcript)];
        let response = judge
            .generate(system_prompt, &messages, JUDGE_MAX_TOKENS)
            .await?;

        let parsed = parse_judge_response(&response.content)?;
        let decision = extract_decision(
            &parsed,
            judge.as_ref(),
            &response.content,
            response.input_tokens,
            response.output_tokens,
        )?;

        tracing::info!(
            judge = judge.name(),
            pick = %decision.winner,
            total_a = decision.scores_a.total(),
            total_b = decision.scores_b.total(),
            "Judge decided"
        );

        Ok(decision)
    }

    /// Judge a debate with all panel members concurrently.
    ///
    /// Every judge receives the identical blinded transcript and the
    /// fixed rubric prompt. The result is available only once every
    /// judge has completed; any single failure fails the whole panel.
    pub async fn judge_debate(
        &self,
        transcript: &DebateTranscript,
    ) -> Result<DebateResult, JudgeError> {
        tracing::info!(debate_id = %transcript.id, judges = self.judges.len(), "Judging debate");

        let blind = format_blind_transcript(transcript);
        let system_prompt = build_judge_system_prompt();

        let decisions = futures::future::try_join_all(
            self.judges
                .iter()
                .map(|judge| self.run_single_judge(judge, &blind, &system_prompt)),
        )
        .await?;

        let aggregate_a = aggregate_scores(&decisions, DebaterLabel::A);
        let aggregate_b = aggregate_scores(&decisions, DebaterLabel::B);
        let (winner_label, margin) = determine_winner(&decisions, &aggregate_a, &aggregate_b);

        let winner_side = winner_label.side();
        let winner_model = match winner_side {
            SpeakerRole::Affirmative => transcript.affirmative_model.clone(),
            SpeakerRole::Negative => transcript.negative_model.clone(),
        };

        let result = DebateResult {
            debate_id: transcript.id.clone(),
            resolution: transcript.resolution.clone(),
            affirmative_model: transcript.affirmative_model.clone(),
            negative_model: transcript.negative_model.clone(),
            decisions,
            aggregate_a,
            aggregate_b,
            winner_side,
            winner_model,
            margin,
        };

        tracing::info!(
            winner = %result.winner_model,
            side = %result.winner_side,
            unanimous = result.is_unanimous(),
            margin = result.margin,
            "Panel decided"
        );

        Ok(result)
    }
}
