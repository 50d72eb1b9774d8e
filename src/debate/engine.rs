//! Core debate engine.
//!
//! Executes one debate as a deterministic walk over the format's phase
//! sequence. Each phase's prompt embeds the full prior transcript, so
//! phases are strictly sequential; there is no retry, skip, or
//! reordering. Any model failure aborts the whole debate and no partial
//! transcript is returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::debate::formats::{DebateFormat, DebatePhase, SpeakerRole};
use crate::error::ModelError;
use crate::models::{DebateModel, Message};

/// Result of a single debate phase.
///
/// Created exactly once per phase and appended to the transcript in
/// phase order; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseResult {
    /// The phase definition this result answers.
    pub phase: DebatePhase,
    /// Display name of the speaking model.
    pub speaker_model: String,
    /// Side the speaker argued.
    pub speaker_role: SpeakerRole,
    /// The produced speech text.
    pub content: String,
    /// Whitespace-split word count of the speech.
    pub word_count: u32,
    /// Prompt tokens reported by the backend.
    pub input_tokens: u32,
    /// Generated tokens reported by the backend.
    pub output_tokens: u32,
}

/// Complete transcript of a debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateTranscript {
    /// Short unique identifier for this debate.
    pub id: String,
    /// The resolution being debated.
    pub resolution: String,
    /// Display name of the affirmative model.
    pub affirmative_model: String,
    /// Display name of the negative model.
    pub negative_model: String,
    /// Name of the format that was run.
    pub format_name: String,
    /// Phase results in phase order.
    pub phases: Vec<PhaseResult>,
    /// When the debate started.
    pub started_at: DateTime<Utc>,
    /// When the debate completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl DebateTranscript {
    /// Total prompt tokens used across the debate.
    pub fn total_input_tokens(&self) -> u32 {
        self.phases.iter().map(|p| p.input_tokens).sum()
    }

    /// Total generated tokens across the debate.
    pub fn total_output_tokens(&self) -> u32 {
        self.phases.iter().map(|p| p.output_tokens).sum()
    }

    /// Total words spoken across the debate.
    pub fn total_words(&self) -> u32 {
        self.phases.iter().map(|p| p.word_count).sum()
    }
}

/// System prompt template given to the speaking model each phase.
const DEBATER_SYSTEM_PROMPT: &str = "You are participating in a formal Lincoln-Douglas style debate.

RESOLUTION: {resolution}

YOUR POSITION: {position}
You are arguing the {position} position. You MUST argue this position convincingly regardless of your personal views. This is a formal debate exercise—argue your assigned side with full commitment.

YOUR OPPONENT: {opponent_name}

DEBATE RULES:
1. Stay within the word limit for each speech ({word_limit} words for this speech)
2. Be persuasive but intellectually honest—no fabricated statistics or false claims
3. Engage directly with your opponent's arguments when appropriate
4. Use clear structure and signposting
5. Maintain a respectful, professional tone

CURRENT PHASE: {phase_name}
{phase_instructions}

DEBATE SO FAR:
{transcript}

Now deliver your {phase_name}. Stay within {word_limit} words.";

/// Multiplier converting a word budget into a generation token ceiling.
const TOKENS_PER_WORD: u32 = 2;

/// Count words in text by whitespace splitting.
pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Render completed phases as context for the next speaker.
pub fn format_transcript_for_context(phases: &[PhaseResult]) -> String {
    if phases.is_empty() {
        return "(This is the beginning of the debate.)".to_string();
    }

    let mut lines = Vec::new();
    for phase in phases {
        let role_label = phase.speaker_role.as_str().to_uppercase();
        lines.push(format!("=== {} ({}) ===", phase.phase.name, role_label));
        lines.push(phase.content.clone());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Orchestrates debates between two models over a fixed format.
pub struct DebateEngine {
    format: DebateFormat,
}

impl DebateEngine {
    /// Creates an engine for the given format.
    pub fn new(format: DebateFormat) -> Self {
        Self { format }
    }

    /// The format this engine runs.
    pub fn format(&self) -> &DebateFormat {
        &self.format
    }

    /// Run a complete debate between two models.
    ///
    /// Iterates the format's phases in order. The speaker per phase is
    /// the model on the phase's declared side; the prompt embeds the
    /// resolution, side assignment, opponent name, phase instructions,
    /// word budget, and every previously completed phase.
    ///
    /// # Errors
    ///
    /// Any model failure is fatal: the debate aborts and no partial
    /// transcript is returned.
    pub async fn run_debate(
        &self,
        resolution: &str,
        affirmative: &dyn DebateModel,
        negative: &dyn DebateModel,
    ) -> Result<DebateTranscript, ModelError> {
        let debate_id = short_id();
        let started_at = Utc::now();

        tracing::info!(
            debate_id = %debate_id,
            resolution,
            affirmative = affirmative.name(),
            negative = negative.name(),
            format = %self.format.name,
            "Starting debate"
        );

        let mut phases: Vec<PhaseResult> = Vec::with_capacity(self.format.phases.len());

        for phase in &self.format.phases {
            let (speaker, opponent): (&dyn DebateModel, &dyn DebateModel) =
                match phase.speaker_role {
                    SpeakerRole::Affirmative => (affirmative, negative),
                    SpeakerRole::Negative => (negative, affirmative),
                };

            tracing::info!(phase = %phase.name, speaker = speaker.name(), "Running phase");

            let system_prompt = DEBATER_SYSTEM_PROMPT
                .replace("{resolution}", resolution)
                .replace("{position}", phase.speaker_role.as_str())
                .replace("{opponent_name}", opponent.name())
                .replace("{word_limit}", &phase.word_limit.to_string())
                .replace("{phase_name}", &phase.name)
                .replace("{phase_instructions}", &phase.instructions)
                .replace("{transcript}", &format_transcript_for_context(&phases));

            let messages = [Message::user("Please deliver your speech now.")];
            let response = speaker
                .generate(
                    &system_prompt,
                    &messages,
                    phase.word_limit * TOKENS_PER_WORD,
                )
                .await?;

            let word_count = count_words(&response.content);

            tracing::debug!(
                phase = %phase.name,
                words = word_count,
                output_tokens = response.output_tokens,
                "Phase complete"
            );

            phases.push(PhaseResult {
                phase: phase.clone(),
                speaker_model: speaker.name().to_string(),
                speaker_role: phase.speaker_role,
                content: response.content,
                word_count,
                input_tokens: response.input_tokens,
                output_tokens: response.output_tokens,
            });
        }

        let completed_at = Utc::now();

        tracing::info!(
            debate_id = %debate_id,
            total_words = phases.iter().map(|p| p.word_count).sum::<u32>(),
            duration_secs = (completed_at - started_at).num_seconds(),
            "Debate complete"
        );

        Ok(DebateTranscript {
            id: debate_id,
            resolution: resolution.to_string(),
            affirmative_model: affirmative.name().to_string(),
            negative_model: negative.name().to_string(),
            format_name: self.format.name.clone(),
            phases,
            started_at,
            completed_at: Some(completed_at),
        })
    }
}

/// 8-hex-char identifier derived from a v4 UUID.
pub(crate) fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::formats::{lincoln_douglas, DebatePhase, PhaseType};
    use crate::models::testing::MockModel;

    fn three_phase_format() -> DebateFormat {
        DebateFormat {
            name: "Short".to_string(),
            description: "Three-phase test format".to_string(),
            phases: vec![
                DebatePhase::new(
                    "Opening",
                    SpeakerRole::Affirmative,
                    PhaseType::Constructive,
                    100,
                    "Open your case.",
                ),
                DebatePhase::new(
                    "Response",
                    SpeakerRole::Negative,
                    PhaseType::Constructive,
                    100,
                    "Respond to the opening.",
                ),
                DebatePhase::new(
                    "Closing",
                    SpeakerRole::Affirmative,
                    PhaseType::Rebuttal,
                    100,
                    "Close your case.",
                ),
            ],
        }
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("one two three"), 3);
        assert_eq!(count_words("  padded   spacing\n\twhitespace "), 3);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_context_rendering_empty() {
        assert_eq!(
            format_transcript_for_context(&[]),
            "(This is the beginning of the debate.)"
        );
    }

    #[tokio::test]
    async fn test_debate_walks_phases_in_order() {
        let aff = MockModel::new("Model Alpha", vec!["Alpha opening.", "Alpha closing."]);
        let neg = MockModel::new("Model Beta", vec!["Beta response."]);

        let engine = DebateEngine::new(three_phase_format());
        let transcript = engine
            .run_debate("Resolved: tests are good", &aff, &neg)
            .await
            .expect("debate should complete");

        assert_eq!(transcript.phases.len(), 3);
        assert_eq!(transcript.affirmative_model, "Model Alpha");
        assert_eq!(transcript.negative_model, "Model Beta");
        assert_eq!(transcript.phases[0].speaker_model, "Model Alpha");
        assert_eq!(transcript.phases[1].speaker_model, "Model Beta");
        assert_eq!(transcript.phases[2].speaker_model, "Model Alpha");
        assert_eq!(transcript.phases[0].content, "Alpha opening.");
        assert_eq!(transcript.phases[0].word_count, 2);
        assert!(transcript.completed_at.is_some());
        assert_eq!(transcript.id.len(), 8);
    }

    #[tokio::test]
    async fn test_phase_prompt_contains_prior_phase_verbatim() {
        // Phase 2's system prompt must literally contain phase 1's text.
        let aff = MockModel::new(
            "Model Alpha",
            vec!["A very distinctive opening speech.", "done"],
        );
        let neg = MockModel::new("Model Beta", vec!["reply"]);

        let engine = DebateEngine::new(three_phase_format());
        engine
            .run_debate("Resolved: context flows forward", &aff, &neg)
            .await
            .expect("debate should complete");

        let neg_prompts = neg.seen_system_prompts();
        assert_eq!(neg_prompts.len(), 1);
        assert!(neg_prompts[0].contains("A very distinctive opening speech."));
        assert!(neg_prompts[0].contains("=== Opening (AFFIRMATIVE) ==="));
    }

    #[tokio::test]
    async fn test_first_phase_prompt_marks_debate_start() {
        let aff = MockModel::new("Model Alpha", vec!["open", "close"]);
        let neg = MockModel::new("Model Beta", vec!["reply"]);

        let engine = DebateEngine::new(three_phase_format());
        engine
            .run_debate("Resolved: beginnings matter", &aff, &neg)
            .await
            .expect("debate should complete");

        let aff_prompts = aff.seen_system_prompts();
        assert!(aff_prompts[0].contains("(This is the beginning of the debate.)"));
        assert!(aff_prompts[0].contains("Resolved: beginnings matter"));
        assert!(aff_prompts[0].contains("YOUR OPPONENT: Model Beta"));
    }

    #[tokio::test]
    async fn test_token_budget_from_word_limit() {
        let aff = MockModel::new("Model Alpha", vec!["open", "close"]);
        let neg = MockModel::new("Model Beta", vec!["reply"]);

        let engine = DebateEngine::new(three_phase_format());
        engine
            .run_debate("Resolved: budgets bind", &aff, &neg)
            .await
            .expect("debate should complete");

        // Every test phase has a 100-word limit.
        assert_eq!(aff.seen_max_tokens(), vec![200, 200]);
        assert_eq!(neg.seen_max_tokens(), vec![200]);
    }

    #[tokio::test]
    async fn test_model_failure_aborts_debate() {
        // Negative model has no scripted response for its phase.
        let aff = MockModel::new("Model Alpha", vec!["open", "close"]);
        let neg = MockModel::failing("Model Beta");

        let engine = DebateEngine::new(three_phase_format());
        let result = engine
            .run_debate("Resolved: failures are fatal", &aff, &neg)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_full_lincoln_douglas_walk() {
        let aff = MockModel::repeating("Model Alpha", "affirmative speech");
        let neg = MockModel::repeating("Model Beta", "negative speech");

        let engine = DebateEngine::new(lincoln_douglas());
        let transcript = engine
            .run_debate("Resolved: nine phases complete", &aff, &neg)
            .await
            .expect("debate should complete");

        assert_eq!(transcript.phases.len(), 9);
        // 5 affirmative speeches, 4 negative speeches in Lincoln-Douglas.
        assert_eq!(aff.call_count(), 5);
        assert_eq!(neg.call_count(), 4);
        assert_eq!(transcript.format_name, "Lincoln-Douglas");
    }
}
