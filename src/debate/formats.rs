//! Debate format definitions.
//!
//! A format is pure data: an ordered, non-empty sequence of phases that
//! the engine walks without branching. Formats are constructed
//! explicitly and passed at engine construction; there are no mutable
//! module-level defaults.

use serde::{Deserialize, Serialize};

/// Side of the speaker in a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    Affirmative,
    Negative,
}

impl SpeakerRole {
    /// The opposing side.
    pub fn opponent(&self) -> Self {
        match self {
            Self::Affirmative => Self::Negative,
            Self::Negative => Self::Affirmative,
        }
    }

    /// Lowercase label used in prompts and records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Affirmative => "affirmative",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type of debate phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseType {
    Constructive,
    CrossExam,
    Rebuttal,
}

/// Definition of a single phase in a debate format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebatePhase {
    /// Phase name shown in transcripts (e.g., "Affirmative Constructive").
    pub name: String,
    /// Which side speaks in this phase.
    pub speaker_role: SpeakerRole,
    /// Kind of speech this phase calls for.
    pub phase_type: PhaseType,
    /// Word budget for the speech.
    pub word_limit: u32,
    /// Free-text instructions embedded in the speaker's prompt.
    pub instructions: String,
}

impl DebatePhase {
    /// Creates a new phase definition.
    pub fn new(
        name: impl Into<String>,
        speaker_role: SpeakerRole,
        phase_type: PhaseType,
        word_limit: u32,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            speaker_role,
            phase_type,
            word_limit,
            instructions: instructions.into(),
        }
    }
}

/// A complete debate format definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateFormat {
    /// Format name (e.g., "Lincoln-Douglas").
    pub name: String,
    /// One-line description of the format.
    pub description: String,
    /// Ordered phase sequence. Never empty.
    pub phases: Vec<DebatePhase>,
}

impl DebateFormat {
    /// Total word budget across all phases.
    pub fn total_word_limit(&self) -> u32 {
        self.phases.iter().map(|p| p.word_limit).sum()
    }
}

/// The Lincoln-Douglas format, adapted for AI debates with word limits
/// instead of time limits.
pub fn lincoln_douglas() -> DebateFormat {
    DebateFormat {
        name: "Lincoln-Douglas".to_string(),
        description: "One-on-one value debate format emphasizing philosophy and logic"
            .to_string(),
        phases: vec![
            DebatePhase::new(
                "Affirmative Constructive",
                SpeakerRole::Affirmative,
                PhaseType::Constructive,
                800,
                "Present your constructive case for the affirmative position.\n\n\
                 You should:\n\
                 1. Define key terms in the resolution if needed\n\
                 2. Present your value premise (the core value you're upholding)\n\
                 3. Present your value criterion (the standard for measuring the value)\n\
                 4. Provide 2-3 contentions (main arguments) supporting your position\n\
                 5. Use logical reasoning and examples to support each contention\n\n\
                 Structure your speech clearly with signposting (e.g., \"My first contention is...\").\n\
                 Be persuasive but intellectually honest.",
            ),
            DebatePhase::new(
                "Cross-Examination (by Negative)",
                SpeakerRole::Negative,
                PhaseType::CrossExam,
                300,
                "Ask 3 pointed questions to challenge the affirmative's case.\n\n\
                 Your questions should:\n\
                 1. Expose weaknesses or contradictions in their arguments\n\
                 2. Clarify positions that seem vague or unsupported\n\
                 3. Set up arguments you'll make in your constructive\n\n\
                 Ask direct questions that require specific answers. Avoid making arguments \
                 yourself—this is for questioning only.",
            ),
            DebatePhase::new(
                "Affirmative Answers",
                SpeakerRole::Affirmative,
                PhaseType::CrossExam,
                300,
                "Answer the negative's questions directly and defend your position.\n\n\
                 You should:\n\
                 1. Answer each question honestly and directly\n\
                 2. Defend your positions when challenged\n\
                 3. Clarify any misunderstandings about your case\n\
                 4. Avoid evasion—direct answers are more credible\n\n\
                 Keep answers concise but complete.",
            ),
            DebatePhase::new(
                "Negative Constructive",
                SpeakerRole::Negative,
                PhaseType::Constructive,
                1000,
                "Present your case against the resolution AND refute the affirmative's \
                 arguments.\n\n\
                 You should:\n\
                 1. Attack the affirmative's value premise or criterion if flawed\n\
                 2. Refute their key contentions with counter-evidence or logic\n\
                 3. Present your own value premise and criterion\n\
                 4. Provide 2-3 contentions supporting the negative position\n\n\
                 You have more words because you must both attack and construct. Allocate \
                 roughly 400 words to refutation and 600 to your own case.",
            ),
            DebatePhase::new(
                "Cross-Examination (by Affirmative)",
                SpeakerRole::Affirmative,
                PhaseType::CrossExam,
                300,
                "Ask 3 pointed questions to challenge the negative's case.\n\n\
                 Your questions should:\n\
                 1. Expose weaknesses in their refutations of your case\n\
                 2. Challenge the validity of their own contentions\n\
                 3. Set up arguments for your rebuttal\n\n\
                 Focus on the most damaging parts of their speech.",
            ),
            DebatePhase::new(
                "Negative Answers",
                SpeakerRole::Negative,
                PhaseType::CrossExam,
                300,
                "Answer the affirmative's questions directly and defend your position.\n\n\
                 You should:\n\
                 1. Answer each question honestly and directly\n\
                 2. Defend both your refutations and your own case\n\
                 3. Maintain consistency with your constructive speech\n\n\
                 Keep answers concise but complete.",
            ),
            DebatePhase::new(
                "Affirmative Rebuttal",
                SpeakerRole::Affirmative,
                PhaseType::Rebuttal,
                500,
                "Rebuild your case and respond to the negative's attacks.\n\n\
                 You should:\n\
                 1. Address the most damaging attacks on your case\n\
                 2. Explain why your arguments still stand\n\
                 3. Attack weaknesses in the negative's own case\n\
                 4. Begin crystallizing why you're winning the debate\n\n\
                 Do NOT introduce new arguments—extend and apply what's already been said.",
            ),
            DebatePhase::new(
                "Negative Rebuttal",
                SpeakerRole::Negative,
                PhaseType::Rebuttal,
                700,
                "Deliver your final attacks and summarize why you've won.\n\n\
                 You should:\n\
                 1. Respond to the affirmative's rebuttal\n\
                 2. Extend your most successful attacks\n\
                 3. Explain why your case outweighs theirs\n\
                 4. Crystallize the key voting issues in your favor\n\n\
                 This is your last speech—make it count. Be clear about why a judge should \
                 vote negative.",
            ),
            DebatePhase::new(
                "Affirmative Rejoinder",
                SpeakerRole::Affirmative,
                PhaseType::Rebuttal,
                400,
                "Deliver your final defense and summary.\n\n\
                 You should:\n\
                 1. Respond to the negative's final attacks\n\
                 2. Crystallize why your value framework is superior\n\
                 3. Summarize the key voting issues in your favor\n\
                 4. End with a clear, compelling reason to affirm the resolution\n\n\
                 This is your last chance to speak—focus on the most important issues and \
                 leave a strong final impression.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lincoln_douglas_shape() {
        let format = lincoln_douglas();
        assert_eq!(format.name, "Lincoln-Douglas");
        assert_eq!(format.phases.len(), 9);

        // Opens with the affirmative constructive, closes with the rejoinder.
        assert_eq!(format.phases[0].speaker_role, SpeakerRole::Affirmative);
        assert_eq!(format.phases[0].phase_type, PhaseType::Constructive);
        assert_eq!(
            format.phases.last().map(|p| p.name.as_str()),
            Some("Affirmative Rejoinder")
        );
    }

    #[test]
    fn test_total_word_limit() {
        let format = lincoln_douglas();
        // 800 + 300 + 300 + 1000 + 300 + 300 + 500 + 700 + 400
        assert_eq!(format.total_word_limit(), 4600);
    }

    #[test]
    fn test_speaker_role_opponent() {
        assert_eq!(SpeakerRole::Affirmative.opponent(), SpeakerRole::Negative);
        assert_eq!(SpeakerRole::Negative.opponent(), SpeakerRole::Affirmative);
    }

    #[test]
    fn test_side_alternation_is_data_driven() {
        // Sides come from the phase declarations, not strict alternation:
        // cross-exam answer phases keep the same side speaking twice in a row
        // relative to question phases elsewhere in the sequence.
        let format = lincoln_douglas();
        let sides: Vec<SpeakerRole> = format.phases.iter().map(|p| p.speaker_role).collect();
        assert_eq!(sides[1], SpeakerRole::Negative);
        assert_eq!(sides[2], SpeakerRole::Affirmative);
        assert_eq!(sides[3], SpeakerRole::Negative);
    }
}
