//! Markdown rendering for debate transcripts.
//!
//! One document per debate, keyed by its transcript identifier. Written
//! by callers (the CLI), never by the engine itself.

use crate::debate::engine::DebateTranscript;
use crate::debate::formats::SpeakerRole;

/// Render a debate transcript as a readable Markdown document.
pub fn transcript_to_markdown(transcript: &DebateTranscript) -> String {
    let mut lines = vec![
        format!("# Debate: {}", transcript.resolution),
        String::new(),
        format!("**Format:** {}", transcript.format_name),
        format!("**Affirmative:** {}", transcript.affirmative_model),
        format!("**Negative:** {}", transcript.negative_model),
        format!(
            "**Date:** {}",
            transcript.started_at.format("%Y-%m-%d %H:%M UTC")
        ),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    for phase in &transcript.phases {
        let role_emoji = match phase.speaker_role {
            SpeakerRole::Affirmative => "🟢",
            SpeakerRole::Negative => "🔴",
        };
        lines.push(format!("## {} {}", role_emoji, phase.phase.name));
        lines.push(format!(
            "*{} ({}) — {} words*",
            phase.speaker_model, phase.speaker_role, phase.word_count
        ));
        lines.push(String::new());
        lines.push(phase.content.clone());
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.push("## Statistics".to_string());
    lines.push(String::new());
    lines.push(format!("- **Total words:** {}", transcript.total_words()));
    lines.push(format!(
        "- **Total tokens:** {}",
        transcript.total_input_tokens() + transcript.total_output_tokens()
    ));
    if let Some(completed_at) = transcript.completed_at {
        let duration = completed_at - transcript.started_at;
        lines.push(format!(
            "- **Duration:** {:.1} seconds",
            duration.num_milliseconds() as f64 / 1000.0
        ));
    }

    lines.join("\n")
}
