//! Debate orchestration: format data and the phase-walk engine.

pub mod engine;
pub mod formats;
pub mod markdown;

pub use engine::{DebateEngine, DebateTranscript, PhaseResult};
pub use formats::{lincoln_douglas, DebateFormat, DebatePhase, PhaseType, SpeakerRole};
pub use markdown::transcript_to_markdown;
