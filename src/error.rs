//! Error types for debate-arena operations.
//!
//! Defines error types for the major subsystems:
//! - Model adapters (configuration and generation failures)
//! - Judging (verdict parsing and validation)
//! - Matrix tournaments (construction and round execution)
//!
//! No automatic retries exist anywhere in the core: a generation
//! failure aborts the owning phase, judge call, or tournament round.

use thiserror::Error;

/// Errors that can occur when configuring or calling a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Required API key environment variable is not set.
    #[error("Missing API key: {var} environment variable not set")]
    MissingApiKey { var: String },

    /// The HTTP request itself failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// The API returned a rate-limit response.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The API returned a non-success status.
    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },

    /// The API response body could not be interpreted.
    #[error("Failed to parse model response: {0}")]
    ParseError(String),

    /// The model returned no usable content.
    #[error("Empty response from model '{0}'")]
    EmptyResponse(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while judging a debate.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// A judge's generation call failed.
    #[error("Judge model error: {0}")]
    Model(#[from] ModelError),

    /// The judge's raw response could not be parsed as JSON after all
    /// fallback strategies.
    #[error("Could not parse judge response as JSON:\n{excerpt}")]
    ParseError { excerpt: String },

    /// A required field was absent from the parsed verdict.
    #[error("Judge verdict missing field '{0}'")]
    MissingField(String),

    /// A category score was not an integer in [1, 10].
    #[error("{category} score must be an integer 1-10, got {value}")]
    InvalidScore { category: String, value: String },

    /// The winner field did not resolve to "A" or "B".
    #[error("Winner must be 'A' or 'B', got {0:?}")]
    InvalidWinner(String),
}

/// Errors that can occur during matrix tournament execution.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Two roster entries share a display name.
    #[error("Model names must be unique")]
    DuplicateModelName,

    /// A tournament needs at least two models.
    #[error("Need at least 2 models for a matrix tournament, got {0}")]
    NotEnoughModels(usize),

    /// A schedule entry references a name missing from the roster.
    #[error("Schedule references unknown model '{0}'")]
    UnknownModel(String),

    /// A debate phase failed, aborting the round.
    #[error("Debate failed: {0}")]
    Debate(#[from] ModelError),

    /// The judge panel failed, aborting the round.
    #[error("Judging failed: {0}")]
    Judging(#[from] JudgeError),
}
