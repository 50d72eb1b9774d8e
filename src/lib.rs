//! debate-arena: staged AI-vs-AI debates with blind judging and
//! round-robin Elo tournaments.
//!
//! This library orchestrates multi-phase debates between model
//! backends, scores them with blind judge panels, and runs full
//! round-robin tournaments producing win/loss records, head-to-head
//! tallies, category averages, and Elo ratings.

// Core modules
pub mod cli;
pub mod debate;
pub mod error;
pub mod judging;
pub mod matrix;
pub mod models;

// Re-export commonly used error types
pub use error::{JudgeError, MatrixError, ModelError};
