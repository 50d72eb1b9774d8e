//! Command-line interface for debate-arena.
//!
//! Provides commands for running single judged debates, full matrix
//! tournaments, and dry-run schedule previews.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli};
