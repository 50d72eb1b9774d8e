//! Round-robin matrix tournaments: scheduling, execution, statistics.

pub mod elo;
pub mod markdown;
pub mod runner;
pub mod scheduler;
pub mod serialization;
pub mod stats;
pub mod types;

pub use elo::{compute_elo_ratings, expected_score, update_ratings};
pub use markdown::{leaderboard_to_markdown, matrix_to_markdown};
pub use runner::{DebateCompleteCallback, MatrixRunner};
pub use scheduler::{
    build_matrix_schedule, estimate_matrix_cost, MatrixCostEstimate, DEFAULT_TOKENS_PER_DEBATE,
    DEFAULT_TOKENS_PER_JUDGE,
};
pub use serialization::matrix_result_to_json;
pub use stats::compute_matrix_stats;
pub use types::{
    CategoryAverages, EloRating, HeadToHead, MatrixDebateEntry, MatrixDebateResult, MatrixResult,
    MatrixStats, ModelRecord,
};
