//! Engine-vs-engine games: one game at a time ([`match_runner`]), many games
//! under bounded parallelism ([`batch`]), and the shared tallies ([`stats`]).

pub mod batch;
pub mod match_runner;
pub mod stats;

use thiserror::Error;

pub use batch::{run_all, BatchConfig, BatchReport, GameRecord};
pub use match_runner::{play_game, GameOutcome, GameReport, GameResult, MatchConfig, Termination};
pub use stats::{AgentTally, MatchStatistics, StatsSnapshot};

/// Failures that abort a whole batch. Individual games never produce these.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("invalid batch configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
