//! Move-choosing players. Everything the arena runs goes through [`Agent`].

use clap::ValueEnum;
use cozy_chess::Move;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::board::{Position, Rules};
use crate::search::{ClockView, SearchConfig, SearchError, Searcher, TimeManager};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("no legal move available")]
    NoLegalMove,
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("agent failed: {0}")]
    Failed(String),
}

/// A player. Agents are shared by every game of a batch, so `think` takes `&self`
/// and must not rely on per-game mutable state.
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    /// Proposes a move for the side to move. The caller re-validates it.
    fn think(&self, pos: &Position, clock: &ClockView) -> Result<Move, AgentError>;
}

/// Alpha-beta searcher driven by the clock.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    name: String,
    config: SearchConfig,
    time: TimeManager,
}

impl SearchAgent {
    pub fn new(name: impl Into<String>, config: SearchConfig) -> Self {
        Self { name: name.into(), config, time: TimeManager::default() }
    }
}

impl Agent for SearchAgent {
    fn name(&self) -> &str { &self.name }

    fn think(&self, pos: &Position, clock: &ClockView) -> Result<Move, AgentError> {
        let deadline = self.time.deadline(clock);
        let mut work = pos.clone();
        let mut searcher = Searcher::new(self.config);
        let result = searcher.search(&mut work, Some(deadline))?;
        Ok(result.best_move)
    }
}

/// Uniformly random legal move, reproducible from `seed` and the position.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    seed: u64,
}

impl RandomAgent {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self { name: name.into(), seed }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str { &self.name }

    fn think(&self, pos: &Position, _clock: &ClockView) -> Result<Move, AgentError> {
        let mut rng = SmallRng::seed_from_u64(self.seed ^ pos.hash());
        pos.legal_moves(false).choose(&mut rng).copied().ok_or(AgentError::NoLegalMove)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Iterative deepening with quiescence under the clock.
    Search,
    /// One ply, static evaluation.
    Greedy,
    /// Fixed three-ply alpha-beta.
    Minimax,
    Random,
}

impl AgentKind {
    pub fn build(self, seed: u64) -> Box<dyn Agent> {
        let name = self.to_string();
        match self {
            AgentKind::Search => Box::new(SearchAgent::new(name, SearchConfig::default())),
            AgentKind::Greedy => Box::new(SearchAgent::new(name, SearchConfig::greedy())),
            AgentKind::Minimax => Box::new(SearchAgent::new(name, SearchConfig::fixed_depth(3))),
            AgentKind::Random => Box::new(RandomAgent::new(name, seed)),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentKind::Search => "search",
            AgentKind::Greedy => "greedy",
            AgentKind::Minimax => "minimax",
            AgentKind::Random => "random",
        };
        f.write_str(s)
    }
}
