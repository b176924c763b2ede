// Alpha-beta engine plus an engine-vs-engine arena
pub mod agent;
pub mod arena;
pub mod board;
pub mod openings;
pub mod perft;
pub mod search;

pub use agent::{Agent, AgentError, AgentKind, RandomAgent, SearchAgent};
pub use board::{Position, Rules};
