pub mod alphabeta;
pub mod eval;
pub mod ordering;
pub mod time;

pub use alphabeta::{SearchConfig, SearchError, SearchResult, Searcher};
pub use eval::{EvalParams, Evaluator, Score, INFINITY, MATE_SCORE};
pub use time::{Clock, ClockView, TimeControl, TimeManager};
