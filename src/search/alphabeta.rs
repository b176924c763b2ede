use cozy_chess::{Color, Move};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

use crate::board::Rules;
use crate::search::eval::{EvalParams, Evaluator, Score, INFINITY, MATE_SCORE};
use crate::search::ordering::{order_moves, promote};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Root position is checkmate or stalemate.
    #[error("no legal move in root position")]
    NoLegalMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Last depth iterative deepening will try.
    pub max_depth: u32,
    pub use_quiescence: bool,
    /// MVV-LVA ordering inside the tree. Root ordering also honours it.
    pub order_moves: bool,
    /// Alpha-beta cutoffs in the main search. Off gives plain minimax.
    pub use_pruning: bool,
    pub qsearch_max_depth: u32,
    pub eval: EvalParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            use_quiescence: true,
            order_moves: true,
            use_pruning: true,
            qsearch_max_depth: 16,
            eval: EvalParams::default(),
        }
    }
}

impl SearchConfig {
    /// One ply, static leaves: takes the most valuable capture or the best-looking quiet move.
    pub fn greedy() -> Self {
        Self { max_depth: 1, use_quiescence: false, ..Self::default() }
    }

    /// Full-width alpha-beta to `depth` with static leaves.
    pub fn fixed_depth(depth: u32) -> Self {
        Self { max_depth: depth.max(1), use_quiescence: false, ..Self::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score for the side to move at the root.
    pub score: Score,
    /// Deepest fully completed iteration.
    pub depth: u32,
    pub nodes: u64,
    pub evals: u64,
    pub mate_found: bool,
}

#[derive(Debug, Clone, Copy)]
struct RootBest {
    mv: Move,
    score: Score,
    mate: bool,
}

/// Iterative-deepening negamax over any [`Rules`] implementation.
///
/// Leaves are scored from the root side's perspective and converted to the
/// side to move, so the evaluator never sees search depth.
pub struct Searcher {
    config: SearchConfig,
    evaluator: Evaluator,
    root: Color,
    deadline: Option<Instant>,
    /// Deadline checks are off while depth 1 runs.
    clock_armed: bool,
    stopped: bool,
    nodes: u64,
    evals: u64,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(SearchConfig::default()) }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            evaluator: Evaluator::new(config.eval),
            root: Color::White,
            deadline: None,
            clock_armed: false,
            stopped: false,
            nodes: 0,
            evals: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn nodes(&self) -> u64 { self.nodes }

    fn reset<R: Rules>(&mut self, pos: &R, deadline: Option<Instant>) {
        self.root = pos.side_to_move();
        self.deadline = deadline;
        self.clock_armed = false;
        self.stopped = false;
        self.nodes = 0;
        self.evals = 0;
    }

    /// Deepens until `deadline`, `max_depth` or a forced mate. Depth 1 always completes.
    pub fn search<R: Rules>(&mut self, pos: &mut R, deadline: Option<Instant>) -> Result<SearchResult, SearchError> {
        self.reset(pos, deadline);
        let mut moves = pos.legal_moves(false);
        if moves.is_empty() { return Err(SearchError::NoLegalMove); }
        if self.config.order_moves { order_moves(pos, &mut moves); }

        let mut best: Option<RootBest> = None;
        let mut completed = 0;
        for depth in 1..=self.config.max_depth.max(1) {
            if let Some(prev) = best { promote(&mut moves, prev.mv); }
            let Some(iter) = self.root_iteration(pos, &moves, depth, depth > 1) else {
                debug!("depth {} abandoned at deadline", depth);
                break;
            };
            best = Some(iter);
            completed = depth;
            debug!("depth {} score {} best {} nodes {} evals {}", depth, iter.score, iter.mv, self.nodes, self.evals);
            if iter.mate {
                debug!("mate found at depth {}", depth);
                break;
            }
            if self.deadline_passed() { break; }
        }

        let best = best.ok_or(SearchError::NoLegalMove)?;
        Ok(self.result(best, completed))
    }

    /// One complete iteration at `depth`, ignoring any deadline.
    pub fn search_depth<R: Rules>(&mut self, pos: &mut R, depth: u32) -> Result<SearchResult, SearchError> {
        self.reset(pos, None);
        let mut moves = pos.legal_moves(false);
        if moves.is_empty() { return Err(SearchError::NoLegalMove); }
        if self.config.order_moves { order_moves(pos, &mut moves); }
        let depth = depth.max(1);
        let best = self.root_iteration(pos, &moves, depth, false).ok_or(SearchError::NoLegalMove)?;
        Ok(self.result(best, depth))
    }

    /// Quiescence value of `pos` for its side to move, full window.
    pub fn qsearch_eval<R: Rules>(&mut self, pos: &mut R) -> Score {
        self.reset(pos, None);
        self.quiesce(pos, -INFINITY, INFINITY, 0)
    }

    fn result(&self, best: RootBest, depth: u32) -> SearchResult {
        SearchResult {
            best_move: best.mv,
            score: best.score,
            depth,
            nodes: self.nodes,
            evals: self.evals,
            mate_found: best.mate,
        }
    }

    /// Returns `None` if `may_stop` and the deadline fired before every root move was searched.
    fn root_iteration<R: Rules>(&mut self, pos: &mut R, moves: &[Move], depth: u32, may_stop: bool) -> Option<RootBest> {
        self.clock_armed = may_stop;
        let mut alpha = -INFINITY;
        let mut best: Option<RootBest> = None;
        for &mv in moves {
            pos.apply(mv);
            let score = -self.alphabeta(pos, depth - 1, -INFINITY, -alpha);
            pos.undo(mv);
            self.nodes += 1;

            if best.map_or(true, |b| score > b.score) {
                best = Some(RootBest { mv, score, mate: false });
                if self.config.use_pruning && score > alpha { alpha = score; }
            }
            if may_stop && self.stopped { return None; }
            if score >= MATE_SCORE {
                return Some(RootBest { mv, score, mate: true });
            }
        }
        best
    }

    fn alphabeta<R: Rules>(&mut self, pos: &mut R, depth: u32, mut alpha: Score, beta: Score) -> Score {
        if pos.is_in_checkmate() || pos.is_draw() {
            return self.static_eval(pos);
        }
        if depth == 0 || self.time_up() {
            return self.horizon(pos, alpha, beta);
        }

        let mut moves = pos.legal_moves(false);
        if moves.is_empty() { return self.static_eval(pos); }
        if self.config.order_moves { order_moves(pos, &mut moves); }

        let mut best = -INFINITY;
        for mv in moves {
            pos.apply(mv);
            self.nodes += 1;
            let score = if self.config.use_pruning {
                -self.alphabeta(pos, depth - 1, -beta, -alpha)
            } else {
                -self.alphabeta(pos, depth - 1, -INFINITY, INFINITY)
            };
            pos.undo(mv);

            if score > best { best = score; }
            if self.config.use_pruning {
                if score > alpha { alpha = score; }
                if beta <= alpha { break; }
            }
            if self.time_up() { break; }
        }
        best
    }

    fn horizon<R: Rules>(&mut self, pos: &mut R, alpha: Score, beta: Score) -> Score {
        if self.config.use_quiescence {
            self.quiesce(pos, alpha, beta, 0)
        } else {
            self.static_eval(pos)
        }
    }

    // Fail-hard, bounded by qsearch_max_depth.
    fn quiesce<R: Rules>(&mut self, pos: &mut R, mut alpha: Score, beta: Score, ply: u32) -> Score {
        let stand = self.static_eval(pos);
        if stand >= beta { return beta; }
        if stand > alpha { alpha = stand; }
        if ply >= self.config.qsearch_max_depth || self.time_up() { return alpha; }

        let mut captures = pos.legal_moves(true);
        if self.config.order_moves { order_moves(pos, &mut captures); }
        for mv in captures {
            pos.apply(mv);
            self.nodes += 1;
            let score = -self.quiesce(pos, -beta, -alpha, ply + 1);
            pos.undo(mv);
            if score >= beta { return beta; }
            if score > alpha { alpha = score; }
        }
        alpha
    }

    fn static_eval<R: Rules>(&mut self, pos: &R) -> Score {
        self.evals += 1;
        let score = self.evaluator.evaluate(self.root, pos);
        if pos.side_to_move() == self.root { score } else { -score }
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn time_up(&mut self) -> bool {
        if self.clock_armed && !self.stopped {
            self.stopped = self.deadline_passed();
        }
        self.stopped
    }
}
