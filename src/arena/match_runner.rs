use cozy_chess::Color;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::agent::Agent;
use crate::board::{Position, Rules};
use crate::search::{Clock, TimeControl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub time_control: TimeControl,
    /// Adjudicate a draw after this many plies.
    pub max_plies: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    Checkmate,
    Timeout,
    IllegalMove,
    DrawRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    pub termination: Termination,
}

impl GameOutcome {
    pub fn draw() -> Self {
        Self { result: GameResult::Draw, termination: Termination::DrawRule }
    }

    /// `loser` forfeits by `termination`.
    pub fn forfeit(loser: Color, termination: Termination) -> Self {
        Self { result: GameResult::win_for(!loser), termination }
    }

    /// The side at fault for a forfeit, if any.
    pub fn offender(&self) -> Option<Color> {
        match self.termination {
            Termination::Timeout | Termination::IllegalMove => self.result.winner().map(|w| !w),
            Termination::Checkmate | Termination::DrawRule => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self.result {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        };
        write!(f, "{} ({:?})", result, self.termination)
    }
}

/// Everything one finished game leaves behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub plies: u32,
    /// UCI moves actually played.
    pub moves: Vec<String>,
    pub final_fen: String,
}

/// Terminal state of `pos`, if it is one.
pub fn terminal_outcome(pos: &Position) -> Option<GameOutcome> {
    if pos.is_in_checkmate() {
        return Some(GameOutcome { result: GameResult::win_for(!pos.side_to_move()), termination: Termination::Checkmate });
    }
    if pos.is_draw() {
        return Some(GameOutcome::draw());
    }
    None
}

fn clock_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Plays `start` to completion. Agent errors, panics and illegal moves forfeit
/// the game for the side that produced them; a flagged clock forfeits on time.
pub fn play_game(start: &Position, white: &dyn Agent, black: &dyn Agent, config: &MatchConfig) -> GameReport {
    let mut pos = start.clone();
    let mut clocks = [Clock::new(config.time_control), Clock::new(config.time_control)];
    let mut moves = Vec::new();
    let mut plies = 0u32;

    let outcome = loop {
        if let Some(outcome) = terminal_outcome(&pos) { break outcome; }
        if config.max_plies.is_some_and(|max| plies >= max) {
            debug!("ply limit {} reached, adjudicated draw", plies);
            break GameOutcome::draw();
        }

        let side = pos.side_to_move();
        let (me, opp) = (clock_index(side), clock_index(!side));
        if clocks[me].is_flagged() {
            break GameOutcome::forfeit(side, Termination::Timeout);
        }

        let agent = match side {
            Color::White => white,
            Color::Black => black,
        };
        let view = clocks[me].start_turn(&clocks[opp]);
        let started = Instant::now();
        let proposal = catch_unwind(AssertUnwindSafe(|| agent.think(&pos, &view)));
        let elapsed = started.elapsed();

        let mv = match proposal {
            Ok(Ok(mv)) => mv,
            Ok(Err(e)) => {
                warn!("{} ({:?}) failed to move: {}", agent.name(), side, e);
                break GameOutcome::forfeit(side, Termination::IllegalMove);
            }
            Err(payload) => {
                warn!("{} ({:?}) panicked: {}", agent.name(), side, panic_message(payload.as_ref()));
                break GameOutcome::forfeit(side, Termination::IllegalMove);
            }
        };
        if !pos.legal_moves(false).contains(&mv) {
            warn!("{} ({:?}) played illegal move {} in {}", agent.name(), side, mv, pos.fen());
            break GameOutcome::forfeit(side, Termination::IllegalMove);
        }

        clocks[me].finish_turn(elapsed);
        moves.push(pos.to_uci(mv));
        pos.apply(mv);
        plies += 1;
    };

    GameReport { outcome, plies, moves, final_fen: pos.fen() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offender_is_the_losing_side_of_a_forfeit() {
        let o = GameOutcome::forfeit(Color::Black, Termination::Timeout);
        assert_eq!(o.result, GameResult::WhiteWins);
        assert_eq!(o.offender(), Some(Color::Black));
        assert_eq!(GameOutcome::draw().offender(), None);
    }

    #[test]
    fn terminal_start_needs_no_agents() {
        struct Unreachable;
        impl Agent for Unreachable {
            fn name(&self) -> &str { "unreachable" }
            fn think(&self, _: &Position, _: &crate::search::ClockView) -> Result<cozy_chess::Move, crate::agent::AgentError> {
                panic!("should not be asked");
            }
        }
        let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let report = play_game(&pos, &Unreachable, &Unreachable, &MatchConfig::default());
        assert_eq!(report.outcome, GameOutcome { result: GameResult::WhiteWins, termination: Termination::Checkmate });
        assert_eq!(report.plies, 0);
    }
}
