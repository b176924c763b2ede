use cozy_chess::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hint;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::arena::match_runner::{GameOutcome, Termination};

const SNAPSHOT_SPINS: usize = 10_000;

#[derive(Debug, Default)]
struct Counters {
    wins: AtomicU64,
    losses: AtomicU64,
    draws: AtomicU64,
    timeouts: AtomicU64,
    illegal_moves: AtomicU64,
}

impl Counters {
    fn load(&self) -> AgentTally {
        AgentTally {
            wins: self.wins.load(Ordering::SeqCst),
            losses: self.losses.load(Ordering::SeqCst),
            draws: self.draws.load(Ordering::SeqCst),
            timeouts: self.timeouts.load(Ordering::SeqCst),
            illegal_moves: self.illegal_moves.load(Ordering::SeqCst),
        }
    }
}

/// Per-agent results of one batch, shared by every worker.
///
/// Only atomic increments touch the counters. A recording bumps `pending`
/// before and `completed` after its increments, which lets [`snapshot`]
/// detect and retry reads that overlap a recording without taking a lock.
///
/// [`snapshot`]: MatchStatistics::snapshot
#[derive(Debug, Default)]
pub struct MatchStatistics {
    agents: [Counters; 2],
    pending: AtomicU64,
    completed: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTally {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    /// Losses on time; also counted in `losses`.
    pub timeouts: u64,
    /// Losses by error, panic or illegal move; also counted in `losses`.
    pub illegal_moves: u64,
}

impl AgentTally {
    pub fn games(&self) -> u64 { self.wins + self.losses + self.draws }

    /// Points per game, draws counting half.
    pub fn score(&self) -> f64 {
        let games = self.games();
        if games == 0 { return 0.0; }
        (self.wins as f64 + 0.5 * self.draws as f64) / games as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub games: u64,
    pub agent_a: AgentTally,
    pub agent_b: AgentTally,
    /// False only if recordings never quiesced while reading.
    pub consistent: bool,
}

impl MatchStatistics {
    pub fn new() -> Self { Self::default() }

    /// Folds one finished game in. `a_is_white` tells which agent had White.
    pub fn record(&self, outcome: &GameOutcome, a_is_white: bool) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        match outcome.result.winner() {
            None => {
                for c in &self.agents { c.draws.fetch_add(1, Ordering::SeqCst); }
            }
            Some(winner) => {
                let a_won = (winner == Color::White) == a_is_white;
                let (w, l) = if a_won { (0, 1) } else { (1, 0) };
                self.agents[w].wins.fetch_add(1, Ordering::SeqCst);
                self.agents[l].losses.fetch_add(1, Ordering::SeqCst);
                match outcome.termination {
                    Termination::Timeout => { self.agents[l].timeouts.fetch_add(1, Ordering::SeqCst); }
                    Termination::IllegalMove => { self.agents[l].illegal_moves.fetch_add(1, Ordering::SeqCst); }
                    Termination::Checkmate | Termination::DrawRule => {}
                }
            }
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn completed(&self) -> u64 { self.completed.load(Ordering::SeqCst) }

    /// Counters as of some instant with no recording in flight. Never blocks
    /// recorders; after too many collisions returns a best-effort read.
    pub fn snapshot(&self) -> StatsSnapshot {
        for _ in 0..SNAPSHOT_SPINS {
            let done = self.completed.load(Ordering::SeqCst);
            if self.pending.load(Ordering::SeqCst) != done {
                hint::spin_loop();
                continue;
            }
            let (agent_a, agent_b) = (self.agents[0].load(), self.agents[1].load());
            if self.pending.load(Ordering::SeqCst) == done && self.completed.load(Ordering::SeqCst) == done {
                return StatsSnapshot { games: done, agent_a, agent_b, consistent: true };
            }
            hint::spin_loop();
        }
        StatsSnapshot {
            games: self.completed(),
            agent_a: self.agents[0].load(),
            agent_b: self.agents[1].load(),
            consistent: false,
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games {} | A +{} -{} ={} | B +{} -{} ={}",
            self.games,
            self.agent_a.wins, self.agent_a.losses, self.agent_a.draws,
            self.agent_b.wins, self.agent_b.losses, self.agent_b.draws,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::match_runner::GameResult;
    use pretty_assertions::assert_eq;

    #[test]
    fn forfeits_count_as_losses_and_offenses() {
        let stats = MatchStatistics::new();
        // A is white and loses on time.
        stats.record(&GameOutcome::forfeit(Color::White, Termination::Timeout), true);
        // A is black and B (white) plays an illegal move.
        stats.record(&GameOutcome::forfeit(Color::White, Termination::IllegalMove), false);
        stats.record(&GameOutcome::draw(), true);

        let snap = stats.snapshot();
        assert!(snap.consistent);
        assert_eq!(snap.games, 3);
        assert_eq!(snap.agent_a, AgentTally { wins: 1, losses: 1, draws: 1, timeouts: 1, illegal_moves: 0 });
        assert_eq!(snap.agent_b, AgentTally { wins: 1, losses: 1, draws: 1, timeouts: 0, illegal_moves: 1 });
    }

    #[test]
    fn checkmate_credits_the_winner_only() {
        let stats = MatchStatistics::new();
        let mate = GameOutcome { result: GameResult::BlackWins, termination: Termination::Checkmate };
        stats.record(&mate, false);
        let snap = stats.snapshot();
        assert_eq!(snap.agent_a.wins, 1);
        assert_eq!(snap.agent_b.losses, 1);
        assert_eq!(snap.agent_b.timeouts + snap.agent_b.illegal_moves, 0);
        assert_eq!(snap.agent_a.score(), 1.0);
    }

    #[test]
    fn concurrent_records_are_never_lost() {
        let stats = MatchStatistics::new();
        std::thread::scope(|s| {
            for t in 0..8 {
                let stats = &stats;
                s.spawn(move || {
                    for i in 0..500 {
                        let outcome = if (t + i) % 3 == 0 { GameOutcome::draw() } else { GameOutcome::forfeit(Color::Black, Termination::Timeout) };
                        stats.record(&outcome, i % 2 == 0);
                        let snap = stats.snapshot();
                        if snap.consistent {
                            assert_eq!(snap.agent_a.games(), snap.games);
                            assert_eq!(snap.agent_b.games(), snap.games);
                        }
                    }
                });
            }
        });
        let snap = stats.snapshot();
        assert_eq!(snap.games, 4_000);
        assert_eq!(snap.agent_a.games(), 4_000);
        assert_eq!(snap.agent_a.wins, snap.agent_b.losses);
    }
}
