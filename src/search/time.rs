//! Game clocks and the per-move time budget.

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeControl {
    pub initial_ms: u64,
    /// Added to the mover's clock after every completed move.
    pub increment_ms: u64,
}

impl Default for TimeControl {
    fn default() -> Self { Self { initial_ms: 60_000, increment_ms: 0 } }
}

/// One side's game clock. Remaining time may go negative after an overrun.
#[derive(Debug, Clone)]
pub struct Clock {
    control: TimeControl,
    remaining_ms: i64,
}

impl Clock {
    pub fn new(control: TimeControl) -> Self {
        Self { control, remaining_ms: control.initial_ms as i64 }
    }

    pub fn remaining_ms(&self) -> i64 { self.remaining_ms }

    pub fn is_flagged(&self) -> bool { self.remaining_ms <= 0 }

    /// Read-only view handed to the side about to move.
    pub fn start_turn(&self, opponent: &Clock) -> ClockView {
        ClockView {
            remaining_ms: self.remaining_ms.max(0) as u64,
            opponent_remaining_ms: opponent.remaining_ms.max(0) as u64,
            total_ms: self.control.initial_ms,
            increment_ms: self.control.increment_ms,
            turn_started: Instant::now(),
        }
    }

    /// Charges the think time, then credits the increment.
    pub fn finish_turn(&mut self, elapsed: Duration) {
        let spent = i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX);
        self.remaining_ms = self.remaining_ms.saturating_sub(spent);
        self.remaining_ms = self.remaining_ms.saturating_add(self.control.increment_ms as i64);
    }
}

/// Snapshot of the mover's clock at the start of its turn.
#[derive(Debug, Clone, Copy)]
pub struct ClockView {
    pub remaining_ms: u64,
    pub opponent_remaining_ms: u64,
    /// Initial time of the game, used for the panic ratio.
    pub total_ms: u64,
    pub increment_ms: u64,
    pub turn_started: Instant,
}

impl ClockView {
    /// View with a fixed remaining time, starting now.
    pub fn fixed(remaining_ms: u64, total_ms: u64) -> Self {
        Self {
            remaining_ms,
            opponent_remaining_ms: remaining_ms,
            total_ms,
            increment_ms: 0,
            turn_started: Instant::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeManager {
    pub moves_to_go: u64,
    /// Used once remaining/total drops to `panic_threshold` or below.
    pub panic_moves_to_go: u64,
    pub panic_threshold: f64,
}

impl Default for TimeManager {
    fn default() -> Self { Self { moves_to_go: 80, panic_moves_to_go: 30, panic_threshold: 0.10 } }
}

impl TimeManager {
    pub fn in_panic(&self, clock: &ClockView) -> bool {
        if clock.total_ms == 0 { return true; }
        clock.remaining_ms as f64 / clock.total_ms as f64 <= self.panic_threshold
    }

    pub fn budget_ms(&self, clock: &ClockView) -> u64 {
        if self.in_panic(clock) {
            debug!("time panic: {} ms of {} left", clock.remaining_ms, clock.total_ms);
            clock.remaining_ms / self.panic_moves_to_go.max(1)
        } else {
            clock.remaining_ms / self.moves_to_go.max(1)
        }
    }

    /// Soft deadline measured from the start of the turn.
    pub fn deadline(&self, clock: &ClockView) -> Instant {
        clock.turn_started + Duration::from_millis(self.budget_ms(clock))
    }
}
