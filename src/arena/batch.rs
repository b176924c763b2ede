use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::agent::Agent;
use crate::arena::match_runner::{play_game, GameOutcome, MatchConfig};
use crate::arena::stats::{MatchStatistics, StatsSnapshot};
use crate::arena::ArenaError;
use crate::board::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Games allowed to run at once.
    pub max_concurrency: usize,
    pub match_config: MatchConfig,
    /// Cap on games; positions are taken in order, two games each.
    pub max_games: Option<usize>,
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_concurrency: 8, match_config: MatchConfig::default(), max_games: None, show_progress: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub index: usize,
    pub start_fen: String,
    pub agent_a_white: bool,
    pub outcome: GameOutcome,
    pub plies: u32,
    pub moves: Vec<String>,
    pub final_fen: String,
    pub duration_secs: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub agent_a: String,
    pub agent_b: String,
    pub stats: StatsSnapshot,
    /// In scheduling order: position `i` yields games `2i` (A white) and `2i + 1`.
    pub games: Vec<GameRecord>,
    pub elapsed_secs: f64,
    pub max_concurrency: usize,
    pub peak_concurrency: usize,
}

struct Job<'a> {
    index: usize,
    start: &'a Position,
    a_is_white: bool,
}

/// Plays every position twice, A as White then A as Black, at most
/// `max_concurrency` games at a time. Returns once every game is recorded.
pub fn run_all(positions: &[Position], agent_a: &dyn Agent, agent_b: &dyn Agent, config: &BatchConfig) -> Result<BatchReport, ArenaError> {
    if config.max_concurrency == 0 {
        return Err(ArenaError::InvalidConfig("max_concurrency must be at least 1".into()));
    }
    // Odd caps round up: games come in pairs.
    let take = config.max_games.map_or(positions.len(), |g| g.div_ceil(2).min(positions.len()));
    if take == 0 {
        return Err(ArenaError::InvalidConfig("no starting positions".into()));
    }
    let jobs: Vec<Job<'_>> = positions[..take]
        .iter()
        .enumerate()
        .flat_map(|(i, start)| [Job { index: 2 * i, start, a_is_white: true }, Job { index: 2 * i + 1, start, a_is_white: false }])
        .collect();

    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.max_concurrency).build()?;
    let stats = MatchStatistics::new();
    let in_flight = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);
    let progress = progress_bar(jobs.len() as u64, config.show_progress);

    info!(
        "starting {} games: {} vs {} on {} workers",
        jobs.len(), agent_a.name(), agent_b.name(), config.max_concurrency
    );
    let started = Instant::now();

    let games: Vec<GameRecord> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);

                let (white, black) = if job.a_is_white { (agent_a, agent_b) } else { (agent_b, agent_a) };
                let t0 = Instant::now();
                let report = play_game(job.start, white, black, &config.match_config);
                let duration_secs = t0.elapsed().as_secs_f64();

                stats.record(&report.outcome, job.a_is_white);
                in_flight.fetch_sub(1, Ordering::SeqCst);
                debug!("game {} ({} white): {} after {} plies", job.index, white.name(), report.outcome, report.plies);
                progress.set_message(stats.snapshot().to_string());
                progress.inc(1);

                GameRecord {
                    index: job.index,
                    start_fen: job.start.fen(),
                    agent_a_white: job.a_is_white,
                    outcome: report.outcome,
                    plies: report.plies,
                    moves: report.moves,
                    final_fen: report.final_fen,
                    duration_secs,
                }
            })
            .collect()
    });

    let snapshot = stats.snapshot();
    progress.finish_with_message(snapshot.to_string());
    let elapsed_secs = started.elapsed().as_secs_f64();
    info!("finished {} games in {:.1}s", snapshot.games, elapsed_secs);

    Ok(BatchReport {
        agent_a: agent_a.name().to_string(),
        agent_b: agent_b.name().to_string(),
        stats: snapshot,
        games,
        elapsed_secs,
        max_concurrency: config.max_concurrency,
        peak_concurrency: peak.load(Ordering::SeqCst),
    })
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible { return ProgressBar::hidden(); }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("[{elapsed_precise}] {bar:30} {pos}/{len} {msg}") {
        bar.set_style(style);
    }
    bar
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "games played: {} in {:.1}s (peak concurrency {}/{})", s.games, self.elapsed_secs, self.peak_concurrency, self.max_concurrency)?;
        for (name, t) in [(&self.agent_a, &s.agent_a), (&self.agent_b, &s.agent_b)] {
            writeln!(
                f,
                "{:<10} wins {:>4}  losses {:>4}  draws {:>4}  timeouts {:>3}  illegal {:>3}  score {:.3}",
                name, t.wins, t.losses, t.draws, t.timeouts, t.illegal_moves, t.score()
            )?;
        }
        Ok(())
    }
}
