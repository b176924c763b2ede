use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use stupidfish::arena::{run_all, BatchConfig};
use stupidfish::board::Position;
use stupidfish::{openings, AgentKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run engine-vs-engine matches in parallel", long_about = None)]
struct Args {
    /// JSON batch configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum games played at once
    #[arg(long)]
    parallel: Option<usize>,

    /// Maximum number of games (two per starting position)
    #[arg(long)]
    games: Option<usize>,

    /// Initial clock per side in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Increment per move in milliseconds
    #[arg(long)]
    increment_ms: Option<u64>,

    /// Adjudicate a draw after this many plies
    #[arg(long)]
    max_plies: Option<u32>,

    #[arg(long, value_enum, default_value_t = AgentKind::Search)]
    agent_a: AgentKind,

    #[arg(long, value_enum, default_value_t = AgentKind::Greedy)]
    agent_b: AgentKind,

    /// Seed for random agents
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Starting position (repeatable); defaults to the built-in openings
    #[arg(long)]
    fen: Vec<String>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,
}

fn load_config(args: &Args) -> Result<BatchConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => BatchConfig::default(),
    };
    if let Some(p) = args.parallel { cfg.max_concurrency = p; }
    if let Some(g) = args.games { cfg.max_games = Some(g); }
    if let Some(t) = args.time_ms { cfg.match_config.time_control.initial_ms = t; }
    if let Some(i) = args.increment_ms { cfg.match_config.time_control.increment_ms = i; }
    if let Some(m) = args.max_plies { cfg.match_config.max_plies = Some(m); }
    if args.progress { cfg.show_progress = true; }
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = load_config(&args)?;

    let positions = if args.fen.is_empty() {
        openings::positions()?
    } else {
        args.fen.iter().map(|f| Position::from_fen(f)).collect::<Result<Vec<_>, _>>()?
    };
    info!("{} starting positions, config {:?}", positions.len(), cfg);

    let agent_a = args.agent_a.build(args.seed);
    let agent_b = args.agent_b.build(args.seed.wrapping_add(1));
    let report = run_all(&positions, agent_a.as_ref(), agent_b.as_ref(), &cfg)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
