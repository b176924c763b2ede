use anyhow::Result;
use clap::Parser;
use std::time::{Duration, Instant};
use stupidfish::board::Position;
use stupidfish::search::{SearchConfig, Searcher};

#[derive(Parser, Debug)]
#[command(name = "stupidfish-bench", version, about = "Benchmark stupidfish search speed on one position")]
struct Args {
    /// FEN string or 'startpos'
    #[arg(long, default_value = "startpos")]
    fen: String,

    /// Movetime in milliseconds (ignored if depth is set)
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Fixed search depth (overrides movetime when > 0)
    #[arg(long, default_value_t = 0)]
    depth: u32,

    /// Disable quiescence at the horizon
    #[arg(long, default_value_t = false)]
    no_quiescence: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut pos = if args.fen == "startpos" { Position::startpos() } else { Position::from_fen(&args.fen)? };

    let cfg = SearchConfig { use_quiescence: !args.no_quiescence, ..SearchConfig::default() };
    let mut s = Searcher::new(cfg);

    let t0 = Instant::now();
    let res = if args.depth > 0 {
        s.search_depth(&mut pos, args.depth)?
    } else {
        s.search(&mut pos, Some(t0 + Duration::from_millis(args.movetime)))?
    };
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    println!(
        "bestmove={} score={} depth={} nodes={} evals={} mate={} elapsed={:.3}s nps={:.1}",
        pos.to_uci(res.best_move), res.score, res.depth, res.nodes, res.evals, res.mate_found, dt.as_secs_f64(), nps
    );
    Ok(())
}
