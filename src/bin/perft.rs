use anyhow::{Context, Result};
use chesscore::notation::to_uci;
use chesscore::perft::{divide, perft_parallel};
use chesscore::{Board, Color};
use clap::Parser;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Move generation node counter")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Text board dump to start from; the initial position when omitted
    #[arg(long, value_name = "FILE")]
    board: Option<std::path::PathBuf>,
    /// Black to move
    #[arg(long, default_value_t = false)]
    black: bool,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print the node count below each root move
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = match &args.board {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Board::parse(&text)?
        }
        None => Board::standard(),
    };
    let color = if args.black { Color::Black } else { Color::White };

    if args.divide {
        for (mv, n) in divide(&base, color, &[], args.depth)? {
            println!("{}: {n}", to_uci(&mv));
        }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| -> Result<(u64, f64)> {
        let t0 = Instant::now();
        let nodes = perft_parallel(&base, color, &[], args.depth)?;
        Ok((nodes, t0.elapsed().as_secs_f64()))
    })?;

    if args.nps {
        println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON));
    } else {
        println!("nodes: {nodes}");
    }
    Ok(())
}
