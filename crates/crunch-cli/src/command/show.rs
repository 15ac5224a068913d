use crunch_engine::{BoardSeed, GameSession};
use rand::Rng as _;

use super::level_arg::LevelArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    #[clap(flatten)]
    level: LevelArg,
    /// Seed for the board (32 hex characters); random when omitted
    #[arg(long)]
    seed: Option<BoardSeed>,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let ShowArg { level, seed } = arg;

    let level_data = level.load()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let session = GameSession::with_seed(&level_data, level.size(), seed);
    let board = session.board();

    println!("seed: {seed}");
    println!(
        "moves: {}, target score: {}",
        session.moves_left(),
        session.target_score()
    );
    print!("{board}");

    let mut swaps: Vec<_> = board.possible_swaps().iter().collect();
    swaps.sort_by_key(|swap| (swap.first().position(), swap.second().position()));
    println!("{} possible swaps:", swaps.len());
    for swap in swaps {
        println!("  {swap}");
    }

    Ok(())
}
