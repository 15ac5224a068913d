use std::path::PathBuf;

use crunch_engine::{BoardSeed, CHAIN_LENGTH_BUCKETS, GameSession, SessionState, Swap};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::info;

use crate::util;

use super::level_arg::LevelArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    level: LevelArg,
    /// Number of sessions to play
    #[arg(long, default_value_t = 10)]
    sessions: usize,
    /// Seed for the whole run (32 hex characters); random when omitted
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Output file path (JSON); stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AutoPlayReport {
    seed: BoardSeed,
    sessions: Vec<SessionReport>,
    wins: usize,
}

#[derive(Debug, Serialize)]
struct SessionReport {
    seed: BoardSeed,
    state: SessionState,
    score: usize,
    moves_used: usize,
    total_chains: usize,
    chain_length_counter: [usize; CHAIN_LENGTH_BUCKETS],
    longest_cascade: usize,
    reshuffles: usize,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        level,
        sessions,
        seed,
        output,
    } = arg;

    let level_data = level.load()?;
    let size = level.size();
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::from_seed(*seed.as_bytes());

    let mut reports = Vec::with_capacity(*sessions);
    for i in 0..*sessions {
        let session_seed: BoardSeed = rng.random();
        let mut session = GameSession::with_seed(&level_data, size, session_seed);
        let report = play_session(&mut session, session_seed, &mut rng);
        info!(
            session = i + 1,
            of = sessions,
            state = ?report.state,
            score = report.score,
            moves = report.moves_used,
            "finished session"
        );
        reports.push(report);
    }

    let wins = reports.iter().filter(|r| r.state.is_won()).count();
    info!(%seed, wins, sessions, "auto-play finished");

    let report = AutoPlayReport {
        seed,
        sessions: reports,
        wins,
    };
    util::save_json(&report, output.as_deref())
}

fn play_session<R>(session: &mut GameSession, seed: BoardSeed, rng: &mut R) -> SessionReport
where
    R: Rng,
{
    let mut reshuffles = 0;
    while session.session_state().is_playing() {
        let Some(swap) = pick_swap(session, rng) else {
            break;
        };
        // Only legal swaps are offered, so this cannot be rejected
        let Ok(outcome) = session.try_swap(&swap) else {
            break;
        };
        if outcome.reshuffled.is_some() {
            reshuffles += 1;
        }
    }

    let stats = session.stats();
    SessionReport {
        seed,
        state: session.session_state(),
        score: stats.score(),
        moves_used: stats.completed_swaps(),
        total_chains: stats.total_chains(),
        chain_length_counter: *stats.chain_length_counter(),
        longest_cascade: stats.longest_cascade(),
        reshuffles,
    }
}

fn pick_swap<R>(session: &GameSession, rng: &mut R) -> Option<Swap>
where
    R: Rng,
{
    let mut swaps: Vec<Swap> = session.board().possible_swaps().iter().copied().collect();
    if swaps.is_empty() {
        return None;
    }
    // HashSet order is not stable across runs
    swaps.sort_by_key(|swap| (swap.first().position(), swap.second().position()));
    Some(swaps[rng.random_range(0..swaps.len())])
}
