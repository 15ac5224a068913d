use rand::Rng as _;
use serde::Serialize;
use tracing::debug;

use crate::{
    IllegalSwapError,
    core::{chain::Chain, grid::BoardSize, piece::Piece, swap::Swap},
};

use super::{board::Board, board_seed::BoardSeed, game_stats::GameStats, level::LevelData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, Serialize)]
pub enum SessionState {
    Playing,
    Won,
    Lost,
}

/// One remove/fall/refill round of a cascade.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeStep {
    /// Chains removed in this round.
    pub chains: Vec<Chain>,
    /// Pieces that fell, grouped per column in bottom-to-top order.
    pub fallen: Vec<Vec<Piece>>,
    /// New pieces, grouped per column in top-to-bottom order.
    pub new_pieces: Vec<Vec<Piece>>,
}

/// Everything that happened on the board after an accepted swap.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub swap: Swap,
    pub steps: Vec<CascadeStep>,
    /// Points earned by this swap.
    pub score: usize,
    /// Set when the board ran out of legal swaps and was refilled from scratch.
    pub reshuffled: Option<Vec<Piece>>,
}

/// A level being played: the board plus move budget, target score and
/// statistics.
///
/// The session runs the full turn sequence of [`Board`] for each swap:
/// remove chains, let pieces fall, top off columns, and repeat until the
/// board settles.
///
/// # Example
///
/// ```
/// use crunch_engine::{BoardSize, GameSession, LevelData};
///
/// let level = LevelData::full(BoardSize::DEFAULT, 10, 1000);
/// let mut session = GameSession::new(&level, BoardSize::DEFAULT);
///
/// let swap = *session.board().possible_swaps().iter().next().unwrap();
/// let outcome = session.try_swap(&swap).unwrap();
///
/// assert!(outcome.score >= 60);
/// assert_eq!(session.moves_left(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    moves: usize,
    target_score: usize,
    stats: GameStats,
    session_state: SessionState,
}

impl GameSession {
    #[must_use]
    pub fn new(level: &LevelData, size: BoardSize) -> Self {
        Self::with_seed(level, size, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic play.
    #[must_use]
    pub fn with_seed(level: &LevelData, size: BoardSize, seed: BoardSeed) -> Self {
        let mut board = Board::with_seed(level.tile_mask(size), seed);
        board.shuffle();
        let mut this = Self {
            board,
            moves: level.moves,
            target_score: level.target_score,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
        };
        this.update_state();
        this
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn target_score(&self) -> usize {
        self.target_score
    }

    #[must_use]
    pub fn moves_left(&self) -> usize {
        self.moves.saturating_sub(self.stats.completed_swaps())
    }

    /// Plays `swap` if it is legal and resolves the resulting cascade.
    ///
    /// An illegal swap leaves the board untouched; a driver that wants to
    /// show it being tried can call [`Board::perform_swap`] twice on its own
    /// copy.
    pub fn try_swap(&mut self, swap: &Swap) -> Result<TurnOutcome, IllegalSwapError> {
        if !self.session_state.is_playing() {
            return Err(IllegalSwapError::GameOver);
        }
        if !self.board.is_possible_swap(swap) {
            return Err(IllegalSwapError::NotPossible);
        }

        self.board.perform_swap(swap);
        let steps = self.resolve_cascade();
        let chains: Vec<Chain> = steps
            .iter()
            .flat_map(|step| step.chains.iter().cloned())
            .collect();
        let score = chains.iter().map(Chain::score).sum();
        self.stats.complete_swap(&chains, steps.len());

        self.board.detect_possible_swaps();
        let reshuffled = self
            .board
            .possible_swaps()
            .is_empty()
            .then(|| self.board.shuffle());

        debug!(%swap, rounds = steps.len(), score, "completed swap");
        self.update_state();

        Ok(TurnOutcome {
            swap: *swap,
            steps,
            score,
            reshuffled,
        })
    }

    fn resolve_cascade(&mut self) -> Vec<CascadeStep> {
        let mut steps = vec![];
        loop {
            let chains = self.board.remove_matches();
            if chains.is_empty() {
                return steps;
            }
            let fallen = self.board.fill_holes();
            let new_pieces = self.board.top_off_pieces();
            steps.push(CascadeStep {
                chains,
                fallen,
                new_pieces,
            });
        }
    }

    fn update_state(&mut self) {
        self.session_state = if self.stats.score() >= self.target_score {
            SessionState::Won
        } else if self.moves_left() == 0 || self.board.possible_swaps().is_empty() {
            SessionState::Lost
        } else {
            SessionState::Playing
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(n: u8) -> BoardSeed {
        BoardSeed::from_bytes([n; 16])
    }

    fn first_swap(session: &GameSession) -> Swap {
        let mut swaps: Vec<_> = session.board().possible_swaps().iter().copied().collect();
        swaps.sort_by_key(|s| (s.first().position(), s.second().position()));
        swaps[0]
    }

    #[test]
    fn test_new_session_is_playing() {
        let level = LevelData::full(BoardSize::DEFAULT, 10, 5000);
        let session = GameSession::with_seed(&level, BoardSize::DEFAULT, seed(1));
        assert!(session.session_state().is_playing());
        assert_eq!(session.moves_left(), 10);
        assert_eq!(session.board().piece_count(), 81);
        assert_eq!(session.target_score(), 5000);
    }

    #[test]
    fn test_legal_swap_scores_and_uses_a_move() {
        let level = LevelData::full(BoardSize::DEFAULT, 10, 100_000);
        let mut session = GameSession::with_seed(&level, BoardSize::DEFAULT, seed(2));
        let swap = first_swap(&session);

        let outcome = session.try_swap(&swap).unwrap();
        assert!(!outcome.steps.is_empty());
        assert!(outcome.score >= 60);
        assert_eq!(outcome.score, session.stats().score());
        assert_eq!(session.moves_left(), 9);
        assert_eq!(session.board().piece_count(), 81);
        assert!(session.board().detect_horizontal_matches().is_empty());
        assert!(session.board().detect_vertical_matches().is_empty());

        // Every round refills exactly what it removed
        for step in &outcome.steps {
            let removed: std::collections::HashSet<Piece> = step
                .chains
                .iter()
                .flat_map(|chain| chain.pieces().iter().copied())
                .collect();
            let created: usize = step.new_pieces.iter().map(Vec::len).sum();
            assert_eq!(removed.len(), created);
        }
    }

    #[test]
    fn test_illegal_swap_is_rejected_without_changes() {
        let level = LevelData::full(BoardSize::DEFAULT, 10, 100_000);
        let mut session = GameSession::with_seed(&level, BoardSize::DEFAULT, seed(3));
        let before = session.board().to_string();

        let board = session.board();
        let illegal = board
            .size()
            .positions()
            .filter_map(|(column, row)| board.swap_between((column, row), (column + 1, row)))
            .find(|swap| !board.is_possible_swap(swap))
            .unwrap();

        assert_eq!(
            session.try_swap(&illegal).unwrap_err(),
            IllegalSwapError::NotPossible
        );
        assert_eq!(session.board().to_string(), before);
        assert_eq!(session.moves_left(), 10);
    }

    #[test]
    fn test_running_out_of_moves_loses() {
        let level = LevelData::full(BoardSize::DEFAULT, 1, 100_000);
        let mut session = GameSession::with_seed(&level, BoardSize::DEFAULT, seed(4));
        let swap = first_swap(&session);
        session.try_swap(&swap).unwrap();
        assert!(session.session_state().is_lost());

        let next = first_swap(&session);
        assert_eq!(
            session.try_swap(&next).unwrap_err(),
            IllegalSwapError::GameOver
        );
    }

    #[test]
    fn test_reaching_target_wins() {
        let level = LevelData::full(BoardSize::DEFAULT, 5, 60);
        let mut session = GameSession::with_seed(&level, BoardSize::DEFAULT, seed(5));
        let swap = first_swap(&session);
        session.try_swap(&swap).unwrap();
        assert!(session.session_state().is_won());
    }

    #[test]
    fn test_level_without_tiles_has_no_playable_board() {
        let level = LevelData {
            tiles: None,
            moves: 10,
            target_score: 100,
        };
        let session = GameSession::with_seed(&level, BoardSize::DEFAULT, seed(6));
        assert_eq!(session.board().piece_count(), 0);
        assert!(session.session_state().is_lost());
    }

    #[test]
    fn test_same_seed_same_game() {
        let level = LevelData::full(BoardSize::DEFAULT, 5, 100_000);
        let mut a = GameSession::with_seed(&level, BoardSize::DEFAULT, seed(7));
        let mut b = GameSession::with_seed(&level, BoardSize::DEFAULT, seed(7));
        for _ in 0..5 {
            let swap = first_swap(&a);
            assert_eq!(swap, first_swap(&b));
            let score_a = a.try_swap(&swap).unwrap().score;
            let score_b = b.try_swap(&swap).unwrap().score;
            assert_eq!(score_a, score_b);
            assert_eq!(a.board().to_string(), b.board().to_string());
        }
    }
}
