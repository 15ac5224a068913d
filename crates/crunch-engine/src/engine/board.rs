use std::{collections::HashSet, fmt};

use arrayvec::ArrayVec;
use rand::Rng as _;
use rand_pcg::Pcg32;
use tracing::{debug, warn};

use crate::core::{
    chain::{Chain, ChainAxis, MIN_CHAIN_LENGTH},
    grid::{BoardSize, Grid},
    piece::{Piece, PieceKind},
    swap::Swap,
    tile_mask::TileMask,
};

use super::board_seed::BoardSeed;

/// Upper bound on full-board regenerations in [`Board::shuffle`].
///
/// Only masks that can never offer a legal swap (too few or too scattered
/// playable cells) come anywhere near it.
pub const MAX_SHUFFLE_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    fn step(self, size: BoardSize, (column, row): (usize, usize)) -> Option<(usize, usize)> {
        match self {
            Direction::Left => Some((column.checked_sub(1)?, row)),
            Direction::Right => (column + 1 < size.columns).then_some((column + 1, row)),
            Direction::Down => Some((column, row.checked_sub(1)?)),
            Direction::Up => (row + 1 < size.rows).then_some((column, row + 1)),
        }
    }
}

impl ChainAxis {
    fn backward(self) -> Direction {
        match self {
            ChainAxis::Horizontal => Direction::Left,
            ChainAxis::Vertical => Direction::Down,
        }
    }

    fn forward(self) -> Direction {
        match self {
            ChainAxis::Horizontal => Direction::Right,
            ChainAxis::Vertical => Direction::Up,
        }
    }
}

/// The authoritative state of a match-3 board.
///
/// `Board` owns every piece through its grid and the fixed [`TileMask`]
/// saying which cells may hold one. It exposes the primitive steps of a turn
/// and leaves their sequencing to the caller:
///
/// 1. [`shuffle`](Self::shuffle) fills the board with no ready-made chains
///    and at least one legal swap
/// 2. [`is_possible_swap`](Self::is_possible_swap) checks a requested swap
/// 3. [`perform_swap`](Self::perform_swap) exchanges two pieces
/// 4. [`remove_matches`](Self::remove_matches) clears every chain
/// 5. [`fill_holes`](Self::fill_holes) lets pieces fall into the gaps
/// 6. [`top_off_pieces`](Self::top_off_pieces) adds new pieces at the top
/// 7. Steps 4-6 repeat until no chain is left, then
///    [`detect_possible_swaps`](Self::detect_possible_swaps) prepares the next turn
///
/// [`GameSession`](super::GameSession) runs this loop for you.
///
/// # Example
///
/// ```
/// use crunch_engine::{Board, BoardSize, TileMask};
///
/// let mut board = Board::new(TileMask::full(BoardSize::DEFAULT));
/// let pieces = board.shuffle();
/// assert_eq!(pieces.len(), 81);
/// assert!(!board.possible_swaps().is_empty());
/// assert!(board.remove_matches().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    tiles: TileMask,
    pieces: Grid<Piece>,
    possible_swaps: HashSet<Swap>,
    rng: Pcg32,
}

impl Board {
    /// Creates an empty board with a random seed.
    ///
    /// Call [`Self::shuffle`] to place the first pieces.
    #[must_use]
    pub fn new(tiles: TileMask) -> Self {
        Self::with_seed(tiles, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic play.
    #[must_use]
    pub fn with_seed(tiles: TileMask, seed: BoardSeed) -> Self {
        let pieces = Grid::new(tiles.size());
        Self {
            tiles,
            pieces,
            possible_swaps: HashSet::new(),
            rng: seed.rng(),
        }
    }

    /// Creates a board holding exactly the given pieces.
    ///
    /// The legal-swap set is computed before returning.
    ///
    /// # Panics
    ///
    /// Panics if a piece lies outside the board, on an unplayable cell, or on
    /// a cell already taken by another piece.
    #[must_use]
    pub fn from_pieces<I>(tiles: TileMask, seed: BoardSeed, pieces: I) -> Self
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut board = Self::with_seed(tiles, seed);
        for piece in pieces {
            let (column, row) = piece.position();
            assert!(
                board.tiles.is_playable(column, row),
                "cell ({column}, {row}) is not playable"
            );
            let previous = board.pieces.set(column, row, Some(piece));
            assert!(previous.is_none(), "cell ({column}, {row}) is already taken");
        }
        board.detect_possible_swaps();
        board
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.tiles.size()
    }

    #[must_use]
    pub fn tiles(&self) -> &TileMask {
        &self.tiles
    }

    #[must_use]
    pub fn is_playable(&self, column: usize, row: usize) -> bool {
        self.tiles.is_playable(column, row)
    }

    #[must_use]
    pub fn piece_at(&self, column: usize, row: usize) -> Option<Piece> {
        self.pieces.get(column, row).copied()
    }

    /// Iterates over all pieces in row-major order (bottom row first).
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.pieces.iter().map(|(_, piece)| *piece)
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces.occupied_count()
    }

    /// Returns the legal swaps computed by the last call to
    /// [`Self::detect_possible_swaps`].
    #[must_use]
    pub fn possible_swaps(&self) -> &HashSet<Swap> {
        &self.possible_swaps
    }

    fn kind_at(&self, (column, row): (usize, usize)) -> Option<PieceKind> {
        self.pieces.get(column, row).map(Piece::kind)
    }

    /// Counts consecutive pieces of `kind` starting next to `from` and
    /// walking in `direction`.
    fn count_same_kind(&self, from: (usize, usize), direction: Direction, kind: PieceKind) -> usize {
        let size = self.size();
        std::iter::successors(direction.step(size, from), |&pos| direction.step(size, pos))
            .take_while(|&pos| self.kind_at(pos) == Some(kind))
            .count()
    }

    /// Length of the same-kind run through `pos` along `axis`, or 0 for an
    /// empty cell.
    fn run_length(&self, pos: (usize, usize), axis: ChainAxis) -> usize {
        let Some(kind) = self.kind_at(pos) else {
            return 0;
        };
        1 + self.count_same_kind(pos, axis.backward(), kind)
            + self.count_same_kind(pos, axis.forward(), kind)
    }

    fn has_chain_at(&self, pos: (usize, usize)) -> bool {
        self.run_length(pos, ChainAxis::Horizontal) >= MIN_CHAIN_LENGTH
            || self.run_length(pos, ChainAxis::Vertical) >= MIN_CHAIN_LENGTH
    }

    /// Kind that would complete a run of three if placed next to the two
    /// cells in `direction`.
    fn completing_kind(&self, pos: (usize, usize), direction: Direction) -> Option<PieceKind> {
        let size = self.size();
        let near = direction.step(size, pos)?;
        let far = direction.step(size, near)?;
        let kind = self.kind_at(near)?;
        (self.kind_at(far) == Some(kind)).then_some(kind)
    }

    fn random_kind_excluding(&mut self, excluded: &[PieceKind]) -> PieceKind {
        let allowed: ArrayVec<PieceKind, { PieceKind::LEN }> = PieceKind::ALL
            .into_iter()
            .filter(|kind| !excluded.contains(kind))
            .collect();
        debug_assert!(!allowed.is_empty());
        allowed[self.rng.random_range(0..allowed.len())]
    }

    /// Fills the board with new pieces until it offers at least one legal
    /// swap, and returns the placed pieces.
    ///
    /// The new board never contains a chain. Regeneration gives up after
    /// [`MAX_SHUFFLE_ATTEMPTS`], in which case the last board is kept and
    /// [`Self::possible_swaps`] is empty.
    pub fn shuffle(&mut self) -> Vec<Piece> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let pieces = self.create_initial_pieces();
            let possible = self.detect_possible_swaps().len();
            if possible > 0 {
                debug!(attempts, possible, "shuffled board");
                return pieces;
            }
            if attempts >= MAX_SHUFFLE_ATTEMPTS {
                warn!(attempts, "no board with a legal swap found, keeping last shuffle");
                return pieces;
            }
        }
    }

    fn create_initial_pieces(&mut self) -> Vec<Piece> {
        self.pieces = Grid::new(self.size());
        let positions: Vec<_> = self.tiles.playable_positions().collect();
        let mut placed = Vec::with_capacity(positions.len());
        for pos in positions {
            // Only cells to the left and below are filled at this point
            let excluded: ArrayVec<PieceKind, 2> = [Direction::Left, Direction::Down]
                .into_iter()
                .filter_map(|direction| self.completing_kind(pos, direction))
                .collect();
            let kind = self.random_kind_excluding(&excluded);
            let piece = Piece::new(kind, pos.0, pos.1);
            self.pieces.set(pos.0, pos.1, Some(piece));
            placed.push(piece);
        }
        placed
    }

    /// Recomputes and returns the set of swaps that would create a chain.
    ///
    /// Each piece is tried against its right and upper neighbours; the left
    /// and lower pairs are the same swaps seen from the other side.
    pub fn detect_possible_swaps(&mut self) -> &HashSet<Swap> {
        let size = self.size();
        let mut swaps = HashSet::new();
        for pos in size.positions() {
            let Some(piece) = self.pieces.get(pos.0, pos.1).copied() else {
                continue;
            };
            for direction in [Direction::Right, Direction::Up] {
                let Some(other_pos) = direction.step(size, pos) else {
                    continue;
                };
                let Some(other) = self.pieces.get(other_pos.0, other_pos.1).copied() else {
                    continue;
                };
                self.pieces.swap_cells(pos, other_pos);
                if self.has_chain_at(pos) || self.has_chain_at(other_pos) {
                    swaps.insert(Swap::new(piece, other));
                }
                self.pieces.swap_cells(pos, other_pos);
            }
        }
        debug!(count = swaps.len(), "detected possible swaps");
        self.possible_swaps = swaps;
        &self.possible_swaps
    }

    #[must_use]
    pub fn is_possible_swap(&self, swap: &Swap) -> bool {
        self.possible_swaps.contains(swap)
    }

    /// Builds the swap between the pieces at two cells.
    ///
    /// Returns `None` if either cell is outside the board or empty, or if the
    /// cells are not orthogonal neighbours.
    #[must_use]
    pub fn swap_between(&self, from: (usize, usize), to: (usize, usize)) -> Option<Swap> {
        let size = self.size();
        if !size.contains(from.0, from.1) || !size.contains(to.0, to.1) {
            return None;
        }
        let a = self.piece_at(from.0, from.1)?;
        let b = self.piece_at(to.0, to.1)?;
        a.is_adjacent_to(&b).then(|| Swap::new(a, b))
    }

    /// Exchanges the two pieces of `swap` on the board.
    ///
    /// No legality check is made. Performing the same swap a second time puts
    /// the pieces back, which is how an invalid swap is undone.
    ///
    /// # Panics
    ///
    /// Panics if the cells are not adjacent or either cell is empty.
    pub fn perform_swap(&mut self, swap: &Swap) {
        assert!(swap.is_adjacent(), "cannot perform non-adjacent {swap}");
        let pos_a = swap.first().position();
        let pos_b = swap.second().position();
        assert!(
            self.pieces.is_occupied(pos_a.0, pos_a.1) && self.pieces.is_occupied(pos_b.0, pos_b.1),
            "cannot perform {swap} on an empty cell"
        );
        self.pieces.swap_cells(pos_a, pos_b);
        for (column, row) in [pos_a, pos_b] {
            if let Some(piece) = self.pieces.get_mut(column, row) {
                piece.move_to(column, row);
            }
        }
    }

    /// Finds every horizontal chain, scanning each row left to right.
    #[must_use]
    pub fn detect_horizontal_matches(&self) -> Vec<Chain> {
        self.detect_matches(ChainAxis::Horizontal)
    }

    /// Finds every vertical chain, scanning each column bottom to top.
    #[must_use]
    pub fn detect_vertical_matches(&self) -> Vec<Chain> {
        self.detect_matches(ChainAxis::Vertical)
    }

    fn detect_matches(&self, axis: ChainAxis) -> Vec<Chain> {
        let size = self.size();
        let (lines, line_len) = match axis {
            ChainAxis::Horizontal => (size.rows, size.columns),
            ChainAxis::Vertical => (size.columns, size.rows),
        };
        let mut chains = vec![];
        for line in 0..lines {
            let at = |i: usize| match axis {
                ChainAxis::Horizontal => (i, line),
                ChainAxis::Vertical => (line, i),
            };
            let mut i = 0;
            while i < line_len {
                let Some(kind) = self.kind_at(at(i)) else {
                    i += 1;
                    continue;
                };
                let run = 1 + self.count_same_kind(at(i), axis.forward(), kind);
                if run >= MIN_CHAIN_LENGTH {
                    let pieces = (i..i + run)
                        .filter_map(|j| {
                            let (column, row) = at(j);
                            self.piece_at(column, row)
                        })
                        .collect();
                    chains.push(Chain::new(axis, pieces));
                }
                i += run;
            }
        }
        chains
    }

    /// Removes every chain from the board and returns them, horizontal chains
    /// first.
    ///
    /// A piece lying in both a horizontal and a vertical chain is reported in
    /// both but removed once. Each chain keeps its own score.
    pub fn remove_matches(&mut self) -> Vec<Chain> {
        let mut chains = self.detect_horizontal_matches();
        chains.extend(self.detect_vertical_matches());
        for chain in &chains {
            for piece in chain.pieces() {
                self.pieces.take(piece.column(), piece.row());
            }
        }
        if !chains.is_empty() {
            debug!(count = chains.len(), "removed chains");
        }
        chains
    }

    /// Moves pieces down into the empty playable cells below them.
    ///
    /// Returns, per column, the pieces that fell in bottom-to-top order.
    /// Columns where nothing moved are left out.
    pub fn fill_holes(&mut self) -> Vec<Vec<Piece>> {
        let size = self.size();
        let mut columns = vec![];
        for column in 0..size.columns {
            let mut fallen = vec![];
            for row in 0..size.rows {
                if !self.tiles.is_playable(column, row) || self.pieces.is_occupied(column, row) {
                    continue;
                }
                let Some(above) = (row + 1..size.rows).find(|&r| self.pieces.is_occupied(column, r))
                else {
                    break;
                };
                if let Some(mut piece) = self.pieces.take(column, above) {
                    piece.move_to(column, row);
                    self.pieces.set(column, row, Some(piece));
                    fallen.push(piece);
                }
            }
            if !fallen.is_empty() {
                columns.push(fallen);
            }
        }
        columns
    }

    /// Creates new pieces in the empty cells at the top of each column.
    ///
    /// Every new piece has a different kind from the one created just before
    /// it. Returns, per column, the new pieces in top-to-bottom order.
    /// Columns that needed nothing are left out.
    pub fn top_off_pieces(&mut self) -> Vec<Vec<Piece>> {
        let size = self.size();
        let mut columns = vec![];
        let mut last_kind = None;
        for column in 0..size.columns {
            let mut created = vec![];
            for row in (0..size.rows).rev() {
                if self.pieces.is_occupied(column, row) {
                    break;
                }
                if !self.tiles.is_playable(column, row) {
                    continue;
                }
                let excluded: ArrayVec<PieceKind, 1> = last_kind.into_iter().collect();
                let kind = self.random_kind_excluding(&excluded);
                last_kind = Some(kind);
                let piece = Piece::new(kind, column, row);
                self.pieces.set(column, row, Some(piece));
                created.push(piece);
            }
            if !created.is_empty() {
                columns.push(created);
            }
        }
        columns
    }
}

/// Renders the board top row first, one character per cell: the piece kind
/// character, `.` for an empty playable cell and a space for a hole.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for row in (0..size.rows).rev() {
            for column in 0..size.columns {
                let c = match self.piece_at(column, row) {
                    Some(piece) => piece.kind().as_char(),
                    None if self.tiles.is_playable(column, row) => '.',
                    None => ' ',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
