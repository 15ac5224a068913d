use super::grid::{BoardSize, Grid};

/// Static layout of the cells that may ever hold a piece.
///
/// The mask is fixed when a board is built and never changes afterwards.
/// Level data lists rows top-down, while the board counts rows bottom-up,
/// so [`TileMask::from_rows_top_down`] flips the row index on import.
///
/// # Example
///
/// ```
/// use crunch_engine::{BoardSize, TileMask};
///
/// let rows = [vec![0, 1], vec![1, 1]];
/// let mask = TileMask::from_rows_top_down(BoardSize::new(2, 2), &rows);
///
/// // The first listed row is the top row.
/// assert!(!mask.is_playable(0, 1));
/// assert!(mask.is_playable(1, 1));
/// assert!(mask.is_playable(0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMask {
    tiles: Grid<()>,
}

impl TileMask {
    /// A mask where every cell is playable.
    #[must_use]
    pub fn full(size: BoardSize) -> Self {
        let mut tiles = Grid::new(size);
        for (column, row) in size.positions() {
            tiles.set(column, row, Some(()));
        }
        Self { tiles }
    }

    /// A mask with no playable cell.
    #[must_use]
    pub fn empty(size: BoardSize) -> Self {
        Self {
            tiles: Grid::new(size),
        }
    }

    /// Builds a mask from level rows listed top row first.
    ///
    /// A value of `1` marks a playable cell; anything else is a hole.
    /// Entries that fall outside `size` are ignored.
    #[must_use]
    pub fn from_rows_top_down(size: BoardSize, rows: &[Vec<u8>]) -> Self {
        let mut tiles = Grid::new(size);
        for (row, values) in rows.iter().enumerate().take(size.rows) {
            let tile_row = size.rows - row - 1;
            for (column, &value) in values.iter().enumerate().take(size.columns) {
                if value == 1 {
                    tiles.set(column, tile_row, Some(()));
                }
            }
        }
        Self { tiles }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.tiles.size()
    }

    #[must_use]
    pub fn is_playable(&self, column: usize, row: usize) -> bool {
        self.tiles.is_occupied(column, row)
    }

    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.tiles.occupied_count()
    }

    /// Iterates over playable cells in row-major order (bottom row first).
    pub fn playable_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tiles.iter().map(|(pos, ())| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_empty() {
        let size = BoardSize::DEFAULT;
        assert_eq!(TileMask::full(size).playable_count(), 81);
        assert_eq!(TileMask::empty(size).playable_count(), 0);
    }

    #[test]
    fn test_row_flip_on_import() {
        let rows = [
            vec![1, 0, 0],
            vec![0, 1, 0],
            vec![0, 0, 0],
        ];
        let mask = TileMask::from_rows_top_down(BoardSize::new(3, 3), &rows);
        assert_eq!(mask.playable_count(), 2);
        // Top-down row 0 becomes board row 2
        assert!(mask.is_playable(0, 2));
        assert!(mask.is_playable(1, 1));
        assert!(!mask.is_playable(0, 0));
    }

    #[test]
    fn test_non_binary_values_are_holes() {
        let rows = [vec![2, 1]];
        let mask = TileMask::from_rows_top_down(BoardSize::new(2, 1), &rows);
        assert!(!mask.is_playable(0, 0));
        assert!(mask.is_playable(1, 0));
    }

    #[test]
    fn test_oversized_rows_are_clipped() {
        let rows = [vec![1, 1, 1, 1], vec![1, 1, 1, 1], vec![1, 1, 1, 1]];
        let mask = TileMask::from_rows_top_down(BoardSize::new(2, 2), &rows);
        assert_eq!(mask.playable_count(), 4);
    }

    #[test]
    fn test_playable_positions_order() {
        let rows = [vec![0, 1], vec![1, 0]];
        let mask = TileMask::from_rows_top_down(BoardSize::new(2, 2), &rows);
        let positions: Vec<_> = mask.playable_positions().collect();
        assert_eq!(positions, vec![(0, 0), (1, 1)]);
    }
}
