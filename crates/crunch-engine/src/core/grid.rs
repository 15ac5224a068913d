use serde::{Deserialize, Serialize};

/// Dimensions of a board, in cells.
///
/// Row 0 is the bottom row and column 0 is the leftmost column.
///
/// # Example
///
/// ```
/// use crunch_engine::BoardSize;
///
/// let size = BoardSize::DEFAULT;
/// assert_eq!(size.cell_count(), 81);
/// assert!(size.contains(8, 8));
/// assert!(!size.contains(9, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub columns: usize,
    pub rows: usize,
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BoardSize {
    /// The standard 9×9 board.
    pub const DEFAULT: Self = Self::new(9, 9);

    #[must_use]
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.columns * self.rows
    }

    #[must_use]
    pub const fn contains(self, column: usize, row: usize) -> bool {
        column < self.columns && row < self.rows
    }

    /// Returns every `(column, row)` of the board in row-major order,
    /// bottom row first and left to right within a row.
    pub fn positions(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |column| (column, row)))
    }
}

/// Fixed-size 2D container where every cell may or may not hold a value.
///
/// Cells are addressed by `(column, row)`. Accessing a cell outside the
/// board is a caller bug and panics.
///
/// # Example
///
/// ```
/// use crunch_engine::{BoardSize, Grid};
///
/// let mut grid = Grid::new(BoardSize::new(3, 2));
/// grid.set(2, 1, Some('x'));
/// assert_eq!(grid.get(2, 1), Some(&'x'));
/// assert_eq!(grid.get(0, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    size: BoardSize,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    /// Creates a grid with every cell empty.
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        let cells = std::iter::repeat_with(|| None)
            .take(size.cell_count())
            .collect();
        Self { size, cells }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.size.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.size.rows
    }

    fn index(&self, column: usize, row: usize) -> usize {
        assert!(
            self.size.contains(column, row),
            "cell ({column}, {row}) is outside the {}x{} grid",
            self.size.columns,
            self.size.rows,
        );
        row * self.size.columns + column
    }

    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> Option<&T> {
        self.cells[self.index(column, row)].as_ref()
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut T> {
        let i = self.index(column, row);
        self.cells[i].as_mut()
    }

    #[must_use]
    pub fn is_occupied(&self, column: usize, row: usize) -> bool {
        self.get(column, row).is_some()
    }

    /// Stores `value` in the cell and returns what was there before.
    pub fn set(&mut self, column: usize, row: usize, value: Option<T>) -> Option<T> {
        let i = self.index(column, row);
        std::mem::replace(&mut self.cells[i], value)
    }

    /// Empties the cell and returns its previous value.
    pub fn take(&mut self, column: usize, row: usize) -> Option<T> {
        let i = self.index(column, row);
        self.cells[i].take()
    }

    /// Exchanges the contents of two cells.
    pub fn swap_cells(&mut self, (c1, r1): (usize, usize), (c2, r2): (usize, usize)) {
        let i = self.index(c1, r1);
        let j = self.index(c2, r2);
        self.cells.swap(i, j);
    }

    /// Iterates over the occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        let columns = self.size.columns;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|value| ((i % columns, i / columns), value))
        })
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::<u8>::new(BoardSize::DEFAULT);
        assert_eq!(grid.columns(), 9);
        assert_eq!(grid.rows(), 9);
        assert_eq!(grid.occupied_count(), 0);
        for (column, row) in BoardSize::DEFAULT.positions() {
            assert!(!grid.is_occupied(column, row));
        }
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut grid = Grid::new(BoardSize::new(4, 3));
        assert_eq!(grid.set(3, 2, Some(1)), None);
        assert_eq!(grid.set(3, 2, Some(2)), Some(1));
        assert_eq!(grid.take(3, 2), Some(2));
        assert_eq!(grid.get(3, 2), None);
    }

    #[test]
    fn test_cells_are_independent() {
        // A non-square grid catches column/row mixups in the index math
        let mut grid = Grid::new(BoardSize::new(4, 2));
        grid.set(1, 0, Some('a'));
        grid.set(0, 1, Some('b'));
        assert_eq!(grid.get(1, 0), Some(&'a'));
        assert_eq!(grid.get(0, 1), Some(&'b'));
        assert_eq!(grid.get(1, 1), None);
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_swap_cells() {
        let mut grid = Grid::new(BoardSize::new(2, 2));
        grid.set(0, 0, Some(10));
        grid.swap_cells((0, 0), (1, 1));
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.get(1, 1), Some(&10));
    }

    #[test]
    fn test_iter_yields_positions_in_row_major_order() {
        let mut grid = Grid::new(BoardSize::new(3, 3));
        grid.set(2, 2, Some('c'));
        grid.set(0, 1, Some('b'));
        grid.set(1, 0, Some('a'));
        let cells: Vec<_> = grid.iter().map(|(pos, v)| (pos, *v)).collect();
        assert_eq!(cells, vec![((1, 0), 'a'), ((0, 1), 'b'), ((2, 2), 'c')]);
    }

    #[test]
    fn test_positions_order() {
        let positions: Vec<_> = BoardSize::new(2, 2).positions().collect();
        assert_eq!(positions, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    #[should_panic(expected = "outside the 9x9 grid")]
    fn test_out_of_range_column_panics() {
        let grid = Grid::<u8>::new(BoardSize::DEFAULT);
        let _ = grid.get(9, 0);
    }

    #[test]
    #[should_panic(expected = "outside the 9x9 grid")]
    fn test_out_of_range_row_panics() {
        let mut grid = Grid::<u8>::new(BoardSize::DEFAULT);
        grid.set(0, 9, Some(1));
    }
}
