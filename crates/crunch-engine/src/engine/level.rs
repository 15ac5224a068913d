use serde::{Deserialize, Serialize};

use crate::core::{grid::BoardSize, tile_mask::TileMask};

/// Level description supplied by the game's level files.
///
/// The engine does not read files itself; callers deserialize this from
/// whatever source they use. The JSON shape is:
///
/// ```json
/// {
///   "tiles": [[0, 1, 1], [1, 1, 1], [1, 1, 0]],
///   "moves": 15,
///   "targetScore": 1000
/// }
/// ```
///
/// `tiles` lists rows top row first, `1` meaning playable.
///
/// # Example
///
/// ```
/// use crunch_engine::{BoardSize, LevelData};
///
/// let level: LevelData =
///     serde_json::from_str(r#"{"tiles": [[1, 1], [0, 1]], "moves": 5, "targetScore": 300}"#)
///         .unwrap();
/// let mask = level.tile_mask(BoardSize::new(2, 2));
/// assert!(!mask.is_playable(0, 0));
/// assert_eq!(mask.playable_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    #[serde(default)]
    pub tiles: Option<Vec<Vec<u8>>>,
    pub moves: usize,
    pub target_score: usize,
}

impl LevelData {
    /// A level where every cell of `size` is playable.
    #[must_use]
    pub fn full(size: BoardSize, moves: usize, target_score: usize) -> Self {
        Self {
            tiles: Some(vec![vec![1; size.columns]; size.rows]),
            moves,
            target_score,
        }
    }

    /// Builds the tile mask for a board of `size`.
    ///
    /// A level without a `tiles` section has no playable cell.
    #[must_use]
    pub fn tile_mask(&self, size: BoardSize) -> TileMask {
        match &self.tiles {
            Some(rows) => TileMask::from_rows_top_down(size, rows),
            None => TileMask::empty(size),
        }
    }
}
