use std::path::PathBuf;

use crunch_engine::{BoardSize, LevelData};
use tracing::warn;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LevelArg {
    /// Level file (JSON with `tiles`, `moves` and `targetScore`).
    /// Without it every cell is playable.
    #[arg(long)]
    level: Option<PathBuf>,
    /// Board width in cells
    #[arg(long, default_value_t = 9)]
    columns: usize,
    /// Board height in cells
    #[arg(long, default_value_t = 9)]
    rows: usize,
    /// Move budget when no level file is given
    #[arg(long, default_value_t = 20)]
    moves: usize,
    /// Target score when no level file is given
    #[arg(long, default_value_t = 3000)]
    target_score: usize,
}

impl LevelArg {
    pub(crate) fn size(&self) -> BoardSize {
        BoardSize::new(self.columns, self.rows)
    }

    pub(crate) fn load(&self) -> anyhow::Result<LevelData> {
        let Some(path) = &self.level else {
            return Ok(LevelData::full(self.size(), self.moves, self.target_score));
        };
        let level = util::read_level_file(path)?;
        if level.tiles.is_none() {
            warn!(
                level = %path.display(),
                "level has no tiles section, the board will be empty"
            );
        }
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_arg(level: Option<PathBuf>) -> LevelArg {
        LevelArg {
            level,
            columns: 9,
            rows: 9,
            moves: 20,
            target_score: 3000,
        }
    }

    #[test]
    fn test_load_without_file_gives_full_level() {
        let level = level_arg(None).load().unwrap();
        assert_eq!(level.moves, 20);
        assert_eq!(level.tile_mask(BoardSize::DEFAULT).playable_count(), 81);
    }

    #[test]
    fn test_load_level_without_tiles() {
        let path =
            std::env::temp_dir().join(format!("crunch-no-tiles-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"moves": 4, "targetScore": 400}"#).unwrap();
        let level = level_arg(Some(path.clone())).load();
        std::fs::remove_file(&path).unwrap();

        let level = level.unwrap();
        assert!(level.tiles.is_none());
        assert_eq!(level.tile_mask(BoardSize::DEFAULT).playable_count(), 0);
    }
}
