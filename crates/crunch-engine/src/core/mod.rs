pub use self::{chain::*, grid::*, piece::*, swap::*, tile_mask::*};

pub(crate) mod chain;
pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod swap;
pub(crate) mod tile_mask;
