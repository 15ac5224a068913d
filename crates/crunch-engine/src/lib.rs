pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalSwapError {
    #[display("swap does not produce a chain")]
    NotPossible,
    #[display("game is already over")]
    GameOver,
}
