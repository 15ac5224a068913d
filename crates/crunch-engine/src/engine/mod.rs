//! Board engine and game flow.
//!
//! This module builds the game rules on top of the core data types:
//!
//! - [`Board`] - Authoritative board state: generation, legal swaps, chain
//!   removal, gravity and refill
//! - [`BoardSeed`] - Seed for deterministic board generation
//! - [`LevelData`] - Level description (tile layout, move budget, target score)
//! - [`GameSession`] - A level being played, resolving cascades after each swap
//! - [`GameStats`] - Score and chain statistics
//!
//! # Turn Flow
//!
//! 1. Shuffle the board; it starts without chains and with at least one
//!    legal swap
//! 2. The player proposes a [`Swap`](crate::Swap); only swaps in
//!    [`Board::possible_swaps`] are accepted
//! 3. The swap is performed and chains are removed
//! 4. Pieces fall into the holes and new pieces top off each column
//! 5. Steps 3-4 repeat until no chain is left
//! 6. Legal swaps are recomputed for the next turn
//!
//! [`GameSession`] runs steps 2-6 for you; drivers that animate each step
//! can call the [`Board`] primitives directly.
//!
//! # Example
//!
//! ```
//! use crunch_engine::{BoardSeed, BoardSize, GameSession, LevelData};
//!
//! let level = LevelData::full(BoardSize::DEFAULT, 20, 3000);
//! let seed = BoardSeed::from_bytes([7; 16]);
//! let mut session = GameSession::with_seed(&level, BoardSize::DEFAULT, seed);
//!
//! while session.session_state().is_playing() {
//!     let swap = *session.board().possible_swaps().iter().next().unwrap();
//!     let outcome = session.try_swap(&swap).unwrap();
//!     for step in &outcome.steps {
//!         // animate step.chains, step.fallen and step.new_pieces
//!         assert!(!step.chains.is_empty());
//!     }
//! }
//! ```

pub use self::{
    board::*, board_seed::*, game_session::*, game_stats::*, level::*,
};

mod board;
mod board_seed;
mod game_session;
mod game_stats;
mod level;
