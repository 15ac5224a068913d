use serde::{Serialize, ser::SerializeStruct as _};

use super::piece::Piece;

/// Points for the shortest possible chain.
pub const BASE_CHAIN_SCORE: usize = 60;

/// Shortest run of same-kind pieces that counts as a chain.
pub const MIN_CHAIN_LENGTH: usize = 3;

/// Direction a chain runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize)]
pub enum ChainAxis {
    Horizontal,
    Vertical,
}

/// A straight run of at least three same-kind pieces.
///
/// Pieces are ordered by increasing column for horizontal chains and by
/// increasing row for vertical chains.
///
/// # Scoring
///
/// A 3-piece chain is worth 60 points and each extra piece adds another 60:
///
/// | Length | Score |
/// |--------|-------|
/// | 3      | 60    |
/// | 4      | 120   |
/// | 5      | 180   |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    axis: ChainAxis,
    pieces: Vec<Piece>,
}

impl Serialize for Chain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Chain", 3)?;
        state.serialize_field("axis", &self.axis)?;
        state.serialize_field("pieces", &self.pieces)?;
        state.serialize_field("score", &self.score())?;
        state.end()
    }
}

impl Chain {
    pub(crate) fn new(axis: ChainAxis, pieces: Vec<Piece>) -> Self {
        assert!(
            pieces.len() >= MIN_CHAIN_LENGTH,
            "chain needs at least {MIN_CHAIN_LENGTH} pieces, got {}",
            pieces.len()
        );
        Self { axis, pieces }
    }

    #[must_use]
    pub fn axis(&self) -> ChainAxis {
        self.axis
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Always `false`; chains hold at least three pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn first_piece(&self) -> Piece {
        self.pieces[0]
    }

    #[must_use]
    pub fn last_piece(&self) -> Piece {
        self.pieces[self.pieces.len() - 1]
    }

    #[must_use]
    pub fn score(&self) -> usize {
        BASE_CHAIN_SCORE * (self.len() - (MIN_CHAIN_LENGTH - 1))
    }
}

#[cfg(test)]
mod tests {
    use crate::PieceKind;

    use super::*;

    fn horizontal(len: usize) -> Chain {
        let pieces = (0..len)
            .map(|column| Piece::new(PieceKind::Donut, column, 0))
            .collect();
        Chain::new(ChainAxis::Horizontal, pieces)
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(horizontal(3).score(), 60);
        assert_eq!(horizontal(4).score(), 120);
        assert_eq!(horizontal(5).score(), 180);
        assert_eq!(horizontal(9).score(), 420);
    }

    #[test]
    fn test_first_and_last_piece() {
        let chain = horizontal(4);
        assert_eq!(chain.first_piece().position(), (0, 0));
        assert_eq!(chain.last_piece().position(), (3, 0));
        assert_eq!(chain.len(), 4);
        assert!(!chain.is_empty());
    }

    #[test]
    #[should_panic(expected = "at least 3 pieces")]
    fn test_short_run_is_rejected() {
        let _ = horizontal(2);
    }

    #[test]
    fn test_serialization_includes_score() {
        let json = serde_json::to_value(horizontal(3)).unwrap();
        assert_eq!(json["axis"], "Horizontal");
        assert_eq!(json["score"], 60);
        assert_eq!(json["pieces"][2], "O@2,0");
    }

    #[test]
    fn test_axis_display() {
        assert_eq!(ChainAxis::Horizontal.to_string(), "Horizontal");
        assert_eq!(ChainAxis::Vertical.to_string(), "Vertical");
    }
}
