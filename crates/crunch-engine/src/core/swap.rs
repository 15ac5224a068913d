use std::fmt;

use serde::Serialize;

use super::piece::Piece;

/// A proposed exchange of two adjacent pieces.
///
/// A swap is unordered: `Swap::new(a, b) == Swap::new(b, a)`. The pair is
/// stored with the lower `(row, column)` first so the derived equality and
/// hash are symmetric.
///
/// # Example
///
/// ```
/// use crunch_engine::{Piece, PieceKind, Swap};
///
/// let a = Piece::new(PieceKind::Donut, 0, 0);
/// let b = Piece::new(PieceKind::Danish, 1, 0);
/// assert_eq!(Swap::new(a, b), Swap::new(b, a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Swap {
    first: Piece,
    second: Piece,
}

impl Swap {
    #[must_use]
    pub fn new(a: Piece, b: Piece) -> Self {
        let key = |p: &Piece| (p.row(), p.column());
        if key(&a) <= key(&b) {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The piece with the lower `(row, column)`.
    #[must_use]
    pub fn first(&self) -> Piece {
        self.first
    }

    #[must_use]
    pub fn second(&self) -> Piece {
        self.second
    }

    #[must_use]
    pub fn is_adjacent(&self) -> bool {
        self.first.is_adjacent_to(&self.second)
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "swap {}@{},{} with {}@{},{}",
            self.first.kind().as_char(),
            self.first.column(),
            self.first.row(),
            self.second.kind().as_char(),
            self.second.column(),
            self.second.row(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::PieceKind;

    use super::*;

    #[test]
    fn test_swap_is_symmetric() {
        let a = Piece::new(PieceKind::Cupcake, 3, 4);
        let b = Piece::new(PieceKind::Macaroon, 3, 5);
        assert_eq!(Swap::new(a, b), Swap::new(b, a));

        let mut set = HashSet::new();
        set.insert(Swap::new(a, b));
        assert!(set.contains(&Swap::new(b, a)));
    }

    #[test]
    fn test_canonical_order() {
        let a = Piece::new(PieceKind::Cupcake, 5, 2);
        let b = Piece::new(PieceKind::Macaroon, 4, 2);
        let swap = Swap::new(a, b);
        assert_eq!(swap.first().position(), (4, 2));
        assert_eq!(swap.second().position(), (5, 2));
        assert!(swap.is_adjacent());
    }

    #[test]
    fn test_distinct_pairs_differ() {
        let a = Piece::new(PieceKind::Cupcake, 0, 0);
        let b = Piece::new(PieceKind::Cupcake, 1, 0);
        let c = Piece::new(PieceKind::Cupcake, 0, 1);
        assert_ne!(Swap::new(a, b), Swap::new(a, c));
    }

    #[test]
    fn test_display() {
        let a = Piece::new(PieceKind::Danish, 1, 0);
        let b = Piece::new(PieceKind::Donut, 0, 0);
        assert_eq!(Swap::new(a, b).to_string(), "swap O@0,0 with D@1,0");
    }
}
