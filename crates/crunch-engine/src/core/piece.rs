use std::hash::{Hash, Hasher};

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::Serialize;

/// A piece placed on the board: its kind and the cell it currently occupies.
///
/// Equality and hashing only look at the position. Two `Piece` values are
/// equal when they refer to the same board cell, whatever their kind. The
/// board relies on this to answer "is this the piece at that slot" after a
/// swap or a drop has moved pieces around.
///
/// # Example
///
/// ```
/// use crunch_engine::{Piece, PieceKind};
///
/// let a = Piece::new(PieceKind::Donut, 2, 3);
/// let b = Piece::new(PieceKind::Danish, 2, 3);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    kind: PieceKind,
    column: usize,
    row: usize,
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position().hash(state);
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind@column,row" (e.g., "D@4,0")
        let s = format!("{}@{},{}", self.kind.as_char(), self.column, self.row);
        serializer.serialize_str(&s)
    }
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, column: usize, row: usize) -> Self {
        Self { kind, column, row }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// Returns `true` if `other` sits in one of the four orthogonally
    /// neighbouring cells.
    #[must_use]
    pub fn is_adjacent_to(&self, other: &Piece) -> bool {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row) == 1
    }

    pub(crate) fn move_to(&mut self, column: usize, row: usize) {
        self.column = column;
        self.row = row;
    }
}

/// The kind of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    Croissant = 0,
    Cupcake = 1,
    Danish = 2,
    Donut = 3,
    Macaroon = 4,
    SugarCookie = 5,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (6).
    pub const LEN: usize = 6;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::Croissant,
        PieceKind::Cupcake,
        PieceKind::Danish,
        PieceKind::Donut,
        PieceKind::Macaroon,
        PieceKind::SugarCookie,
    ];

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use crunch_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::Croissant.as_char(), 'C');
    /// assert_eq!(PieceKind::Donut.as_char(), 'O');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::Croissant => 'C',
            PieceKind::Cupcake => 'U',
            PieceKind::Danish => 'D',
            PieceKind::Donut => 'O',
            PieceKind::Macaroon => 'M',
            PieceKind::SugarCookie => 'S',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use crunch_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('M'), Some(PieceKind::Macaroon));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(PieceKind::Croissant),
            'U' => Some(PieceKind::Cupcake),
            'D' => Some(PieceKind::Danish),
            'O' => Some(PieceKind::Donut),
            'M' => Some(PieceKind::Macaroon),
            'S' => Some(PieceKind::SugarCookie),
            _ => None,
        }
    }
}
