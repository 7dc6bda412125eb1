//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shakmaty::{Color as SColor, File, Rank, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// One of the two players. Also used for the side a trainee practices
/// and for board orientation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("White"),
            Side::Black => f.write_str("Black"),
        }
    }
}

impl From<SColor> for Side {
    fn from(color: SColor) -> Self {
        match color {
            SColor::White => Side::White,
            SColor::Black => Side::Black,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Side,
}

/// Convert row/col (0-indexed from the top-left of the rendered board) to a
/// shakmaty Square. With White at the bottom row 0 is rank 8; with Black at
/// the bottom row 0 is rank 1 and files run h..a.
pub fn to_square(row: usize, col: usize, orientation: Side) -> Square {
    let (file, rank) = match orientation {
        Side::White => (col, 7 - row),
        Side::Black => (7 - col, row),
    };
    Square::from_coords(File::new(file as u32), Rank::new(rank as u32))
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece {
        kind,
        color: piece.color.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_square_white_orientation() {
        assert_eq!(to_square(0, 0, Side::White), Square::A8);
        assert_eq!(to_square(7, 4, Side::White), Square::E1);
        assert_eq!(to_square(6, 4, Side::White), Square::E2);
    }

    #[test]
    fn test_to_square_black_orientation() {
        assert_eq!(to_square(0, 0, Side::Black), Square::H1);
        assert_eq!(to_square(7, 7, Side::Black), Square::A8);
        assert_eq!(to_square(1, 3, Side::Black), Square::E2);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::White.opposite(), Side::Black);
        assert_eq!(Side::Black.opposite(), Side::White);
    }

    #[test]
    fn test_shakmaty_piece_conversion() {
        let piece = shakmaty_to_piece(shakmaty::Piece {
            color: SColor::Black,
            role: Role::Knight,
        });
        assert_eq!(piece.kind, PieceKind::Knight);
        assert_eq!(piece.color, Side::Black);
    }
}
