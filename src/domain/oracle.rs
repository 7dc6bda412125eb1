//! Move legality oracle - validates and applies moves against a position.
//!
//! The practice session only talks to the [`LegalityOracle`] trait, so the
//! rules engine can be swapped or faked in tests. [`ShakmatyOracle`] is the
//! production implementation backed by shakmaty.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{Chess, EnPassantMode, Move, Position, Role, Square};

use crate::domain::chess::{Piece, Side, shakmaty_to_piece};
use crate::domain::error::IllegalMove;

/// A move that the oracle accepted and applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    /// Canonical SAN, including a `+` or `#` suffix
    pub san: String,
    /// Position after the move
    pub fen: String,
}

pub trait LegalityOracle {
    /// Resolve a drag gesture to a legal move and apply it.
    /// Promotions default to a queen when no piece is chosen.
    fn propose(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<AppliedMove, IllegalMove>;

    /// Apply a move written in SAN.
    fn play_san(&mut self, san: &str) -> Result<AppliedMove, IllegalMove>;

    /// Restore the position before the last applied move.
    fn undo_last(&mut self);

    fn turn(&self) -> Side;

    /// Back to the standard starting position, clearing undo history.
    fn reset(&mut self);

    fn fen(&self) -> String;
}

/// Strip check, mate and annotation glyphs from a SAN token.
pub fn strip_annotations(san: &str) -> &str {
    san.trim().trim_end_matches(['+', '#', '!', '?'])
}

/// Compare two SAN tokens ignoring check markers and annotations.
pub fn same_notation(a: &str, b: &str) -> bool {
    strip_annotations(a) == strip_annotations(b)
}

/// Whether a legal move corresponds to dragging a piece from `from` to `to`.
/// Castling is accepted both as king-to-destination and king-onto-rook.
fn gesture_matches(m: &Move, from: Square, to: Square) -> bool {
    match m {
        Move::Normal {
            from: move_from,
            to: move_to,
            ..
        }
        | Move::EnPassant {
            from: move_from,
            to: move_to,
        } => *move_from == from && *move_to == to,
        Move::Castle { king, rook } => {
            let king_dest = if rook.file() > king.file() {
                Square::from_coords(shakmaty::File::G, rook.rank())
            } else {
                Square::from_coords(shakmaty::File::C, rook.rank())
            };
            *king == from && (to == king_dest || to == *rook)
        }
        Move::Put { .. } => false,
    }
}

/// Oracle backed by a shakmaty `Chess` position with an undo stack
#[derive(Clone, Debug, Default)]
pub struct ShakmatyOracle {
    position: Chess,
    history: Vec<Chess>,
}

impl ShakmatyOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square).map(shakmaty_to_piece)
    }

    fn apply(&mut self, m: Move) -> Result<AppliedMove, IllegalMove> {
        let san = San::from_move(&self.position, m.clone()).to_string();
        let next = self
            .position
            .clone()
            .play(m)
            .map_err(|_| IllegalMove::NotLegal(san.clone()))?;

        let suffix = if next.is_checkmate() {
            "#"
        } else if next.is_check() {
            "+"
        } else {
            ""
        };

        let previous = std::mem::replace(&mut self.position, next);
        self.history.push(previous);

        Ok(AppliedMove {
            san: format!("{san}{suffix}"),
            fen: self.fen(),
        })
    }
}

impl LegalityOracle for ShakmatyOracle {
    fn propose(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<AppliedMove, IllegalMove> {
        let promotion = promotion.unwrap_or(Role::Queen);
        let candidate = self
            .position
            .legal_moves()
            .iter()
            .find(|m| {
                gesture_matches(m, from, to) && m.promotion().is_none_or(|role| role == promotion)
            })
            .cloned()
            .ok_or(IllegalMove::NoSuchMove { from, to })?;

        self.apply(candidate)
    }

    fn play_san(&mut self, san: &str) -> Result<AppliedMove, IllegalMove> {
        let parsed: San = strip_annotations(san)
            .parse()
            .map_err(|_| IllegalMove::Unparseable(san.to_string()))?;
        let m = parsed
            .to_move(&self.position)
            .map_err(|_| IllegalMove::NotLegal(san.to_string()))?;
        self.apply(m)
    }

    fn undo_last(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.position = previous;
        }
    }

    fn turn(&self) -> Side {
        self.position.turn().into()
    }

    fn reset(&mut self) {
        self.position = Chess::default();
        self.history.clear();
    }

    fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn play_all(oracle: &mut ShakmatyOracle, moves: &[&str]) {
        for san in moves {
            oracle.play_san(san).unwrap();
        }
    }

    #[test]
    fn test_propose_legal_move() {
        let mut oracle = ShakmatyOracle::new();
        let applied = oracle.propose(Square::E2, Square::E4, None).unwrap();
        assert_eq!(applied.san, "e4");
        assert_eq!(oracle.turn(), Side::Black);
        assert_eq!(applied.fen, oracle.fen());
    }

    #[test]
    fn test_propose_illegal_move_leaves_position() {
        let mut oracle = ShakmatyOracle::new();
        let err = oracle.propose(Square::E2, Square::E5, None).unwrap_err();
        assert_eq!(
            err,
            IllegalMove::NoSuchMove {
                from: Square::E2,
                to: Square::E5
            }
        );
        assert_eq!(oracle.fen(), START_FEN);
    }

    #[test]
    fn test_undo_restores_previous_position() {
        let mut oracle = ShakmatyOracle::new();
        oracle.propose(Square::D2, Square::D4, None).unwrap();
        oracle.undo_last();
        assert_eq!(oracle.fen(), START_FEN);
        assert_eq!(oracle.turn(), Side::White);

        // Nothing to undo is a no-op
        oracle.undo_last();
        assert_eq!(oracle.fen(), START_FEN);
    }

    #[test]
    fn test_castling_by_king_drag() {
        let mut oracle = ShakmatyOracle::new();
        play_all(&mut oracle, &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"]);
        let applied = oracle.propose(Square::E1, Square::G1, None).unwrap();
        assert_eq!(applied.san, "O-O");
    }

    #[test]
    fn test_castling_by_king_onto_rook() {
        let mut oracle = ShakmatyOracle::new();
        play_all(&mut oracle, &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"]);
        let applied = oracle.propose(Square::E1, Square::H1, None).unwrap();
        assert_eq!(applied.san, "O-O");
    }

    #[test]
    fn test_check_suffix_in_canonical_san() {
        let mut oracle = ShakmatyOracle::new();
        play_all(&mut oracle, &["e4", "e5", "Nf3"]);
        let applied = oracle.play_san("Bb4").unwrap();
        assert_eq!(applied.san, "Bb4");

        let mut oracle = ShakmatyOracle::new();
        play_all(&mut oracle, &["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6"]);
        let applied = oracle.propose(Square::H5, Square::F7, None).unwrap();
        assert_eq!(applied.san, "Qxf7#");
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut oracle = ShakmatyOracle::new();
        play_all(
            &mut oracle,
            &["h4", "g5", "hxg5", "h6", "gxh6", "Nf6", "h7", "Ng8"],
        );
        let applied = oracle.propose(Square::H7, Square::G8, None).unwrap();
        assert_eq!(applied.san, "hxg8=Q");
        oracle.undo_last();
        let applied = oracle
            .propose(Square::H7, Square::G8, Some(Role::Knight))
            .unwrap();
        assert_eq!(applied.san, "hxg8=N");
    }

    #[test]
    fn test_play_san_rejects_bad_notation() {
        let mut oracle = ShakmatyOracle::new();
        assert!(matches!(
            oracle.play_san("e5"),
            Err(IllegalMove::NotLegal(_))
        ));
        assert!(matches!(
            oracle.play_san("zz9"),
            Err(IllegalMove::Unparseable(_))
        ));
        assert_eq!(oracle.fen(), START_FEN);
    }

    #[test]
    fn test_play_san_accepts_check_suffix() {
        let mut oracle = ShakmatyOracle::new();
        play_all(&mut oracle, &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "c3", "Nf6", "d4", "exd4", "cxd4"]);
        let applied = oracle.play_san("Bb4+").unwrap();
        assert_eq!(applied.san, "Bb4+");
    }

    #[test]
    fn test_reset_clears_history() {
        let mut oracle = ShakmatyOracle::new();
        play_all(&mut oracle, &["e4", "e5"]);
        oracle.reset();
        assert_eq!(oracle.fen(), START_FEN);
        oracle.undo_last();
        assert_eq!(oracle.fen(), START_FEN);
    }

    #[test]
    fn test_same_notation_ignores_suffixes() {
        assert!(same_notation("Bb4+", "Bb4"));
        assert!(same_notation("Qxf7#", "Qxf7"));
        assert!(same_notation(" e4 ", "e4!?"));
        assert!(!same_notation("Nbd7", "Nd7"));
    }
}
