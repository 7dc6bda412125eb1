//! Piece rendering component.

use crate::domain::{Piece, PieceKind, Side};
use gpui::{div, img, prelude::*, px};

/// Asset path of the SVG for a piece
pub fn piece_svg_path(piece: Piece) -> &'static str {
    match (piece.kind, piece.color) {
        (PieceKind::Pawn, Side::White) => "assets/pawn-white.svg",
        (PieceKind::Pawn, Side::Black) => "assets/pawn-black.svg",
        (PieceKind::Rook, Side::White) => "assets/rook-white.svg",
        (PieceKind::Rook, Side::Black) => "assets/rook-black.svg",
        (PieceKind::Knight, Side::White) => "assets/knight-white.svg",
        (PieceKind::Knight, Side::Black) => "assets/knight-black.svg",
        (PieceKind::Bishop, Side::White) => "assets/bishop-white.svg",
        (PieceKind::Bishop, Side::Black) => "assets/bishop-black.svg",
        (PieceKind::Queen, Side::White) => "assets/queen-white.svg",
        (PieceKind::Queen, Side::Black) => "assets/queen-black.svg",
        (PieceKind::King, Side::White) => "assets/king-white.svg",
        (PieceKind::King, Side::Black) => "assets/king-black.svg",
    }
}

/// Render a chess piece centered in its container
pub fn render_piece(piece: Piece, piece_size: f32) -> impl IntoElement {
    div()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .child(img(piece_svg_path(piece)).size(px(piece_size)))
}
