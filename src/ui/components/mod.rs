mod piece;
mod square;

pub use piece::{piece_svg_path, render_piece};
pub use square::{SquareView, render_square};
