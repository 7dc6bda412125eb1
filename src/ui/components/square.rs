//! Square rendering component.
//!
//! Edge squares carry coordinate labels, which follow the board orientation
//! so a trainee playing Black sees rank 8 at the bottom.

use crate::domain::{Piece, Side, to_square};
use crate::ui::components::{piece_svg_path, render_piece};
use crate::ui::theme::{GHOST_OPACITY, LABEL_SCALE, square_color, square_label_color};
use gpui::{div, img, prelude::*, px};

/// Coordinate labels drawn on a rendered square: (file, rank)
pub fn square_labels(row: usize, col: usize, orientation: Side) -> (Option<char>, Option<char>) {
    let square = to_square(row, col, orientation);
    let file = (row == 7).then(|| square.file().char());
    let rank = (col == 0).then(|| square.rank().char());
    (file, rank)
}

/// A rendered board square
#[derive(Clone, Copy, Debug)]
pub struct SquareView {
    pub row: usize,
    pub col: usize,
    pub piece: Option<Piece>,
    pub is_being_dragged: bool,
    pub orientation: Side,
}

pub fn render_square(view: SquareView, square_size: f32, piece_size: f32) -> impl IntoElement {
    let (file, rank) = square_labels(view.row, view.col, view.orientation);
    let label_color = square_label_color(view.row, view.col);
    let label_size = px(square_size * LABEL_SCALE);

    let content = view.piece.map(|p| {
        if view.is_being_dragged {
            // ghost left behind while the piece follows the cursor
            div()
                .size_full()
                .flex()
                .items_center()
                .justify_center()
                .opacity(GHOST_OPACITY)
                .child(img(piece_svg_path(p)).size(px(piece_size)))
                .into_any_element()
        } else {
            render_piece(p, piece_size).into_any_element()
        }
    });

    div()
        .relative()
        .flex_shrink_0()
        .size(px(square_size))
        .bg(square_color(view.row, view.col))
        .flex()
        .items_center()
        .justify_center()
        .when_some(content, |el, content| el.child(content))
        .when_some(rank, |el, rank| {
            el.child(
                div()
                    .absolute()
                    .top(px(2.0))
                    .left(px(3.0))
                    .text_size(label_size)
                    .text_color(label_color)
                    .child(rank.to_string()),
            )
        })
        .when_some(file, |el, file| {
            el.child(
                div()
                    .absolute()
                    .bottom(px(1.0))
                    .right(px(3.0))
                    .text_size(label_size)
                    .text_color(label_color)
                    .child(file.to_string()),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_white_orientation() {
        assert_eq!(square_labels(7, 0, Side::White), (Some('a'), Some('1')));
        assert_eq!(square_labels(0, 0, Side::White), (None, Some('8')));
        assert_eq!(square_labels(7, 7, Side::White), (Some('h'), None));
        assert_eq!(square_labels(3, 4, Side::White), (None, None));
    }

    #[test]
    fn test_labels_flip_for_black_orientation() {
        assert_eq!(square_labels(7, 0, Side::Black), (Some('h'), Some('8')));
        assert_eq!(square_labels(0, 0, Side::Black), (None, Some('1')));
        assert_eq!(square_labels(7, 7, Side::Black), (Some('a'), None));
    }
}
