//! Trainer board view - the board with drag-and-drop moves plus the sidebar.

use gpui::{
    Context, Entity, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels,
    Subscription, Window, canvas, div, img, prelude::*, px, rgb,
};
use gpui_component::resizable::{h_resizable, resizable_panel};

use crate::models::{DragState, TrainerModel};
use crate::ui::components::{SquareView, piece_svg_path, render_square};
use crate::ui::theme::{BOARD_PADDING, INITIAL_LEFT_PANEL, INITIAL_RIGHT_PANEL, PANEL_BG};
use crate::ui::views::render_sidebar_panel;

/// The main trainer view that observes a TrainerModel
pub struct TrainerView {
    model: Entity<TrainerModel>,
    _subscription: Subscription,
}

impl TrainerView {
    pub fn new(model: Entity<TrainerModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        Self {
            model,
            _subscription,
        }
    }
}

impl Render for TrainerView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let model_down = self.model.clone();
        let model_move = self.model.clone();
        let model_up = self.model.clone();
        let model_measure = self.model.clone();

        let trainer = self.model.read(cx);
        let drag_state = trainer.drag_state;
        let dragging_from = drag_state.map(|d| (d.from_row, d.from_col));
        let orientation = trainer.orientation();

        // Sizing based on measured panel dimensions
        let layout = trainer.layout();
        let square_size = layout.square_size();
        let piece_size = layout.piece_size();

        // Floating piece follows cursor during drag
        let floating_piece = drag_state.map(|d| {
            div()
                .absolute()
                .left(px(d.mouse_x - piece_size / 2.0))
                .top(px(d.mouse_y - piece_size / 2.0))
                .size(px(piece_size))
                .child(img(piece_svg_path(d.piece)).size(px(piece_size)))
        });

        // Collect pieces for rendering (can't borrow trainer in closure)
        let pieces: Vec<_> = (0..8)
            .flat_map(|row| (0..8).map(move |col| (row, col)))
            .map(|(row, col)| trainer.piece_at(row, col))
            .collect();

        let board_total_size = layout.board_total_size();
        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .rounded_md()
            .children((0..8).map(|row| {
                div().flex().flex_shrink_0().children((0..8).map(|col| {
                    let view = SquareView {
                        row,
                        col,
                        piece: pieces[row * 8 + col],
                        is_being_dragged: dragging_from == Some((row, col)),
                        orientation,
                    };
                    render_square(view, square_size, piece_size)
                }))
            }));

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(board)
            .when_some(floating_piece, |el, fp| el.child(fp))
            // Mouse down: start drag if the trainee may move this piece
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    model_down.update(cx, |trainer, cx| {
                        let pos = ev.position;
                        let Some((row, col)) =
                            trainer.layout().pos_to_square(pos.x.into(), pos.y.into())
                        else {
                            return;
                        };
                        if let Some(piece) = trainer.piece_at(row, col) {
                            if trainer.can_drag(&piece) {
                                trainer.drag_state = Some(DragState {
                                    piece,
                                    from_row: row,
                                    from_col: col,
                                    mouse_x: pos.x.into(),
                                    mouse_y: pos.y.into(),
                                });
                                cx.notify();
                            }
                        }
                    });
                },
            )
            // Mouse move: update drag position
            .on_mouse_move(move |ev: &MouseMoveEvent, _, cx| {
                model_move.update(cx, |trainer, cx| {
                    if let Some(ref mut drag) = trainer.drag_state {
                        drag.mouse_x = ev.position.x.into();
                        drag.mouse_y = ev.position.y.into();
                        cx.notify();
                    }
                });
            })
            // Mouse up: propose the move; a rejected move snaps back on re-render
            .on_mouse_up(MouseButton::Left, move |ev: &MouseUpEvent, _window, cx| {
                model_up.update(cx, |trainer, cx| {
                    if let Some(drag) = trainer.drag_state.take() {
                        let pos = ev.position;
                        if let Some(to) =
                            trainer.layout().pos_to_square(pos.x.into(), pos.y.into())
                        {
                            trainer.try_move((drag.from_row, drag.from_col), to, cx);
                        }
                        cx.notify();
                    }
                });
            });

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                model_measure.update(cx, |trainer, cx| {
                    if trainer.panel_size != bounds.size {
                        trainer.panel_size = bounds.size;
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        // Wrap board panel content with measuring canvas
        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        let sidebar_panel_content = render_sidebar_panel(&self.model, cx);

        // Main resizable layout
        div().size_full().child(
            h_resizable("trainer-layout")
                .child(
                    resizable_panel()
                        .size(px(INITIAL_LEFT_PANEL))
                        .size_range(px(320.)..px(1200.))
                        .child(board_panel_with_measure),
                )
                .child(
                    resizable_panel()
                        .size(px(INITIAL_RIGHT_PANEL))
                        .size_range(px(200.)..Pixels::MAX)
                        .child(sidebar_panel_content),
                ),
        )
    }
}
