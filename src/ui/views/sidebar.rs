//! Sidebar panel - opening families, session status and follow-up actions.

use gpui::{App, Div, Entity, SharedString, div, prelude::*, px, rgb};

use crate::models::TrainerModel;
use crate::ui::theme::{
    BOARD_PADDING, BORDER_COLOR, BUTTON_BG, BUTTON_HOVER_BG, PANEL_BG, SIDEBAR_BG, TEXT_PRIMARY,
    TEXT_SECONDARY,
};

/// Render the sidebar for a given trainer model.
pub fn render_sidebar_panel(model: &Entity<TrainerModel>, cx: &App) -> Div {
    let trainer = model.read(cx);
    let families = trainer.families();
    let heading = trainer.heading().to_string();
    let status = trainer.status().to_string();
    let show_actions = trainer.show_completion_actions();
    let progress = trainer
        .progress()
        .map(|(done, total)| format!("Move {done} of {total}"));

    let family_list = div()
        .id("family-list-scroll")
        .flex_1()
        .overflow_y_scroll()
        .p_4()
        .pt_2()
        .flex()
        .flex_col()
        .gap_1()
        .when(families.is_empty(), |el| {
            el.child(
                div()
                    .text_color(rgb(TEXT_SECONDARY))
                    .text_sm()
                    .child("No openings loaded"),
            )
        })
        .children(families.into_iter().map(|family| {
            let model = model.clone();
            let key = family.key.clone();
            render_button(
                SharedString::from(format!("family-{}", family.key)),
                family.display,
                move |cx| {
                    model.update(cx, |trainer, cx| {
                        trainer.select_family(&key, cx);
                        cx.notify();
                    });
                },
            )
        }));

    let model_again = model.clone();
    let model_new = model.clone();
    let actions = div()
        .flex()
        .items_center()
        .justify_center()
        .gap_2()
        .p_3()
        .border_t_1()
        .border_color(rgb(BORDER_COLOR))
        .child(render_button("practice-again", "Practice again", move |cx| {
            model_again.update(cx, |trainer, cx| {
                trainer.practice_again(cx);
                cx.notify();
            });
        }))
        .child(render_button("new-opening", "New opening", move |cx| {
            model_new.update(cx, |trainer, cx| {
                trainer.new_opening(cx);
                cx.notify();
            });
        }));

    let panel = div()
        .flex_1()
        .flex()
        .flex_col()
        .bg(rgb(SIDEBAR_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header (fixed)
        .child(
            div()
                .p_4()
                .pb_2()
                .flex()
                .flex_col()
                .gap_2()
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child(div().text_color(rgb(TEXT_PRIMARY)).child("Openings"))
                .when(!heading.is_empty(), |el| {
                    el.child(div().text_color(rgb(TEXT_PRIMARY)).text_sm().child(heading))
                })
                .when_some(progress, |el, progress| {
                    el.child(div().text_color(rgb(TEXT_SECONDARY)).text_sm().child(progress))
                })
                .child(div().text_color(rgb(TEXT_SECONDARY)).text_sm().child(status)),
        )
        .child(family_list)
        .when(show_actions, |el| el.child(actions));

    div()
        .size_full()
        .flex()
        .flex_col()
        .bg(rgb(PANEL_BG))
        .p(px(BOARD_PADDING))
        .child(panel)
}

fn render_button(
    id: impl Into<SharedString>,
    label: impl Into<SharedString>,
    on_click: impl Fn(&mut App) + 'static,
) -> impl IntoElement {
    div()
        .id(id.into())
        .px_4()
        .py_2()
        .rounded(px(4.0))
        .text_sm()
        .text_color(rgb(TEXT_PRIMARY))
        .bg(rgb(BUTTON_BG))
        .cursor_pointer()
        .hover(|s| s.bg(rgb(BUTTON_HOVER_BG)))
        .on_click(move |_ev, _window, cx| {
            on_click(cx);
        })
        .child(label.into())
}
