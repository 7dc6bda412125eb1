//! Application setup and window creation.

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;
use tracing::error;

use crate::config::TrainerConfig;
use crate::models::TrainerModel;
use crate::ui::views::TrainerView;

/// Initialize and run the trainer application
pub fn run(cx: &mut App, config: TrainerConfig) {
    gpui_component::init(cx);

    // One model for the lifetime of the window; the catalog loads in the background
    let model = cx.new(|_| TrainerModel::new(config));
    model.update(cx, |trainer, cx| trainer.load_catalog(cx));

    let bounds = Bounds::centered(None, size(px(900.0), px(600.0)), cx);
    let opened = cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| TrainerView::new(model, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    );

    if let Err(err) = opened {
        error!(%err, "failed to open trainer window");
        cx.quit();
    }
}
