mod board_view;
mod sidebar;

pub use board_view::TrainerView;
pub use sidebar::render_sidebar_panel;
