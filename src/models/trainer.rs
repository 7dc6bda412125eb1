//! Trainer model - the application layer around a practice session.
//!
//! Owns the session, loads the catalog in the background and turns session
//! events into status text and deferred auto-play tasks.
//!
//! Architecture:
//! - Catalog loading runs on the background executor and reports back once
//! - Each `AutoPlayScheduled` event becomes one GPUI task that sleeps for the
//!   pacing delay, then hands its ticket back to the session
//! - Only the newest auto-play task is kept; the ticket check in the session
//!   turns any task that fires after a restart or reselect into a no-op

use gpui::{AsyncApp, Context, Pixels, Size, Task, WeakEntity, px};
use tracing::{error, info, warn};

use crate::config::TrainerConfig;
use crate::domain::{
    AutoPlayDelay, AutoPlayTicket, Catalog, CatalogError, CatalogState, Piece, PracticeSession,
    SessionEvent, ShakmatyOracle, Side, to_square,
};
use crate::ui::BoardLayout;
use crate::ui::theme::INITIAL_LEFT_PANEL;

/// State for a piece being dragged
#[derive(Clone, Copy, Debug)]
pub struct DragState {
    pub piece: Piece,
    pub from_row: usize,
    pub from_col: usize,
    /// Mouse position relative to window
    pub mouse_x: f32,
    pub mouse_y: f32,
}

/// Family entry for the sidebar
#[derive(Clone, Debug)]
pub struct FamilyEntry {
    pub key: String,
    pub display: String,
}

pub struct TrainerModel {
    session: PracticeSession<ShakmatyOracle>,
    config: TrainerConfig,
    /// "Opening: FAMILY - VARIATION"
    heading: String,
    /// Latest status message from the session
    status: String,
    pub drag_state: Option<DragState>,
    /// Measured panel size from canvas
    pub panel_size: Size<Pixels>,
    auto_play_task: Option<Task<()>>,
    _load_task: Option<Task<()>>,
}

impl TrainerModel {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            session: PracticeSession::new(ShakmatyOracle::new(), config.seed),
            config,
            heading: String::new(),
            status: "Loading openings...".to_string(),
            drag_state: None,
            panel_size: Size {
                width: px(INITIAL_LEFT_PANEL),
                height: px(600.0),
            },
            auto_play_task: None,
            _load_task: None,
        }
    }

    /// Read the catalog off the UI thread, then apply it.
    pub fn load_catalog(&mut self, cx: &mut Context<Self>) {
        let path = self.config.catalog_path.clone();
        info!(path = %path.display(), "loading opening catalog");

        let task = cx.spawn(async move |weak_entity: WeakEntity<TrainerModel>, cx: &mut AsyncApp| {
            let result = cx
                .background_executor()
                .spawn(async move { Catalog::load(&path) })
                .await;
            let _ = weak_entity.update(cx, |model, cx| {
                model.on_catalog_loaded(result, cx);
                cx.notify();
            });
        });
        self._load_task = Some(task);
    }

    fn on_catalog_loaded(&mut self, result: Result<Catalog, CatalogError>, cx: &mut Context<Self>) {
        match result {
            Ok(catalog) => {
                if catalog.is_empty() {
                    warn!("opening catalog has no families");
                }
                info!(families = catalog.len(), "opening catalog ready");
                self.session.set_catalog(CatalogState::Ready(catalog));
                self.status = "Choose an opening".to_string();
                if let Some(family) = self.config.default_family.clone() {
                    self.select_family(&family, cx);
                }
            }
            Err(err) => {
                error!(%err, "failed to load opening catalog");
                self.session.set_catalog(CatalogState::Failed(err.to_string()));
                self.status = "Error loading openings data.".to_string();
            }
        }
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn families(&self) -> Vec<FamilyEntry> {
        match self.session.catalog() {
            CatalogState::Ready(catalog) => catalog
                .families()
                .map(|f| FamilyEntry {
                    key: f.key.clone(),
                    display: f.display.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether the "Practice again" / "New opening" buttons are shown
    pub fn show_completion_actions(&self) -> bool {
        self.session.is_completed()
    }

    /// Scripted moves applied so far, out of the variation's length
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.session
            .active_variation()
            .map(|v| (self.session.cursor(), v.moves.len()))
    }

    pub fn orientation(&self) -> Side {
        self.session.orientation()
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout::new(self.panel_size)
    }

    /// Piece on the rendered square, honoring orientation
    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        self.session
            .oracle()
            .piece_at(to_square(row, col, self.orientation()))
    }

    /// Dragging is allowed only for the trainee's pieces while a move is awaited
    pub fn can_drag(&self, piece: &Piece) -> bool {
        self.session.accepts_human_move() && piece.color == self.orientation()
    }

    pub fn select_family(&mut self, family: &str, cx: &mut Context<Self>) {
        let events = self.session.select_variation(family);
        self.apply_events(events, cx);
    }

    /// "Practice again"
    pub fn practice_again(&mut self, cx: &mut Context<Self>) {
        let events = self.session.restart();
        self.apply_events(events, cx);
    }

    /// "New opening" - another variation from the same family
    pub fn new_opening(&mut self, cx: &mut Context<Self>) {
        let events = self.session.new_variation();
        self.apply_events(events, cx);
    }

    /// Complete a drag from one rendered square to another
    pub fn try_move(&mut self, from: (usize, usize), to: (usize, usize), cx: &mut Context<Self>) {
        let orientation = self.orientation();
        let from_sq = to_square(from.0, from.1, orientation);
        let to_sq = to_square(to.0, to.1, orientation);
        if from_sq == to_sq {
            return;
        }
        let events = self.session.propose_move(from_sq, to_sq, None);
        self.apply_events(events, cx);
    }

    fn apply_events(&mut self, events: Vec<SessionEvent>, cx: &mut Context<Self>) {
        for event in events {
            if let Some(message) = event.message() {
                self.status = message;
            }
            match event {
                SessionEvent::VariationStarted { family, name, .. } => {
                    // A new generation: whatever was pending belongs to the old one
                    self.auto_play_task = None;
                    self.heading = format!("Opening: {family} - {name}");
                }
                SessionEvent::DataIntegrity { .. } => {
                    self.heading.clear();
                }
                SessionEvent::AutoPlayScheduled { ticket, delay } => {
                    self.schedule_auto_play(ticket, delay, cx);
                }
                _ => {}
            }
        }
    }

    fn schedule_auto_play(
        &mut self,
        ticket: AutoPlayTicket,
        delay: AutoPlayDelay,
        cx: &mut Context<Self>,
    ) {
        let wait = match delay {
            AutoPlayDelay::Opening => self.config.first_move_delay(),
            AutoPlayDelay::Reply => self.config.auto_play_delay(),
        };

        let task = cx.spawn(async move |weak_entity: WeakEntity<TrainerModel>, cx: &mut AsyncApp| {
            cx.background_executor().timer(wait).await;
            let _ = weak_entity.update(cx, |model, cx| {
                let events = model.session.run_auto_play(ticket);
                model.apply_events(events, cx);
                cx.notify();
            });
        });
        self.auto_play_task = Some(task);
    }
}
