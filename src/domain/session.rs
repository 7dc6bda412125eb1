//! Practice session - the opening drill state machine.
//!
//! The session owns the active variation, the cursor into its move list and
//! the oracle-managed position. Every operation returns the events the
//! presentation layer should render, in order. Auto-play replies are never
//! applied inline: entering [`Phase::AutoPlaying`] emits an
//! [`SessionEvent::AutoPlayScheduled`] ticket which the caller hands back to
//! [`PracticeSession::run_auto_play`] after its pacing delay. Selecting or
//! restarting bumps the generation, so a ticket issued before that is ignored.

use rand::SeedableRng;
use rand::rngs::StdRng;
use shakmaty::san::San;
use shakmaty::{Role, Square};
use tracing::{debug, error, info, warn};

use crate::domain::catalog::{CatalogState, Variation, normalize_family_key};
use crate::domain::chess::Side;
use crate::domain::error::SessionError;
use crate::domain::oracle::{LegalityOracle, ShakmatyOracle, same_notation, strip_annotations};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingHumanMove,
    AutoPlaying,
    Completed,
}

/// Stamp identifying one scheduled auto-play. Only valid while the session
/// is still on the same generation and cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoPlayTicket {
    generation: u64,
    cursor: usize,
}

/// Which pacing delay the caller should wait before running a ticket
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoPlayDelay {
    /// First move of a variation the trainee plays as Black
    Opening,
    /// Reply to a move the trainee just made
    Reply,
}

/// State changes reported to the presentation layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    VariationStarted {
        family: String,
        name: String,
        restarted: bool,
    },
    OrientationShouldBe {
        side: Side,
    },
    PositionChanged {
        fen: String,
    },
    InvalidMove,
    WrongMove {
        expected: String,
        played: String,
    },
    CorrectMove {
        san: String,
        is_auto: bool,
    },
    VariationComplete {
        name: String,
    },
    AutoPlayScheduled {
        ticket: AutoPlayTicket,
        delay: AutoPlayDelay,
    },
    FamilyNotFound {
        key: String,
    },
    CatalogUnavailable {
        reason: String,
    },
    DataIntegrity {
        variation: String,
        ply: usize,
        san: String,
    },
}

impl From<SessionError> for SessionEvent {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::FamilyNotFound { key } => SessionEvent::FamilyNotFound { key },
            SessionError::CatalogUnavailable { reason } => {
                SessionEvent::CatalogUnavailable { reason }
            }
            SessionError::DataIntegrity {
                variation,
                ply,
                san,
            } => SessionEvent::DataIntegrity {
                variation,
                ply,
                san,
            },
        }
    }
}

impl SessionEvent {
    /// The error this event reports, if it is an error event
    pub fn as_error(&self) -> Option<SessionError> {
        match self {
            SessionEvent::FamilyNotFound { key } => {
                Some(SessionError::FamilyNotFound { key: key.clone() })
            }
            SessionEvent::CatalogUnavailable { reason } => Some(SessionError::CatalogUnavailable {
                reason: reason.clone(),
            }),
            SessionEvent::DataIntegrity {
                variation,
                ply,
                san,
            } => Some(SessionError::DataIntegrity {
                variation: variation.clone(),
                ply: *ply,
                san: san.clone(),
            }),
            _ => None,
        }
    }

    /// Status line text for this event, if it changes the status
    pub fn message(&self) -> Option<String> {
        if let Some(err) = self.as_error() {
            return Some(err.to_string());
        }
        match self {
            SessionEvent::VariationStarted {
                restarted: false, ..
            } => Some("Make your move".to_string()),
            SessionEvent::VariationStarted {
                restarted: true, ..
            } => Some("Try to complete the opening again!".to_string()),
            SessionEvent::InvalidMove => Some("Illegal move. Try again.".to_string()),
            SessionEvent::WrongMove { expected, .. } => Some(format!(
                "Incorrect move! The correct move was {expected}. Try again."
            )),
            SessionEvent::CorrectMove { .. } => Some("Correct! Next move.".to_string()),
            SessionEvent::VariationComplete { name } => {
                Some(format!("Opening sequence completed: {name}"))
            }
            _ => None,
        }
    }
}

pub struct PracticeSession<O: LegalityOracle = ShakmatyOracle> {
    oracle: O,
    catalog: CatalogState,
    rng: StdRng,
    /// Display name of the family the active variation came from
    family: Option<String>,
    active: Option<Variation>,
    cursor: usize,
    phase: Phase,
    generation: u64,
}

impl<O: LegalityOracle> PracticeSession<O> {
    /// A fixed seed makes variation selection reproducible.
    pub fn new(oracle: O, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            oracle,
            catalog: CatalogState::Loading,
            rng,
            family: None,
            active: None,
            cursor: 0,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn set_catalog(&mut self, catalog: CatalogState) {
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_variation(&self) -> Option<&Variation> {
        self.active.as_ref()
    }

    #[allow(dead_code)]
    pub fn turn(&self) -> Side {
        self.oracle.turn()
    }

    #[allow(dead_code)]
    pub fn fen(&self) -> String {
        self.oracle.fen()
    }

    /// The scripted move the trainee (or auto-play) must make next
    pub fn expected_move(&self) -> Option<&str> {
        self.active
            .as_ref()
            .and_then(|v| v.moves.get(self.cursor))
            .map(String::as_str)
    }

    /// The trainee's side at the bottom of the board
    pub fn orientation(&self) -> Side {
        self.active.as_ref().map_or(Side::White, |v| v.side)
    }

    /// "Practice again" and "New opening" are offered once a line is done
    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn accepts_human_move(&self) -> bool {
        self.phase == Phase::AwaitingHumanMove
    }

    /// Ticket for the auto-play the session is currently waiting on
    pub fn pending_ticket(&self) -> Option<AutoPlayTicket> {
        (self.phase == Phase::AutoPlaying).then(|| self.current_ticket())
    }

    fn current_ticket(&self) -> AutoPlayTicket {
        AutoPlayTicket {
            generation: self.generation,
            cursor: self.cursor,
        }
    }

    /// Pick a random variation of `family` and start it from the initial
    /// position. On failure the session is left exactly as it was.
    pub fn select_variation(&mut self, family: &str) -> Vec<SessionEvent> {
        match self.try_select(family) {
            Ok(events) => events,
            Err(err) => {
                warn!(family, %err, "cannot select variation");
                vec![err.into()]
            }
        }
    }

    fn try_select(&mut self, family: &str) -> Result<Vec<SessionEvent>, SessionError> {
        let catalog = match &self.catalog {
            CatalogState::Ready(catalog) => catalog,
            CatalogState::Loading => {
                return Err(SessionError::CatalogUnavailable {
                    reason: "Openings are still loading.".to_string(),
                });
            }
            CatalogState::Failed(reason) => {
                return Err(SessionError::CatalogUnavailable {
                    reason: format!("Error loading openings data: {reason}"),
                });
            }
        };

        let key = normalize_family_key(family);
        let not_found = || SessionError::FamilyNotFound { key: key.clone() };
        let display = catalog.get(&key).ok_or_else(not_found)?.display.clone();
        let variation = catalog
            .choose(&key, &mut self.rng)
            .ok_or_else(not_found)?
            .clone();

        self.family = Some(display);
        Ok(self.start(variation, false))
    }

    /// Pick another variation from the current family
    pub fn new_variation(&mut self) -> Vec<SessionEvent> {
        match self.family.clone() {
            Some(family) => self.select_variation(&family),
            None => Vec::new(),
        }
    }

    /// Replay the active variation from its first move
    pub fn restart(&mut self) -> Vec<SessionEvent> {
        match self.active.clone() {
            Some(variation) => self.start(variation, true),
            None => {
                debug!("restart requested with no active variation");
                Vec::new()
            }
        }
    }

    fn start(&mut self, variation: Variation, restarted: bool) -> Vec<SessionEvent> {
        self.generation += 1;
        self.cursor = 0;
        self.oracle.reset();

        info!(
            family = self.family.as_deref().unwrap_or_default(),
            variation = %variation.name,
            side = %variation.side,
            restarted,
            "starting variation"
        );

        let mut events = vec![
            SessionEvent::VariationStarted {
                family: self.family.clone().unwrap_or_default(),
                name: variation.name.clone(),
                restarted,
            },
            SessionEvent::OrientationShouldBe {
                side: variation.side,
            },
            SessionEvent::PositionChanged {
                fen: self.oracle.fen(),
            },
        ];
        self.active = Some(variation);
        self.advance(AutoPlayDelay::Opening, &mut events);
        events
    }

    /// Decide the next phase after the cursor moved (or a variation started)
    fn advance(&mut self, delay: AutoPlayDelay, events: &mut Vec<SessionEvent>) {
        let Some(variation) = &self.active else {
            self.phase = Phase::Idle;
            return;
        };

        if self.cursor >= variation.moves.len() {
            self.phase = Phase::Completed;
            info!(variation = %variation.name, "variation completed");
            events.push(SessionEvent::VariationComplete {
                name: variation.name.clone(),
            });
        } else if self.oracle.turn() == variation.side.opposite() {
            self.phase = Phase::AutoPlaying;
            events.push(SessionEvent::AutoPlayScheduled {
                ticket: self.current_ticket(),
                delay,
            });
        } else {
            self.phase = Phase::AwaitingHumanMove;
        }
    }

    /// Handle a drag from `from` to `to` by the trainee
    pub fn propose_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Vec<SessionEvent> {
        if self.phase != Phase::AwaitingHumanMove {
            debug!(phase = ?self.phase, %from, %to, "move proposed while not awaiting input");
            return vec![SessionEvent::InvalidMove];
        }
        let Some(expected) = self.expected_move().map(str::to_owned) else {
            return vec![SessionEvent::InvalidMove];
        };

        match self.oracle.propose(from, to, promotion) {
            Err(err) => {
                debug!(%err, "illegal move rejected");
                vec![SessionEvent::InvalidMove]
            }
            Ok(applied) if same_notation(&applied.san, &expected) => {
                self.cursor += 1;
                debug!(san = %applied.san, cursor = self.cursor, "correct move");
                let mut events = vec![
                    SessionEvent::CorrectMove {
                        san: applied.san,
                        is_auto: false,
                    },
                    SessionEvent::PositionChanged { fen: applied.fen },
                ];
                self.advance(AutoPlayDelay::Reply, &mut events);
                events
            }
            Ok(applied)
                if promotion.is_none()
                    && promotion_role(&applied.san) == Some(Role::Queen)
                    && promotion_role(&expected).is_some_and(|role| role != Role::Queen) =>
            {
                // A drag cannot choose the piece, so this line is unplayable
                self.oracle.undo_last();
                let variation = self
                    .active
                    .as_ref()
                    .map(|v| v.name.clone())
                    .unwrap_or_default();
                error!(%variation, %expected, "scripted underpromotion for the trainee");
                self.abort(SessionError::DataIntegrity {
                    variation,
                    ply: self.cursor + 1,
                    san: expected,
                })
            }
            Ok(applied) => {
                self.oracle.undo_last();
                warn!(played = %applied.san, %expected, "off-script move");
                vec![SessionEvent::WrongMove {
                    expected,
                    played: applied.san,
                }]
            }
        }
    }

    /// Apply the scripted reply for `ticket`. Stale tickets are a no-op.
    pub fn run_auto_play(&mut self, ticket: AutoPlayTicket) -> Vec<SessionEvent> {
        if self.pending_ticket() != Some(ticket) {
            debug!(?ticket, current = ?self.current_ticket(), "discarding stale auto-play");
            return Vec::new();
        }
        let (Some(name), Some(san)) = (
            self.active.as_ref().map(|v| v.name.clone()),
            self.expected_move().map(str::to_owned),
        ) else {
            return Vec::new();
        };

        match self.oracle.play_san(&san) {
            Ok(applied) => {
                self.cursor += 1;
                debug!(san = %applied.san, cursor = self.cursor, "auto-played reply");
                let mut events = vec![
                    SessionEvent::CorrectMove {
                        san: applied.san,
                        is_auto: true,
                    },
                    SessionEvent::PositionChanged { fen: applied.fen },
                ];
                self.advance(AutoPlayDelay::Reply, &mut events);
                events
            }
            Err(err) => {
                error!(variation = %name, %san, %err, "scripted move rejected by oracle");
                self.abort(SessionError::DataIntegrity {
                    variation: name,
                    ply: self.cursor + 1,
                    san,
                })
            }
        }
    }

    /// Drop the active variation after a corrupt catalog entry
    fn abort(&mut self, err: SessionError) -> Vec<SessionEvent> {
        self.generation += 1;
        self.active = None;
        self.cursor = 0;
        self.phase = Phase::Idle;
        self.oracle.reset();
        vec![
            err.into(),
            SessionEvent::PositionChanged {
                fen: self.oracle.fen(),
            },
        ]
    }
}

/// Promotion piece of a SAN token, if it promotes
fn promotion_role(san: &str) -> Option<Role> {
    match strip_annotations(san).parse::<San>().ok()? {
        San::Normal { promotion, .. } => promotion,
        _ => None,
    }
}
