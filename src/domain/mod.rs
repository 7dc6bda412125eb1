//! Domain layer: chess primitives, the opening catalog, the legality oracle
//! and the practice session. Nothing here depends on GPUI.

pub mod catalog;
pub mod chess;
pub mod error;
pub mod oracle;
pub mod session;

pub use catalog::{Catalog, CatalogState};
pub use chess::{Piece, PieceKind, Side, to_square};
pub use error::CatalogError;
pub use oracle::ShakmatyOracle;
pub use session::{AutoPlayDelay, AutoPlayTicket, PracticeSession, SessionEvent};
