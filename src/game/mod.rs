//! Game Domain
//!
//! The board model, player registry, phase machine, and the engine that ties
//! them together under one lock.

pub mod admin;
pub mod board;
pub mod engine;
pub mod phase;
pub mod player;
pub(crate) mod timer;

pub use board::{Cell, Direction, Location, OccupantView, RedactedCell};
pub use engine::{GameEngine, MoveOutcome, StartOptions};
pub use phase::GamePhase;
pub use player::{PlayerId, PlayerScore, PlayerToken};

use thiserror::Error;

/// Every way a game operation can fail.
///
/// Credential failures on start/reset are deliberately not here; those
/// operations no-op silently so callers cannot probe the secret code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The supplied token does not belong to any registered player.
    #[error("player not found")]
    PlayerNotFound,

    /// The player cannot move right now; the message says why.
    #[error("invalid move: {0}")]
    InvalidMove(&'static str),

    /// A mid-round joiner found no empty cell. The registration stands; the
    /// player can retry after someone is eliminated.
    #[error("there is no available space")]
    NoAvailableSpace,

    /// The requested grid cannot seat the current roster.
    #[error("{players} players will not fit on a board with {capacity} cells")]
    TooManyPlayers {
        /// Registered players at start time.
        players: usize,
        /// Cells in the requested grid.
        capacity: usize,
    },

    /// The movement string is not one of up/down/left/right.
    #[error("direction not recognized")]
    DirectionNotRecognized,

    /// The queried coordinate is outside the configured grid.
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfRange {
        /// Queried row.
        row: i32,
        /// Queried column.
        col: i32,
    },
}
