//! # Pellet Arena Game Server
//!
//! Server-authoritative engine for a grid-based multiplayer arcade game:
//! players race to eat point-valued pills, then battle over the remains.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PELLET ARENA SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Shared primitives                         │
//! │  └── rng.rs      - Randomness sources (system + seeded)      │
//! │                                                              │
//! │  game/           - Game logic                                │
//! │  ├── board.rs    - Grid, cells, movement directions          │
//! │  ├── player.rs   - Identity, tokens, score projections       │
//! │  ├── phase.rs    - Joining → Eating → Battle → GameOver      │
//! │  ├── engine.rs   - The lock-serialized state machine         │
//! │  ├── timer.rs    - Timed rounds and automatic restart        │
//! │  └── admin.rs    - Admin tokens and maintenance operations   │
//! │                                                              │
//! │  config.rs       - Credentials and timing knobs              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Contract
//!
//! All composite state lives behind **one exclusive lock**; every operation
//! is linearizable with respect to that lock. The current phase is mirrored
//! into an atomic so status polls never contend. Change notification is a
//! debounced broadcast meaning "state changed since your last poll".

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::config::EngineConfig;
pub use crate::core::rng::{DeterministicRng, RandomSource, SystemRandom};
pub use crate::game::{
    Cell, Direction, GameEngine, GameError, GamePhase, Location, MoveOutcome, OccupantView,
    PlayerId, PlayerScore, PlayerToken, RedactedCell, StartOptions,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
