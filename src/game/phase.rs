//! Phase State Machine
//!
//! An ordered scalar so transitions are forward increments, plus an atomic
//! wrapper so status pollers can read the phase without touching the engine
//! lock. All *writes* happen while the engine lock is held.

use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Lifecycle of a round. Only ever advances (0 → 1 → 2 → 3) except via an
/// explicit reset back to `Joining`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GamePhase {
    /// Players may register; the board does not exist yet.
    Joining = 0,
    /// Pills are being collected; collisions are rejected.
    Eating = 1,
    /// Pills are exhausted; collisions deal symmetric damage.
    Battle = 2,
    /// At most one player remains, or the round timer expired.
    GameOver = 3,
}

impl GamePhase {
    /// Decode from the atomic scalar. Values outside 0..=3 are never stored.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => GamePhase::Joining,
            1 => GamePhase::Eating,
            2 => GamePhase::Battle,
            _ => GamePhase::GameOver,
        }
    }
}

/// The phase as a lock-free scalar.
///
/// Readers may observe a value that is stale by at most one in-flight
/// operation; that tolerance is part of the engine contract.
#[derive(Debug)]
pub struct AtomicPhase(AtomicU8);

impl AtomicPhase {
    /// Start at `Joining`.
    pub const fn new() -> Self {
        Self(AtomicU8::new(GamePhase::Joining as u8))
    }

    /// Current phase.
    #[inline]
    pub fn load(&self) -> GamePhase {
        GamePhase::from_u8(self.0.load(Ordering::SeqCst))
    }

    /// Set the phase outright (reset, forced game-over).
    #[inline]
    pub fn store(&self, phase: GamePhase) {
        self.0.store(phase as u8, Ordering::SeqCst);
    }

    /// Advance one step forward and return the new phase. Callers only
    /// invoke this below `GameOver`.
    #[inline]
    pub fn advance(&self) -> GamePhase {
        let previous = self.0.fetch_add(1, Ordering::SeqCst);
        GamePhase::from_u8(previous.saturating_add(1))
    }
}

impl Default for AtomicPhase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_are_ordered() {
        assert!(GamePhase::Joining < GamePhase::Eating);
        assert!(GamePhase::Eating < GamePhase::Battle);
        assert!(GamePhase::Battle < GamePhase::GameOver);
    }

    #[test]
    fn test_advance_walks_the_lifecycle() {
        let phase = AtomicPhase::new();
        assert_eq!(phase.load(), GamePhase::Joining);
        assert_eq!(phase.advance(), GamePhase::Eating);
        assert_eq!(phase.advance(), GamePhase::Battle);
        assert_eq!(phase.advance(), GamePhase::GameOver);
    }

    #[test]
    fn test_store_resets() {
        let phase = AtomicPhase::new();
        phase.advance();
        phase.advance();
        phase.store(GamePhase::Joining);
        assert_eq!(phase.load(), GamePhase::Joining);
    }
}
