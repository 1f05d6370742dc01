//! Player Registry Types
//!
//! Identity, capability tokens, and the score projections handed to the
//! request layer. Ids are assigned monotonically at join; tokens are opaque
//! v4 UUIDs and are never included in any public projection.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public, monotonically assigned player identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque capability credential. Knowing the token is what authorizes moves.
pub type PlayerToken = String;

/// Issue a fresh unguessable token.
pub fn issue_token() -> PlayerToken {
    Uuid::new_v4().to_string()
}

/// A registered player.
///
/// Persists across rounds until pruned for never having acted during a
/// round. Score is zeroed at every round start and reset.
#[derive(Clone, Debug)]
pub struct Player {
    /// Public identity.
    pub id: PlayerId,
    /// Display name supplied at join.
    pub name: String,
    /// Capability token; never leaves the engine except as the join result.
    pub token: PlayerToken,
    /// Current score. Non-negative while the player is on the board;
    /// reaching zero or below during Battle eliminates them.
    pub score: i64,
}

/// Leaderboard entry: everything about a player that is safe to publish.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Public identity.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Current score.
    pub score: i64,
}

impl From<&Player> for PlayerScore {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            score: player.score,
        }
    }
}
