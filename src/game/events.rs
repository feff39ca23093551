//! Game Events
//!
//! Per-tick notifications for front-ends: kill feeds, end screens.
//! Events are values carried in a tick's result; the world never stores
//! them.

use serde::{Deserialize, Serialize};

/// Why a player died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Left the playing field.
    OutOfBounds,
    /// Touched a committed wall.
    Wall {
        /// Player that created the wall (possibly the victim itself).
        owner: usize,
    },
    /// Arrived on the same cell as another living player. Both die.
    HeadOn {
        /// The other player involved.
        other: usize,
    },
    /// Crossed the uncommitted trailing segment of a living player.
    Trail {
        /// Player whose open trail was crossed.
        owner: usize,
    },
}

/// Something a front-end may want to show for this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player died during this tick.
    PlayerEliminated {
        /// Index of the eliminated player.
        player: usize,
        /// What killed it.
        cause: DeathCause,
    },
    /// The alive count dropped to one or zero.
    RoundOver {
        /// The surviving player, if exactly one remains.
        survivor: Option<usize>,
    },
}
