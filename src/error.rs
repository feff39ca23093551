//! Engine Errors
//!
//! Every fallible command surfaces one of these synchronously.
//! Nothing is retried internally and no error terminates the process.

use crate::game::state::Phase;

/// Errors reported by engine and session commands.
///
/// A failed command never leaves the world partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Illegal phase transition. The phase is left unchanged.
    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Phase the session was in.
        from: Phase,
        /// Phase that was requested.
        to: Phase,
    },

    /// Player or wall index out of range. The command is a no-op.
    #[error("Index {index} out of range")]
    InvalidIndex {
        /// The rejected index.
        index: usize,
    },

    /// A player may never reverse directly into its own trail.
    #[error("Cannot reverse into own trail")]
    IllegalMove,

    /// Storage growth failed. Only the pending command is lost.
    #[error("Out of memory growing entity storage")]
    OutOfMemory,

    /// Command not accepted in the current phase.
    #[error("Command not allowed while {phase:?}")]
    PhaseLocked {
        /// Phase the session was in.
        phase: Phase,
    },

    /// The lobby already holds the maximum number of players.
    #[error("Lobby is full")]
    LobbyFull,

    /// A round needs at least the minimum player count to start.
    #[error("Not enough players to start a round")]
    NotEnoughPlayers,
}
