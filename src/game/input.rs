//! Queued Direction Commands
//!
//! Direction changes may arrive from input handlers at any rate. They are
//! buffered here and drained at a single point before each tick's move
//! pass, so one tick always sees a consistent, frozen command set.

use serde::{Deserialize, Serialize};

use crate::core::direction::Direction;

/// One requested direction change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionCommand {
    /// Target player index.
    pub player: usize,
    /// Requested travel direction.
    pub direction: Direction,
}

/// FIFO buffer of direction commands.
///
/// Order is preserved: two successive turns by the same player commit two
/// walls, so commands are never coalesced.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CommandQueue {
    pending: Vec<DirectionCommand>,
}

impl CommandQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, player: usize, direction: Direction) {
        self.pending.push(DirectionCommand { player, direction });
    }

    /// Take every pending command, in arrival order.
    pub fn drain(&mut self) -> Vec<DirectionCommand> {
        std::mem::take(&mut self.pending)
    }

    /// Drop every pending command.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
