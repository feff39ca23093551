//! Game Logic Module
//!
//! The deterministic simulation core.
//!
//! ## Module Structure
//!
//! - `state`: world, players, walls, round phase
//! - `raycast`: sparse-trail geometry queries
//! - `collision`: snapshot-based death evaluation
//! - `tick`: the three-pass simulation step and direction changes
//! - `input`: buffered direction commands
//! - `events`: per-tick notifications for front-ends

pub mod collision;
pub mod events;
pub mod input;
pub mod raycast;
pub mod state;
pub mod tick;

// Re-export key types
pub use events::{DeathCause, GameEvent};
pub use input::{CommandQueue, DirectionCommand};
pub use raycast::{RayHit, TrailingExtent};
pub use state::{Phase, Player, PlayerStatus, Wall, World};
pub use tick::TickResult;
