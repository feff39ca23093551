//! # Trail Arena
//!
//! Deterministic simulation engine for a grid-based light-trail game: up
//! to six players move continuously on an integer grid, each leaving an
//! impassable trail, and die on leaving the grid, touching any trail, or
//! colliding with another player.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TRAIL ARENA ENGINE                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── grid.rs     - Integer grid bounds                       │
//! │  └── direction.rs- Axis-aligned directions                   │
//! │                                                              │
//! │  game/           - Simulation (deterministic)                │
//! │  ├── state.rs    - World, players, walls, phase              │
//! │  ├── raycast.rs  - Sparse-trail geometry queries             │
//! │  ├── collision.rs- Snapshot-based death evaluation           │
//! │  ├── tick.rs     - Three-pass simulation step                │
//! │  ├── input.rs    - Buffered direction commands               │
//! │  └── events.rs   - Per-tick notifications                    │
//! │                                                              │
//! │  session.rs      - Phase machine + query/command surface     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trail Representation
//!
//! Trails are stored sparsely: a wall segment is committed only when a
//! player turns, so wall-list growth is bounded by the number of turns
//! rather than ticks elapsed. The still-open segment behind each player is
//! recovered on demand by raycasting backward to the last committed wall
//! or the grid boundary. The collision pass works from a frozen per-tick
//! snapshot, so outcomes never depend on player evaluation order.
//!
//! Front-ends consume the engine exclusively through [`Session`] queries
//! and commands, polling on their own render cadence and advancing the
//! simulation at a fixed [`TICK_RATE`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use crate::core::direction::Direction;
pub use crate::core::grid::Grid;
pub use crate::error::GameError;
pub use crate::game::events::{DeathCause, GameEvent};
pub use crate::game::raycast::{RayHit, TrailingExtent};
pub use crate::game::state::{Phase, Player, PlayerStatus, Wall, World};
pub use crate::game::tick::TickResult;
pub use crate::session::Session;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz), independent of any rendering loop.
pub const TICK_RATE: u32 = 20;

/// Maximum roster size.
pub const MAX_PLAYERS: usize = 6;

/// Minimum players required to start a round.
pub const MIN_PLAYERS: usize = 2;

/// Suggested pause, in seconds, between a round starting and its first
/// tick. Presentation policy only; the engine imposes no delay.
pub const START_GRACE_SECS: u32 = 5;
