//! Collision Evaluation
//!
//! The collision pass works from a frozen snapshot of every living
//! player's position and direction, taken before any status is mutated.
//! Each player's verdict is then independent of evaluation order, so
//! simultaneous arrivals are mutually fatal no matter how they are
//! indexed.

use crate::core::direction::Direction;
use crate::core::grid::Grid;
use crate::game::events::DeathCause;
use crate::game::raycast::{find_wall_at, trailing_extent};
use crate::game::state::{Wall, World};

/// A living player's post-move position and direction, frozen for the
/// duration of one collision pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlayerSnapshot {
    /// Index in the world's player list.
    pub index: usize,
    /// Column after the move pass.
    pub x: i32,
    /// Row after the move pass.
    pub y: i32,
    /// Travel direction at snapshot time.
    pub direction: Direction,
}

/// Snapshot every living player.
pub(crate) fn snapshot_players(world: &World) -> Vec<PlayerSnapshot> {
    world
        .players()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_alive())
        .map(|(index, p)| PlayerSnapshot {
            index,
            x: p.x,
            y: p.y,
            direction: p.direction,
        })
        .collect()
}

/// Decide whether the snapshot player `index` dies this tick, and why.
///
/// Checks run in priority order: out of bounds, committed wall, head-on
/// with another living player, then another living player's uncommitted
/// trailing segment. The first hit wins. Head-on runs before the trail
/// check, so a shared cell is always reported as mutual rather than as one
/// player standing on the other's trail head.
pub(crate) fn evaluate_death(
    grid: Grid,
    walls: &[Wall],
    snapshot: &[PlayerSnapshot],
    index: usize,
) -> Option<DeathCause> {
    let me = snapshot.iter().find(|s| s.index == index)?;

    if !grid.contains(me.x, me.y) {
        return Some(DeathCause::OutOfBounds);
    }

    if let Some(wall) = find_wall_at(walls, me.x, me.y) {
        return Some(DeathCause::Wall { owner: wall.owner });
    }

    for other in snapshot.iter().filter(|s| s.index != index) {
        if other.x == me.x && other.y == me.y {
            return Some(DeathCause::HeadOn { other: other.index });
        }
    }

    for other in snapshot.iter().filter(|s| s.index != index) {
        let extent = trailing_extent(grid, walls, other.x, other.y, other.direction);
        // The open segment behaves exactly like a wall that was never
        // committed: same head, same direction, raycast length.
        let ghost = Wall {
            x: other.x,
            y: other.y,
            direction: other.direction,
            length: extent.length,
            owner: other.index,
        };
        if ghost.contains(me.x, me.y) {
            return Some(DeathCause::Trail { owner: other.index });
        }
    }

    None
}
