//! Raycasting Over Committed Walls
//!
//! Trails are stored sparsely as wall segments created at turn points, so
//! the still-open segment behind a moving player is never materialized.
//! These queries recover it on demand: march cell by cell from a point
//! until the first committed wall or the grid boundary.

use serde::{Deserialize, Serialize};

use crate::core::direction::Direction;
use crate::core::grid::Grid;
use crate::game::state::Wall;

/// First wall in creation order containing `(x, y)`.
pub fn find_wall_at(walls: &[Wall], x: i32, y: i32) -> Option<Wall> {
    walls.iter().find(|wall| wall.contains(x, y)).copied()
}

/// Result of a successful raycast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RayHit {
    /// The wall that stopped the ray.
    pub wall: Wall,
    /// Cells traveled along the ray axis, zero if the origin itself hit.
    pub distance: i32,
}

/// March from `(x, y)` along `direction`, one cell at a time, testing every
/// visited cell (the origin included) against the committed walls.
///
/// Returns the first wall hit and the axis distance traveled, or `None`
/// once the ray leaves the grid.
pub fn raycast(grid: Grid, walls: &[Wall], x: i32, y: i32, direction: Direction) -> Option<RayHit> {
    let (dx, dy) = direction.delta();
    let (mut cx, mut cy) = (x, y);

    while grid.contains(cx, cy) {
        if let Some(wall) = find_wall_at(walls, cx, cy) {
            let distance = (cx - x).abs().max((cy - y).abs());
            return Some(RayHit { wall, distance });
        }
        cx += dx;
        cy += dy;
    }

    None
}

/// Axis distance from `(x, y)` to the first out-of-bounds cell along
/// `direction`. Zero if the point is already outside the grid.
pub fn boundary_steps(grid: Grid, x: i32, y: i32, direction: Direction) -> i32 {
    if !grid.contains(x, y) {
        return 0;
    }
    match direction {
        Direction::Up => y + 1,
        Direction::Down => grid.height - y,
        Direction::Left => x + 1,
        Direction::Right => grid.width - x,
    }
}

/// The open trail behind a player: everything between its last turn point
/// and its current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingExtent {
    /// The committed wall the segment ends at, if any.
    pub wall: Option<Wall>,
    /// Cells covered by the open segment, the player's cell included.
    pub length: i32,
}

/// Compute the uncommitted trailing segment for a head at `(x, y)`
/// traveling along `travel`, by raycasting backward to the first committed
/// wall or, failing that, the boundary.
///
/// Used by the collision pass and by renderers drawing the open trail.
pub fn trailing_extent(
    grid: Grid,
    walls: &[Wall],
    x: i32,
    y: i32,
    travel: Direction,
) -> TrailingExtent {
    let back = travel.opposite();
    match raycast(grid, walls, x, y, back) {
        Some(hit) => TrailingExtent {
            wall: Some(hit.wall),
            length: hit.distance,
        },
        None => TrailingExtent {
            wall: None,
            length: boundary_steps(grid, x, y, back),
        },
    }
}
