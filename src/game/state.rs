//! World State Definitions
//!
//! The authoritative mutable record: grid dimensions, the ordered player
//! list, the append-only wall list, and the round phase. The world owns
//! both sequences exclusively; consumers read through accessors and never
//! hold independent copies.

use serde::{Deserialize, Serialize};

use crate::core::direction::Direction;
use crate::core::grid::Grid;
use crate::error::GameError;

// =============================================================================
// PLAYER
// =============================================================================

/// Lifecycle status of a player within a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerStatus {
    /// Moving and collidable.
    #[default]
    Alive = 0,
    /// Doomed this tick. Never observable between ticks.
    MarkedForDeath = 1,
    /// Eliminated. Stays in the list until the next round.
    Dead = 2,
}

/// One player. Identity is its index in the world's ordered list.
///
/// Indices are positional: removing a player shifts later players down.
/// The session forbids removal while a round is running, so indices stay
/// stable for the duration any renderer cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Current column.
    pub x: i32,
    /// Current row.
    pub y: i32,
    /// Current travel direction.
    pub direction: Direction,
    /// Ticks survived this round. Reset to zero on death.
    pub score: u32,
    /// Lifecycle status.
    pub status: PlayerStatus,
}

impl Player {
    /// Create a player at a position, alive with zero score.
    pub const fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self {
            x,
            y,
            direction,
            score: 0,
            status: PlayerStatus::Alive,
        }
    }

    /// Whether this player moves and is collidable.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == PlayerStatus::Alive
    }
}

// =============================================================================
// WALL
// =============================================================================

/// A committed trail segment.
///
/// The origin is the head of the segment (where its owner stood when it was
/// committed) and `direction` is the owner's travel direction at that time.
/// The occupied run extends *behind* the origin, which lets a wall be
/// described by one endpoint and a direction without normalizing to a
/// canonical start:
///
/// - `Up`:    column `x`, rows `y <= r < y + length`
/// - `Down`:  column `x`, rows `y - length < r <= y`
/// - `Left`:  row `y`, columns `x <= c < x + length`
/// - `Right`: row `y`, columns `x - length < c <= x`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    /// Head column.
    pub x: i32,
    /// Head row.
    pub y: i32,
    /// Owner's travel direction when the segment was committed.
    pub direction: Direction,
    /// Number of occupied cells, head included.
    pub length: i32,
    /// Index of the player that created the segment.
    pub owner: usize,
}

impl Wall {
    /// Whether `(x, y)` lies on the occupied run.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        match self.direction {
            Direction::Up => self.x == x && self.y <= y && y < self.y + self.length,
            Direction::Down => self.x == x && self.y - self.length < y && y <= self.y,
            Direction::Left => self.y == y && self.x <= x && x < self.x + self.length,
            Direction::Right => self.y == y && self.x - self.length < x && x <= self.x,
        }
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// Coarse lifecycle of the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Editing the roster; nothing simulates.
    #[default]
    Lobby,
    /// A round is in progress.
    Running,
    /// The round ended; results are on display.
    Finished,
}

// =============================================================================
// WORLD
// =============================================================================

/// The authoritative game state.
///
/// Exactly one instance exists per process, constructed by bootstrap code
/// and owned by the session controller. Players persist across rounds;
/// walls are cleared when a round starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct World {
    grid: Grid,
    players: Vec<Player>,
    walls: Vec<Wall>,
    phase: Phase,
}

impl World {
    /// Create an empty world in the lobby phase.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid: Grid::new(width, height),
            players: Vec::new(),
            walls: Vec::new(),
            phase: Phase::Lobby,
        }
    }

    /// Field dimensions.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn resize(&mut self, width: i32, height: i32) {
        self.grid = Grid::new(width, height);
    }

    /// All players, in insertion order.
    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// A player by index.
    #[inline]
    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub(crate) fn player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// All committed walls, in creation order.
    #[inline]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// A wall by index.
    #[inline]
    pub fn wall(&self, index: usize) -> Option<&Wall> {
        self.walls.get(index)
    }

    /// Number of players still alive.
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Append a player. Fails only if storage cannot grow, in which case
    /// nothing is mutated.
    pub fn add_player(
        &mut self,
        x: i32,
        y: i32,
        direction: Direction,
    ) -> Result<usize, GameError> {
        self.players
            .try_reserve(1)
            .map_err(|_| GameError::OutOfMemory)?;
        self.players.push(Player::new(x, y, direction));
        Ok(self.players.len() - 1)
    }

    /// Remove a player, shifting later players down one index.
    pub fn remove_player(&mut self, index: usize) -> Result<(), GameError> {
        if index >= self.players.len() {
            return Err(GameError::InvalidIndex { index });
        }
        self.players.remove(index);
        Ok(())
    }

    /// Append a committed wall. Walls are never merged or overwritten.
    pub(crate) fn add_wall(&mut self, wall: Wall) -> Result<(), GameError> {
        self.walls
            .try_reserve(1)
            .map_err(|_| GameError::OutOfMemory)?;
        self.walls.push(wall);
        Ok(())
    }

    /// Drop every committed wall.
    pub(crate) fn clear_walls(&mut self) {
        self.walls.clear();
    }

    /// Begin a round: respawn every player, clear walls, seed one length-1
    /// wall per spawn point so spawn cells are immediately collidable, and
    /// enter the running phase.
    ///
    /// No-op while already running or with an empty roster.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::Running || self.players.is_empty() {
            return Ok(());
        }

        let count = self.players.len();
        for index in 0..count {
            let (x, y, direction) = self.spawn_slot(index, count);
            let player = &mut self.players[index];
            player.x = x;
            player.y = y;
            player.direction = direction;
            player.score = 0;
            player.status = PlayerStatus::Alive;
        }

        self.clear_walls();
        for index in 0..count {
            let player = self.players[index];
            self.add_wall(Wall {
                x: player.x,
                y: player.y,
                direction: player.direction,
                length: 1,
                owner: index,
            })?;
        }

        self.phase = Phase::Running;
        Ok(())
    }

    /// Spawn slot for player `index` of `count`: even angular spacing on an
    /// ellipse around the grid center, radius derived from the smaller grid
    /// dimension, direction taken from the angle's quadrant.
    fn spawn_slot(&self, index: usize, count: usize) -> (i32, i32, Direction) {
        let radius = if self.grid.width / 2 < self.grid.height {
            self.grid.width / 6
        } else {
            self.grid.height / 3
        };

        let theta = index as f64 / count as f64 * std::f64::consts::TAU;
        let x = (self.grid.width / 2) as f64 + theta.cos() * (radius * 2) as f64;
        let y = (self.grid.height / 2) as f64 + theta.sin() * radius as f64;
        let direction = Direction::from_quadrant((theta / std::f64::consts::FRAC_PI_2) as usize);

        (x as i32, y as i32, direction)
    }
}

// =============================================================================
// TESTS
// =============================================================================
