//! Session Controller
//!
//! A thin façade over the world: it enforces legal phase transitions,
//! gates roster edits to non-running phases, and mediates every query and
//! command a front-end issues. The world is owned here exclusively for the
//! lifetime of the process; front-ends poll queries on their own cadence
//! and drive `advance_tick` from a fixed-rate timer.

use tracing::{debug, info, warn};

use crate::core::direction::Direction;
use crate::error::GameError;
use crate::game::input::CommandQueue;
use crate::game::raycast::{trailing_extent, TrailingExtent};
use crate::game::state::{Phase, Player, Wall, World};
use crate::game::tick;
use crate::game::tick::TickResult;
use crate::{MAX_PLAYERS, MIN_PLAYERS};

/// Owns the world and the pending input queue.
pub struct Session {
    world: World,
    queue: CommandQueue,
}

impl Session {
    /// Create a session around a fresh lobby-phase world.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            world: World::new(width, height),
            queue: CommandQueue::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Field width in cells.
    pub fn width(&self) -> i32 {
        self.world.grid().width
    }

    /// Field height in cells.
    pub fn height(&self) -> i32 {
        self.world.grid().height
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.world.phase()
    }

    /// Number of players in the roster.
    pub fn player_count(&self) -> usize {
        self.world.players().len()
    }

    /// A player by index.
    pub fn player(&self, index: usize) -> Option<&Player> {
        self.world.player(index)
    }

    /// Number of committed walls.
    pub fn wall_count(&self) -> usize {
        self.world.walls().len()
    }

    /// A committed wall by index.
    pub fn wall(&self, index: usize) -> Option<&Wall> {
        self.world.wall(index)
    }

    /// Number of players still alive.
    pub fn alive_count(&self) -> usize {
        self.world.alive_count()
    }

    /// Whether a point lies outside the field.
    pub fn out_of_bounds(&self, x: i32, y: i32) -> bool {
        !self.world.grid().contains(x, y)
    }

    /// A player's open trailing segment, for rendering: the wall it ends
    /// at (if any) and the number of cells it covers.
    pub fn trailing_wall(&self, index: usize) -> Option<TrailingExtent> {
        let player = self.world.player(index)?;
        Some(trailing_extent(
            self.world.grid(),
            self.world.walls(),
            player.x,
            player.y,
            player.direction,
        ))
    }

    // =========================================================================
    // Roster commands (lobby and results screen only)
    // =========================================================================

    /// Add a player to the roster. Its position is assigned at round start.
    pub fn add_player(&mut self) -> Result<usize, GameError> {
        if self.world.phase() == Phase::Running {
            warn!("rejected add_player while running");
            return Err(GameError::PhaseLocked { phase: Phase::Running });
        }
        if self.world.players().len() >= MAX_PLAYERS {
            return Err(GameError::LobbyFull);
        }
        self.world.add_player(0, 0, Direction::Up)
    }

    /// Remove a player by index, shifting later indices down.
    pub fn remove_player(&mut self, index: usize) -> Result<(), GameError> {
        if self.world.phase() == Phase::Running {
            warn!(index, "rejected remove_player while running");
            return Err(GameError::PhaseLocked { phase: Phase::Running });
        }
        self.world.remove_player(index)
    }

    // =========================================================================
    // Phase commands
    // =========================================================================

    /// Start a round on a field of the given dimensions.
    ///
    /// Legal only from the lobby, with at least the minimum player count.
    pub fn play(&mut self, width: i32, height: i32) -> Result<(), GameError> {
        match self.world.phase() {
            Phase::Running => {
                warn!("rejected play: round already running");
                Err(GameError::PhaseLocked { phase: Phase::Running })
            }
            Phase::Finished => {
                warn!("rejected play: results must be dismissed first");
                Err(GameError::InvalidTransition {
                    from: Phase::Finished,
                    to: Phase::Running,
                })
            }
            Phase::Lobby => {
                if self.world.players().len() < MIN_PLAYERS {
                    return Err(GameError::NotEnoughPlayers);
                }
                self.world.resize(width, height);
                self.queue.clear();
                self.world.start_round()?;
                info!(
                    width,
                    height,
                    players = self.world.players().len(),
                    "round started"
                );
                Ok(())
            }
        }
    }

    /// Return to the lobby, abandoning a running round or dismissing
    /// results. Already being in the lobby is accepted silently.
    pub fn cancel(&mut self) -> Result<(), GameError> {
        match self.world.phase() {
            Phase::Lobby => Ok(()),
            Phase::Running | Phase::Finished => {
                self.world.set_phase(Phase::Lobby);
                self.world.clear_walls();
                self.queue.clear();
                info!("returned to lobby");
                Ok(())
            }
        }
    }

    /// Force the running round to end immediately.
    pub fn game_over(&mut self) -> Result<(), GameError> {
        match self.world.phase() {
            Phase::Running => {
                self.world.set_phase(Phase::Finished);
                self.queue.clear();
                info!("round finished by request");
                Ok(())
            }
            Phase::Finished => Ok(()),
            Phase::Lobby => {
                warn!("rejected game_over from lobby");
                Err(GameError::InvalidTransition {
                    from: Phase::Lobby,
                    to: Phase::Finished,
                })
            }
        }
    }

    // =========================================================================
    // Simulation commands
    // =========================================================================

    /// Advance the simulation by one tick.
    ///
    /// Queued direction commands are drained in arrival order first, so the
    /// tick sees a frozen command set. When the engine reports round
    /// completion, the running phase transitions to finished here. Outside
    /// the running phase this is an empty no-op so front-ends can drive a
    /// fixed-rate timer without phase bookkeeping.
    pub fn advance_tick(&mut self) -> TickResult {
        if self.world.phase() != Phase::Running {
            return TickResult::default();
        }

        for command in self.queue.drain() {
            if let Err(error) = tick::change_direction(&mut self.world, command.player, command.direction)
            {
                debug!(player = command.player, %error, "dropped queued direction command");
            }
        }

        let result = tick::tick(&mut self.world);
        if result.round_over {
            self.world.set_phase(Phase::Finished);
            self.queue.clear();
            info!(survivor = ?result.survivor, "round over");
        }
        result
    }

    /// Change a player's direction immediately, committing its open trail.
    pub fn change_direction(&mut self, index: usize, direction: Direction) -> Result<(), GameError> {
        let phase = self.world.phase();
        if phase != Phase::Running {
            return Err(GameError::PhaseLocked { phase });
        }
        tick::change_direction(&mut self.world, index, direction)
    }

    /// Buffer a direction change to be applied just before the next tick.
    pub fn queue_direction(&mut self, index: usize, direction: Direction) {
        self.queue.push(index, direction);
    }
}
