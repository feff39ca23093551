//! Simulation Tick
//!
//! One tick advances the world by a single discrete step in three strictly
//! ordered passes: move, collide, resolve. All movement is synchronous and
//! total; nothing blocks or suspends. The engine reports round completion
//! but never changes phase itself.

use crate::core::direction::Direction;
use crate::error::GameError;
use crate::game::collision::{evaluate_death, snapshot_players};
use crate::game::events::GameEvent;
use crate::game::raycast::trailing_extent;
use crate::game::state::{Phase, PlayerStatus, Wall, World};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick.
    pub events: Vec<GameEvent>,
    /// Whether the alive count dropped to one or zero.
    pub round_over: bool,
    /// The surviving player, if exactly one remains.
    pub survivor: Option<usize>,
}

/// Run one simulation tick. No-op result unless the world is running.
///
/// 1. Move pass: every living player advances one cell along its
///    direction.
/// 2. Collision pass: verdicts are computed for every living player
///    against a frozen snapshot plus the committed walls, then applied as
///    `MarkedForDeath`.
/// 3. Resolution pass: the marked die with their score reset, survivors
///    score one point, and the end-of-round condition is reported.
pub fn tick(world: &mut World) -> TickResult {
    let mut result = TickResult::default();
    if world.phase() != Phase::Running {
        return result;
    }

    // 1. Move pass
    for player in world.players_mut() {
        if player.is_alive() {
            let (dx, dy) = player.direction.delta();
            player.x += dx;
            player.y += dy;
        }
    }

    // 2. Collision pass
    let snapshot = snapshot_players(world);
    let verdicts: Vec<_> = snapshot
        .iter()
        .filter_map(|snap| {
            evaluate_death(world.grid(), world.walls(), &snapshot, snap.index)
                .map(|cause| (snap.index, cause))
        })
        .collect();
    for &(index, cause) in &verdicts {
        if let Some(player) = world.player_mut(index) {
            player.status = PlayerStatus::MarkedForDeath;
        }
        result.events.push(GameEvent::PlayerEliminated { player: index, cause });
    }

    // 3. Resolution pass
    for player in world.players_mut() {
        match player.status {
            PlayerStatus::MarkedForDeath => {
                player.status = PlayerStatus::Dead;
                player.score = 0;
            }
            PlayerStatus::Alive => player.score += 1,
            PlayerStatus::Dead => {}
        }
    }

    if world.alive_count() <= 1 {
        result.round_over = true;
        result.survivor = world.players().iter().position(|p| p.is_alive());
        result.events.push(GameEvent::RoundOver { survivor: result.survivor });
    }

    result
}

/// Change a player's travel direction, committing its open trailing
/// segment as a wall first.
///
/// Turning to the current direction succeeds without committing anything.
/// Reversing is rejected outright. Any other turn raycasts backward from
/// the player to find where the open segment ends (a committed wall or the
/// boundary) and commits that run as a wall owned by the player, head at
/// the player's position, oriented along the old travel direction. A
/// zero-length extent (turning on the spawn cell before moving) commits
/// nothing. Direction changes for dead players are accepted and inert.
pub fn change_direction(
    world: &mut World,
    index: usize,
    new_direction: Direction,
) -> Result<(), GameError> {
    let player = *world.player(index).ok_or(GameError::InvalidIndex { index })?;
    if player.status == PlayerStatus::Dead {
        return Ok(());
    }

    let current = player.direction;
    if new_direction == current {
        return Ok(());
    }
    if new_direction == current.opposite() {
        return Err(GameError::IllegalMove);
    }

    let extent = trailing_extent(world.grid(), world.walls(), player.x, player.y, current);
    if extent.length > 0 {
        world.add_wall(Wall {
            x: player.x,
            y: player.y,
            direction: current,
            length: extent.length,
            owner: index,
        })?;
    }

    if let Some(player) = world.player_mut(index) {
        player.direction = new_direction;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::DeathCause;
    use crate::game::raycast::{find_wall_at, raycast};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn running_world(width: i32, height: i32, players: &[(i32, i32, Direction)]) -> World {
        let mut world = World::new(width, height);
        for &(x, y, direction) in players {
            world.add_player(x, y, direction).unwrap();
        }
        world.set_phase(Phase::Running);
        world
    }

    #[test]
    fn lone_player_moves_and_scores() {
        let mut world = running_world(5, 5, &[(2, 2, Direction::Right)]);
        let result = tick(&mut world);

        let player = world.player(0).unwrap();
        assert_eq!((player.x, player.y), (3, 2));
        assert!(player.is_alive());
        assert_eq!(player.score, 1);
        // A lone player also means the round is already decided.
        assert!(result.round_over);
        assert_eq!(result.survivor, Some(0));
    }

    #[test]
    fn leaving_the_grid_kills_and_resets_score() {
        let mut world = running_world(5, 5, &[(0, 2, Direction::Left)]);
        world.player_mut(0).unwrap().score = 7;

        let result = tick(&mut world);

        let player = world.player(0).unwrap();
        assert_eq!(player.status, PlayerStatus::Dead);
        assert_eq!(player.score, 0);
        assert!(result.events.contains(&GameEvent::PlayerEliminated {
            player: 0,
            cause: DeathCause::OutOfBounds,
        }));
    }

    #[test]
    fn ticking_outside_running_is_a_noop() {
        let mut world = World::new(5, 5);
        world.add_player(2, 2, Direction::Right).unwrap();

        let result = tick(&mut world);
        assert!(result.events.is_empty());
        assert_eq!(world.player(0).unwrap().x, 2);
    }

    #[test]
    fn dead_players_do_not_move() {
        let mut world = running_world(9, 9, &[(2, 2, Direction::Right), (6, 6, Direction::Left)]);
        world.player_mut(0).unwrap().status = PlayerStatus::Dead;

        tick(&mut world);
        assert_eq!(world.player(0).unwrap().x, 2);
        assert_eq!(world.player(1).unwrap().x, 5);
    }

    #[test]
    fn head_on_collision_is_mutual_in_one_tick() {
        // Two ticks: 1/5 -> 2/4 -> 3/3, meeting on the middle cell.
        let mut world = running_world(7, 7, &[(1, 3, Direction::Right), (5, 3, Direction::Left)]);

        let first = tick(&mut world);
        assert!(!first.round_over);

        let second = tick(&mut world);
        for index in 0..2 {
            let player = world.player(index).unwrap();
            assert_eq!(player.status, PlayerStatus::Dead, "player {index}");
            assert_eq!(player.score, 0);
        }
        assert!(second.round_over);
        assert_eq!(second.survivor, None);
    }

    #[test]
    fn three_way_pileup_kills_everyone() {
        let mut world = running_world(
            9,
            9,
            &[
                (3, 4, Direction::Right),
                (5, 4, Direction::Left),
                (4, 3, Direction::Down),
            ],
        );

        let result = tick(&mut world);
        assert!(world.players().iter().all(|p| p.status == PlayerStatus::Dead));
        assert!(result.round_over);
        assert_eq!(result.survivor, None);
    }

    #[test]
    fn crossing_an_open_trail_is_fatal() {
        // Player 1 runs right along row 4. Player 0 runs down column 1 and
        // steps onto the cell player 1 just vacated.
        let mut world = running_world(8, 8, &[(1, 3, Direction::Down), (1, 4, Direction::Right)]);

        let result = tick(&mut world);

        assert_eq!(world.player(0).unwrap().status, PlayerStatus::Dead);
        assert!(world.player(1).unwrap().is_alive());
        assert!(result.events.contains(&GameEvent::PlayerEliminated {
            player: 0,
            cause: DeathCause::Trail { owner: 1 },
        }));
    }

    #[test]
    fn round_over_fires_exactly_at_one_survivor() {
        let mut world = running_world(
            32,
            32,
            &[
                (2, 2, Direction::Right),
                (2, 29, Direction::Right),
                (0, 15, Direction::Left),
            ],
        );

        // First tick: player 2 exits the grid, two survivors remain.
        let first = tick(&mut world);
        assert!(!first.round_over);
        assert_eq!(world.alive_count(), 2);

        // Kill one survivor directly; the next tick must signal the end.
        world.player_mut(1).unwrap().status = PlayerStatus::Dead;
        let second = tick(&mut world);
        assert!(second.round_over);
        assert_eq!(second.survivor, Some(0));
    }

    #[test]
    fn turning_to_same_direction_commits_nothing() {
        let mut world = running_world(10, 10, &[(4, 4, Direction::Up)]);
        assert!(change_direction(&mut world, 0, Direction::Up).is_ok());
        assert!(world.walls().is_empty());
        assert_eq!(world.player(0).unwrap().direction, Direction::Up);
    }

    #[test]
    fn reversing_is_rejected_and_mutates_nothing() {
        let mut world = running_world(10, 10, &[(4, 4, Direction::Up)]);
        assert_eq!(
            change_direction(&mut world, 0, Direction::Down),
            Err(GameError::IllegalMove)
        );
        assert!(world.walls().is_empty());
        assert_eq!(world.player(0).unwrap().direction, Direction::Up);
    }

    #[test]
    fn unknown_player_index_is_rejected() {
        let mut world = running_world(10, 10, &[(4, 4, Direction::Up)]);
        assert_eq!(
            change_direction(&mut world, 9, Direction::Left),
            Err(GameError::InvalidIndex { index: 9 })
        );
    }

    #[test]
    fn turning_commits_the_traversed_cells() {
        // Travel right from (2, 5) for three ticks, then turn up.
        let mut world = running_world(10, 10, &[(2, 5, Direction::Right)]);
        for _ in 0..3 {
            tick(&mut world);
        }
        change_direction(&mut world, 0, Direction::Up).unwrap();

        assert_eq!(world.walls().len(), 1);
        let wall = *world.wall(0).unwrap();
        assert_eq!((wall.x, wall.y), (5, 5));
        assert_eq!(wall.direction, Direction::Right);
        assert_eq!(wall.owner, 0);
        // Open to the left boundary: head plus everything behind it.
        assert_eq!(wall.length, 6);
        for x in 0..6 {
            assert!(wall.contains(x, 5));
        }
        assert!(!wall.contains(6, 5));
    }

    #[test]
    fn committed_wall_is_visible_to_a_fresh_raycast() {
        let mut world = running_world(10, 10, &[(2, 5, Direction::Right)]);
        for _ in 0..3 {
            tick(&mut world);
        }
        change_direction(&mut world, 0, Direction::Up).unwrap();
        let committed = *world.wall(0).unwrap();

        // From beyond the head, scanning back toward it.
        let hit = raycast(world.grid(), world.walls(), 8, 5, Direction::Left).unwrap();
        assert_eq!(hit.wall, committed);
        assert_eq!(hit.distance, 3);
    }

    #[test]
    fn turn_on_spawn_cell_changes_direction_without_a_wall() {
        let mut world = World::new(20, 20);
        world.add_player(0, 0, Direction::Up).unwrap();
        world.add_player(0, 0, Direction::Up).unwrap();
        world.start_round().unwrap();

        // The seeded spawn wall sits underfoot, so the backward raycast
        // terminates immediately and there is nothing to commit.
        let before = world.walls().len();
        let spawn_direction = world.player(0).unwrap().direction;
        let turned = match spawn_direction {
            Direction::Up | Direction::Down => Direction::Left,
            Direction::Left | Direction::Right => Direction::Up,
        };
        change_direction(&mut world, 0, turned).unwrap();

        assert_eq!(world.walls().len(), before);
        assert_eq!(world.player(0).unwrap().direction, turned);
    }

    #[test]
    fn running_into_own_committed_trail_is_fatal() {
        // Right along row 5, turn up, turn left: the next move re-enters
        // the committed trail.
        let mut world = running_world(12, 12, &[(2, 5, Direction::Right)]);
        for _ in 0..3 {
            tick(&mut world);
        }
        change_direction(&mut world, 0, Direction::Up).unwrap();
        change_direction(&mut world, 0, Direction::Left).unwrap();

        let result = tick(&mut world);
        assert_eq!(world.player(0).unwrap().status, PlayerStatus::Dead);
        assert!(result.events.contains(&GameEvent::PlayerEliminated {
            player: 0,
            cause: DeathCause::Wall { owner: 0 },
        }));
    }

    #[test]
    fn randomized_rounds_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed_7a11);

        for _ in 0..20 {
            let mut world = World::new(24, 18);
            for _ in 0..4 {
                world.add_player(0, 0, Direction::Up).unwrap();
            }
            world.start_round().unwrap();

            for _ in 0..400 {
                for index in 0..4 {
                    if rng.gen_bool(0.2) {
                        let direction = Direction::ALL[rng.gen_range(0..4)];
                        // Reversals are expected to bounce; ignore them.
                        let _ = change_direction(&mut world, index, direction);
                    }
                }

                let walls_before = world.walls().len();
                let result = tick(&mut world);

                // Walls only accumulate within a round.
                assert!(world.walls().len() >= walls_before);

                for player in world.players() {
                    // The marked state never survives a tick.
                    assert_ne!(player.status, PlayerStatus::MarkedForDeath);
                    match player.status {
                        PlayerStatus::Alive => {
                            assert!(world.grid().contains(player.x, player.y));
                            assert_eq!(
                                find_wall_at(world.walls(), player.x, player.y),
                                None,
                                "living player resting on a wall"
                            );
                        }
                        PlayerStatus::Dead => assert_eq!(player.score, 0),
                        PlayerStatus::MarkedForDeath => unreachable!(),
                    }
                }

                if result.round_over {
                    assert!(world.alive_count() <= 1);
                    break;
                }
            }
        }
    }
}
