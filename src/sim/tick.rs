//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step deterministically.

use super::combat;
use super::physics;
use super::state::{Facing, GameEvent, GameOverCause, GamePhase, GameState, ProjectileKind};
use crate::consts::*;

/// How far ahead of its forward edge the autopilot looks for ground
const AUTOPILOT_LOOKAHEAD: f32 = 30.0;
/// Range at which the autopilot opens fire on an enemy ahead
const AUTOPILOT_FIRE_RANGE: f32 = 350.0;
/// Ticks between autopilot shots
const AUTOPILOT_FIRE_INTERVAL: u64 = 12;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held left arrow
    pub move_left: bool,
    /// Held right arrow
    pub move_right: bool,
    /// Jump pressed since the last tick
    pub jump: bool,
    /// Attack pressed since the last tick
    pub attack: Option<ProjectileKind>,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

impl TickInput {
    /// Held direction; right wins when both are held
    pub fn held_direction(&self) -> Option<Facing> {
        if self.move_right {
            Some(Facing::Right)
        } else if self.move_left {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_game_over() {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        drive_autopilot(state, &mut input);
    }
    let input = &input;

    state.time_ticks += 1;
    let level_before = state.level();

    // Edge-triggered actions land before the step that moves the player
    if let Some(kind) = input.attack {
        combat::spawn_projectile(state, kind);
    }
    if input.jump {
        physics::jump(&mut state.player);
    }

    // Keep at least a viewport of generated level ahead of the player
    let frontier = state.world.frontier();
    if frontier - state.player.right() <= state.viewport.width {
        state.world.extend(frontier, frontier + EXTEND_SPAN);
    }

    physics::advance(&mut state.player, input, &state.world.platforms);

    update_camera(state);

    combat::tick(state);
    combat::prune(state);

    let level = state.level();
    if level != level_before {
        log::info!("Reached level {}", level.number());
        state.events.push(GameEvent::LevelChanged { level });
    }

    if let Some(cause) = terminal_cause(state) {
        let stats = state.run_stats();
        log::info!(
            "Game over ({cause:?}) after {} ticks: {}m, {} kills",
            state.time_ticks,
            stats.distance,
            stats.enemies_defeated
        );
        state.phase = GamePhase::GameOver { cause };
        state.events.push(GameEvent::GameOver { cause, stats });
    }
}

/// Follow the player once it passes a third of the viewport
///
/// The camera moves by exactly the overflow and distance accrues one unit per
/// `DISTANCE_SCALE` units of camera travel. The remainder carries over between ticks:
/// at `PLAYER_SPEED` the overflow is 5 per tick, so flooring each tick would never add
/// anything.
fn update_camera(state: &mut GameState) {
    let anchor = state.camera_offset + state.viewport.width / 3.0;
    if state.player.pos.x <= anchor {
        return;
    }

    let overflow = state.player.pos.x - anchor;
    state.camera_offset += overflow;

    state.distance_carry += overflow / DISTANCE_SCALE;
    let whole = state.distance_carry.floor();
    state.distance += whole as u64;
    state.distance_carry -= whole;
}

fn terminal_cause(state: &GameState) -> Option<GameOverCause> {
    if state.player.health == 0 {
        Some(GameOverCause::Defeated)
    } else if state.player.pos.y > state.viewport.height {
        Some(GameOverCause::Fell)
    } else {
        None
    }
}

/// Demo-mode AI: run right, hop gaps and enemies, shoot what is ahead
fn drive_autopilot(state: &GameState, input: &mut TickInput) {
    let player = &state.player;
    input.move_left = false;
    input.move_right = true;

    let feet = player.pos.y + player.size.y;
    let probe_x = player.right() + AUTOPILOT_LOOKAHEAD;
    let platforms = &state.world.platforms;
    let start = platforms.partition_point(|p| p.pos.x + SEGMENT_MAX_WIDTH <= probe_x);
    let end = platforms.partition_point(|p| p.pos.x <= probe_x);
    let ground_ahead = platforms[start..end.max(start)]
        .iter()
        .any(|p| p.right() >= probe_x && p.pos.y >= feet - 1.0);

    let enemy_ahead = state
        .world
        .enemies
        .iter()
        .map(|e| e.pos.x - player.right())
        .filter(|&gap| gap > -ENEMY_SIZE / 2.0)
        .min_by(|a, b| a.total_cmp(b));

    if player.grounded {
        let enemy_close = enemy_ahead.is_some_and(|gap| gap < ENEMY_SIZE * 2.0);
        if !ground_ahead || enemy_close {
            input.jump = true;
        }
    } else if player.jump_count == 1 && player.vel.y > 0.0 && !ground_ahead {
        // Falling with nothing ahead: spend the air jump
        input.jump = true;
    }

    if input.attack.is_none()
        && enemy_ahead.is_some_and(|gap| gap < AUTOPILOT_FIRE_RANGE)
        && state.time_ticks.is_multiple_of(AUTOPILOT_FIRE_INTERVAL)
    {
        input.attack = Some(ProjectileKind::Lightning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Platform, Viewport};
    use glam::Vec2;

    /// A run whose generated area is flat floor with no enemies
    fn flat_run() -> GameState {
        let mut state = GameState::new(12345, Viewport::default());
        let frontier = state.world.frontier();
        state.world.platforms.clear();
        state.world.enemies.clear();

        // Tiles stay sorted and no wider than a segment, like generated ground
        let mut x = 0.0;
        while x < frontier {
            let width = (frontier - x).min(400.0);
            state.world.platforms.push(Platform::new(x, BASE_Y, width, true));
            x += width;
        }
        state.player.pos.y = BASE_Y - PLAYER_SIZE;
        state
    }

    fn holding_right() -> TickInput {
        TickInput {
            move_right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_turn_flick_scenario() {
        let mut state = flat_run();
        assert_eq!(state.player.pos.x, 50.0);
        assert_eq!(state.player.facing, Facing::Right);

        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..TURN_DELAY_TICKS {
            tick(&mut state, &left);
            assert_eq!(state.player.facing, Facing::Left);
            assert_eq!(state.player.vel.x, 0.0);
        }
        tick(&mut state, &left);
        assert_eq!(state.player.vel.x, -PLAYER_SPEED);
    }

    #[test]
    fn test_contact_at_one_health_ends_run() {
        let mut state = flat_run();
        state.player.health = 1;
        state
            .world
            .enemies
            .push(Enemy::new(99, Vec2::new(state.player.pos.x + 30.0, BASE_Y)));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.health, 0);
        assert!(state.world.enemies.is_empty());
        assert_eq!(
            state.phase,
            GamePhase::GameOver {
                cause: GameOverCause::Defeated
            }
        );
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                cause: GameOverCause::Defeated,
                ..
            }
        )));
    }

    #[test]
    fn test_falling_off_world_ends_run() {
        let mut state = flat_run();
        state.world.platforms.clear();

        let mut ticks = 0;
        while !state.is_game_over() {
            tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks < 200, "never fell out of the world");
        }
        assert_eq!(
            state.phase,
            GamePhase::GameOver {
                cause: GameOverCause::Fell
            }
        );
        assert!(state.player.pos.y > VIEWPORT_HEIGHT);

        // Further ticks are no-ops
        let frozen = state.time_ticks;
        tick(&mut state, &holding_right());
        assert_eq!(state.time_ticks, frozen);
    }

    #[test]
    fn test_camera_follows_past_one_third() {
        let mut state = flat_run();
        let anchor = VIEWPORT_WIDTH / 3.0;
        let mut last_offset = 0.0;

        // Stays inside the flat area
        for _ in 0..300 {
            tick(&mut state, &holding_right());
            assert!(state.camera_offset >= last_offset);
            last_offset = state.camera_offset;

            if state.player.pos.x <= anchor {
                assert_eq!(state.camera_offset, 0.0);
            } else {
                assert!((state.player.pos.x - state.camera_offset - anchor).abs() < 1e-2);
            }
        }

        // Whole distance units track camera travel
        let expected = (state.camera_offset / DISTANCE_SCALE).floor() as u64;
        assert!(state.distance.abs_diff(expected) <= 1);
        assert!(state.distance > 0);
    }

    #[test]
    fn test_camera_overflow_accrues_distance() {
        let mut state = flat_run();
        state.player.pos.x = VIEWPORT_WIDTH / 3.0 + 25.0;

        tick(&mut state, &TickInput::default());
        assert!((state.camera_offset - 25.0).abs() < 1e-3);
        assert_eq!(state.distance, 2);
    }

    #[test]
    fn test_idle_spawn_never_falls() {
        for seed in 0..200 {
            let mut state = GameState::new(seed, Viewport::default());
            for _ in 0..120 {
                tick(&mut state, &TickInput::default());
            }
            assert_ne!(
                state.phase,
                GamePhase::GameOver {
                    cause: GameOverCause::Fell
                },
                "seed {seed}"
            );
            assert!(state.player.grounded, "seed {seed}");
        }
    }

    #[test]
    fn test_level_change_emits_event() {
        let mut state = flat_run();
        state.distance = LEVEL_2_DISTANCE;
        state.player.pos.x = VIEWPORT_WIDTH / 3.0 + 20.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.distance, LEVEL_2_DISTANCE + 2);
        assert!(state.drain_events().contains(&GameEvent::LevelChanged {
            level: crate::sim::LevelTier::Two
        }));
    }

    #[test]
    fn test_world_extends_near_frontier() {
        let mut state = GameState::new(7, Viewport::default());
        let frontier = state.world.frontier();
        let count = state.world.platforms.len();

        // Teleport to within one viewport of the frontier
        state.player.pos.x = frontier - VIEWPORT_WIDTH + 10.0;
        tick(&mut state, &TickInput::default());

        assert!(state.world.frontier() >= frontier + EXTEND_SPAN);
        assert!(state.world.platforms.len() > count);
    }

    #[test]
    fn test_jump_and_attack_are_applied() {
        let mut state = flat_run();
        tick(&mut state, &TickInput::default());
        assert!(state.player.grounded);

        let input = TickInput {
            jump: true,
            attack: Some(ProjectileKind::Fireball),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(!state.player.grounded);
        assert!(state.player.vel.y < 0.0);
        assert_eq!(state.player.jump_count, 1);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Viewport::default());
        let mut state2 = GameState::new(99999, Viewport::default());

        let inputs = [
            holding_right(),
            TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            },
            TickInput {
                attack: Some(ProjectileKind::Lightning),
                ..Default::default()
            },
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.world.platforms, state2.world.platforms);
        assert_eq!(state1.world.enemies, state2.world.enemies);
        assert_eq!(state1.camera_offset, state2.camera_offset);
    }

    #[test]
    fn test_autopilot_runs_right() {
        let mut state = GameState::new(2024, Viewport::default());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..120 {
            tick(&mut state, &input);
        }
        assert_eq!(state.player.facing, Facing::Right);
        assert!(state.player.pos.x > PLAYER_START_X);
    }

    #[test]
    fn test_autopilot_shoots_enemy_ahead() {
        let mut state = flat_run();
        state.world.enemies.push(Enemy::new(1, Vec2::new(300.0, BASE_Y)));
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut fired = false;
        for _ in 0..AUTOPILOT_FIRE_INTERVAL {
            tick(&mut state, &input);
            fired |= state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ProjectileFired { .. }));
        }
        assert!(fired);
    }
}
