//! Display list generation for the current game state
//!
//! Visual timing (hit flicker, projectile color cycling) depends only on the
//! `time_ms` the caller passes in, never on a clock read here.

use glam::Vec2;

use super::{Color, DrawCommand, colors};
use crate::consts::{FIREBALL_RADIUS, LIGHTNING_LENGTH};
use crate::sim::{
    Enemy, Facing, GameState, Impact, LevelTier, Player, Projectile, ProjectileKind,
};

/// Side length of the player's direction indicator
const EYE_SIZE: f32 = 10.0;
/// Eye inset from the player's edges
const EYE_INSET: f32 = 5.0;
/// Period of one flicker/color phase for lightning and flashing enemies
const FAST_BLINK_MS: f64 = 50.0;
/// Period of one color phase for fireballs
const SLOW_BLINK_MS: f64 = 100.0;

/// Player body color by remaining health
pub fn player_color(health: u8) -> Color {
    match health {
        3.. => colors::PLAYER_HEALTHY,
        2 => colors::PLAYER_HURT,
        _ => colors::PLAYER_CRITICAL,
    }
}

/// Background color per level tier
pub fn background_color(level: LevelTier) -> Color {
    match level {
        LevelTier::One => colors::BACKGROUND_LEVEL_1,
        LevelTier::Two => colors::BACKGROUND_LEVEL_2,
        LevelTier::Three => colors::BACKGROUND_LEVEL_3,
    }
}

/// Which half of a blink period `time_ms` falls in
fn blink_phase(time_ms: f64, period_ms: f64) -> usize {
    ((time_ms / period_ms).floor() as i64).rem_euclid(2) as usize
}

/// A flashing enemy is hidden on alternate blink phases
pub fn enemy_visible(enemy: &Enemy, time_ms: f64, flicker: bool) -> bool {
    !(flicker && enemy.flash_count > 0 && blink_phase(time_ms, FAST_BLINK_MS) == 0)
}

pub fn projectile_color(kind: ProjectileKind, time_ms: f64, flicker: bool) -> Color {
    let (palette, period) = match kind {
        ProjectileKind::Lightning => (colors::LIGHTNING, FAST_BLINK_MS),
        ProjectileKind::Fireball => (colors::FIREBALL, SLOW_BLINK_MS),
    };
    if flicker {
        palette[blink_phase(time_ms, period)]
    } else {
        palette[0]
    }
}

/// Eye rectangle (world space), on the side the player faces
pub fn eye_pos(player: &Player) -> Vec2 {
    let x = match player.facing {
        Facing::Right => player.pos.x + player.size.x - EYE_SIZE - EYE_INSET,
        Facing::Left => player.pos.x + EYE_INSET,
    };
    Vec2::new(x, player.pos.y + EYE_INSET)
}

/// Build the full frame in draw order
///
/// `flicker` disables blinking for reduced-motion players.
pub fn build_frame(state: &GameState, time_ms: f64, flicker: bool) -> Vec<DrawCommand> {
    let camera = Vec2::new(state.camera_offset, 0.0);
    let view_left = state.camera_offset;
    let view_right = state.camera_offset + state.viewport.width;
    let on_screen = |left: f32, right: f32| right >= view_left && left <= view_right;

    let mut commands = Vec::with_capacity(
        1 + state.world.platforms.len().min(64)
            + state.world.enemies.len()
            + state.projectiles.len()
            + state.impacts.len()
            + 2,
    );

    commands.push(DrawCommand::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(state.viewport.width, state.viewport.height),
        color: background_color(state.level()),
    });

    for platform in &state.world.platforms {
        if on_screen(platform.pos.x, platform.right()) {
            commands.push(DrawCommand::Rect {
                pos: platform.pos - camera,
                size: Vec2::new(platform.width, platform.height),
                color: colors::PLATFORM,
            });
        }
    }

    for enemy in &state.world.enemies {
        let b = enemy.bounds();
        if on_screen(b.min.x, b.max.x) && enemy_visible(enemy, time_ms, flicker) {
            commands.push(enemy_triangle(enemy, camera));
        }
    }

    for projectile in &state.projectiles {
        if on_screen(projectile.pos.x - LIGHTNING_LENGTH, projectile.pos.x + LIGHTNING_LENGTH) {
            commands.push(projectile_shape(projectile, camera, time_ms, flicker));
        }
    }

    for impact in &state.impacts {
        commands.push(impact_ring(impact, camera));
    }

    let player = &state.player;
    commands.push(DrawCommand::Rect {
        pos: player.pos - camera,
        size: player.size,
        color: player_color(player.health),
    });
    commands.push(DrawCommand::Rect {
        pos: eye_pos(player) - camera,
        size: Vec2::splat(EYE_SIZE),
        color: colors::PLAYER_EYE,
    });

    commands
}

/// Upward-pointing triangle standing on the enemy's anchor
fn enemy_triangle(enemy: &Enemy, camera: Vec2) -> DrawCommand {
    let b = enemy.bounds();
    let anchor = enemy.pos - camera;
    DrawCommand::Triangle {
        points: [
            Vec2::new(anchor.x, anchor.y - b.height()),
            Vec2::new(anchor.x - b.width() / 2.0, anchor.y),
            Vec2::new(anchor.x + b.width() / 2.0, anchor.y),
        ],
        color: colors::ENEMY,
    }
}

fn projectile_shape(
    projectile: &Projectile,
    camera: Vec2,
    time_ms: f64,
    flicker: bool,
) -> DrawCommand {
    let pos = projectile.pos - camera;
    let color = projectile_color(projectile.kind, time_ms, flicker);
    match projectile.kind {
        // Bolt trails ahead of its origin point
        ProjectileKind::Lightning => DrawCommand::Line {
            from: pos,
            to: pos + Vec2::new(LIGHTNING_LENGTH * projectile.direction, 0.0),
            width: 3.0,
            color,
        },
        ProjectileKind::Fireball => DrawCommand::Circle {
            center: pos,
            radius: FIREBALL_RADIUS,
            color,
        },
    }
}

fn impact_ring(impact: &Impact, camera: Vec2) -> DrawCommand {
    let mut color = colors::IMPACT;
    color[3] = impact.opacity;
    DrawCommand::Ring {
        center: impact.pos - camera,
        radius: impact.radius,
        width: 2.0,
        color,
    }
}
