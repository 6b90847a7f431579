//! Player movement and platform collision
//!
//! One semi-implicit Euler step per tick:
//! 1. Turn-flick state machine decides horizontal velocity
//! 2. Gravity accumulates into vertical velocity (no terminal velocity)
//! 3. Position integrates velocity
//! 4. Downward contacts with platforms are resolved in list order
//!
//! Falling out of the world is the orchestrator's concern, not handled here.

use super::collision::landing_contact;
use super::state::{Facing, Platform, Player, TurnState};
use super::tick::TickInput;
use crate::consts::*;

/// Advance the player by one tick and resolve platform contact
///
/// `platforms` must be sorted by x with no platform wider than `SEGMENT_MAX_WIDTH`,
/// which is what the world generator produces.
pub fn advance(player: &mut Player, input: &TickInput, platforms: &[Platform]) {
    update_horizontal(player, input.held_direction());

    player.vel.y += GRAVITY;
    player.pos += player.vel;

    resolve_landing(player, platforms);
}

/// Turn-flick: a reversal flips facing at once, then holds the player still for
/// `TURN_DELAY_TICKS` ticks before held input moves it again
fn update_horizontal(player: &mut Player, held: Option<Facing>) {
    if let Some(dir) = held
        && dir != player.facing
    {
        player.facing = dir;
        player.turn = TurnState::Turning {
            ticks_left: TURN_DELAY_TICKS,
        };
    }

    match player.turn {
        TurnState::Turning { ticks_left } => {
            player.vel.x = 0.0;
            let ticks_left = ticks_left.saturating_sub(1);
            player.turn = if ticks_left == 0 {
                TurnState::Moving
            } else {
                TurnState::Turning { ticks_left }
            };
        }
        TurnState::Moving => {
            player.vel.x = held.map_or(0.0, |dir| dir.sign() * PLAYER_SPEED);
        }
    }
}

/// Snap onto any platform the player is falling onto
fn resolve_landing(player: &mut Player, platforms: &[Platform]) {
    player.grounded = false;

    // Platforms are sorted by x and never wider than a segment, so only a window
    // around the player can overlap it horizontally
    let start = platforms.partition_point(|p| p.pos.x + SEGMENT_MAX_WIDTH <= player.pos.x);
    let end = platforms.partition_point(|p| p.pos.x < player.right());

    for plat in &platforms[start..end.max(start)] {
        if let Some(y) = landing_contact(&player.bounds(), player.vel.y, &plat.bounds()) {
            player.pos.y = y;
            player.vel.y = 0.0;
            player.grounded = true;
            player.jump_count = 0;
        }
    }
}

/// Apply a jump impulse if the player has a jump left
///
/// Returns whether the jump happened.
pub fn jump(player: &mut Player) -> bool {
    if player.jump_count >= MAX_JUMPS {
        return false;
    }
    player.vel.y = JUMP_IMPULSE;
    player.jump_count += 1;
    true
}
