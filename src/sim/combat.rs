//! Projectiles, hit detection and enemy lifecycle
//!
//! Removal during a scan is never done in place: hits and contacts mark indices
//! first and the live sets are compacted afterwards.

use super::state::{GameEvent, GameState, Impact, Projectile, ProjectileKind};
use crate::consts::*;

/// Fire a projectile from the player's centre in the facing direction
pub fn spawn_projectile(state: &mut GameState, kind: ProjectileKind) {
    let id = state.next_entity_id();
    let origin = state.player.center();
    state
        .projectiles
        .push(Projectile::new(id, origin, state.player.facing, kind));
    state.events.push(GameEvent::ProjectileFired { kind });
}

/// Advance enemies, projectiles and impacts one tick, then resolve intersections
pub fn tick(state: &mut GameState) {
    for enemy in &mut state.world.enemies {
        enemy.march();
    }
    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    for impact in &mut state.impacts {
        impact.update();
    }

    resolve_projectile_hits(state);
    resolve_player_contacts(state);
}

/// Drop projectiles that strayed too far from the player and faded impacts
pub fn prune(state: &mut GameState) {
    let player_x = state.player.pos.x;
    state
        .projectiles
        .retain(|p| (p.pos.x - player_x).abs() <= PROJECTILE_DESPAWN_DISTANCE);
    state.impacts.retain(|i| !i.is_finished());
}

/// Each projectile is consumed by the first enemy (in spawn order) it is inside
fn resolve_projectile_hits(state: &mut GameState) {
    if state.projectiles.is_empty() || state.world.enemies.is_empty() {
        return;
    }

    let mut spent = vec![false; state.projectiles.len()];
    let mut defeated = vec![false; state.world.enemies.len()];

    for (ei, enemy) in state.world.enemies.iter_mut().enumerate() {
        let bounds = enemy.bounds();
        for (pi, projectile) in state.projectiles.iter().enumerate() {
            if spent[pi] || !bounds.contains_point(projectile.pos) {
                continue;
            }

            spent[pi] = true;
            state.impacts.push(Impact::new(projectile.pos));
            enemy.health -= 1;
            enemy.flash_count = HIT_FLASH_TICKS;
            state.events.push(GameEvent::EnemyHit {
                enemy_id: enemy.id,
                pos: projectile.pos,
                health: enemy.health,
            });

            if enemy.health <= 0 {
                defeated[ei] = true;
                state.enemies_defeated += 1;
                state
                    .events
                    .push(GameEvent::EnemyDefeated { enemy_id: enemy.id });
                log::debug!("Enemy {} defeated", enemy.id);
                break;
            }
        }
    }

    compact(&mut state.projectiles, &spent);
    compact(&mut state.world.enemies, &defeated);
}

/// Touching an enemy always destroys it and costs the player one health
fn resolve_player_contacts(state: &mut GameState) {
    let player_box = state.player.bounds();
    let mut touched = vec![false; state.world.enemies.len()];

    for (i, enemy) in state.world.enemies.iter().enumerate() {
        if !player_box.overlaps(&enemy.bounds()) {
            continue;
        }
        touched[i] = true;
        state.player.health = state.player.health.saturating_sub(1);
        state.events.push(GameEvent::PlayerHurt {
            health: state.player.health,
        });
        log::debug!(
            "Player touched enemy {}, health now {}",
            enemy.id,
            state.player.health
        );
    }

    compact(&mut state.world.enemies, &touched);
}

/// Remove every element whose flag is set, preserving order
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    if !removed.contains(&true) {
        return;
    }
    let mut flags = removed.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
