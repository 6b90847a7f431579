//! Procedural level generation
//!
//! The level is an unbounded strip generated in segments as the player advances.
//! Each segment is either solid ground (maybe guarded by an enemy) or a gap bridged
//! by a mandatory safety platform one jump-unit up. Output is append-only, so
//! anything already placed stays valid for the rest of the run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Enemy, Platform};
use crate::consts::*;

/// Generated level content plus the generator that extends it
#[derive(Debug, Clone)]
pub struct World {
    /// All platforms, in non-decreasing x order
    pub platforms: Vec<Platform>,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Start of the next segment
    cursor: f32,
    rng: Pcg32,
    next_enemy_id: u32,
}

impl World {
    /// Empty world with a seeded generator
    pub fn new(seed: u64) -> Self {
        Self {
            platforms: Vec::new(),
            enemies: Vec::new(),
            cursor: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_enemy_id: 1,
        }
    }

    /// X coordinate where the next generated segment will start
    pub fn frontier(&self) -> f32 {
        self.cursor
    }

    /// Append segments covering `[from_x, to_x)`
    ///
    /// Callers extend from `frontier()`; starting anywhere else would lay new
    /// segments over old ones.
    pub fn extend(&mut self, from_x: f32, to_x: f32) {
        let platforms_before = self.platforms.len();
        let enemies_before = self.enemies.len();

        let mut cursor = from_x;
        while cursor < to_x {
            let width = self.rng.random_range(SEGMENT_MIN_WIDTH..SEGMENT_MAX_WIDTH);
            // The segment under the spawn point is always ground
            let is_gap = self.rng.random_bool(GAP_CHANCE) && cursor > PLAYER_START_X;
            let spawn_enemy = !is_gap && self.rng.random_bool(ENEMY_CHANCE);

            // Optional shortcut, one or two jump-units up
            if self.rng.random_bool(SHORTCUT_CHANCE) {
                let tiers = if self.rng.random_bool(0.5) { 1.0 } else { 2.0 };
                self.platforms.push(Platform::new(
                    cursor,
                    BASE_Y - tiers * JUMP_UNIT,
                    SHORTCUT_WIDTH,
                    false,
                ));
            }

            if is_gap {
                // No ground here: the safety platform keeps the gap crossable
                self.platforms.push(Platform::new(
                    cursor + width / 4.0,
                    BASE_Y - JUMP_UNIT,
                    width / 2.0,
                    false,
                ));
            } else {
                self.platforms.push(Platform::new(cursor, BASE_Y, width, true));
                if spawn_enemy {
                    let id = self.next_enemy_id;
                    self.next_enemy_id += 1;
                    self.enemies
                        .push(Enemy::new(id, Vec2::new(cursor + width / 2.0, BASE_Y)));
                }
            }

            cursor += width + SEGMENT_MARGIN;
        }
        self.cursor = self.cursor.max(cursor);

        log::debug!(
            "Generated [{from_x:.0}, {to_x:.0}): +{} platforms, +{} enemies, frontier {:.0}",
            self.platforms.len() - platforms_before,
            self.enemies.len() - enemies_before,
            self.cursor
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Rebuild the segment chain from the platform list
    ///
    /// Every segment must be a base platform at the cursor or a half-width safety
    /// platform centred in the segment, optionally preceded by a shortcut at the
    /// cursor. Returns each segment's `(start, width, is_gap)`.
    fn replay_segments(world: &World, from_x: f32) -> Result<Vec<(f32, f32, bool)>, String> {
        let near = |a: f32, b: f32| (a - b).abs() < 1e-2;
        let mut segments = Vec::new();
        let mut cursor = from_x;
        let mut platforms = world.platforms.iter();

        while let Some(mut p) = platforms.next() {
            let is_shortcut = !p.is_base && near(p.pos.x, cursor) && p.width == SHORTCUT_WIDTH;
            if is_shortcut {
                p = platforms
                    .next()
                    .ok_or_else(|| format!("shortcut at {cursor} closes the world"))?;
            }

            let (width, is_gap) = if p.is_base && near(p.pos.x, cursor) {
                (p.width, false)
            } else if !p.is_base
                && near(p.pos.y, BASE_Y - JUMP_UNIT)
                && near(p.pos.x, cursor + p.width / 2.0)
            {
                (p.width * 2.0, true)
            } else {
                return Err(format!(
                    "segment at {cursor} has neither ground nor a safety platform (next {p:?})"
                ));
            };

            if !(SEGMENT_MIN_WIDTH..SEGMENT_MAX_WIDTH).contains(&width) {
                return Err(format!("segment at {cursor} has width {width}"));
            }
            segments.push((cursor, width, is_gap));
            cursor += width + SEGMENT_MARGIN;
        }

        if !near(cursor, world.frontier()) {
            return Err(format!("chain ends at {cursor}, frontier is {}", world.frontier()));
        }
        Ok(segments)
    }

    fn extended_world(seed: u64) -> World {
        let mut world = World::new(seed);
        world.extend(0.0, BOOTSTRAP_SPAN);
        let frontier = world.frontier();
        world.extend(frontier, frontier + EXTEND_SPAN);
        world
    }

    #[test]
    fn test_extend_is_reproducible() {
        let mut a = World::new(1234);
        let mut b = World::new(1234);
        a.extend(0.0, 2000.0);
        b.extend(0.0, 2000.0);

        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.frontier(), b.frontier());
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = World::new(1);
        let mut b = World::new(2);
        a.extend(0.0, 2000.0);
        b.extend(0.0, 2000.0);
        assert_ne!(a.platforms, b.platforms);
    }

    #[test]
    fn test_extension_preserves_existing_output() {
        let mut world = World::new(99);
        world.extend(0.0, 2000.0);
        let platforms = world.platforms.clone();
        let enemies = world.enemies.clone();
        let frontier = world.frontier();

        world.extend(frontier, frontier + EXTEND_SPAN);

        assert_eq!(&world.platforms[..platforms.len()], &platforms[..]);
        assert_eq!(&world.enemies[..enemies.len()], &enemies[..]);
        assert!(world.frontier() >= frontier + EXTEND_SPAN);
        assert!(world.platforms[platforms.len()..].iter().all(|p| p.pos.x >= frontier));
    }

    #[test]
    fn test_enemies_stand_on_base_midpoints() {
        let mut world = World::new(5);
        world.extend(0.0, 20_000.0);
        assert!(!world.enemies.is_empty());

        for enemy in &world.enemies {
            assert_eq!(enemy.health, ENEMY_HEALTH);
            assert_eq!(enemy.pos.y, BASE_Y);
            let on_base = world.platforms.iter().any(|p| {
                p.is_base && (p.pos.x + p.width / 2.0 - enemy.pos.x).abs() < 1e-3
            });
            assert!(on_base, "enemy {} not on a base midpoint", enemy.id);
        }
    }

    #[test]
    fn test_replay_rejects_unbridged_gap() {
        let (seed, mut world) = (0..1000)
            .map(|seed| (seed, extended_world(seed)))
            .find(|(_, w)| w.platforms.iter().any(|p| !p.is_base && p.width > SHORTCUT_WIDTH))
            .unwrap();
        assert!(replay_segments(&world, 0.0).is_ok(), "seed {seed}");

        // Drop one safety platform (shortcuts are exactly SHORTCUT_WIDTH wide)
        let safety = world
            .platforms
            .iter()
            .position(|p| !p.is_base && p.width > SHORTCUT_WIDTH)
            .unwrap();
        world.platforms.remove(safety);
        assert!(replay_segments(&world, 0.0).is_err(), "seed {seed}");
    }

    #[test]
    fn test_spawn_segment_is_ground() {
        for seed in 0..500 {
            let mut world = World::new(seed);
            world.extend(0.0, BOOTSTRAP_SPAN);
            let under_spawn = world.platforms.iter().find(|p| p.is_base).unwrap();
            assert_eq!(under_spawn.pos.x, 0.0, "seed {seed}");
        }
    }

    proptest! {
        #[test]
        fn prop_every_gap_has_safety_platform(seed in any::<u64>()) {
            let world = extended_world(seed);
            let segments = replay_segments(&world, 0.0);
            prop_assert!(segments.is_ok(), "{:?}", segments.err());
            if let Ok(segments) = segments {
                prop_assert!(!segments[0].2, "spawn segment is a gap");
            }
        }

        #[test]
        fn prop_platforms_in_ascending_x(seed in any::<u64>()) {
            let mut world = World::new(seed);
            world.extend(0.0, 2000.0);
            let frontier = world.frontier();
            world.extend(frontier, frontier + EXTEND_SPAN);

            for pair in world.platforms.windows(2) {
                prop_assert!(pair[0].pos.x <= pair[1].pos.x);
            }
            for pair in world.enemies.windows(2) {
                prop_assert!(pair[0].pos.x < pair[1].pos.x);
            }
        }

        #[test]
        fn prop_segment_widths_in_range(seed in any::<u64>()) {
            let mut world = World::new(seed);
            world.extend(0.0, 2000.0);

            for p in &world.platforms {
                prop_assert_eq!(p.height, PLATFORM_HEIGHT);
                if p.is_base {
                    prop_assert!(p.width >= SEGMENT_MIN_WIDTH && p.width < SEGMENT_MAX_WIDTH);
                    prop_assert_eq!(p.pos.y, BASE_Y);
                } else {
                    let tier = (BASE_Y - p.pos.y) / JUMP_UNIT;
                    prop_assert!((tier - 1.0).abs() < 1e-3 || (tier - 2.0).abs() < 1e-3);
                }
            }
        }
    }
}
