//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context. Every component receives it (or the
//! part it needs) explicitly; nothing lives in globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::world::World;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; ticks are no-ops from here on
    GameOver { cause: GameOverCause },
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Fell below the bottom of the viewport
    Fell,
    /// Health exhausted by enemy contact
    Defeated,
}

/// Horizontal facing of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Turn-flick state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnState {
    /// Held input moves the player
    #[default]
    Moving,
    /// Standing still after a reversal, counting down to `Moving`
    Turning { ticks_left: u32 },
}

/// A platform slab. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Ground tier (true) or floating (false)
    pub is_base: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, is_base: bool) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height: PLATFORM_HEIGHT,
            is_base,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::new(self.width, self.height))
    }
}

/// A marching triangle enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Bottom-centre anchor (the triangle's base midpoint)
    pub pos: Vec2,
    pub health: i32,
    pub speed: f32,
    /// Hit-feedback ticks remaining (visual only)
    pub flash_count: u32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            health: ENEMY_HEALTH,
            speed: ENEMY_SPEED,
            flash_count: 0,
        }
    }

    /// Sprite extent used for every hit test
    pub fn bounds(&self) -> Aabb {
        let half = ENEMY_SIZE / 2.0;
        Aabb::new(
            Vec2::new(self.pos.x - half, self.pos.y - ENEMY_SIZE),
            Vec2::new(self.pos.x + half, self.pos.y),
        )
    }

    /// March one tick to the left and decay hit feedback
    pub fn march(&mut self) {
        self.pos.x -= self.speed;
        self.flash_count = self.flash_count.saturating_sub(1);
    }
}

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Lightning,
    Fireball,
}

/// A ranged attack in flight. Flat trajectory, no gravity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// +1 or -1
    pub direction: f32,
    pub kind: ProjectileKind,
    pub speed: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, facing: Facing, kind: ProjectileKind) -> Self {
        Self {
            id,
            pos,
            direction: facing.sign(),
            kind,
            speed: PROJECTILE_SPEED,
        }
    }

    pub fn advance(&mut self) {
        self.pos.x += self.speed * self.direction;
    }
}

/// Expanding ring left by a projectile hit (visual only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub pos: Vec2,
    pub radius: f32,
    /// 1.0 when spawned, fades to 0
    pub opacity: f32,
}

impl Impact {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: IMPACT_START_RADIUS,
            opacity: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.radius += IMPACT_GROWTH;
        self.opacity = (self.opacity - IMPACT_FADE).max(0.0);
    }

    /// Fade is accumulated in f32, so treat a sub-step remainder as gone
    pub fn is_finished(&self) -> bool {
        self.opacity <= IMPACT_FADE * 0.5
    }
}

/// The player square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: u8,
    pub facing: Facing,
    pub grounded: bool,
    /// Jumps used since the last landing
    pub jump_count: u8,
    pub turn: TurnState,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            health: PLAYER_MAX_HEALTH,
            facing: Facing::Right,
            grounded: false,
            jump_count: 0,
            turn: TurnState::Moving,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Forward (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn is_turning(&self) -> bool {
        matches!(self.turn, TurnState::Turning { .. })
    }
}

/// Drawable area the camera and death plane are measured against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

/// Display tier derived from distance traveled
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LevelTier {
    One,
    Two,
    Three,
}

impl LevelTier {
    pub fn from_distance(distance: u64) -> Self {
        if distance > LEVEL_3_DISTANCE {
            LevelTier::Three
        } else if distance > LEVEL_2_DISTANCE {
            LevelTier::Two
        } else {
            LevelTier::One
        }
    }

    /// 1-based level number for display
    pub fn number(self) -> u32 {
        match self {
            LevelTier::One => 1,
            LevelTier::Two => 2,
            LevelTier::Three => 3,
        }
    }
}

/// Statistics of a single run, as exchanged with the score service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub distance: u64,
    pub enemies_defeated: u64,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ProjectileFired { kind: ProjectileKind },
    EnemyHit { enemy_id: u32, pos: Vec2, health: i32 },
    EnemyDefeated { enemy_id: u32 },
    PlayerHurt { health: u8 },
    LevelChanged { level: LevelTier },
    GameOver { cause: GameOverCause, stats: RunStats },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub viewport: Viewport,
    pub player: Player,
    /// Generated platforms, live enemies and the generator cursor
    pub world: World,
    /// Projectiles in flight (spawn order)
    pub projectiles: Vec<Projectile>,
    /// Visual impact rings (not gameplay-affecting)
    pub impacts: Vec<Impact>,
    /// Left edge of the visible world; never decreases
    pub camera_offset: f32,
    /// Score distance, accrued from camera movement
    pub distance: u64,
    /// Camera travel not yet converted into whole distance units
    pub distance_carry: f32,
    pub enemies_defeated: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next projectile ID
    next_id: u32,
}

impl GameState {
    /// Create a new run and generate the starting area
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut world = World::new(seed);
        world.extend(0.0, BOOTSTRAP_SPAN);
        log::info!(
            "New run (seed {seed}): {} platforms, {} enemies",
            world.platforms.len(),
            world.enemies.len()
        );

        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Playing,
            viewport,
            player: Player::default(),
            world,
            projectiles: Vec::new(),
            impacts: Vec::new(),
            camera_offset: 0.0,
            distance: 0,
            distance_carry: 0.0,
            enemies_defeated: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new projectile ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn level(&self) -> LevelTier {
        LevelTier::from_distance(self.distance)
    }

    pub fn run_stats(&self) -> RunStats {
        RunStats {
            distance: self.distance,
            enemies_defeated: self.enemies_defeated,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
