//! Skyrunner - A side-scrolling action platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, physics, combat, game state)
//! - `game`: Fixed-timestep driver and keyboard mapping
//! - `renderer`: Screen-space display list for a drawing backend
//! - `ui`: HUD and game-over text model
//! - `persistence`: Run statistics exchange with the score service
//! - `settings`: Runtime configuration

pub mod game;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use persistence::{HttpScoreService, PersistenceError, RunStats, ScoreService};
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are in world units (pixels at 1:1 zoom), velocities in units per tick.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default drawable viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Level geometry
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Ground level (top edge of base platforms)
    pub const BASE_Y: f32 = 500.0;
    /// Vertical distance covered by a single jump
    pub const JUMP_UNIT: f32 = 120.0;

    /// World generation
    pub const SEGMENT_MIN_WIDTH: f32 = 200.0;
    pub const SEGMENT_MAX_WIDTH: f32 = 500.0;
    /// Fixed gap left between consecutive segments
    pub const SEGMENT_MARGIN: f32 = 50.0;
    pub const GAP_CHANCE: f64 = 0.15;
    pub const ENEMY_CHANCE: f64 = 0.2;
    pub const SHORTCUT_CHANCE: f64 = 0.3;
    pub const SHORTCUT_WIDTH: f32 = 100.0;
    /// Span appended each time the player nears the frontier
    pub const EXTEND_SPAN: f32 = 1000.0;
    /// Span generated before the first tick
    pub const BOOTSTRAP_SPAN: f32 = 2000.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: u8 = 3;
    /// Vertical velocity applied by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    pub const GRAVITY: f32 = 0.6;
    /// Ground jump plus one air jump
    pub const MAX_JUMPS: u8 = 2;
    /// Ticks the player stands still after reversing direction
    pub const TURN_DELAY_TICKS: u32 = 5;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_HEALTH: i32 = 2;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const HIT_FLASH_TICKS: u32 = 20;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_DESPAWN_DISTANCE: f32 = 1000.0;
    pub const FIREBALL_RADIUS: f32 = 5.0;
    pub const LIGHTNING_LENGTH: f32 = 20.0;

    /// Impact effect
    pub const IMPACT_START_RADIUS: f32 = 2.0;
    pub const IMPACT_GROWTH: f32 = 2.0;
    pub const IMPACT_FADE: f32 = 0.05;

    /// Scoring
    pub const DISTANCE_SCALE: f32 = 10.0;
    pub const LEVEL_2_DISTANCE: u64 = 1000;
    pub const LEVEL_3_DISTANCE: u64 = 2000;
}
