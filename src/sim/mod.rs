//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (platforms and enemies in generation order)
//! - No rendering, input device or network dependencies

pub mod collision;
pub mod combat;
pub mod physics;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::Aabb;
pub use state::{
    Enemy, Facing, GameEvent, GameOverCause, GamePhase, GameState, Impact, LevelTier, Platform,
    Player, Projectile, ProjectileKind, RunStats, TurnState, Viewport,
};
pub use tick::{TickInput, tick};
pub use world::World;
