//! HUD and game-over screen model
//!
//! The UI layer (DOM, terminal, immediate-mode GUI) reads a `Hud` snapshot each
//! frame and only has to place the strings.

use crate::sim::{GameOverCause, GamePhase, GameState, LevelTier, RunStats};

/// Text shown on the game-over screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverScreen {
    pub cause: GameOverCause,
    pub final_stats: String,
}

/// Everything the HUD displays for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub distance: u64,
    pub kills: u64,
    pub level: LevelTier,
    pub health: u8,
    /// Set once the run has ended
    pub game_over: Option<GameOverScreen>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let game_over = match state.phase {
            GamePhase::GameOver { cause } => Some(GameOverScreen {
                cause,
                final_stats: final_stats_text(&state.run_stats()),
            }),
            GamePhase::Playing => None,
        };

        Self {
            distance: state.distance,
            kills: state.enemies_defeated,
            level: state.level(),
            health: state.player.health,
            game_over,
        }
    }

    /// Style class for the page theme ("level-1" .. "level-3")
    pub fn theme_class(&self) -> String {
        format!("level-{}", self.level.number())
    }
}

/// "Last run" line, e.g. `1200m | 4 Kills`
pub fn last_run_text(stats: &RunStats) -> String {
    format!("{}m | {} Kills", stats.distance, stats.enemies_defeated)
}

/// Game-over summary, e.g. `Distance: 1200m | Kills: 4`
pub fn final_stats_text(stats: &RunStats) -> String {
    format!(
        "Distance: {}m | Kills: {}",
        stats.distance, stats.enemies_defeated
    )
}
