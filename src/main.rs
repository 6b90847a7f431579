//! Skyrunner - headless runner
//!
//! Plays one run with the autopilot at a fixed frame rate and reports the result
//! to the score service.

use std::sync::Arc;

use skyrunner::consts::SIM_DT;
use skyrunner::persistence::{self, HttpScoreService};
use skyrunner::sim::GameEvent;
use skyrunner::{Game, Settings, ui};

/// Ticks between HUD log lines (ten seconds at 60 Hz)
const HUD_LOG_INTERVAL: u64 = 600;

fn main() {
    env_logger::init();
    log::info!("Skyrunner (headless) starting...");

    let settings = Settings::load_or_create(Settings::path());
    let seed = settings.seed.unwrap_or_else(rand::random);
    let flicker = settings.effective_flicker();

    let service = Arc::new(HttpScoreService::new(
        settings.score_service_url.clone(),
        settings.request_timeout(),
    ));
    let last_run = persistence::load_last_run(service.as_ref());

    let mut game = Game::new(seed, settings.viewport()).with_score_service(service);
    game.set_autopilot(settings.autopilot);
    game.set_last_run(last_run);
    if let Some(text) = game.last_run_text() {
        log::info!("Last run: {text}");
    }

    while !game.state().is_game_over() && game.state().time_ticks < settings.max_ticks {
        for event in game.update(SIM_DT) {
            match event {
                GameEvent::LevelChanged { level } => {
                    log::info!("Level {}", level.number());
                }
                GameEvent::PlayerHurt { health } => log::info!("Hurt, {health} health left"),
                other => log::debug!("{other:?}"),
            }
        }

        let ticks = game.state().time_ticks;
        if ticks > 0 && ticks.is_multiple_of(HUD_LOG_INTERVAL) {
            let hud = game.hud();
            let time_ms = ticks as f64 * 1000.0 / 60.0;
            log::info!(
                "{}m | {} kills | level {} | {} health | {} draw commands",
                hud.distance,
                hud.kills,
                hud.level.number(),
                hud.health,
                game.frame(time_ms, flicker).len()
            );
        }
    }

    let hud = game.hud();
    match &hud.game_over {
        Some(screen) => println!("Game over ({:?}): {}", screen.cause, screen.final_stats),
        None => println!(
            "Stopped after {} ticks: {}",
            game.state().time_ticks,
            ui::final_stats_text(&game.state().run_stats())
        ),
    }

    // Let the score upload finish before the process exits
    if let Some(handle) = game.take_report()
        && handle.join().is_err()
    {
        log::warn!("Score upload thread panicked");
    }
}
