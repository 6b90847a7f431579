//! Fixed-step driver
//!
//! Owns a run, turns key events into `TickInput`, and steps the simulation from
//! wall-clock frame deltas.

use std::sync::Arc;
use std::thread::JoinHandle;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::persistence::{self, RunStats, ScoreService};
use crate::renderer::{self, DrawCommand};
use crate::sim::{GameEvent, GamePhase, GameState, ProjectileKind, TickInput, Viewport, tick};
use crate::ui::{self, Hud};

/// Longest frame delta fed to the accumulator, in seconds
const MAX_FRAME_DT: f32 = 0.1;

/// Game instance holding the run and its input state
pub struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    /// Track phase to fire the end-of-run report once
    last_phase: GamePhase,
    score_service: Option<Arc<dyn ScoreService>>,
    pending_report: Option<JoinHandle<()>>,
    last_run: Option<RunStats>,
}

impl Game {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let state = GameState::new(seed, viewport);
        Self {
            last_phase: state.phase,
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            score_service: None,
            pending_report: None,
            last_run: None,
        }
    }

    /// Report finished runs to this service
    pub fn with_score_service(mut self, service: Arc<dyn ScoreService>) -> Self {
        self.score_service = Some(service);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Previous run shown on the start screen
    pub fn set_last_run(&mut self, stats: Option<RunStats>) {
        self.last_run = stats;
    }

    /// "Last run" line, if there is one to show
    pub fn last_run_text(&self) -> Option<String> {
        self.last_run.as_ref().map(ui::last_run_text)
    }

    /// Run simulation ticks for `dt` seconds of wall-clock time
    ///
    /// Returns the events produced by those ticks.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.attack = None;
        }

        let current_phase = self.state.phase;
        if current_phase != self.last_phase {
            if let GamePhase::GameOver { cause } = current_phase {
                log::info!("Game over ({cause:?})");
                self.report_run();
            }
            self.last_phase = current_phase;
        }

        self.state.drain_events()
    }

    fn report_run(&mut self) {
        let stats = self.state.run_stats();
        self.last_run = Some(stats);
        if let Some(service) = &self.score_service {
            self.pending_report = Some(persistence::report_run(service.clone(), stats));
        }
    }

    /// Handle of the in-flight end-of-run report, for callers about to exit
    pub fn take_report(&mut self) -> Option<JoinHandle<()>> {
        self.pending_report.take()
    }

    /// Key press, DOM `KeyboardEvent.code` naming
    ///
    /// Returns false for keys the game does not use.
    pub fn key_down(&mut self, code: &str) -> bool {
        match code {
            "ArrowLeft" => self.input.move_left = true,
            "ArrowRight" => self.input.move_right = true,
            "ArrowUp" => self.input.jump = true,
            "KeyZ" => self.input.attack = Some(ProjectileKind::Lightning),
            "KeyX" => self.input.attack = Some(ProjectileKind::Fireball),
            _ => return false,
        }
        true
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        match code {
            "ArrowLeft" => self.input.move_left = false,
            "ArrowRight" => self.input.move_right = false,
            "ArrowUp" | "KeyZ" | "KeyX" => {}
            _ => return false,
        }
        true
    }

    /// Start a fresh run
    pub fn restart(&mut self, seed: u64) {
        let viewport = self.state.viewport;
        self.state = GameState::new(seed, viewport);
        self.accumulator = 0.0;
        self.last_phase = self.state.phase;
        self.input = TickInput {
            autopilot: self.input.autopilot,
            ..Default::default()
        };
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    /// Display list for the current state
    pub fn frame(&self, time_ms: f64, flicker: bool) -> Vec<DrawCommand> {
        renderer::build_frame(&self.state, time_ms, flicker)
    }
}
