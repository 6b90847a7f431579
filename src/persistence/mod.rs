//! Run statistics exchange with the score service
//!
//! Features:
//! - `GET /get_score` for the previous run, read once at startup
//! - `POST /save_score` with the finished run, fire-and-forget
//! - Failures are logged and swallowed; nothing here can end or stall a run

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;

pub use crate::sim::state::RunStats;

/// Errors talking to the score service
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("score service returned HTTP {0}")]
    Status(u16),
    #[error("score service unreachable: {0}")]
    Transport(String),
    #[error("malformed score payload: {0}")]
    Decode(#[from] std::io::Error),
}

impl From<ureq::Error> for PersistenceError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => PersistenceError::Status(code),
            ureq::Error::Transport(transport) => PersistenceError::Transport(transport.to_string()),
        }
    }
}

/// Remote store for run statistics
pub trait ScoreService: Send + Sync {
    /// Statistics of the previous run
    fn fetch_last_run(&self) -> Result<RunStats, PersistenceError>;

    /// Record a finished run
    fn save_run(&self, stats: &RunStats) -> Result<(), PersistenceError>;
}

/// Score service over HTTP with JSON bodies
#[derive(Debug, Clone)]
pub struct HttpScoreService {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpScoreService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl ScoreService for HttpScoreService {
    fn fetch_last_run(&self) -> Result<RunStats, PersistenceError> {
        let response = self.agent.get(&self.url("get_score")).call()?;
        Ok(response.into_json::<RunStats>()?)
    }

    fn save_run(&self, stats: &RunStats) -> Result<(), PersistenceError> {
        self.agent
            .post(&self.url("save_score"))
            .set("Content-Type", "application/json")
            .send_json(stats)?;
        Ok(())
    }
}

/// Load the previous run for the "last run" display
///
/// Returns `None` when the service fails or has no run with any distance yet.
pub fn load_last_run(service: &dyn ScoreService) -> Option<RunStats> {
    match service.fetch_last_run() {
        Ok(stats) if stats.distance > 0 => {
            log::info!(
                "Last run: {}m, {} kills",
                stats.distance,
                stats.enemies_defeated
            );
            Some(stats)
        }
        Ok(_) => {
            log::info!("No previous run recorded");
            None
        }
        Err(e) => {
            log::warn!("Could not load last run: {e}");
            None
        }
    }
}

/// Save a finished run on a background thread
///
/// The caller never has to wait; the handle is only for callers (like a process
/// about to exit) that want the request to finish.
pub fn report_run(service: Arc<dyn ScoreService>, stats: RunStats) -> JoinHandle<()> {
    std::thread::spawn(move || match service.save_run(&stats) {
        Ok(()) => log::info!(
            "Run saved: {}m, {} kills",
            stats.distance,
            stats.enemies_defeated
        ),
        Err(e) => log::warn!("Failed to save run: {e}"),
    })
}
