//! Night Harvest - headless core for a survivors-style arena game
//!
//! Core modules:
//! - `level`: Deterministic per-tick spawn scheduling (monsters, bosses, chests)
//! - `ledger`: Write-through persistent player statistics with change observers
//! - `session`: Per-run score/time recording and the end-of-session summary
//!
//! Rendering, UI and entity lifetimes live in the host; this crate only
//! decides *what* to spawn *when* and keeps the lifetime numbers straight.

pub mod ledger;
pub mod level;
pub mod session;

pub use ledger::{PlayerLedger, StatStore};
pub use level::{LevelSpawnScheduler, SpawnDirective, SpawnKind};
pub use session::{SessionRecorder, SessionResult, SessionStats};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz host loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Score formula weights: kills count most, coins least
    pub const SCORE_PER_KILL: u64 = 100;
    pub const SCORE_PER_SECOND: u64 = 10;
    pub const SCORE_PER_COIN: u64 = 5;
}

/// Format a second count as `MM:SS` for statistics displays
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
