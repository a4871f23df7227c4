//! Per-run session recording
//!
//! A recorder tracks the current run's absolute score and time (the
//! host recomputes and pushes both every tick), then settles the run
//! into the ledger and produces an immutable summary for the game-over
//! dialog.

use crate::consts::{SCORE_PER_COIN, SCORE_PER_KILL, SCORE_PER_SECOND};
use crate::ledger::{PlayerLedger, StatStore};

/// End-of-run totals handed over by the host's stats tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub enemies_killed: u64,
    pub damage_dealt: f32,
    pub coins_gained: u64,
}

/// Immutable summary of a finished session. All ledger-derived fields
/// reflect the ledger *after* the session was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionResult {
    pub final_score: u64,
    pub high_score: u64,
    pub is_new_high_score: bool,
    pub final_time: f32,
    pub best_time: f32,
    pub is_new_best_time: bool,
    pub coins_earned: u64,
    pub total_coins: u64,
}

/// The in-progress run's transient counters. Owns nothing persistent;
/// all durable state flows through the ledger at `finish`.
#[derive(Debug, Default)]
pub struct SessionRecorder {
    current_score: u64,
    current_time: f32,
}

/// The absolute session score the host pushes each tick:
/// kills weigh most, survival time and coins pad it out.
pub fn compute_score(enemies_killed: u64, survival_time: f32, coins_gained: u64) -> u64 {
    enemies_killed * SCORE_PER_KILL
        + survival_time.max(0.0).floor() as u64 * SCORE_PER_SECOND
        + coins_gained * SCORE_PER_COIN
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the run counters and count the game in the ledger.
    pub fn start_new_session<S: StatStore>(&mut self, ledger: &mut PlayerLedger<S>) {
        self.current_score = 0;
        self.current_time = 0.0;
        ledger.increment_total_games_played();
    }

    /// Overwrite the session score with the host's recomputed absolute
    /// value.
    pub fn update_session_score(&mut self, score: u64) {
        self.current_score = score;
    }

    /// Overwrite the session time with the host's absolute level time.
    pub fn update_session_time(&mut self, time: f32) {
        self.current_time = time;
    }

    /// Score accumulated so far this run.
    pub fn current_score(&self) -> u64 {
        self.current_score
    }

    /// Time survived so far this run, in seconds.
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Settle the run into the ledger and build the summary.
    ///
    /// Order matters: records are judged before coins are credited so a
    /// coin credit can never influence the comparisons, and the summary
    /// is read back from the ledger afterwards so it reflects
    /// post-session values.
    pub fn finish<S: StatStore>(
        &self,
        ledger: &mut PlayerLedger<S>,
        stats: &SessionStats,
    ) -> SessionResult {
        let is_new_high_score = ledger.update_high_score(self.current_score);
        let is_new_best_time = ledger.update_best_survival_time(self.current_time);

        ledger.add_coins(stats.coins_gained);

        ledger.increment_total_enemies_killed(stats.enemies_killed);
        ledger.increment_total_damage_dealt(stats.damage_dealt);
        ledger.increment_total_playtime(self.current_time);

        SessionResult {
            final_score: self.current_score,
            high_score: ledger.high_score(),
            is_new_high_score,
            final_time: self.current_time,
            best_time: ledger.best_survival_time(),
            is_new_best_time,
            coins_earned: stats.coins_gained,
            total_coins: ledger.coins(),
        }
    }
}
