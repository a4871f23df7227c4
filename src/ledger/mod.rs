//! Persistent player statistics
//!
//! Lifetime totals, records and the coin balance, mutated only through
//! this API. Every mutation is written through to the store before the
//! call returns; a failed write keeps the in-memory value as the source
//! of truth and retries on the next mutation. UI-relevant fields notify
//! per-instance observers with the new value.

pub mod store;

pub use store::{JsonFileStore, MemoryStore, StatStore, StorageError};

/// Persisted key names. These are the save-file compatibility contract:
/// renaming one silently loses existing players' progress.
pub mod keys {
    pub const COINS: &str = "Coins";
    pub const HIGH_SCORE: &str = "HighScore";
    pub const TOTAL_ENEMIES_KILLED: &str = "TotalEnemiesKilled";
    pub const TOTAL_DAMAGE_DEALT: &str = "TotalDamageDealt";
    pub const TOTAL_GAMES_PLAYED: &str = "TotalGamesPlayed";
    pub const TOTAL_PLAYTIME: &str = "TotalPlaytime";
    pub const BEST_SURVIVAL_TIME: &str = "BestSurvivalTime";
}

type Observer = Box<dyn FnMut(u64)>;

/// Write-through ledger of cross-session player data.
///
/// Construct exactly one during startup and pass it where needed; it is
/// the single source of truth for everything that outlives a run.
pub struct PlayerLedger<S: StatStore> {
    store: S,
    coins: u64,
    high_score: u64,
    total_enemies_killed: u64,
    total_damage_dealt: f32,
    total_games_played: u64,
    total_playtime: f32,
    best_survival_time: f32,
    coin_observers: Vec<Observer>,
    high_score_observers: Vec<Observer>,
}

impl<S: StatStore> PlayerLedger<S> {
    /// Load all fields from the store; anything never written reads as
    /// zero.
    pub fn new(store: S) -> Self {
        let ledger = Self {
            coins: store.get_u64(keys::COINS).unwrap_or(0),
            high_score: store.get_u64(keys::HIGH_SCORE).unwrap_or(0),
            total_enemies_killed: store.get_u64(keys::TOTAL_ENEMIES_KILLED).unwrap_or(0),
            total_damage_dealt: store.get_f32(keys::TOTAL_DAMAGE_DEALT).unwrap_or(0.0),
            total_games_played: store.get_u64(keys::TOTAL_GAMES_PLAYED).unwrap_or(0),
            total_playtime: store.get_f32(keys::TOTAL_PLAYTIME).unwrap_or(0.0),
            best_survival_time: store.get_f32(keys::BEST_SURVIVAL_TIME).unwrap_or(0.0),
            store,
            coin_observers: Vec::new(),
            high_score_observers: Vec::new(),
        };
        log::info!(
            "player ledger loaded: {} coins, high score {}, {} games played",
            ledger.coins,
            ledger.high_score,
            ledger.total_games_played
        );
        ledger
    }

    // === Observers ===

    /// Register a callback for coin-balance changes; called with the new
    /// total.
    pub fn on_coins_changed(&mut self, observer: impl FnMut(u64) + 'static) {
        self.coin_observers.push(Box::new(observer));
    }

    /// Register a callback for high-score changes; called with the new
    /// record.
    pub fn on_high_score_changed(&mut self, observer: impl FnMut(u64) + 'static) {
        self.high_score_observers.push(Box::new(observer));
    }

    fn notify_coins(&mut self, total: u64) {
        for observer in &mut self.coin_observers {
            observer(total);
        }
    }

    fn notify_high_score(&mut self, score: u64) {
        for observer in &mut self.high_score_observers {
            observer(score);
        }
    }

    // === Persistence ===

    fn persist_u64(&mut self, key: &'static str, value: u64) {
        let result = self
            .store
            .set_u64(key, value)
            .and_then(|()| self.store.flush());
        if let Err(err) = result {
            log::warn!("failed to persist {key}={value}: {err}; keeping in-memory value");
        }
    }

    fn persist_f32(&mut self, key: &'static str, value: f32) {
        let result = self
            .store
            .set_f32(key, value)
            .and_then(|()| self.store.flush());
        if let Err(err) = result {
            log::warn!("failed to persist {key}={value}: {err}; keeping in-memory value");
        }
    }

    // === Coins ===

    /// Current coin balance.
    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Credit coins and notify observers with the new total.
    pub fn add_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
        self.persist_u64(keys::COINS, self.coins);
        self.notify_coins(self.coins);
    }

    /// Debit coins if the balance covers it. Returns false (and leaves
    /// the balance untouched) otherwise; callers must not assume the
    /// debit happened.
    pub fn spend_coins(&mut self, amount: u64) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        self.persist_u64(keys::COINS, self.coins);
        self.notify_coins(self.coins);
        true
    }

    /// Overwrite the balance directly. Privileged/debug callers only.
    pub fn set_coins(&mut self, amount: u64) {
        self.coins = amount;
        self.persist_u64(keys::COINS, self.coins);
        self.notify_coins(self.coins);
    }

    // === High score ===

    /// Lifetime best score.
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Record `candidate` if it strictly beats the current high score.
    /// Returns whether it was a new record; a losing candidate changes
    /// nothing and notifies nobody.
    pub fn update_high_score(&mut self, candidate: u64) -> bool {
        if candidate <= self.high_score {
            return false;
        }
        self.high_score = candidate;
        self.persist_u64(keys::HIGH_SCORE, self.high_score);
        self.notify_high_score(self.high_score);
        true
    }

    /// Overwrite the high score directly. Privileged/debug callers only.
    pub fn set_high_score(&mut self, score: u64) {
        self.high_score = score;
        self.persist_u64(keys::HIGH_SCORE, self.high_score);
        self.notify_high_score(self.high_score);
    }

    // === Records and lifetime totals ===

    /// Longest survival time across all sessions, in seconds.
    pub fn best_survival_time(&self) -> f32 {
        self.best_survival_time
    }

    /// Record `candidate` if it strictly beats the best survival time.
    pub fn update_best_survival_time(&mut self, candidate: f32) -> bool {
        if candidate <= self.best_survival_time {
            return false;
        }
        self.best_survival_time = candidate;
        self.persist_f32(keys::BEST_SURVIVAL_TIME, self.best_survival_time);
        true
    }

    /// Lifetime enemies killed.
    pub fn total_enemies_killed(&self) -> u64 {
        self.total_enemies_killed
    }

    pub fn increment_total_enemies_killed(&mut self, amount: u64) {
        self.total_enemies_killed = self.total_enemies_killed.saturating_add(amount);
        self.persist_u64(keys::TOTAL_ENEMIES_KILLED, self.total_enemies_killed);
    }

    /// Lifetime damage dealt.
    pub fn total_damage_dealt(&self) -> f32 {
        self.total_damage_dealt
    }

    pub fn increment_total_damage_dealt(&mut self, amount: f32) {
        self.total_damage_dealt += amount;
        self.persist_f32(keys::TOTAL_DAMAGE_DEALT, self.total_damage_dealt);
    }

    /// Lifetime games played.
    pub fn total_games_played(&self) -> u64 {
        self.total_games_played
    }

    /// Count one more game. Called once per session start.
    pub fn increment_total_games_played(&mut self) {
        self.total_games_played += 1;
        self.persist_u64(keys::TOTAL_GAMES_PLAYED, self.total_games_played);
    }

    /// Lifetime playtime in seconds.
    pub fn total_playtime(&self) -> f32 {
        self.total_playtime
    }

    pub fn increment_total_playtime(&mut self, seconds: f32) {
        self.total_playtime += seconds;
        self.persist_f32(keys::TOTAL_PLAYTIME, self.total_playtime);
    }

    // === Reset ===

    /// Zero every field, persist, and notify coin and high-score
    /// observers with 0; observers treat this like any other change.
    pub fn reset_all_data(&mut self) {
        self.coins = 0;
        self.high_score = 0;
        self.total_enemies_killed = 0;
        self.total_damage_dealt = 0.0;
        self.total_games_played = 0;
        self.total_playtime = 0.0;
        self.best_survival_time = 0.0;
        self.persist_u64(keys::COINS, 0);
        self.persist_u64(keys::HIGH_SCORE, 0);
        self.persist_u64(keys::TOTAL_ENEMIES_KILLED, 0);
        self.persist_f32(keys::TOTAL_DAMAGE_DEALT, 0.0);
        self.persist_u64(keys::TOTAL_GAMES_PLAYED, 0);
        self.persist_f32(keys::TOTAL_PLAYTIME, 0.0);
        self.persist_f32(keys::BEST_SURVIVAL_TIME, 0.0);
        log::info!("player ledger reset");
        self.notify_coins(0);
        self.notify_high_score(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fresh() -> PlayerLedger<MemoryStore> {
        PlayerLedger::new(MemoryStore::new())
    }

    #[test]
    fn test_defaults_are_zero() {
        let ledger = fresh();
        assert_eq!(ledger.coins(), 0);
        assert_eq!(ledger.high_score(), 0);
        assert_eq!(ledger.total_enemies_killed(), 0);
        assert_eq!(ledger.total_damage_dealt(), 0.0);
        assert_eq!(ledger.total_games_played(), 0);
        assert_eq!(ledger.total_playtime(), 0.0);
        assert_eq!(ledger.best_survival_time(), 0.0);
    }

    #[test]
    fn test_coin_add_spend_scenario() {
        let mut ledger = fresh();
        ledger.add_coins(100);
        assert_eq!(ledger.coins(), 100);
        // Overspend fails without touching the balance
        assert!(!ledger.spend_coins(150));
        assert_eq!(ledger.coins(), 100);
        assert!(ledger.spend_coins(50));
        assert_eq!(ledger.coins(), 50);
    }

    #[test]
    fn test_high_score_requires_strict_improvement() {
        let mut ledger = fresh();
        assert!(ledger.update_high_score(1000));
        assert_eq!(ledger.high_score(), 1000);
        // Equal is not a record
        assert!(!ledger.update_high_score(1000));
        assert!(!ledger.update_high_score(999));
        assert_eq!(ledger.high_score(), 1000);
        assert!(ledger.update_high_score(1001));
    }

    #[test]
    fn test_best_time_requires_strict_improvement() {
        let mut ledger = fresh();
        assert!(ledger.update_best_survival_time(120.0));
        assert!(!ledger.update_best_survival_time(120.0));
        assert!(!ledger.update_best_survival_time(60.0));
        assert_eq!(ledger.best_survival_time(), 120.0);
    }

    #[test]
    fn test_writes_are_visible_through_store() {
        let mut ledger = fresh();
        ledger.add_coins(7);
        ledger.increment_total_enemies_killed(3);
        assert_eq!(ledger.store.get_u64(keys::COINS), Some(7));
        assert_eq!(ledger.store.get_u64(keys::TOTAL_ENEMIES_KILLED), Some(3));
    }

    #[test]
    fn test_ledger_reloads_from_store() {
        let mut store = MemoryStore::new();
        store.set_u64(keys::COINS, 250).expect("set");
        store.set_f32(keys::BEST_SURVIVAL_TIME, 99.5).expect("set");
        let ledger = PlayerLedger::new(store);
        assert_eq!(ledger.coins(), 250);
        assert_eq!(ledger.best_survival_time(), 99.5);
    }

    #[test]
    fn test_observers_receive_new_values() {
        let mut ledger = fresh();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ledger.on_coins_changed(move |total| sink.borrow_mut().push(total));

        ledger.add_coins(10);
        ledger.add_coins(5);
        assert!(!ledger.spend_coins(100)); // failed spend must not notify
        assert!(ledger.spend_coins(3));
        assert_eq!(*seen.borrow(), vec![10, 15, 12]);
    }

    #[test]
    fn test_losing_high_score_does_not_notify() {
        let mut ledger = fresh();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ledger.on_high_score_changed(move |score| sink.borrow_mut().push(score));

        assert!(ledger.update_high_score(500));
        assert!(!ledger.update_high_score(400));
        assert_eq!(*seen.borrow(), vec![500]);
    }

    #[test]
    fn test_reset_zeroes_everything_and_notifies() {
        let mut ledger = fresh();
        ledger.add_coins(100);
        ledger.set_high_score(5000);
        ledger.increment_total_games_played();
        ledger.increment_total_playtime(42.0);
        ledger.update_best_survival_time(42.0);

        let coins_seen = Rc::new(RefCell::new(Vec::new()));
        let scores_seen = Rc::new(RefCell::new(Vec::new()));
        let c = Rc::clone(&coins_seen);
        let s = Rc::clone(&scores_seen);
        ledger.on_coins_changed(move |v| c.borrow_mut().push(v));
        ledger.on_high_score_changed(move |v| s.borrow_mut().push(v));

        ledger.reset_all_data();
        assert_eq!(ledger.coins(), 0);
        assert_eq!(ledger.high_score(), 0);
        assert_eq!(ledger.total_games_played(), 0);
        assert_eq!(ledger.total_playtime(), 0.0);
        assert_eq!(ledger.best_survival_time(), 0.0);
        assert_eq!(*coins_seen.borrow(), vec![0]);
        assert_eq!(*scores_seen.borrow(), vec![0]);
        assert_eq!(ledger.store.get_u64(keys::HIGH_SCORE), Some(0));
    }

    // A broken store must not take the in-memory ledger down with it.
    struct FailingStore;

    impl StatStore for FailingStore {
        fn get_u64(&self, _key: &str) -> Option<u64> {
            None
        }
        fn get_f32(&self, _key: &str) -> Option<f32> {
            None
        }
        fn set_u64(&mut self, _key: &str, _value: u64) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }
        fn set_f32(&mut self, _key: &str, _value: f32) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }
        fn flush(&mut self) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }
    }

    #[test]
    fn test_write_failure_keeps_in_memory_truth() {
        let mut ledger = PlayerLedger::new(FailingStore);
        ledger.add_coins(100);
        assert_eq!(ledger.coins(), 100);
        assert!(ledger.spend_coins(40));
        assert_eq!(ledger.coins(), 60);
        assert!(ledger.update_high_score(123));
        assert_eq!(ledger.high_score(), 123);
    }
}
