//! One-shot boss spawn triggers

use super::blueprint::BossSpawn;
use super::curve::VariantId;

/// A time threshold that fires at most once per level instance.
#[derive(Debug, Clone)]
pub struct BossTrigger {
    pub threshold: f32,
    pub variant: VariantId,
    pub hp: f32,
    /// The boss whose death ends the level.
    pub is_final: bool,
    fired: bool,
}

impl BossTrigger {
    fn new(spawn: &BossSpawn, is_final: bool) -> Self {
        Self {
            threshold: spawn.spawn_time,
            variant: spawn.variant,
            hp: spawn.hp,
            is_final,
            fired: false,
        }
    }

    /// Whether this trigger has already fired. Monotonic: never resets
    /// within a level.
    pub fn fired(&self) -> bool {
        self.fired
    }
}

/// The level's boss schedule, ordered by ascending threshold.
#[derive(Debug, Clone)]
pub struct BossTriggerSet {
    triggers: Vec<BossTrigger>,
}

impl BossTriggerSet {
    /// Build from a validated blueprint's mini-bosses plus final boss.
    /// Threshold ordering is the blueprint's responsibility.
    pub fn new(mini_bosses: &[BossSpawn], final_boss: &BossSpawn) -> Self {
        let mut triggers: Vec<BossTrigger> = mini_bosses
            .iter()
            .map(|b| BossTrigger::new(b, false))
            .collect();
        triggers.push(BossTrigger::new(final_boss, true));
        Self { triggers }
    }

    /// Fire every untriggered entry whose threshold has been passed, in
    /// ascending threshold order. Each entry fires exactly once no
    /// matter how often this is called afterwards.
    pub fn fire_due(&mut self, elapsed: f32, mut emit: impl FnMut(&BossTrigger)) {
        for trigger in &mut self.triggers {
            if !trigger.fired && elapsed > trigger.threshold {
                trigger.fired = true;
                emit(trigger);
            }
        }
    }

    /// All triggers, in threshold order.
    pub fn triggers(&self) -> &[BossTrigger] {
        &self.triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> BossTriggerSet {
        BossTriggerSet::new(
            &[BossSpawn {
                spawn_time: 3.0,
                variant: 10,
                hp: 500.0,
            }],
            &BossSpawn {
                spawn_time: 10.0,
                variant: 11,
                hp: 2000.0,
            },
        )
    }

    #[test]
    fn test_fires_exactly_once() {
        let mut bosses = set();
        let mut fired = Vec::new();
        for _ in 0..50 {
            bosses.fire_due(4.0, |t| fired.push(t.variant));
        }
        assert_eq!(fired, vec![10]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut bosses = set();
        let mut count = 0;
        bosses.fire_due(3.0, |_| count += 1);
        assert_eq!(count, 0);
        bosses.fire_due(3.0001, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_crossing_every_threshold_fires_all_in_order() {
        let mut bosses = set();
        let mut fired = Vec::new();
        bosses.fire_due(100.0, |t| fired.push((t.variant, t.is_final)));
        assert_eq!(fired, vec![(10, false), (11, true)]);
    }
}
