//! Static level description
//!
//! Everything the spawn scheduler needs to pace a level: duration, the
//! monster curve, boss spawn times, chest cadence, and the one-shot
//! spawns performed at level start. Blueprints are plain data (loadable
//! from JSON) and are validated once when the scheduler is built: a
//! malformed blueprint aborts level load instead of silently spawning
//! nothing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::curve::{SpawnRateCurve, VariantId};

/// Rejected blueprint. Fatal at level load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("level duration must be positive, got {0}")]
    NonPositiveDuration(f32),
    #[error("base monster hp must be positive, got {0}")]
    NonPositiveBaseHp(f32),
    #[error("spawn rate curve has no samples")]
    EmptyRateCurve,
    #[error("spawn rate curve samples must be sorted by progress")]
    UnsortedRateCurve,
    #[error("spawn rate {rate} at progress {progress} is negative")]
    NegativeRate { progress: f32, rate: f32 },
    #[error("hp multiplier {multiplier} at progress {progress} must be positive")]
    NonPositiveHpMultiplier { progress: f32, multiplier: f32 },
    #[error("variant table has no buckets")]
    EmptyVariantTable,
    #[error("variant bucket up to progress {until} has a negative weight")]
    NegativeWeight { until: f32 },
    #[error("variant bucket up to progress {until} has no positive weight")]
    NoPositiveWeight { until: f32 },
    #[error("boss spawn times must be ascending")]
    UnorderedBossTriggers,
    #[error("chest spawn period must be positive and finite, got {0}")]
    InvalidChestPeriod(f32),
}

/// A boss entry: when it appears and what it is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossSpawn {
    /// Level time (seconds) after which the boss appears.
    pub spawn_time: f32,
    pub variant: VariantId,
    /// Bosses ignore the curve's hp multiplier and use their own hp.
    pub hp: f32,
}

/// Static description of one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelBlueprint {
    /// Level duration in seconds; monsters stop spawning after this.
    pub level_time: f32,
    /// Base hp scaled by the curve's hp multiplier per spawn.
    pub base_monster_hp: f32,
    pub spawn_curve: SpawnRateCurve,
    /// Mini-bosses in spawn order; each fires exactly once.
    pub mini_bosses: Vec<BossSpawn>,
    /// The boss whose death ends the level. Conventionally due at
    /// `level_time`.
    pub final_boss: BossSpawn,
    /// Seconds between chest batches.
    pub chest_spawn_period: f32,
    /// Chests per batch.
    pub chest_batch: u32,
    /// Gems scattered around the player at level start.
    pub initial_gem_count: u32,
}

impl LevelBlueprint {
    /// Validate every invariant the scheduler relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.level_time > 0.0) {
            return Err(ConfigError::NonPositiveDuration(self.level_time));
        }
        if !(self.base_monster_hp > 0.0) {
            return Err(ConfigError::NonPositiveBaseHp(self.base_monster_hp));
        }
        self.spawn_curve.validate()?;
        let mut last = f32::NEG_INFINITY;
        for boss in self.mini_bosses.iter().chain(Some(&self.final_boss)) {
            if boss.spawn_time < last {
                return Err(ConfigError::UnorderedBossTriggers);
            }
            last = boss.spawn_time;
        }
        if !(self.chest_spawn_period > 0.0) || !self.chest_spawn_period.is_finite() {
            return Err(ConfigError::InvalidChestPeriod(self.chest_spawn_period));
        }
        Ok(())
    }
}

/// Fixture shared by the level tests: constant rate 2.0 over a 10s
/// level, one mini-boss at 3s, final boss at 10s, chests every 2s.
#[cfg(test)]
pub(crate) fn sample_blueprint() -> LevelBlueprint {
    use crate::level::curve::{CurveSample, VariantBucket, WeightedVariant};

    LevelBlueprint {
        level_time: 10.0,
        base_monster_hp: 10.0,
        spawn_curve: SpawnRateCurve {
            samples: vec![CurveSample {
                progress: 0.0,
                rate: 2.0,
                hp_multiplier: 1.0,
            }],
            buckets: vec![VariantBucket {
                until: 1.0,
                variants: vec![WeightedVariant {
                    variant: 0,
                    weight: 1.0,
                }],
            }],
        },
        mini_bosses: vec![BossSpawn {
            spawn_time: 3.0,
            variant: 10,
            hp: 500.0,
        }],
        final_boss: BossSpawn {
            spawn_time: 10.0,
            variant: 11,
            hp: 2000.0,
        },
        chest_spawn_period: 2.0,
        chest_batch: 1,
        initial_gem_count: 5,
    }
}
