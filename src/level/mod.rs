//! Deterministic level spawn scheduling
//!
//! All pacing logic lives here. This module must stay pure and
//! deterministic:
//! - Time only advances through `advance(dt)`
//! - Seeded RNG only, supplied by the caller
//! - No entity creation or platform dependencies

pub mod blueprint;
pub mod boss;
pub mod curve;
pub mod interval;
pub mod scheduler;

pub use blueprint::{BossSpawn, ConfigError, LevelBlueprint};
pub use boss::{BossTrigger, BossTriggerSet};
pub use curve::{CurveSample, SpawnRateCurve, VariantBucket, VariantId, WeightedVariant};
pub use interval::IntervalScheduler;
pub use scheduler::{
    EntityHandle, LevelPhase, LevelSpawnScheduler, PositionPolicy, SpawnDirective, SpawnKind,
};
