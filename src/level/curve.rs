//! Progress-driven spawn pacing
//!
//! Maps normalized level progress (0..1) to a spawn rate and a per-spawn
//! hp multiplier, and picks which monster variant to spawn from a
//! weighted table. All randomness flows through the caller's RNG stream
//! so replays and tests are reproducible.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::blueprint::ConfigError;

/// Monster variant identifier, resolved to a blueprint by the host.
pub type VariantId = u32;

/// One sample point on the spawn curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurveSample {
    /// Normalized level progress in [0, 1].
    pub progress: f32,
    /// Expected spawns per second at this progress.
    pub rate: f32,
    /// Multiplier applied to the variant's base hp.
    pub hp_multiplier: f32,
}

/// A spawnable variant and its selection weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightedVariant {
    pub variant: VariantId,
    pub weight: f32,
}

/// Variants in play up to a progress point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantBucket {
    /// This bucket is active for progress <= `until`.
    pub until: f32,
    pub variants: Vec<WeightedVariant>,
}

/// Spawn pacing over the life of a level: rate/hp samples plus the
/// weighted variant table, bucketed by progress.
///
/// Rate and hp multiplier interpolate linearly between the two
/// neighbouring samples and clamp to the end samples outside the
/// defined range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnRateCurve {
    pub samples: Vec<CurveSample>,
    pub buckets: Vec<VariantBucket>,
}

impl SpawnRateCurve {
    /// Check the invariants a level load relies on: at least one sample,
    /// samples sorted by progress, non-negative rates, positive hp
    /// multipliers, and every bucket holding at least one variant with
    /// positive weight.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples.is_empty() {
            return Err(ConfigError::EmptyRateCurve);
        }
        for pair in self.samples.windows(2) {
            if pair[1].progress < pair[0].progress {
                return Err(ConfigError::UnsortedRateCurve);
            }
        }
        for sample in &self.samples {
            if !(sample.rate >= 0.0) {
                return Err(ConfigError::NegativeRate {
                    progress: sample.progress,
                    rate: sample.rate,
                });
            }
            if !(sample.hp_multiplier > 0.0) {
                return Err(ConfigError::NonPositiveHpMultiplier {
                    progress: sample.progress,
                    multiplier: sample.hp_multiplier,
                });
            }
        }
        if self.buckets.is_empty() {
            return Err(ConfigError::EmptyVariantTable);
        }
        for bucket in &self.buckets {
            if bucket.variants.iter().any(|v| !(v.weight >= 0.0)) {
                return Err(ConfigError::NegativeWeight {
                    until: bucket.until,
                });
            }
            if !bucket.variants.iter().any(|v| v.weight > 0.0) {
                return Err(ConfigError::NoPositiveWeight {
                    until: bucket.until,
                });
            }
        }
        Ok(())
    }

    /// Spawns per second at `progress`.
    pub fn rate_at(&self, progress: f32) -> f32 {
        self.interpolate(progress, |s| s.rate)
    }

    /// Hp multiplier for monsters spawned at `progress`.
    pub fn hp_multiplier_at(&self, progress: f32) -> f32 {
        self.interpolate(progress, |s| s.hp_multiplier)
    }

    fn interpolate(&self, progress: f32, value: impl Fn(&CurveSample) -> f32) -> f32 {
        let first = match self.samples.first() {
            Some(s) => s,
            None => return 0.0,
        };
        if progress <= first.progress {
            return value(first);
        }
        for pair in self.samples.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if progress <= b.progress {
                let span = b.progress - a.progress;
                if span <= 0.0 {
                    return value(b);
                }
                let t = (progress - a.progress) / span;
                return value(a) + (value(b) - value(a)) * t;
            }
        }
        // Past the last sample: clamp
        value(self.samples.last().expect("samples checked non-empty"))
    }

    /// Draw a variant from the bucket active at `progress`, weighted by
    /// the bucket's entries. Buckets are matched in order; progress past
    /// the last bucket's `until` uses the last bucket.
    pub fn select_variant<R: Rng>(&self, progress: f32, rng: &mut R) -> VariantId {
        let bucket = self
            .buckets
            .iter()
            .find(|b| progress <= b.until)
            .or_else(|| self.buckets.last())
            .expect("variant table checked non-empty");

        let total: f32 = bucket.variants.iter().map(|v| v.weight.max(0.0)).sum();
        debug_assert!(total > 0.0, "bucket without positive weight");
        if total <= 0.0 {
            return bucket.variants.first().map(|v| v.variant).unwrap_or(0);
        }

        let mut roll = rng.random_range(0.0..total);
        for entry in &bucket.variants {
            let weight = entry.weight.max(0.0);
            if roll < weight {
                return entry.variant;
            }
            roll -= weight;
        }
        // Float round-off can leave roll a hair past the last entry
        bucket
            .variants
            .iter()
            .rev()
            .find(|v| v.weight > 0.0)
            .expect("bucket checked for positive weight")
            .variant
    }
}
