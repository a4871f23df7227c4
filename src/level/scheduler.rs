//! Per-tick level spawn decisions
//!
//! Composes the interval accumulators, the spawn curve and the boss
//! schedule into a stream of spawn directives. The scheduler decides
//! *what* to spawn *when*; the host's entity spawner owns positions,
//! game objects and lifetimes.

use rand::Rng;

use super::blueprint::{ConfigError, LevelBlueprint};
use super::boss::BossTriggerSet;
use super::curve::VariantId;
use super::interval::IntervalScheduler;

/// Opaque identifier for an entity created by the host's spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// How the spawner should place an entity. Positions are drawn by the
/// spawner per directive, so simultaneous fires land at independent
/// spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionPolicy {
    /// Any valid point outside the player's view.
    RandomOffscreen,
    /// Scattered in a ring around the player.
    NearPlayer,
}

/// What to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnKind {
    Monster { variant: VariantId, hp: f32 },
    Boss {
        variant: VariantId,
        hp: f32,
        /// The host must report this boss's handle via
        /// [`LevelSpawnScheduler::bind_final_boss`].
        is_final: bool,
    },
    Chest,
    Gem,
}

/// A single spawn request emitted to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnDirective {
    pub kind: SpawnKind,
    pub position: PositionPolicy,
}

/// Lifecycle of one level run. A scheduler instance is never reused;
/// build a fresh one per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    /// Built, `start` not yet called.
    Ready,
    /// Ticking.
    Running,
    /// The final boss has been reported dead.
    Finished,
}

/// Drives a level's spawn timeline from elapsed time.
///
/// Within one `advance` call the emission order is fixed: monsters (in
/// fire order), then bosses (ascending spawn time), then chests. A
/// large `dt` emits every fire it covers; nothing is collapsed.
#[derive(Debug)]
pub struct LevelSpawnScheduler {
    blueprint: LevelBlueprint,
    phase: LevelPhase,
    elapsed: f32,
    monster_timer: IntervalScheduler,
    chest_timer: IntervalScheduler,
    bosses: BossTriggerSet,
    final_boss: Option<EntityHandle>,
}

impl LevelSpawnScheduler {
    /// Validate the blueprint and build the level's schedulers.
    pub fn new(blueprint: LevelBlueprint) -> Result<Self, ConfigError> {
        blueprint.validate()?;
        let bosses = BossTriggerSet::new(&blueprint.mini_bosses, &blueprint.final_boss);
        let chest_timer = IntervalScheduler::new(blueprint.chest_spawn_period);
        Ok(Self {
            blueprint,
            phase: LevelPhase::Ready,
            elapsed: 0.0,
            monster_timer: IntervalScheduler::new(f32::INFINITY),
            chest_timer,
            bosses,
            final_boss: None,
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// Level time advanced so far, in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Normalized level progress, clamped to [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.blueprint.level_time).clamp(0.0, 1.0)
    }

    /// Begin the level: emit the opening chest and gem scatter and start
    /// accepting `advance` calls. Does nothing unless the scheduler is
    /// still `Ready`.
    pub fn start(&mut self, out: &mut Vec<SpawnDirective>) {
        if self.phase != LevelPhase::Ready {
            return;
        }
        self.phase = LevelPhase::Running;
        out.push(SpawnDirective {
            kind: SpawnKind::Chest,
            position: PositionPolicy::RandomOffscreen,
        });
        for _ in 0..self.blueprint.initial_gem_count {
            out.push(SpawnDirective {
                kind: SpawnKind::Gem,
                position: PositionPolicy::NearPlayer,
            });
        }
        log::info!(
            "level started: {}s, {} mini-boss(es)",
            self.blueprint.level_time,
            self.blueprint.mini_bosses.len()
        );
    }

    /// Advance level time by `dt` and append this tick's spawn
    /// directives to `out`. No-op unless `Running`.
    pub fn advance<R: Rng>(&mut self, dt: f32, rng: &mut R, out: &mut Vec<SpawnDirective>) {
        if self.phase != LevelPhase::Running {
            return;
        }
        self.elapsed += dt;

        // Monsters pace against the curve until level time runs out. The
        // rate changes with progress, so the period is re-derived every
        // tick before the accumulator runs.
        if self.elapsed < self.blueprint.level_time {
            let progress = self.progress();
            let rate = self.blueprint.spawn_curve.rate_at(progress);
            let period = if rate > 0.0 { 1.0 / rate } else { f32::INFINITY };
            self.monster_timer.set_period(period);
            let fires = self.monster_timer.advance(dt);
            for _ in 0..fires {
                let variant = self.blueprint.spawn_curve.select_variant(progress, rng);
                let hp =
                    self.blueprint.base_monster_hp * self.blueprint.spawn_curve.hp_multiplier_at(progress);
                out.push(SpawnDirective {
                    kind: SpawnKind::Monster { variant, hp },
                    position: PositionPolicy::RandomOffscreen,
                });
            }
        }

        // Bosses: every threshold crossed since the last tick fires once.
        self.bosses.fire_due(self.elapsed, |trigger| {
            out.push(SpawnDirective {
                kind: SpawnKind::Boss {
                    variant: trigger.variant,
                    hp: trigger.hp,
                    is_final: trigger.is_final,
                },
                position: PositionPolicy::RandomOffscreen,
            });
        });

        // Chests keep dropping on their fixed cadence even after level
        // time has elapsed.
        let chest_fires = self.chest_timer.advance(dt);
        for _ in 0..chest_fires {
            for _ in 0..self.blueprint.chest_batch {
                out.push(SpawnDirective {
                    kind: SpawnKind::Chest,
                    position: PositionPolicy::RandomOffscreen,
                });
            }
        }
    }

    /// Record the spawner's handle for the final boss directive.
    pub fn bind_final_boss(&mut self, handle: EntityHandle) {
        self.final_boss = Some(handle);
    }

    /// Report an entity killed. Returns true exactly once: when the
    /// bound final-boss handle dies, which ends the level. The host
    /// stops calling `advance` when it sees true.
    pub fn report_killed(&mut self, handle: EntityHandle) -> bool {
        if self.phase == LevelPhase::Running && self.final_boss == Some(handle) {
            self.phase = LevelPhase::Finished;
            log::info!("final boss down at {:.1}s, level passed", self.elapsed);
            return true;
        }
        false
    }
}
