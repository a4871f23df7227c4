//! Night Harvest headless demo driver
//!
//! Stands in for the real host: runs one level at a fixed timestep,
//! spawns whatever the scheduler asks for (as log lines), pretends the
//! player clears everything, and settles the session into the on-disk
//! ledger. `RUST_LOG=debug` shows the full spawn stream.
//!
//! Usage: night-harvest [seed] [--reset]

use rand::SeedableRng;
use rand_pcg::Pcg32;

use night_harvest::consts::SIM_DT;
use night_harvest::format_time;
use night_harvest::ledger::{JsonFileStore, PlayerLedger};
use night_harvest::level::{
    BossSpawn, CurveSample, EntityHandle, LevelBlueprint, LevelSpawnScheduler, SpawnKind,
    SpawnRateCurve, VariantBucket, WeightedVariant,
};
use night_harvest::session::{SessionRecorder, SessionStats, compute_score};

const PLAYER_DATA_PATH: &str = "player_data.json";
const DEFAULT_SEED: u64 = 0x4e48_2d31;

/// A one-minute level: spawn rate ramps 1/s to 4/s, tougher variants
/// phase in past the halfway mark, mini-boss at 20s, final boss at the
/// minute.
fn demo_blueprint() -> LevelBlueprint {
    LevelBlueprint {
        level_time: 60.0,
        base_monster_hp: 20.0,
        spawn_curve: SpawnRateCurve {
            samples: vec![
                CurveSample {
                    progress: 0.0,
                    rate: 1.0,
                    hp_multiplier: 1.0,
                },
                CurveSample {
                    progress: 0.5,
                    rate: 2.5,
                    hp_multiplier: 1.5,
                },
                CurveSample {
                    progress: 1.0,
                    rate: 4.0,
                    hp_multiplier: 2.5,
                },
            ],
            buckets: vec![
                VariantBucket {
                    until: 0.5,
                    variants: vec![
                        WeightedVariant {
                            variant: 0,
                            weight: 3.0,
                        },
                        WeightedVariant {
                            variant: 1,
                            weight: 1.0,
                        },
                    ],
                },
                VariantBucket {
                    until: 1.0,
                    variants: vec![
                        WeightedVariant {
                            variant: 1,
                            weight: 2.0,
                        },
                        WeightedVariant {
                            variant: 2,
                            weight: 2.0,
                        },
                    ],
                },
            ],
        },
        mini_bosses: vec![BossSpawn {
            spawn_time: 20.0,
            variant: 10,
            hp: 600.0,
        }],
        final_boss: BossSpawn {
            spawn_time: 60.0,
            variant: 11,
            hp: 2400.0,
        },
        chest_spawn_period: 15.0,
        chest_batch: 2,
        initial_gem_count: 8,
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    log::info!("night harvest demo starting, seed {seed}");

    let mut ledger = PlayerLedger::new(JsonFileStore::open(PLAYER_DATA_PATH));
    if std::env::args().any(|arg| arg == "--reset") {
        if cfg!(debug_assertions) {
            ledger.reset_all_data();
            return;
        }
        log::warn!("--reset is only available in debug builds");
    }
    ledger.on_coins_changed(|total| log::debug!("coins -> {total}"));
    ledger.on_high_score_changed(|score| log::info!("new high score: {score}"));

    let mut recorder = SessionRecorder::new();
    recorder.start_new_session(&mut ledger);

    let mut scheduler =
        LevelSpawnScheduler::new(demo_blueprint()).expect("demo blueprint is valid");
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut directives = Vec::new();
    scheduler.start(&mut directives);

    // The pretend player: monsters fall 2s after spawning, bosses 5s,
    // chests and gems pay out immediately.
    let mut next_handle = 0u64;
    let mut pending_deaths: Vec<(f32, EntityHandle)> = Vec::new();
    let mut time = 0.0f32;
    let mut kills = 0u64;
    let mut coins = 0u64;
    let mut damage = 0.0f32;
    let mut level_passed = false;

    while !level_passed && time < 180.0 {
        for directive in directives.drain(..) {
            next_handle += 1;
            let handle = EntityHandle(next_handle);
            match directive.kind {
                SpawnKind::Monster { variant, hp } => {
                    log::debug!(
                        "{} spawn monster v{variant}, hp {hp:.0}",
                        format_time(time)
                    );
                    damage += hp;
                    pending_deaths.push((time + 2.0, handle));
                }
                SpawnKind::Boss {
                    variant,
                    hp,
                    is_final,
                } => {
                    log::info!(
                        "{} boss v{variant} arrives, hp {hp:.0}{}",
                        format_time(time),
                        if is_final { " (final)" } else { "" }
                    );
                    if is_final {
                        scheduler.bind_final_boss(handle);
                    }
                    damage += hp;
                    pending_deaths.push((time + 5.0, handle));
                }
                SpawnKind::Chest => {
                    log::debug!("{} chest drop", format_time(time));
                    coins += 5;
                }
                SpawnKind::Gem => coins += 1,
            }
        }

        time += SIM_DT;
        pending_deaths.retain(|&(die_at, handle)| {
            if time < die_at {
                return true;
            }
            kills += 1;
            if scheduler.report_killed(handle) {
                level_passed = true;
            }
            false
        });

        scheduler.advance(SIM_DT, &mut rng, &mut directives);
        recorder.update_session_time(time);
        recorder.update_session_score(compute_score(kills, time, coins));
    }

    let result = recorder.finish(
        &mut ledger,
        &SessionStats {
            enemies_killed: kills,
            damage_dealt: damage,
            coins_gained: coins,
        },
    );

    log::info!(
        "session over ({}): score {}{}, best {} | survived {}{}, best {} | +{} coins, {} total",
        if level_passed { "level passed" } else { "timed out" },
        result.final_score,
        if result.is_new_high_score { " NEW RECORD" } else { "" },
        result.high_score,
        format_time(result.final_time),
        if result.is_new_best_time { " NEW RECORD" } else { "" },
        format_time(result.best_time),
        result.coins_earned,
        result.total_coins,
    );
    log::info!(
        "lifetime: {} games, {} kills, {:.0} damage, {} played",
        ledger.total_games_played(),
        ledger.total_enemies_killed(),
        ledger.total_damage_dealt(),
        format_time(ledger.total_playtime()),
    );
}
