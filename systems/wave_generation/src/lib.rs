#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave composition system.
//!
//! Each wave grows by a fixed increment scaled by difficulty. Early waves
//! spawn only basic enemies, waves two and three mix in fast enemies, and
//! from wave four onwards tanks join the mix. Spawn delays shrink with the
//! wave number down to a floor and are further compressed by difficulty.

use std::time::Duration;

use trail_defence_core::{DifficultyModifiers, EnemyKind, SpawnGroup, WaveConfig, WaveId, WavePlan};

const EARLY_FAST_SHARE: f64 = 0.3;
const LATE_TANK_SHARE: f64 = 0.2;
const LATE_FAST_SHARE: f64 = 0.4;

const EARLY_FAST_DELAY_FACTOR: f64 = 0.7;
const LATE_FAST_DELAY_FACTOR: f64 = 0.6;
const LATE_TANK_DELAY_FACTOR: f64 = 1.5;

/// First wave that mixes fast enemies into the composition.
const FAST_ENEMIES_FROM: u32 = 2;
/// First wave that mixes tanks into the composition.
const TANKS_FROM: u32 = 4;

/// Pure system that turns a wave number into a [`WavePlan`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WaveGeneration;

impl WaveGeneration {
    /// Creates a new wave generation system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds the composition of `wave` for the provided difficulty scaling.
    ///
    /// Groups are listed in release order and empty groups are omitted.
    #[must_use]
    pub fn plan(&self, wave: WaveId, modifiers: DifficultyModifiers, config: &WaveConfig) -> WavePlan {
        let number = wave.get().max(1);
        let total = enemy_count(number, modifiers, config);
        let scale = spawn_scale(number, modifiers, config);
        let base_delay = config.spawn_delay_ms as f64;

        let groups = if number < FAST_ENEMIES_FROM {
            vec![group(EnemyKind::Basic, total, base_delay * scale)]
        } else if number < TANKS_FROM {
            let fast = share(total, EARLY_FAST_SHARE);
            vec![
                group(EnemyKind::Basic, total - fast, base_delay),
                group(
                    EnemyKind::Fast,
                    fast,
                    base_delay * EARLY_FAST_DELAY_FACTOR * scale,
                ),
            ]
        } else {
            let tank = share(total, LATE_TANK_SHARE);
            let fast = share(total, LATE_FAST_SHARE);
            vec![
                group(
                    EnemyKind::Basic,
                    total.saturating_sub(tank + fast),
                    base_delay * scale,
                ),
                group(
                    EnemyKind::Fast,
                    fast,
                    base_delay * LATE_FAST_DELAY_FACTOR * scale,
                ),
                group(
                    EnemyKind::Tank,
                    tank,
                    base_delay * LATE_TANK_DELAY_FACTOR * scale,
                ),
            ]
        };

        WavePlan::new(wave, groups)
    }
}

/// `floor((base + (n − 1) × increment) × count_multiplier)`.
fn enemy_count(number: u32, modifiers: DifficultyModifiers, config: &WaveConfig) -> u32 {
    let unscaled = config
        .base_enemy_count
        .saturating_add((number - 1).saturating_mul(config.enemy_increment));
    let scaled = f64::from(unscaled) * modifiers.count_multiplier.max(0.0);
    scaled.floor().min(f64::from(u32::MAX)) as u32
}

/// `max(min_scale, 1 − (n − 1) × step) × spawn_cadence`.
fn spawn_scale(number: u32, modifiers: DifficultyModifiers, config: &WaveConfig) -> f64 {
    let decay = 1.0 - f64::from(number - 1) * config.spawn_scale_step;
    decay.max(config.min_spawn_scale) * modifiers.spawn_cadence
}

fn share(total: u32, fraction: f64) -> u32 {
    (f64::from(total) * fraction).floor() as u32
}

fn group(kind: EnemyKind, count: u32, delay_ms: f64) -> SpawnGroup {
    SpawnGroup {
        kind,
        count,
        spawn_delay: Duration::from_millis(delay_ms.max(0.0).round() as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_defence_core::{Difficulty, DifficultyTable};

    fn plan(wave: u32, difficulty: Difficulty) -> WavePlan {
        WaveGeneration::new().plan(
            WaveId::new(wave),
            DifficultyTable::default().get(difficulty),
            &WaveConfig::default(),
        )
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn first_wave_is_five_basic_enemies_on_easy() {
        let plan = plan(1, Difficulty::Easy);
        assert_eq!(
            plan.groups(),
            &[SpawnGroup {
                kind: EnemyKind::Basic,
                count: 5,
                spawn_delay: ms(800),
            }]
        );
    }

    #[test]
    fn early_waves_mix_in_fast_enemies() {
        let plan = plan(2, Difficulty::Easy);
        assert_eq!(plan.total_enemies(), 7);
        assert_eq!(
            plan.groups(),
            &[
                SpawnGroup {
                    kind: EnemyKind::Basic,
                    count: 5,
                    spawn_delay: ms(800),
                },
                SpawnGroup {
                    kind: EnemyKind::Fast,
                    count: 2,
                    spawn_delay: ms(515),
                },
            ]
        );
    }

    #[test]
    fn later_waves_add_tanks() {
        let plan = plan(4, Difficulty::Normal);
        assert_eq!(plan.total_enemies(), 17);
        assert_eq!(
            plan.groups(),
            &[
                SpawnGroup {
                    kind: EnemyKind::Basic,
                    count: 8,
                    spawn_delay: ms(426),
                },
                SpawnGroup {
                    kind: EnemyKind::Fast,
                    count: 6,
                    spawn_delay: ms(255),
                },
                SpawnGroup {
                    kind: EnemyKind::Tank,
                    count: 3,
                    spawn_delay: ms(638),
                },
            ]
        );
    }

    #[test]
    fn spawn_scale_bottoms_out() {
        let late = plan(10, Difficulty::Hard);
        let basic = late
            .groups()
            .iter()
            .find(|group| group.kind == EnemyKind::Basic)
            .expect("basic group");
        assert_eq!(basic.spawn_delay, ms(140));
    }

    #[test]
    fn harder_difficulties_field_more_enemies() {
        for wave in 1..=10 {
            let easy = plan(wave, Difficulty::Easy).total_enemies();
            let normal = plan(wave, Difficulty::Normal).total_enemies();
            let hard = plan(wave, Difficulty::Hard).total_enemies();
            assert!(easy < normal && normal < hard, "wave {wave}");
        }
    }

    #[test]
    fn counts_never_shrink_between_waves() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let totals: Vec<u32> = (1..=10)
                .map(|wave| plan(wave, difficulty).total_enemies())
                .collect();
            assert!(totals.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[test]
    fn empty_groups_are_dropped() {
        let config = WaveConfig {
            base_enemy_count: 2,
            enemy_increment: 0,
            ..WaveConfig::default()
        };
        let plan = WaveGeneration::new().plan(
            WaveId::new(2),
            DifficultyTable::default().get(Difficulty::Easy),
            &config,
        );
        assert_eq!(plan.groups().len(), 1);
        assert_eq!(plan.count_of(EnemyKind::Basic), 2);
    }
}
