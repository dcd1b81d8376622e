//! Tunable match configuration with defaults reproducing the classic tables.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Difficulty, EnemyKind, TowerKind};

/// Complete description of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Field dimensions, playable rectangle and placement spacing.
    pub field: FieldConfig,
    /// Ordered path points enemies walk from first to last.
    pub path: Vec<Vec2>,
    /// Wave escalation and timing.
    pub waves: WaveConfig,
    /// Starting resources and refund tuning.
    pub economy: EconomyConfig,
    /// Projectile tuning.
    pub combat: CombatConfig,
    /// Per-kind enemy stats.
    pub enemies: EnemyTable,
    /// Per-kind tower stats.
    pub towers: TowerTable,
    /// Per-difficulty scaling factors.
    pub difficulties: DifficultyTable,
    /// Difficulty the match starts with.
    pub difficulty: Difficulty,
    /// Seed for the obstacle shuffle.
    pub obstacle_seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            path: vec![
                Vec2::new(0.0, 460.0),
                Vec2::new(300.0, 460.0),
                Vec2::new(300.0, 260.0),
                Vec2::new(580.0, 260.0),
                Vec2::new(580.0, 580.0),
                Vec2::new(900.0, 580.0),
                Vec2::new(900.0, 460.0),
                Vec2::new(1200.0, 460.0),
            ],
            waves: WaveConfig::default(),
            economy: EconomyConfig::default(),
            combat: CombatConfig::default(),
            enemies: EnemyTable::default(),
            towers: TowerTable::default(),
            difficulties: DifficultyTable::default(),
            difficulty: Difficulty::Easy,
            obstacle_seed: 0x7472_6169_6c,
        }
    }
}

impl MatchConfig {
    /// Scaling factors for the configured difficulty.
    #[must_use]
    pub fn modifiers(&self) -> DifficultyModifiers {
        self.difficulties.get(self.difficulty)
    }
}

/// Field geometry and placement spacing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Width of the field in world units.
    pub width: f32,
    /// Height of the field in world units.
    pub height: f32,
    /// Top edge of the playable rectangle.
    pub playable_top: f32,
    /// Bottom edge (exclusive) of the playable rectangle.
    pub playable_bottom: f32,
    /// Edge length of a grid cell.
    pub cell_size: f32,
    /// Visual width of the path.
    pub path_width: f32,
    /// Extra clearance kept around the path when placing towers.
    pub path_clearance: f32,
    /// Minimum distance between tower centers.
    pub min_tower_spacing: f32,
    /// Distance past the field edge at which projectiles are discarded.
    pub offscreen_margin: f32,
    /// Fraction of candidate cells blocked at wave one.
    pub initial_blocked_fraction: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            playable_top: 80.0,
            playable_bottom: 700.0,
            cell_size: 40.0,
            path_width: 40.0,
            path_clearance: 5.0,
            min_tower_spacing: 30.0,
            offscreen_margin: 50.0,
            initial_blocked_fraction: 0.9,
        }
    }
}

impl FieldConfig {
    /// Distance from the path centerline within which placement is refused.
    #[must_use]
    pub fn path_exclusion_radius(&self) -> f32 {
        self.path_width / 2.0 + self.path_clearance
    }
}

/// Wave escalation and timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Enemy count of the first wave before difficulty scaling.
    pub base_enemy_count: u32,
    /// Enemies added per wave before difficulty scaling.
    pub enemy_increment: u32,
    /// Number of waves in a match.
    pub max_waves: u32,
    /// Base delay between spawns in milliseconds.
    pub spawn_delay_ms: u64,
    /// Lower bound of the per-wave spawn scale.
    pub min_spawn_scale: f64,
    /// Spawn scale reduction per wave.
    pub spawn_scale_step: f64,
    /// Countdown between a completed wave and the ready signal.
    pub preparation_ms: u64,
    /// Delay between the ready signal and the automatic start.
    pub auto_start_ms: u64,
    /// Whether waves start automatically once ready.
    pub auto_advance: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_enemy_count: 5,
            enemy_increment: 2,
            max_waves: 10,
            spawn_delay_ms: 800,
            min_spawn_scale: 0.35,
            spawn_scale_step: 0.08,
            preparation_ms: 3000,
            auto_start_ms: 2000,
            auto_advance: true,
        }
    }
}

impl WaveConfig {
    /// Length of the preparation countdown.
    #[must_use]
    pub const fn preparation(&self) -> Duration {
        Duration::from_millis(self.preparation_ms)
    }

    /// Delay before an automatic wave start.
    #[must_use]
    pub const fn auto_start(&self) -> Duration {
        Duration::from_millis(self.auto_start_ms)
    }
}

/// Starting resources and refund tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Money available at the start of a match.
    pub starting_money: u32,
    /// Base health at the start of a match.
    pub starting_health: u32,
    /// Health removed per enemy reaching the end.
    pub leak_damage: u32,
    /// Share of the paid cost returned when selling.
    pub refund_ratio: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money: 100,
            starting_health: 20,
            leak_damage: 1,
            refund_ratio: 0.2,
        }
    }
}

/// Projectile tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Distance at which a projectile hits its target.
    pub hit_radius: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self { hit_radius: 10.0 }
    }
}

/// Static stats of an enemy kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Health an enemy spawns with.
    pub max_health: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Money paid for a kill before difficulty scaling.
    pub reward: u32,
    /// Visual radius.
    pub size: f32,
}

/// Stats for every enemy kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    /// Stats of [`EnemyKind::Basic`].
    pub basic: EnemyStats,
    /// Stats of [`EnemyKind::Fast`].
    pub fast: EnemyStats,
    /// Stats of [`EnemyKind::Tank`].
    pub tank: EnemyStats,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            basic: EnemyStats {
                max_health: 30,
                speed: 50.0,
                reward: 10,
                size: 15.0,
            },
            fast: EnemyStats {
                max_health: 20,
                speed: 80.0,
                reward: 15,
                size: 12.0,
            },
            tank: EnemyStats {
                max_health: 80,
                speed: 30.0,
                reward: 25,
                size: 20.0,
            },
        }
    }
}

impl EnemyTable {
    /// Stats of the provided kind.
    #[must_use]
    pub const fn get(&self, kind: EnemyKind) -> EnemyStats {
        match kind {
            EnemyKind::Basic => self.basic,
            EnemyKind::Fast => self.fast,
            EnemyKind::Tank => self.tank,
        }
    }
}

/// Static stats of a tower kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Base purchase price.
    pub cost: u32,
    /// Damage dealt per projectile.
    pub damage: u32,
    /// Targeting radius in world units.
    pub range: f32,
    /// Minimum time between shots in milliseconds at normal speed.
    pub fire_period_ms: u64,
    /// Projectile speed in world units per second.
    pub projectile_speed: f32,
}

impl TowerStats {
    /// Minimum time between shots at normal speed.
    #[must_use]
    pub const fn fire_period(&self) -> Duration {
        Duration::from_millis(self.fire_period_ms)
    }
}

/// Stats for every tower kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerTable {
    /// Stats of [`TowerKind::Basic`].
    pub basic: TowerStats,
    /// Stats of [`TowerKind::Cannon`].
    pub cannon: TowerStats,
    /// Stats of [`TowerKind::Laser`].
    pub laser: TowerStats,
}

impl Default for TowerTable {
    fn default() -> Self {
        Self {
            basic: TowerStats {
                cost: 20,
                damage: 10,
                range: 100.0,
                fire_period_ms: 1000,
                projectile_speed: 200.0,
            },
            cannon: TowerStats {
                cost: 50,
                damage: 25,
                range: 120.0,
                fire_period_ms: 1500,
                projectile_speed: 150.0,
            },
            laser: TowerStats {
                cost: 80,
                damage: 15,
                range: 150.0,
                fire_period_ms: 500,
                projectile_speed: 400.0,
            },
        }
    }
}

impl TowerTable {
    /// Stats of the provided kind.
    #[must_use]
    pub const fn get(&self, kind: TowerKind) -> TowerStats {
        match kind {
            TowerKind::Basic => self.basic,
            TowerKind::Cannon => self.cannon,
            TowerKind::Laser => self.laser,
        }
    }
}

/// Scaling factors applied by a difficulty level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModifiers {
    /// Multiplier applied to wave enemy counts.
    pub count_multiplier: f64,
    /// Multiplier applied to spawn delays; lower spawns faster.
    pub spawn_cadence: f64,
    /// Blocked fraction removed from the obstacle field per wave.
    pub obstacle_clear_rate: f64,
    /// Price growth per tower of the same kind already placed.
    pub price_growth: f64,
    /// Multiplier applied to kill rewards.
    pub reward_multiplier: f64,
}

/// Scaling factors for every difficulty level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    /// Factors of [`Difficulty::Easy`].
    pub easy: DifficultyModifiers,
    /// Factors of [`Difficulty::Normal`].
    pub normal: DifficultyModifiers,
    /// Factors of [`Difficulty::Hard`].
    pub hard: DifficultyModifiers,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyModifiers {
                count_multiplier: 1.0,
                spawn_cadence: 1.0,
                obstacle_clear_rate: 0.05,
                price_growth: 0.10,
                reward_multiplier: 1.0,
            },
            normal: DifficultyModifiers {
                count_multiplier: 1.6,
                spawn_cadence: 0.7,
                obstacle_clear_rate: 0.03,
                price_growth: 0.18,
                reward_multiplier: 0.8,
            },
            hard: DifficultyModifiers {
                count_multiplier: 2.2,
                spawn_cadence: 0.5,
                obstacle_clear_rate: 0.02,
                price_growth: 0.25,
                reward_multiplier: 0.6,
            },
        }
    }
}

impl DifficultyTable {
    /// Factors of the provided difficulty.
    #[must_use]
    pub const fn get(&self, difficulty: Difficulty) -> DifficultyModifiers {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}
