#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Trail Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The orchestrator submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and presentation layers react to. Systems consume immutable
//! views such as [`EnemyView`] and [`TowerView`] and respond exclusively with
//! new command batches.

mod config;

use std::time::Duration;

pub use config::{
    CombatConfig, DifficultyModifiers, DifficultyTable, EconomyConfig, EnemyStats, EnemyTable,
    FieldConfig, MatchConfig, TowerStats, TowerTable, WaveConfig,
};
pub use glam::Vec2;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock, resolves due timers and moves enemies.
    Tick {
        /// Scaled duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the provided wave plan starts spawning.
    StartWave {
        /// Composition generated for the next wave.
        plan: WavePlan,
    },
    /// Replaces every tower's current target with the provided assignments.
    ///
    /// Towers missing from the list lose their target.
    AssignTargets {
        /// Target assignments produced by the targeting system.
        targets: Vec<TowerTarget>,
    },
    /// Requests that a tower launches a projectile at an enemy.
    FireProjectile {
        /// Tower that fires.
        tower: TowerId,
        /// Enemy the projectile homes in on.
        target: EnemyId,
    },
    /// Moves active projectiles and resolves hits.
    AdvanceProjectiles {
        /// Scaled duration of simulated time the projectiles travel for.
        dt: Duration,
    },
    /// Settles rewards and penalties accrued during the tick.
    Settle,
    /// Requests placement of a tower on the provided grid cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Grid cell the tower snaps to.
        cell: CellCoord,
    },
    /// Requests that a placed tower is sold for a partial refund.
    SellTower {
        /// Identifier of the tower to sell.
        tower: TowerId,
    },
    /// Selects the difficulty used by the upcoming match.
    SetDifficulty {
        /// Difficulty level to activate.
        difficulty: Difficulty,
    },
    /// Cancels every outstanding timer and rebuilds the match from configuration.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Scaled duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of the spawned enemy.
        kind: EnemyKind,
    },
    /// Reports that an enemy was killed and the player was rewarded.
    EnemyKilled {
        /// Identifier of the enemy that died.
        enemy: EnemyId,
        /// Money credited to the player after difficulty scaling.
        reward: u32,
    },
    /// Reports that an enemy walked off the end of the path.
    EnemyReachedEnd {
        /// Identifier of the enemy that escaped.
        enemy: EnemyId,
        /// Base health removed by the escape.
        damage: u32,
    },
    /// Announces that a wave started spawning.
    WaveStarted {
        /// Number of the wave that started.
        wave: WaveId,
        /// Composition the wave spawns.
        plan: WavePlan,
    },
    /// Reports that a wave start request was refused.
    WaveStartRejected {
        /// Specific reason the request failed.
        reason: WaveError,
    },
    /// Announces that every enemy of a wave has been spawned and resolved.
    WaveCompleted {
        /// Number of the completed wave.
        wave: WaveId,
    },
    /// Announces the countdown before the next wave becomes ready.
    WavePreparation {
        /// Length of the preparation countdown.
        duration: Duration,
    },
    /// Announces that the preparation countdown elapsed.
    WaveReady,
    /// Signals that the auto-advance timer elapsed and the next wave should start.
    NextWaveDue,
    /// Announces that the final wave was cleared.
    AllWavesCompleted {
        /// Number of waves the player survived.
        waves: u32,
    },
    /// Reports that the obstacle field was recomputed.
    ObstaclesUpdated {
        /// Number of cells blocked after the update.
        blocked: u32,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
        /// Money deducted for the purchase.
        cost: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower was sold.
    TowerSold {
        /// Identifier of the sold tower.
        tower: TowerId,
        /// Money credited back to the player.
        refund: u32,
    },
    /// Reports that a tower sale request was rejected.
    TowerSaleRejected {
        /// Identifier provided in the sale request.
        tower: TowerId,
        /// Specific reason the sale failed.
        reason: SellError,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Enemy the projectile homes in on.
        target: EnemyId,
    },
    /// Confirms that the difficulty changed.
    DifficultyChanged {
        /// Difficulty now in effect.
        difficulty: Difficulty,
    },
    /// Reports that a difficulty change was refused.
    DifficultyChangeRejected {
        /// Specific reason the change failed.
        reason: DifficultyError,
    },
    /// Announces that the match was rebuilt from configuration.
    MatchRestarted,
    /// Announces that base health reached zero.
    GameOver,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the projectile identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Sequential wave number. Zero means no wave has started yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveId(u32);

impl WaveId {
    /// Creates a new wave number.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric wave number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Wave number that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are absolute within the field, so reserved margins simply
/// contain no playable cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Center of the cell in world units for the provided cell size.
    #[must_use]
    pub fn center(&self, cell_size: f32) -> Vec2 {
        Vec2::new(
            (self.column as f32 + 0.5) * cell_size,
            (self.row as f32 + 0.5) * cell_size,
        )
    }
}

/// Types of enemies that walk the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline enemy with balanced stats.
    Basic,
    /// Quick enemy with reduced health.
    Fast,
    /// Slow enemy with a large health pool.
    Tank,
}

impl EnemyKind {
    /// Every enemy kind in declaration order.
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tank];
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Cheap tower with moderate damage.
    Basic,
    /// Slow, heavy-hitting tower.
    Cannon,
    /// Long range tower with a fast fire rate.
    Laser,
}

impl TowerKind {
    /// Every tower kind in declaration order.
    pub const ALL: [TowerKind; 3] = [TowerKind::Basic, TowerKind::Cannon, TowerKind::Laser];
}

/// Difficulty levels selectable before a match starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Forgiving tuning.
    #[default]
    Easy,
    /// Standard tuning.
    Normal,
    /// Punishing tuning.
    Hard,
}

/// Simulation speed multiplier applied to wall-clock deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameSpeed {
    /// Simulation is frozen.
    Paused,
    /// Real-time simulation.
    #[default]
    Normal,
    /// Simulation runs twice as fast.
    Double,
    /// Simulation runs four times as fast.
    Quadruple,
}

impl GameSpeed {
    /// Multiplier applied to wall-clock deltas.
    #[must_use]
    pub const fn factor(self) -> u32 {
        match self {
            Self::Paused => 0,
            Self::Normal => 1,
            Self::Double => 2,
            Self::Quadruple => 4,
        }
    }

    /// Maps a numeric multiplier onto a supported speed.
    #[must_use]
    pub const fn from_factor(factor: u32) -> Option<Self> {
        match factor {
            0 => Some(Self::Paused),
            1 => Some(Self::Normal),
            2 => Some(Self::Double),
            4 => Some(Self::Quadruple),
            _ => None,
        }
    }

    /// Reports whether the simulation is frozen.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// No wave has started yet; difficulty may still change.
    #[default]
    Setup,
    /// Waves are being fought.
    Running,
    /// Base health reached zero.
    Defeat,
    /// Every wave was cleared.
    Victory,
}

impl MatchStatus {
    /// Reports whether the match reached a terminal state.
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Defeat | Self::Victory)
    }
}

/// Batch of identical enemies released one after another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnGroup {
    /// Kind of enemy the group spawns.
    pub kind: EnemyKind,
    /// Number of enemies in the group.
    pub count: u32,
    /// Delay before each spawn of the group.
    pub spawn_delay: Duration,
}

/// Generated composition of a single wave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavePlan {
    wave: WaveId,
    groups: Vec<SpawnGroup>,
}

impl WavePlan {
    /// Creates a plan for the provided wave, dropping empty groups.
    #[must_use]
    pub fn new(wave: WaveId, groups: Vec<SpawnGroup>) -> Self {
        let groups = groups.into_iter().filter(|group| group.count > 0).collect();
        Self { wave, groups }
    }

    /// Wave number the plan was generated for.
    #[must_use]
    pub const fn wave(&self) -> WaveId {
        self.wave
    }

    /// Spawn groups in release order.
    #[must_use]
    pub fn groups(&self) -> &[SpawnGroup] {
        &self.groups
    }

    /// Total number of enemies across all groups.
    #[must_use]
    pub fn total_enemies(&self) -> u32 {
        self.groups.iter().map(|group| group.count).sum()
    }

    /// Number of enemies of the provided kind.
    #[must_use]
    pub fn count_of(&self, kind: EnemyKind) -> u32 {
        self.groups
            .iter()
            .filter(|group| group.kind == kind)
            .map(|group| group.count)
            .sum()
    }

    /// Reports whether the plan spawns nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Target assignment computed for a single tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerTarget {
    /// Tower that holds the target.
    pub tower: TowerId,
    /// Enemy the tower aims at.
    pub enemy: EnemyId,
}

/// Immutable representation of a single live enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Interpolated position along the path.
    pub position: Vec2,
    /// Remaining health.
    pub health: u32,
    /// Health the enemy spawned with.
    pub max_health: u32,
    /// Index of the path segment the enemy walks.
    pub path_index: usize,
    /// Fractional progress along the current segment.
    pub path_progress: f32,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a live enemy by identifier.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemy is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell the tower occupies.
    pub cell: CellCoord,
    /// Center of the tower in world units.
    pub position: Vec2,
    /// Targeting radius in world units.
    pub range: f32,
    /// Enemy the tower aimed at after its last update.
    pub target: Option<EnemyId>,
    /// Money paid when the tower was placed.
    pub paid_cost: u32,
}

/// Read-only snapshot describing all towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a tower by identifier.
    #[must_use]
    pub fn get(&self, id: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of towers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no tower is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

}

/// Cooldown state of a single tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerCooldownSnapshot {
    /// Identifier of the tower.
    pub tower: TowerId,
    /// Kind of the tower.
    pub kind: TowerKind,
    /// Simulated time left until the tower may fire again.
    pub ready_in: Duration,
}

/// Read-only view of tower cooldowns sorted by tower identifier.
#[derive(Clone, Debug, Default)]
pub struct TowerCooldownView {
    snapshots: Vec<TowerCooldownSnapshot>,
}

impl TowerCooldownView {
    /// Creates a new cooldown view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerCooldownSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.tower);
        Self { snapshots }
    }

    /// Iterator over cooldown snapshots in tower order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerCooldownSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the cooldown of a tower by identifier.
    #[must_use]
    pub fn get(&self, tower: TowerId) -> Option<&TowerCooldownSnapshot> {
        self.snapshots
            .binary_search_by_key(&tower, |snapshot| snapshot.tower)
            .ok()
            .map(|index| &self.snapshots[index])
    }

}

/// Immutable representation of an in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Tower that fired the projectile.
    pub tower: TowerId,
    /// Enemy the projectile homes in on.
    pub target: EnemyId,
    /// Current position in world units.
    pub position: Vec2,
}

/// Read-only snapshot describing all active projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over active projectiles in launch order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of active projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no projectile is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The match already ended.
    #[error("the match is over")]
    MatchOver,
    /// The requested cell lies outside the playable grid.
    #[error("cell lies outside the playable area")]
    OutOfBounds,
    /// The player cannot pay the current price.
    #[error("not enough money")]
    InsufficientFunds,
    /// The cell center is too close to the enemy path.
    #[error("cell overlaps the enemy path")]
    PathObstructed,
    /// The cell is part of the current obstacle field.
    #[error("cell is blocked by an obstacle")]
    CellBlocked,
    /// The cell center is too close to an existing tower.
    #[error("cell is too close to another tower")]
    TooCloseToTower,
}

/// Reasons a wave start request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum WaveError {
    /// A wave is still spawning or has live enemies.
    #[error("a wave is already in progress")]
    WaveAlreadyActive,
    /// Every configured wave has been played.
    #[error("all waves have been completed")]
    AllWavesCompleted,
    /// Base health reached zero.
    #[error("the match is over")]
    MatchOver,
}

/// Reasons a tower sale may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SellError {
    /// No tower with the provided identifier exists.
    #[error("no such tower")]
    UnknownTower,
    /// The match already ended.
    #[error("the match is over")]
    MatchOver,
}

/// Reasons a difficulty change may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum DifficultyError {
    /// Difficulty is fixed once the first wave starts.
    #[error("difficulty can only change before the first wave")]
    MatchInProgress,
}

/// Reasons a match configuration may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The path needs at least two points.
    #[error("path needs at least two points, got {0}")]
    PathTooShort(usize),
    /// Two consecutive path points coincide.
    #[error("path segment {0} has zero length")]
    DegenerateSegment(usize),
    /// Cell size must be a positive, finite number.
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f32),
    /// The playable rectangle contains no whole cell.
    #[error("playable area contains no cells")]
    EmptyPlayableArea,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_center_sits_in_the_middle_of_the_cell() {
        let cell = CellCoord::new(1, 12);
        assert_eq!(cell.center(40.0), Vec2::new(60.0, 500.0));
    }

    #[test]
    fn wave_plan_drops_empty_groups() {
        let plan = WavePlan::new(
            WaveId::new(4),
            vec![
                SpawnGroup {
                    kind: EnemyKind::Basic,
                    count: 3,
                    spawn_delay: Duration::from_millis(500),
                },
                SpawnGroup {
                    kind: EnemyKind::Tank,
                    count: 0,
                    spawn_delay: Duration::from_millis(900),
                },
            ],
        );

        assert_eq!(plan.groups().len(), 1);
        assert_eq!(plan.total_enemies(), 3);
        assert_eq!(plan.count_of(EnemyKind::Tank), 0);
    }

    #[test]
    fn game_speed_factors_round_trip() {
        for speed in [
            GameSpeed::Paused,
            GameSpeed::Normal,
            GameSpeed::Double,
            GameSpeed::Quadruple,
        ] {
            assert_eq!(GameSpeed::from_factor(speed.factor()), Some(speed));
        }
        assert_eq!(GameSpeed::from_factor(3), None);
    }

    #[test]
    fn enemy_view_lookup_uses_identifier_order() {
        let snapshot = |id: u32| EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Basic,
            position: Vec2::ZERO,
            health: 30,
            max_health: 30,
            path_index: 0,
            path_progress: 0.0,
        };
        let view = EnemyView::from_snapshots(vec![snapshot(9), snapshot(2), snapshot(5)]);

        let ids: Vec<u32> = view.iter().map(|enemy| enemy.id.get()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
        assert!(view.get(EnemyId::new(5)).is_some());
        assert!(view.get(EnemyId::new(4)).is_none());
    }

    #[test]
    fn events_survive_binary_encoding() {
        let event = Event::TowerPlacementRejected {
            kind: TowerKind::Cannon,
            cell: CellCoord::new(3, 4),
            reason: PlacementError::CellBlocked,
        };
        let bytes = bincode::serialize(&event).expect("serialize");
        let restored: Event = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, event);
    }

    #[test]
    fn placement_errors_render_user_facing_messages() {
        assert_eq!(
            PlacementError::InsufficientFunds.to_string(),
            "not enough money"
        );
        assert_eq!(
            WaveError::WaveAlreadyActive.to_string(),
            "a wave is already in progress"
        );
    }
}
