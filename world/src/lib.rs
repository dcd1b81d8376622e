#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Trail Defence.
//!
//! The world owns every piece of mutable match state: the enemy table,
//! placed towers, projectiles in flight, the economy, the obstacle field and
//! the timer queue driving the wave lifecycle. It is mutated exclusively via
//! [`apply`] and observed through the read-only [`query`] module.

mod economy;
mod enemies;
mod geometry;
mod obstacles;
mod projectiles;
mod scheduler;
mod towers;
mod waves;

use std::{mem, time::Duration};

use trail_defence_core::{
    CellCoord, Command, ConfigError, Difficulty, DifficultyError, EnemyId, EnemyKind, Event,
    MatchConfig, MatchStatus, PlacementError, SellError, TowerId, TowerKind, TowerTarget,
    WaveError, WavePlan,
};

use crate::{
    economy::{scale_down, Economy},
    enemies::EnemyRoster,
    geometry::{Grid, Path},
    obstacles::{blocked_fraction, ObstacleField},
    projectiles::{Bounds, ProjectileSet, ProjectileStep},
    scheduler::{Scheduler, Task},
    towers::TowerRegistry,
    waves::WaveState,
};

/// Reward or penalty recorded during a tick and resolved by [`Command::Settle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Settlement {
    Killed(EnemyId),
    Leaked(EnemyId),
}

/// Represents the authoritative Trail Defence world state.
#[derive(Debug)]
pub struct World {
    config: MatchConfig,
    path: Path,
    grid: Grid,
    bounds: Bounds,
    obstacles: ObstacleField,
    enemies: EnemyRoster,
    towers: TowerRegistry,
    projectiles: ProjectileSet,
    economy: Economy,
    scheduler: Scheduler,
    waves: WaveState,
    status: MatchStatus,
    clock: Duration,
    pending: Vec<Settlement>,
}

impl World {
    /// Creates a new world in the setup phase from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the path or grid geometry is unusable.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        let path = Path::new(config.path.clone())?;
        let grid = Grid::new(&config.field)?;
        let obstacles = ObstacleField::new(
            &grid,
            &path,
            config.field.path_exclusion_radius(),
            config.obstacle_seed,
        );
        let bounds = Bounds::expanded(
            config.field.width,
            config.field.height,
            config.field.offscreen_margin,
        );

        let mut world = Self {
            economy: Economy::new(&config.economy),
            path,
            grid,
            bounds,
            obstacles,
            enemies: EnemyRoster::new(),
            towers: TowerRegistry::new(),
            projectiles: ProjectileSet::new(),
            scheduler: Scheduler::new(),
            waves: WaveState::default(),
            status: MatchStatus::Setup,
            clock: Duration::ZERO,
            pending: Vec::new(),
            config,
        };
        let _ = world.refresh_obstacles();
        Ok(world)
    }

    fn refresh_obstacles(&mut self) -> u32 {
        let fraction = blocked_fraction(
            self.waves.current(),
            self.config.field.initial_blocked_fraction,
            self.config.modifiers().obstacle_clear_rate,
        );
        self.obstacles.update(fraction)
    }

    fn tower_cost(&self, kind: TowerKind) -> u32 {
        self.economy.price(
            kind,
            self.config.towers.get(kind).cost,
            self.config.modifiers().price_growth,
        )
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, out_events: &mut Vec<Event>) -> EnemyId {
        let stats = self.config.enemies.get(kind);
        let enemy = self.enemies.spawn(kind, stats, &self.path);
        tracing::trace!(enemy = enemy.get(), ?kind, "enemy spawned");
        out_events.push(Event::EnemySpawned { enemy, kind });
        enemy
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.status != MatchStatus::Running {
            return;
        }

        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        let mut fresh: Vec<(EnemyId, Duration)> = Vec::new();
        while let Some((due, task)) = self.scheduler.pop_due(self.clock) {
            match task {
                Task::Spawn => {
                    if let Some(kind) = self.waves.release(due, &mut self.scheduler) {
                        let enemy = self.spawn_enemy(kind, out_events);
                        fresh.push((enemy, self.clock.saturating_sub(due)));
                    }
                }
                Task::WaveReady => {
                    out_events.push(Event::WaveReady);
                    let auto_start = self
                        .config
                        .waves
                        .auto_advance
                        .then(|| self.config.waves.auto_start());
                    self.waves.ready(due, auto_start, &mut self.scheduler);
                }
                Task::AutoStart => {
                    self.waves.auto_start_fired();
                    out_events.push(Event::NextWaveDue);
                }
            }
        }

        for enemy in self.enemies.iter_mut() {
            let step = fresh
                .binary_search_by_key(&enemy.id(), |(id, _)| *id)
                .map_or(dt, |index| fresh[index].1);
            if enemy.advance(step, &self.path) {
                self.pending.push(Settlement::Leaked(enemy.id()));
            }
        }

        self.check_wave_completion(out_events);
    }

    fn start_wave(&mut self, plan: WavePlan, out_events: &mut Vec<Event>) {
        match self.admit_wave(out_events) {
            Ok(()) => {
                self.waves.begin(plan.clone(), self.clock, &mut self.scheduler);
                self.status = MatchStatus::Running;
                let blocked = self.refresh_obstacles();
                out_events.push(Event::ObstaclesUpdated { blocked });
                let wave = self.waves.current();
                tracing::info!(
                    wave = wave.get(),
                    enemies = plan.total_enemies(),
                    blocked,
                    "wave started"
                );
                out_events.push(Event::WaveStarted { wave, plan });
            }
            Err(reason) => {
                tracing::debug!(%reason, "wave start rejected");
                out_events.push(Event::WaveStartRejected { reason });
            }
        }
    }

    fn admit_wave(&mut self, out_events: &mut Vec<Event>) -> Result<(), WaveError> {
        match self.status {
            MatchStatus::Defeat => return Err(WaveError::MatchOver),
            MatchStatus::Victory => return Err(WaveError::AllWavesCompleted),
            MatchStatus::Setup | MatchStatus::Running => {}
        }

        if self.waves.in_progress() || self.waves.is_spawning() || !self.enemies.is_empty() {
            return Err(WaveError::WaveAlreadyActive);
        }

        let waves = self.waves.current().get();
        if waves >= self.config.waves.max_waves {
            self.status = MatchStatus::Victory;
            self.waves.halt(&mut self.scheduler);
            tracing::info!(waves, "all waves completed");
            out_events.push(Event::AllWavesCompleted { waves });
            return Err(WaveError::AllWavesCompleted);
        }

        Ok(())
    }

    fn check_wave_completion(&mut self, out_events: &mut Vec<Event>) {
        if self.status != MatchStatus::Running
            || !self.waves.in_progress()
            || self.waves.is_spawning()
            || !self.enemies.is_empty()
        {
            return;
        }

        let preparation = self.config.waves.preparation();
        self.waves
            .complete(self.clock, preparation, &mut self.scheduler);
        let wave = self.waves.current();
        tracing::info!(wave = wave.get(), "wave completed");
        out_events.push(Event::WaveCompleted { wave });
        out_events.push(Event::WavePreparation {
            duration: preparation,
        });
    }

    fn assign_targets(&mut self, targets: &[TowerTarget]) {
        for tower in self.towers.iter_mut() {
            tower.target = None;
        }
        for assignment in targets {
            if !self.enemies.is_alive(assignment.enemy) {
                continue;
            }
            if let Some(tower) = self.towers.get_mut(assignment.tower) {
                tower.target = Some(assignment.enemy);
            }
        }
    }

    fn fire(&mut self, tower: TowerId, target: EnemyId, out_events: &mut Vec<Event>) {
        if self.status != MatchStatus::Running || !self.enemies.is_alive(target) {
            return;
        }
        let Some(state) = self.towers.get_mut(tower) else {
            return;
        };

        let projectile = self.projectiles.launch(
            tower,
            target,
            state.position,
            state.stats.damage,
            state.stats.projectile_speed,
        );
        state.last_fired = Some(self.clock);
        out_events.push(Event::ProjectileFired {
            projectile,
            tower,
            target,
        });
    }

    fn advance_projectiles(&mut self, dt: Duration) {
        if self.status != MatchStatus::Running {
            return;
        }

        let hit_radius = self.config.combat.hit_radius;
        for projectile in self.projectiles.iter_mut() {
            let step = projectile.advance(dt, &mut self.enemies, hit_radius, self.bounds);
            if let ProjectileStep::Hit { target, outcome } = step {
                tracing::trace!(
                    enemy = target.get(),
                    alive = outcome.alive,
                    "projectile hit"
                );
                if outcome.just_died {
                    self.pending.push(Settlement::Killed(target));
                }
            }
        }
        self.projectiles.remove_inactive();
    }

    fn settle(&mut self, out_events: &mut Vec<Event>) {
        let reward_multiplier = self.config.modifiers().reward_multiplier;
        for settlement in mem::take(&mut self.pending) {
            match settlement {
                Settlement::Killed(enemy) => {
                    let reward = if self.status == MatchStatus::Defeat {
                        0
                    } else {
                        let base = self.enemies.get(enemy).map_or(0, |enemy| enemy.reward());
                        scale_down(base, reward_multiplier)
                    };
                    self.economy.earn(reward);
                    out_events.push(Event::EnemyKilled { enemy, reward });
                }
                Settlement::Leaked(enemy) => {
                    let damage = self.config.economy.leak_damage;
                    out_events.push(Event::EnemyReachedEnd { enemy, damage });
                    if self.status == MatchStatus::Running && self.economy.take_damage(damage) {
                        self.status = MatchStatus::Defeat;
                        self.waves.halt(&mut self.scheduler);
                        self.scheduler.cancel_all();
                        tracing::info!(wave = self.waves.current().get(), "game over");
                        out_events.push(Event::GameOver);
                    }
                }
            }
        }

        self.enemies.remove_inactive();
        for tower in self.towers.iter_mut() {
            if tower
                .target
                .is_some_and(|target| !self.enemies.is_alive(target))
            {
                tower.target = None;
            }
        }

        self.check_wave_completion(out_events);
    }

    fn place_tower(&mut self, kind: TowerKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        match self.validate_placement(kind, cell) {
            Ok(cost) => {
                if !self.economy.try_purchase(kind, cost) {
                    out_events.push(Event::TowerPlacementRejected {
                        kind,
                        cell,
                        reason: PlacementError::InsufficientFunds,
                    });
                    return;
                }
                let position = self.grid.center(cell);
                let stats = self.config.towers.get(kind);
                let tower = self.towers.insert(kind, cell, position, stats, cost);
                tracing::info!(
                    tower = tower.get(),
                    ?kind,
                    column = cell.column(),
                    row = cell.row(),
                    cost,
                    "tower placed"
                );
                out_events.push(Event::TowerPlaced {
                    tower,
                    kind,
                    cell,
                    cost,
                });
            }
            Err(reason) => {
                tracing::debug!(?kind, column = cell.column(), row = cell.row(), %reason, "placement rejected");
                out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
            }
        }
    }

    fn validate_placement(&self, kind: TowerKind, cell: CellCoord) -> Result<u32, PlacementError> {
        if self.status.is_over() {
            return Err(PlacementError::MatchOver);
        }
        if !self.grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }

        let cost = self.tower_cost(kind);
        if self.economy.money() < cost {
            return Err(PlacementError::InsufficientFunds);
        }

        let center = self.grid.center(cell);
        if self.path.distance_to(center) < self.config.field.path_exclusion_radius() {
            return Err(PlacementError::PathObstructed);
        }
        if self.obstacles.is_blocked(cell) {
            return Err(PlacementError::CellBlocked);
        }
        if self
            .towers
            .any_within(center, self.config.field.min_tower_spacing)
        {
            return Err(PlacementError::TooCloseToTower);
        }

        Ok(cost)
    }

    fn sell_tower(&mut self, tower: TowerId, out_events: &mut Vec<Event>) {
        if self.status.is_over() {
            out_events.push(Event::TowerSaleRejected {
                tower,
                reason: SellError::MatchOver,
            });
            return;
        }
        let Some(state) = self.towers.remove(tower) else {
            out_events.push(Event::TowerSaleRejected {
                tower,
                reason: SellError::UnknownTower,
            });
            return;
        };

        let refund = scale_down(state.paid_cost, self.config.economy.refund_ratio);
        self.economy.earn(refund);
        tracing::info!(tower = tower.get(), refund, "tower sold");
        out_events.push(Event::TowerSold { tower, refund });
    }

    fn set_difficulty(&mut self, difficulty: Difficulty, out_events: &mut Vec<Event>) {
        if self.status != MatchStatus::Setup {
            out_events.push(Event::DifficultyChangeRejected {
                reason: DifficultyError::MatchInProgress,
            });
            return;
        }

        self.config.difficulty = difficulty;
        let blocked = self.refresh_obstacles();
        tracing::info!(?difficulty, "difficulty changed");
        out_events.push(Event::DifficultyChanged { difficulty });
        out_events.push(Event::ObstaclesUpdated { blocked });
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.scheduler.cancel_all();
        self.waves = WaveState::default();
        self.enemies = EnemyRoster::new();
        self.towers = TowerRegistry::new();
        self.projectiles = ProjectileSet::new();
        self.economy = Economy::new(&self.config.economy);
        self.status = MatchStatus::Setup;
        self.clock = Duration::ZERO;
        self.pending.clear();
        let blocked = self.refresh_obstacles();
        tracing::info!(difficulty = ?self.config.difficulty, "match restarted");
        out_events.push(Event::MatchRestarted);
        out_events.push(Event::ObstaclesUpdated { blocked });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::StartWave { plan } => world.start_wave(plan, out_events),
        Command::AssignTargets { targets } => world.assign_targets(&targets),
        Command::FireProjectile { tower, target } => world.fire(tower, target, out_events),
        Command::AdvanceProjectiles { dt } => world.advance_projectiles(dt),
        Command::Settle => world.settle(out_events),
        Command::PlaceTower { kind, cell } => world.place_tower(kind, cell, out_events),
        Command::SellTower { tower } => world.sell_tower(tower, out_events),
        Command::SetDifficulty { difficulty } => world.set_difficulty(difficulty, out_events),
        Command::Restart => world.restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use trail_defence_core::{
        CellCoord, Difficulty, DifficultyModifiers, EnemyView, MatchConfig, MatchStatus,
        ProjectileView, TowerCooldownView, TowerKind, TowerView, WaveId,
    };

    /// Lifecycle state of the match.
    #[must_use]
    pub fn status(world: &World) -> MatchStatus {
        world.status
    }

    /// Simulation time accumulated from scaled ticks.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.clock
    }

    /// Money available to the player.
    #[must_use]
    pub fn money(world: &World) -> u32 {
        world.economy.money()
    }

    /// Remaining base health.
    #[must_use]
    pub fn health(world: &World) -> u32 {
        world.economy.health()
    }

    /// Number of the most recently started wave; zero before the first.
    #[must_use]
    pub fn current_wave(world: &World) -> WaveId {
        world.waves.current()
    }

    /// Reports whether a wave is spawning or still has live enemies.
    #[must_use]
    pub fn is_wave_active(world: &World) -> bool {
        world.waves.in_progress() || world.waves.is_spawning()
    }

    /// Difficulty currently in effect.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.config.difficulty
    }

    /// Scaling factors of the difficulty currently in effect.
    #[must_use]
    pub fn modifiers(world: &World) -> DifficultyModifiers {
        world.config.modifiers()
    }

    /// Configuration the world was built from, including the active difficulty.
    #[must_use]
    pub fn config(world: &World) -> &MatchConfig {
        &world.config
    }

    /// Current price of the provided tower kind.
    #[must_use]
    pub fn tower_cost(world: &World, kind: TowerKind) -> u32 {
        world.tower_cost(kind)
    }

    /// Cells currently blocked by obstacles, in ascending order.
    #[must_use]
    pub fn blocked_cells(world: &World) -> Vec<CellCoord> {
        world.obstacles.blocked_cells().collect()
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(world: &World) -> usize {
        world.scheduler.len()
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .filter(|enemy| enemy.is_alive())
                .map(|enemy| enemy.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures tower cooldowns against the simulation clock.
    #[must_use]
    pub fn tower_cooldown_view(world: &World) -> TowerCooldownView {
        TowerCooldownView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| tower.cooldown(world.clock))
                .collect(),
        )
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_defence_core::{SpawnGroup, WaveId};

    fn open_config() -> MatchConfig {
        let mut config = MatchConfig::default();
        config.field.initial_blocked_fraction = 0.0;
        config
    }

    fn single_basic_plan() -> WavePlan {
        WavePlan::new(
            WaveId::new(1),
            vec![SpawnGroup {
                kind: EnemyKind::Basic,
                count: 1,
                spawn_delay: Duration::from_millis(800),
            }],
        )
    }

    #[test]
    fn new_world_rejects_short_paths() {
        let config = MatchConfig {
            path: Vec::new(),
            ..MatchConfig::default()
        };
        assert_eq!(World::new(config).err(), Some(ConfigError::PathTooShort(0)));
    }

    #[test]
    fn placement_checks_run_in_order() {
        let mut world = World::new(open_config()).expect("world");
        let mut events = Vec::new();

        for (cell, expected) in [
            (CellCoord::new(0, 0), PlacementError::OutOfBounds),
            (CellCoord::new(3, 11), PlacementError::PathObstructed),
        ] {
            apply(
                &mut world,
                Command::PlaceTower {
                    kind: TowerKind::Basic,
                    cell,
                },
                &mut events,
            );
            assert_eq!(
                events.pop(),
                Some(Event::TowerPlacementRejected {
                    kind: TowerKind::Basic,
                    cell,
                    reason: expected,
                })
            );
        }

        apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::Laser,
                cell: CellCoord::new(1, 12),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::Basic,
                cell: CellCoord::new(1, 12),
            },
            &mut events,
        );
        assert_eq!(
            events.pop(),
            Some(Event::TowerPlacementRejected {
                kind: TowerKind::Basic,
                cell: CellCoord::new(1, 12),
                reason: PlacementError::TooCloseToTower,
            })
        );

        apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::Cannon,
                cell: CellCoord::new(20, 3),
            },
            &mut events,
        );
        assert_eq!(
            events.pop(),
            Some(Event::TowerPlacementRejected {
                kind: TowerKind::Cannon,
                cell: CellCoord::new(20, 3),
                reason: PlacementError::InsufficientFunds,
            })
        );
        assert_eq!(query::money(&world), 20);
    }

    #[test]
    fn blocked_cells_reject_placement() {
        let mut config = MatchConfig::default();
        config.field.initial_blocked_fraction = 1.0;
        let mut world = World::new(config).expect("world");
        let blocked = query::blocked_cells(&world);
        let cell = *blocked.first().expect("blocked cell");

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::Basic,
                cell,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::TowerPlacementRejected {
                kind: TowerKind::Basic,
                cell,
                reason: PlacementError::CellBlocked,
            }]
        );
    }

    #[test]
    fn ticks_do_nothing_before_the_first_wave() {
        let mut world = World::new(open_config()).expect("world");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(5),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::elapsed(&world), Duration::ZERO);
    }

    #[test]
    fn enemies_enter_only_through_spawn_timers() {
        let mut world = World::new(open_config()).expect("world");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::Basic,
                cell: CellCoord::new(1, 12),
            },
            &mut events,
        );
        apply(&mut world, Command::Settle, &mut events);
        assert!(query::enemy_view(&world).is_empty());

        apply(
            &mut world,
            Command::StartWave {
                plan: single_basic_plan(),
            },
            &mut events,
        );
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::WaveStarted { .. })));
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(700),
            },
            &mut events,
        );
        assert!(query::enemy_view(&world).is_empty());

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
            &mut events,
        );
        assert_eq!(query::enemy_view(&world).len(), 1);
    }

    #[test]
    fn second_start_is_rejected_while_wave_runs() {
        let mut world = World::new(open_config()).expect("world");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StartWave {
                plan: single_basic_plan(),
            },
            &mut events,
        );
        assert_eq!(query::status(&world), MatchStatus::Running);
        assert!(query::is_wave_active(&world));

        events.clear();
        apply(
            &mut world,
            Command::StartWave {
                plan: single_basic_plan(),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::WaveStartRejected {
                reason: WaveError::WaveAlreadyActive
            }]
        );
        assert_eq!(query::current_wave(&world), WaveId::new(1));
    }

    #[test]
    fn difficulty_is_locked_once_running() {
        let mut world = World::new(open_config()).expect("world");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetDifficulty {
                difficulty: Difficulty::Hard,
            },
            &mut events,
        );
        assert_eq!(query::difficulty(&world), Difficulty::Hard);

        apply(
            &mut world,
            Command::StartWave {
                plan: single_basic_plan(),
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::SetDifficulty {
                difficulty: Difficulty::Easy,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::DifficultyChangeRejected {
                reason: DifficultyError::MatchInProgress
            }]
        );
        assert_eq!(query::difficulty(&world), Difficulty::Hard);
    }

    #[test]
    fn restart_clears_timers_and_state() {
        let mut world = World::new(open_config()).expect("world");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::Basic,
                cell: CellCoord::new(1, 12),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::StartWave {
                plan: single_basic_plan(),
            },
            &mut events,
        );
        assert_eq!(query::pending_timers(&world), 1);

        events.clear();
        apply(&mut world, Command::Restart, &mut events);
        assert_eq!(events.first(), Some(&Event::MatchRestarted));
        assert_eq!(query::pending_timers(&world), 0);
        assert_eq!(query::status(&world), MatchStatus::Setup);
        assert_eq!(query::money(&world), 100);
        assert!(query::tower_view(&world).is_empty());
        assert_eq!(query::current_wave(&world), WaveId::new(0));
    }
}
