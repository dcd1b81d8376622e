#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Match orchestrator for Trail Defence.
//!
//! [`Simulation`] owns the authoritative [`World`] together with the pure
//! systems and drives them in a fixed phase order every tick:
//!
//! 1. advance the clock, resolve due timers and move enemies,
//! 2. start the next wave when the auto-advance timer elapsed,
//! 3. assign tower targets from the live enemies,
//! 4. fire every ready tower that holds a target,
//! 5. move projectiles and apply hits,
//! 6. settle rewards, leak penalties and wave completion.
//!
//! Events produced along the way accumulate in an outbox that presentation
//! layers empty with [`Simulation::drain_events`].

use std::{mem, time::Duration};

use trail_defence_core::{
    CellCoord, Command, ConfigError, Difficulty, DifficultyError, EnemyView, Event, GameSpeed,
    MatchConfig, MatchStatus, PlacementError, ProjectileView, SellError, TowerId, TowerKind,
    TowerTarget, TowerView, WaveError, WaveId,
};
use trail_defence_system_tower_combat::TowerCombat;
use trail_defence_system_tower_targeting::TowerTargeting;
use trail_defence_system_wave_generation::WaveGeneration;
use trail_defence_world::{self as world, query, World};

/// A single match wired to its systems.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    speed: GameSpeed,
    wave_generation: WaveGeneration,
    targeting: TowerTargeting,
    combat: TowerCombat,
    outbox: Vec<Event>,
    targets: Vec<TowerTarget>,
    commands: Vec<Command>,
}

impl Simulation {
    /// Builds a match in the setup phase.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configured geometry is unusable.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        let blocked = u32::try_from(query::blocked_cells(&world).len()).unwrap_or(u32::MAX);
        tracing::debug!(blocked, difficulty = ?query::difficulty(&world), "match created");

        Ok(Self {
            world,
            speed: GameSpeed::Normal,
            wave_generation: WaveGeneration::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            outbox: vec![Event::ObstaclesUpdated { blocked }],
            targets: Vec::new(),
            commands: Vec::new(),
        })
    }

    /// Advances the match by `dt` of wall-clock time scaled by the current speed.
    ///
    /// Paused matches and matches that are not running do not advance, and
    /// missed time is never caught up later.
    pub fn tick(&mut self, dt: Duration) {
        if self.speed.is_paused() || query::status(&self.world) != MatchStatus::Running {
            return;
        }
        let dt = dt.saturating_mul(self.speed.factor());

        let start = self.dispatch(Command::Tick { dt });
        let wave_due = self.outbox[start..]
            .iter()
            .any(|event| matches!(event, Event::NextWaveDue));
        if wave_due {
            match self.start_next_wave() {
                Ok(wave) => tracing::debug!(wave = wave.get(), "wave auto-started"),
                Err(reason) => tracing::debug!(%reason, "auto-start skipped"),
            }
        }

        let status = query::status(&self.world);
        self.targeting.handle(
            status,
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &mut self.targets,
        );
        let _ = self.dispatch(Command::AssignTargets {
            targets: self.targets.clone(),
        });

        self.combat.handle(
            status,
            query::tower_cooldown_view(&self.world),
            &self.targets,
            &mut self.commands,
        );
        for command in mem::take(&mut self.commands) {
            let _ = self.dispatch(command);
        }

        let _ = self.dispatch(Command::AdvanceProjectiles { dt });
        let _ = self.dispatch(Command::Settle);
    }

    /// Places a tower of `kind` on `cell`, paying the current dynamic price.
    ///
    /// # Errors
    ///
    /// Returns the first failed placement check.
    pub fn place_tower(&mut self, cell: CellCoord, kind: TowerKind) -> Result<TowerId, PlacementError> {
        let start = self.dispatch(Command::PlaceTower { kind, cell });
        self.outbox[start..]
            .iter()
            .find_map(|event| match event {
                Event::TowerPlaced { tower, .. } => Some(Ok(*tower)),
                Event::TowerPlacementRejected { reason, .. } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(PlacementError::MatchOver))
    }

    /// Sells a tower, returning the refunded amount.
    ///
    /// # Errors
    ///
    /// Returns [`SellError::UnknownTower`] when no such tower exists.
    pub fn sell_tower(&mut self, tower: TowerId) -> Result<u32, SellError> {
        let start = self.dispatch(Command::SellTower { tower });
        self.outbox[start..]
            .iter()
            .find_map(|event| match event {
                Event::TowerSold { refund, .. } => Some(Ok(*refund)),
                Event::TowerSaleRejected { reason, .. } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(SellError::UnknownTower))
    }

    /// Generates and starts the next wave.
    ///
    /// # Errors
    ///
    /// Returns why the wave could not start. Requesting a wave after the
    /// final one ends the match in victory and reports
    /// [`WaveError::AllWavesCompleted`].
    pub fn start_next_wave(&mut self) -> Result<WaveId, WaveError> {
        let wave = query::current_wave(&self.world).next();
        let plan = self.wave_generation.plan(
            wave,
            query::modifiers(&self.world),
            &query::config(&self.world).waves,
        );

        let start = self.dispatch(Command::StartWave { plan });
        self.outbox[start..]
            .iter()
            .find_map(|event| match event {
                Event::WaveStarted { wave, .. } => Some(Ok(*wave)),
                Event::WaveStartRejected { reason } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(WaveError::WaveAlreadyActive))
    }

    /// Boolean form of [`Simulation::start_next_wave`].
    pub fn request_next_wave(&mut self) -> bool {
        self.start_next_wave().is_ok()
    }

    /// Changes the simulation speed multiplier.
    pub fn set_speed(&mut self, speed: GameSpeed) {
        tracing::debug!(factor = speed.factor(), "speed changed");
        self.speed = speed;
    }

    /// Selects the difficulty for the match.
    ///
    /// # Errors
    ///
    /// Returns [`DifficultyError::MatchInProgress`] once the first wave started.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), DifficultyError> {
        let start = self.dispatch(Command::SetDifficulty { difficulty });
        self.outbox[start..]
            .iter()
            .find_map(|event| match event {
                Event::DifficultyChanged { .. } => Some(Ok(())),
                Event::DifficultyChangeRejected { reason } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(DifficultyError::MatchInProgress))
    }

    /// Cancels every timer and rebuilds the match from its configuration.
    ///
    /// The selected difficulty and the speed multiplier are kept.
    pub fn restart(&mut self) {
        let _ = self.dispatch(Command::Restart);
    }

    /// Removes and returns every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.outbox)
    }

    /// Remaining base health.
    #[must_use]
    pub fn health(&self) -> u32 {
        query::health(&self.world)
    }

    /// Money available to the player.
    #[must_use]
    pub fn money(&self) -> u32 {
        query::money(&self.world)
    }

    /// Number of the most recently started wave; zero before the first.
    #[must_use]
    pub fn current_wave(&self) -> WaveId {
        query::current_wave(&self.world)
    }

    /// Lifecycle state of the match.
    #[must_use]
    pub fn status(&self) -> MatchStatus {
        query::status(&self.world)
    }

    /// Current speed multiplier.
    #[must_use]
    pub fn speed(&self) -> GameSpeed {
        self.speed
    }

    /// Difficulty in effect.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        query::difficulty(&self.world)
    }

    /// Live enemies in spawn order.
    #[must_use]
    pub fn enemies(&self) -> EnemyView {
        query::enemy_view(&self.world)
    }

    /// Placed towers in identifier order.
    #[must_use]
    pub fn towers(&self) -> TowerView {
        query::tower_view(&self.world)
    }

    /// Projectiles in flight.
    #[must_use]
    pub fn projectiles(&self) -> ProjectileView {
        query::projectile_view(&self.world)
    }

    /// Cells currently blocked by obstacles.
    #[must_use]
    pub fn blocked_cells(&self) -> Vec<CellCoord> {
        query::blocked_cells(&self.world)
    }

    /// Current price of a tower kind.
    #[must_use]
    pub fn tower_cost(&self, kind: TowerKind) -> u32 {
        query::tower_cost(&self.world, kind)
    }

    /// Reports whether a wave is spawning or still has live enemies.
    #[must_use]
    pub fn is_wave_active(&self) -> bool {
        query::is_wave_active(&self.world)
    }

    /// Simulation time accumulated from scaled ticks.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        query::elapsed(&self.world)
    }

    /// Read-only access to the underlying world for detailed queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Applies a command and returns the outbox index of its first event.
    fn dispatch(&mut self, command: Command) -> usize {
        let start = self.outbox.len();
        world::apply(&mut self.world, command, &mut self.outbox);
        start
    }
}
