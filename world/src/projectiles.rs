//! Homing projectiles launched by towers.

use std::{collections::BTreeMap, time::Duration};

use trail_defence_core::{EnemyId, ProjectileId, ProjectileSnapshot, TowerId, Vec2};

use crate::enemies::{DamageOutcome, EnemyRoster};

/// Rectangle outside of which projectiles are discarded.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Bounds {
    min: Vec2,
    max: Vec2,
}

impl Bounds {
    /// Field rectangle grown by `margin` on every side.
    pub(crate) fn expanded(width: f32, height: f32, margin: f32) -> Self {
        Self {
            min: Vec2::new(-margin, -margin),
            max: Vec2::new(width + margin, height + margin),
        }
    }

    fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// What happened to a projectile during a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ProjectileStep {
    /// Still travelling.
    InFlight,
    /// Reached its target and dealt damage.
    Hit {
        target: EnemyId,
        outcome: DamageOutcome,
    },
    /// Target vanished or died before impact.
    TargetLost,
    /// Left the field.
    OutOfBounds,
    /// Already inactive.
    Spent,
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    id: ProjectileId,
    tower: TowerId,
    target: EnemyId,
    damage: u32,
    speed: f32,
    position: Vec2,
    active: bool,
}

impl Projectile {
    /// Homes toward the target, applying damage on impact.
    ///
    /// The step never carries the projectile past its target.
    pub(crate) fn advance(
        &mut self,
        dt: Duration,
        enemies: &mut EnemyRoster,
        hit_radius: f32,
        bounds: Bounds,
    ) -> ProjectileStep {
        if !self.active {
            return ProjectileStep::Spent;
        }

        let Some(enemy) = enemies.get_mut(self.target).filter(|enemy| enemy.is_alive()) else {
            self.active = false;
            return ProjectileStep::TargetLost;
        };

        let goal = enemy.position();
        let offset = goal - self.position;
        let distance = offset.length();
        let travel = (self.speed * dt.as_secs_f32()).min(distance);
        self.position += offset.normalize_or_zero() * travel;

        if self.position.distance(goal) < hit_radius {
            self.active = false;
            return ProjectileStep::Hit {
                target: self.target,
                outcome: enemy.apply_damage(self.damage),
            };
        }

        if !bounds.contains(self.position) {
            self.active = false;
            return ProjectileStep::OutOfBounds;
        }

        ProjectileStep::InFlight
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            tower: self.tower,
            target: self.target,
            position: self.position,
        }
    }
}

/// Active projectiles in launch order.
#[derive(Debug)]
pub(crate) struct ProjectileSet {
    entries: BTreeMap<ProjectileId, Projectile>,
    next_projectile_id: ProjectileId,
}

impl ProjectileSet {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    pub(crate) fn launch(
        &mut self,
        tower: TowerId,
        target: EnemyId,
        origin: Vec2,
        damage: u32,
        speed: f32,
    ) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            Projectile {
                id,
                tower,
                target,
                damage,
                speed,
                position: origin,
                active: true,
            },
        );
        id
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.entries.values_mut()
    }

    pub(crate) fn remove_inactive(&mut self) {
        self.entries.retain(|_, projectile| projectile.active);
    }
}
