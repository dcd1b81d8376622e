//! Authoritative tower state management utilities.

use std::{collections::BTreeMap, time::Duration};

use trail_defence_core::{
    CellCoord, EnemyId, TowerCooldownSnapshot, TowerId, TowerKind, TowerSnapshot, TowerStats,
    Vec2,
};

/// Snapshot of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell the tower snapped to.
    pub(crate) cell: CellCoord,
    /// Center of the tower in world units.
    pub(crate) position: Vec2,
    /// Stats captured at placement time.
    pub(crate) stats: TowerStats,
    /// Money paid for the tower.
    pub(crate) paid_cost: u32,
    /// Simulation time of the last shot; `None` until the first shot.
    pub(crate) last_fired: Option<Duration>,
    /// Enemy the tower currently aims at.
    pub(crate) target: Option<EnemyId>,
}

impl TowerState {
    /// Time left before the tower may fire again.
    ///
    /// `now` is the speed-scaled simulation clock, so the base fire period
    /// is the cooldown at every game speed.
    pub(crate) fn ready_in(&self, now: Duration) -> Duration {
        let Some(last_fired) = self.last_fired else {
            return Duration::ZERO;
        };
        self.stats
            .fire_period()
            .saturating_sub(now.saturating_sub(last_fired))
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            position: self.position,
            range: self.stats.range,
            target: self.target,
            paid_cost: self.paid_cost,
        }
    }

    pub(crate) fn cooldown(&self, now: Duration) -> TowerCooldownSnapshot {
        TowerCooldownSnapshot {
            tower: self.id,
            kind: self.kind,
            ready_in: self.ready_in(now),
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Stores a freshly placed tower and returns its identifier.
    pub(crate) fn insert(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
        position: Vec2,
        stats: TowerStats,
        paid_cost: u32,
    ) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                cell,
                position,
                stats,
                paid_cost,
                last_fired: None,
                target: None,
            },
        );
        id
    }

    pub(crate) fn remove(&mut self, id: TowerId) -> Option<TowerState> {
        self.entries.remove(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TowerState> {
        self.entries.values_mut()
    }

    /// Reports whether any tower center lies closer than `spacing` to `position`.
    pub(crate) fn any_within(&self, position: Vec2, spacing: f32) -> bool {
        self.entries
            .values()
            .any(|tower| tower.position.distance(position) < spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_stats() -> TowerStats {
        TowerStats {
            cost: 20,
            damage: 10,
            range: 100.0,
            fire_period_ms: 1000,
            projectile_speed: 200.0,
        }
    }

    #[test]
    fn registry_starts_empty_with_zero_identifier() {
        let registry = TowerRegistry::new();
        assert!(registry.entries.is_empty());
        assert_eq!(registry.next_tower_id.get(), 0);
    }

    #[test]
    fn identifiers_are_not_reused_after_removal() {
        let mut registry = TowerRegistry::new();
        let cell = CellCoord::new(1, 12);
        let first = registry.insert(TowerKind::Basic, cell, Vec2::ZERO, basic_stats(), 20);
        assert!(registry.remove(first).is_some());
        let second = registry.insert(TowerKind::Basic, cell, Vec2::ZERO, basic_stats(), 22);
        assert_ne!(first, second);
    }

    #[test]
    fn fresh_tower_is_ready_immediately() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(
            TowerKind::Basic,
            CellCoord::new(0, 2),
            Vec2::ZERO,
            basic_stats(),
            20,
        );
        let tower = registry.get_mut(id).expect("tower");
        assert_eq!(tower.ready_in(Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn cooldown_runs_on_the_simulation_clock() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(
            TowerKind::Basic,
            CellCoord::new(0, 2),
            Vec2::ZERO,
            basic_stats(),
            20,
        );
        let tower = registry.get_mut(id).expect("tower");
        tower.last_fired = Some(Duration::from_millis(1000));

        assert_eq!(
            tower.ready_in(Duration::from_millis(1200)),
            Duration::from_millis(800)
        );
        assert_eq!(
            tower.ready_in(Duration::from_millis(1999)),
            Duration::from_millis(1)
        );
        assert_eq!(tower.ready_in(Duration::from_millis(2000)), Duration::ZERO);
    }

    #[test]
    fn spacing_check_uses_tower_centers() {
        let mut registry = TowerRegistry::new();
        let _ = registry.insert(
            TowerKind::Laser,
            CellCoord::new(3, 3),
            Vec2::new(140.0, 140.0),
            basic_stats(),
            80,
        );
        assert!(registry.any_within(Vec2::new(160.0, 140.0), 30.0));
        assert!(!registry.any_within(Vec2::new(180.0, 140.0), 30.0));
    }
}
