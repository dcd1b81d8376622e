//! Enemy state and the spawn-ordered enemy table.

use std::{collections::BTreeMap, time::Duration};

use trail_defence_core::{EnemyId, EnemyKind, EnemySnapshot, EnemyStats, Vec2};

use crate::geometry::Path;

/// Result of applying damage to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DamageOutcome {
    /// Whether the enemy is still alive after the hit.
    pub(crate) alive: bool,
    /// Whether this hit is the one that killed the enemy.
    pub(crate) just_died: bool,
}

/// Enemy walking the path.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    health: u32,
    max_health: u32,
    speed: f32,
    reward: u32,
    position: Vec2,
    path_index: usize,
    path_progress: f32,
    alive: bool,
}

impl Enemy {
    fn spawn(id: EnemyId, kind: EnemyKind, stats: EnemyStats, path: &Path) -> Self {
        Self {
            id,
            kind,
            health: stats.max_health,
            max_health: stats.max_health,
            speed: stats.speed,
            reward: stats.reward,
            position: path.start(),
            path_index: 0,
            path_progress: 0.0,
            alive: true,
        }
    }

    pub(crate) fn id(&self) -> EnemyId {
        self.id
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn reward(&self) -> u32 {
        self.reward
    }

    /// Moves the enemy along the path.
    ///
    /// Returns `true` exactly once, on the call that carries the enemy off
    /// the end of the path. Overflow past a segment end is discarded.
    pub(crate) fn advance(&mut self, dt: Duration, path: &Path) -> bool {
        if !self.alive {
            return false;
        }
        if self.path_index >= path.last_index() {
            return self.exit(path);
        }

        let travelled = self.speed * dt.as_secs_f32();
        self.path_progress += travelled / path.segment_length(self.path_index);
        if self.path_progress >= 1.0 {
            self.path_index += 1;
            self.path_progress = 0.0;
            if self.path_index >= path.last_index() {
                return self.exit(path);
            }
        }

        self.position = path.interpolate(self.path_index, self.path_progress);
        false
    }

    fn exit(&mut self, path: &Path) -> bool {
        self.position = path.end();
        self.alive = false;
        true
    }

    /// Removes health; damage to a dead enemy is ignored.
    pub(crate) fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome {
                alive: false,
                just_died: false,
            };
        }

        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
            return DamageOutcome {
                alive: false,
                just_died: true,
            };
        }

        DamageOutcome {
            alive: true,
            just_died: false,
        }
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            health: self.health,
            max_health: self.max_health,
            path_index: self.path_index,
            path_progress: self.path_progress,
        }
    }
}

/// Table of enemies keyed by identifier; iteration follows spawn order.
#[derive(Debug)]
pub(crate) struct EnemyRoster {
    entries: BTreeMap<EnemyId, Enemy>,
    next_enemy_id: EnemyId,
}

impl EnemyRoster {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_enemy_id: EnemyId::new(0),
        }
    }

    /// Places a new enemy at the start of the path.
    pub(crate) fn spawn(&mut self, kind: EnemyKind, stats: EnemyStats, path: &Path) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(id, Enemy::spawn(id, kind, stats, path));
        id
    }

    pub(crate) fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn is_alive(&self, id: EnemyId) -> bool {
        self.get(id).is_some_and(Enemy::is_alive)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.entries.values_mut()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every enemy that died or left the field.
    pub(crate) fn remove_inactive(&mut self) {
        self.entries.retain(|_, enemy| enemy.alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> Path {
        Path::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
        ])
        .expect("path")
    }

    fn basic() -> EnemyStats {
        EnemyStats {
            max_health: 30,
            speed: 50.0,
            reward: 10,
            size: 15.0,
        }
    }

    #[test]
    fn damage_kills_exactly_once() {
        let path = straight_path();
        let mut roster = EnemyRoster::new();
        let id = roster.spawn(EnemyKind::Basic, basic(), &path);
        let enemy = roster.get_mut(id).expect("enemy");

        let first = enemy.apply_damage(10);
        assert_eq!(
            first,
            DamageOutcome {
                alive: true,
                just_died: false
            }
        );
        let lethal = enemy.apply_damage(25);
        assert!(lethal.just_died);
        assert_eq!(enemy.snapshot().health, 0);

        let again = enemy.apply_damage(5);
        assert_eq!(
            again,
            DamageOutcome {
                alive: false,
                just_died: false
            }
        );
    }

    #[test]
    fn advance_interpolates_within_a_segment() {
        let path = straight_path();
        let mut roster = EnemyRoster::new();
        let id = roster.spawn(EnemyKind::Basic, basic(), &path);
        let enemy = roster.get_mut(id).expect("enemy");

        assert!(!enemy.advance(Duration::from_millis(500), &path));
        let position = enemy.position();
        assert!((position.x - 25.0).abs() < 1e-3);
        assert_eq!(position.y, 0.0);
    }

    #[test]
    fn segment_overflow_restarts_at_the_next_point() {
        let path = straight_path();
        let mut roster = EnemyRoster::new();
        let id = roster.spawn(EnemyKind::Basic, basic(), &path);
        let enemy = roster.get_mut(id).expect("enemy");

        assert!(!enemy.advance(Duration::from_secs(3), &path));
        let snapshot = enemy.snapshot();
        assert_eq!(snapshot.path_index, 1);
        assert_eq!(snapshot.path_progress, 0.0);
        assert_eq!(snapshot.position, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn reaching_the_end_is_reported_once() {
        let path = straight_path();
        let mut roster = EnemyRoster::new();
        let id = roster.spawn(EnemyKind::Fast, basic(), &path);

        let mut exits = 0;
        for _ in 0..20 {
            if roster.get_mut(id).expect("enemy").advance(Duration::from_secs(1), &path) {
                exits += 1;
            }
        }
        assert_eq!(exits, 1);
        assert!(!roster.is_alive(id));
        assert_eq!(roster.get(id).map(Enemy::position), Some(Vec2::new(100.0, 100.0)));

        roster.remove_inactive();
        assert!(roster.is_empty());
    }

    #[test]
    fn identifiers_follow_spawn_order() {
        let path = straight_path();
        let mut roster = EnemyRoster::new();
        let first = roster.spawn(EnemyKind::Tank, basic(), &path);
        let second = roster.spawn(EnemyKind::Basic, basic(), &path);
        assert!(first < second);
        let order: Vec<EnemyId> = roster.iter().map(Enemy::id).collect();
        assert_eq!(order, vec![first, second]);
    }
}
