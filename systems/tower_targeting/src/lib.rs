#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use trail_defence_core::{EnemyId, EnemyView, MatchStatus, TowerId, TowerTarget, TowerView, Vec2};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    tower_workspace: Vec<TowerWorkspace>,
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes tower targets for the provided world snapshot.
    ///
    /// A tower keeps its previous target while that enemy is alive and in
    /// range. Otherwise it picks the live enemy strictly closest to it within
    /// range; equal distances resolve to the enemy seen first in spawn order.
    /// Towers without a candidate are omitted from the output.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments.
    pub fn handle(
        &mut self,
        status: MatchStatus,
        towers: &TowerView,
        enemies: &EnemyView,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if status != MatchStatus::Running {
            return;
        }

        if towers.is_empty() || enemies.is_empty() {
            return;
        }

        self.prepare_tower_workspace(towers);
        self.prepare_enemy_workspace(enemies);

        for tower in &self.tower_workspace {
            let range_sq = tower.range * tower.range;

            let retained = tower.current.and_then(|current| {
                self.enemy_workspace
                    .binary_search_by_key(&current, |candidate| candidate.id)
                    .ok()
                    .map(|index| &self.enemy_workspace[index])
                    .filter(|candidate| candidate.position.distance_squared(tower.position) <= range_sq)
            });

            let chosen = match retained {
                Some(candidate) => Some(candidate.id),
                None => nearest_in_range(tower, range_sq, &self.enemy_workspace),
            };

            if let Some(enemy) = chosen {
                out.push(TowerTarget {
                    tower: tower.id,
                    enemy,
                });
            }
        }
    }

    fn prepare_tower_workspace(&mut self, towers: &TowerView) {
        self.tower_workspace.clear();
        self.tower_workspace.reserve(towers.len());

        for snapshot in towers.iter() {
            if !(snapshot.range.is_finite() && snapshot.range >= 0.0) {
                continue;
            }

            self.tower_workspace.push(TowerWorkspace {
                id: snapshot.id,
                position: snapshot.position,
                range: snapshot.range,
                current: snapshot.target,
            });
        }
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.reserve(enemies.len());

        for snapshot in enemies.iter() {
            if snapshot.health == 0 {
                continue;
            }

            self.enemy_workspace.push(EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

fn nearest_in_range(
    tower: &TowerWorkspace,
    range_sq: f32,
    candidates: &[EnemyCandidate],
) -> Option<EnemyId> {
    let mut best: Option<BestCandidate> = None;

    for candidate in candidates {
        let distance_sq = candidate.position.distance_squared(tower.position);
        if distance_sq > range_sq {
            continue;
        }

        let current = BestCandidate {
            distance_sq,
            enemy: candidate.id,
        };

        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }

    best.map(|candidate| candidate.enemy)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TowerWorkspace {
    id: TowerId,
    position: Vec2,
    range: f32,
    current: Option<EnemyId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance_sq: f32,
    enemy: EnemyId,
}

impl BestCandidate {
    /// Strictly closer candidates win; ties keep the earlier one.
    fn precedes(&self, other: &Self) -> bool {
        self.distance_sq < other.distance_sq
    }
}

#[cfg(test)]
mod tests {
    use super::{TowerTarget, TowerTargeting};
    use trail_defence_core::{
        CellCoord, EnemyId, EnemyKind, EnemySnapshot, EnemyView, MatchStatus, TowerId, TowerKind,
        TowerSnapshot, TowerView, Vec2,
    };

    fn tower_snapshot(id: u32, position: (f32, f32), target: Option<u32>) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind: TowerKind::Basic,
            cell: CellCoord::new(0, 0),
            position: Vec2::new(position.0, position.1),
            range: 100.0,
            target: target.map(EnemyId::new),
            paid_cost: 20,
        }
    }

    fn enemy_snapshot(id: u32, position: (f32, f32)) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Basic,
            position: Vec2::new(position.0, position.1),
            health: 30,
            max_health: 30,
            path_index: 0,
            path_progress: 0.0,
        }
    }

    fn run(towers: Vec<TowerSnapshot>, enemies: Vec<EnemySnapshot>) -> Vec<TowerTarget> {
        let mut system = TowerTargeting::new();
        let mut out = Vec::new();
        system.handle(
            MatchStatus::Running,
            &TowerView::from_snapshots(towers),
            &EnemyView::from_snapshots(enemies),
            &mut out,
        );
        out
    }

    #[test]
    fn targets_enemy_within_range() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), None)],
            vec![enemy_snapshot(2, (60.0, 80.0))],
        );
        assert_eq!(
            out,
            vec![TowerTarget {
                tower: TowerId::new(1),
                enemy: EnemyId::new(2),
            }]
        );
    }

    #[test]
    fn enemy_outside_range_is_ignored() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), None)],
            vec![enemy_snapshot(2, (80.0, 80.0))],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn nearest_enemy_wins() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), None)],
            vec![enemy_snapshot(1, (90.0, 0.0)), enemy_snapshot(2, (0.0, 40.0))],
        );
        assert_eq!(out[0].enemy, EnemyId::new(2));
    }

    #[test]
    fn earlier_spawn_is_preferred_when_distances_match() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), None)],
            vec![enemy_snapshot(20, (50.0, 0.0)), enemy_snapshot(10, (-50.0, 0.0))],
        );
        assert_eq!(out[0].enemy, EnemyId::new(10));
    }

    #[test]
    fn valid_target_is_retained_over_closer_enemy() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), Some(5))],
            vec![enemy_snapshot(5, (90.0, 0.0)), enemy_snapshot(6, (10.0, 0.0))],
        );
        assert_eq!(out[0].enemy, EnemyId::new(5));
    }

    #[test]
    fn target_leaving_range_is_replaced() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), Some(5))],
            vec![enemy_snapshot(5, (101.0, 0.0)), enemy_snapshot(6, (30.0, 0.0))],
        );
        assert_eq!(out[0].enemy, EnemyId::new(6));
    }

    #[test]
    fn vanished_target_is_replaced() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), Some(3))],
            vec![enemy_snapshot(4, (20.0, 0.0))],
        );
        assert_eq!(out[0].enemy, EnemyId::new(4));
    }

    #[test]
    fn setup_phase_clears_output() {
        let mut system = TowerTargeting::new();
        let towers = TowerView::from_snapshots(vec![tower_snapshot(1, (0.0, 0.0), None)]);
        let enemies = EnemyView::from_snapshots(vec![enemy_snapshot(1, (1.0, 1.0))]);

        let mut out = vec![TowerTarget {
            tower: TowerId::new(99),
            enemy: EnemyId::new(99),
        }];

        system.handle(MatchStatus::Setup, &towers, &enemies, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_collections_produce_no_targets() {
        assert!(run(Vec::new(), vec![enemy_snapshot(1, (1.0, 1.0))]).is_empty());
        assert!(run(vec![tower_snapshot(1, (0.0, 0.0), None)], Vec::new()).is_empty());
    }
}
