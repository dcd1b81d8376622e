//! Seeded obstacle field that shrinks as waves progress.

use std::collections::BTreeSet;

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use trail_defence_core::{CellCoord, WaveId};

use crate::geometry::{Grid, Path};

/// Cells blocked from tower placement.
///
/// Candidates are shuffled once per match. The blocked set for a wave is
/// always a prefix of that order, so a later wave's set is a subset of an
/// earlier one whenever the blocked fraction does not grow.
#[derive(Clone, Debug)]
pub(crate) struct ObstacleField {
    order: Vec<CellCoord>,
    blocked: BTreeSet<CellCoord>,
}

impl ObstacleField {
    /// Collects cells clear of the path and shuffles them with the match seed.
    pub(crate) fn new(grid: &Grid, path: &Path, exclusion_radius: f32, seed: u64) -> Self {
        let mut order: Vec<CellCoord> = grid
            .cells()
            .filter(|cell| path.distance_to(grid.center(*cell)) >= exclusion_radius)
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        Self {
            order,
            blocked: BTreeSet::new(),
        }
    }

    /// Blocks the first `floor(candidates × fraction)` shuffled cells.
    ///
    /// Returns the number of blocked cells.
    pub(crate) fn update(&mut self, fraction: f64) -> u32 {
        let fraction = fraction.clamp(0.0, 1.0);
        let count = ((self.order.len() as f64) * fraction).floor() as usize;
        let count = count.min(self.order.len());
        self.blocked = self.order[..count].iter().copied().collect();
        count as u32
    }

    pub(crate) fn is_blocked(&self, cell: CellCoord) -> bool {
        self.blocked.contains(&cell)
    }

    /// Blocked cells in ascending coordinate order.
    pub(crate) fn blocked_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.blocked.iter().copied()
    }
}

/// Fraction of candidate cells blocked during `wave`.
///
/// Wave zero (before the first start) uses the wave-one fraction.
pub(crate) fn blocked_fraction(wave: WaveId, initial: f64, clear_rate: f64) -> f64 {
    let cleared_waves = f64::from(wave.get().saturating_sub(1));
    (initial - clear_rate * cleared_waves).max(0.0)
}
