#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns target assignments into projectile launches.

use trail_defence_core::{Command, MatchStatus, TowerCooldownView, TowerTarget};

/// Tower combat system that queues firing commands for ready towers.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` entries for towers ready to fire.
    ///
    /// Only towers holding a target are considered; a tower whose cooldown
    /// has not elapsed stays silent without error. Commands are emitted in
    /// tower identifier order.
    pub fn handle(
        &mut self,
        status: MatchStatus,
        tower_cooldowns: TowerCooldownView,
        tower_targets: &[TowerTarget],
        out: &mut Vec<Command>,
    ) {
        if status != MatchStatus::Running || tower_targets.is_empty() {
            return;
        }

        self.scratch.clear();
        self.scratch.extend(
            tower_targets
                .iter()
                .filter(|target| {
                    tower_cooldowns
                        .get(target.tower)
                        .is_some_and(|cooldown| cooldown.ready_in.is_zero())
                })
                .map(|target| Command::FireProjectile {
                    tower: target.tower,
                    target: target.enemy,
                }),
        );

        self.scratch.sort_by_key(|command| match command {
            Command::FireProjectile { tower, .. } => Some(*tower),
            _ => None,
        });

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
