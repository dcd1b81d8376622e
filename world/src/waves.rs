//! Wave lifecycle bookkeeping: spawn cursor and outstanding timers.

use std::time::Duration;

use trail_defence_core::{EnemyKind, WaveId, WavePlan};

use crate::scheduler::{Scheduler, Task, TimerId};

/// Progress of the wave currently being fought.
#[derive(Debug, Default)]
pub(crate) struct WaveState {
    current: WaveId,
    plan: Option<WavePlan>,
    group: usize,
    spawned_in_group: u32,
    in_progress: bool,
    spawn_timer: Option<TimerId>,
    ready_timer: Option<TimerId>,
    auto_timer: Option<TimerId>,
}

impl WaveState {
    pub(crate) fn current(&self) -> WaveId {
        self.current
    }

    /// Whether enemies of the current plan remain to be released.
    pub(crate) fn is_spawning(&self) -> bool {
        self.spawn_timer.is_some()
    }

    /// Whether a wave started and has not been completed yet.
    pub(crate) fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Begins the next wave and schedules its first spawn.
    ///
    /// Pending preparation and auto-start timers are cancelled.
    pub(crate) fn begin(&mut self, plan: WavePlan, now: Duration, scheduler: &mut Scheduler) {
        self.cancel_countdown(scheduler);
        self.current = self.current.next();
        self.group = 0;
        self.spawned_in_group = 0;
        self.in_progress = true;
        self.spawn_timer = plan
            .groups()
            .first()
            .map(|group| scheduler.schedule(now + group.spawn_delay, Task::Spawn));
        self.plan = Some(plan);
    }

    /// Advances the spawn cursor after a spawn timer fired at `due`.
    ///
    /// Returns the kind to release and schedules the following spawn one
    /// group delay after `due`.
    pub(crate) fn release(&mut self, due: Duration, scheduler: &mut Scheduler) -> Option<EnemyKind> {
        self.spawn_timer = None;
        let plan = self.plan.as_ref()?;
        let group = plan.groups().get(self.group)?;
        let kind = group.kind;

        self.spawned_in_group += 1;
        if self.spawned_in_group >= group.count {
            self.group += 1;
            self.spawned_in_group = 0;
        }

        if let Some(next) = plan.groups().get(self.group) {
            self.spawn_timer = Some(scheduler.schedule(due + next.spawn_delay, Task::Spawn));
        }
        Some(kind)
    }

    /// Marks the wave complete and starts the preparation countdown.
    pub(crate) fn complete(&mut self, now: Duration, preparation: Duration, scheduler: &mut Scheduler) {
        self.in_progress = false;
        self.ready_timer = Some(scheduler.schedule(now + preparation, Task::WaveReady));
    }

    /// Handles the preparation timer and optionally arms the auto-start.
    pub(crate) fn ready(&mut self, due: Duration, auto_start: Option<Duration>, scheduler: &mut Scheduler) {
        self.ready_timer = None;
        self.auto_timer = auto_start.map(|delay| scheduler.schedule(due + delay, Task::AutoStart));
    }

    pub(crate) fn auto_start_fired(&mut self) {
        self.auto_timer = None;
    }

    /// Stops every timer owned by the wave, including pending spawns.
    pub(crate) fn halt(&mut self, scheduler: &mut Scheduler) {
        if let Some(timer) = self.spawn_timer.take() {
            let _ = scheduler.cancel(timer);
        }
        self.cancel_countdown(scheduler);
    }

    fn cancel_countdown(&mut self, scheduler: &mut Scheduler) {
        for timer in [self.ready_timer.take(), self.auto_timer.take()]
            .into_iter()
            .flatten()
        {
            let _ = scheduler.cancel(timer);
        }
    }
}
