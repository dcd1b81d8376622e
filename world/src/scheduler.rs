//! Cancellable timers against the simulation clock.

use std::{collections::BTreeMap, time::Duration};

/// Handle used to cancel a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TimerId(u64);

/// Deferred work owned by the wave lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Task {
    /// Release the next enemy of the active wave.
    Spawn,
    /// Preparation countdown elapsed.
    WaveReady,
    /// Auto-advance delay elapsed.
    AutoStart,
}

/// Timer queue ordered by due time, then by scheduling order.
#[derive(Debug)]
pub(crate) struct Scheduler {
    entries: BTreeMap<(Duration, u64), (TimerId, Task)>,
    next_sequence: u64,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_sequence: 0,
        }
    }

    pub(crate) fn schedule(&mut self, due: Duration, task: Task) -> TimerId {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        let id = TimerId(sequence);
        let _ = self.entries.insert((due, sequence), (id, task));
        id
    }

    /// Cancels the timer, returning `true` if it was still pending.
    pub(crate) fn cancel(&mut self, id: TimerId) -> bool {
        let key = self
            .entries
            .iter()
            .find(|(_, (timer, _))| *timer == id)
            .map(|(key, _)| *key);
        match key {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<(Duration, Task)> {
        let (&(due, sequence), _) = self.entries.iter().next()?;
        if due > now {
            return None;
        }
        self.entries
            .remove(&(due, sequence))
            .map(|(_, task)| (due, task))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
