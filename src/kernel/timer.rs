use std::collections::HashSet;

use super::time::Tick;

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TimerId,
    due: Tick,
    payload: T,
}

/// Delayed completions waiting on the logical clock.
///
/// Nothing here awaits. The owner calls [`TimerQueue::drain_due`] with the
/// current tick and applies whatever comes back, so a test can jump straight
/// to the tick it cares about.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    pending: Vec<Scheduled<T>>,
    // Ids canceled while still queued; purged on drain.
    canceled: HashSet<TimerId>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            canceled: HashSet::new(),
            next_id: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Tick, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled { id, due, payload });
        id
    }

    /// Returns false when the timer already fired or was never scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.pending.iter().any(|s| s.id == id) {
            self.canceled.insert(id)
        } else {
            false
        }
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.canceled.clear();
    }

    /// Removes and returns every payload due at or before `now`, earliest
    /// first. Timers sharing a due tick come out in scheduling order.
    pub fn drain_due(&mut self, now: Tick) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = rest;

        due.sort_by_key(|s| (s.due, s.id));
        let canceled = &mut self.canceled;
        due.into_iter()
            .filter(|s| !canceled.remove(&s.id))
            .map(|s| s.payload)
            .collect()
    }

    pub fn next_due(&self) -> Option<Tick> {
        self.pending
            .iter()
            .filter(|s| !self.canceled.contains(&s.id))
            .map(|s| s.due)
            .min()
    }

    pub fn len(&self) -> usize {
        self.pending
            .iter()
            .filter(|s| !self.canceled.contains(&s.id))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
