use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use web_time::Instant;

/// Handle of a scheduled entry, never reused by the same scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerToken(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleEntry<A> {
    pub fire_at: Instant,
    pub action: A,
    pub token: TimerToken,
}

/// Deferred actions waiting for the host's clock.
///
/// The scheduler never looks at the clock itself: the host passes `now` to
/// [`Scheduler::drain_due`] from its own timing loop.
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    entries: Vec<ScheduleEntry<A>>,
    next_token: u64,
}

impl<A> Scheduler<A> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_token: 0,
        }
    }

    pub fn schedule(&mut self, fire_at: Instant, action: A) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.push(ScheduleEntry { fire_at, action, token });
        token
    }

    /// Disarms `token`, returning whether it was still pending.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.token != token);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.entries.iter().any(|entry| entry.token == token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.fire_at).min()
    }

    /// Removes and returns every entry due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<ScheduleEntry<A>> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| entry.fire_at <= now);
        self.entries = pending;
        due.sort_by_key(|entry| (entry.fire_at, entry.token));
        due
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    #[test]
    fn fires_in_deadline_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let late = scheduler.schedule(start + Duration::from_millis(200), "late");
        let early = scheduler.schedule(start + Duration::from_millis(100), "early");

        assert_eq!(scheduler.next_deadline(), Some(start + Duration::from_millis(100)));
        assert!(scheduler.drain_due(start).is_empty());

        let due = scheduler.drain_due(start + Duration::from_secs(1));
        let fired: Vec<_> = due.iter().map(|entry| (entry.token, entry.action)).collect();

        assert_eq!(fired, [(early, "early"), (late, "late")]);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn only_due_entries_are_drained() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start + Duration::from_millis(10), 1);
        let pending = scheduler.schedule(start + Duration::from_secs(10), 2);

        assert_eq!(scheduler.drain_due(start + Duration::from_millis(10)).len(), 1);
        assert!(scheduler.is_pending(pending));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn cancelled_entries_never_fire() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule(start, ());

        assert!(scheduler.cancel(token));
        assert!(!scheduler.cancel(token));
        assert!(scheduler.drain_due(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn tokens_are_not_reused_after_clear() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(start, ());
        scheduler.clear();
        let second = scheduler.schedule(start, ());

        assert_ne!(first, second);
        assert!(!scheduler.is_pending(first));
    }
}
