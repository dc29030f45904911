use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::trace;

/// Keyed timer table for trailing-edge debouncing
///
/// Each key has at most one armed deadline. Scheduling a key again moves its
/// deadline to `now + delay`, so a burst of updates fires once, `delay` after
/// the last one. Time is passed in by the caller, which polls from its event
/// loop.
#[derive(Debug, Clone)]
pub struct Debouncer<K> {
    delay: Duration,
    deadlines: HashMap<K, Instant>,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadlines: HashMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer of `key`, cancelling the one already pending
    pub fn schedule(&mut self, key: K, now: Instant) -> Instant {
        let deadline = now + self.delay;
        trace!("Debounce {key:?} until {deadline:?}");
        self.deadlines.insert(key, deadline);
        deadline
    }

    pub fn cancel(&mut self, key: &K) -> bool {
        self.deadlines.remove(key).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.deadlines.contains_key(key)
    }

    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    /// Earliest armed deadline, to know how long the event loop may sleep
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Disarm and return every key whose deadline is at or before `now`,
    /// earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(Instant, K)> = self
            .deadlines
            .iter()
            .filter(|&(_, &deadline)| deadline <= now)
            .map(|(key, &deadline)| (deadline, key.clone()))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        for (_, key) in &due {
            self.deadlines.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }
}
