//! One-shot actions due at a point in simulation time.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

struct Scheduled<A> {
    due: Duration,
    seq: u64,
    action: A,
}

impl<A> PartialEq for Scheduled<A> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<A> Eq for Scheduled<A> {}

impl<A> PartialOrd for Scheduled<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Scheduled<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Pending actions, released in fire-time order. Ties keep scheduling order.
pub struct Timeline<A> {
    queue: BinaryHeap<Reverse<Scheduled<A>>>,
    seq: u64,
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn schedule(&mut self, due: Duration, action: A) {
        self.seq += 1;
        self.queue.push(Reverse(Scheduled { due, seq: self.seq, action }));
    }

    /// Removes and returns everything due at or before `now`.
    pub fn drain_due(&mut self, now: Duration) -> Vec<A> {
        let mut due = Vec::new();
        while self.queue.peek().is_some_and(|Reverse(next)| next.due <= now) {
            if let Some(Reverse(next)) = self.queue.pop() {
                due.push(next.action);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}
