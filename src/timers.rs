use crate::util::pool::{Pool, PoolKey};

/// Handle to a scheduled timer. Cancelling a fired or cancelled handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(PoolKey);

struct Pending<T> {
    /// Seconds remaining.
    remaining: f64,
    /// Scheduling order, breaks ties between equal deadlines.
    seq: u64,
    task: T,
}

/// One-shot countdown timers on a cooperative loop. The owner advances them
/// explicitly; dropping the owner drops every pending timer.
pub struct Timers<T> {
    pending: Pool<Pending<T>>,
    next_seq: u64,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            pending: Pool::with_capacity(16),
            next_seq: 0,
        }
    }

    /// Schedule `task` to fire after `delay` seconds.
    pub fn after(&mut self, delay: f64, task: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        TimerHandle(self.pending.alloc(Pending {
            remaining: delay.max(0.0),
            seq,
            task,
        }))
    }

    /// Returns whether a pending timer was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.free(handle.0).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.get(handle.0).is_some()
    }

    /// Advance every timer by `dt` seconds and return the tasks that came due,
    /// earliest deadline first.
    pub fn advance(&mut self, dt: f64) -> Vec<T> {
        let mut due: Vec<(f64, u64, PoolKey)> = Vec::new();
        for key in self.pending.keys() {
            if let Some(p) = self.pending.get_mut(key) {
                p.remaining -= dt;
                if p.remaining <= 0.0 {
                    due.push((p.remaining, p.seq, key));
                }
            }
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        due.into_iter()
            .filter_map(|(_, _, key)| self.pending.free(key))
            .map(|p| p.task)
            .collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
