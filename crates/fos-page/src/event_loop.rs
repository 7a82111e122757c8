//! Event Loop
//!
//! Single-threaded task queue on a virtual millisecond clock. Timers and
//! queued tasks share one ordering: `(due_at, insertion order)`. Time only
//! moves when the host asks it to, so deferred work is fully deterministic.

use std::cell::Cell;
use std::rc::Rc;

/// Shared cancellation flag for a scheduled entry
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Handle to a scheduled timer or task
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u32,
    due_at: u64,
    token: CancellationToken,
}

impl TimerHandle {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Virtual time at which the entry runs
    pub fn due_at(&self) -> u64 {
        self.due_at
    }

    /// Cancel the entry; it is skipped when it becomes due
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Still scheduled: neither cancelled nor run
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }
}

#[derive(Debug)]
struct Entry<T> {
    id: u32,
    due_at: u64,
    order: u64,
    token: CancellationToken,
    task: T,
}

/// Virtual-time event loop
#[derive(Debug)]
pub struct EventLoop<T> {
    now_ms: u64,
    next_id: u32,
    next_order: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            next_order: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> EventLoop<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` once `delay_ms` has elapsed
    pub fn set_timeout(&mut self, task: T, delay_ms: u64) -> TimerHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let order = self.next_order;
        self.next_order += 1;

        let due_at = self.now_ms.saturating_add(delay_ms);
        let token = CancellationToken::new();
        self.entries.push(Entry {
            id,
            due_at,
            order,
            token: token.clone(),
            task,
        });
        tracing::trace!(id, due_at, "scheduled task");
        TimerHandle { id, due_at, token }
    }

    /// Queue a task for the next turn (zero delay)
    pub fn queue_task(&mut self, task: T) -> TimerHandle {
        self.set_timeout(task, 0)
    }

    /// Cancel by id; returns whether a live entry was found
    pub fn cancel(&mut self, id: u32) -> bool {
        match self.entries.iter().find(|e| e.id == id && !e.token.is_cancelled()) {
            Some(entry) => {
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel everything still scheduled
    pub fn cancel_all(&mut self) {
        for entry in self.entries.drain(..) {
            entry.token.cancel();
        }
    }

    /// Number of live (not cancelled) entries
    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|e| !e.token.is_cancelled()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Due time of the earliest live entry
    pub fn next_due(&self) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| !e.token.is_cancelled())
            .map(|e| e.due_at)
            .min()
    }

    /// Take the earliest live entry due at or before `limit`, moving the
    /// clock forward to its due time
    pub fn pop_next_until(&mut self, limit: u64) -> Option<T> {
        self.entries.retain(|e| !e.token.is_cancelled());

        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_at <= limit)
            .min_by_key(|(_, e)| (e.due_at, e.order))
            .map(|(i, _)| i)?;

        let entry = self.entries.swap_remove(index);
        self.now_ms = self.now_ms.max(entry.due_at);
        entry.token.cancel();
        tracing::trace!(id = entry.id, now = self.now_ms, "running task");
        Some(entry.task)
    }

    /// Move the clock forward without running anything
    pub fn advance_to(&mut self, time_ms: u64) {
        self.now_ms = self.now_ms.max(time_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(event_loop: &mut EventLoop<&'static str>, limit: u64) -> Vec<&'static str> {
        let mut ran = Vec::new();
        while let Some(task) = event_loop.pop_next_until(limit) {
            ran.push(task);
        }
        ran
    }

    #[test]
    fn test_orders_by_due_time_then_insertion() {
        let mut event_loop = EventLoop::new();
        event_loop.set_timeout("late", 100);
        event_loop.set_timeout("early", 10);
        event_loop.queue_task("now-1");
        event_loop.queue_task("now-2");

        assert_eq!(drain(&mut event_loop, 1000), vec!["now-1", "now-2", "early", "late"]);
        assert_eq!(event_loop.now(), 100);
    }

    #[test]
    fn test_limit_respected() {
        let mut event_loop = EventLoop::new();
        event_loop.set_timeout("dismiss", 5000);

        assert!(drain(&mut event_loop, 4999).is_empty());
        assert_eq!(event_loop.pending(), 1);
        assert_eq!(drain(&mut event_loop, 5000), vec!["dismiss"]);
        assert!(event_loop.is_idle());
    }

    #[test]
    fn test_cancelled_entries_are_skipped() {
        let mut event_loop = EventLoop::new();
        let handle = event_loop.set_timeout("a", 5);
        event_loop.set_timeout("b", 5);

        handle.cancel();
        assert!(!handle.is_active());
        assert_eq!(event_loop.pending(), 1);
        assert_eq!(drain(&mut event_loop, 10), vec!["b"]);
    }

    #[test]
    fn test_cancel_by_id() {
        let mut event_loop = EventLoop::new();
        let handle = event_loop.set_timeout("x", 1);
        assert!(event_loop.cancel(handle.id()));
        assert!(!event_loop.cancel(handle.id()));
        assert_eq!(event_loop.next_due(), None);
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut event_loop = EventLoop::new();
        event_loop.advance_to(1000);
        let handle = event_loop.set_timeout("t", 250);
        assert_eq!(handle.due_at(), 1250);
        event_loop.advance_to(10);
        assert_eq!(event_loop.now(), 1000);
    }

    #[test]
    fn test_fired_handle_is_inactive() {
        let mut event_loop = EventLoop::new();
        let handle = event_loop.queue_task("t");
        assert!(handle.is_active());
        assert_eq!(drain(&mut event_loop, 0), vec!["t"]);
        assert!(!handle.is_active());
    }
}
