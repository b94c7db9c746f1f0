use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gloo_timers::callback::Interval;
use leptos::prelude::*;

/// Hands out tickets for in-flight fetches of one view.
///
/// Only the response carrying the most recent ticket is applied, so a slow
/// poll answer can never overwrite the result of a later refresh.
#[derive(Clone, Default, Debug)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Like [`Self::is_current`], logging the dropped response
    pub fn accept(&self, ticket: Ticket, view: &str) -> bool {
        let current = self.is_current(ticket);
        if !current {
            log::debug!("{}: dropping stale response #{}", view, ticket.0);
        }
        current
    }

    /// Makes every outstanding ticket stale
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// Runs `tick` every `period_secs` until the current component is cleaned up.
/// A period of zero disables polling.
pub fn use_interval(period_secs: u32, tick: impl FnMut() + 'static) {
    if period_secs == 0 {
        return;
    }
    let interval = Interval::new(period_secs.saturating_mul(1000), tick);
    let handle = StoredValue::new_local(Some(interval));
    on_cleanup(move || {
        handle.try_update_value(|slot| drop(slot.take()));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.next();
        assert!(generation.is_current(first));
        let second = generation.next();
        assert!(!generation.accept(first, "test"));
        assert!(generation.accept(second, "test"));
    }

    #[test]
    fn test_clones_share_the_counter() {
        let generation = RequestGeneration::new();
        let poller = generation.clone();
        let polled = poller.next();
        let refreshed = generation.next();
        assert!(!generation.is_current(polled));
        assert!(poller.is_current(refreshed));
    }

    #[test]
    fn test_invalidate_drops_outstanding_ticket() {
        let generation = RequestGeneration::new();
        let ticket = generation.next();
        generation.invalidate();
        assert!(!generation.is_current(ticket));
    }
}
