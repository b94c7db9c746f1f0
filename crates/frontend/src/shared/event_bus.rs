//! Typed in-page pub/sub.
//!
//! One [`EventBus`] per payload type. Subscribers get every event published
//! after they subscribed; dropping the returned [`Subscription`] removes the
//! handler. Handlers are called outside the lock, so a handler may publish
//! or subscribe itself.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use contracts::shared::events::{AfdelingClicked, DebugUpdate, PetaPong, RekapPing};
use leptos::prelude::*;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

fn lock<T>(registry: &Mutex<Registry<T>>) -> MutexGuard<'_, Registry<T>> {
    // A panicking handler never runs under the lock, so a poisoned registry is still consistent
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct EventBus<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<T: 'static> EventBus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, Arc::new(handler)));
            id
        };
        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    lock(&registry).handlers.retain(|(hid, _)| *hid != id);
                }
            })),
        }
    }

    /// Delivers `event` to every current subscriber in subscription order.
    /// Returns how many handlers ran.
    pub fn publish(&self, event: &T) -> usize {
        let handlers: Vec<Handler<T>> = lock(&self.registry)
            .handlers
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).handlers.len()
    }
}

/// Removes its handler when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Ties the subscription to the current reactive owner
    pub fn until_cleanup(self) {
        on_cleanup(move || drop(self));
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// The buses shared by every page
#[derive(Clone, Default)]
pub struct AppBus {
    pub afdeling_clicked: EventBus<AfdelingClicked>,
    pub rekap_ping: EventBus<RekapPing>,
    pub peta_pong: EventBus<PetaPong>,
    pub debug: EventBus<DebugUpdate>,
}

impl AppBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for components reporting a single value to the debug panel
    pub fn debug(&self, key: &str, value: impl Into<String>) {
        self.debug.publish(&DebugUpdate::single(key, value));
    }
}

pub fn use_bus() -> AppBus {
    use_context::<AppBus>().expect("AppBus not found in context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribers_receive_later_events_in_order() {
        let bus = EventBus::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let a = {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |v| seen.lock().unwrap().push(("a", *v)))
        };
        bus.publish(&1);
        let b = {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |v| seen.lock().unwrap().push(("b", *v)))
        };
        assert_eq!(bus.publish(&2), 2);
        assert_eq!(*seen.lock().unwrap(), vec![("a", 1), ("a", 2), ("b", 2)]);
        drop((a, b));
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let bus = EventBus::<()>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let sub = {
            let hits = Arc::clone(&hits);
            bus.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        bus.publish(&());
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(&()), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_may_publish_on_another_bus() {
        let pings = EventBus::<RekapPing>::new();
        let pongs = EventBus::<PetaPong>::new();
        let answered = Arc::new(AtomicUsize::new(0));
        let _responder = {
            let pongs = pongs.clone();
            pings.subscribe(move |ping| {
                pongs.publish(&PetaPong {
                    ready: true,
                    has_map: true,
                    last_detected_afdeling: None,
                    ts: ping.requested_at,
                });
            })
        };
        let _listener = {
            let answered = Arc::clone(&answered);
            pongs.subscribe(move |pong| {
                assert_eq!(pong.ts, 42.0);
                answered.fetch_add(1, Ordering::SeqCst);
            })
        };
        pings.publish(&RekapPing { requested_at: 42.0 });
        assert_eq!(answered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = EventBus::<u8>::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }
}
