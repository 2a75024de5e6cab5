#![forbid(unsafe_code)]

//! Pointer feed subscriptions.
//!
//! A [`PointerFeed`] stands in for the host's global pointer-move listener.
//! Instead of attaching callbacks that live until the runtime garbage
//! collects them, each consumer holds a [`FeedSubscription`] guard; dropping
//! the guard removes the listener.
//!
//! # How it works
//!
//! 1. The host creates one feed and calls [`PointerFeed::dispatch`] for every
//!    pointer event, in arrival order.
//! 2. Consumers call [`PointerFeed::subscribe`] and keep the returned guard
//!    for as long as they want events.
//! 3. Dropping the guard (or calling [`FeedSubscription::unsubscribe`])
//!    stops delivery.
//!
//! Listeners may subscribe or unsubscribe (themselves included) while a
//! dispatch is in progress. Listeners added during a dispatch first receive
//! the next event.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use evasion_core::event::PointerEvent;
use web_time::Instant;

/// A unique identifier for a subscription within one feed.
pub type SubId = u64;

type Listener = Box<dyn FnMut(&PointerEvent, Instant)>;

struct Slot {
    id: SubId,
    /// `None` while the listener is running.
    listener: Option<Listener>,
}

#[derive(Default)]
struct FeedInner {
    slots: Vec<Slot>,
    next_id: SubId,
}

/// Single-threaded fan-out of pointer events to subscribed listeners.
#[derive(Clone, Default)]
pub struct PointerFeed {
    inner: Rc<RefCell<FeedInner>>,
}

impl fmt::Debug for PointerFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerFeed")
            .field("listeners", &self.len())
            .finish()
    }
}

impl PointerFeed {
    /// Create an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn subscribe(
        &self,
        listener: impl FnMut(&PointerEvent, Instant) + 'static,
    ) -> FeedSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.slots.push(Slot {
            id,
            listener: Some(Box::new(listener)),
        });
        tracing::debug!(sub_id = id, "Starting pointer subscription");
        FeedSubscription {
            id,
            feed: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every listener registered when the call began.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &PointerEvent, now: Instant) -> usize {
        let ids: Vec<SubId> = self.inner.borrow().slots.iter().map(|s| s.id).collect();
        let mut delivered = 0;

        for id in ids {
            let taken = {
                let mut inner = self.inner.borrow_mut();
                inner
                    .slots
                    .iter_mut()
                    .find(|slot| slot.id == id)
                    .and_then(|slot| slot.listener.take())
            };
            // Unsubscribed by an earlier listener, or re-entrant dispatch.
            let Some(mut listener) = taken else {
                continue;
            };

            listener(event, now);
            delivered += 1;

            let orphaned = {
                let mut inner = self.inner.borrow_mut();
                match inner.slots.iter_mut().find(|slot| slot.id == id) {
                    Some(slot) => {
                        slot.listener = Some(listener);
                        None
                    }
                    None => Some(listener),
                }
            };
            // Dropped outside the borrow: its captures may own other guards.
            drop(orphaned);
        }

        delivered
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for one registered listener. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct FeedSubscription {
    id: SubId,
    feed: Weak<RefCell<FeedInner>>,
}

impl fmt::Debug for FeedSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedSubscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl FeedSubscription {
    /// Identifier of this subscription.
    #[must_use]
    pub const fn id(&self) -> SubId {
        self.id
    }

    /// Whether the listener is still registered on a live feed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.feed
            .upgrade()
            .is_some_and(|inner| inner.borrow().slots.iter().any(|s| s.id == self.id))
    }

    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        let Some(inner) = self.feed.upgrade() else {
            return;
        };
        let removed = {
            let mut inner = inner.borrow_mut();
            inner
                .slots
                .iter()
                .position(|slot| slot.id == self.id)
                .map(|index| inner.slots.remove(index))
        };
        if removed.is_some() {
            tracing::debug!(sub_id = self.id, "Stopping pointer subscription");
        }
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&PointerEvent, Instant) + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move |_: &PointerEvent, _: Instant| {
            inner.set(inner.get() + 1)
        })
    }

    #[test]
    fn new_feed_is_empty() {
        let feed = PointerFeed::new();
        assert!(feed.is_empty());
        assert_eq!(feed.dispatch(&PointerEvent::moved(0.0, 0.0), Instant::now()), 0);
    }

    #[test]
    fn dispatch_reaches_subscribers() {
        let feed = PointerFeed::new();
        let (count, listener) = counter();
        let _sub = feed.subscribe(listener);
        assert_eq!(feed.dispatch(&PointerEvent::moved(1.0, 1.0), Instant::now()), 1);
        assert_eq!(feed.dispatch(&PointerEvent::moved(2.0, 2.0), Instant::now()), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn listeners_see_events_in_arrival_order() {
        let feed = PointerFeed::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = feed.subscribe(move |event: &PointerEvent, _| sink.borrow_mut().push(event.x));
        let now = Instant::now();
        for x in [3.0, 1.0, 2.0] {
            feed.dispatch(&PointerEvent::moved(x, 0.0), now);
        }
        assert_eq!(*seen.borrow(), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn dropping_guard_unsubscribes() {
        let feed = PointerFeed::new();
        let (count, listener) = counter();
        let sub = feed.subscribe(listener);
        assert!(sub.is_active());
        drop(sub);
        assert!(feed.is_empty());
        feed.dispatch(&PointerEvent::moved(0.0, 0.0), Instant::now());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn explicit_unsubscribe() {
        let feed = PointerFeed::new();
        let (_count, listener) = counter();
        let sub = feed.subscribe(listener);
        sub.unsubscribe();
        assert!(feed.is_empty());
    }

    #[test]
    fn guard_outliving_feed_is_harmless() {
        let feed = PointerFeed::new();
        let (_count, listener) = counter();
        let sub = feed.subscribe(listener);
        drop(feed);
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn ids_are_unique() {
        let feed = PointerFeed::new();
        let a = feed.subscribe(|_, _| {});
        let b = feed.subscribe(|_, _| {});
        assert_ne!(a.id(), b.id());
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn listener_may_unsubscribe_itself_during_dispatch() {
        let feed = PointerFeed::new();
        let slot: Rc<RefCell<Option<FeedSubscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let slot_in = Rc::clone(&slot);
        let hits_in = Rc::clone(&hits);
        let sub = feed.subscribe(move |_, _| {
            hits_in.set(hits_in.get() + 1);
            slot_in.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        let now = Instant::now();
        assert_eq!(feed.dispatch(&PointerEvent::moved(0.0, 0.0), now), 1);
        assert!(feed.is_empty());
        assert_eq!(feed.dispatch(&PointerEvent::moved(0.0, 0.0), now), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn listener_may_unsubscribe_a_later_one() {
        let feed = PointerFeed::new();
        let (late_count, late_listener) = counter();
        let victim: Rc<RefCell<Option<FeedSubscription>>> = Rc::new(RefCell::new(None));

        let victim_in = Rc::clone(&victim);
        let _killer = feed.subscribe(move |_, _| {
            victim_in.borrow_mut().take();
        });
        *victim.borrow_mut() = Some(feed.subscribe(late_listener));

        assert_eq!(feed.dispatch(&PointerEvent::moved(0.0, 0.0), Instant::now()), 1);
        assert_eq!(late_count.get(), 0);
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn subscribing_during_dispatch_starts_with_next_event() {
        let feed = PointerFeed::new();
        let (late_count, late_listener) = counter();
        let late_listener = RefCell::new(Some(late_listener));
        let added: Rc<RefCell<Vec<FeedSubscription>>> = Rc::new(RefCell::new(Vec::new()));

        let feed_in = feed.clone();
        let added_in = Rc::clone(&added);
        let _adder = feed.subscribe(move |_, _| {
            if let Some(listener) = late_listener.borrow_mut().take() {
                added_in.borrow_mut().push(feed_in.subscribe(listener));
            }
        });

        let now = Instant::now();
        assert_eq!(feed.dispatch(&PointerEvent::moved(0.0, 0.0), now), 1);
        assert_eq!(late_count.get(), 0);
        assert_eq!(feed.dispatch(&PointerEvent::moved(0.0, 0.0), now), 2);
        assert_eq!(late_count.get(), 1);
    }
}
