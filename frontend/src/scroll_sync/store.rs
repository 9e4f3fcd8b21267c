use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::error::{Result, ScrollSyncError};
use super::registry::SectionRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSectionState {
    /// Always a registered section id.
    pub active_id: String,
    /// Time of the last explicit navigation, measured from page load.
    /// `None` until the user navigates for the first time. The coordinator
    /// opens its passive-signal suppression window from this instant.
    pub last_interaction_at: Option<Duration>,
}

type Subscriber = Rc<dyn Fn(&ActiveSectionState)>;

struct Shared {
    registry: Rc<SectionRegistry>,
    state: RefCell<ActiveSectionState>,
    subscribers: RefCell<Vec<(u64, Subscriber)>>,
    next_subscriber: Cell<u64>,
    notifying: Cell<bool>,
    dirty: Cell<bool>,
}

/// Single source of truth for the active section.
///
/// Cloning yields another handle onto the same state. Subscribers are
/// notified synchronously on every `set_active`; a `set_active` issued from
/// inside a subscriber is folded into one more notification round carrying
/// the latest state, so no subscriber ever sees values out of order.
#[derive(Clone)]
pub struct ActiveSectionStore {
    shared: Rc<Shared>,
}

impl ActiveSectionStore {
    /// Starts on the first registered section.
    pub fn new(registry: Rc<SectionRegistry>) -> Self {
        let active_id = registry.first().id.clone();
        Self {
            shared: Rc::new(Shared {
                registry,
                state: RefCell::new(ActiveSectionState {
                    active_id,
                    last_interaction_at: None,
                }),
                subscribers: RefCell::new(Vec::new()),
                next_subscriber: Cell::new(0),
                notifying: Cell::new(false),
                dirty: Cell::new(false),
            }),
        }
    }

    pub fn registry(&self) -> &Rc<SectionRegistry> {
        &self.shared.registry
    }

    pub fn current(&self) -> ActiveSectionState {
        self.shared.state.borrow().clone()
    }

    pub fn active_id(&self) -> String {
        self.shared.state.borrow().active_id.clone()
    }

    pub fn set_active(&self, id: &str) -> Result<()> {
        if !self.shared.registry.contains(id) {
            return Err(ScrollSyncError::unknown(id));
        }
        self.shared.state.borrow_mut().active_id = id.to_string();
        self.notify();
        Ok(())
    }

    /// Records an explicit user navigation. Timestamps never move backwards.
    pub fn mark_interaction(&self, at: Duration) {
        let mut state = self.shared.state.borrow_mut();
        let at = match state.last_interaction_at {
            Some(prev) if prev > at => prev,
            _ => at,
        };
        state.last_interaction_at = Some(at);
    }

    pub fn subscribe(&self, callback: impl Fn(&ActiveSectionState) + 'static) -> Subscription {
        let id = self.shared.next_subscriber.get();
        self.shared.next_subscriber.set(id + 1);
        self.shared
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        Subscription {
            store: Rc::downgrade(&self.shared),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().len()
    }

    fn notify(&self) {
        if self.shared.notifying.get() {
            self.shared.dirty.set(true);
            return;
        }
        self.shared.notifying.set(true);
        loop {
            self.shared.dirty.set(false);
            let snapshot = self.current();
            let subscribers: Vec<Subscriber> = self
                .shared
                .subscribers
                .borrow()
                .iter()
                .map(|(_, s)| Rc::clone(s))
                .collect();
            for subscriber in subscribers {
                subscriber(&snapshot);
            }
            if !self.shared.dirty.get() {
                break;
            }
        }
        self.shared.notifying.set(false);
    }
}

impl PartialEq for ActiveSectionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for ActiveSectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveSectionStore")
            .field("state", &*self.shared.state.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Unsubscribes when dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<Shared>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.store.upgrade() {
            shared
                .subscribers
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> ActiveSectionStore {
        let registry = SectionRegistry::new([
            ("home", "Home", None),
            ("public-good", "Public Good", None),
            ("distribution", "Distribution", None),
        ])
        .unwrap();
        ActiveSectionStore::new(Rc::new(registry))
    }

    #[test]
    fn defaults_to_first_section() {
        let store = store();
        assert_eq!(
            store.current(),
            ActiveSectionState {
                active_id: "home".to_string(),
                last_interaction_at: None,
            }
        );
    }

    #[test]
    fn set_active_rejects_unknown_ids() {
        let store = store();
        assert_eq!(
            store.set_active("roadmap"),
            Err(ScrollSyncError::UnknownSection("roadmap".to_string()))
        );
        assert_eq!(store.active_id(), "home");
    }

    #[test]
    fn subscribers_see_every_change() {
        let store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            store.subscribe(move |state| seen.borrow_mut().push(state.active_id.clone()))
        };

        store.set_active("distribution").unwrap();
        store.set_active("public-good").unwrap();

        assert_eq!(*seen.borrow(), vec!["distribution", "public-good"]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = store();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = hits.clone();
            store.subscribe(move |_| hits.set(hits.get() + 1))
        };
        store.set_active("distribution").unwrap();
        sub.unsubscribe();
        store.set_active("home").unwrap();

        assert_eq!(hits.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn reentrant_set_active_delivers_latest_state_last() {
        let store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _redirect = {
            let inner = store.clone();
            store.subscribe(move |state| {
                if state.active_id == "public-good" {
                    inner.set_active("distribution").unwrap();
                }
            })
        };
        let _record = {
            let seen = seen.clone();
            store.subscribe(move |state| seen.borrow_mut().push(state.active_id.clone()))
        };

        store.set_active("public-good").unwrap();

        assert_eq!(store.active_id(), "distribution");
        assert_eq!(seen.borrow().last().map(String::as_str), Some("distribution"));
    }

    #[test]
    fn interaction_timestamps_are_monotonic() {
        let store = store();
        store.mark_interaction(Duration::from_millis(500));
        store.mark_interaction(Duration::from_millis(200));
        assert_eq!(
            store.current().last_interaction_at,
            Some(Duration::from_millis(500))
        );
    }
}
