use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use log::warn;

use super::coordinator::{ScrollHost, ScrollSyncCoordinator, TimerId};
use super::store::ActiveSectionStore;

/// Everything the page can ask of the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    NavigateTo(String),
    PassiveSignal { id: String, ratio: f64 },
    Wheel(f64),
    Key(String),
    Timer(TimerId),
}

struct Inner<H> {
    coordinator: RefCell<ScrollSyncCoordinator<H>>,
    store: ActiveSectionStore,
    queue: RefCell<VecDeque<Command>>,
    draining: Cell<bool>,
}

/// Shared handle onto the coordinator that is safe to call from any event
/// context.
///
/// Commands are applied in arrival order. A command dispatched while another
/// one is being applied (a store subscriber reacting to an activation by
/// navigating, say) is queued and applied right after it.
pub struct ScrollSync<H> {
    inner: Rc<Inner<H>>,
}

pub struct WeakScrollSync<H> {
    inner: Weak<Inner<H>>,
}

impl<H: ScrollHost> ScrollSync<H> {
    /// `build` gets a weak handle so the host can call back into the driver,
    /// e.g. to deliver timers.
    pub fn new_cyclic(
        build: impl FnOnce(WeakScrollSync<H>) -> ScrollSyncCoordinator<H>,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak| {
            let coordinator = build(WeakScrollSync {
                inner: Weak::clone(weak),
            });
            Inner {
                store: coordinator.store().clone(),
                coordinator: RefCell::new(coordinator),
                queue: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
            }
        });
        Self { inner }
    }

    pub fn store(&self) -> &ActiveSectionStore {
        &self.inner.store
    }

    pub fn navigate_to(&self, id: &str) {
        self.dispatch(Command::NavigateTo(id.to_string()));
    }

    pub fn dispatch(&self, command: Command) {
        self.inner.queue.borrow_mut().push_back(command);
        if self.inner.draining.replace(true) {
            return;
        }
        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let command = match next {
                Some(command) => command,
                None => break,
            };
            let result = {
                let mut coordinator = self.inner.coordinator.borrow_mut();
                match command {
                    Command::NavigateTo(id) => coordinator.navigate_to(&id),
                    Command::PassiveSignal { id, ratio } => {
                        coordinator.handle_passive_signal(&id, ratio)
                    }
                    Command::Wheel(delta_y) => coordinator.handle_wheel(delta_y),
                    Command::Key(key) => coordinator.handle_key(&key),
                    Command::Timer(timer) => {
                        coordinator.on_timer(timer);
                        Ok(())
                    }
                }
            };
            if let Err(e) = result {
                warn!("Scroll sync command ignored: {}", e);
            }
        }
        self.inner.draining.set(false);
    }

    /// Read access to the coordinator between commands.
    pub fn with_coordinator<R>(&self, f: impl FnOnce(&ScrollSyncCoordinator<H>) -> R) -> R {
        f(&self.inner.coordinator.borrow())
    }

    pub fn downgrade(&self) -> WeakScrollSync<H> {
        WeakScrollSync {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<H> WeakScrollSync<H> {
    pub fn upgrade(&self) -> Option<ScrollSync<H>> {
        self.inner.upgrade().map(|inner| ScrollSync { inner })
    }
}

impl<H> Clone for ScrollSync<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H> Clone for WeakScrollSync<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<H> PartialEq for ScrollSync<H> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::ScrollSyncConfig;
    use crate::scroll_sync::coordinator::Phase;
    use crate::scroll_sync::testing::{bald_registry, FakeHost};
    use pretty_assertions::assert_eq;

    fn sync() -> (ScrollSync<FakeHost>, FakeHost) {
        let store = ActiveSectionStore::new(Rc::new(bald_registry()));
        let host = FakeHost::default();
        let coordinator =
            ScrollSyncCoordinator::new(store, host.clone(), ScrollSyncConfig::default(), None);
        (ScrollSync::new_cyclic(|_| coordinator), host)
    }

    fn fire_due(sync: &ScrollSync<FakeHost>, host: &FakeHost) {
        for timer in host.take_due() {
            sync.dispatch(Command::Timer(timer));
        }
    }

    #[test]
    fn subscriber_may_navigate_from_inside_a_notification() {
        let (sync, host) = sync();
        let _sub = {
            let store = sync.store().clone();
            let sync = sync.clone();
            store.subscribe(move |state| {
                if state.active_id == "public-good" {
                    sync.navigate_to("progress");
                }
            })
        };

        sync.navigate_to("public-good");
        sync.dispatch(Command::PassiveSignal {
            id: "public-good".to_string(),
            ratio: 1.0,
        });

        assert_eq!(sync.store().active_id(), "public-good");
        assert_eq!(host.log().scrolls, vec!["public-good", "progress"]);
        sync.with_coordinator(|c| {
            assert!(matches!(c.phase(), Phase::Navigating(i) if i.target_id == "progress"));
        });

        host.advance(Duration::from_millis(1_000));
        fire_due(&sync, &host);
        assert_eq!(sync.store().active_id(), "progress");
    }

    #[test]
    fn commands_apply_in_order() {
        let (sync, host) = sync();
        sync.navigate_to("progress");
        sync.navigate_to("home");
        host.advance(Duration::from_millis(1_000));
        fire_due(&sync, &host);

        assert_eq!(sync.store().active_id(), "home");
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn errors_are_recovered_locally() {
        let (sync, host) = sync();
        sync.navigate_to("roadmap");
        sync.dispatch(Command::PassiveSignal {
            id: "footer".to_string(),
            ratio: 1.0,
        });
        sync.navigate_to("distribution");

        assert_eq!(host.log().scrolls, vec!["distribution"]);
    }

    #[test]
    fn weak_handle_does_not_keep_driver_alive() {
        let (sync, _host) = sync();
        let weak = sync.downgrade();
        assert!(weak.upgrade().is_some());
        drop(sync);
        assert!(weak.upgrade().is_none());
    }
}
