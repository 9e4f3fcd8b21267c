//! Deterministic host for driving the coordinator in unit tests.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use super::coordinator::{ScrollHost, TimerId};
use super::registry::SectionRegistry;

pub fn bald_registry() -> SectionRegistry {
    SectionRegistry::new([
        ("home", "Home", None),
        ("public-good", "Public Good", Some("Public Good")),
        ("distribution", "Distribution", Some("Distribution")),
        ("progress", "Progress", Some("Progress Tracker")),
    ])
    .unwrap()
}

#[derive(Debug)]
pub struct HostLog {
    pub now: Duration,
    pub scrolls: Vec<String>,
    pub fragments: Vec<String>,
    pub cancelled: Vec<TimerId>,
    timers: BTreeMap<TimerId, Duration>,
}

impl Default for HostLog {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            scrolls: Vec::new(),
            fragments: Vec::new(),
            cancelled: Vec::new(),
            timers: BTreeMap::new(),
        }
    }
}

/// Clones share one log and one clock.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    log: Rc<RefCell<HostLog>>,
}

impl FakeHost {
    pub fn log(&self) -> Ref<'_, HostLog> {
        self.log.borrow()
    }

    pub fn advance(&self, by: Duration) {
        self.log.borrow_mut().now += by;
    }

    /// Removes and returns timers due at the current time, earliest first.
    pub fn take_due(&self) -> Vec<TimerId> {
        let mut log = self.log.borrow_mut();
        let now = log.now;
        let mut due: Vec<(Duration, TimerId)> = log
            .timers
            .iter()
            .filter(|(_, &at)| at <= now)
            .map(|(&id, &at)| (at, id))
            .collect();
        due.sort();
        for (_, id) in &due {
            log.timers.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.log.borrow().timers.len()
    }
}

impl ScrollHost for FakeHost {
    fn now(&self) -> Duration {
        self.log.borrow().now
    }

    fn scroll_to(&mut self, id: &str) {
        self.log.borrow_mut().scrolls.push(id.to_string());
    }

    fn replace_fragment(&mut self, id: &str) {
        self.log.borrow_mut().fragments.push(id.to_string());
    }

    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        let mut log = self.log.borrow_mut();
        let at = log.now + delay;
        log.timers.insert(timer, at);
    }

    fn cancel(&mut self, timer: TimerId) {
        let mut log = self.log.borrow_mut();
        if log.timers.remove(&timer).is_some() {
            log.cancelled.push(timer);
        }
    }
}
