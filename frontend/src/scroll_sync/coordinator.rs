//! Active-section state machine.
//!
//! Three signals feed one `ActiveSectionState`:
//!
//! - passive visibility ratios reported per section while the user scrolls,
//! - explicit navigation (nav links, dividers, wheel/keyboard paging),
//! - the URL fragment, read once on construction.
//!
//! The machine is either `Idle` or `Navigating(target)`. Navigation starts a
//! programmatic scroll and ignores passive signals for every other section
//! until the target becomes visible or the navigation timeout fires. Either
//! way exactly one `set_active(target)` follows. In `Idle`, a section must stay
//! the dominant visible section above the activation threshold for the
//! debounce window before it becomes active.
//!
//! Time and side effects go through [`ScrollHost`], so the whole machine runs
//! without a browser.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, warn};

use super::error::{Result, ScrollSyncError};
use super::fragment::resolve_initial_section;
use super::input::PagingInput;
use super::registry::{Direction, SectionRegistry};
use super::store::ActiveSectionStore;
use crate::config::ScrollSyncConfig;

pub type TimerId = u64;

/// Side effects the coordinator needs from its environment.
pub trait ScrollHost {
    /// Monotonic time since page load.
    fn now(&self) -> Duration;

    /// Start a smooth scroll that brings section `id` to the top of the viewport.
    fn scroll_to(&mut self, id: &str);

    /// Rewrite the URL fragment to `#id` without adding a history entry.
    fn replace_fragment(&mut self, id: &str);

    /// Arrange for `ScrollSyncCoordinator::on_timer(timer)` after `delay`.
    fn schedule(&mut self, timer: TimerId, delay: Duration);

    fn cancel(&mut self, timer: TimerId);
}

/// An in-flight programmatic scroll.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollIntent {
    pub target_id: String,
    pub started_at: Duration,
    /// Passive signals for other sections are ignored until this instant.
    pub suppress_until: Duration,
    timer: TimerId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Navigating(ScrollIntent),
}

#[derive(Debug, Clone, PartialEq)]
struct PendingActivation {
    id: String,
    timer: TimerId,
}

pub struct ScrollSyncCoordinator<H> {
    registry: Rc<SectionRegistry>,
    store: ActiveSectionStore,
    host: H,
    config: ScrollSyncConfig,
    phase: Phase,
    pending: Option<PendingActivation>,
    ratios: HashMap<String, f64>,
    paging: PagingInput,
    next_timer: TimerId,
}

impl<H: ScrollHost> ScrollSyncCoordinator<H> {
    /// Seeds the store from `initial_hash` (the raw `location.hash`). An
    /// unknown or malformed fragment is logged and the first section is used.
    pub fn new(
        store: ActiveSectionStore,
        host: H,
        config: ScrollSyncConfig,
        initial_hash: Option<&str>,
    ) -> Self {
        let registry = Rc::clone(store.registry());

        let (initial, rejected) = resolve_initial_section(&registry, initial_hash);
        if let Some(id) = rejected {
            warn!(
                "Ignoring URL fragment: {}; starting at {}",
                ScrollSyncError::unknown(id),
                initial
            );
        }
        if store.active_id() != initial {
            if let Err(e) = store.set_active(initial) {
                warn!("Could not seed active section: {}", e);
            }
        }

        let paging = PagingInput::new(&config);
        Self {
            registry,
            store,
            host,
            config,
            phase: Phase::Idle,
            pending: None,
            ratios: HashMap::new(),
            paging,
            next_timer: 0,
        }
    }

    pub fn store(&self) -> &ActiveSectionStore {
        &self.store
    }

    pub fn config(&self) -> &ScrollSyncConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Scrolls to `id` and activates it once the scroll settles.
    ///
    /// Repeating the call for the section already being navigated to is a
    /// no-op. A call for a different section supersedes the in-flight one.
    /// A section already reported visible settles without entering
    /// `Navigating`.
    pub fn navigate_to(&mut self, id: &str) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(ScrollSyncError::unknown(id));
        }
        if let Phase::Navigating(intent) = &self.phase {
            if intent.target_id == id {
                debug!("Already navigating to {}", id);
                return Ok(());
            }
        }

        let now = self.host.now();
        if let Phase::Navigating(old) = std::mem::replace(&mut self.phase, Phase::Idle) {
            debug!("Navigation to {} superseded by {}", old.target_id, id);
            self.host.cancel(old.timer);
        }
        self.clear_pending();

        self.store.mark_interaction(now);
        self.host.scroll_to(id);

        // Already in view: the observer will not report it again.
        if self.ratios.get(id).map_or(false, |&r| r >= self.config.activation_threshold) {
            debug!("{} already visible; settling without waiting", id);
            self.commit(id);
            return Ok(());
        }

        let timeout = self.config.navigation_timeout();
        let interacted = self.store.current().last_interaction_at.unwrap_or(now);
        let timer = self.allocate_timer();
        self.host.schedule(timer, timeout);
        self.phase = Phase::Navigating(ScrollIntent {
            target_id: id.to_string(),
            started_at: now,
            suppress_until: interacted + timeout,
            timer,
        });
        debug!("Navigating to {}", id);
        Ok(())
    }

    /// Visibility update for one section. `visible_ratio` is clamped to 0..=1.
    pub fn handle_passive_signal(&mut self, id: &str, visible_ratio: f64) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(ScrollSyncError::unknown(id));
        }
        if visible_ratio.is_nan() {
            debug!("Dropping NaN visibility ratio for {}", id);
            return Ok(());
        }
        let ratio = visible_ratio.clamp(0.0, 1.0);
        self.ratios.insert(id.to_string(), ratio);

        let target = match &self.phase {
            Phase::Navigating(intent) => Some((intent.target_id.clone(), intent.suppress_until)),
            Phase::Idle => None,
        };
        match target {
            None => self.consider_activation(id, ratio),
            Some((target, suppress_until)) if target != id => {
                if self.host.now() < suppress_until {
                    debug!(
                        "Suppressed passive signal for {} ({:.2}) while navigating to {}",
                        id, ratio, target
                    );
                } else {
                    // The timeout is overdue; settle now instead of waiting on it.
                    self.finish_navigation(true);
                }
            }
            Some(_) => {
                if ratio >= self.config.activation_threshold {
                    self.finish_navigation(true);
                }
            }
        }
        Ok(())
    }

    /// Pages one section forward or back. Does nothing at the first/last
    /// section unless the boundary is configured to wrap.
    pub fn handle_directional_input(&mut self, direction: Direction) -> Result<()> {
        let base = match &self.phase {
            Phase::Navigating(intent) => intent.target_id.clone(),
            Phase::Idle => self.store.active_id(),
        };
        let target = match self
            .registry
            .neighbor_with(&base, direction, self.config.boundary)
        {
            Some(section) => section.id.clone(),
            None => {
                debug!("No section {:?} of {}", direction, base);
                return Ok(());
            }
        };
        self.navigate_to(&target)
    }

    /// Raw vertical wheel delta from the input source.
    pub fn handle_wheel(&mut self, delta_y: f64) -> Result<()> {
        let now = self.host.now();
        match self.paging.wheel(delta_y, now) {
            Some(direction) => self.handle_directional_input(direction),
            None => Ok(()),
        }
    }

    /// Raw `KeyboardEvent.key` value from the input source.
    pub fn handle_key(&mut self, key: &str) -> Result<()> {
        let now = self.host.now();
        match self.paging.key(key, now) {
            Some(direction) => self.handle_directional_input(direction),
            None => Ok(()),
        }
    }

    pub fn on_timer(&mut self, timer: TimerId) {
        if let Phase::Navigating(intent) = &self.phase {
            if intent.timer == timer {
                let waited = self.host.now().saturating_sub(intent.started_at);
                warn!(
                    "{}; forcing completion",
                    ScrollSyncError::ScrollTimeout {
                        target: intent.target_id.clone(),
                        waited,
                    }
                );
                self.finish_navigation(false);
                return;
            }
        }

        match self.pending.take() {
            Some(pending) if pending.timer == timer => {
                if self.is_dominant(&pending.id) && self.store.active_id() != pending.id {
                    self.commit(&pending.id);
                } else {
                    debug!("Dropping stale activation of {}", pending.id);
                }
            }
            other => {
                self.pending = other;
                debug!("Ignoring stale timer {}", timer);
            }
        }
    }

    fn consider_activation(&mut self, id: &str, ratio: f64) {
        if ratio < self.config.activation_threshold {
            if self.pending.as_ref().map_or(false, |p| p.id == id) {
                debug!("{} dropped below the activation threshold", id);
                self.clear_pending();
            }
            return;
        }
        if self.store.active_id() == id {
            self.clear_pending();
            return;
        }
        if !self.is_dominant(id) {
            return;
        }
        if self.pending.as_ref().map_or(false, |p| p.id == id) {
            return;
        }

        self.clear_pending();
        let debounce = self.config.activation_debounce();
        if debounce.is_zero() {
            self.commit(id);
            return;
        }
        let timer = self.allocate_timer();
        self.host.schedule(timer, debounce);
        self.pending = Some(PendingActivation {
            id: id.to_string(),
            timer,
        });
    }

    /// Above the threshold and not out-shown by any other section.
    fn is_dominant(&self, id: &str) -> bool {
        let ratio = match self.ratios.get(id) {
            Some(&r) if r >= self.config.activation_threshold => r,
            _ => return false,
        };
        self.ratios
            .iter()
            .all(|(other, &r)| other.as_str() == id || r <= ratio)
    }

    fn finish_navigation(&mut self, cancel_timer: bool) {
        let intent = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Navigating(intent) => intent,
            Phase::Idle => return,
        };
        if cancel_timer {
            self.host.cancel(intent.timer);
        }
        self.commit(&intent.target_id);

        // Signals suppressed during the scroll are not repeated by the
        // observer, so pick up whatever they left dominant.
        if let Some((id, ratio)) = self.most_visible() {
            if id != intent.target_id {
                self.consider_activation(&id, ratio);
            }
        }
    }

    fn most_visible(&self) -> Option<(String, f64)> {
        self.ratios
            .iter()
            .filter(|(_, r)| **r >= self.config.activation_threshold)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(id, &r)| (id.clone(), r))
    }

    fn commit(&mut self, id: &str) {
        match self.store.set_active(id) {
            Ok(()) => {
                self.host.replace_fragment(id);
                info!("Active section is now {}", id);
            }
            Err(e) => warn!("Could not activate section: {}", e),
        }
    }

    fn clear_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.host.cancel(pending.timer);
        }
    }

    fn allocate_timer(&mut self) -> TimerId {
        self.next_timer += 1;
        self.next_timer
    }
}
