//! Browser bindings: timers, smooth scrolling, history, and the visibility
//! and input sources that feed the coordinator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use log::{debug, error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::{Array, Date};
use web_sys::{
    AddEventListenerOptions, Document, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, WheelEvent, Window,
};

use super::coordinator::{ScrollHost, ScrollSyncCoordinator, TimerId};
use super::driver::{Command, ScrollSync};
use super::error::{Result, ScrollSyncError};
use super::fragment::hash_for;
use super::input::{paging_enabled, paging_key};
use super::store::ActiveSectionStore;
use crate::config::ScrollSyncConfig;

pub type WebScrollSync = ScrollSync<WebHost>;

fn dom_error(context: &str, e: JsValue) -> ScrollSyncError {
    ScrollSyncError::Dom(format!("{}: {:?}", context, e))
}

pub struct WebHost {
    window: Window,
    timers: Rc<RefCell<HashMap<TimerId, Timeout>>>,
    fire: Rc<dyn Fn(TimerId)>,
}

impl WebHost {
    pub fn new(window: Window, fire: impl Fn(TimerId) + 'static) -> Self {
        Self {
            window,
            timers: Rc::new(RefCell::new(HashMap::new())),
            fire: Rc::new(fire),
        }
    }
}

impl ScrollHost for WebHost {
    fn now(&self) -> Duration {
        let ms = match self.window.performance() {
            Some(performance) => performance.now(),
            None => Date::now(),
        };
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }

    fn scroll_to(&mut self, id: &str) {
        let element = self
            .window
            .document()
            .and_then(|document| document.get_element_by_id(id));
        match element {
            Some(element) => {
                let mut options = ScrollIntoViewOptions::new();
                options
                    .behavior(ScrollBehavior::Smooth)
                    .block(ScrollLogicalPosition::Start);
                element.scroll_into_view_with_scroll_into_view_options(&options);
            }
            None => error!("No element with id {} to scroll to", id),
        }
    }

    fn replace_fragment(&mut self, id: &str) {
        let result = self.window.history().and_then(|history| {
            history.replace_state_with_url(&JsValue::NULL, "", Some(&hash_for(id)))
        });
        if let Err(e) = result {
            error!("{}", dom_error("history.replaceState", e));
        }
    }

    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        let timers = Rc::clone(&self.timers);
        let fire = Rc::clone(&self.fire);
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || {
            // Deliver once this callback has returned, so the Timeout that owns
            // it can be dropped from the map.
            spawn_local(async move {
                timers.borrow_mut().remove(&timer);
                fire(timer);
            });
        });
        self.timers.borrow_mut().insert(timer, timeout);
    }

    fn cancel(&mut self, timer: TimerId) {
        // Dropping a Timeout clears it.
        self.timers.borrow_mut().remove(&timer);
    }
}

/// Builds the page's coordinator, seeded from the current `location.hash`.
pub fn create(
    window: Window,
    store: ActiveSectionStore,
    config: ScrollSyncConfig,
) -> WebScrollSync {
    let hash = window.location().hash().ok();
    ScrollSync::new_cyclic(move |weak| {
        let host = WebHost::new(window, move |timer| {
            if let Some(sync) = weak.upgrade() {
                sync.dispatch(Command::Timer(timer));
            }
        });
        ScrollSyncCoordinator::new(store, host, config, hash.as_deref())
    })
}

/// Larger of the section's own visible ratio and the share of the viewport it
/// fills, so sections taller than the viewport can still become dominant.
fn visible_ratio(entry: &IntersectionObserverEntry) -> f64 {
    let own = entry.intersection_ratio();
    match entry.root_bounds().map(|bounds| bounds.height()) {
        Some(viewport) if viewport > 0.0 => own.max(entry.intersection_rect().height() / viewport),
        _ => own,
    }
}

/// Reports visibility changes of every registered section element.
pub struct SectionObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl SectionObserver {
    pub fn attach(sync: &WebScrollSync, document: &Document) -> Result<Self> {
        let target = sync.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    target.dispatch(Command::PassiveSignal {
                        id: entry.target().id(),
                        ratio: visible_ratio(&entry),
                    });
                }
            },
        );

        let thresholds = Array::new();
        for step in 0..=20 {
            thresholds.push(&JsValue::from_f64(step as f64 / 20.0));
        }
        let mut init = IntersectionObserverInit::new();
        init.threshold(&thresholds);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| dom_error("IntersectionObserver", e))?;

        let registry = sync.store().registry().clone();
        for section in registry.all() {
            match document.get_element_by_id(&section.id) {
                Some(element) => observer.observe(&element),
                None => error!("Section {} has no element to observe", section.id),
            }
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or_default()
}

/// Wheel and arrow/page keys turn whole sections on wide viewports.
pub struct PagingListeners {
    window: Window,
    wheel: Closure<dyn FnMut(WheelEvent)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

impl PagingListeners {
    pub fn attach(sync: &WebScrollSync, window: &Window) -> Result<Self> {
        let config = sync.with_coordinator(|c| c.config().clone());

        let wheel = {
            let sync = sync.clone();
            let window = window.clone();
            let config = config.clone();
            Closure::<dyn FnMut(WheelEvent)>::new(move |e: WheelEvent| {
                if !paging_enabled(viewport_width(&window), &config) {
                    return;
                }
                e.prevent_default();
                sync.dispatch(Command::Wheel(e.delta_y()));
            })
        };

        let keydown = {
            let sync = sync.clone();
            let window = window.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                let key = e.key();
                if paging_key(&key).is_none() || !paging_enabled(viewport_width(&window), &config) {
                    return;
                }
                e.prevent_default();
                sync.dispatch(Command::Key(key));
            })
        };

        let mut options = AddEventListenerOptions::new();
        options.passive(false);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                wheel.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| dom_error("wheel listener", e))?;
        window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .map_err(|e| dom_error("keydown listener", e))?;

        Ok(Self {
            window: window.clone(),
            wheel,
            keydown,
        })
    }
}

impl Drop for PagingListeners {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("wheel", self.wheel.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
    }
}

/// Live browser wiring; dropping it detaches everything.
pub struct ScrollSyncWiring {
    _observer: SectionObserver,
    _paging: PagingListeners,
}

/// Attaches the visibility and input sources once the section elements exist,
/// then brings a fragment-selected section into view.
pub fn attach(sync: &WebScrollSync) -> Result<ScrollSyncWiring> {
    let window = web_sys::window().ok_or_else(|| ScrollSyncError::Dom("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ScrollSyncError::Dom("no document".to_string()))?;

    let observer = SectionObserver::attach(sync, &document)?;
    let paging = PagingListeners::attach(sync, &window)?;

    let active = sync.store().active_id();
    if active != sync.store().registry().first().id {
        info!("Restoring section {} from URL", active);
        sync.navigate_to(&active);
    } else {
        debug!("Scroll sync attached at {}", active);
    }

    Ok(ScrollSyncWiring {
        _observer: observer,
        _paging: paging,
    })
}
