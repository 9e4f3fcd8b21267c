use std::rc::Rc;

use yew::prelude::*;

use crate::config::SiteConfig;
use crate::scroll_sync::error::{Result, ScrollSyncError};
use crate::scroll_sync::store::ActiveSectionStore;
use crate::scroll_sync::web::{self, WebScrollSync};

/// Page-wide state handed to every component through a context provider.
#[derive(Clone, PartialEq)]
pub struct SiteContext {
    pub site: Rc<SiteConfig>,
    pub sync: WebScrollSync,
}

impl SiteContext {
    pub fn load() -> Result<Self> {
        let site = SiteConfig::load();
        let registry = Rc::new(site.registry()?);
        let store = ActiveSectionStore::new(registry);
        let window =
            web_sys::window().ok_or_else(|| ScrollSyncError::Dom("no window".to_string()))?;
        let sync = web::create(window, store, site.scroll.clone());
        Ok(Self {
            site: Rc::new(site),
            sync,
        })
    }
}

#[hook]
pub fn use_site() -> SiteContext {
    use_context::<SiteContext>().expect("SiteContext provider is missing")
}

/// Id of the active section, re-rendering the caller whenever it changes.
#[hook]
pub fn use_active_section() -> String {
    let context = use_site();
    let active = use_state(|| context.sync.store().active_id());

    {
        let active = active.clone();
        use_effect_with_deps(
            move |store: &ActiveSectionStore| {
                active.set(store.active_id());
                let subscription =
                    store.subscribe(move |state| active.set(state.active_id.clone()));
                move || drop(subscription)
            },
            context.sync.store().clone(),
        );
    }

    (*active).clone()
}
