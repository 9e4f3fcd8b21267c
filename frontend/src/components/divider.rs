use yew::prelude::*;
use web_sys::MouseEvent;

use crate::context::use_site;
use crate::scroll_sync::registry::Direction;

#[derive(Properties, PartialEq)]
pub struct SectionDividerProps {
    /// Section this divider closes.
    pub section_id: String,
}

/// Bottom edge of a section with a chevron to the next one. The last section
/// only gets a chevron back to the top when paging wraps.
#[function_component(SectionDivider)]
pub fn section_divider(props: &SectionDividerProps) -> Html {
    let context = use_site();
    let registry = context.sync.store().registry().clone();
    let boundary = context.site.scroll.boundary;

    let (target, up) = match registry.neighbor(&props.section_id, Direction::Next) {
        Some(next) => (Some(next.id.clone()), false),
        None => match registry.neighbor_with(&props.section_id, Direction::Next, boundary) {
            Some(first) => (Some(first.id.clone()), true),
            None => (None, false),
        },
    };

    let chevron = match target {
        Some(target) => {
            let sync = context.sync.clone();
            let label = registry
                .get(&target)
                .map(|s| s.label.clone())
                .unwrap_or_default();
            let onclick = Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                sync.navigate_to(&target);
            });
            html! {
                <button
                    class={classes!("divider-chevron", up.then(|| "up"))}
                    aria-label={format!("Go to {}", label)}
                    onclick={onclick}
                >
                    { if up { "⌃" } else { "⌄" } }
                </button>
            }
        }
        None => html! {},
    };

    html! {
        <div class="section-divider">
            <div class="divider-stripes"></div>
            { chevron }
        </div>
    }
}
