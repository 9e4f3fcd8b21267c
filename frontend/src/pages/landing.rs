use log::error;
use yew::prelude::*;

use crate::components::divider::SectionDivider;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::context::use_site;
use crate::page_title::{set_document_title, title_for};
use crate::pages::distribution::Distribution;
use crate::pages::hero::Hero;
use crate::pages::progress::ProgressTracker;
use crate::pages::public_good::PublicGood;
use crate::scroll_sync::store::ActiveSectionStore;
use crate::scroll_sync::web;

fn section_content(id: &str, label: &str) -> Html {
    match id {
        "home" => html! { <Hero /> },
        "public-good" => html! { <PublicGood /> },
        "distribution" => html! { <Distribution /> },
        "progress" => html! { <ProgressTracker /> },
        _ => html! {
            <div class="section-placeholder">
                <h2>{label}</h2>
            </div>
        },
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let context = use_site();

    // Section elements exist once this component has rendered.
    {
        use_effect_with_deps(
            move |sync: &web::WebScrollSync| {
                let wiring = match web::attach(sync) {
                    Ok(wiring) => Some(wiring),
                    Err(e) => {
                        error!("Section tracking disabled: {}", e);
                        None
                    }
                };
                move || drop(wiring)
            },
            context.sync.clone(),
        );
    }

    // Keep the document title in step with the active section.
    {
        let base = context.site.base_title.clone();
        use_effect_with_deps(
            move |store: &ActiveSectionStore| {
                let registry = store.registry().clone();
                set_document_title(&title_for(&base, &registry, &store.active_id()));
                let subscription = {
                    let base = base.clone();
                    store.subscribe(move |state| {
                        set_document_title(&title_for(&base, &registry, &state.active_id));
                    })
                };
                move || {
                    drop(subscription);
                    set_document_title(&base);
                }
            },
            context.sync.store().clone(),
        );
    }

    html! {
        <div class="snap-container">
            <style>
                {r#"
                    html { scroll-behavior: smooth; }
                    body {
                        margin: 0;
                        background: #000;
                        color: #fff;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    }
                    .snap-container main { padding-top: 6rem; }
                    .section-content {
                        position: relative;
                        min-height: 100vh;
                        overflow: hidden;
                    }
                    .section-divider {
                        position: absolute;
                        bottom: 0;
                        left: 0;
                        right: 0;
                        height: 6rem;
                        display: flex;
                        align-items: flex-end;
                        justify-content: center;
                        background: linear-gradient(to top, #000, rgba(0, 0, 0, 0.8), transparent);
                    }
                    .divider-stripes {
                        position: absolute;
                        inset: 0;
                        pointer-events: none;
                        background-image: repeating-linear-gradient(
                            45deg,
                            rgba(250, 204, 21, 0.1),
                            rgba(250, 204, 21, 0.1) 2px,
                            transparent 2px,
                            transparent 20px
                        );
                        animation: stripes 2s linear infinite;
                    }
                    @keyframes stripes {
                        from { background-position: 0 0; }
                        to { background-position: 20px 20px; }
                    }
                    .divider-chevron {
                        position: relative;
                        margin-bottom: 1rem;
                        background: none;
                        border: none;
                        color: #facc15;
                        font-size: 2rem;
                        cursor: pointer;
                    }
                    .site-footer {
                        width: 100%;
                        background: #1f2937;
                        padding: 1.5rem 0;
                        text-align: center;
                    }
                "#}
            </style>
            <Header />
            <main>
                { for context.site.sections.iter().map(|section| html! {
                    <section id={section.id.clone()} class="section-content" key={section.id.clone()}>
                        { section_content(&section.id, &section.label) }
                        <SectionDivider section_id={section.id.clone()} />
                    </section>
                }) }
            </main>
            <Footer />
        </div>
    }
}
