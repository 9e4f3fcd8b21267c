use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod context;
mod milestones;
mod page_title;
mod scroll_sync {
    pub mod coordinator;
    pub mod driver;
    pub mod error;
    pub mod fragment;
    pub mod input;
    pub mod registry;
    pub mod store;
    pub mod web;
    #[cfg(test)]
    pub mod testing;
}
mod components {
    pub mod divider;
    pub mod footer;
    pub mod header;
}
mod pages {
    pub mod distribution;
    pub mod hero;
    pub mod landing;
    pub mod progress;
    pub mod public_good;
}

use context::SiteContext;
use pages::landing::Landing;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering landing page");
            html! { <Landing /> }
        }
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

#[function_component]
fn App() -> Html {
    let context = use_state(SiteContext::load);

    match &*context {
        Ok(context) => {
            let basename = AttrValue::from(context.site.base_path.clone());
            html! {
                <ContextProvider<SiteContext> context={context.clone()}>
                    <BrowserRouter basename={Some(basename)}>
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                </ContextProvider<SiteContext>>
            }
        }
        Err(e) => html! {
            <p class="load-error">{format!("Could not start the page: {}", e)}</p>
        },
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting $BALD landing page");
    yew::Renderer::<App>::new().render();
}
