use yew::prelude::*;
use web_sys::MouseEvent;

use crate::context::{use_active_section, use_site};

const SOCIAL_LINKS: [(&str, &str); 3] = [
    ("Twitter", "https://twitter.com"),
    ("Telegram", "https://t.me"),
    ("Discord", "https://discord.com"),
];

#[derive(Properties, PartialEq)]
struct NavLinkProps {
    id: String,
    label: String,
    active: bool,
    on_select: Callback<String>,
    #[prop_or_default]
    mobile: bool,
}

#[function_component(NavLink)]
fn nav_link(props: &NavLinkProps) -> Html {
    let onclick = {
        let id = props.id.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_select.emit(id.clone());
        })
    };

    html! {
        <a
            href={format!("#{}", props.id)}
            class={classes!(
                if props.mobile { "mobile-nav-link" } else { "nav-link" },
                props.active.then(|| "active"),
            )}
            aria-current={props.active.then(|| "location")}
            onclick={onclick}
        >
            {&props.label}
        </a>
    }
}

fn social_links() -> Html {
    html! {
        <div class="social-links">
            { for SOCIAL_LINKS.iter().map(|(name, href)| html! {
                <a href={*href} target="_blank" rel="noopener noreferrer" class="social-link">
                    {*name}
                </a>
            }) }
        </div>
    }
}

#[function_component(Header)]
pub fn header() -> Html {
    let context = use_site();
    let active = use_active_section();
    let menu_open = use_state(|| false);

    let on_select = {
        let sync = context.sync.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |id: String| {
            menu_open.set(false);
            sync.navigate_to(&id);
        })
    };

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let go_home = {
        let on_select = on_select.clone();
        let first = context.sync.store().registry().first().id.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_select.emit(first.clone());
        })
    };

    let links = |mobile: bool| -> Html {
        html! {
            <>{ for context.site.sections.iter().map(|section| html! {
                <NavLink
                    id={section.id.clone()}
                    label={section.label.clone()}
                    active={section.id == active}
                    on_select={on_select.clone()}
                    mobile={mobile}
                />
            }) }</>
        }
    };

    html! {
        <div class="header-shell">
            <style>
                {r#"
                    .header-shell {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 50;
                        display: flex;
                        justify-content: center;
                        padding: 1rem 1rem 0;
                    }
                    .site-nav {
                        width: 100%;
                        max-width: 80rem;
                        background: rgba(0, 0, 0, 0.2);
                        backdrop-filter: blur(12px);
                        border: 1px solid rgba(250, 204, 21, 0.2);
                        border-radius: 1rem;
                        padding: 1rem 1.5rem;
                    }
                    .nav-row {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                    }
                    .nav-logo {
                        font-size: 1.5rem;
                        font-weight: 700;
                        color: #facc15;
                        text-decoration: none;
                    }
                    .nav-links, .nav-actions, .social-links {
                        display: flex;
                        align-items: center;
                        gap: 2rem;
                    }
                    .social-links { gap: 0.75rem; }
                    .nav-link, .mobile-nav-link, .social-link {
                        color: #e5e7eb;
                        text-decoration: none;
                        transition: color 0.2s;
                    }
                    .nav-link:hover, .mobile-nav-link:hover, .social-link:hover,
                    .nav-link.active, .mobile-nav-link.active {
                        color: #facc15;
                    }
                    .buy-button {
                        background: #facc15;
                        color: #000;
                        padding: 0.5rem 1rem;
                        border-radius: 0.5rem;
                        font-weight: 700;
                        font-size: 0.875rem;
                        text-decoration: none;
                    }
                    .burger-menu {
                        display: none;
                        background: none;
                        border: none;
                        color: #facc15;
                        font-size: 1.5rem;
                        cursor: pointer;
                    }
                    .mobile-menu {
                        display: none;
                        flex-direction: column;
                        gap: 1rem;
                        margin-top: 1rem;
                        padding-top: 1rem;
                        border-top: 1px solid rgba(250, 204, 21, 0.2);
                    }
                    @media (max-width: 767px) {
                        .nav-links, .nav-actions { display: none; }
                        .burger-menu { display: block; }
                        .mobile-menu.open { display: flex; }
                    }
                "#}
            </style>
            <nav class="site-nav">
                <div class="nav-row">
                    <a href="#" class="nav-logo" onclick={go_home}>{"$BALD"}</a>
                    <div class="nav-links">{ links(false) }</div>
                    <div class="nav-actions">
                        { social_links() }
                        <a href="#" class="buy-button">{"BUY $BALD"}</a>
                    </div>
                    <button class="burger-menu" aria-label="Menu" onclick={toggle_menu}>{"☰"}</button>
                </div>
                <div class={classes!("mobile-menu", (*menu_open).then(|| "open"))}>
                    { links(true) }
                    <div class="nav-row">
                        { social_links() }
                        <a href="#" class="buy-button">{"BUY $BALD"}</a>
                    </div>
                </div>
            </nav>
        </div>
    }
}
