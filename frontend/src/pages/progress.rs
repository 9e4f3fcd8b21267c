use gloo_timers::callback::Timeout;
use log::error;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::context::use_site;
use crate::milestones::{
    format_market_cap, level_progress, parse_market_cap, parse_milestones, reached_level,
    Milestone,
};

#[derive(Properties, PartialEq)]
struct LevelCardProps {
    milestone: Milestone,
    market_cap: f64,
    lit: bool,
    selected: bool,
    on_select: Callback<u32>,
}

#[function_component(LevelCard)]
fn level_card(props: &LevelCardProps) -> Html {
    let onclick = {
        let level = props.milestone.level;
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(level))
    };
    let progress = level_progress(props.market_cap, props.milestone.market_cap);

    html! {
        <div class={classes!("level-card", props.lit.then(|| "lit"))} onclick={onclick}>
            <span class="level-name">{format!("Level {}", props.milestone.level)}</span>
            <div class="level-bar">
                <div class="level-fill" style={format!("width: {:.0}%;", progress)}></div>
            </div>
            {
                if props.selected {
                    html! {
                        <div class="level-tooltip">
                            {format!(
                                "Unlocks at {} market cap ({:.1}% there)",
                                props.milestone.label, progress
                            )}
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[function_component(ProgressTracker)]
pub fn progress_tracker() -> Html {
    let context = use_site();
    let selected = use_state(|| None::<u32>);
    let shown_level = use_state(|| 0u32);

    let milestones = match parse_milestones(&context.site.milestones) {
        Ok(milestones) => milestones,
        Err(e) => {
            error!("Bad milestone config: {}", e);
            Vec::new()
        }
    };
    let market_cap = match parse_market_cap(&context.site.current_market_cap) {
        Ok(cap) => cap,
        Err(e) => {
            error!("Bad market cap: {}", e);
            0.0
        }
    };
    let reached = reached_level(market_cap, &milestones);
    let total = milestones.len();

    // Count the lit levels up one at a time.
    {
        let shown_setter = shown_level.setter();
        use_effect_with_deps(
            move |&(shown, reached): &(u32, u32)| {
                let timeout = (shown < reached).then(|| {
                    Timeout::new(150, move || shown_setter.set(shown + 1))
                });
                move || drop(timeout)
            },
            (*shown_level, reached),
        );
    }

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |level: u32| {
            if *selected == Some(level) {
                selected.set(None);
            } else {
                selected.set(Some(level));
            }
        })
    };

    html! {
        <div class="progress-tracker">
            <style>
                {r#"
                    .progress-tracker {
                        min-height: 100vh;
                        padding: 4rem 1rem;
                        text-align: center;
                        color: #111827;
                        background: #fef9c3;
                    }
                    .progress-tracker h2 { font-size: 2.25rem; margin-bottom: 0.5rem; }
                    .level-grid {
                        display: flex;
                        flex-wrap: wrap;
                        justify-content: center;
                        gap: 1rem;
                        max-width: 72rem;
                        margin: 2rem auto 0;
                    }
                    .level-card {
                        position: relative;
                        width: 7rem;
                        padding: 1rem 0.5rem;
                        border-radius: 9999px;
                        color: #fff;
                        background: linear-gradient(to bottom right, #9ca3af, #4b5563);
                        cursor: pointer;
                        transition: transform 0.3s;
                    }
                    .level-card:hover { transform: scale(1.1); }
                    .level-card.lit { background: linear-gradient(to bottom right, #facc15, #ca8a04); }
                    .level-name { font-weight: 700; }
                    .level-bar {
                        height: 0.25rem;
                        margin-top: 0.5rem;
                        background: rgba(255, 255, 255, 0.3);
                    }
                    .level-fill { height: 100%; background: #fff; }
                    .level-tooltip {
                        position: absolute;
                        top: 110%;
                        left: 50%;
                        transform: translateX(-50%);
                        width: 12rem;
                        padding: 0.5rem;
                        border-radius: 0.5rem;
                        font-size: 0.75rem;
                        background: #111827;
                        z-index: 10;
                    }
                "#}
            </style>
            <h2>{"Baldness Levels"}</h2>
            <p>{format!("Market cap: {} · Level {} of {}", format_market_cap(market_cap), *shown_level, total)}</p>
            <div class="level-grid">
                { for milestones.into_iter().map(|milestone| {
                    let level = milestone.level;
                    html! {
                        <LevelCard
                            key={level}
                            milestone={milestone}
                            market_cap={market_cap}
                            lit={level <= *shown_level}
                            selected={*selected == Some(level)}
                            on_select={on_select.clone()}
                        />
                    }
                }) }
            </div>
        </div>
    }
}
