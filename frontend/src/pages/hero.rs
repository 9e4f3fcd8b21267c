use yew::prelude::*;
use web_sys::MouseEvent;

use crate::context::use_site;

#[function_component(Hero)]
pub fn hero() -> Html {
    let context = use_site();

    // The call to action jumps to the progress tracker.
    let onclick = {
        let sync = context.sync.clone();
        let target = context.sync.store().registry().last().id.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            sync.navigate_to(&target);
        })
    };

    html! {
        <div class="hero">
            <style>
                {r#"
                    .hero {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        text-align: center;
                        padding: 2rem;
                        background: linear-gradient(to bottom right, #000, #111827);
                    }
                    .hero h1 {
                        font-size: 3.75rem;
                        margin-bottom: 1.5rem;
                        animation: drop-in 1s ease-out;
                    }
                    .hero p {
                        max-width: 42rem;
                        font-size: 1.125rem;
                        margin-bottom: 2rem;
                    }
                    .hero-cta {
                        background: #facc15;
                        color: #000;
                        border: none;
                        padding: 0.75rem 1.5rem;
                        border-radius: 0.5rem;
                        font-weight: 700;
                        cursor: pointer;
                    }
                    @keyframes drop-in {
                        from { opacity: 0; transform: translateY(-50px); }
                        to { opacity: 1; transform: translateY(0); }
                    }
                "#}
            </style>
            <h1>{"$BALD - A Memecoin Revolution"}</h1>
            <p>
                {"Witness Brian Armstrong get progressively "}<b>{"BALDER"}</b>
                {" as $BALD moonshots to Level 10 baldness!"}
            </p>
            <button class="hero-cta" onclick={onclick}>{"Buy $BALD Now"}</button>
        </div>
    }
}
