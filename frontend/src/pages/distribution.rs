use yew::prelude::*;

use crate::context::use_site;

#[function_component(Distribution)]
pub fn distribution() -> Html {
    let context = use_site();

    html! {
        <div class="distribution">
            <style>
                {r#"
                    .distribution {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        text-align: center;
                        padding: 4rem 1rem;
                        background: #111827;
                    }
                    .distribution h2 { font-size: 2.25rem; margin-bottom: 1.5rem; }
                    .distribution p { max-width: 36rem; font-size: 1.125rem; }
                    .split {
                        display: flex;
                        gap: 1rem;
                        margin-top: 2rem;
                    }
                    .split div {
                        flex: 1;
                        padding: 1.5rem;
                        border: 1px solid rgba(250, 204, 21, 0.3);
                        border-radius: 1rem;
                    }
                    .split b { display: block; font-size: 2rem; color: #facc15; }
                "#}
            </style>
            <h2>{"Token Distribution"}</h2>
            <p>
                <b>{"50%"}</b>{" of $BALD supply was added to the liquidity pool at "}
                <b>{format!("{} market cap", context.site.current_market_cap)}</b>
                {". The other "}<b>{"50%"}</b>{" was airdropped to the original community."}
            </p>
            <div class="split">
                <div><b>{"50%"}</b>{"Liquidity pool"}</div>
                <div><b>{"50%"}</b>{"Community airdrop"}</div>
            </div>
        </div>
    }
}
