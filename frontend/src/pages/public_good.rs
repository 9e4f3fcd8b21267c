use yew::prelude::*;

#[function_component(PublicGood)]
pub fn public_good() -> Html {
    html! {
        <div class="public-good">
            <style>
                {r#"
                    .public-good {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        text-align: center;
                        padding: 4rem 1rem;
                        color: #111827;
                        background: linear-gradient(to bottom right, #f3f4f6, #fef9c3);
                    }
                    .public-good h2 { font-size: 2.25rem; margin-bottom: 1.5rem; }
                    .public-good p { max-width: 42rem; font-size: 1.125rem; }
                "#}
            </style>
            <h2>{"A Public Good"}</h2>
            <p>
                {"$BALD exists as a public good with a single purpose: to bootstrap new liquidity for the original $BALD token. "}
                {"No roadmap, no promises - just a community-driven initiative to strengthen the $BALD ecosystem."}
            </p>
        </div>
    }
}
