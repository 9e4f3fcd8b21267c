use chrono::Datelike;
use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = chrono::Local::now().year();
    html! {
        <footer class="site-footer">
            <p>{format!("© {} $BALD Memecoin. All Rights Reserved.", year)}</p>
        </footer>
    }
}
