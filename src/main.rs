use dioxus::prelude::*;

use ecou_fm_player::components::RadioPlayer;

const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Meta { name: "theme-color", content: "#14161c" }
        document::Stylesheet { href: PLAYER_CSS }

        main { class: "player-shell", RadioPlayer {} }
    }
}
