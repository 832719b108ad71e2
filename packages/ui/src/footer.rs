use dioxus::prelude::*;

use crate::icons::{FaFacebook, FaYoutube};
use crate::Icon;

const SHELL_CSS: Asset = asset!("/assets/styling/shell.css");

#[component]
pub fn Footer() -> Element {
    rsx! {
        document::Stylesheet { href: SHELL_CSS }
        footer {
            class: "footer",
            p { class: "footer-talk", "Let’s Talk 💬" }
            p { class: "footer-rights", "All Rights Reserved 2025" }
            div {
                class: "footer-social",
                span { title: "Facebook", Icon { icon: FaFacebook, width: 30, height: 30 } }
                span { title: "YouTube", Icon { icon: FaYoutube, width: 32, height: 32 } }
            }
        }
    }
}
