use dioxus::prelude::*;

const SHELL_CSS: Asset = asset!("/assets/styling/shell.css");

#[component]
pub fn Navbar() -> Element {
    rsx! {
        document::Stylesheet { href: SHELL_CSS }
        nav {
            class: "navbar",
            a { class: "navbar-brand", href: "/", "MoodVerse" }
            div { class: "navbar-spacer" }
            div {
                class: "navbar-links",
                a { class: "navbar-link", href: "/privacy-policy", "Privacy Policy" }
                a { class: "navbar-link", href: "/about-us", "About Us" }
            }
        }
    }
}
