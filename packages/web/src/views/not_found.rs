use dioxus::prelude::*;

use crate::Route;

/// Catch-all for paths the router does not know, including the navbar's
/// informational links.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        main {
            class: "not-found",
            h1 { "Page not found" }
            p { "Nothing lives at /{path} yet." }
            Link { to: Route::Landing {}, "Back to MoodVerse" }
        }
    }
}
