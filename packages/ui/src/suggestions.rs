use dioxus::prelude::*;
use mood::history::GENERIC_SUGGESTION;
use mood::Mood;

/// Canned links for the most recent mood.
#[component]
pub fn SuggestionPanel(mood: Option<Mood>) -> Element {
    let Some(mood) = mood else {
        return rsx! {
            div { class: "suggestion-headline", "{GENERIC_SUGGESTION}" }
        };
    };
    let headline = mood.headline();

    rsx! {
        div { class: "suggestion-headline", "{headline}" }
        div {
            class: "suggestion-links",
            for suggestion in mood.suggestions().iter() {
                a {
                    key: "{suggestion.url}",
                    class: format!("suggestion-link {}", suggestion.kind.class()),
                    href: suggestion.url,
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "{suggestion.label}"
                }
            }
        }
    }
}
