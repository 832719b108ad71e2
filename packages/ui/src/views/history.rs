use dioxus::prelude::*;
use mood::{HistoryDisplay, HistoryQuery, Identity};

use crate::{use_backend, MoodLineChart, SuggestionPanel};

const HISTORY_CSS: Asset = asset!("/assets/styling/history.css");

/// Mood timeline, chart and suggestions for the identity in `query`.
#[component]
pub fn HistoryView(query: HistoryQuery, on_home: EventHandler<()>) -> Element {
    let backend = use_backend();

    let identity_signal = use_query_identity(&query);

    let entries = use_resource(move || {
        let backend = backend.clone();
        let identity = identity_signal();
        async move {
            let Some(identity) = identity else {
                return Vec::new();
            };
            match backend.mood_history(&identity).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::error!("Error fetching history: {}", e);
                    Vec::new()
                }
            }
        }
    });

    let display = match &*entries.read() {
        Some(entries) => HistoryDisplay::from_entries(entries, &chrono::Local),
        None => HistoryDisplay::Loading,
    };

    rsx! {
        document::Stylesheet { href: HISTORY_CSS }

        main {
            class: "history",
            h1 { class: "history-title", "🧠 Mood History" }
            p {
                class: "history-identity",
                "Name: {query.name} | Age: {query.age}"
            }

            match display {
                HistoryDisplay::Loading => rsx! {
                    p { class: "history-loading", "Loading your mood history..." }
                },
                HistoryDisplay::Timeline(timeline) => rsx! {
                    section {
                        class: "history-card",
                        h2 { "Mood Timeline" }
                        ul {
                            class: "history-list",
                            for (i, row) in timeline.rows.into_iter().enumerate() {
                                li {
                                    key: "{i}",
                                    span { class: "history-time", "{row.time}" }
                                    span {
                                        class: "history-mood",
                                        style: "color: {row.color};",
                                        "{row.mood}"
                                    }
                                }
                            }
                        }
                    }
                    section {
                        class: "history-card",
                        h2 { "Mood Line Chart" }
                        MoodLineChart { chart: timeline.chart }
                    }
                    section {
                        class: "history-card",
                        h2 { "Mood Suggestions 💡" }
                        SuggestionPanel { mood: timeline.last_mood }
                    }
                },
            }

            button {
                class: "history-home",
                onclick: move |_| on_home.call(()),
                "← Return to Home"
            }
        }
    }
}

/// Mirror the route query into a signal so the fetch reruns when only the
/// props change (back/forward between two history URLs).
fn use_query_identity(query: &HistoryQuery) -> Signal<Option<Identity>> {
    let mut identity = use_signal(|| query.identity());
    let next = refreshed_identity(&identity.peek(), query);
    if let Some(next) = next {
        identity.set(next);
    }
    identity
}

/// The new identity when `query` no longer matches `current`.
fn refreshed_identity(current: &Option<Identity>, query: &HistoryQuery) -> Option<Option<Identity>> {
    let next = query.identity();
    (*current != next).then_some(next)
}
