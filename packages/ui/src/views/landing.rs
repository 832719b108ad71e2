use std::time::Duration;

use dioxus::dioxus_core::spawn_forever;
use dioxus::prelude::*;
use mood::{LandingState, Mood};

use crate::use_backend;

const LANDING_CSS: Asset = asset!("/assets/styling/landing.css");

const SPARKLE_COUNT: usize = 40;
const BADGE_INTERVAL: Duration = Duration::from_secs(2);

/// Welcome screen with the start button and the privacy notice.
///
/// `on_start` fires as soon as the user starts; the "start detection" request
/// is sent afterwards and never blocks it.
#[component]
pub fn LandingView(on_start: EventHandler<()>) -> Element {
    let backend = use_backend();
    let mut state = use_signal(LandingState::default);
    let mut badge = use_signal(|| 0usize);

    // Cycle the floating badge through the mood emojis
    use_effect(move || {
        spawn(async move {
            loop {
                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(BADGE_INTERVAL).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(BADGE_INTERVAL).await;

                badge += 1;
            }
        });
    });

    let handle_start = move |_| {
        if !state.write().start() {
            return;
        }
        on_start.call(());

        // Outlives this screen: navigation has already been issued.
        let backend = backend.clone();
        spawn_forever(async move {
            if let Err(e) = backend.start_mood_detection().await {
                tracing::error!("Mood detection failed: {}", e);
            }
        });
    };

    let current = state();
    let start_label = current.start_label();
    let badge_emoji = Mood::ALL[badge() % Mood::ALL.len()].emoji();

    rsx! {
        document::Stylesheet { href: LANDING_CSS }

        main {
            class: "landing",

            div { class: "landing-logo", "MoodVerse" }

            div {
                class: "landing-sparkles",
                for i in 0..SPARKLE_COUNT {
                    span { key: "{i}", class: "landing-sparkle", style: sparkle_style(i) }
                }
            }

            h1 {
                class: "landing-title",
                "Welcome to "
                span {
                    class: "landing-title-brand",
                    "MoodVerse"
                    span { class: "landing-wave", role: "img", "aria-label": "waving hand", "👋" }
                }
            }

            p {
                class: "landing-subtitle",
                span { class: "landing-subtitle-mood", "Your Mood" }
                " "
                span { class: "landing-subtitle-vibe", "Our Vibe" }
            }

            button {
                class: if current.start_disabled() { "landing-start landing-start--disabled" } else { "landing-start" },
                disabled: current.start_disabled(),
                onclick: handle_start,
                "{start_label}"
            }

            div { class: "landing-float landing-float--left", "{badge_emoji}" }
            div { class: "landing-float landing-float--right", "🤖" }

            button {
                class: "landing-privacy-toggle",
                onclick: move |_| state.write().toggle_privacy(),
                "Privacy Policy"
            }

            if current.privacy_open {
                div {
                    class: "landing-privacy",
                    h3 { "Privacy Notice" }
                    p {
                        "This app will use your "
                        strong { "camera" }
                        " to scan your face and detect your mood. Your privacy is super important: no video or images will be stored or shared."
                    }
                    button {
                        onclick: move |_| state.write().accept_privacy(),
                        "I Understand & Accept"
                    }
                }
            }
        }
    }
}

/// Scatter sparkles with a low-discrepancy sequence so the layout is stable
/// across renders.
fn sparkle_style(i: usize) -> String {
    let top = (i as f64 * 61.803_398_875) % 100.0;
    let left = (i as f64 * 38.196_601_125 + 17.0) % 100.0;
    let duration = 3.0 + (i * 7 % 20) as f64 / 10.0;
    let delay = (i * 13 % 30) as f64 / 10.0;
    format!("top: {top:.1}%; left: {left:.1}%; animation-duration: {duration:.1}s; animation-delay: {delay:.1}s;")
}
