use api::{BackendClient, RealtimeClient, EVENT_MOOD_UPDATE, EVENT_REQUEST_SCAN};
use chrono::Utc;
use dioxus::prelude::*;
use futures::StreamExt;
use mood::{Identity, Mood, MoodRecord, MoodUpdate, ScanEffect, ScanMachine, ScanWarning};

use crate::effects::{copy_to_clipboard, fire_confetti, use_confetti_script};
use crate::use_backend;

const SCAN_CSS: Asset = asset!("/assets/styling/scan.css");

/// Identity form plus live mood readout.
///
/// `on_recorded` receives the identity once a detected mood has been stored,
/// which is the cue to move on to the history screen.
#[component]
pub fn ScanView(on_recorded: EventHandler<Identity>) -> Element {
    let backend = use_backend();
    let mut machine = use_signal(ScanMachine::new);
    let mut name = use_signal(String::new);
    let mut age = use_signal(String::new);

    let realtime = use_hook(|| match backend.realtime() {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::error!("Failed to open realtime channel: {}", e);
            None
        }
    });

    use_confetti_script();

    let submitted = use_memo(move || machine.read().is_submitted());

    // Subscribe once the form is accepted; drain events inside the UI runtime
    let subscription = realtime.clone();
    let persist_backend = backend.clone();
    use_effect(move || {
        let Some(client) = subscription.clone() else {
            return;
        };
        if !submitted() {
            client.off(EVENT_MOOD_UPDATE);
            return;
        }

        let mut updates = client.on(EVENT_MOOD_UPDATE);
        let backend = persist_backend.clone();
        spawn(async move {
            while let Some(payload) = updates.next().await {
                let Some(mood) = parse_update(payload) else {
                    continue;
                };
                let effect = machine.write().receive(mood, Utc::now());
                let Ok(ScanEffect::Persist { record, celebrate }) = effect else {
                    continue;
                };
                if celebrate {
                    fire_confetti();
                }

                let backend = backend.clone();
                spawn(async move {
                    if let Some(identity) = persist_record(&backend, &record).await {
                        on_recorded.call(identity);
                    }
                });
            }
        });
    });

    let teardown = realtime.clone();
    use_drop(move || {
        if let Some(client) = teardown {
            client.off(EVENT_MOOD_UPDATE);
            client.close();
        }
    });

    let request_scan = realtime.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let effect = machine.write().submit(&name.read(), &age.read());
        if effect.is_ok() {
            emit_scan(request_scan.as_ref());
        }
    };

    let rescan_channel = realtime.clone();
    let handle_rescan = move |_| {
        let effect = machine.write().rescan(&name.read(), &age.read());
        if effect.is_ok() {
            emit_scan(rescan_channel.as_ref());
        }
    };

    let current = machine();
    let detected = current.mood();
    let theme = detected.map(Mood::theme_class).unwrap_or_default();
    let warning = current.warning().map(|w: ScanWarning| w.to_string());
    let readout = detected
        .map(|mood| mood.as_str().to_uppercase())
        .unwrap_or_else(|| "Waiting...".to_string());

    rsx! {
        document::Stylesheet { href: SCAN_CSS }

        main {
            class: "scan-page {theme}",

            h1 { class: "scan-title", "🧠 MoodVerse" }

            p {
                class: "scan-note",
                strong { "Note:" }
                " Use the "
                strong { "same Name and Age" }
                " every time to view your mood history."
            }

            if let Some(warning) = warning {
                div { class: "scan-warning", role: "alert", "{warning}" }
            }

            if !current.is_submitted() {
                form {
                    class: "scan-form",
                    onsubmit: handle_submit,
                    label { r#for: "name", "Name" }
                    input {
                        id: "name",
                        r#type: "text",
                        placeholder: "Enter your name",
                        autocomplete: "off",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                    label { r#for: "age", "Age" }
                    input {
                        id: "age",
                        r#type: "number",
                        placeholder: "Enter your age",
                        autocomplete: "off",
                        min: "1",
                        max: "120",
                        value: "{age}",
                        oninput: move |evt| age.set(evt.value()),
                    }
                    button { r#type: "submit", "Start Mood Detection" }
                }
            } else {
                section {
                    class: "scan-result",
                    h2 {
                        "Detected Mood: "
                        span { class: "scan-result-mood", "{readout}" }
                    }
                    if let Some(mood) = detected {
                        MoodReadout { mood }
                    }
                    div {
                        class: "scan-actions",
                        if let Some(mood) = detected {
                            button {
                                class: "scan-share",
                                onclick: move |_| copy_to_clipboard(&mood.share_text()),
                                "Share Your Mood"
                            }
                        }
                        button { class: "scan-again", onclick: handle_rescan, "Scan Again" }
                    }
                }
            }
        }
    }
}

#[component]
fn MoodReadout(mood: Mood) -> Element {
    let emoji = mood.emoji();
    let quip = mood.quip();

    rsx! {
        div { class: "scan-emoji", "{emoji}" }
        p { class: "scan-quip", "{quip}" }
    }
}

/// Store `record`; the identity to navigate with on success.
async fn persist_record(backend: &BackendClient, record: &MoodRecord) -> Option<Identity> {
    match backend.track_mood(record).await {
        Ok(()) => Some(record.identity()),
        Err(e) => {
            tracing::error!("Error posting mood: {}", e);
            None
        }
    }
}

fn emit_scan(client: Option<&RealtimeClient>) {
    match client {
        Some(client) => client.emit(EVENT_REQUEST_SCAN),
        None => tracing::warn!("no realtime channel; scan request not sent"),
    }
}

/// Pull a known mood out of a `moodUpdate` payload.
fn parse_update(payload: serde_json::Value) -> Option<Mood> {
    let update: MoodUpdate = match serde_json::from_value(payload) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!("Malformed mood update: {}", e);
            return None;
        }
    };
    match update.mood.parse() {
        Ok(mood) => Some(mood),
        Err(e) => {
            tracing::warn!("Ignoring mood update: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mood::config::BackendConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(BackendConfig {
            url: server.uri(),
            ..BackendConfig::default()
        })
    }

    fn record() -> MoodRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        MoodRecord::new(&Identity::new(" Ada & Co ", "36"), Mood::Happy, at)
    }

    #[tokio::test]
    async fn test_stored_record_yields_identity_for_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mood-track"))
            .and(body_partial_json(json!({"name": "Ada & Co", "mood": "happy"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let identity = persist_record(&client_for(&server), &record()).await;

        assert_eq!(identity, Some(Identity::new("Ada & Co", "36")));
    }

    #[tokio::test]
    async fn test_failed_store_does_not_navigate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mood-track"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(persist_record(&client_for(&server), &record()).await, None);
    }

    #[test]
    fn test_parse_update_accepts_known_moods() {
        assert_eq!(parse_update(json!({"mood": "surprise"})), Some(Mood::Surprise));
    }

    #[test]
    fn test_parse_update_ignores_unknown_and_malformed() {
        assert_eq!(parse_update(json!({"mood": "bored"})), None);
        assert_eq!(parse_update(json!("happy")), None);
        assert_eq!(parse_update(serde_json::Value::Null), None);
    }
}
