use std::fmt;

use dioxus::prelude::*;
use dioxus::router::FromQuery;

use mood::{ClientConfig, HistoryQuery};
use ui::{BackendProvider, Footer, Navbar};
use views::{Landing, MoodHistory, NotFound, Scan};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Landing {},
        #[route("/mood-detection")]
        Scan {},
        #[route("/moodhistory?:..query")]
        MoodHistory { query: HistoryParams },
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

/// `?name=..&age=..` on the history route.
///
/// The router percent-decodes the whole query before `from_query`, so the
/// values are encoded twice on the way out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryParams(pub HistoryQuery);

impl FromQuery for HistoryParams {
    fn from_query(query: &str) -> Self {
        Self(HistoryQuery::from_route_query(query))
    }
}

impl fmt::Display for HistoryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_route_query())
    }
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Backend settings baked in at build time.
const CONFIG_TOML: &str = include_str!("../moodverse.toml");

fn main() {
    dioxus::launch(App);
}

fn load_config() -> ClientConfig {
    match ClientConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {}", ClientConfig::filename(), e);
            ClientConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        BackendProvider {
            config,
            Router::<Route> {}
        }
    }
}

/// Navbar and footer around every page.
#[component]
fn Shell() -> Element {
    rsx! {
        Navbar {}
        Outlet::<Route> {}
        Footer {}
    }
}
