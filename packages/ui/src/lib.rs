//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
}

pub mod views;

mod backend;
pub use backend::{use_backend, BackendProvider};

mod navbar;
pub use navbar::Navbar;

mod footer;
pub use footer::Footer;

mod chart;
pub use chart::MoodLineChart;

mod suggestions;
pub use suggestions::SuggestionPanel;

mod effects;
