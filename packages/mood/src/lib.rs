pub mod chart;
pub mod config;
pub mod history;
pub mod landing;
pub mod models;
pub mod query;
pub mod scan;

pub use chart::{ChartLayout, ChartPoint, MoodChart};
pub use config::{ClientConfig, ConfigError};
pub use history::HistoryDisplay;
pub use landing::{LandingPhase, LandingState};
pub use models::{HistoryEntry, Identity, Mood, MoodRecord, MoodUpdate, Suggestion, SuggestionKind};
pub use query::HistoryQuery;
pub use scan::{ScanEffect, ScanMachine, ScanPhase, ScanWarning};
