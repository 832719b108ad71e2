//! # Domain models for moods, identities and records
//!
//! These are the types that cross the boundary between the browser and the
//! mood backend. They are `Serialize + Deserialize` so the API client can put
//! them on the wire as JSON unchanged.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Mood`] | One of the six moods the detection service can report. Also carries the fixed presentation tables (emoji, chart level, color, copy, suggestion links). |
//! | [`Identity`] | The name/age pair a user enters on the scan screen. Mood history is keyed on it. |
//! | [`MoodRecord`] | A detected mood stamped with the identity and an ISO-8601 time, posted to `/mood-track`. |
//! | [`HistoryEntry`] | One `{ mood, time }` element returned by `/mood-history`. |
//! | [`MoodUpdate`] | Payload of the realtime `moodUpdate` event. |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A mood reported by the detection service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Neutral,
    Surprise,
    Fear,
}

/// Returned when a string is not one of the six mood names.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0:?}")]
pub struct UnknownMood(pub String);

/// Chart level used for moods the client does not recognise.
pub const FALLBACK_LEVEL: u8 = 3;
/// List color used for moods the client does not recognise.
pub const FALLBACK_COLOR: &str = "#f55e61";

impl Mood {
    /// Every mood, ordered by chart level.
    pub const ALL: [Mood; 6] = [
        Mood::Angry,
        Mood::Sad,
        Mood::Fear,
        Mood::Neutral,
        Mood::Surprise,
        Mood::Happy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
            Mood::Surprise => "surprise",
            Mood::Fear => "fear",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😄",
            Mood::Sad => "😢",
            Mood::Angry => "😡",
            Mood::Neutral => "😐",
            Mood::Surprise => "😲",
            Mood::Fear => "😱",
        }
    }

    /// Ordinal position on the history chart's y axis, from angry (0) to happy (5).
    pub fn level(self) -> u8 {
        match self {
            Mood::Angry => 0,
            Mood::Sad => 1,
            Mood::Fear => 2,
            Mood::Neutral => 3,
            Mood::Surprise => 4,
            Mood::Happy => 5,
        }
    }

    /// Inverse of [`Mood::level`].
    pub fn from_level(level: u8) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| m.level() == level)
    }

    /// Color used for this mood in the history list and chart points.
    pub fn color(self) -> &'static str {
        match self {
            Mood::Happy => "#4ade80",
            Mood::Sad => "#60a5fa",
            Mood::Angry => "#f87171",
            Mood::Fear => "#facc15",
            Mood::Surprise => "#a78bfa",
            Mood::Neutral => "#a3a3a3",
        }
    }

    /// Whether detecting this mood fires the confetti effect.
    pub fn celebrates(self) -> bool {
        matches!(self, Mood::Happy | Mood::Surprise)
    }

    /// CSS modifier selecting the scan screen background for this mood.
    pub fn theme_class(self) -> &'static str {
        match self {
            Mood::Happy => "scan-page--happy",
            Mood::Sad => "scan-page--sad",
            Mood::Angry => "scan-page--angry",
            Mood::Neutral => "scan-page--neutral",
            Mood::Surprise => "scan-page--surprise",
            Mood::Fear => "scan-page--fear",
        }
    }

    /// One-liner shown under the emoji on the scan screen.
    pub fn quip(self) -> &'static str {
        match self {
            Mood::Happy => "Spread the vibe! Text someone you love 💚",
            Mood::Sad => "Take a deep breath. Want to see a meme? 🫂",
            Mood::Angry => "Punch a pillow, not your code 😤",
            Mood::Neutral => "Hmm... chill for now 🧘",
            Mood::Surprise => "Whoa! Didn't see that coming 😯",
            Mood::Fear => "It's okay, you've got this 💪",
        }
    }

    /// Text placed above the suggestion links on the history screen.
    pub fn headline(self) -> &'static str {
        match self {
            Mood::Happy => "😊 You're glowing! Keep riding that good vibe.",
            Mood::Sad => "😢 Feeling blue? Here's something to cheer you up!",
            Mood::Angry => "😡 Breathe out the rage. Try these to relax.",
            Mood::Fear => "😨 Fear not. Get motivated or calm down.",
            Mood::Surprise => "😲 Something unexpected? Enjoy these!",
            Mood::Neutral => "😐 Take it easy with these suggestions.",
        }
    }

    /// Text copied to the clipboard by the "Share Your Mood" button.
    pub fn share_text(self) -> String {
        format!(
            "I'm currently {} {} according to MoodVerse AI 🧠",
            self.emoji(),
            self.as_str().to_uppercase()
        )
    }

    pub fn suggestions(self) -> &'static [Suggestion] {
        match self {
            Mood::Happy => &HAPPY_SUGGESTIONS,
            Mood::Sad => &SAD_SUGGESTIONS,
            Mood::Angry => &ANGRY_SUGGESTIONS,
            Mood::Fear => &FEAR_SUGGESTIONS,
            Mood::Surprise => &SURPRISE_SUGGESTIONS,
            Mood::Neutral => &NEUTRAL_SUGGESTIONS,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Kind of an external suggestion link, used to pick the button style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionKind {
    Spotify,
    Meme,
    Fun,
}

impl SuggestionKind {
    pub fn class(self) -> &'static str {
        match self {
            SuggestionKind::Spotify => "suggestion-link--spotify",
            SuggestionKind::Meme => "suggestion-link--meme",
            SuggestionKind::Fun => "suggestion-link--fun",
        }
    }
}

/// A canned external link offered for a mood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub label: &'static str,
    pub url: &'static str,
    pub kind: SuggestionKind,
}

const fn suggestion(label: &'static str, url: &'static str, kind: SuggestionKind) -> Suggestion {
    Suggestion { label, url, kind }
}

static HAPPY_SUGGESTIONS: [Suggestion; 3] = [
    suggestion(
        "Celebrate with a happy playlist 🎶",
        "https://open.spotify.com/playlist/37i9dQZF1DXdPec7aLTmlC",
        SuggestionKind::Spotify,
    ),
    suggestion(
        "See happy memes 😄",
        "https://www.google.com/search?q=happy+memes&tbm=isch",
        SuggestionKind::Meme,
    ),
    suggestion("Try a fun online game 🎮", "https://poki.com/", SuggestionKind::Fun),
];

static SAD_SUGGESTIONS: [Suggestion; 3] = [
    suggestion(
        "Cheer up with wholesome memes 🥰",
        "https://www.google.com/search?q=wholesome+memes&tbm=isch",
        SuggestionKind::Meme,
    ),
    suggestion(
        "Listen to uplifting music 🎵",
        "https://open.spotify.com/playlist/37i9dQZF1DX3rxVfibe1L0",
        SuggestionKind::Spotify,
    ),
    suggestion(
        "Watch a cute animal video 🐶",
        "https://www.youtube.com/results?search_query=cute+animal+videos",
        SuggestionKind::Fun,
    ),
];

static ANGRY_SUGGESTIONS: [Suggestion; 3] = [
    suggestion(
        "Calm down with chill beats 🎧",
        "https://open.spotify.com/playlist/37i9dQZF1DX4WYpdgoIcn6",
        SuggestionKind::Spotify,
    ),
    suggestion(
        "Laugh it off with funny memes 😂",
        "https://www.google.com/search?q=funny+memes&tbm=isch",
        SuggestionKind::Meme,
    ),
    suggestion(
        "Try a breathing exercise 🌬️",
        "https://www.youtube.com/results?search_query=breathing+exercise",
        SuggestionKind::Fun,
    ),
];

static FEAR_SUGGESTIONS: [Suggestion; 3] = [
    suggestion(
        "Motivational playlist 💪",
        "https://open.spotify.com/playlist/37i9dQZF1DX1s9knjP51Oa",
        SuggestionKind::Spotify,
    ),
    suggestion(
        "See brave memes 🦁",
        "https://www.google.com/search?q=brave+memes&tbm=isch",
        SuggestionKind::Meme,
    ),
    suggestion(
        "Try a guided meditation 🧘",
        "https://www.youtube.com/results?search_query=guided+meditation",
        SuggestionKind::Fun,
    ),
];

static SURPRISE_SUGGESTIONS: [Suggestion; 3] = [
    suggestion(
        "Surprise playlist! 🎉",
        "https://open.spotify.com/playlist/37i9dQZF1DX0BcQWzuB7ZO",
        SuggestionKind::Spotify,
    ),
    suggestion(
        "Surprised Pikachu memes 😲",
        "https://www.google.com/search?q=surprised+pikachu+memes&tbm=isch",
        SuggestionKind::Meme,
    ),
    suggestion(
        "Random fun fact 🤓",
        "https://www.thefactsite.com/1000-interesting-facts/",
        SuggestionKind::Fun,
    ),
];

static NEUTRAL_SUGGESTIONS: [Suggestion; 3] = [
    suggestion(
        "Chill lo-fi beats ☕",
        "https://open.spotify.com/playlist/37i9dQZF1DX4WYpdgoIcn6",
        SuggestionKind::Spotify,
    ),
    suggestion(
        "Neutral memes 😐",
        "https://www.google.com/search?q=neutral+memes&tbm=isch",
        SuggestionKind::Meme,
    ),
    suggestion(
        "Try a relaxing puzzle 🧩",
        "https://www.jigsawplanet.com/",
        SuggestionKind::Fun,
    ),
];

/// The name/age pair mood history is keyed on.
///
/// Both fields are stored trimmed. `age` stays a string because the backend
/// matches it textually.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub age: String,
}

impl Identity {
    pub fn new(name: &str, age: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            age: age.trim().to_string(),
        }
    }

    /// True when either field is empty after trimming.
    pub fn is_incomplete(&self) -> bool {
        self.name.trim().is_empty() || self.age.trim().is_empty()
    }

    /// Exact comparison of trimmed fields against raw form input.
    pub fn matches(&self, name: &str, age: &str) -> bool {
        self.name.trim() == name.trim() && self.age.trim() == age.trim()
    }
}

/// A detected mood ready to be posted to `/mood-track`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub name: String,
    pub age: String,
    pub mood: Mood,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub time: String,
}

impl MoodRecord {
    pub fn new(identity: &Identity, mood: Mood, at: DateTime<Utc>) -> Self {
        Self {
            name: identity.name.clone(),
            age: identity.age.clone(),
            mood,
            time: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            age: self.age.clone(),
        }
    }
}

/// One element of the `/mood-history` response.
///
/// `mood` is kept as the raw string so a single unexpected value from the
/// backend does not fail the whole response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mood: String,
    pub time: String,
}

impl HistoryEntry {
    pub fn parsed_mood(&self) -> Option<Mood> {
        self.mood.parse().ok()
    }

    pub fn level(&self) -> u8 {
        self.parsed_mood().map_or(FALLBACK_LEVEL, Mood::level)
    }

    pub fn color(&self) -> &'static str {
        self.parsed_mood().map_or(FALLBACK_COLOR, Mood::color)
    }
}

/// Payload of the realtime `moodUpdate` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodUpdate {
    pub mood: String,
}
