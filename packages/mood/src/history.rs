//! What the history screen shows for a fetched mood sequence.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::chart::MoodChart;
use crate::models::{HistoryEntry, Mood};

/// Shown above the suggestions when the last mood is not recognised.
pub const GENERIC_SUGGESTION: &str = "Let's explore something based on your mood!";

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineRow {
    pub time: String,
    pub mood: String,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub rows: Vec<TimelineRow>,
    pub chart: MoodChart,
    /// Mood of the last record, which picks the suggestion panel.
    pub last_mood: Option<Mood>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HistoryDisplay {
    /// Nothing to show yet. An empty response also lands here.
    Loading,
    Timeline(Timeline),
}

impl HistoryDisplay {
    pub fn from_entries<Tz>(entries: &[HistoryEntry], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let Some(last) = entries.last() else {
            return HistoryDisplay::Loading;
        };
        let rows = entries
            .iter()
            .map(|entry| TimelineRow {
                time: format_timestamp(&entry.time, tz),
                mood: entry.mood.clone(),
                color: entry.color(),
            })
            .collect();
        HistoryDisplay::Timeline(Timeline {
            rows,
            chart: MoodChart::from_entries(entries, tz),
            last_mood: last.parsed_mood(),
        })
    }
}

fn parse_time<Tz>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>>
where
    Tz: TimeZone,
{
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(tz));
    }
    // Backends that drop the offset send naive local timestamps.
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    tz.from_local_datetime(&naive).earliest()
}

/// `M/D/YYYY, h:mm:ss AM` in `tz`, or the raw string when unparseable.
pub fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_time(raw, tz) {
        Some(time) => time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => raw.to_string(),
    }
}

/// `hh:mm AM` in `tz`, or the raw string when unparseable.
pub fn format_clock<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_time(raw, tz) {
        Some(time) => time.format("%I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn entry(mood: &str, time: &str) -> HistoryEntry {
        HistoryEntry {
            mood: mood.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_empty_history_stays_loading() {
        assert_eq!(HistoryDisplay::from_entries(&[], &Utc), HistoryDisplay::Loading);
    }

    #[test]
    fn test_last_record_picks_suggestions() {
        let entries = vec![
            entry("sad", "2024-01-01T00:00:00Z"),
            entry("happy", "2024-01-02T00:00:00Z"),
        ];
        let HistoryDisplay::Timeline(timeline) = HistoryDisplay::from_entries(&entries, &Utc) else {
            panic!("expected a timeline");
        };
        assert_eq!(timeline.chart.levels(), vec![1, 5]);
        assert_eq!(timeline.last_mood, Some(Mood::Happy));
        assert_eq!(timeline.rows.len(), 2);
        assert_eq!(timeline.rows[0].time, "1/1/2024, 12:00:00 AM");
        assert_eq!(timeline.rows[0].mood, "sad");
        assert_eq!(timeline.rows[0].color, "#60a5fa");
    }

    #[test]
    fn test_unknown_last_mood_has_no_suggestions() {
        let entries = vec![entry("happy", "2024-01-01T00:00:00Z"), entry("meh", "oops")];
        let HistoryDisplay::Timeline(timeline) = HistoryDisplay::from_entries(&entries, &Utc) else {
            panic!("expected a timeline");
        };
        assert_eq!(timeline.last_mood, None);
        assert_eq!(timeline.rows[1].time, "oops");
        assert_eq!(timeline.rows[1].color, "#f55e61");
    }

    #[test]
    fn test_formats_in_requested_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(format_clock("2024-06-01T10:15:00.000Z", &ist), "03:45 PM");
        assert_eq!(
            format_timestamp("2024-06-01T10:15:00+00:00", &ist),
            "6/1/2024, 3:45:00 PM"
        );
    }

    #[test]
    fn test_naive_timestamps_are_read_as_local() {
        assert_eq!(format_clock("2024-06-01T10:15:30.123456", &Utc), "10:15 AM");
    }
}
