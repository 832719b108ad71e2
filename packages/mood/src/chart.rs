//! Line chart model for the history screen.
//!
//! [`MoodChart`] maps each history entry to a point whose y value is the
//! mood's ordinal level and whose x label is the entry's clock time.
//! [`ChartLayout`] turns those points into SVG coordinates and path data; the
//! UI crate only has to draw what it returns.

use std::fmt::Display;

use chrono::TimeZone;

use crate::history::format_clock;
use crate::models::{HistoryEntry, Mood};

/// Highest ordinal level (happy).
pub const MAX_LEVEL: u8 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub level: u8,
    pub color: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoodChart {
    pub points: Vec<ChartPoint>,
}

impl MoodChart {
    pub fn from_entries<Tz>(entries: &[HistoryEntry], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let points = entries
            .iter()
            .map(|entry| ChartPoint {
                label: format_clock(&entry.time, tz),
                level: entry.level(),
                color: entry.color(),
            })
            .collect();
        Self { points }
    }

    pub fn levels(&self) -> Vec<u8> {
        self.points.iter().map(|p| p.level).collect()
    }

    /// Y axis ticks from 0 to 5, labelled with the upper-cased mood name.
    pub fn y_ticks() -> Vec<(u8, String)> {
        (0..=MAX_LEVEL)
            .map(|level| {
                let label = Mood::from_level(level)
                    .map(|m| m.as_str().to_uppercase())
                    .unwrap_or_else(|| level.to_string());
                (level, label)
            })
            .collect()
    }
}

/// Fixed drawing area of the chart, in SVG user units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    /// Room on the left for the y labels.
    pub inset_left: f64,
    /// Room at the bottom for the x labels.
    pub inset_bottom: f64,
    pub inset_top: f64,
    pub inset_right: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 320.0,
            inset_left: 90.0,
            inset_bottom: 40.0,
            inset_top: 16.0,
            inset_right: 24.0,
        }
    }
}

impl ChartLayout {
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    pub fn plot_left(&self) -> f64 {
        self.inset_left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.inset_right
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.inset_bottom
    }

    /// X coordinate of point `index` out of `count`, spread evenly; a single
    /// point sits in the middle.
    pub fn x(&self, index: usize, count: usize) -> f64 {
        let span = self.plot_right() - self.plot_left();
        if count <= 1 {
            return self.plot_left() + span / 2.0;
        }
        self.plot_left() + span * index as f64 / (count - 1) as f64
    }

    pub fn y(&self, level: u8) -> f64 {
        let span = self.plot_bottom() - self.inset_top;
        self.plot_bottom() - span * f64::from(level.min(MAX_LEVEL)) / f64::from(MAX_LEVEL)
    }

    pub fn coordinates(&self, chart: &MoodChart) -> Vec<(f64, f64)> {
        let count = chart.points.len();
        chart
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (self.x(i, count), self.y(p.level)))
            .collect()
    }

    /// SVG path data for the mood line.
    pub fn line_path(&self, chart: &MoodChart) -> String {
        self.coordinates(chart)
            .iter()
            .enumerate()
            .map(|(i, (x, y))| format!("{}{x:.1},{y:.1}", if i == 0 { "M" } else { " L" }))
            .collect()
    }

    /// SVG path data for the filled area under the line.
    pub fn area_path(&self, chart: &MoodChart) -> String {
        let coords = self.coordinates(chart);
        let (Some((first_x, _)), Some((last_x, _))) = (coords.first(), coords.last()) else {
            return String::new();
        };
        format!(
            "{} L{last_x:.1},{bottom:.1} L{first_x:.1},{bottom:.1} Z",
            self.line_path(chart),
            bottom = self.plot_bottom()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(mood: &str, time: &str) -> HistoryEntry {
        HistoryEntry {
            mood: mood.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_points_map_moods_to_levels() {
        let entries = vec![
            entry("sad", "2024-01-01T00:00:00Z"),
            entry("happy", "2024-01-02T13:30:00Z"),
        ];
        let chart = MoodChart::from_entries(&entries, &Utc);
        assert_eq!(chart.levels(), vec![1, 5]);
        assert_eq!(chart.points[0].label, "12:00 AM");
        assert_eq!(chart.points[1].label, "01:30 PM");
        assert_eq!(chart.points[1].color, "#4ade80");
    }

    #[test]
    fn test_unknown_mood_sits_at_neutral() {
        let chart = MoodChart::from_entries(&[entry("bored", "2024-01-01T00:00:00Z")], &Utc);
        assert_eq!(chart.levels(), vec![3]);
    }

    #[test]
    fn test_y_ticks_name_every_level() {
        let ticks = MoodChart::y_ticks();
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[0], (0, "ANGRY".to_string()));
        assert_eq!(ticks[2], (2, "FEAR".to_string()));
        assert_eq!(ticks[5], (5, "HAPPY".to_string()));
    }

    #[test]
    fn test_layout_geometry() {
        let layout = ChartLayout::default();
        assert_eq!(layout.y(0), layout.plot_bottom());
        assert_eq!(layout.y(MAX_LEVEL), layout.inset_top);
        assert_eq!(layout.x(0, 3), layout.plot_left());
        assert_eq!(layout.x(2, 3), layout.plot_right());
        let middle = (layout.plot_left() + layout.plot_right()) / 2.0;
        assert_eq!(layout.x(0, 1), middle);
    }

    #[test]
    fn test_paths() {
        let layout = ChartLayout::default();
        let chart = MoodChart::from_entries(
            &[
                entry("angry", "2024-01-01T00:00:00Z"),
                entry("happy", "2024-01-01T01:00:00Z"),
            ],
            &Utc,
        );
        assert_eq!(layout.line_path(&chart), "M90.0,280.0 L696.0,16.0");
        assert_eq!(
            layout.area_path(&chart),
            "M90.0,280.0 L696.0,16.0 L696.0,280.0 L90.0,280.0 Z"
        );
        assert_eq!(layout.area_path(&MoodChart::default()), "");
    }
}
