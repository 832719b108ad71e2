use dioxus::prelude::*;
use mood::{ChartLayout, MoodChart};

/// SVG line chart of mood levels over time.
///
/// Y ticks are labelled with mood names instead of numbers; each point is
/// filled with its mood's color.
#[component]
pub fn MoodLineChart(chart: MoodChart) -> Element {
    let layout = ChartLayout::default();
    let ticks = MoodChart::y_ticks();
    let coords = layout.coordinates(&chart);
    let line_d = layout.line_path(&chart);
    let area_d = layout.area_path(&chart);
    let label_y = layout.height - 12.0;

    rsx! {
        svg {
            class: "mood-chart",
            view_box: layout.view_box(),
            role: "img",
            "aria-label": "Mood level over time",

            for (level, label) in ticks {
                g {
                    key: "tick-{level}",
                    line {
                        class: "mood-chart-grid",
                        x1: layout.plot_left(),
                        x2: layout.plot_right(),
                        y1: layout.y(level),
                        y2: layout.y(level),
                    }
                    text {
                        class: "mood-chart-tick",
                        x: layout.plot_left() - 10.0,
                        y: layout.y(level) + 4.0,
                        text_anchor: "end",
                        "{label}"
                    }
                }
            }

            path { class: "mood-chart-area", d: area_d }
            path { class: "mood-chart-line", d: line_d }

            for (i, ((x, y), point)) in coords.into_iter().zip(chart.points.iter()).enumerate() {
                g {
                    key: "point-{i}",
                    circle {
                        class: "mood-chart-point",
                        cx: x,
                        cy: y,
                        r: 6.0,
                        fill: point.color,
                    }
                    text {
                        class: "mood-chart-label",
                        x: x,
                        y: label_y,
                        text_anchor: "middle",
                        "{point.label}"
                    }
                }
            }
        }
    }
}
