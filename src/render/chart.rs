//! SVG line chart of a financial projection.

use maud::{html, Markup};

use crate::models::{format_usd, ProjectionRow};

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 400.0;

const MARGIN_TOP: f64 = 20.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 110.0;
const Y_TICKS: usize = 5;

/// One plotted series: label, stroke color and value accessor.
struct Series {
    label: &'static str,
    color: &'static str,
    value: fn(&ProjectionRow) -> f64,
}

static SERIES: [Series; 3] = [
    Series {
        label: "cumulativeRevenue",
        color: "#8884d8",
        value: cumulative_revenue,
    },
    Series {
        label: "cumulativeCosts",
        color: "#82ca9d",
        value: cumulative_costs,
    },
    Series {
        label: "netCashFlow",
        color: "#ffc658",
        value: net_cash_flow,
    },
];

fn cumulative_revenue(row: &ProjectionRow) -> f64 {
    row.cumulative_revenue
}

fn cumulative_costs(row: &ProjectionRow) -> f64 {
    row.cumulative_costs
}

fn net_cash_flow(row: &ProjectionRow) -> f64 {
    row.net_cash_flow
}

/// Maps data coordinates onto the plot area.
struct Scale {
    max_year: f64,
    min_value: f64,
    max_value: f64,
}

impl Scale {
    fn for_rows(rows: &[ProjectionRow]) -> Self {
        let max_year = rows.iter().map(|r| r.year).max().unwrap_or(0).max(1) as f64;
        let values = rows
            .iter()
            .flat_map(|row| SERIES.iter().map(move |s| (s.value)(row)));
        let (mut min_value, mut max_value) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if max_value - min_value < f64::EPSILON {
            min_value -= 1.0;
            max_value += 1.0;
        }
        Self {
            max_year,
            min_value,
            max_value,
        }
    }

    fn x(&self, year: f64) -> f64 {
        MARGIN_LEFT + year / self.max_year * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + (self.max_value - value) / (self.max_value - self.min_value) * plot_height
    }
}

fn coord(value: f64) -> String {
    format!("{:.1}", value)
}

/// The projection as an SVG element with three lines, a dashed grid, axis
/// labels and a legend.
pub fn chart_markup(rows: &[ProjectionRow]) -> Markup {
    let scale = Scale::for_rows(rows);
    let view_box = format!("0 0 {} {}", WIDTH, HEIGHT);
    let mid_y = HEIGHT / 2.0;
    let legend_y = HEIGHT - 10.0;

    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(WIDTH as u32) height=(HEIGHT as u32) viewBox=(view_box)
            font-family="sans-serif" font-size="12" {
            @for i in 0..=Y_TICKS {
                @let value = scale.min_value
                    + (scale.max_value - scale.min_value) * i as f64 / Y_TICKS as f64;
                @let y = scale.y(value);
                line x1=(coord(MARGIN_LEFT)) y1=(coord(y)) x2=(coord(WIDTH - MARGIN_RIGHT)) y2=(coord(y))
                    stroke="#ccc" stroke-dasharray="3 3" {}
                text x=(coord(MARGIN_LEFT - 6.0)) y=(coord(y + 4.0)) text-anchor="end" {
                    (format_usd(value))
                }
            }

            @for row in rows.iter().filter(|r| r.year % 5 == 0) {
                text x=(coord(scale.x(f64::from(row.year)))) y=(coord(HEIGHT - MARGIN_BOTTOM + 16.0))
                    text-anchor="middle" {
                    (row.year)
                }
            }

            text x=(coord(WIDTH - MARGIN_RIGHT)) y=(coord(legend_y)) text-anchor="end" { "Years" }
            text x="14" y=(coord(mid_y)) transform=(format!("rotate(-90 14 {:.1})", mid_y))
                text-anchor="middle" { "USD" }

            @for series in &SERIES {
                polyline class="series" data-series=(series.label) fill="none" stroke=(series.color)
                    stroke-width="2" points=(points(&scale, rows, series)) {}
            }

            @for (i, series) in SERIES.iter().enumerate() {
                @let x = MARGIN_LEFT + 20.0 + i as f64 * 180.0;
                rect x=(coord(x)) y=(coord(legend_y - 5.0)) width="12" height="3" fill=(series.color) {}
                text x=(coord(x + 16.0)) y=(coord(legend_y)) { (series.label) }
            }
        }
    }
}

/// Standalone SVG document for `/chart.svg`.
pub fn render_chart(rows: &[ProjectionRow]) -> String {
    chart_markup(rows).into_string()
}

fn points(scale: &Scale, rows: &[ProjectionRow], series: &Series) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{},{}",
                coord(scale.x(f64::from(row.year))),
                coord(scale.y((series.value)(row)))
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project;

    #[test]
    fn draws_one_line_per_series() {
        let svg = render_chart(&project(100.0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 3);
        assert!(svg.contains(r#"data-series="netCashFlow""#));
    }

    #[test]
    fn every_row_becomes_a_point() {
        let svg = render_chart(&project(10.0));
        let polyline = svg
            .split("<polyline")
            .find(|l| l.contains(r#"data-series="cumulativeRevenue""#))
            .unwrap();
        let points = polyline.split("points=\"").nth(1).unwrap();
        let points = &points[..points.find('"').unwrap()];
        assert_eq!(points.split(' ').count(), 26);
    }

    #[test]
    fn flat_zero_projection_still_renders() {
        let svg = render_chart(&project(0.0));
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches("<polyline").count(), 3);
    }
}
