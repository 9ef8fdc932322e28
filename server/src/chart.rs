//! Inline SVG charts for the dashboard.

use std::fmt::Write as _;

use workforce_hr::SeriesPoint;

const PADDING: f64 = 4.0;
const BAR_GAP: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 120.0,
        }
    }
}

impl ChartSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn inner_width(self) -> f64 {
        (self.width - 2.0 * PADDING).max(0.0)
    }

    fn inner_height(self) -> f64 {
        (self.height - 2.0 * PADDING).max(0.0)
    }
}

fn open_svg(size: ChartSize) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = size.width,
        h = size.height
    )
}

/// Rendered in place of a chart when the series is empty.
pub fn placeholder(size: ChartSize) -> String {
    let mut svg = open_svg(size);
    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle">No data</text></svg>"#,
        size.width / 2.0,
        size.height / 2.0
    );
    svg
}

fn bounds(points: &[SeriesPoint]) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.value), hi.max(p.value))
    })
}

/// Map each point to drawing coordinates.
///
/// x is spaced evenly (a lone point sits in the middle); y is scaled linearly
/// between min and max, with a flat series drawn at mid-height.
pub fn line_coordinates(points: &[SeriesPoint], size: ChartSize) -> Vec<(f64, f64)> {
    let (min, max) = bounds(points);
    let (w, h) = (size.inner_width(), size.inner_height());
    let steps = points.len().saturating_sub(1);
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = if steps == 0 {
                PADDING + w / 2.0
            } else {
                PADDING + w * i as f64 / steps as f64
            };
            let y = if max > min {
                PADDING + (max - p.value) / (max - min) * h
            } else {
                PADDING + h / 2.0
            };
            (x, y)
        })
        .collect()
}

pub fn line_chart(points: &[SeriesPoint], size: ChartSize) -> String {
    if points.is_empty() {
        return placeholder(size);
    }
    let coords = line_coordinates(points, size);
    let polyline = coords
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut svg = open_svg(size);
    let _ = write!(
        svg,
        r#"<polyline fill="none" stroke="currentColor" stroke-width="2" points="{polyline}"/>"#
    );
    for (point, (x, y)) in points.iter().zip(&coords) {
        let _ = write!(
            svg,
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="2"><title>{}: {}</title></circle>"#,
            escape(&point.label),
            point.value
        );
    }
    svg.push_str("</svg>");
    svg
}

pub fn bar_chart(points: &[SeriesPoint], size: ChartSize) -> String {
    if points.is_empty() {
        return placeholder(size);
    }
    let (_, max) = bounds(points);
    let (w, h) = (size.inner_width(), size.inner_height());
    let slot = w / points.len() as f64;
    let gap = slot * BAR_GAP;
    let mut svg = open_svg(size);
    for (i, point) in points.iter().enumerate() {
        // Baseline is zero; negative values draw nothing.
        let bar = if max > 0.0 {
            point.value.max(0.0) / max * h
        } else {
            0.0
        };
        let x = PADDING + slot * i as f64 + gap / 2.0;
        let y = PADDING + h - bar;
        let _ = write!(
            svg,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{:.1}" height="{bar:.1}"><title>{}: {}</title></rect>"#,
            slot - gap,
            escape(&point.label),
            point.value
        );
    }
    svg.push_str("</svg>");
    svg
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
