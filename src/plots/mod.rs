//! Plot data builders and their SVG renderers.
//!
//! Builders are pure and return plain structs. `render_*` functions only draw
//! what a builder produced.

use plotters::style::RGBColor;

pub mod boxplot;
pub mod histogram;
pub mod scatter;

pub use boxplot::{BoxStats, box_stats, render_boxplot};
pub use histogram::{ScoreHistogram, render_histogram, score_histogram};
pub use scatter::{PcaScatter, ScatterPoint, pca_scatter, render_scatter};

/// ColorBrewer Set2.
pub const SET2: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

pub fn palette_color(i: usize) -> RGBColor {
    SET2[i % SET2.len()]
}

/// Pads a value range so points on the edges stay visible and a zero-width
/// range still gets an axis.
pub(crate) fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - 0.05 * span, hi + 0.05 * span)
}
