use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::expr::ExprMatrix;
use crate::math::stats::quantile_sorted;
use crate::plots::{SET2, padded_range};

const WHISKER_IQR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub sample: String,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Quartiles with linear interpolation; whiskers reach the most extreme
    /// values within 1.5 IQR of the box.
    pub fn from_values(sample: &str, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - WHISKER_IQR * iqr;
        let hi_fence = q3 + WHISKER_IQR * iqr;

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v >= lo_fence && *v <= hi_fence)
            .collect();
        let whisker_low = inside.first().copied().unwrap_or(q1);
        let whisker_high = inside.last().copied().unwrap_or(q3);
        let outliers = sorted
            .into_iter()
            .filter(|v| *v < lo_fence || *v > hi_fence)
            .collect();

        Self {
            sample: sample.to_string(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        }
    }
}

/// One box per sample over its values across all genes.
pub fn box_stats(matrix: &ExprMatrix) -> Vec<BoxStats> {
    matrix
        .samples()
        .iter()
        .enumerate()
        .map(|(s, name)| BoxStats::from_values(name, &matrix.column(s)))
        .collect()
}

pub fn render_boxplot(path: &Path, stats: &[BoxStats]) -> Result<()> {
    let lo = stats
        .iter()
        .flat_map(|b| b.outliers.iter().copied().chain([b.whisker_low]))
        .fold(f64::INFINITY, f64::min);
    let hi = stats
        .iter()
        .flat_map(|b| b.outliers.iter().copied().chain([b.whisker_high]))
        .fold(f64::NEG_INFINITY, f64::max);
    let (y_lo, y_hi) = if lo.is_finite() && hi.is_finite() {
        padded_range(lo, hi)
    } else {
        (0.0, 1.0)
    };

    let root = SVGBackend::new(path, (1400, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Boxplot of Gene Expression for All Samples", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..stats.len().max(1) as f64, y_lo..y_hi)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .x_desc("Samples")
        .y_desc("Gene Expression")
        .draw()?;

    let fill = SET2[2];
    for (i, b) in stats.iter().enumerate() {
        let left = i as f64 + 0.15;
        let right = i as f64 + 0.85;
        let mid = i as f64 + 0.5;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, b.q1), (right, b.q3)],
            fill.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, b.q1), (right, b.q3)],
            BLACK.stroke_width(1),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(left, b.median), (right, b.median)],
            BLACK.stroke_width(2),
        )))?;
        chart.draw_series([
            PathElement::new(vec![(mid, b.q3), (mid, b.whisker_high)], BLACK.stroke_width(1)),
            PathElement::new(vec![(mid, b.q1), (mid, b.whisker_low)], BLACK.stroke_width(1)),
        ])?;
        chart.draw_series(
            b.outliers
                .iter()
                .map(|&v| Circle::new((mid, v), 1, BLACK.stroke_width(1))),
        )?;
    }

    root.present()?;
    Ok(())
}
