use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::math::stats::{gaussian_pdf, min_max, std_dev};
use crate::plots::{SET2, padded_range};

const KDE_GRID: usize = 200;

#[derive(Debug, Clone)]
pub struct ScoreHistogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Density curve scaled to counts; empty when it cannot be estimated.
    pub density: Vec<(f64, f64)>,
}

impl ScoreHistogram {
    pub fn bin_width(&self) -> f64 {
        if self.edges.len() < 2 {
            return 0.0;
        }
        self.edges[1] - self.edges[0]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Equal-width bins from the minimum to the maximum value, the last bin
/// closed on the right. Equal values are centred in a range of width 1.
/// Non-finite values are ignored.
pub fn score_histogram(values: &[f64], bins: usize) -> ScoreHistogram {
    let bins = bins.max(1);
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let values = values.as_slice();
    let (lo, hi) = match min_max(values) {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((v, _)) => (v - 0.5, v + 0.5),
        None => (0.0, 1.0),
    };
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let density = kde_curve(values, lo, hi, values.len() as f64 * width);
    ScoreHistogram {
        edges,
        counts,
        density,
    }
}

/// Gaussian KDE with Scott's bandwidth evaluated on an even grid over
/// `[lo, hi]`, multiplied by `scale`.
pub fn kde_curve(values: &[f64], lo: f64, hi: f64, scale: f64) -> Vec<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }
    let bandwidth = std_dev(values, 1) * (n as f64).powf(-0.2);
    if bandwidth <= 0.0 || !bandwidth.is_finite() {
        return Vec::new();
    }
    let step = (hi - lo) / (KDE_GRID - 1) as f64;
    (0..KDE_GRID)
        .map(|i| {
            let x = lo + step * i as f64;
            let d: f64 = values
                .iter()
                .map(|&v| gaussian_pdf((x - v) / bandwidth))
                .sum::<f64>()
                / (n as f64 * bandwidth);
            (x, d * scale)
        })
        .collect()
}

pub fn render_histogram(path: &Path, hist: &ScoreHistogram) -> Result<()> {
    let x_lo = hist.edges.first().copied().unwrap_or(0.0);
    let x_hi = hist.edges.last().copied().unwrap_or(1.0);
    let y_max = hist
        .counts
        .iter()
        .map(|&c| c as f64)
        .chain(hist.density.iter().map(|&(_, d)| d))
        .fold(0.0, f64::max);
    let (_, y_hi) = padded_range(0.0, y_max.max(1.0));

    let root = SVGBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of IFN Signature GSVA Scores", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_hi)?;
    chart
        .configure_mesh()
        .x_desc("GSVA Score")
        .y_desc("Sample Count")
        .draw()?;

    let bar = SET2[2];
    chart.draw_series(hist.counts.iter().enumerate().map(|(i, &c)| {
        Rectangle::new(
            [(hist.edges[i], 0.0), (hist.edges[i + 1], c as f64)],
            bar.mix(0.6).filled(),
        )
    }))?;
    chart.draw_series(hist.counts.iter().enumerate().map(|(i, &c)| {
        Rectangle::new(
            [(hist.edges[i], 0.0), (hist.edges[i + 1], c as f64)],
            BLACK.stroke_width(1),
        )
    }))?;
    if !hist.density.is_empty() {
        chart.draw_series(LineSeries::new(
            hist.density.iter().copied(),
            bar.stroke_width(2),
        ))?;
    }

    root.present()?;
    Ok(())
}
