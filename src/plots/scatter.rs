use std::path::Path;

use anyhow::{Result, bail};
use plotters::prelude::*;

use crate::math::pca::PcaFit;
use crate::math::stats::min_max;
use crate::plots::{padded_range, palette_color};

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub sample: String,
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct PcaScatter {
    pub points: Vec<ScatterPoint>,
    /// Distinct labels in order of first appearance; the legend order.
    pub labels: Vec<String>,
    pub variance_ratio: Vec<f64>,
}

impl PcaScatter {
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// Pairs the first two projected components of every sample with its label.
pub fn pca_scatter(samples: &[String], fit: &PcaFit, labels: &[String]) -> Result<PcaScatter> {
    if samples.len() != fit.scores.nrows() || labels.len() != samples.len() {
        bail!(
            "scatter inputs disagree: {} samples, {} projected rows, {} labels",
            samples.len(),
            fit.scores.nrows(),
            labels.len()
        );
    }
    if fit.scores.ncols() < 2 {
        bail!("scatter needs 2 components, got {}", fit.scores.ncols());
    }

    let mut distinct: Vec<String> = Vec::new();
    let points: Vec<ScatterPoint> = samples
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(i, (sample, label))| {
            if !distinct.contains(label) {
                distinct.push(label.clone());
            }
            ScatterPoint {
                sample: sample.clone(),
                x: fit.scores[(i, 0)],
                y: fit.scores[(i, 1)],
                label: label.clone(),
            }
        })
        .collect();

    Ok(PcaScatter {
        points,
        labels: distinct,
        variance_ratio: fit.explained_variance_ratio.clone(),
    })
}

pub fn render_scatter(path: &Path, scatter: &PcaScatter) -> Result<()> {
    let xs: Vec<f64> = scatter.points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = scatter.points.iter().map(|p| p.y).collect();
    let (x_lo, x_hi) = min_max(&xs).map_or((-1.0, 1.0), |(lo, hi)| padded_range(lo, hi));
    let (y_lo, y_hi) = min_max(&ys).map_or((-1.0, 1.0), |(lo, hi)| padded_range(lo, hi));

    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("PCA of Samples (covered by Histology)", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
    chart
        .configure_mesh()
        .x_desc("PCA1")
        .y_desc("PCA2")
        .draw()?;

    for (i, label) in scatter.labels.iter().enumerate() {
        let color = palette_color(i);
        chart
            .draw_series(
                scatter
                    .points
                    .iter()
                    .filter(|p| &p.label == label)
                    .map(|p| Circle::new((p.x, p.y), 4, color.filled())),
            )?
            .label(label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
