use anyhow::{Context, Result};
use nalgebra::DMatrix;

use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct PcaFit {
    /// n_samples x n_components projection.
    pub scores: DMatrix<f64>,
    pub explained_variance: Vec<f64>,
    pub explained_variance_ratio: Vec<f64>,
}

/// Exact PCA through a thin SVD of the column-centred input.
///
/// Components are ordered by decreasing singular value. Each component's
/// sign is chosen so the largest-magnitude entry of its left singular
/// vector is positive, which makes the projection deterministic.
pub fn fit_transform(x: &DMatrix<f64>, n_components: usize) -> Result<PcaFit> {
    let (n, p) = x.shape();
    if n < 2 || n.min(p) < n_components {
        return Err(PipelineError::TooSmallForPca {
            components: n_components,
            samples: n,
            genes: p,
        }
        .into());
    }

    let mut centered = x.clone();
    for mut col in centered.column_iter_mut() {
        let m = col.sum() / n as f64;
        col.add_scalar_mut(-m);
    }

    let svd = centered.svd(true, false);
    let u = svd.u.as_ref().context("SVD did not produce left singular vectors")?;
    let sv = &svd.singular_values;

    let mut order: Vec<usize> = (0..sv.len()).collect();
    order.sort_by(|&a, &b| sv[b].total_cmp(&sv[a]));

    let denom = (n - 1) as f64;
    let total_var: f64 = sv.iter().map(|s| s * s / denom).sum();

    let mut scores = DMatrix::zeros(n, n_components);
    let mut explained_variance = Vec::with_capacity(n_components);
    let mut explained_variance_ratio = Vec::with_capacity(n_components);
    for (j, &k) in order.iter().take(n_components).enumerate() {
        let col = u.column(k);
        let pivot = col
            .iter()
            .copied()
            .max_by(|a, b| a.abs().total_cmp(&b.abs()))
            .unwrap_or(0.0);
        let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
        for i in 0..n {
            scores[(i, j)] = sign * col[i] * sv[k];
        }
        let ev = sv[k] * sv[k] / denom;
        explained_variance.push(ev);
        explained_variance_ratio.push(if total_var > 0.0 { ev / total_var } else { 0.0 });
    }

    Ok(PcaFit {
        scores,
        explained_variance,
        explained_variance_ratio,
    })
}
