//! Gene Set Variation Analysis with a Gaussian kernel.
//!
//! 1. Per gene, a kernel CDF of every sample against all samples, turned
//!    into log-odds.
//! 2. Per sample, genes ranked by decreasing log-odds with the symmetric
//!    rank weight `|p - r - p/2|`.
//! 3. A weighted Kolmogorov-Smirnov random walk over the ranking; the
//!    score is the sum of the largest positive and negative deviations.

use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::expr::ExprMatrix;
use crate::geneset::{GeneSet, resolve_indices, validate_size};
use crate::math::stats::{normal_cdf, std_dev};
use crate::scores::GsvaScores;

const SIGMA_FACTOR: f64 = 4.0;
const MIN_BANDWIDTH: f64 = 0.001;

#[derive(Debug, Clone, Copy)]
pub struct GsvaParams {
    pub tau: f64,
    pub max_diff: bool,
    pub abs_rank: bool,
    pub threads: usize,
}

impl Default for GsvaParams {
    fn default() -> Self {
        Self {
            tau: 1.0,
            max_diff: true,
            abs_rank: false,
            threads: 0,
        }
    }
}

/// Log-odds kernel CDF of one gene's values against themselves.
pub fn row_kcdf(row: &[f64]) -> Vec<f64> {
    let bandwidth = (std_dev(row, 1) / SIGMA_FACTOR).max(MIN_BANDWIDTH);
    let inv_n = 1.0 / row.len() as f64;
    row.iter()
        .map(|&x| {
            let left_tail: f64 =
                row.iter().map(|&d| normal_cdf((x - d) / bandwidth)).sum::<f64>() * inv_n;
            -((1.0 - left_tail) / left_tail.max(1e-15)).ln()
        })
        .collect()
}

/// Indices sorted by decreasing value and the symmetric rank statistic of
/// every position.
pub fn order_rankstat(values: &[f64]) -> (Vec<usize>, Vec<f64>) {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut rank_stats = vec![0.0; n];
    for (rank, &idx) in order.iter().enumerate() {
        rank_stats[idx] = (n as f64 - rank as f64 - n as f64 / 2.0).abs();
    }
    (order, rank_stats)
}

/// Largest positive and negative deviation of the random walk, or `None`
/// when the set has no weight or covers every gene.
pub fn random_walk(
    gene_set: &[usize],
    order: &[usize],
    rank_stats: &[f64],
    tau: f64,
) -> Option<(f64, f64)> {
    let n = order.len();
    if n == 0 {
        return None;
    }
    let in_set: HashSet<usize> = gene_set.iter().copied().collect();

    let mut step_in = vec![0.0; n];
    let mut step_out = vec![0.0; n];
    for (rank, &gene) in order.iter().enumerate() {
        if in_set.contains(&gene) {
            step_in[rank] = if tau == 1.0 {
                rank_stats[gene]
            } else {
                rank_stats[gene].powf(tau)
            };
        } else {
            step_out[rank] = 1.0;
        }
    }
    for i in 1..n {
        step_in[i] += step_in[i - 1];
        step_out[i] += step_out[i - 1];
    }

    let total_in = step_in[n - 1];
    let total_out = step_out[n - 1];
    if total_in <= 0.0 || total_out <= 0.0 {
        return None;
    }

    let mut max_pos = 0.0f64;
    let mut max_neg = 0.0f64;
    for i in 0..n {
        let walk = step_in[i] / total_in - step_out[i] / total_out;
        max_pos = max_pos.max(walk);
        max_neg = max_neg.min(walk);
    }
    Some((max_pos, max_neg))
}

fn combine(pos: f64, neg: f64, params: &GsvaParams) -> f64 {
    if params.max_diff {
        if params.abs_rank { pos - neg } else { pos + neg }
    } else if pos > neg.abs() {
        pos
    } else {
        neg
    }
}

/// Scores `gene_sets` (row indices into `matrix`). Result is
/// `[set][sample]`; a set without usable walk gets `NaN`.
pub fn gsva(matrix: &ExprMatrix, gene_sets: &[Vec<usize>], params: &GsvaParams) -> Result<Vec<Vec<f64>>> {
    let n_genes = matrix.n_genes();
    let n_samples = matrix.n_samples();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.threads)
        .build()
        .map_err(|e| anyhow!("failed to build thread pool: {}", e))?;
    let kcdf: Vec<Vec<f64>> = pool.install(|| {
        (0..n_genes)
            .into_par_iter()
            .map(|g| row_kcdf(matrix.row(g)))
            .collect()
    });
    debug!(genes = n_genes, samples = n_samples, "gsva_kcdf_ready");

    let mut result = vec![vec![f64::NAN; n_samples]; gene_sets.len()];
    let mut sample_stat = vec![0.0; n_genes];
    for s in 0..n_samples {
        for (g, row) in kcdf.iter().enumerate() {
            sample_stat[g] = row[s];
        }
        let (order, rank_stats) = order_rankstat(&sample_stat);
        for (k, set) in gene_sets.iter().enumerate() {
            if let Some((pos, neg)) = random_walk(set, &order, &rank_stats, params.tau) {
                result[k][s] = combine(pos, neg, params);
            }
        }
    }
    Ok(result)
}

/// Rows whose values are not all equal.
pub fn non_constant_genes(matrix: &ExprMatrix) -> Vec<usize> {
    (0..matrix.n_genes())
        .filter(|&g| {
            let row = matrix.row(g);
            row.iter().any(|v| *v != row[0])
        })
        .collect()
}

/// Scores one gene set against `matrix` after dropping constant genes and
/// enforcing the `[min_size, max_size]` bounds on the genes that remain.
pub fn score_gene_set(
    matrix: &ExprMatrix,
    set: &GeneSet,
    min_size: usize,
    max_size: usize,
    params: &GsvaParams,
) -> Result<(GsvaScores, Vec<String>)> {
    let mut warnings = Vec::new();
    let keep = non_constant_genes(matrix);
    let filtered = if keep.len() == matrix.n_genes() {
        matrix.clone()
    } else {
        warnings.push(format!(
            "{} genes with constant expression excluded from GSVA",
            matrix.n_genes() - keep.len()
        ));
        matrix.select_genes(&keep)
    };

    let (gene_index, _): (HashMap<String, usize>, _) = filtered.gene_index();
    let indices = resolve_indices(set, &gene_index);
    validate_size(&set.name, indices.len(), min_size, max_size)?;

    info!(
        gene_set = %set.name,
        genes = indices.len(),
        samples = filtered.n_samples(),
        "gsva_started"
    );
    let mut scores = gsva(&filtered, std::slice::from_ref(&indices), params)?;
    let scores = scores.pop().unwrap_or_default();

    Ok((
        GsvaScores {
            set_name: set.name.clone(),
            samples: filtered.samples().to_vec(),
            scores,
            genes_used: indices.len(),
        },
        warnings,
    ))
}
