pub mod gsva;

pub use gsva::{GsvaParams, score_gene_set};

/// One enrichment score per sample for a single gene set.
#[derive(Debug, Clone)]
pub struct GsvaScores {
    pub set_name: String,
    pub samples: Vec<String>,
    pub scores: Vec<f64>,
    pub genes_used: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreSummary {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl GsvaScores {
    pub fn summary(&self) -> ScoreSummary {
        let mut sorted = self.scores.clone();
        let median = crate::math::stats::median(&mut sorted);
        let (min, max) = crate::math::stats::min_max(&self.scores).unwrap_or((0.0, 0.0));
        ScoreSummary {
            n: self.scores.len(),
            mean: crate::math::stats::mean(&self.scores),
            median,
            min,
            max,
        }
    }
}
