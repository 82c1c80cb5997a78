use std::collections::HashMap;

use anyhow::{Result, bail};

/// Dense genes x samples matrix stored gene-major. Missing values are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMatrix {
    genes: Vec<String>,
    samples: Vec<String>,
    values: Vec<f64>,
}

/// Output of the cleaning step.
#[derive(Debug, Clone)]
pub struct CleanedMatrix {
    pub matrix: ExprMatrix,
    pub dropped: Vec<String>,
}

impl ExprMatrix {
    pub fn new(genes: Vec<String>, samples: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if values.len() != genes.len() * samples.len() {
            bail!(
                "matrix values length {} != {} genes x {} samples",
                values.len(),
                genes.len(),
                samples.len()
            );
        }
        Ok(Self {
            genes,
            samples,
            values,
        })
    }

    pub fn from_rows(genes: Vec<String>, samples: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.len() != genes.len() {
            bail!("{} rows for {} genes", rows.len(), genes.len());
        }
        let mut values = Vec::with_capacity(genes.len() * samples.len());
        for (gene, row) in genes.iter().zip(&rows) {
            if row.len() != samples.len() {
                bail!(
                    "row '{}' has {} values, expected {}",
                    gene,
                    row.len(),
                    samples.len()
                );
            }
            values.extend_from_slice(row);
        }
        Self::new(genes, samples, values)
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn row(&self, gene: usize) -> &[f64] {
        let n = self.samples.len();
        &self.values[gene * n..(gene + 1) * n]
    }

    pub fn value(&self, gene: usize, sample: usize) -> f64 {
        self.values[gene * self.samples.len() + sample]
    }

    /// Values of one sample across all genes.
    pub fn column(&self, sample: usize) -> Vec<f64> {
        (0..self.genes.len())
            .map(|g| self.value(g, sample))
            .collect()
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Drops every gene with at least one missing value. Kept rows are
    /// unchanged and stay in their original order.
    pub fn drop_missing(&self) -> CleanedMatrix {
        let mut keep = Vec::with_capacity(self.genes.len());
        let mut dropped = Vec::new();
        for g in 0..self.genes.len() {
            if self.row(g).iter().any(|v| v.is_nan()) {
                dropped.push(self.genes[g].clone());
            } else {
                keep.push(g);
            }
        }
        CleanedMatrix {
            matrix: self.select_genes(&keep),
            dropped,
        }
    }

    pub fn select_genes(&self, idx: &[usize]) -> ExprMatrix {
        let mut values = Vec::with_capacity(idx.len() * self.samples.len());
        for &g in idx {
            values.extend_from_slice(self.row(g));
        }
        ExprMatrix {
            genes: idx.iter().map(|&g| self.genes[g].clone()).collect(),
            samples: self.samples.clone(),
            values,
        }
    }

    pub fn select_samples(&self, idx: &[usize]) -> ExprMatrix {
        let mut values = Vec::with_capacity(self.genes.len() * idx.len());
        for g in 0..self.genes.len() {
            let row = self.row(g);
            values.extend(idx.iter().map(|&s| row[s]));
        }
        ExprMatrix {
            genes: self.genes.clone(),
            samples: idx.iter().map(|&s| self.samples[s].clone()).collect(),
            values,
        }
    }

    pub fn with_uppercase_genes(&self) -> ExprMatrix {
        ExprMatrix {
            genes: self.genes.iter().map(|g| g.to_uppercase()).collect(),
            samples: self.samples.clone(),
            values: self.values.clone(),
        }
    }

    /// Gene id -> row. Loaded ids are unique, so repeats only come from
    /// case folding; the first row wins and each repeat is reported.
    pub fn gene_index(&self) -> (HashMap<String, usize>, Vec<String>) {
        let mut index = HashMap::with_capacity(self.genes.len());
        let mut warnings = Vec::new();
        for (i, symbol) in self.genes.iter().enumerate() {
            if let Some(first) = index.get(symbol) {
                warnings.push(format!(
                    "gene id '{}' at row {} collides with row {} after uppercasing (kept first)",
                    symbol,
                    i + 1,
                    first + 1
                ));
            } else {
                index.insert(symbol.clone(), i);
            }
        }
        (index, warnings)
    }
}
