use std::collections::{HashMap, HashSet};

use crate::error::PipelineError;
use crate::geneset::GeneSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedGenes {
    /// Found ids in gene-list order, first occurrence only.
    pub genes: Vec<String>,
    pub missing: Vec<String>,
    pub total: usize,
}

impl MatchedGenes {
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.genes.len() as f64 / self.total as f64
        }
    }
}

/// Case-insensitive intersection of `list` with `gene_index`, preserving list
/// order. Returned ids are uppercase.
pub fn match_genes(list: &[String], gene_index: &HashMap<String, usize>) -> MatchedGenes {
    let mut genes = Vec::new();
    let mut missing = Vec::new();
    let mut seen = HashSet::new();

    for symbol in list {
        let upper = symbol.trim().to_uppercase();
        if gene_index.contains_key(&upper) {
            if seen.insert(upper.clone()) {
                genes.push(upper);
            }
        } else {
            missing.push(upper);
        }
    }

    MatchedGenes {
        genes,
        missing,
        total: list.len(),
    }
}

/// Row positions of the set's genes that exist in `gene_index`, in set order.
pub fn resolve_indices(set: &GeneSet, gene_index: &HashMap<String, usize>) -> Vec<usize> {
    let mut seen = HashSet::new();
    set.genes
        .iter()
        .filter_map(|g| gene_index.get(g).copied())
        .filter(|gid| seen.insert(*gid))
        .collect()
}

pub fn validate_size(
    name: &str,
    found: usize,
    min: usize,
    max: usize,
) -> Result<(), PipelineError> {
    if found < min {
        return Err(PipelineError::GenesetBelowMinSize {
            name: name.to_string(),
            found,
            min,
        });
    }
    if found > max {
        return Err(PipelineError::GenesetAboveMaxSize {
            name: name.to_string(),
            found,
            max,
        });
    }
    Ok(())
}
