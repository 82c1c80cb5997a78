mod loader;
mod resolve;

pub use loader::{format_gmt_line, load_gmt, parse_gmt, read_gene_list, write_gmt};
pub use resolve::{MatchedGenes, match_genes, resolve_indices, validate_size};

pub const NA_DESCRIPTION: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneSet {
    pub name: String,
    pub description: String,
    pub genes: Vec<String>,
}

impl GeneSet {
    pub fn new(name: &str, genes: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            description: NA_DESCRIPTION.to_string(),
            genes,
        }
    }
}
