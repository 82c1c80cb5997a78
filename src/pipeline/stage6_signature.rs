use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::{Ctx, SIGNATURE_NAME};
use crate::error::PipelineError;
use crate::geneset::{GeneSet, match_genes, read_gene_list, write_gmt};
use crate::pipeline::Stage;

pub struct Stage6Signature;

impl Stage6Signature {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Signature {
    fn name(&self) -> &'static str {
        "stage6_signature"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let list = read_gene_list(&ctx.gene_list_path)?;
        let (gene_index, duplicates) = ctx.exocrine()?.gene_index();
        for d in &duplicates {
            warn!("{}", d);
        }

        let matched = match_genes(&list, &gene_index);
        if matched.genes.is_empty() {
            return Err(PipelineError::EmptyGeneMatch {
                list: ctx.gene_list_path.display().to_string(),
            }
            .into());
        }
        info!(
            listed = matched.total,
            matched = matched.genes.len(),
            missing = matched.missing.len(),
            "signature_genes_matched"
        );

        let gene_set = GeneSet::new(SIGNATURE_NAME, matched.genes.clone());
        write_gmt(&ctx.gmt_path, &gene_set)?;
        info!(path = %ctx.gmt_path.display(), "gmt_written");

        ctx.warnings.extend(duplicates);
        ctx.matched = Some(matched);
        ctx.gene_set = Some(gene_set);
        Ok(())
    }
}
