use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::{Ctx, SIGNATURE_NAME};
use crate::geneset::load_gmt;
use crate::pipeline::Stage;
use crate::scores::{GsvaParams, score_gene_set};

pub struct Stage7Gsva;

impl Stage7Gsva {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage7Gsva {
    fn name(&self) -> &'static str {
        "stage7_gsva"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let sets = load_gmt(&ctx.gmt_path)?;
        let set = sets
            .iter()
            .find(|s| s.name == SIGNATURE_NAME)
            .with_context(|| {
                format!(
                    "gene set '{}' not found in {}",
                    SIGNATURE_NAME,
                    ctx.gmt_path.display()
                )
            })?;

        let params = GsvaParams {
            threads: ctx.threads,
            ..GsvaParams::default()
        };
        let (scores, warnings) =
            score_gene_set(ctx.exocrine()?, set, ctx.min_size, ctx.max_size, &params)?;
        let summary = scores.summary();
        info!(
            gene_set = %scores.set_name,
            genes = scores.genes_used,
            samples = summary.n,
            mean = summary.mean,
            "gsva_ready"
        );

        ctx.warnings.extend(warnings);
        ctx.gsva = Some(scores);
        Ok(())
    }
}
