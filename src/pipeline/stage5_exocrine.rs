use anyhow::Result;
use tracing::info;

use crate::ctx::{Ctx, HISTOLOGY_FIELD, NEUROENDOCRINE};
use crate::error::PipelineError;
use crate::expr::exocrine_indices;
use crate::pipeline::Stage;

pub struct Stage5Exocrine;

impl Stage5Exocrine {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Exocrine {
    fn name(&self) -> &'static str {
        "stage5_exocrine"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let matrix = &ctx.cleaned()?.matrix;
        let labels = ctx
            .dataset()?
            .col_meta
            .labels_for(HISTOLOGY_FIELD, matrix.samples())?;

        let keep = exocrine_indices(&labels, NEUROENDOCRINE);
        if keep.is_empty() {
            return Err(PipelineError::NoExocrineSamples(NEUROENDOCRINE.to_string()).into());
        }
        let exocrine = matrix.select_samples(&keep).with_uppercase_genes();
        let excluded = matrix.n_samples() - keep.len();
        info!(
            kept = keep.len(),
            excluded = excluded,
            "exocrine_samples_selected"
        );

        ctx.excluded_samples = excluded;
        ctx.exocrine = Some(exocrine);
        Ok(())
    }
}
