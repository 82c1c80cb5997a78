use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::error::PipelineError;
use crate::pipeline::Stage;

pub struct Stage2Clean;

impl Stage2Clean {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Clean {
    fn name(&self) -> &'static str {
        "stage2_clean"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let cleaned = ctx.dataset()?.matrix.drop_missing();
        if cleaned.matrix.n_genes() == 0 {
            return Err(PipelineError::EmptyAfterCleaning.into());
        }
        info!(
            kept = cleaned.matrix.n_genes(),
            dropped = cleaned.dropped.len(),
            "missing_rows_dropped"
        );
        ctx.cleaned = Some(cleaned);
        Ok(())
    }
}
