use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::plots::{box_stats, render_boxplot};

pub struct Stage3Distribution;

impl Stage3Distribution {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Distribution {
    fn name(&self) -> &'static str {
        "stage3_distribution"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let stats = box_stats(&ctx.cleaned()?.matrix);
        if ctx.render_plots {
            render_boxplot(&ctx.output.boxplot_svg, &stats)?;
            info!(path = %ctx.output.boxplot_svg.display(), "boxplot_written");
        }
        ctx.box_stats = Some(stats);
        Ok(())
    }
}
