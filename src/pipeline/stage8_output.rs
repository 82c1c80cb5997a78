use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::{json_writer, tsv_writer, write_json};
use crate::pipeline::Stage;
use crate::plots::{render_histogram, score_histogram};

pub struct Stage8Output;

impl Stage8Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage8Output {
    fn name(&self) -> &'static str {
        "stage8_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let scores = ctx.gsva.as_ref().context("GSVA scores missing")?;
        let non_finite = scores.scores.iter().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            warn!(count = non_finite, "non-finite GSVA scores left out of histogram");
            ctx.warnings
                .push(format!("{} non-finite GSVA scores", non_finite));
        }

        let histogram = score_histogram(&scores.scores, ctx.bins);
        if ctx.render_plots {
            render_histogram(&ctx.output.hist_svg, &histogram)?;
            info!(path = %ctx.output.hist_svg.display(), "histogram_written");
        }
        tsv_writer::write_scores_tsv(&ctx.output.scores_tsv, scores)?;
        ctx.histogram = Some(histogram);

        let report = json_writer::build_report(ctx)?;
        write_json(&ctx.output.report_json, &report)?;
        info!(path = %ctx.output.report_json.display(), "report_written");
        Ok(())
    }
}
