use anyhow::Result;
use tracing::info;

use crate::ctx::{Ctx, HISTOLOGY_FIELD, PCA_COMPONENTS};
use crate::io::tsv_writer::write_pca_tsv;
use crate::math::pca::fit_transform;
use crate::math::scale::{StandardScaler, samples_by_genes};
use crate::pipeline::Stage;
use crate::plots::{pca_scatter, render_scatter};

pub struct Stage4Reduce;

impl Stage4Reduce {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Reduce {
    fn name(&self) -> &'static str {
        "stage4_reduce"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let matrix = &ctx.cleaned()?.matrix;
        let labels = ctx
            .dataset()?
            .col_meta
            .labels_for(HISTOLOGY_FIELD, matrix.samples())?;

        let x = samples_by_genes(matrix);
        let (_, scaled) = StandardScaler::fit_transform(&x);
        let fit = fit_transform(&scaled, PCA_COMPONENTS)?;
        let scatter = pca_scatter(matrix.samples(), &fit, &labels)?;
        info!(
            samples = scatter.points.len(),
            labels = scatter.labels.len(),
            pc1_ratio = fit.explained_variance_ratio[0],
            pc2_ratio = fit.explained_variance_ratio[1],
            "pca_ready"
        );

        write_pca_tsv(&ctx.output.pca_tsv, &scatter)?;
        if ctx.render_plots {
            render_scatter(&ctx.output.pca_svg, &scatter)?;
            info!(path = %ctx.output.pca_svg.display(), "pca_plot_written");
        }

        ctx.pca_fit = Some(fit);
        ctx.pca_scatter = Some(scatter);
        Ok(())
    }
}
