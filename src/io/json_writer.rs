use anyhow::Result;

use crate::ctx::Ctx;
use crate::schema::v1::{
    Cleaning, IfnSigV1, LabelCount, PcaSummary, ScoreStats, SignatureSummary,
};

/// Report of whatever the stages run so far produced.
pub fn build_report(ctx: &Ctx) -> Result<IfnSigV1> {
    let mut report = IfnSigV1::empty(&ctx.tool_version, &ctx.input.display().to_string());

    if let Some(ds) = &ctx.dataset {
        report.input.gct_version = Some(ds.version.clone());
        report.input.genes = Some(ds.matrix.n_genes() as u64);
        report.input.samples = Some(ds.matrix.n_samples() as u64);
        report.input.metadata_fields = ds.col_meta.fields().to_vec();
    }

    if let Some(cleaned) = &ctx.cleaned {
        report.cleaning = Some(Cleaning {
            genes_kept: cleaned.matrix.n_genes() as u64,
            genes_dropped: cleaned.dropped.len() as u64,
            dropped: cleaned.dropped.clone(),
        });
    }

    if let Some(scatter) = &ctx.pca_scatter {
        let histology = scatter
            .labels
            .iter()
            .map(|label| LabelCount {
                label: label.clone(),
                count: scatter.points.iter().filter(|p| &p.label == label).count() as u64,
            })
            .collect();
        report.pca = Some(PcaSummary {
            components: scatter.variance_ratio.len() as u64,
            explained_variance_ratio: scatter.variance_ratio.clone(),
            histology,
        });
    }

    if let (Some(exocrine), Some(matched), Some(set)) = (&ctx.exocrine, &ctx.matched, &ctx.gene_set) {
        report.signature = Some(SignatureSummary {
            name: set.name.clone(),
            gmt_path: ctx.gmt_path.display().to_string(),
            exocrine_samples: exocrine.n_samples() as u64,
            excluded_samples: ctx.excluded_samples as u64,
            list_total: matched.total as u64,
            matched: matched.genes.clone(),
            missing: matched.missing.clone(),
            coverage: matched.coverage(),
            genes_scored: ctx.gsva.as_ref().map(|g| g.genes_used as u64),
        });
    }

    if let Some(gsva) = &ctx.gsva {
        let s = gsva.summary();
        report.scores = Some(ScoreStats {
            n: s.n as u64,
            mean: s.mean,
            median: s.median,
            min: s.min,
            max: s.max,
            bins: ctx.bins as u64,
        });
    }

    report.warnings = ctx.warnings.clone();
    Ok(report)
}
