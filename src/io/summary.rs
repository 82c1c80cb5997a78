use anyhow::Result;

use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let dataset = ctx.dataset()?;
    let cleaned = ctx.cleaned()?;

    let mut out = String::new();
    out.push_str(&format!("kira-ifnsig v{}\n", version));
    out.push_str(&format!(
        "Input: {} genes, {} samples ({} genes dropped for missing values)\n",
        dataset.matrix.n_genes(),
        dataset.matrix.n_samples(),
        cleaned.dropped.len()
    ));

    if let Some(fit) = &ctx.pca_fit {
        let ratios: Vec<String> = fit
            .explained_variance_ratio
            .iter()
            .map(|r| format!("{:.1}%", r * 100.0))
            .collect();
        out.push_str(&format!("PCA variance: {}\n", ratios.join(", ")));
    }

    if let Some(exocrine) = &ctx.exocrine {
        out.push_str(&format!(
            "Exocrine samples: {} ({} excluded)\n",
            exocrine.n_samples(),
            ctx.excluded_samples
        ));
    }

    if let Some(matched) = &ctx.matched {
        out.push_str(&format!(
            "Signature genes: {}/{} matched\n",
            matched.genes.len(),
            matched.total
        ));
    }

    if let Some(gsva) = &ctx.gsva {
        let s = gsva.summary();
        out.push_str(&format!(
            "GSVA {}: mean {:+.3}, median {:+.3}, range [{:+.3}, {:+.3}]\n",
            gsva.set_name, s.mean, s.median, s.min, s.max
        ));
    }

    Ok(out)
}
