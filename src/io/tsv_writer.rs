use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::plots::PcaScatter;
use crate::scores::GsvaScores;

pub fn write_pca_tsv(path: &Path, scatter: &PcaScatter) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "sample\tPC1\tPC2\thistology")?;
    for p in &scatter.points {
        writeln!(w, "{}\t{:.6}\t{:.6}\t{}", p.sample, p.x, p.y, p.label)?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_scores_tsv(path: &Path, scores: &GsvaScores) -> Result<()> {
    ensure_len(scores.scores.len(), scores.samples.len(), "scores")?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "sample\t{}", scores.set_name)?;
    for (sample, score) in scores.samples.iter().zip(&scores.scores) {
        writeln!(w, "{}\t{:.6}", sample, score)?;
    }
    w.flush()?;
    Ok(())
}

fn ensure_len(got: usize, expected: usize, name: &str) -> Result<()> {
    if got != expected {
        bail!("{} length mismatch: {} != {}", name, got, expected);
    }
    Ok(())
}
