use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::error::PipelineError;
use crate::geneset::GeneSet;

/// Reads a plain gene list: one id per line, trimmed and uppercased. Blank
/// lines are skipped.
pub fn read_gene_list(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(PipelineError::InputNotFound(path.to_path_buf()).into());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read gene list {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_uppercase)
        .collect())
}

pub fn format_gmt_line(set: &GeneSet) -> String {
    let mut line = String::new();
    line.push_str(&set.name);
    line.push('\t');
    line.push_str(&set.description);
    for gene in &set.genes {
        line.push('\t');
        line.push_str(gene);
    }
    line.push('\n');
    line
}

/// Writes one GMT record, truncating whatever was at `path`.
pub fn write_gmt(path: &Path, set: &GeneSet) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    w.write_all(format_gmt_line(set).as_bytes())?;
    w.flush()?;
    Ok(())
}

pub fn load_gmt(path: &Path) -> Result<Vec<GeneSet>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read GMT {}", path.display()))?;
    parse_gmt(&content, &path.display().to_string())
}

pub fn parse_gmt(content: &str, source: &str) -> Result<Vec<GeneSet>> {
    let mut sets = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 2 {
            bail!("{}:{} malformed GMT (expected name and description)", source, line_no);
        }
        let name = parts[0].trim();
        if name.is_empty() {
            bail!("{}:{} empty gene set name", source, line_no);
        }
        sets.push(GeneSet {
            name: name.to_string(),
            description: parts[1].trim().to_string(),
            genes: parts[2..]
                .iter()
                .map(|g| g.trim())
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect(),
        });
    }
    Ok(sets)
}
