//! GCT 1.2 / 1.3 reader.
//!
//! 1.2 rows carry `Name` and `Description` before the sample columns. 1.3 adds
//! an arbitrary number of row-metadata columns and a block of column-metadata
//! lines between the header and the data rows.

use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::error::PipelineError;
use crate::expr::{ColumnMetadata, ExprMatrix};
use crate::io::open_maybe_gz;

/// Cell spellings read as a missing value.
const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "N/A", "NA", "#NA", "#N/A!", "na", "NULL", "None", "#VALUE!", "NaN", "-NaN",
    "nan", "-nan", "-666", "-666.0", "-666.00", "-666.000", "-666.0000",
];

#[derive(Debug, Clone)]
pub struct GctDataset {
    pub version: String,
    pub matrix: ExprMatrix,
    pub col_meta: ColumnMetadata,
}

pub fn read_gct(path: &Path) -> Result<GctDataset> {
    if !path.exists() {
        return Err(PipelineError::InputNotFound(path.to_path_buf()).into());
    }
    let reader = open_maybe_gz(path)?;
    let reader = BufReader::new(reader);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line.with_context(|| format!("failed to read {}", path.display()))?);
    }
    let dataset = parse_gct(&lines, &path.display().to_string())?;
    info!(
        path = %path.display(),
        version = %dataset.version,
        genes = dataset.matrix.n_genes(),
        samples = dataset.matrix.n_samples(),
        meta_fields = dataset.col_meta.fields().len(),
        "gct_loaded"
    );
    Ok(dataset)
}

pub fn parse_gct_str(content: &str, origin: &str) -> Result<GctDataset> {
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    parse_gct(&lines, origin)
}

fn parse_gct(lines: &[String], origin: &str) -> Result<GctDataset> {
    let malformed = |line: usize, reason: String| PipelineError::MalformedGct {
        origin: origin.to_string(),
        line,
        reason,
    };

    let mut rows = lines
        .iter()
        .map(|l| l.trim_end_matches(['\r', '\n']))
        .enumerate()
        .map(|(i, l)| (i + 1, l));

    let (_, version_line) = rows
        .next()
        .ok_or_else(|| malformed(1, "empty file".to_string()))?;
    let version = version_line.trim().trim_start_matches('#').to_string();
    if version != "1.2" && version != "1.3" {
        return Err(malformed(1, format!("unsupported version '{}'", version_line.trim())).into());
    }

    let (dims_no, dims_line) = rows
        .next()
        .ok_or_else(|| malformed(2, "missing dimension line".to_string()))?;
    let dims = dims_line
        .split_whitespace()
        .map(|d| d.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| malformed(dims_no, format!("invalid dimension: {}", e)))?;
    let expected_dims = if version == "1.2" { 2 } else { 4 };
    if dims.len() != expected_dims {
        return Err(malformed(
            dims_no,
            format!("expected {} dimensions, found {}", expected_dims, dims.len()),
        )
        .into());
    }
    let (n_rows, n_cols) = (dims[0], dims[1]);
    // 1.2 always carries exactly one description column and no column metadata.
    let (n_row_meta, n_col_meta) = if version == "1.2" {
        (1, 0)
    } else {
        (dims[2], dims[3])
    };
    let width = 1 + n_row_meta + n_cols;

    let (header_no, header_line) = rows
        .next()
        .ok_or_else(|| malformed(3, "missing header line".to_string()))?;
    let header: Vec<&str> = header_line.split('\t').collect();
    if header.len() != width {
        return Err(malformed(
            header_no,
            format!("header has {} fields, expected {}", header.len(), width),
        )
        .into());
    }
    let samples: Vec<String> = header[1 + n_row_meta..]
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    let mut seen = HashSet::new();
    for s in &samples {
        if !seen.insert(s.as_str()) {
            return Err(malformed(header_no, format!("duplicate sample id '{}'", s)).into());
        }
    }

    let mut col_meta = ColumnMetadata::new(samples.clone());
    for _ in 0..n_col_meta {
        let (no, line) = rows
            .next()
            .ok_or_else(|| malformed(header_no + 1, "truncated column metadata".to_string()))?;
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != width {
            return Err(malformed(
                no,
                format!("metadata line has {} fields, expected {}", parts.len(), width),
            )
            .into());
        }
        let values = parts[1 + n_row_meta..]
            .iter()
            .map(|v| v.trim().to_string())
            .collect();
        col_meta.push_field(parts[0].trim(), values)?;
    }

    let mut genes = Vec::with_capacity(n_rows);
    let mut gene_lines = HashMap::with_capacity(n_rows);
    let mut values = Vec::with_capacity(n_rows * n_cols);
    for (no, line) in rows {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != width {
            return Err(malformed(
                no,
                format!("data row has {} fields, expected {}", parts.len(), width),
            )
            .into());
        }
        if genes.len() == n_rows {
            return Err(malformed(no, format!("more than {} data rows", n_rows)).into());
        }
        let id = parts[0].trim().to_string();
        if let Some(first) = gene_lines.insert(id.clone(), no) {
            return Err(malformed(
                no,
                format!("duplicate gene id '{}' (first at line {})", id, first),
            )
            .into());
        }
        genes.push(id);
        for raw in &parts[1 + n_row_meta..] {
            values.push(parse_value(raw).map_err(|reason| malformed(no, reason))?);
        }
    }
    if genes.len() != n_rows {
        return Err(malformed(
            lines.len(),
            format!("expected {} data rows, found {}", n_rows, genes.len()),
        )
        .into());
    }

    let matrix = ExprMatrix::new(genes, samples, values)?;
    Ok(GctDataset {
        version,
        matrix,
        col_meta,
    })
}

fn parse_value(raw: &str) -> Result<f64, String> {
    let token = raw.trim();
    if MISSING_TOKENS.contains(&token) {
        return Ok(f64::NAN);
    }
    token
        .parse::<f64>()
        .map_err(|_| format!("invalid expression value '{}'", token))
}
