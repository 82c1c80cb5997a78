//! Named failure conditions of an analysis run.
//!
//! Stages return `anyhow::Result`; these variants travel inside it and can be
//! recovered with `err.downcast_ref::<PipelineError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("{origin}:{line} malformed GCT: {reason}")]
    MalformedGct {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("metadata column '{0}' absent")]
    MetadataColumnMissing(String),

    #[error("sample '{0}' has no column metadata")]
    SampleMetadataMissing(String),

    #[error("no genes left after dropping rows with missing values")]
    EmptyAfterCleaning,

    #[error(
        "PCA with {components} components needs at least {components} samples and genes, got {samples} samples and {genes} genes"
    )]
    TooSmallForPca {
        components: usize,
        samples: usize,
        genes: usize,
    },

    #[error("no samples left after excluding '{0}' histology")]
    NoExocrineSamples(String),

    #[error("no genes from {list} matched the expression matrix")]
    EmptyGeneMatch { list: String },

    #[error("gene set '{name}' has {found} genes, below minimum {min}")]
    GenesetBelowMinSize {
        name: String,
        found: usize,
        min: usize,
    },

    #[error("gene set '{name}' has {found} genes, above maximum {max}")]
    GenesetAboveMaxSize {
        name: String,
        found: usize,
        max: usize,
    },
}
