use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::expr::{CleanedMatrix, ExprMatrix};
use crate::geneset::{GeneSet, MatchedGenes};
use crate::io::gct::GctDataset;
use crate::math::pca::PcaFit;
use crate::plots::{BoxStats, PcaScatter, ScoreHistogram};
use crate::scores::GsvaScores;

pub const DEFAULT_INPUT: &str = "PAAD.gct";
pub const DEFAULT_GENE_LIST: &str = "type1_IFN.txt";
pub const DEFAULT_GMT: &str = "ifn_signature.gmt";
pub const SIGNATURE_NAME: &str = "IFN_Signature";
pub const HISTOLOGY_FIELD: &str = "histological_type_other";
pub const NEUROENDOCRINE: &str = "Neuroendocrine";
pub const DEFAULT_MIN_SIZE: usize = 5;
pub const DEFAULT_MAX_SIZE: usize = 1000;
pub const DEFAULT_BINS: usize = 30;
pub const PCA_COMPONENTS: usize = 2;

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub boxplot_svg: PathBuf,
    pub pca_svg: PathBuf,
    pub pca_tsv: PathBuf,
    pub hist_svg: PathBuf,
    pub scores_tsv: PathBuf,
    pub report_json: PathBuf,
}

impl OutputPaths {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            boxplot_svg: out_dir.join("boxplot.svg"),
            pca_svg: out_dir.join("pca.svg"),
            pca_tsv: out_dir.join("pca.tsv"),
            hist_svg: out_dir.join("gsva_hist.svg"),
            scores_tsv: out_dir.join("gsva_scores.tsv"),
            report_json: out_dir.join("report.json"),
            out_dir,
        }
    }
}

/// Run state. Parameters are set up front; every stage fills its own
/// result field and only reads the fields of earlier stages.
#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub gene_list_path: PathBuf,
    pub gmt_path: PathBuf,
    pub min_size: usize,
    pub max_size: usize,
    pub bins: usize,
    pub threads: usize,
    pub render_plots: bool,
    pub tool_version: String,
    pub output: OutputPaths,
    pub warnings: Vec<String>,

    pub dataset: Option<GctDataset>,
    pub cleaned: Option<CleanedMatrix>,
    pub box_stats: Option<Vec<BoxStats>>,
    pub pca_fit: Option<PcaFit>,
    pub pca_scatter: Option<PcaScatter>,
    pub exocrine: Option<ExprMatrix>,
    pub excluded_samples: usize,
    pub matched: Option<MatchedGenes>,
    pub gene_set: Option<GeneSet>,
    pub gsva: Option<GsvaScores>,
    pub histogram: Option<ScoreHistogram>,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        gene_list_path: PathBuf,
        gmt_path: PathBuf,
        out_dir: PathBuf,
        tool_version: &str,
    ) -> Self {
        Self {
            input,
            gene_list_path,
            gmt_path,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            bins: DEFAULT_BINS,
            threads: 0,
            render_plots: true,
            tool_version: tool_version.to_string(),
            output: OutputPaths::new(out_dir),
            warnings: Vec::new(),
            dataset: None,
            cleaned: None,
            box_stats: None,
            pca_fit: None,
            pca_scatter: None,
            exocrine: None,
            excluded_samples: 0,
            matched: None,
            gene_set: None,
            gsva: None,
            histogram: None,
        }
    }

    /// Context with every path at its default, relative to `dir`.
    pub fn in_dir(dir: &Path, tool_version: &str) -> Self {
        Self::new(
            dir.join(DEFAULT_INPUT),
            dir.join(DEFAULT_GENE_LIST),
            dir.join(DEFAULT_GMT),
            dir.to_path_buf(),
            tool_version,
        )
    }

    pub fn dataset(&self) -> Result<&GctDataset> {
        self.dataset.as_ref().context("expression dataset not loaded")
    }

    pub fn cleaned(&self) -> Result<&CleanedMatrix> {
        self.cleaned.as_ref().context("cleaned matrix missing")
    }

    pub fn exocrine(&self) -> Result<&ExprMatrix> {
        self.exocrine.as_ref().context("exocrine matrix missing")
    }
}
