use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ctx::{DEFAULT_BINS, DEFAULT_GENE_LIST, DEFAULT_GMT, DEFAULT_INPUT, DEFAULT_MIN_SIZE};

#[derive(Debug, Parser)]
#[command(
    name = "kira-ifnsig",
    version,
    about = "IFN signature GSVA scoring and expression QC for GCT matrices"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
    Geneset(GenesetArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, default_value = DEFAULT_INPUT, help = "GCT expression matrix (.gct or .gct.gz)")]
    pub input: PathBuf,

    #[arg(long, default_value = DEFAULT_GENE_LIST, help = "Gene list, one id per line")]
    pub genes: PathBuf,

    #[arg(long, default_value = DEFAULT_GMT, help = "Gene-set file to write and score")]
    pub gmt: PathBuf,

    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MIN_SIZE, help = "Minimum gene-set size for GSVA")]
    pub min_size: usize,

    #[arg(
        long,
        default_value_t = DEFAULT_BINS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
        help = "Histogram bins (at least 1)"
    )]
    pub bins: usize,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,

    #[arg(long, default_value_t = false, help = "Skip SVG rendering")]
    pub no_plots: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct GenesetArgs {
    #[command(subcommand)]
    pub command: GenesetCommand,
}

#[derive(Debug, Subcommand)]
pub enum GenesetCommand {
    Show(GenesetShowArgs),
}

#[derive(Debug, Args)]
pub struct GenesetShowArgs {
    #[arg(long, default_value = DEFAULT_INPUT, help = "GCT matrix to resolve coverage against")]
    pub input: PathBuf,

    #[arg(long, default_value = DEFAULT_GENE_LIST)]
    pub genes: PathBuf,
}
