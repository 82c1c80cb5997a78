use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_ifnsig::cli::{Cli, Commands, GenesetCommand, GenesetShowArgs};
use kira_ifnsig::ctx::{Ctx, DEFAULT_GMT};
use kira_ifnsig::geneset::{match_genes, read_gene_list};
use kira_ifnsig::io;
use kira_ifnsig::pipeline::Pipeline;
use kira_ifnsig::pipeline::stage1_load::Stage1Load;
use kira_ifnsig::pipeline::stage2_clean::Stage2Clean;
use kira_ifnsig::pipeline::stage5_exocrine::Stage5Exocrine;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let mut ctx = Ctx::new(
                args.input,
                args.genes,
                args.gmt,
                args.out,
                env!("CARGO_PKG_VERSION"),
            );
            ctx.min_size = args.min_size;
            ctx.bins = args.bins;
            ctx.threads = args.threads;
            ctx.render_plots = !args.no_plots;

            Pipeline::full().run(&mut ctx)?;
            print_summary(&ctx)?;
        }
        Commands::Validate(args) => {
            let mut ctx = Ctx::new(
                args.input,
                PathBuf::new(),
                PathBuf::from(DEFAULT_GMT),
                PathBuf::from("."),
                env!("CARGO_PKG_VERSION"),
            );
            let pipeline = Pipeline::new(vec![
                Box::new(Stage1Load::new()),
                Box::new(Stage2Clean::new()),
                Box::new(Stage5Exocrine::new()),
            ]);
            pipeline.run(&mut ctx)?;
            print_validate_summary(&ctx)?;
        }
        Commands::Geneset(args) => match args.command {
            GenesetCommand::Show(show) => handle_geneset_show(show)?,
        },
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(ctx);
    Ok(())
}

fn print_validate_summary(ctx: &Ctx) -> Result<()> {
    let dataset = ctx.dataset()?;
    let cleaned = ctx.cleaned()?;
    println!("kira-ifnsig validate ok");
    println!("genes: {}", dataset.matrix.n_genes());
    println!("samples: {}", dataset.matrix.n_samples());
    println!("genes_dropped: {}", cleaned.dropped.len());
    println!("exocrine_samples: {}", ctx.exocrine()?.n_samples());
    print_warnings(ctx);
    Ok(())
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}

fn handle_geneset_show(args: GenesetShowArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        args.input,
        args.genes,
        PathBuf::from(DEFAULT_GMT),
        PathBuf::from("."),
        env!("CARGO_PKG_VERSION"),
    );
    let pipeline = Pipeline::new(vec![
        Box::new(Stage1Load::new()),
        Box::new(Stage2Clean::new()),
        Box::new(Stage5Exocrine::new()),
    ]);
    pipeline.run(&mut ctx)?;

    let list = read_gene_list(&ctx.gene_list_path)?;
    let exocrine = ctx.exocrine()?;
    let (gene_index, _) = exocrine.gene_index();
    let matched = match_genes(&list, &gene_index);

    println!(
        "matched {}/{} ({:.4})",
        matched.genes.len(),
        matched.total,
        matched.coverage()
    );
    for gene in &matched.genes {
        println!("+\t{}", gene);
    }
    for gene in &matched.missing {
        println!("-\t{}", gene);
    }
    Ok(())
}
