use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snap_csr::config::DEFAULT_MAX_LINE_BYTES;
use snap_csr::graph::io_bin::write_csr_to_dir;
use snap_csr::graph::stats::{degree_summary, validate_csr};
use snap_csr::{load_graph_with_options, parse_format_tag, FormatTag, Graph, LoadOptions};

#[derive(Subcommand, Debug)]
enum Commands {
    /// load an edge list and dump the CSR arrays as little-endian binaries
    Convert(ConvertArgs),
    /// load an edge list and print size and degree statistics
    Stats(InputArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// edge list file
    input: PathBuf,

    /// input format: SNAP or WDC
    #[arg(short = 'f', long = "format", default_value = "SNAP", value_parser = parse_format_tag)]
    format: FormatTag,

    /// reject lines longer than this many bytes
    #[arg(long = "max-line-bytes", default_value_t = DEFAULT_MAX_LINE_BYTES)]
    max_line_bytes: usize,
}

#[derive(clap::Args, Debug)]
struct ConvertArgs {
    #[command(flatten)]
    input: InputArgs,

    /// output directory, created if missing
    #[arg(short = 'o', long = "out-dir")]
    out_dir: PathBuf,

    /// file name prefix for the dumped arrays
    #[arg(short = 'n', long = "name", default_value = "graph")]
    name: String,
}

fn load(args: &InputArgs) -> Result<Graph> {
    let options = LoadOptions::default().with_max_line_bytes(args.max_line_bytes);
    load_graph_with_options(&args.input, args.format, &options)
        .with_context(|| format!("loading {} graph from {:?}", args.format, args.input))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snap_csr=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.cmd {
        Commands::Convert(convert_args) => {
            let g = load(&convert_args.input)?;
            std::fs::create_dir_all(&convert_args.out_dir)
                .with_context(|| format!("creating {:?}", convert_args.out_dir))?;
            write_csr_to_dir(&convert_args.out_dir, &convert_args.name, &g)?;
            tracing::info!(
                out_dir = ?convert_args.out_dir,
                name = %convert_args.name,
                nodes = g.node_count(),
                edges = g.edge_count(),
                "wrote CSR arrays"
            );
        }
        Commands::Stats(input_args) => {
            let g = load(&input_args)?;
            validate_csr(&g).context("CSR validation failed")?;
            let s = degree_summary(&g);
            println!("nodes: {}", g.node_count());
            println!("edges: {}", g.edge_count());
            println!("out-degree min/max/mean: {}/{}/{:.3}", s.min, s.max, s.mean);
        }
    }
    Ok(())
}
