use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use waygraph::builder;
use waygraph::formats::{legacy, mapgr};
use waygraph::ingest::read_pbf;

#[derive(Parser)]
#[command(name = "waygraph")]
#[command(about = "Convert OpenStreetMap extracts into routable graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Current format with a string map id and display name
    Mapgr,
    /// Older format with a numeric map id
    Legacy,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PBF extract into a binary graph file
    Convert {
        /// Input OSM PBF file
        input: PathBuf,

        /// Output graph file (extension added when missing)
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Mapgr)]
        format: Format,

        /// Map identifier stored in the output header
        #[arg(long)]
        map_id: String,

        /// Display name stored in the output header (mapgr only)
        #[arg(long)]
        map_name: Option<String>,

        /// Worker threads for attribute resolution (defaults to all cores)
        #[arg(long)]
        threads: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            map_id,
            map_name,
            threads,
        } => convert(input, output, format, map_id, map_name, threads),
    }
}

fn convert(
    input: PathBuf,
    mut output: PathBuf,
    format: Format,
    map_id: String,
    map_name: Option<String>,
    threads: Option<usize>,
) -> Result<()> {
    let map_name = map_name.unwrap_or_else(|| map_id.clone());

    // Fail on an unencodable header before reading anything.
    match format {
        Format::Mapgr => mapgr::validate(&map_id, &map_name)?,
        Format::Legacy => {
            legacy::validate(&map_id)?;
        }
    }

    if output.extension().is_none() {
        let extension = match format {
            Format::Mapgr => mapgr::DEFAULT_EXTENSION,
            Format::Legacy => legacy::DEFAULT_EXTENSION,
        };
        output.set_extension(extension);
    }

    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let start = Instant::now();
    let data = read_pbf(&input)?;

    let (arcs, road_infos) = builder::convert(&data.ways, &data.nodes)
        .with_context(|| format!("failed to convert {}", input.display()))?;
    let graph = builder::assemble(map_id, map_name, arcs, road_infos);
    info!(
        vertices = graph.vertices.len(),
        arcs = graph.n_arcs(),
        road_infos = graph.road_infos.len(),
        "graph assembled in {:.2}s",
        start.elapsed().as_secs_f64()
    );

    match format {
        Format::Mapgr => mapgr::write_file(&output, &graph),
        Format::Legacy => legacy::write_file(&output, &graph),
    }
    .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());

    Ok(())
}
