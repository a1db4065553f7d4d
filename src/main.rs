//! seedwalk CLI: Junto to ProPPR grounding converter and engine driver.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;

use seedwalk::convert::{self, ConvertOptions};
use seedwalk::results;
use seedwalk::runner::{self, RunnerOptions};

#[derive(Parser)]
#[command(
    name = "seedwalk",
    version,
    about = "Ground Junto label-propagation graphs into ProPPR query graphs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Junto dataset into grounded ProPPR query graphs.
    Convert {
        /// Junto config file naming the graph and seed files.
        config: PathBuf,

        /// Directory to write the .grounded and .map files to.
        #[arg(short = 'd', long, default_value = convert::DEFAULT_GRAPH_DIR)]
        graph_dir: PathBuf,

        /// Percent of Junto graph edges to keep in the query graphs.
        #[arg(
            short = 'p',
            long,
            default_value_t = 100,
            value_parser = clap::value_parser!(u32).range(0..=100)
        )]
        sample_percent: u32,

        /// Fix the sampling RNG seed for reproducible output.
        #[arg(long)]
        sample_seed: Option<u64>,

        /// Append per-node degree features to every query graph.
        #[arg(long)]
        degree_features: bool,
    },

    /// Run a propagation engine and collect its label rankings.
    Run {
        #[command(subcommand)]
        engine: EngineCommand,
    },
}

#[derive(Subcommand)]
enum EngineCommand {
    /// Run Junto label propagation.
    Junto {
        /// Junto config file.
        #[arg(long)]
        config: PathBuf,

        /// Where to write the per-node label rankings.
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Java heap ceiling, e.g. "32g".
        #[arg(long, default_value = runner::DEFAULT_MEM_SIZE)]
        mem: String,

        /// Junto installation directory (contains bin/junto).
        #[arg(long, default_value = runner::DEFAULT_JUNTO_DIR)]
        junto_dir: PathBuf,
    },

    /// Run ProPPR's SRW propagator on a grounded dataset.
    Srw {
        /// Junto config file the dataset was converted from.
        #[arg(long)]
        config: PathBuf,

        /// Where to write the per-node label rankings.
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Java heap ceiling, e.g. "32g".
        #[arg(long, default_value = runner::DEFAULT_MEM_SIZE)]
        mem: String,

        /// Number of SRW worker threads.
        #[arg(long, default_value_t = runner::DEFAULT_THREADS)]
        threads: u32,

        /// ProPPR checkout directory (contains conf, bin, lib).
        #[arg(long, default_value = runner::DEFAULT_PROPPR_DIR)]
        proppr_dir: PathBuf,

        /// Directory holding the grounded artifacts; SRW output lands here.
        #[arg(long, default_value = convert::DEFAULT_GRAPH_DIR)]
        graph_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            config,
            graph_dir,
            sample_percent,
            sample_seed,
            degree_features,
        } => {
            let options = ConvertOptions {
                graph_dir,
                sample_percent,
                sample_seed,
                degree_features,
            };
            let report = convert::convert(&config, &options)?;
            println!(
                "Grounded {}: {} query graphs over {} nodes ({} junto edges, {} seeds)",
                report.dataset, report.graphs, report.nodes, report.edges, report.seeds
            );
            println!("  grounded: {}", report.grounded_path.display());
            println!("  node map: {}", report.map_path.display());
        }

        Commands::Run { engine } => match engine {
            EngineCommand::Junto {
                config,
                output,
                mem,
                junto_dir,
            } => {
                let options = RunnerOptions {
                    mem_size: mem,
                    junto_dir,
                    ..Default::default()
                };
                let rankings = runner::run_junto(&config, &options)?;
                results::write_rankings_file(&rankings, &output)?;
                println!(
                    "Wrote rankings for {} nodes to {}",
                    rankings.len(),
                    output.display()
                );
            }

            EngineCommand::Srw {
                config,
                output,
                mem,
                threads,
                proppr_dir,
                graph_dir,
            } => {
                let options = RunnerOptions {
                    mem_size: mem,
                    threads,
                    proppr_dir,
                    graph_dir,
                    ..Default::default()
                };
                let rankings = runner::run_srw(&config, &options)?;
                results::write_rankings_file(&rankings, &output)?;
                println!(
                    "Wrote rankings for {} nodes to {}",
                    rankings.len(),
                    output.display()
                );
            }
        },
    }

    Ok(())
}
