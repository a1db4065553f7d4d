//! The conversion pipeline: Junto config in, grounded artifacts out.
//!
//! `convert` strings the other modules together for one dataset: parse the
//! config, read the graph and seed files it names, optionally sample the
//! edge list down, ground, optionally append degree features, and write the
//! `.grounded` and `.map` files into the graph directory.

use std::path::{Path, PathBuf};

use rand::SeedableRng;

use crate::error::{ConvertError, SeedwalkError};
use crate::ground;
use crate::junto::{self, JuntoConfig, JuntoEdge};
use crate::proppr;

/// Where grounded artifacts land unless told otherwise.
pub const DEFAULT_GRAPH_DIR: &str = "./graph";

/// Knobs for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory the `.grounded` and `.map` files land in. Created if
    /// absent.
    pub graph_dir: PathBuf,
    /// Percentage of graph edges to keep. 100 keeps everything.
    pub sample_percent: u32,
    /// Fixed RNG seed for sampling; `None` samples from entropy.
    pub sample_seed: Option<u64>,
    /// Append degree features to every graph before writing.
    pub degree_features: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            graph_dir: PathBuf::from(DEFAULT_GRAPH_DIR),
            sample_percent: 100,
            sample_seed: None,
            degree_features: false,
        }
    }
}

/// What a conversion run produced, for the CLI to report.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub dataset: String,
    pub grounded_path: PathBuf,
    pub map_path: PathBuf,
    /// Query graphs written (one per distinct seed label).
    pub graphs: usize,
    /// Named nodes registered.
    pub nodes: usize,
    /// Junto edges fed to the grounder, after sampling.
    pub edges: usize,
    /// Seeded nodes in the seed file.
    pub seeds: usize,
}

/// Run the full pipeline for one Junto config file.
pub fn convert(
    config_path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConvertReport, SeedwalkError> {
    let config_path = config_path.as_ref();
    let dataset = dataset_name(config_path)?;
    let config = JuntoConfig::parse(config_path)?;

    let edges = junto::parse_graph_file(config.graph_file()?)?;
    let seeds = junto::parse_seed_file(config.seed_file()?)?;
    let total = edges.len();
    let edges = sample_edges(edges, options.sample_percent, options.sample_seed);
    if edges.len() < total {
        tracing::info!(
            kept = edges.len(),
            total,
            percent = options.sample_percent,
            "sampled graph edges"
        );
    }

    let mut grounding = ground::ground(&edges, &seeds, seeds.labels());
    if options.degree_features {
        for graph in &mut grounding.graphs {
            ground::add_degree_features(graph);
        }
    }

    std::fs::create_dir_all(&options.graph_dir).map_err(|source| ConvertError::CreateDir {
        path: options.graph_dir.display().to_string(),
        source,
    })?;
    let grounded_path = options.graph_dir.join(format!("{dataset}.grounded"));
    let map_path = options.graph_dir.join(format!("{dataset}.map"));
    proppr::write_grounded_file(&grounding.graphs, &grounded_path)?;
    proppr::write_node_map_file(&grounding.registry, &map_path)?;

    Ok(ConvertReport {
        dataset,
        grounded_path,
        map_path,
        graphs: grounding.graphs.len(),
        nodes: grounding.registry.len(),
        edges: edges.len(),
        seeds: seeds.len(),
    })
}

/// The dataset name: the config file's name up to the first dot.
///
/// `data/papers.junto.config` names the dataset `papers`. Paths without a
/// usable file name (no final component, non-UTF-8, or nothing before the
/// first dot) cannot name their output files and are rejected.
pub fn dataset_name(path: impl AsRef<Path>) -> Result<String, ConvertError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ConvertError::DatasetName {
            path: path.display().to_string(),
        })?;
    let name = file_name.split_once('.').map_or(file_name, |(head, _)| head);
    if name.is_empty() {
        return Err(ConvertError::DatasetName {
            path: path.display().to_string(),
        });
    }
    Ok(name.to_string())
}

/// Keep `edges * percent / 100` edges (integer division), chosen without
/// replacement.
///
/// 100 (or more) returns the input untouched. Kept edges stay in input
/// order; a fixed seed makes the choice reproducible across runs.
pub fn sample_edges(edges: Vec<JuntoEdge>, percent: u32, seed: Option<u64>) -> Vec<JuntoEdge> {
    if percent >= 100 {
        return edges;
    }
    let amount = edges.len() * percent as usize / 100;
    let chosen = match seed {
        Some(seed) => rand::seq::index::sample(
            &mut rand::rngs::StdRng::seed_from_u64(seed),
            edges.len(),
            amount,
        ),
        None => rand::seq::index::sample(&mut rand::thread_rng(), edges.len(), amount),
    };
    let mut keep = vec![false; edges.len()];
    for index in chosen.iter() {
        keep[index] = true;
    }
    edges
        .into_iter()
        .zip(keep)
        .filter_map(|(edge, kept)| kept.then_some(edge))
        .collect()
}
