//! Driving the engines: Junto label propagation and ProPPR's SRW.
//!
//! Both engines are opaque Java programs run as child processes. Junto is
//! launched through its `bin/junto` wrapper with the environment it expects
//! (`JUNTO_DIR`, a `PATH` that can find it, `JAVA_MEM_FLAG`); SRW is a bare
//! `java` invocation against a ProPPR checkout's classpath. Either way the
//! child gets no timeout and its exit status earns at most a warning: the
//! results file it leaves behind is the real interface.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::convert;
use crate::error::{RunnerError, SeedwalkError};
use crate::junto::JuntoConfig;
use crate::results::{self, LabelRankings};

pub const DEFAULT_MEM_SIZE: &str = "32g";
pub const DEFAULT_THREADS: u32 = 8;
pub const DEFAULT_JUNTO_DIR: &str = "./lib/junto";
pub const DEFAULT_PROPPR_DIR: &str = "./lib/ProPPR";

/// Knobs for an engine run.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Java heap ceiling, passed as `-Xmx<mem_size>`.
    pub mem_size: String,
    /// SRW worker threads.
    pub threads: u32,
    /// Junto installation directory (contains `bin/junto`).
    pub junto_dir: PathBuf,
    /// ProPPR checkout directory (contains `conf`, `bin`, `lib`).
    pub proppr_dir: PathBuf,
    /// Where SRW output files land, alongside the grounded artifacts.
    pub graph_dir: PathBuf,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            mem_size: DEFAULT_MEM_SIZE.to_string(),
            threads: DEFAULT_THREADS,
            junto_dir: PathBuf::from(DEFAULT_JUNTO_DIR),
            proppr_dir: PathBuf::from(DEFAULT_PROPPR_DIR),
            graph_dir: PathBuf::from(convert::DEFAULT_GRAPH_DIR),
        }
    }
}

/// Run Junto on a config file and collect its per-node label rankings.
///
/// Junto's own scripts locate the installation through `JUNTO_DIR`, which
/// must be absolute because they change directories; the configured
/// directory is also prepended to `PATH`. When the child exits, whatever it
/// wrote to the config's `output_file` is parsed regardless of exit status.
pub fn run_junto(
    config_path: impl AsRef<Path>,
    options: &RunnerOptions,
) -> Result<LabelRankings, SeedwalkError> {
    let config_path = config_path.as_ref();
    let junto_home =
        std::path::absolute(&options.junto_dir).map_err(|source| RunnerError::JuntoDir {
            path: options.junto_dir.display().to_string(),
            source,
        })?;
    let binary = options.junto_dir.join("bin").join("junto");

    tracing::info!(config = %config_path.display(), "running junto");
    let status = Command::new(&binary)
        .arg("config")
        .arg(config_path)
        .env("JUNTO_DIR", &junto_home)
        .env(
            "PATH",
            prepended_path(&junto_home, std::env::var("PATH").ok().as_deref()),
        )
        .env("JAVA_MEM_FLAG", format!("-Xmx{}", options.mem_size))
        .status()
        .map_err(|source| RunnerError::Spawn {
            command: binary.display().to_string(),
            source,
        })?;
    if !status.success() {
        tracing::warn!(%status, "junto exited abnormally, reading its output anyway");
    }

    let config = JuntoConfig::parse(config_path)?;
    Ok(results::parse_junto_results(config.output_file()?)?)
}

/// Run ProPPR's SRW propagator on a grounded dataset and collect rankings.
///
/// The grounded input is found through the same config-derived dataset name
/// the converter used; SRW writes `<graph_dir>/<dataset>.out.srw`, which is
/// parsed when the child exits.
pub fn run_srw(
    config_path: impl AsRef<Path>,
    options: &RunnerOptions,
) -> Result<LabelRankings, SeedwalkError> {
    let config_path = config_path.as_ref();
    let dataset = convert::dataset_name(config_path)?;
    let srw_output = srw_output_path(&options.graph_dir, &dataset);

    let mut command = Command::new("java");
    command
        .arg(format!("-Xmx{}", options.mem_size))
        .arg("-cp")
        .arg(proppr_classpath(&options.proppr_dir))
        .arg("edu.cmu.ml.proppr.Propagator")
        .arg(config_path)
        .arg(&srw_output)
        .arg(options.threads.to_string());

    tracing::info!(%dataset, ?command, "running srw");
    let status = command.status().map_err(|source| RunnerError::Spawn {
        command: "java".to_string(),
        source,
    })?;
    if !status.success() {
        tracing::warn!(%status, "srw exited abnormally, reading its output anyway");
    }

    Ok(results::parse_srw_results(&srw_output)?)
}

/// ProPPR's runtime classpath: `conf`, compiled classes, and every bundled
/// jar.
fn proppr_classpath(proppr_dir: &Path) -> String {
    let dir = proppr_dir.display();
    format!("{dir}/conf:{dir}/bin:{dir}/lib/*")
}

fn srw_output_path(graph_dir: &Path, dataset: &str) -> PathBuf {
    graph_dir.join(format!("{dataset}.out.srw"))
}

fn prepended_path(junto_home: &Path, existing: Option<&str>) -> String {
    match existing {
        Some(path) if !path.is_empty() => format!("{}:{path}", junto_home.display()),
        _ => junto_home.display().to_string(),
    }
}
