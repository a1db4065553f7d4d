//! Junto input parsing: config files, edge lists, seed assignments.
//!
//! A Junto run is described by a `key = value` config file that names a graph
//! file (whitespace-separated `node1 node2 weight` triples) and a seed file
//! (same triple syntax, read as `node label weight`). This module reads all
//! three formats. Malformed lines are skipped with a logged warning so a few
//! bad rows never abort a long conversion; only unreadable files and missing
//! required config keys surface as errors.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::JuntoError;

// ── Config files ────────────────────────────────────────────────────────

/// Parsed Junto `key = value` config file.
///
/// Only lines with exactly one ` = ` separator count; everything else
/// (blank lines, comments, malformed rows) is skipped without complaint,
/// as Junto itself does. Duplicate keys keep the last value seen.
#[derive(Debug, Clone)]
pub struct JuntoConfig {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl JuntoConfig {
    /// Read and parse a config file.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self, JuntoError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "parsing junto config");
        let contents = std::fs::read_to_string(path).map_err(|source| JuntoError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            entries: parse_config_str(&contents),
        })
    }

    /// Path the config was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw lookup of any config key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn require(&self, key: &str) -> Result<&str, JuntoError> {
        self.get(key).ok_or_else(|| JuntoError::MissingKey {
            key: key.to_string(),
            path: self.path.display().to_string(),
        })
    }

    /// The edge-list file the config points at (`graph_file`).
    pub fn graph_file(&self) -> Result<&str, JuntoError> {
        self.require("graph_file")
    }

    /// The seed-label file the config points at (`seed_file`).
    pub fn seed_file(&self) -> Result<&str, JuntoError> {
        self.require("seed_file")
    }

    /// Where Junto writes its estimated scores (`output_file`).
    pub fn output_file(&self) -> Result<&str, JuntoError> {
        self.require("output_file")
    }
}

fn parse_config_str(contents: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for line in contents.lines() {
        let fields: Vec<&str> = line.trim().split(" = ").collect();
        if let [key, value] = fields[..] {
            entries.insert(key.to_string(), value.to_string());
        }
    }
    entries
}

// ── Graph files ─────────────────────────────────────────────────────────

/// One `node1 node2 weight` record from a Junto graph file.
///
/// The weight is carried as the uninterpreted string Junto wrote; grounding
/// connects endpoints and never reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JuntoEdge {
    pub node1: String,
    pub node2: String,
    pub weight: String,
}

impl JuntoEdge {
    pub fn new(
        node1: impl Into<String>,
        node2: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            weight: weight.into(),
        }
    }
}

/// Read a Junto graph file into its edge records.
///
/// Lines that do not split into exactly three whitespace-separated fields
/// are skipped with a warning.
pub fn parse_graph_file(path: impl AsRef<Path>) -> Result<Vec<JuntoEdge>, JuntoError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "parsing junto graph file");
    let contents = std::fs::read_to_string(path).map_err(|source| JuntoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let edges = parse_edge_lines(&contents);
    tracing::info!(path = %path.display(), edges = edges.len(), "parsed junto graph file");
    Ok(edges)
}

fn parse_edge_lines(contents: &str) -> Vec<JuntoEdge> {
    let mut edges = Vec::new();
    for line in contents.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if let [node1, node2, weight] = fields[..] {
            edges.push(JuntoEdge::new(node1, node2, weight));
        } else {
            tracing::warn!(line, "skipping malformed edge line");
        }
    }
    edges
}

// ── Seed files ──────────────────────────────────────────────────────────

/// Seed labels keyed by node name.
///
/// Built from a seed file's `node label weight` records. A node listed more
/// than once keeps its last assignment, matching Junto's behavior.
#[derive(Debug, Clone, Default)]
pub struct SeedAssignment {
    labels: HashMap<String, String>,
}

impl SeedAssignment {
    /// Build an assignment from edge records read as `node label weight`.
    pub fn from_edges(edges: impl IntoIterator<Item = JuntoEdge>) -> Self {
        let mut labels = HashMap::new();
        for edge in edges {
            labels.insert(edge.node1, edge.node2);
        }
        Self { labels }
    }

    /// The label assigned to a node, if any.
    pub fn label_of(&self, node: &str) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    /// Distinct labels in sorted order.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.labels.values().map(String::as_str).collect()
    }

    /// Number of seeded nodes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no node carries a seed label.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Read a Junto seed file into a [`SeedAssignment`].
///
/// Seed files share the graph-file syntax; the second field is the label.
pub fn parse_seed_file(path: impl AsRef<Path>) -> Result<SeedAssignment, JuntoError> {
    let edges = parse_graph_file(path)?;
    Ok(SeedAssignment::from_edges(edges))
}
