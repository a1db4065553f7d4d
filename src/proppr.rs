//! ProPPR grounded-format serialization.
//!
//! Two artifacts per dataset: a `.grounded` text file with one tab-separated
//! line per query graph, and a `.map` JSON object taking stringified node
//! ids back to the original node names. The grounded line layout is fixed by
//! what `edu.cmu.ml.proppr.Propagator` parses: query, query weight (always
//! `1`), comma-joined positive ids, comma-joined negative ids, node count,
//! edge count, `:`-joined feature vocabulary, then one `src->dst:f1,f2,...`
//! segment per edge.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SerializeError;
use crate::ground::QueryGraph;
use crate::registry::{NodeId, NodeRegistry};

/// Render one query graph as its grounded line, without the trailing
/// newline.
pub fn grounded_line(graph: &QueryGraph) -> String {
    let vocabulary: Vec<&str> = graph.features.iter().collect();
    let mut fields = vec![
        graph.query.clone(),
        "1".to_string(),
        join_ids(&graph.pos_nodes),
        join_ids(&graph.neg_nodes),
        graph.node_count.to_string(),
        graph.edges.len().to_string(),
        vocabulary.join(":"),
    ];
    for edge in &graph.edges {
        let features: Vec<String> = edge.features.iter().map(ToString::to_string).collect();
        fields.push(format!("{}->{}:{}", edge.src, edge.dst, features.join(",")));
    }
    fields.join("\t")
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Write every graph as one grounded line to `out`.
pub fn write_grounded(graphs: &[QueryGraph], out: &mut impl Write) -> std::io::Result<()> {
    for graph in graphs {
        writeln!(out, "{}", grounded_line(graph))?;
    }
    Ok(())
}

/// Write the grounded file at `path`, creating or truncating it.
pub fn write_grounded_file(
    graphs: &[QueryGraph],
    path: impl AsRef<Path>,
) -> Result<(), SerializeError> {
    let path = path.as_ref();
    let io_error = |source| SerializeError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
    write_grounded(graphs, &mut out).map_err(io_error)?;
    out.flush().map_err(io_error)?;
    tracing::info!(path = %path.display(), graphs = graphs.len(), "wrote grounded graphs");
    Ok(())
}

/// The node-map artifact: id → name for every named node, ascending id.
///
/// The synthetic start node has no name and is absent. Keys serialize as
/// strings because JSON objects demand it; their numeric order survives the
/// `BTreeMap`.
pub fn node_map(registry: &NodeRegistry) -> BTreeMap<u64, &str> {
    registry.iter().map(|(id, name)| (id.get(), name)).collect()
}

/// Write the node map JSON at `path`, creating or truncating it.
pub fn write_node_map_file(
    registry: &NodeRegistry,
    path: impl AsRef<Path>,
) -> Result<(), SerializeError> {
    let path = path.as_ref();
    let io_error = |source| SerializeError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer(&mut out, &node_map(registry)).map_err(|source| SerializeError::Json {
        path: path.display().to_string(),
        source,
    })?;
    out.flush().map_err(io_error)?;
    tracing::info!(path = %path.display(), nodes = registry.len(), "wrote node map");
    Ok(())
}
