//! Degree feature augmentation for query graphs.

use std::collections::HashMap;

use crate::features::FeatureId;
use crate::registry::NodeId;

use super::QueryGraph;

/// Append per-node degree features to every edge of a graph.
///
/// A first scan counts in- and out-degrees over the full edge list (seed
/// edges included) and records the order nodes are first seen as
/// destinations and as sources. The vocabulary then grows one
/// `inDeg(<node>,<deg>)` entry per observed destination in encounter order,
/// followed by one `outDeg(<node>,<deg>)` entry per observed source, and a
/// second scan appends to each edge's feature list the destination's
/// in-degree feature and then the source's out-degree feature.
///
/// Not idempotent: a second call would append the same features again. The
/// pipeline invokes it once per graph, just before serialization.
pub fn add_degree_features(graph: &mut QueryGraph) {
    let mut in_deg: HashMap<NodeId, usize> = HashMap::new();
    let mut out_deg: HashMap<NodeId, usize> = HashMap::new();
    let mut dst_order: Vec<NodeId> = Vec::new();
    let mut src_order: Vec<NodeId> = Vec::new();

    for edge in &graph.edges {
        if !out_deg.contains_key(&edge.src) {
            src_order.push(edge.src);
        }
        *out_deg.entry(edge.src).or_insert(0) += 1;
        if !in_deg.contains_key(&edge.dst) {
            dst_order.push(edge.dst);
        }
        *in_deg.entry(edge.dst).or_insert(0) += 1;
    }

    let mut in_feat: HashMap<NodeId, FeatureId> = HashMap::new();
    for &node in &dst_order {
        let deg = in_deg[&node];
        in_feat.insert(node, graph.features.intern(&format!("inDeg({node},{deg})")));
    }
    let mut out_feat: HashMap<NodeId, FeatureId> = HashMap::new();
    for &node in &src_order {
        let deg = out_deg[&node];
        out_feat.insert(node, graph.features.intern(&format!("outDeg({node},{deg})")));
    }

    for edge in &mut graph.edges {
        // Both lookups hit: the first scan saw every endpoint.
        edge.features.push(in_feat[&edge.dst]);
        edge.features.push(out_feat[&edge.src]);
    }
}
