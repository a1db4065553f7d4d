//! Grounding: turn a Junto edge list plus seed labels into per-label query
//! graphs.
//!
//! Every input edge becomes two directed `assoc` records (one per
//! direction). A synthetic start node, allocated after all graph nodes so
//! its id is strictly the largest, anchors one query graph per distinct
//! seed label: the start node connects to that label's seed nodes through
//! `seed` edges, and the full structural edge set follows. Grounding itself
//! cannot fail; bad input lines never get this far.

use std::collections::BTreeSet;

use crate::features::{self, FeatureVocabulary};
use crate::junto::{JuntoEdge, SeedAssignment};
use crate::registry::{NodeId, NodeRegistry};

pub mod degree;

pub use degree::add_degree_features;

/// A directed edge in a grounded query graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundedEdge {
    pub src: NodeId,
    pub dst: NodeId,
    /// 1-based indices into the owning graph's vocabulary.
    pub features: Vec<features::FeatureId>,
}

impl GroundedEdge {
    pub fn new(src: NodeId, dst: NodeId, features: Vec<features::FeatureId>) -> Self {
        Self { src, dst, features }
    }
}

/// One per-label query graph, ready for augmentation and serialization.
///
/// Each graph owns its edges and its vocabulary outright. Sibling graphs
/// share nothing mutable, so augmenting one can never corrupt another.
#[derive(Debug, Clone)]
pub struct QueryGraph {
    /// The seed label this graph queries for; first column of the grounded
    /// line.
    pub query: String,
    /// Nodes treated as positive answers. Always the start node.
    pub pos_nodes: Vec<NodeId>,
    /// Nodes treated as negative answers. Always empty.
    pub neg_nodes: Vec<NodeId>,
    /// Count of named graph nodes. The synthetic start node is not one.
    pub node_count: usize,
    /// Seed edges first, then the structural records.
    pub edges: Vec<GroundedEdge>,
    pub features: FeatureVocabulary,
}

/// Everything a grounding run produces: the per-label graphs plus the node
/// registry they were built against.
///
/// The registry doubles as the node-map artifact (id → name for every named
/// node); it is carried once here instead of being duplicated into each
/// graph.
#[derive(Debug, Clone)]
pub struct Grounding {
    pub graphs: Vec<QueryGraph>,
    pub registry: NodeRegistry,
}

/// Ground a Junto edge list into one query graph per label.
///
/// Node ids are assigned in edge-stream encounter order; labels are
/// processed in sorted order and seed edges within a graph follow ascending
/// node id, so the same input always yields byte-identical output. Seeds
/// naming nodes absent from the edge list contribute nothing. Empty inputs
/// are fine: no labels means no graphs, no edges means graphs with seed
/// edges only (or none at all).
pub fn ground<'a>(
    edges: &[JuntoEdge],
    seeds: &SeedAssignment,
    labels: impl IntoIterator<Item = &'a str>,
) -> Grounding {
    tracing::info!(edges = edges.len(), seeds = seeds.len(), "grounding started");

    let mut registry = NodeRegistry::new();
    let mut structural = Vec::with_capacity(edges.len() * 2);
    for edge in edges {
        let n1 = registry.intern(&edge.node1);
        let n2 = registry.intern(&edge.node2);
        structural.push(GroundedEdge::new(n1, n2, vec![features::ASSOC]));
        structural.push(GroundedEdge::new(n2, n1, vec![features::ASSOC]));
    }

    // Allocated after every named node, so start > all structural ids.
    let start = registry.synthetic_id();

    let labels: BTreeSet<&str> = labels.into_iter().collect();
    let mut graphs = Vec::with_capacity(labels.len());
    for label in labels {
        let mut graph_edges = Vec::new();
        for (id, name) in registry.iter() {
            if seeds.label_of(name) == Some(label) {
                graph_edges.push(GroundedEdge::new(start, id, vec![features::SEED]));
            }
        }
        graph_edges.extend_from_slice(&structural);
        graphs.push(QueryGraph {
            query: label.to_string(),
            pos_nodes: vec![start],
            neg_nodes: Vec::new(),
            node_count: registry.len(),
            edges: graph_edges,
            features: FeatureVocabulary::new(),
        });
    }

    tracing::info!(
        graphs = graphs.len(),
        nodes = registry.len(),
        "grounding finished"
    );
    Grounding { graphs, registry }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(n1: &str, n2: &str) -> JuntoEdge {
        JuntoEdge::new(n1, n2, "1.0")
    }

    fn seeds(pairs: &[(&str, &str)]) -> SeedAssignment {
        SeedAssignment::from_edges(
            pairs
                .iter()
                .map(|(node, label)| JuntoEdge::new(*node, *label, "1.0")),
        )
    }

    #[test]
    fn every_input_edge_becomes_two_assoc_records() {
        let seeds = seeds(&[("a", "X")]);
        let grounding = ground(&[edge("a", "b"), edge("b", "c")], &seeds, ["X"]);
        let graph = &grounding.graphs[0];
        // 1 seed edge + 2 * 2 structural records.
        assert_eq!(graph.edges.len(), 5);
        let assoc = graph
            .edges
            .iter()
            .filter(|e| e.features == vec![features::ASSOC])
            .count();
        assert_eq!(assoc, 4);
    }

    #[test]
    fn ids_follow_edge_stream_encounter_order() {
        let grounding = ground(
            &[edge("c", "a"), edge("a", "b")],
            &SeedAssignment::default(),
            [],
        );
        let reg = &grounding.registry;
        assert_eq!(reg.lookup("c").unwrap().get(), 1);
        assert_eq!(reg.lookup("a").unwrap().get(), 2);
        assert_eq!(reg.lookup("b").unwrap().get(), 3);
    }

    #[test]
    fn start_node_id_exceeds_every_named_id() {
        let seeds = seeds(&[("a", "X")]);
        let grounding = ground(&[edge("a", "b")], &seeds, ["X"]);
        let start = grounding.graphs[0].pos_nodes[0];
        assert_eq!(start.get(), 3);
        assert_eq!(grounding.registry.name_of(start), None);
        assert!(grounding.registry.iter().all(|(id, _)| id < start));
    }

    #[test]
    fn one_graph_per_label_in_sorted_order() {
        let seeds = seeds(&[("a", "zeta"), ("b", "alpha"), ("c", "mid")]);
        let grounding = ground(
            &[edge("a", "b"), edge("b", "c")],
            &seeds,
            seeds.labels(),
        );
        let queries: Vec<&str> = grounding.graphs.iter().map(|g| g.query.as_str()).collect();
        assert_eq!(queries, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn seed_edges_precede_structural_records() {
        let seeds = seeds(&[("a", "X"), ("c", "X")]);
        let grounding = ground(&[edge("a", "b"), edge("b", "c")], &seeds, ["X"]);
        let graph = &grounding.graphs[0];
        let start = graph.pos_nodes[0];
        // Two seed edges, ascending destination id, before anything else.
        assert_eq!(graph.edges[0].src, start);
        assert_eq!(graph.edges[0].dst.get(), 1);
        assert_eq!(graph.edges[0].features, vec![features::SEED]);
        assert_eq!(graph.edges[1].src, start);
        assert_eq!(graph.edges[1].dst.get(), 3);
        assert_eq!(graph.edges[1].features, vec![features::SEED]);
        assert!(graph.edges[2..]
            .iter()
            .all(|e| e.features == vec![features::ASSOC]));
    }

    #[test]
    fn node_count_excludes_the_start_node() {
        let seeds = seeds(&[("a", "X")]);
        let grounding = ground(&[edge("a", "b"), edge("b", "c")], &seeds, ["X"]);
        assert_eq!(grounding.graphs[0].node_count, 3);
        assert_eq!(grounding.registry.len(), 3);
    }

    #[test]
    fn self_loop_yields_two_identical_records() {
        let grounding = ground(&[edge("a", "a")], &SeedAssignment::default(), ["X"]);
        let graph = &grounding.graphs[0];
        assert_eq!(graph.node_count, 1);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0], graph.edges[1]);
        assert_eq!(graph.edges[0].src, graph.edges[0].dst);
    }

    #[test]
    fn label_without_matching_seeds_still_gets_a_graph() {
        let seeds = seeds(&[("a", "X")]);
        let grounding = ground(&[edge("a", "b")], &seeds, ["X", "Y"]);
        assert_eq!(grounding.graphs.len(), 2);
        let y = &grounding.graphs[1];
        assert_eq!(y.query, "Y");
        // No seed edges, structural records only.
        assert_eq!(y.edges.len(), 2);
        assert!(y.edges.iter().all(|e| e.features == vec![features::ASSOC]));
    }

    #[test]
    fn seeds_for_unknown_nodes_are_ignored() {
        let seeds = seeds(&[("ghost", "X"), ("a", "X")]);
        let grounding = ground(&[edge("a", "b")], &seeds, ["X"]);
        let graph = &grounding.graphs[0];
        let seed_edges: Vec<_> = graph
            .edges
            .iter()
            .filter(|e| e.features == vec![features::SEED])
            .collect();
        assert_eq!(seed_edges.len(), 1);
        assert_eq!(seed_edges[0].dst, grounding.registry.lookup("a").unwrap());
    }

    #[test]
    fn degenerate_inputs_are_valid() {
        let empty = ground(&[], &SeedAssignment::default(), []);
        assert!(empty.graphs.is_empty());
        assert!(empty.registry.is_empty());

        // No edges but one label: a graph with just the start node.
        let no_edges = ground(&[], &SeedAssignment::default(), ["X"]);
        assert_eq!(no_edges.graphs.len(), 1);
        let graph = &no_edges.graphs[0];
        assert_eq!(graph.node_count, 0);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.pos_nodes[0].get(), 1);
        assert!(graph.neg_nodes.is_empty());
    }

    #[test]
    fn sibling_graphs_own_independent_state() {
        let seeds = seeds(&[("a", "X"), ("b", "Y")]);
        let mut grounding = ground(&[edge("a", "b")], &seeds, ["X", "Y"]);
        let before = grounding.graphs[1].clone();
        // Mutating one graph's edges and vocabulary leaves the other alone.
        grounding.graphs[0].features.intern("inDeg(1,1)");
        grounding.graphs[0].edges[0]
            .features
            .push(features::ASSOC);
        assert_eq!(grounding.graphs[1].features.len(), before.features.len());
        assert_eq!(grounding.graphs[1].edges, before.edges);
    }
}
