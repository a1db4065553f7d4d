//! End-to-end grounding tests.
//!
//! These exercise the full path from Junto edge records through grounding,
//! degree augmentation, and line serialization, pinning down the exact
//! output bytes for a small worked dataset: the chain a-b, b-c with node a
//! seeded X and node c seeded Y.

use seedwalk::features;
use seedwalk::ground::{self, Grounding};
use seedwalk::junto::{JuntoEdge, SeedAssignment};
use seedwalk::proppr;

const BUILTIN_VOCAB: &str =
    "seed:assoc:id(trueLoop):id(trueLoopRestart):fixedWeight:id(restart):id(alphaBooster)";

fn chain_edges() -> Vec<JuntoEdge> {
    vec![
        JuntoEdge::new("a", "b", "1.0"),
        JuntoEdge::new("b", "c", "1.0"),
    ]
}

fn chain_seeds() -> SeedAssignment {
    SeedAssignment::from_edges([
        JuntoEdge::new("a", "X", "1.0"),
        JuntoEdge::new("c", "Y", "1.0"),
    ])
}

fn chain_grounding() -> Grounding {
    let edges = chain_edges();
    let seeds = chain_seeds();
    ground::ground(&edges, &seeds, seeds.labels())
}

#[test]
fn worked_example_grounds_to_exact_lines() {
    let grounding = chain_grounding();
    assert_eq!(grounding.graphs.len(), 2);

    // Ids follow first sighting: a=1, b=2, c=3; the start node is 4.
    let line_x = proppr::grounded_line(&grounding.graphs[0]);
    assert_eq!(
        line_x,
        format!("X\t1\t4\t\t3\t5\t{BUILTIN_VOCAB}\t4->1:1\t1->2:2\t2->1:2\t2->3:2\t3->2:2")
    );

    let line_y = proppr::grounded_line(&grounding.graphs[1]);
    assert_eq!(
        line_y,
        format!("Y\t1\t4\t\t3\t5\t{BUILTIN_VOCAB}\t4->3:1\t1->2:2\t2->1:2\t2->3:2\t3->2:2")
    );
}

#[test]
fn worked_example_node_map() {
    let grounding = chain_grounding();
    let json = serde_json::to_string(&proppr::node_map(&grounding.registry)).unwrap();
    assert_eq!(json, r#"{"1":"a","2":"b","3":"c"}"#);
}

#[test]
fn structural_records_double_the_input_edges() {
    let edges: Vec<JuntoEdge> = (0..25)
        .map(|i| JuntoEdge::new(format!("n{i}"), format!("n{}", (i * 7) % 25), "1.0"))
        .collect();
    let grounding = ground::ground(&edges, &SeedAssignment::default(), ["L"]);
    assert_eq!(grounding.graphs[0].edges.len(), 2 * edges.len());
}

#[test]
fn ids_are_dense_and_start_is_maximal() {
    let edges: Vec<JuntoEdge> = (0..10)
        .map(|i| JuntoEdge::new(format!("n{i}"), format!("n{}", i + 1), "1.0"))
        .collect();
    let seeds = SeedAssignment::from_edges([JuntoEdge::new("n0", "L", "1.0")]);
    let grounding = ground::ground(&edges, &seeds, seeds.labels());

    let ids: Vec<u64> = grounding.registry.iter().map(|(id, _)| id.get()).collect();
    let expected: Vec<u64> = (1..=11).collect();
    assert_eq!(ids, expected);

    let start = grounding.graphs[0].pos_nodes[0];
    assert_eq!(start.get(), 12);
    assert_eq!(grounding.registry.name_of(start), None);
}

#[test]
fn one_graph_per_distinct_label_with_matching_seed_counts() {
    let edges = vec![
        JuntoEdge::new("a", "b", "1"),
        JuntoEdge::new("b", "c", "1"),
        JuntoEdge::new("c", "d", "1"),
    ];
    let seeds = SeedAssignment::from_edges([
        JuntoEdge::new("a", "X", "1"),
        JuntoEdge::new("b", "X", "1"),
        JuntoEdge::new("c", "Y", "1"),
        JuntoEdge::new("offgraph", "Y", "1"),
    ]);
    let grounding = ground::ground(&edges, &seeds, seeds.labels());
    assert_eq!(grounding.graphs.len(), 2);

    let seed_count = |graph: &ground::QueryGraph| {
        graph
            .edges
            .iter()
            .filter(|e| e.features == vec![features::SEED])
            .count()
    };
    assert_eq!(grounding.graphs[0].query, "X");
    assert_eq!(seed_count(&grounding.graphs[0]), 2);
    // The off-graph seed contributes nothing to Y.
    assert_eq!(grounding.graphs[1].query, "Y");
    assert_eq!(seed_count(&grounding.graphs[1]), 1);
}

#[test]
fn degree_augmented_worked_example_is_exact() {
    let mut grounding = chain_grounding();
    for graph in &mut grounding.graphs {
        ground::add_degree_features(graph);
    }

    // Graph X edge order: (4,1) (1,2) (2,1) (2,3) (3,2). In-degree entries
    // appear for destinations 1, 2, 3 (indices 8-10), then out-degree
    // entries for sources 4, 1, 2, 3 (indices 11-14).
    let line_x = proppr::grounded_line(&grounding.graphs[0]);
    assert_eq!(
        line_x,
        format!(
            "X\t1\t4\t\t3\t5\t{BUILTIN_VOCAB}:\
             inDeg(1,2):inDeg(2,2):inDeg(3,1):outDeg(4,1):outDeg(1,1):outDeg(2,2):outDeg(3,1)\t\
             4->1:1,8,11\t1->2:2,9,12\t2->1:2,8,13\t2->3:2,10,13\t3->2:2,9,14"
        )
    );
}

#[test]
fn sibling_graphs_augment_independently() {
    let mut grounding = chain_grounding();
    // Augment only graph X; graph Y must keep its builtin-only vocabulary.
    ground::add_degree_features(&mut grounding.graphs[0]);

    assert!(grounding.graphs[0].features.len() > 7);
    assert_eq!(grounding.graphs[1].features.len(), 7);
    assert!(grounding.graphs[1]
        .edges
        .iter()
        .all(|e| e.features.len() == 1));

    // Y still serializes exactly as before.
    let line_y = proppr::grounded_line(&grounding.graphs[1]);
    assert_eq!(
        line_y,
        format!("Y\t1\t4\t\t3\t5\t{BUILTIN_VOCAB}\t4->3:1\t1->2:2\t2->1:2\t2->3:2\t3->2:2")
    );
}

#[test]
fn grounding_is_deterministic_across_runs_and_seed_order() {
    let edges = chain_edges();
    let forward = SeedAssignment::from_edges([
        JuntoEdge::new("a", "X", "1.0"),
        JuntoEdge::new("c", "Y", "1.0"),
    ]);
    let backward = SeedAssignment::from_edges([
        JuntoEdge::new("c", "Y", "1.0"),
        JuntoEdge::new("a", "X", "1.0"),
    ]);

    let render = |seeds: &SeedAssignment| -> Vec<String> {
        ground::ground(&edges, seeds, seeds.labels())
            .graphs
            .iter()
            .map(proppr::grounded_line)
            .collect()
    };
    assert_eq!(render(&forward), render(&backward));
    assert_eq!(render(&forward), render(&forward));
}

#[test]
fn duplicate_seed_assignment_keeps_the_last_label() {
    let edges = chain_edges();
    let seeds = SeedAssignment::from_edges([
        JuntoEdge::new("a", "X", "1.0"),
        JuntoEdge::new("a", "Y", "1.0"),
    ]);
    let grounding = ground::ground(&edges, &seeds, seeds.labels());

    // Only Y remains, and only it gets a's seed edge.
    assert_eq!(grounding.graphs.len(), 1);
    assert_eq!(grounding.graphs[0].query, "Y");
    let line = proppr::grounded_line(&grounding.graphs[0]);
    assert!(line.contains("4->1:1"));
}
