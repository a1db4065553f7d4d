//! # seedwalk
//!
//! Grounds Junto label-propagation graphs into ProPPR-style query graphs
//! and drives both propagation engines over the results.
//!
//! ## Pipeline
//!
//! - **Input** (`junto`): Junto config, edge-list, and seed-file parsing
//! - **Grounding** (`ground`): one feature-annotated query graph per seed
//!   label, plus per-node degree features on demand
//! - **Identity** (`registry`, `features`): dense 1-based node ids and the
//!   1-indexed feature vocabulary the grounded format refers into
//! - **Output** (`proppr`): the `.grounded` text format and the `.map`
//!   node-id JSON
//! - **Engines** (`runner`, `results`): subprocess control for Junto and
//!   ProPPR's SRW, and the ranked per-node labels they produce
//!
//! ## Library usage
//!
//! ```
//! use seedwalk::ground;
//! use seedwalk::junto::{JuntoEdge, SeedAssignment};
//!
//! let edges = [
//!     JuntoEdge::new("a", "b", "1.0"),
//!     JuntoEdge::new("b", "c", "1.0"),
//! ];
//! let seeds = SeedAssignment::from_edges([
//!     JuntoEdge::new("a", "X", "1.0"),
//!     JuntoEdge::new("c", "Y", "1.0"),
//! ]);
//!
//! let grounding = ground::ground(&edges, &seeds, seeds.labels());
//! assert_eq!(grounding.graphs.len(), 2);
//! assert_eq!(grounding.graphs[0].query, "X");
//! ```

pub mod convert;
pub mod error;
pub mod features;
pub mod ground;
pub mod junto;
pub mod proppr;
pub mod registry;
pub mod results;
pub mod runner;
