//! Node registry: bidirectional name ↔ id mapping for graph nodes.
//!
//! The [`NodeRegistry`] assigns a dense, 1-based integer id to every distinct
//! node name on first sighting and records the reverse mapping for the node
//! map artifact. It owns its id counter outright: a grounding run creates a
//! registry, threads it through, and discards it. No global state, no
//! cross-run persistence.

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Unique, niche-optimized identifier for a graph node.
///
/// Uses `NonZeroU64` so that `Option<NodeId>` is the same size as `NodeId`
/// (the niche optimization lets the compiler use 0 as the `None`
/// discriminant). Ids start at 1, matching the 1-based ids in the grounded
/// output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(NonZeroU64);

impl NodeId {
    /// Create a `NodeId` from a raw `u64`.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(NodeId)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for NodeId {
    // Bare integer: node ids appear verbatim in edge segments (`4->1:...`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interning registry mapping node names to dense 1-based ids and back.
///
/// Ids are allocated monotonically on first sighting and never change for
/// the lifetime of the registry. Single-threaded by design: the grounding
/// pipeline is a batch job with exclusively-owned state.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    /// Next raw id to hand out.
    next: u64,
    /// Forward map: name → id.
    ids: HashMap<String, NodeId>,
    /// Reverse map: id → name. Ascending-id iteration equals registration
    /// order because ids are monotonic.
    names: BTreeMap<NodeId, String>,
}

impl NodeRegistry {
    /// Create an empty registry; the first id handed out is 1.
    pub fn new() -> Self {
        Self {
            next: 1,
            ids: HashMap::new(),
            names: BTreeMap::new(),
        }
    }

    /// Allocate the next id. Exhausting the u64 id space takes 2^64
    /// allocations and cannot happen in a real run.
    fn allocate(&mut self) -> NodeId {
        let id = NodeId::new(self.next).expect("node id space exhausted");
        self.next += 1;
        id
    }

    /// Return the id for `name`, allocating the next unused id on first
    /// sighting. Subsequent calls for the same name return the same id with
    /// no side effect.
    pub fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.allocate();
        self.ids.insert(name.to_string(), id);
        self.names.insert(id, name.to_string());
        id
    }

    /// Allocate a fresh id with no name attached.
    ///
    /// Used for the synthetic start node, created after all graph nodes are
    /// interned so its id strictly exceeds every named id. Synthetic ids are
    /// not counted by [`len`](Self::len) and never appear in the exported
    /// node map.
    pub fn synthetic_id(&mut self) -> NodeId {
        self.allocate()
    }

    /// Look up the id for a name, if it has been interned.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    /// Look up the name for an id. `None` for synthetic ids.
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Number of *named* nodes (synthetic ids excluded).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names have been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate named nodes in ascending id order (= registration order).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.names.iter().map(|(&id, name)| (id, name.as_str()))
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
