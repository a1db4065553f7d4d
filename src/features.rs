//! Feature vocabulary: 1-indexed edge feature names for grounded graphs.
//!
//! Every query graph carries its own [`FeatureVocabulary`]. The grounded
//! text format refers to features by their 1-based position in the
//! colon-joined vocabulary column, so entry order is part of the output
//! contract: the seven builtin entries always come first, in fixed order,
//! and degree features are appended per graph in encounter order.

use std::collections::HashMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Vocabulary entries every query graph starts with, in fixed order.
///
/// `seed` (1) marks seed edges and `assoc` (2) marks structural edges. The
/// remaining five are fixed-weight features the ProPPR walker resolves by
/// name at load time.
pub const BUILTIN_FEATURES: [&str; 7] = [
    "seed",
    "assoc",
    "id(trueLoop)",
    "id(trueLoopRestart)",
    "fixedWeight",
    "id(restart)",
    "id(alphaBooster)",
];

/// 1-based index of a feature within a [`FeatureVocabulary`].
///
/// `NonZeroU32` gives `Option<FeatureId>` the same size as `FeatureId` and
/// rules out the meaningless index 0 at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct FeatureId(NonZeroU32);

/// Id of the `seed` feature, present in every vocabulary at entry 1.
pub const SEED: FeatureId = fixed(1);

/// Id of the `assoc` feature, present in every vocabulary at entry 2.
pub const ASSOC: FeatureId = fixed(2);

const fn fixed(raw: u32) -> FeatureId {
    match NonZeroU32::new(raw) {
        Some(n) => FeatureId(n),
        None => panic!("feature ids are 1-based"),
    }
}

impl FeatureId {
    /// Create a `FeatureId` from a raw `u32`.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(FeatureId)
    }

    /// Get the underlying 1-based index.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for FeatureId {
    // Bare integer: feature ids appear verbatim in edge segments (`4->1:1`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, interning vocabulary of feature names.
///
/// Entry `i` lives at position `i - 1`; the grounded format indexes features
/// from 1. Cloning a vocabulary is how per-graph feature sets stay
/// independent: degree augmentation appends to one graph's clone without
/// disturbing any other graph.
#[derive(Debug, Clone)]
pub struct FeatureVocabulary {
    entries: Vec<String>,
    ids: HashMap<String, FeatureId>,
}

impl FeatureVocabulary {
    /// Create a vocabulary pre-populated with [`BUILTIN_FEATURES`].
    pub fn new() -> Self {
        let mut vocab = Self {
            entries: Vec::new(),
            ids: HashMap::new(),
        };
        for name in BUILTIN_FEATURES {
            vocab.intern(name);
        }
        vocab
    }

    /// Return the id for `name`, appending it as the next entry on first
    /// sighting. Repeat calls return the existing id without growing the
    /// vocabulary.
    pub fn intern(&mut self, name: &str) -> FeatureId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        self.entries.push(name.to_string());
        let raw = u32::try_from(self.entries.len()).expect("feature id space exhausted");
        let id = FeatureId::new(raw).expect("vocabulary indices start at 1");
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up the id for a feature name, if present.
    pub fn lookup(&self, name: &str) -> Option<FeatureId> {
        self.ids.get(name).copied()
    }

    /// Look up the name at a 1-based index.
    pub fn name_of(&self, id: FeatureId) -> Option<&str> {
        self.entries.get(id.get() as usize - 1).map(String::as_str)
    }

    /// Number of entries, builtins included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vocabulary has no entries. Never true for vocabularies
    /// built with [`new`](Self::new).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in index order (entry 1 first).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for FeatureVocabulary {
    fn default() -> Self {
        Self::new()
    }
}
