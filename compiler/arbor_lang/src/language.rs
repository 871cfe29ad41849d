//! The process-scoped language aggregate.

use arbor_ir::{FeatureId, Kind, Symbol, SymbolTable};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::Feature;

/// The set of registered language features plus the shared symbol table.
///
/// Exactly one `Language` is active per compilation session. It is
/// constructed once at program start, features are added immediately after
/// construction and before any node is built, and it is never mutated
/// thereafter - so a `&Language` may be threaded through every kernel
/// operation (there is no global instance) and shared freely across modules.
pub struct Language {
    /// Registration order; iterated by startup completeness checks.
    features: Vec<Feature>,
    /// Feature id to index in `features`.
    by_id: FxHashMap<FeatureId, usize>,
    symbols: SymbolTable,
}

impl Language {
    /// Create a language with no features.
    pub fn new() -> Self {
        Language {
            features: Vec::new(),
            by_id: FxHashMap::default(),
            symbols: SymbolTable::new(),
        }
    }

    /// Register a feature. Setup-time only.
    ///
    /// # Panics
    /// Panics if a feature with the same id is already registered; kind
    /// blocks of distinct features must stay disjoint.
    pub fn add_feature(&mut self, feature: Feature) {
        debug!(id = feature.id().raw(), name = feature.name(), "add feature");
        if let Some(&idx) = self.by_id.get(&feature.id()) {
            panic!(
                "feature id {} registered twice: `{}` and `{}`",
                feature.id().raw(),
                self.features[idx].name(),
                feature.name()
            );
        }
        self.by_id.insert(feature.id(), self.features.len());
        self.features.push(feature);
    }

    /// The registered features, in registration order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The feature with the given id.
    ///
    /// # Panics
    /// Panics if no such feature is registered - a node carrying a kind from
    /// an unregistered block indicates a linkage bug.
    pub fn feature(&self, id: FeatureId) -> &Feature {
        match self.by_id.get(&id) {
            Some(&idx) => &self.features[idx],
            None => panic!("no feature registered for id {}", id.raw()),
        }
    }

    /// The feature owning the block `kind` is drawn from. O(1).
    pub fn feature_of(&self, kind: Kind) -> &Feature {
        self.feature(kind.feature())
    }

    /// The shared symbol table.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Intern an identifier spelling.
    pub fn intern(&self, spelling: &str) -> Symbol {
        self.symbols.intern(spelling)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("features", &self.features)
            .finish()
    }
}
