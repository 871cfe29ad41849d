//! Canonicalization (hash-consing) of parametrized type families.
//!
//! A canonical set maps a parameter tuple - say, an integer precision - to
//! the unique type node for that parametrization within one module. Because
//! the arena allocates exactly one node per distinct parameter tuple,
//! `TypeId` equality *is* structural equality for canonical types, and every
//! downstream algorithm (equality, hashing, codegen type caching) compares
//! canonical types by id instead of walking structure.
//!
//! Non-canonical types - composites built directly from components without
//! going through a set - do not get this guarantee and fall back to
//! structural comparison.
//!
//! Canonical sets are owned by feature builders, which are owned by the
//! module; the set and its nodes die together with the module.

use std::hash::Hash;

use arbor_ir::{TypeId, TypeNode};
use arbor_lang::Module;
use rustc_hash::FxHashMap;
use tracing::trace;

/// A uniquing table for one parametrized type family.
///
/// Append-only: entries are never evicted or replaced, so an id returned
/// once stays valid and unique for the module's lifetime.
pub struct CanonicalSet<P> {
    entries: FxHashMap<P, TypeId>,
}

impl<P: Eq + Hash + Clone + std::fmt::Debug> CanonicalSet<P> {
    /// Create an empty set.
    pub fn new() -> Self {
        CanonicalSet {
            entries: FxHashMap::default(),
        }
    }

    /// The canonical type for `params`.
    ///
    /// Returns the existing id when the parametrization has been seen;
    /// otherwise allocates a new node via `make`, records it, and returns
    /// its id. Two calls with equal `params` always return the same id.
    ///
    /// Domain checking (e.g. which precisions a feature accepts) is the
    /// caller's contract and must be asserted before consulting the set.
    pub fn get<N, F>(&mut self, module: &mut Module, params: P, make: F) -> TypeId
    where
        N: TypeNode + 'static,
        F: FnOnce(&P) -> N,
    {
        if let Some(&id) = self.entries.get(&params) {
            return id;
        }
        let node = make(&params);
        let id = module.alloc_type(node);
        trace!(?params, ?id, "canonicalize type");
        self.entries.insert(params, id);
        id
    }

    /// The canonical type for `params`, if already interned.
    pub fn lookup(&self, params: &P) -> Option<TypeId> {
        self.entries.get(params).copied()
    }

    /// Number of distinct parametrizations interned so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no parametrization has been interned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Eq + Hash + Clone + std::fmt::Debug> Default for CanonicalSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_ir::{FeatureId, Kind};
    use arbor_lang::Language;
    use pretty_assertions::assert_eq;

    const FID: FeatureId = FeatureId::new(5);
    const WIDTH_KIND: Kind = Kind::in_block(FID, 0);

    struct WidthType {
        width: u32,
    }
    impl TypeNode for WidthType {
        fn kind(&self) -> Kind {
            WIDTH_KIND
        }
    }

    #[test]
    fn equal_params_yield_identical_ids() {
        let lang = Language::new();
        let mut m = Module::new(lang.intern("unit"));
        let mut set = CanonicalSet::new();

        let a = set.get(&mut m, 32u32, |&p| WidthType { width: p });
        let b = set.get(&mut m, 32u32, |&p| WidthType { width: p });
        let c = set.get(&mut m, 64u32, |&p| WidthType { width: p });

        assert_eq!(a, b);
        assert_ne!(a, c);
        // Only two nodes were ever allocated.
        assert_eq!(m.type_count(), 2);
        assert_eq!(set.len(), 2);
        assert_eq!(m.type_node(a).cast_ref::<WidthType>().width, 32);
        assert_eq!(m.type_node(c).cast_ref::<WidthType>().width, 64);
    }

    #[test]
    fn lookup_does_not_allocate() {
        let lang = Language::new();
        let mut m = Module::new(lang.intern("unit"));
        let mut set = CanonicalSet::new();
        assert_eq!(set.lookup(&8u32), None);
        let id = set.get(&mut m, 8u32, |&p| WidthType { width: p });
        assert_eq!(set.lookup(&8u32), Some(id));
    }
}
