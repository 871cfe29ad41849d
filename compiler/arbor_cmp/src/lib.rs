//! Structural equality and hashing: the `Equal` and `Hashing` families.
//!
//! Canonical types get the fast path: within one module, equal `TypeId`s
//! denote the same node, so identity implies equality without dispatching.
//! Nodes of different kinds are unequal without dispatching either - a
//! feature's `eq` implementation only ever compares two nodes of a kind it
//! defined itself. Non-canonical composites fall back to the feature's
//! structural comparison.
//!
//! Hashing mixes the node's kind before any feature-supplied data, so nodes
//! of different kinds hash apart even when their payloads coincide.

use std::hash::Hasher;

use arbor_ir::{ExprId, Kind, TypeId};
use arbor_lang::{AlgorithmFamily, Language, Module};
use rustc_hash::FxHasher;

/// Family tag for structural equality.
pub struct Equal;

impl AlgorithmFamily for Equal {
    type Dispatch = dyn EqOps;
    const NAME: &'static str = "equal";
}

/// Family tag for structural hashing.
pub struct Hashing;

impl AlgorithmFamily for Hashing {
    type Dispatch = dyn HashOps;
    const NAME: &'static str = "hash";
}

/// Hasher threaded through the hash dispatch.
pub struct NodeHasher {
    inner: FxHasher,
}

impl NodeHasher {
    /// Create a fresh hasher.
    pub fn new() -> Self {
        NodeHasher {
            inner: FxHasher::default(),
        }
    }

    /// Mix a node kind.
    pub fn mix_kind(&mut self, kind: Kind) {
        self.inner.write_u32(kind.raw());
    }

    /// Mix a u32.
    pub fn mix_u32(&mut self, n: u32) {
        self.inner.write_u32(n);
    }

    /// Mix an i64.
    pub fn mix_i64(&mut self, n: i64) {
        self.inner.write_i64(n);
    }

    /// Mix a bool.
    pub fn mix_bool(&mut self, b: bool) {
        self.inner.write_u8(u8::from(b));
    }

    /// The accumulated hash value.
    pub fn finish(&self) -> u64 {
        self.inner.finish()
    }
}

impl Default for NodeHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-feature structural equality. Both operands are guaranteed to have
/// the same kind, owned by the implementing feature.
pub trait EqOps {
    /// Structural equality of two type nodes of the same kind.
    fn eq_type(&self, _lang: &Language, m: &Module, a: TypeId, _b: TypeId) -> bool {
        panic!(
            "equality algorithm not defined for type node {:?}",
            m.type_node(a).kind()
        );
    }

    /// Structural equality of two expression nodes of the same kind.
    fn eq_expr(&self, _lang: &Language, m: &Module, a: ExprId, _b: ExprId) -> bool {
        panic!(
            "equality algorithm not defined for expression node {:?}",
            m.expr_node(a).kind()
        );
    }
}

/// Per-feature structural hashing.
pub trait HashOps {
    /// Hash a type node's feature data (the kind is already mixed).
    fn hash_type(&self, _h: &mut NodeHasher, _lang: &Language, m: &Module, id: TypeId) {
        panic!(
            "hash algorithm not defined for type node {:?}",
            m.type_node(id).kind()
        );
    }

    /// Hash an expression node's feature data (the kind is already mixed).
    fn hash_expr(&self, _h: &mut NodeHasher, _lang: &Language, m: &Module, id: ExprId) {
        panic!(
            "hash algorithm not defined for expression node {:?}",
            m.expr_node(id).kind()
        );
    }
}

/// Structural equality of two types.
///
/// Identity short-circuit first: canonical types are unique per
/// parametrization, so equal ids are equal types without dispatch.
pub fn equivalent_types(lang: &Language, m: &Module, a: TypeId, b: TypeId) -> bool {
    if a == b {
        return true;
    }
    let ka = m.type_node(a).kind();
    let kb = m.type_node(b).kind();
    if ka != kb {
        return false;
    }
    lang.feature_of(ka).algorithm::<Equal>().eq_type(lang, m, a, b)
}

/// Structural equality of two expressions.
pub fn equivalent_exprs(lang: &Language, m: &Module, a: ExprId, b: ExprId) -> bool {
    if a == b {
        return true;
    }
    let ka = m.expr_node(a).kind();
    let kb = m.expr_node(b).kind();
    if ka != kb {
        return false;
    }
    lang.feature_of(ka).algorithm::<Equal>().eq_expr(lang, m, a, b)
}

/// Mix a type into the hasher: kind first, then feature data.
pub fn hash_type(h: &mut NodeHasher, lang: &Language, m: &Module, id: TypeId) {
    let kind = m.type_node(id).kind();
    h.mix_kind(kind);
    lang.feature_of(kind).algorithm::<Hashing>().hash_type(h, lang, m, id);
}

/// Mix an expression into the hasher: kind first, then feature data.
pub fn hash_expr(h: &mut NodeHasher, lang: &Language, m: &Module, id: ExprId) {
    let kind = m.expr_node(id).kind();
    h.mix_kind(kind);
    lang.feature_of(kind).algorithm::<Hashing>().hash_expr(h, lang, m, id);
}

/// Hash of a single type node.
pub fn type_hash(lang: &Language, m: &Module, id: TypeId) -> u64 {
    let mut h = NodeHasher::new();
    hash_type(&mut h, lang, m, id);
    h.finish()
}

/// Hash of a single expression node.
pub fn expr_hash(lang: &Language, m: &Module, id: ExprId) -> u64 {
    let mut h = NodeHasher::new();
    hash_expr(&mut h, lang, m, id);
    h.finish()
}
