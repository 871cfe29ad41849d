//! Structural equality and hashing of variable nodes.

use arbor_cmp::{EqOps, HashOps, NodeHasher};
use arbor_ir::ExprId;
use arbor_lang::{Language, Module};

use crate::ast::RefExpr;

pub(crate) struct EqAlgo;

impl EqOps for EqAlgo {
    fn eq_expr(&self, _lang: &Language, m: &Module, a: ExprId, b: ExprId) -> bool {
        // References are equal when they denote the same declaration.
        let left = m.expr_node(a).cast_ref::<RefExpr>();
        let right = m.expr_node(b).cast_ref::<RefExpr>();
        left.decl == right.decl
    }
}

pub(crate) struct HashAlgo;

impl HashOps for HashAlgo {
    fn hash_expr(&self, h: &mut NodeHasher, _lang: &Language, m: &Module, id: ExprId) {
        let reference = m.expr_node(id).cast_ref::<RefExpr>();
        h.mix_u32(reference.decl.raw());
    }
}
